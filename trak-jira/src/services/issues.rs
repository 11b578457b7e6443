use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, instrument};
use trak_core::{NormalizedComment, NormalizedIssue, PageRequest, TrackerResult, VendorResponse};

use super::{PagedService, classify, list_records};
use crate::adapter::{adapt_all, adapt_comment, adapt_issue};
use crate::client::JiraClient;
use crate::models::CommentPayload;

/// Issue and comment requests.
#[derive(Debug, Clone)]
pub struct IssueService<'a> {
  client: &'a JiraClient,
  page: PageRequest,
}

impl JiraClient {
  /// Issue service starting at the client's default page.
  pub fn issues(&self) -> IssueService<'_> {
    IssueService::new(self)
  }
}

impl<'a> IssueService<'a> {
  pub fn new(client: &'a JiraClient) -> Self {
    Self {
      client,
      page: client.default_page(),
    }
  }

  /// Get a Jira issue by key or id
  #[instrument(skip(self), level = "debug")]
  pub async fn get(&self, key: &str) -> TrackerResult<VendorResponse<NormalizedIssue>> {
    info!("Fetching Jira issue {}", key);
    let body = self
      .client
      .get_json(&format!("issue/{key}"), &self.page_params(&[]))
      .await?;

    classify(body).try_map(|raw| adapt_issue(&raw))
  }

  /// Create an issue. The reply (`id`, `key`, `self`) is returned unadapted.
  #[instrument(skip(self, payload), level = "debug")]
  pub async fn create_issue<P: Serialize + ?Sized>(&self, payload: &P) -> TrackerResult<VendorResponse<Value>> {
    info!("Creating Jira issue");
    let reply = self.client.post_json("issue", &self.page_params(&[]), payload).await?;
    Ok(classify(reply))
  }

  /// Edit an issue. Jira answers a successful edit with no content.
  #[instrument(skip(self, payload), level = "debug")]
  pub async fn update_issue<P: Serialize + ?Sized>(&self, key: &str, payload: &P) -> TrackerResult<VendorResponse<Value>> {
    info!("Updating Jira issue {}", key);
    let reply = self
      .client
      .put_json(&format!("issue/{key}"), &self.page_params(&[]), payload)
      .await?;
    Ok(classify(reply))
  }

  #[instrument(skip(self), level = "debug")]
  pub async fn get_comments(&self, key: &str) -> TrackerResult<VendorResponse<Vec<NormalizedComment>>> {
    let body = self
      .client
      .get_json(&format!("issue/{key}/comment"), &self.page_params(&[]))
      .await?;

    let comments = list_records(classify(body), "comments")?.try_map(|records| adapt_all(&records, adapt_comment))?;
    if let VendorResponse::Data(comments) = &comments {
      debug!("Received {} comments for {}", comments.len(), key);
    }
    Ok(comments)
  }

  #[instrument(skip(self, body), level = "debug")]
  pub async fn add_comment(&self, key: &str, body: &str) -> TrackerResult<VendorResponse<NormalizedComment>> {
    info!("Adding comment to Jira issue {}", key);
    let payload = CommentPayload { body: body.to_string() };
    let reply = self
      .client
      .post_json(&format!("issue/{key}/comment"), &self.page_params(&[]), &payload)
      .await?;

    classify(reply).try_map(|raw| adapt_comment(&raw))
  }
}

impl PagedService for IssueService<'_> {
  fn page(&self) -> PageRequest {
    self.page
  }

  fn page_mut(&mut self) -> &mut PageRequest {
    &mut self.page
  }
}
