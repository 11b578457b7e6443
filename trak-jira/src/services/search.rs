use tracing::{debug, info, instrument};
use trak_core::{FilterCriteria, NormalizedIssue, PageRequest, TrackerResult, VendorResponse};

use super::{PagedService, classify, list_records};
use crate::adapter::{adapt_all, adapt_issue};
use crate::client::JiraClient;
use crate::consts::PARAM_JQL;
use crate::query::build_query;

/// Issue search over `/search`.
#[derive(Debug, Clone)]
pub struct SearchService<'a> {
  client: &'a JiraClient,
  page: PageRequest,
}

impl JiraClient {
  pub fn search(&self) -> SearchService<'_> {
    SearchService::new(self)
  }
}

impl<'a> SearchService<'a> {
  pub fn new(client: &'a JiraClient) -> Self {
    Self {
      client,
      page: client.default_page(),
    }
  }

  /// Issues matching `criteria` on the current page.
  #[instrument(skip(self), level = "debug")]
  pub async fn search(&self, criteria: &FilterCriteria) -> TrackerResult<VendorResponse<Vec<NormalizedIssue>>> {
    let query = build_query(criteria, self.page);
    info!("Searching Jira issues: {}", query.jql);
    self.run(&query.to_params()).await
  }

  /// Issues matching a hand-written JQL expression on the current page.
  #[instrument(skip(self), level = "debug")]
  pub async fn search_jql(&self, jql: &str) -> TrackerResult<VendorResponse<Vec<NormalizedIssue>>> {
    info!("Searching Jira issues: {}", jql);
    self
      .run(&self.page_params(&[(PARAM_JQL.to_string(), jql.to_string())]))
      .await
  }

  async fn run(&self, params: &[(String, String)]) -> TrackerResult<VendorResponse<Vec<NormalizedIssue>>> {
    let body = self.client.get_json("search", params).await?;

    let issues = list_records(classify(body), "issues")?.try_map(|records| adapt_all(&records, adapt_issue))?;
    if let VendorResponse::Data(issues) = &issues {
      debug!("Search returned {} issues", issues.len());
    }
    Ok(issues)
  }
}

impl PagedService for SearchService<'_> {
  fn page(&self) -> PageRequest {
    self.page
  }

  fn page_mut(&mut self) -> &mut PageRequest {
    &mut self.page
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;
  use trak_core::FilterField;
  use trak_test_utils::fixtures::{error_payload, flat_issue, jira_issue, search_response};
  use wiremock::matchers::{method, path, query_param};
  use wiremock::{Mock, MockServer, ResponseTemplate};

  use super::*;
  use crate::create_jira_client;

  #[tokio::test]
  async fn test_search_sends_jql_and_page() {
    let mock_server = MockServer::start().await;
    let client = create_jira_client(&mock_server.uri(), "u", "p");

    Mock::given(method("GET"))
      .and(path("/rest/api/2/search"))
      .and(query_param("jql", "status = Open AND labels in (a,b)"))
      .and(query_param("startAt", "30"))
      .and(query_param("maxResults", "30"))
      .respond_with(ResponseTemplate::new(200).set_body_json(search_response(vec![
        jira_issue("PROJ-1", "One"),
        flat_issue(2, "Two"),
      ])))
      .expect(1)
      .mount(&mock_server)
      .await;

    let criteria = FilterCriteria::new()
      .with(FilterField::State, "Open")
      .with(FilterField::Labels, vec!["a".to_string(), "b".to_string()]);
    let mut search = client.search();
    search.set_limit(30).next_page();
    assert_eq!(search.start(), 30);

    let issues = search.search(&criteria).await.unwrap().into_records();
    let titles: Vec<_> = issues.iter().map(|i| i.title.as_str()).collect();
    assert_eq!(titles, vec!["One", "Two"]);
  }

  #[tokio::test]
  async fn test_search_jql_empty_and_error() {
    let mock_server = MockServer::start().await;
    let client = create_jira_client(&mock_server.uri(), "u", "p");

    Mock::given(method("GET"))
      .and(path("/rest/api/2/search"))
      .and(query_param("jql", "project = NONE"))
      .respond_with(ResponseTemplate::new(200).set_body_json(search_response(vec![])))
      .mount(&mock_server)
      .await;
    Mock::given(method("GET"))
      .and(path("/rest/api/2/search"))
      .and(query_param("jql", "project = DENIED"))
      .respond_with(ResponseTemplate::new(200).set_body_json(error_payload()))
      .mount(&mock_server)
      .await;

    let search = client.search();
    let empty = search.search_jql("project = NONE").await.unwrap();
    assert!(empty.is_empty());
    assert!(empty.into_records().is_empty());

    let denied = search.search_jql("project = DENIED").await.unwrap();
    assert!(denied.is_vendor_error());
    assert!(denied.into_records().is_empty());
  }

  #[tokio::test]
  async fn test_search_malformed_record_fails() {
    let mock_server = MockServer::start().await;
    let client = create_jira_client(&mock_server.uri(), "u", "p");

    Mock::given(method("GET"))
      .and(path("/rest/api/2/search"))
      .respond_with(
        ResponseTemplate::new(200).set_body_json(search_response(vec![json!({ "id": "1", "self": "u" })])),
      )
      .mount(&mock_server)
      .await;

    assert!(client.search().search(&FilterCriteria::new()).await.is_err());
  }
}
