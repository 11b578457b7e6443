use tracing::{info, instrument};
use trak_core::{NormalizedProject, PageRequest, TrackerError, TrackerResult, VendorResponse};

use super::{PagedService, classify, list_records};
use crate::adapter::{adapt_all, adapt_project};
use crate::client::JiraClient;

/// Project requests.
#[derive(Debug, Clone)]
pub struct ProjectService<'a> {
  client: &'a JiraClient,
  page: PageRequest,
}

impl JiraClient {
  pub fn projects(&self) -> ProjectService<'_> {
    ProjectService::new(self)
  }
}

impl<'a> ProjectService<'a> {
  pub fn new(client: &'a JiraClient) -> Self {
    Self {
      client,
      page: client.default_page(),
    }
  }

  /// Every project visible to the current user.
  #[instrument(skip(self), level = "debug")]
  pub async fn get_all(&self) -> TrackerResult<VendorResponse<Vec<NormalizedProject>>> {
    info!("Listing Jira projects");
    let body = self.client.get_json("project", &self.page_params(&[])).await?;

    list_records(classify(body), "values")?.try_map(|records| adapt_all(&records, adapt_project))
  }

  /// A project by id or key. A reply without a body is `NotFound`.
  #[instrument(skip(self), level = "debug")]
  pub async fn get_by_id(&self, id: &str) -> TrackerResult<VendorResponse<NormalizedProject>> {
    let body = self
      .client
      .get_json(&format!("project/{id}"), &self.page_params(&[]))
      .await?;

    match classify(body) {
      VendorResponse::Empty => Err(TrackerError::NotFound(format!("Project {id}"))),
      reply => reply.try_map(|raw| adapt_project(&raw)),
    }
  }
}

impl PagedService for ProjectService<'_> {
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
  use trak_test_utils::fixtures::{error_payload, jira_project};
  use wiremock::matchers::{method, path, query_param};
  use wiremock::{Mock, MockServer, ResponseTemplate};

  use super::*;
  use crate::create_jira_client;

  #[tokio::test]
  async fn test_get_all_projects() {
    let mock_server = MockServer::start().await;
    let client = create_jira_client(&mock_server.uri(), "u", "p").with_page_limit(25);

    Mock::given(method("GET"))
      .and(path("/rest/api/2/project"))
      .and(query_param("maxResults", "25"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!([
          jira_project("10000", "PROJ", "Project"),
          jira_project("10001", "OPS", "Operations")
      ])))
      .mount(&mock_server)
      .await;

    let projects = client.projects().get_all().await.unwrap().into_records();
    let keys: Vec<_> = projects.iter().map(|p| p.key.as_str()).collect();
    assert_eq!(keys, vec!["PROJ", "OPS"]);
  }

  #[tokio::test]
  async fn test_get_all_projects_empty() {
    let mock_server = MockServer::start().await;
    let client = create_jira_client(&mock_server.uri(), "u", "p");

    Mock::given(method("GET"))
      .and(path("/rest/api/2/project"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
      .mount(&mock_server)
      .await;

    let reply = client.projects().get_all().await.unwrap();
    assert!(reply.is_empty());
    assert!(reply.into_records().is_empty());
  }

  #[tokio::test]
  async fn test_get_all_projects_without_body() {
    let mock_server = MockServer::start().await;
    let client = create_jira_client(&mock_server.uri(), "u", "p");

    Mock::given(method("GET"))
      .and(path("/rest/api/2/project"))
      .respond_with(ResponseTemplate::new(200))
      .mount(&mock_server)
      .await;

    let reply = client.projects().get_all().await.unwrap();
    assert!(reply.is_empty());
    assert!(reply.into_records().is_empty());
  }

  #[tokio::test]
  async fn test_get_project_by_id_without_body_is_not_found() {
    let mock_server = MockServer::start().await;
    let client = create_jira_client(&mock_server.uri(), "u", "p");

    Mock::given(method("GET"))
      .and(path("/rest/api/2/project/GONE"))
      .respond_with(ResponseTemplate::new(200))
      .mount(&mock_server)
      .await;

    let err = client.projects().get_by_id("GONE").await.unwrap_err();
    assert!(matches!(err, TrackerError::NotFound(_)));
  }

  #[tokio::test]
  async fn test_get_project_by_id() {
    let mock_server = MockServer::start().await;
    let client = create_jira_client(&mock_server.uri(), "u", "p");

    Mock::given(method("GET"))
      .and(path("/rest/api/2/project/OPS"))
      .respond_with(ResponseTemplate::new(200).set_body_json(jira_project("10001", "OPS", "Operations")))
      .mount(&mock_server)
      .await;
    Mock::given(method("GET"))
      .and(path("/rest/api/2/project/BROKEN"))
      .respond_with(ResponseTemplate::new(200).set_body_json(error_payload()))
      .mount(&mock_server)
      .await;

    let project = client.projects().get_by_id("OPS").await.unwrap().data().unwrap();
    assert_eq!(project.name, "Operations");

    let reply = client.projects().get_by_id("BROKEN").await.unwrap();
    assert_eq!(
      reply,
      VendorResponse::VendorError(vec!["This is an error message.".to_string()])
    );
  }
}
