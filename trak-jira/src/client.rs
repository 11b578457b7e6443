use reqwest::{Client, Method, RequestBuilder, StatusCode, header};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument, trace, warn};
use trak_core::consts::DEFAULT_PAGE_LIMIT;
use trak_core::{PageRequest, TrackerError, TrackerResult};

use crate::consts::{API_PATH, USER_AGENT};
use crate::models::JiraAuth;

/// Represents a Jira API client
///
/// Every call returns the parsed JSON body, or `None` when the vendor sent an
/// empty body. Non-2xx statuses become [`TrackerError`]s here unless the call
/// is the tolerant GET; payload-level error reporting is left to the services.
#[derive(Debug, Clone)]
pub struct JiraClient {
  pub(crate) client: Client,
  pub(crate) base_url: String,
  pub(crate) auth: Option<JiraAuth>,
  pub(crate) page_limit: u32,
}

impl JiraClient {
  /// Create a new Jira client
  pub fn new(base_url: &str, auth: Option<JiraAuth>) -> Self {
    Self {
      client: Client::new(),
      base_url: base_url.trim_end_matches('/').to_string(),
      auth,
      page_limit: DEFAULT_PAGE_LIMIT,
    }
  }

  /// Set the page size services start from.
  pub fn with_page_limit(mut self, limit: u32) -> Self {
    self.page_limit = limit.max(1);
    self
  }

  pub fn base_url(&self) -> &str {
    &self.base_url
  }

  pub fn set_auth(&mut self, auth: JiraAuth) {
    self.auth = Some(auth);
  }

  pub fn has_auth(&self) -> bool {
    self.auth.is_some()
  }

  /// First page for a new service.
  pub fn default_page(&self) -> PageRequest {
    PageRequest::with_limit(self.page_limit)
  }

  /// Absolute URL of a REST resource.
  pub fn api_url(&self, resource: &str) -> String {
    format!("{}/{}/{}", self.base_url, API_PATH, resource.trim_start_matches('/'))
  }

  /// Test the Jira connection by fetching the current user.
  ///
  /// Rejected credentials yield `Ok(false)`; other failures propagate.
  pub async fn test_connection(&self) -> TrackerResult<bool> {
    let (status, _) = self.get_json_tolerant("myself", &[]).await?;
    match status {
      s if s.is_success() => Ok(true),
      StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Ok(false),
      s => Err(TrackerError::Transport {
        status: Some(s.as_u16()),
        message: format!("Unexpected status while checking credentials: {s}"),
      }),
    }
  }

  /// GET that hands back 4xx/5xx replies instead of failing on them.
  ///
  /// Only network failures are errors. The body is parsed when it is JSON and
  /// `None` otherwise.
  pub(crate) async fn get_json_tolerant(
    &self,
    resource: &str,
    params: &[(String, String)],
  ) -> TrackerResult<(StatusCode, Option<Value>)> {
    let (status, text) = self.execute::<()>(Method::GET, resource, params, None).await?;
    Ok((status, serde_json::from_str(&text).ok()))
  }

  pub(crate) async fn get_json(&self, resource: &str, params: &[(String, String)]) -> TrackerResult<Option<Value>> {
    self.send::<()>(Method::GET, resource, params, None).await
  }

  pub(crate) async fn post_json<B: Serialize + ?Sized>(
    &self,
    resource: &str,
    params: &[(String, String)],
    body: &B,
  ) -> TrackerResult<Option<Value>> {
    self.send(Method::POST, resource, params, Some(body)).await
  }

  pub(crate) async fn put_json<B: Serialize + ?Sized>(
    &self,
    resource: &str,
    params: &[(String, String)],
    body: &B,
  ) -> TrackerResult<Option<Value>> {
    self.send(Method::PUT, resource, params, Some(body)).await
  }

  fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
    match &self.auth {
      Some(JiraAuth::Basic { username, api_token }) => request.basic_auth(username, Some(api_token)),
      Some(JiraAuth::Bearer { token }) => request.bearer_auth(token),
      None => request,
    }
  }

  async fn send<B: Serialize + ?Sized>(
    &self,
    method: Method,
    resource: &str,
    params: &[(String, String)],
    body: Option<&B>,
  ) -> TrackerResult<Option<Value>> {
    let (status, text) = self.execute(method, resource, params, body).await?;

    match status {
      s if s.is_success() => parse_body(&text),
      StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
        warn!("Authentication failed when accessing Jira API");
        Err(TrackerError::Authentication)
      }
      StatusCode::NOT_FOUND => Err(TrackerError::NotFound(format!("Jira resource `{resource}`"))),
      _ => {
        warn!("Unexpected Jira API error: HTTP {} - {}", status, text);
        Err(TrackerError::Transport {
          status: Some(status.as_u16()),
          message: error_summary(&text),
        })
      }
    }
  }

  /// Send one request and return the status with the raw body text.
  #[instrument(skip(self, body), level = "debug")]
  async fn execute<B: Serialize + ?Sized>(
    &self,
    method: Method,
    resource: &str,
    params: &[(String, String)],
    body: Option<&B>,
  ) -> TrackerResult<(StatusCode, String)> {
    let url = self.api_url(resource);
    trace!("Jira API URL: {}", url);

    let mut request = self
      .client
      .request(method.clone(), &url)
      .header(header::ACCEPT, "application/json")
      .header(header::USER_AGENT, USER_AGENT);
    if !params.is_empty() {
      request = request.query(params);
    }
    if let Some(body) = body {
      request = request.json(body);
    }

    let response = self.authorize(request).send().await.map_err(|e| TrackerError::Transport {
      status: e.status().map(|s| s.as_u16()),
      message: format!("{method} {url} failed: {e}"),
    })?;

    let status = response.status();
    debug!("Jira API response status: {}", status);

    let text = response.text().await.map_err(|e| TrackerError::Transport {
      status: Some(status.as_u16()),
      message: format!("Failed to read response body: {e}"),
    })?;

    Ok((status, text))
  }
}

fn parse_body(text: &str) -> TrackerResult<Option<Value>> {
  if text.trim().is_empty() {
    return Ok(None);
  }
  serde_json::from_str(text).map(Some).map_err(|e| {
    debug!("Response body is not JSON: {}", e);
    TrackerError::malformed("<body>")
  })
}

/// The `errorMessages` of a failure body when present, the raw text otherwise.
fn error_summary(text: &str) -> String {
  let messages: Vec<String> = serde_json::from_str::<Value>(text)
    .ok()
    .and_then(|v| v.get("errorMessages").and_then(Value::as_array).cloned())
    .unwrap_or_default()
    .iter()
    .filter_map(|m| m.as_str().map(str::to_string))
    .collect();

  if messages.is_empty() {
    text.to_string()
  } else {
    messages.join("; ")
  }
}

/// Create a Jira client from basic credentials
pub fn create_jira_client(base_url: &str, username: &str, api_token: &str) -> JiraClient {
  JiraClient::new(
    base_url,
    Some(JiraAuth::Basic {
      username: username.to_string(),
      api_token: api_token.to_string(),
    }),
  )
}
