use serde::Serialize;

/// Represents Jira authentication credentials
#[derive(Clone, PartialEq, Eq)]
pub enum JiraAuth {
  /// HTTP Basic: username plus password or API token
  Basic { username: String, api_token: String },
  /// Bearer personal access token (Jira Server / Data Center)
  Bearer { token: String },
}

impl std::fmt::Debug for JiraAuth {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Basic { username, .. } => f
        .debug_struct("Basic")
        .field("username", username)
        .field("api_token", &"<redacted>")
        .finish(),
      Self::Bearer { .. } => f.debug_struct("Bearer").field("token", &"<redacted>").finish(),
    }
  }
}

/// Request body for creating or editing an issue
#[derive(Debug, Serialize)]
pub struct IssuePayload {
  pub fields: IssueFieldsPayload,
}

/// Issue fields. Unset fields are left out so edits only touch what changed.
#[derive(Debug, Default, Serialize)]
pub struct IssueFieldsPayload {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub project: Option<ProjectRef>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub summary: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
  #[serde(rename = "issuetype", skip_serializing_if = "Option::is_none")]
  pub issue_type: Option<NamedRef>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub labels: Option<Vec<String>>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub assignee: Option<NamedRef>,
}

/// Reference to a project by key
#[derive(Debug, Serialize)]
pub struct ProjectRef {
  pub key: String,
}

/// Reference to an issue type or user by name
#[derive(Debug, Serialize)]
pub struct NamedRef {
  pub name: String,
}

/// Request body for adding a comment
#[derive(Debug, Serialize)]
pub struct CommentPayload {
  pub body: String,
}
