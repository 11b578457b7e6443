//! # Jira Issue Tracker
//!
//! [`IssueTracker`] over the Jira services. Cloud and enterprise installations
//! share every request; they differ only in how a git remote is recognized.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info, instrument};
use trak_core::url::host_of;
use trak_core::{
  AdapterKind, FilterCriteria, IssueOptions, IssueTracker, IssueUpdate, NormalizedComment, NormalizedIssue,
  PageRequest, TrackerConfig, TrackerError, TrackerResult, VendorResponse,
};

use crate::adapter::created_issue_key;
use crate::auth::resolve_jira_auth;
use crate::client::JiraClient;
use crate::consts::{CLOUD_DOMAIN, DEFAULT_ISSUE_TYPE};
use crate::models::{IssueFieldsPayload, IssuePayload, JiraAuth, NamedRef, ProjectRef};
use crate::services::PagedService;

/// Which kind of Jira installation the tracker talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JiraVariant {
  /// Jira Cloud, hosted under `atlassian.net`
  Cloud,
  /// Self-hosted Jira Server / Data Center
  Enterprise,
}

impl JiraVariant {
  pub const fn from_adapter(kind: AdapterKind) -> Self {
    match kind {
      AdapterKind::Jira => Self::Cloud,
      AdapterKind::JiraEnterprise => Self::Enterprise,
    }
  }

  pub const fn display_name(self) -> &'static str {
    match self {
      Self::Cloud => "Jira",
      Self::Enterprise => "Jira Enterprise",
    }
  }

  /// Whether `remote_url` belongs to this installation.
  ///
  /// Cloud matches any remote mentioning `atlassian.net`. Enterprise matches
  /// remotes on the host of `repo_domain_url` or one of its subdomains.
  pub fn matches_remote(self, remote_url: &str, repo_domain_url: &str) -> bool {
    match self {
      Self::Cloud => remote_url.to_ascii_lowercase().contains(CLOUD_DOMAIN),
      Self::Enterprise => match (host_of(remote_url), host_of(repo_domain_url)) {
        (Some(remote), Some(domain)) => remote == domain || remote.ends_with(&format!(".{domain}")),
        _ => false,
      },
    }
  }
}

/// Jira behind the uniform tracker interface.
#[derive(Debug, Clone)]
pub struct JiraIssueTracker {
  client: JiraClient,
  variant: JiraVariant,
  repo_domain_url: String,
  project: Option<String>,
  credentials: Option<JiraAuth>,
}

impl JiraIssueTracker {
  pub fn new(client: JiraClient, variant: JiraVariant, repo_domain_url: &str) -> Self {
    Self {
      client,
      variant,
      repo_domain_url: repo_domain_url.trim_end_matches('/').to_string(),
      project: None,
      credentials: None,
    }
  }

  /// Project new issues are filed under when the caller names none.
  pub fn with_project(mut self, project: Option<String>) -> Self {
    self.project = project;
    self
  }

  /// Credentials attached by [`IssueTracker::authenticate`].
  pub fn with_credentials(mut self, credentials: Option<JiraAuth>) -> Self {
    self.credentials = credentials;
    self
  }

  pub fn client(&self) -> &JiraClient {
    &self.client
  }

  pub fn variant(&self) -> JiraVariant {
    self.variant
  }

  pub fn project(&self) -> Option<&str> {
    self.project.as_deref()
  }

  pub fn repo_domain_url(&self) -> &str {
    &self.repo_domain_url
  }
}

/// Build a tracker from `tracker.toml` and the user's home directory.
///
/// Credentials are resolved but not attached; call
/// [`IssueTracker::authenticate`] before making requests.
pub fn create_issue_tracker(config: &TrackerConfig, home: &Path) -> Result<JiraIssueTracker> {
  let base_url = config.resolved_base_url()?;
  let repo_domain_url = config.resolved_repo_domain_url()?;
  let credentials = resolve_jira_auth(config, home, &base_url).context("Failed to resolve Jira credentials")?;

  let client = JiraClient::new(&base_url, None).with_page_limit(config.page_size);
  debug!("Created {} tracker for {}", JiraVariant::from_adapter(config.adapter).display_name(), base_url);

  Ok(
    JiraIssueTracker::new(client, JiraVariant::from_adapter(config.adapter), &repo_domain_url)
      .with_project(config.project.clone())
      .with_credentials(credentials),
  )
}

impl IssueTracker for JiraIssueTracker {
  fn supports_repository(&self, remote_url: &str) -> bool {
    self.variant.matches_remote(remote_url, &self.repo_domain_url)
  }

  async fn authenticate(&mut self) -> TrackerResult<()> {
    let credentials = self.credentials.clone().ok_or_else(|| {
      TrackerError::Config(format!(
        "no credentials for {}. Add an [authentication] table to tracker.toml or a .netrc entry",
        self.client.base_url()
      ))
    })?;
    self.client.set_auth(credentials);
    Ok(())
  }

  async fn is_authenticated(&self) -> TrackerResult<bool> {
    if !self.client.has_auth() {
      return Ok(false);
    }
    self.client.test_connection().await
  }

  fn token_generation_url(&self) -> TrackerResult<String> {
    Err(TrackerError::unsupported(
      "Jira API tokens are created from the Atlassian account settings, not through the issue tracker",
    ))
  }

  #[instrument(skip(self, body), level = "debug")]
  async fn open_issue(&self, subject: &str, body: &str, options: &IssueOptions) -> TrackerResult<String> {
    let project = options
      .project
      .clone()
      .or_else(|| self.project.clone())
      .ok_or_else(|| TrackerError::Config("no project given and none configured".to_string()))?;

    let payload = IssuePayload {
      fields: IssueFieldsPayload {
        project: Some(ProjectRef { key: project }),
        summary: Some(subject.to_string()),
        description: Some(body.to_string()),
        issue_type: Some(NamedRef {
          name: options
            .issue_type
            .clone()
            .unwrap_or_else(|| DEFAULT_ISSUE_TYPE.to_string()),
        }),
        labels: Some(options.labels.clone()),
        assignee: options.assignee.clone().map(|name| NamedRef { name }),
      },
    };

    match self.client.issues().create_issue(&payload).await? {
      VendorResponse::Data(raw) => {
        let key = created_issue_key(&raw)?;
        info!("Created Jira issue {}", key);
        Ok(key)
      }
      VendorResponse::Empty => Err(TrackerError::malformed("key")),
      VendorResponse::VendorError(messages) => Err(TrackerError::VendorDeclared(messages)),
    }
  }

  async fn get_issue(&self, id: &str) -> TrackerResult<NormalizedIssue> {
    match self.client.issues().get(id).await? {
      VendorResponse::Data(issue) => Ok(issue),
      VendorResponse::Empty => Err(TrackerError::NotFound(format!("Issue {id}"))),
      VendorResponse::VendorError(messages) => Err(TrackerError::VendorDeclared(messages)),
    }
  }

  fn issue_url(&self, id: &str) -> String {
    format!("{}/browse/{}", self.repo_domain_url, id)
  }

  async fn get_issues(
    &self,
    criteria: &FilterCriteria,
    page: PageRequest,
  ) -> TrackerResult<VendorResponse<Vec<NormalizedIssue>>> {
    let mut search = self.client.search();
    search.set_page(page);
    search.search(criteria).await
  }

  #[instrument(skip(self, update), level = "debug")]
  async fn update_issue(&self, id: &str, update: &IssueUpdate) -> TrackerResult<()> {
    if update.is_empty() {
      debug!("Nothing to update on {}", id);
      return Ok(());
    }

    let payload = IssuePayload {
      fields: IssueFieldsPayload {
        summary: update.title.clone(),
        description: update.body.clone(),
        labels: update.labels.clone(),
        assignee: update.assignee.clone().map(|name| NamedRef { name }),
        ..Default::default()
      },
    };

    match self.client.issues().update_issue(id, &payload).await? {
      VendorResponse::VendorError(messages) => Err(TrackerError::VendorDeclared(messages)),
      VendorResponse::Data(_) | VendorResponse::Empty => Ok(()),
    }
  }

  async fn close_issue(&self, _id: &str) -> TrackerResult<()> {
    Err(TrackerError::unsupported(
      "Jira closes issues through project-specific workflow transitions; move the issue from the Jira UI",
    ))
  }

  async fn create_comment(&self, id: &str, message: &str) -> TrackerResult<String> {
    match self.client.issues().add_comment(id, message).await? {
      VendorResponse::Data(comment) => Ok(comment.url),
      VendorResponse::Empty => Err(TrackerError::malformed("self")),
      VendorResponse::VendorError(messages) => Err(TrackerError::VendorDeclared(messages)),
    }
  }

  async fn get_comments(&self, id: &str) -> TrackerResult<Vec<NormalizedComment>> {
    match self.client.issues().get_comments(id).await? {
      VendorResponse::VendorError(messages) => Err(TrackerError::VendorDeclared(messages)),
      reply => Ok(reply.into_records()),
    }
  }

  async fn get_labels(&self) -> TrackerResult<Vec<String>> {
    Err(TrackerError::unsupported(
      "Jira has no label catalogue endpoint; labels exist only on the issues that carry them",
    ))
  }

  async fn get_milestones(&self) -> TrackerResult<Vec<String>> {
    Err(TrackerError::unsupported(
      "Jira versions are per project and are not exposed as milestones",
    ))
  }
}
