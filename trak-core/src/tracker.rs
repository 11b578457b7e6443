//! # Issue Tracker Interface
//!
//! The uniform surface an application codes against so the vendor behind it
//! can be swapped. Adapters that lack a capability return
//! [`TrackerError::Unsupported`](crate::TrackerError::Unsupported) instead of
//! emulating it.

#![allow(async_fn_in_trait)]

use crate::consts::ISSUE_LIST_PAGE_LIMIT;
use crate::error::TrackerResult;
use crate::filter::FilterCriteria;
use crate::issue::{NormalizedComment, NormalizedIssue};
use crate::page::{PageRequest, VendorResponse};

/// Optional attributes for a new issue.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueOptions {
  /// Project to file under; adapters fall back to their configured project
  pub project: Option<String>,
  /// Issue type name (e.g. "Bug"); adapters pick a default when unset
  pub issue_type: Option<String>,
  pub labels: Vec<String>,
  pub assignee: Option<String>,
}

/// Fields to change on an existing issue. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueUpdate {
  pub title: Option<String>,
  pub body: Option<String>,
  pub labels: Option<Vec<String>>,
  pub assignee: Option<String>,
}

impl IssueUpdate {
  pub const fn is_empty(&self) -> bool {
    self.title.is_none() && self.body.is_none() && self.labels.is_none() && self.assignee.is_none()
  }
}

/// Operations every tracker adapter provides.
pub trait IssueTracker {
  /// Whether a git remote URL belongs to this tracker.
  fn supports_repository(&self, remote_url: &str) -> bool;

  /// Attach the configured credentials to the client.
  async fn authenticate(&mut self) -> TrackerResult<()>;

  /// Ask the vendor whether the current credentials are accepted.
  async fn is_authenticated(&self) -> TrackerResult<bool>;

  /// Where a user can mint an API token.
  fn token_generation_url(&self) -> TrackerResult<String>;

  /// File a new issue and return the vendor-assigned key.
  async fn open_issue(&self, subject: &str, body: &str, options: &IssueOptions) -> TrackerResult<String>;

  async fn get_issue(&self, id: &str) -> TrackerResult<NormalizedIssue>;

  /// Browser URL of an issue.
  fn issue_url(&self, id: &str) -> String;

  async fn get_issues(
    &self,
    criteria: &FilterCriteria,
    page: PageRequest,
  ) -> TrackerResult<VendorResponse<Vec<NormalizedIssue>>>;

  async fn update_issue(&self, id: &str, update: &IssueUpdate) -> TrackerResult<()>;

  async fn close_issue(&self, id: &str) -> TrackerResult<()>;

  /// Add a comment and return its URL.
  async fn create_comment(&self, id: &str, message: &str) -> TrackerResult<String>;

  async fn get_comments(&self, id: &str) -> TrackerResult<Vec<NormalizedComment>>;

  async fn get_labels(&self) -> TrackerResult<Vec<String>>;

  async fn get_milestones(&self) -> TrackerResult<Vec<String>>;

  /// Page used by [`IssueTracker::get_issues`] callers that have no opinion.
  fn default_issue_page(&self) -> PageRequest {
    PageRequest::with_limit(ISSUE_LIST_PAGE_LIMIT)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_issue_update_is_empty() {
    assert!(IssueUpdate::default().is_empty());

    let update = IssueUpdate {
      labels: Some(vec![]),
      ..Default::default()
    };
    assert!(!update.is_empty());
  }
}
