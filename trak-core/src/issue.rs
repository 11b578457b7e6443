//! Normalized tracker records.
//!
//! These are the shapes the rest of an application consumes regardless of the
//! vendor behind the tracker. They are built fresh from each vendor reply and
//! never written back.

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

/// An issue as seen through the tracker interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedIssue {
  /// API URL of the record (`self` on the wire)
  pub url: String,
  /// Vendor id, numeric ids rendered as decimal text
  pub number: String,
  /// Human-readable key (e.g. `PROJ-123`) when the vendor sends one
  pub key: Option<String>,
  /// Workflow status name, `None` when the vendor sent none
  pub state: Option<String>,
  pub title: String,
  pub body: String,
  /// Reporter of the issue
  pub user: String,
  pub labels: Vec<String>,
  pub assignee: Option<String>,
  /// First affected version
  pub milestone: Option<String>,
  pub created_at: Option<DateTime<FixedOffset>>,
  pub updated_at: Option<DateTime<FixedOffset>>,
  /// Always the current assignee. Jira records no closer, so this is an
  /// approximation callers should not treat as an audit trail.
  pub closed_by: Option<String>,
  /// Always `false` for vendors without pull requests
  pub pull_request: bool,
}

/// A comment on an issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedComment {
  pub id: String,
  pub url: String,
  pub body: String,
  pub user: String,
  pub created_at: Option<DateTime<FixedOffset>>,
  pub updated_at: Option<DateTime<FixedOffset>>,
}

/// A project (the container issues are filed against).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedProject {
  pub id: String,
  pub key: String,
  pub name: String,
  pub url: Option<String>,
}
