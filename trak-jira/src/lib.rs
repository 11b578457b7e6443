//! # Jira Adapter
//!
//! Maps the trak issue tracker interface onto the Jira REST API (v2), for
//! both Jira Cloud and self-hosted "enterprise" installations.
//!
//! The layers, leaf first:
//! - [`JiraClient`]: authenticated transport returning parsed JSON bodies
//! - [`query`]: filter criteria to JQL translation
//! - [`adapter`]: vendor JSON to normalized records
//! - [`services`]: paged issue, project and search services
//! - [`JiraIssueTracker`]: the [`trak_core::IssueTracker`] facade

pub mod adapter;
pub mod auth;
mod client;
pub mod consts;
pub mod models;
pub mod query;
pub mod services;
mod tracker;

// Re-export the client
pub use client::{JiraClient, create_jira_client};
// Re-export models
pub use models::{CommentPayload, IssueFieldsPayload, IssuePayload, JiraAuth, NamedRef, ProjectRef};
pub use query::{SearchQuery, build_jql, build_query};
pub use services::{IssueService, PagedService, ProjectService, SearchService};
pub use tracker::{JiraIssueTracker, JiraVariant, create_issue_tracker};
