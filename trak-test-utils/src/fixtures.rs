//! Canned Jira REST payloads.
//!
//! Shapes mirror what `/rest/api/2` returns so tests across crates agree on
//! the wire format.

use serde_json::{Value, json};

/// A flat issue record with every field the adapter reads.
pub fn flat_issue(id: u64, summary: &str) -> Value {
  json!({
    "self": format!("https://example.atlassian.net/rest/api/2/issue/{id}"),
    "id": id,
    "summary": summary,
    "description": "Steps to reproduce",
    "reporter": { "name": "bob" },
    "assignee": { "name": "al" },
    "status": { "name": "Open" },
    "labels": ["backend"],
    "versions": ["1.0"],
    "created": "2020-01-01T00:00:00Z",
    "updated": "2020-01-02T10:30:00.000+0000"
  })
}

/// An issue as Jira nests it: `id`/`key`/`self` on top, everything else in
/// `fields`.
pub fn jira_issue(key: &str, summary: &str) -> Value {
  json!({
    "id": "10000",
    "key": key,
    "self": "https://example.atlassian.net/rest/api/2/issue/10000",
    "fields": {
      "summary": summary,
      "description": "This is a test issue",
      "reporter": { "name": "reporter", "displayName": "Reporter" },
      "assignee": { "name": "assignee", "displayName": "Assignee" },
      "status": { "id": "3", "name": "In Progress" },
      "labels": ["api", "urgent"],
      "versions": [{ "id": "1", "name": "2.0" }],
      "created": "2023-06-01T09:15:00.000+0000",
      "updated": ""
    }
  })
}

/// A comment record.
pub fn jira_comment(id: &str, body: &str) -> Value {
  json!({
    "self": format!("https://example.atlassian.net/rest/api/2/issue/10000/comment/{id}"),
    "id": id,
    "body": body,
    "author": { "name": "commenter" },
    "created": "2023-06-02T12:00:00.000+0000",
    "updated": "2023-06-02T12:00:00.000+0000"
  })
}

/// A project record.
pub fn jira_project(id: &str, key: &str, name: &str) -> Value {
  json!({
    "self": format!("https://example.atlassian.net/rest/api/2/project/{id}"),
    "id": id,
    "key": key,
    "name": name
  })
}

/// Envelope returned by `/search`.
pub fn search_response(issues: Vec<Value>) -> Value {
  let total = issues.len();
  json!({
    "startAt": 0,
    "maxResults": 50,
    "total": total,
    "issues": issues
  })
}

/// A successful reply whose body carries a vendor-declared error.
pub fn error_payload() -> Value {
  json!({
    "errorMessages": ["This is an error message."],
    "errors": []
  })
}
