//! # Response Adapter
//!
//! Converts raw Jira records into the normalized records of `trak-core`.
//!
//! Jira nests most issue attributes under `fields`, while some proxies and
//! older servers flatten them. Every lookup therefore tries the top level
//! first and then `fields`. A required attribute missing from both is a
//! [`TrackerError::MalformedResponse`] naming it.

use chrono::{DateTime, FixedOffset};
use serde_json::Value;
use trak_core::{NormalizedComment, NormalizedIssue, NormalizedProject, TrackerError, TrackerResult};

fn lookup<'a>(raw: &'a Value, key: &str) -> Option<&'a Value> {
  raw
    .get(key)
    .or_else(|| raw.get("fields").and_then(|fields| fields.get(key)))
}

fn required<'a>(raw: &'a Value, key: &str) -> TrackerResult<&'a Value> {
  lookup(raw, key).ok_or_else(|| TrackerError::malformed(key))
}

/// Strings as-is, numbers as decimal text.
fn scalar_text(value: &Value) -> Option<String> {
  match value {
    Value::String(text) => Some(text.clone()),
    Value::Number(number) => Some(number.to_string()),
    _ => None,
  }
}

fn required_text(raw: &Value, key: &str) -> TrackerResult<String> {
  scalar_text(required(raw, key)?).ok_or_else(|| TrackerError::malformed(key))
}

/// A user reference: `name`, then `displayName`, or a bare string.
fn user_name(value: &Value) -> Option<String> {
  match value {
    Value::String(name) => Some(name.clone()),
    Value::Object(_) => ["name", "displayName"]
      .into_iter()
      .find_map(|key| value.get(key).and_then(Value::as_str))
      .map(str::to_string),
    _ => None,
  }
}

fn required_user(raw: &Value, key: &str) -> TrackerResult<String> {
  user_name(required(raw, key)?).ok_or_else(|| TrackerError::malformed(key))
}

/// Name of an object reference (`{"name": ..}`) or a bare string.
fn named(value: &Value) -> Option<String> {
  scalar_text(value).or_else(|| value.get("name").and_then(scalar_text))
}

/// Parse an RFC 3339 timestamp or Jira's `2020-01-02T10:30:00.000+0000`.
pub fn parse_timestamp(text: &str) -> Option<DateTime<FixedOffset>> {
  DateTime::parse_from_rfc3339(text)
    .or_else(|_| DateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f%z"))
    .ok()
}

/// Absent, null and empty timestamps are `None`; anything else must parse.
fn timestamp(raw: &Value, key: &str) -> TrackerResult<Option<DateTime<FixedOffset>>> {
  match lookup(raw, key) {
    None | Some(Value::Null) => Ok(None),
    Some(Value::String(text)) if text.is_empty() => Ok(None),
    Some(Value::String(text)) => parse_timestamp(text)
      .map(Some)
      .ok_or_else(|| TrackerError::malformed(key)),
    Some(_) => Err(TrackerError::malformed(key)),
  }
}

/// Normalize one issue record.
pub fn adapt_issue(raw: &Value) -> TrackerResult<NormalizedIssue> {
  let url = required_text(raw, "self")?;
  let number = required_text(raw, "id")?;
  let title = required_text(raw, "summary")?;
  let body = match required(raw, "description")? {
    Value::Null => String::new(),
    value => scalar_text(value).ok_or_else(|| TrackerError::malformed("description"))?,
  };
  let user = required_user(raw, "reporter")?;

  let assignee = lookup(raw, "assignee").and_then(user_name);
  let labels = lookup(raw, "labels")
    .and_then(Value::as_array)
    .map(|labels| labels.iter().filter_map(scalar_text).collect())
    .unwrap_or_default();
  let milestone = lookup(raw, "versions")
    .and_then(Value::as_array)
    .and_then(|versions| versions.first())
    .and_then(named);

  Ok(NormalizedIssue {
    url,
    number,
    key: lookup(raw, "key").and_then(scalar_text),
    state: lookup(raw, "status").and_then(named),
    title,
    body,
    user,
    labels,
    closed_by: assignee.clone(),
    assignee,
    milestone,
    created_at: timestamp(raw, "created")?,
    updated_at: timestamp(raw, "updated")?,
    pull_request: false,
  })
}

/// Normalize one comment record.
pub fn adapt_comment(raw: &Value) -> TrackerResult<NormalizedComment> {
  Ok(NormalizedComment {
    id: required_text(raw, "id")?,
    url: required_text(raw, "self")?,
    body: required_text(raw, "body")?,
    user: required_user(raw, "author")?,
    created_at: timestamp(raw, "created")?,
    updated_at: timestamp(raw, "updated")?,
  })
}

/// Normalize one project record.
pub fn adapt_project(raw: &Value) -> TrackerResult<NormalizedProject> {
  Ok(NormalizedProject {
    id: required_text(raw, "id")?,
    key: required_text(raw, "key")?,
    name: required_text(raw, "name")?,
    url: lookup(raw, "self").and_then(scalar_text),
  })
}

/// Normalize every record, failing on the first malformed one.
pub fn adapt_all<T>(records: &[Value], adapt: fn(&Value) -> TrackerResult<T>) -> TrackerResult<Vec<T>> {
  records.iter().map(adapt).collect()
}

/// The key of a freshly created issue, falling back to its id.
pub fn created_issue_key(raw: &Value) -> TrackerResult<String> {
  raw
    .get("key")
    .and_then(scalar_text)
    .or_else(|| raw.get("id").and_then(scalar_text))
    .ok_or_else(|| TrackerError::malformed("key"))
}

#[cfg(test)]
mod tests {
  use serde_json::json;
  use trak_test_utils::fixtures::{flat_issue, jira_comment, jira_issue, jira_project};

  use super::*;

  #[test]
  fn test_adapt_flat_issue() {
    let issue = adapt_issue(&flat_issue(10001, "Crash")).unwrap();

    assert_eq!(issue.url, "https://example.atlassian.net/rest/api/2/issue/10001");
    assert_eq!(issue.number, "10001");
    assert_eq!(issue.key, None);
    assert_eq!(issue.state.as_deref(), Some("Open"));
    assert_eq!(issue.title, "Crash");
    assert_eq!(issue.body, "Steps to reproduce");
    assert_eq!(issue.user, "bob");
    assert_eq!(issue.labels, vec!["backend"]);
    assert_eq!(issue.assignee.as_deref(), Some("al"));
    assert_eq!(issue.closed_by.as_deref(), Some("al"));
    assert_eq!(issue.milestone.as_deref(), Some("1.0"));
    assert_eq!(
      issue.created_at.unwrap().to_rfc3339(),
      "2020-01-01T00:00:00+00:00"
    );
    assert_eq!(
      issue.updated_at.unwrap().to_rfc3339(),
      "2020-01-02T10:30:00+00:00"
    );
    assert!(!issue.pull_request);
  }

  #[test]
  fn test_adapt_issue_full_record() {
    let raw = json!({
        "self": "u",
        "id": 7,
        "summary": "s",
        "description": "d",
        "reporter": { "name": "bob" },
        "assignee": { "name": "al" },
        "labels": [],
        "versions": [],
        "created": "2020-01-01T00:00:00Z",
        "updated": ""
    });

    let expected = NormalizedIssue {
      url: "u".to_string(),
      number: "7".to_string(),
      key: None,
      state: None,
      title: "s".to_string(),
      body: "d".to_string(),
      user: "bob".to_string(),
      labels: vec![],
      assignee: Some("al".to_string()),
      milestone: None,
      created_at: DateTime::parse_from_rfc3339("2020-01-01T00:00:00Z").ok(),
      updated_at: None,
      closed_by: Some("al".to_string()),
      pull_request: false,
    };
    assert_eq!(adapt_issue(&raw).unwrap(), expected);
  }

  #[test]
  fn test_adapt_nested_issue() {
    let issue = adapt_issue(&jira_issue("PROJ-1", "Nested")).unwrap();

    assert_eq!(issue.number, "10000");
    assert_eq!(issue.key.as_deref(), Some("PROJ-1"));
    assert_eq!(issue.title, "Nested");
    assert_eq!(issue.user, "reporter");
    assert_eq!(issue.state.as_deref(), Some("In Progress"));
    assert_eq!(issue.labels, vec!["api", "urgent"]);
    assert_eq!(issue.milestone.as_deref(), Some("2.0"));
    assert!(issue.created_at.is_some());
    assert_eq!(issue.updated_at, None);
  }

  #[test]
  fn test_minimal_issue() {
    let raw = json!({
        "self": "u",
        "id": "1",
        "summary": "s",
        "description": null,
        "reporter": { "displayName": "Display Only" }
    });

    let issue = adapt_issue(&raw).unwrap();
    assert_eq!(issue.body, "");
    assert_eq!(issue.user, "Display Only");
    assert_eq!(issue.state, None);
    assert_eq!(issue.assignee, None);
    assert_eq!(issue.closed_by, None);
    assert!(issue.labels.is_empty());
    assert_eq!(issue.milestone, None);
    assert_eq!(issue.created_at, None);
  }

  #[test]
  fn test_missing_required_field_is_named() {
    for field in ["self", "id", "summary", "description", "reporter"] {
      let mut raw = flat_issue(1, "x");
      raw.as_object_mut().unwrap().remove(field);

      match adapt_issue(&raw).unwrap_err() {
        TrackerError::MalformedResponse { field: missing } => assert_eq!(missing, field),
        other => panic!("unexpected error: {other:?}"),
      }
    }
  }

  #[test]
  fn test_unparsable_timestamp_is_malformed() {
    let mut raw = flat_issue(1, "x");
    raw["created"] = json!("yesterday");

    assert!(matches!(
      adapt_issue(&raw),
      Err(TrackerError::MalformedResponse { field }) if field == "created"
    ));
  }

  #[test]
  fn test_adaptation_is_deterministic() {
    let raw = jira_issue("PROJ-2", "Same");
    assert_eq!(adapt_issue(&raw).unwrap(), adapt_issue(&raw).unwrap());
  }

  #[test]
  fn test_adapt_comment() {
    let comment = adapt_comment(&jira_comment("42", "Looks good")).unwrap();
    assert_eq!(comment.id, "42");
    assert_eq!(comment.body, "Looks good");
    assert_eq!(comment.user, "commenter");
    assert!(comment.url.ends_with("/comment/42"));

    let mut raw = jira_comment("42", "x");
    raw.as_object_mut().unwrap().remove("author");
    assert!(adapt_comment(&raw).is_err());
  }

  #[test]
  fn test_adapt_project() {
    let project = adapt_project(&jira_project("10000", "PROJ", "Project")).unwrap();
    assert_eq!(project.key, "PROJ");
    assert_eq!(project.name, "Project");
    assert!(project.url.is_some());
  }

  #[test]
  fn test_adapt_all_fails_fast() {
    let records = vec![flat_issue(1, "a"), json!({ "id": 2 })];
    assert!(adapt_all(&records, adapt_issue).is_err());
    assert_eq!(adapt_all(&records[..1], adapt_issue).unwrap().len(), 1);
  }

  #[test]
  fn test_created_issue_key() {
    assert_eq!(
      created_issue_key(&json!({ "id": "10002", "key": "PROJ-7" })).unwrap(),
      "PROJ-7"
    );
    assert_eq!(created_issue_key(&json!({ "id": 10002 })).unwrap(), "10002");
    assert!(created_issue_key(&json!({})).is_err());
  }
}
