//! # Jira Services
//!
//! Thin request builders over [`JiraClient`](crate::JiraClient), one per
//! resource family. Each service carries a page cursor that is appended to
//! every request it makes, and classifies every reply as data, empty, or a
//! vendor-declared error before handing it back.

mod issues;
mod projects;
mod search;

pub use issues::IssueService;
pub use projects::ProjectService;
pub use search::SearchService;
use serde_json::Value;
use trak_core::{PageRequest, TrackerError, TrackerResult, VendorResponse};

use crate::consts::{PARAM_MAX_RESULTS, PARAM_START_AT};

/// A service whose requests carry `startAt`/`maxResults`.
pub trait PagedService {
  fn page(&self) -> PageRequest;

  fn page_mut(&mut self) -> &mut PageRequest;

  fn start(&self) -> u32 {
    self.page().start
  }

  fn limit(&self) -> u32 {
    self.page().limit
  }

  fn set_start(&mut self, start: u32) -> &mut Self
  where
    Self: Sized,
  {
    self.page_mut().start = start;
    self
  }

  fn set_limit(&mut self, limit: u32) -> &mut Self
  where
    Self: Sized,
  {
    self.page_mut().limit = limit;
    self
  }

  fn set_page(&mut self, page: PageRequest) -> &mut Self
  where
    Self: Sized,
  {
    *self.page_mut() = page;
    self
  }

  /// Advance to the following page.
  fn next_page(&mut self) -> &mut Self
  where
    Self: Sized,
  {
    let next = self.page().next();
    self.set_page(next)
  }

  /// `extra` plus the paging parameters it does not already set.
  fn page_params(&self, extra: &[(String, String)]) -> Vec<(String, String)> {
    paged_params(self.page(), extra)
  }
}

/// Merge paging into `extra`. Caller-supplied values win.
pub(crate) fn paged_params(page: PageRequest, extra: &[(String, String)]) -> Vec<(String, String)> {
  let has = |key: &str| extra.iter().any(|(k, _)| k == key);

  let mut params = Vec::with_capacity(extra.len() + 2);
  if !has(PARAM_START_AT) {
    params.push((PARAM_START_AT.to_string(), page.start.to_string()));
  }
  if !has(PARAM_MAX_RESULTS) {
    params.push((PARAM_MAX_RESULTS.to_string(), page.limit.to_string()));
  }
  params.extend_from_slice(extra);
  params
}

/// Sort a reply into data, empty, or a vendor-declared error.
///
/// No body, `null`, `[]` and `{}` are empty. An object carrying
/// `errorMessages` is a vendor error, with any per-field `errors` appended as
/// `field: message`.
pub fn classify(body: Option<Value>) -> VendorResponse<Value> {
  let Some(value) = body else {
    return VendorResponse::Empty;
  };

  match &value {
    Value::Null => VendorResponse::Empty,
    Value::Array(items) if items.is_empty() => VendorResponse::Empty,
    Value::Object(map) if map.is_empty() => VendorResponse::Empty,
    Value::Object(map) if map.get("errorMessages").is_some_and(Value::is_array) => {
      let mut messages: Vec<String> = map
        .get("errorMessages")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(|m| m.as_str().map(str::to_string))
        .collect();
      if let Some(errors) = map.get("errors").and_then(Value::as_object) {
        messages.extend(
          errors
            .iter()
            .map(|(field, message)| format!("{field}: {}", message.as_str().unwrap_or_default())),
        );
      }
      VendorResponse::VendorError(messages)
    }
    _ => VendorResponse::Data(value),
  }
}

/// The records of a list reply: a bare array, or the array under `envelope`.
/// An envelope holding no records is empty.
pub(crate) fn list_records(reply: VendorResponse<Value>, envelope: &str) -> TrackerResult<VendorResponse<Vec<Value>>> {
  reply
    .try_map(|value| match value {
      Value::Array(items) => Ok(items),
      Value::Object(mut map) => match map.remove(envelope) {
        Some(Value::Array(items)) => Ok(items),
        _ => Err(TrackerError::malformed(envelope)),
      },
      _ => Err(TrackerError::malformed(envelope)),
    })
    .map(|records| match records {
      VendorResponse::Data(items) if items.is_empty() => VendorResponse::Empty,
      other => other,
    })
}
