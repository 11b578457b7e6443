//! # JQL Query Builder
//!
//! Translates [`FilterCriteria`] into a JQL expression plus paging
//! parameters. Values are inserted verbatim; quoting and escaping are the
//! caller's business and invalid JQL is left for the vendor to reject.

use chrono::NaiveDate;
use trak_core::{FilterCriteria, FilterField, FilterValue, PageRequest};

use crate::consts::{PARAM_JQL, PARAM_MAX_RESULTS, PARAM_START_AT};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A search request ready to be sent to `/search`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
  pub jql: String,
  pub start_at: u32,
  pub max_results: u32,
}

impl SearchQuery {
  /// Request parameters. An empty JQL expression is left out.
  pub fn to_params(&self) -> Vec<(String, String)> {
    let mut params = Vec::with_capacity(3);
    if !self.jql.is_empty() {
      params.push((PARAM_JQL.to_string(), self.jql.clone()));
    }
    params.push((PARAM_START_AT.to_string(), self.start_at.to_string()));
    params.push((PARAM_MAX_RESULTS.to_string(), self.max_results.to_string()));
    params
  }
}

/// Build the search request for `criteria` at `page`.
pub fn build_query(criteria: &FilterCriteria, page: PageRequest) -> SearchQuery {
  SearchQuery {
    jql: build_jql(criteria),
    start_at: page.start,
    max_results: page.limit,
  }
}

/// JQL for `criteria`: one clause per field, joined with `AND` in canonical
/// field order. Empty criteria give an empty expression.
pub fn build_jql(criteria: &FilterCriteria) -> String {
  criteria
    .iter()
    .map(|(field, value)| clause(field, value))
    .collect::<Vec<_>>()
    .join(" AND ")
}

fn clause(field: FilterField, value: &FilterValue) -> String {
  let text = render(value);
  match field {
    FilterField::Number => format!("id = {text}"),
    FilterField::State => format!("status = {text}"),
    FilterField::Title => format!("summary ~ {text}"),
    FilterField::Body => format!("description ~ {text}"),
    FilterField::User => format!("reporter = {text}"),
    FilterField::Labels => format!("labels in ({text})"),
    // Jira keeps no closer; the assignee is the nearest match.
    FilterField::Assignee | FilterField::ClosedBy => format!("assignee = {text}"),
    FilterField::Milestone => format!("versions in ({text})"),
    FilterField::CreatedAt => date_clause("created", value),
    FilterField::UpdatedAt => date_clause("updated", value),
  }
}

fn render(value: &FilterValue) -> String {
  match value {
    FilterValue::Text(text) => text.clone(),
    FilterValue::List(items) => items.join(","),
    FilterValue::Date(date) => date.format(DATE_FORMAT).to_string(),
  }
}

/// A whole-day range for dates; anything unparsable becomes an equality.
fn date_clause(jql_field: &str, value: &FilterValue) -> String {
  let date = match value {
    FilterValue::Date(date) => Some(*date),
    FilterValue::Text(text) => NaiveDate::parse_from_str(text.trim(), DATE_FORMAT).ok(),
    FilterValue::List(_) => None,
  };

  match date {
    Some(day) => {
      let next = day.succ_opt().unwrap_or(day);
      format!(
        "{jql_field} >= {} AND {jql_field} <= {}",
        day.format(DATE_FORMAT),
        next.format(DATE_FORMAT)
      )
    }
    None => format!("{jql_field} = {}", render(value)),
  }
}
