//! Filter and paging flags shared by `issue list` and `search`.

use chrono::NaiveDate;
use clap::Args;
use trak_core::{FilterCriteria, FilterField, FilterValue, PageRequest};

/// Field filters. Each one set becomes one JQL clause.
#[derive(Args, Debug, Default, Clone)]
pub struct FilterArgs {
  /// Issue id
  #[arg(long)]
  pub number: Option<String>,

  /// Workflow status name (e.g. "Open", "In Progress")
  #[arg(long, short = 's')]
  pub state: Option<String>,

  /// Text the summary must contain
  #[arg(long)]
  pub title: Option<String>,

  /// Text the description must contain
  #[arg(long)]
  pub body: Option<String>,

  /// Reporter username
  #[arg(long, alias = "user")]
  pub reporter: Option<String>,

  /// Label (repeatable; matches any)
  #[arg(long = "label", short = 'l')]
  pub labels: Vec<String>,

  /// Assignee username
  #[arg(long, short = 'a')]
  pub assignee: Option<String>,

  /// Affected version
  #[arg(long)]
  pub milestone: Option<String>,

  /// Creation day (YYYY-MM-DD) or a JQL value such as -1w
  #[arg(long, value_name = "DATE")]
  pub created: Option<String>,

  /// Last update day (YYYY-MM-DD) or a JQL value such as -1w
  #[arg(long, value_name = "DATE")]
  pub updated: Option<String>,
}

impl FilterArgs {
  pub fn to_criteria(&self) -> FilterCriteria {
    let mut criteria = FilterCriteria::new();
    let text_fields = [
      (FilterField::Number, &self.number),
      (FilterField::State, &self.state),
      (FilterField::Title, &self.title),
      (FilterField::Body, &self.body),
      (FilterField::User, &self.reporter),
      (FilterField::Assignee, &self.assignee),
      (FilterField::Milestone, &self.milestone),
    ];
    for (field, value) in text_fields {
      if let Some(value) = value {
        criteria.insert(field, value.as_str());
      }
    }
    if !self.labels.is_empty() {
      criteria.insert(FilterField::Labels, self.labels.clone());
    }
    if let Some(created) = &self.created {
      criteria.insert(FilterField::CreatedAt, date_value(created));
    }
    if let Some(updated) = &self.updated {
      criteria.insert(FilterField::UpdatedAt, date_value(updated));
    }
    criteria
  }
}

fn date_value(text: &str) -> FilterValue {
  match NaiveDate::parse_from_str(text, "%Y-%m-%d") {
    Ok(date) => FilterValue::Date(date),
    Err(_) => FilterValue::Text(text.to_string()),
  }
}

/// Paging flags.
#[derive(Args, Debug, Default, Clone)]
pub struct PageArgs {
  /// Index of the first result
  #[arg(long, default_value_t = 0)]
  pub start: u32,

  /// Maximum number of results
  #[arg(long)]
  pub limit: Option<u32>,
}

impl PageArgs {
  pub fn to_page(&self, default_limit: u32) -> PageRequest {
    PageRequest::new(self.start, self.limit.unwrap_or(default_limit).max(1))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_to_criteria() {
    let args = FilterArgs {
      state: Some("Open".to_string()),
      labels: vec!["api".to_string(), "urgent".to_string()],
      created: Some("2024-03-01".to_string()),
      updated: Some("-1w".to_string()),
      ..Default::default()
    };

    let criteria = args.to_criteria();
    assert_eq!(criteria.len(), 4);
    assert_eq!(criteria.get(FilterField::State), Some(&FilterValue::from("Open")));
    assert!(matches!(criteria.get(FilterField::CreatedAt), Some(FilterValue::Date(_))));
    assert_eq!(criteria.get(FilterField::UpdatedAt), Some(&FilterValue::from("-1w")));
  }

  #[test]
  fn test_to_page() {
    let args = PageArgs { start: 30, limit: None };
    assert_eq!(args.to_page(30), PageRequest::new(30, 30));

    let args = PageArgs {
      start: 0,
      limit: Some(0),
    };
    assert_eq!(args.to_page(30).limit, 1);
  }
}
