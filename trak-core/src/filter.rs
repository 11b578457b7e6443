//! # Filter Criteria
//!
//! The vendor-neutral search filter handed to an adapter's query builder.
//! Field names are a closed set; anything outside it is dropped on insertion so
//! callers can forward loosely-typed input (CLI flags, config tables) without
//! validating it first.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;

/// Fields an issue search can filter on.
///
/// The declaration order is the canonical order in which adapters emit
/// clauses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FilterField {
  Number,
  State,
  Title,
  Body,
  User,
  Labels,
  Assignee,
  ClosedBy,
  Milestone,
  CreatedAt,
  UpdatedAt,
}

impl FilterField {
  /// Every field, in canonical order.
  pub const ALL: [FilterField; 11] = [
    Self::Number,
    Self::State,
    Self::Title,
    Self::Body,
    Self::User,
    Self::Labels,
    Self::Assignee,
    Self::ClosedBy,
    Self::Milestone,
    Self::CreatedAt,
    Self::UpdatedAt,
  ];

  /// Look a field up by its wire name. Unknown names yield `None`.
  pub fn from_name(name: &str) -> Option<Self> {
    Self::ALL.into_iter().find(|field| field.name() == name)
  }

  /// The field's wire name.
  pub const fn name(self) -> &'static str {
    match self {
      Self::Number => "number",
      Self::State => "state",
      Self::Title => "title",
      Self::Body => "body",
      Self::User => "user",
      Self::Labels => "labels",
      Self::Assignee => "assignee",
      Self::ClosedBy => "closed_by",
      Self::Milestone => "milestone",
      Self::CreatedAt => "created_at",
      Self::UpdatedAt => "updated_at",
    }
  }

  /// Whether the field holds a calendar date.
  pub const fn is_date(self) -> bool {
    matches!(self, Self::CreatedAt | Self::UpdatedAt)
  }
}

impl fmt::Display for FilterField {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

/// A filter value. Values are not validated; the vendor rejects bad ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
  Text(String),
  List(Vec<String>),
  Date(NaiveDate),
}

impl From<&str> for FilterValue {
  fn from(value: &str) -> Self {
    Self::Text(value.to_string())
  }
}

impl From<String> for FilterValue {
  fn from(value: String) -> Self {
    Self::Text(value)
  }
}

impl From<Vec<String>> for FilterValue {
  fn from(values: Vec<String>) -> Self {
    Self::List(values)
  }
}

impl From<&[&str]> for FilterValue {
  fn from(values: &[&str]) -> Self {
    Self::List(values.iter().map(|v| (*v).to_string()).collect())
  }
}

impl From<NaiveDate> for FilterValue {
  fn from(date: NaiveDate) -> Self {
    Self::Date(date)
  }
}

/// A set of filters, at most one value per field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
  entries: BTreeMap<FilterField, FilterValue>,
}

impl FilterCriteria {
  pub fn new() -> Self {
    Self::default()
  }

  /// Set `field`, replacing any previous value.
  pub fn insert(&mut self, field: FilterField, value: impl Into<FilterValue>) {
    self.entries.insert(field, value.into());
  }

  /// Set a field by wire name. Unrecognized names are ignored and `false` is
  /// returned.
  pub fn insert_named(&mut self, name: &str, value: impl Into<FilterValue>) -> bool {
    match FilterField::from_name(name) {
      Some(field) => {
        self.insert(field, value);
        true
      }
      None => false,
    }
  }

  /// Builder form of [`FilterCriteria::insert`].
  pub fn with(mut self, field: FilterField, value: impl Into<FilterValue>) -> Self {
    self.insert(field, value);
    self
  }

  pub fn get(&self, field: FilterField) -> Option<&FilterValue> {
    self.entries.get(&field)
  }

  /// Iterate entries in canonical field order.
  pub fn iter(&self) -> impl Iterator<Item = (FilterField, &FilterValue)> {
    self.entries.iter().map(|(field, value)| (*field, value))
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}

impl<K, V> FromIterator<(K, V)> for FilterCriteria
where
  K: AsRef<str>,
  V: Into<FilterValue>,
{
  /// Collect `(name, value)` pairs, silently dropping unknown names.
  fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
    let mut criteria = Self::new();
    for (name, value) in iter {
      criteria.insert_named(name.as_ref(), value);
    }
    criteria
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_field_names_round_trip() {
    for field in FilterField::ALL {
      assert_eq!(FilterField::from_name(field.name()), Some(field));
    }
    assert_eq!(FilterField::from_name("priority"), None);
  }

  #[test]
  fn test_insert_named_ignores_unknown_fields() {
    let mut criteria = FilterCriteria::new();
    assert!(criteria.insert_named("state", "Open"));
    assert!(!criteria.insert_named("sort", "created"));

    assert_eq!(criteria.len(), 1);
    assert_eq!(criteria.get(FilterField::State), Some(&FilterValue::from("Open")));
  }

  #[test]
  fn test_reinserting_replaces_value() {
    let criteria = FilterCriteria::new()
      .with(FilterField::State, "Open")
      .with(FilterField::State, "Closed");

    assert_eq!(criteria.len(), 1);
    assert_eq!(criteria.get(FilterField::State), Some(&FilterValue::from("Closed")));
  }

  #[test]
  fn test_iteration_uses_canonical_order() {
    let criteria: FilterCriteria = vec![
      ("updated_at", FilterValue::from("2021-01-01")),
      ("title", FilterValue::from("crash")),
      ("number", FilterValue::from("7")),
      ("bogus", FilterValue::from("x")),
    ]
    .into_iter()
    .collect();

    let fields: Vec<FilterField> = criteria.iter().map(|(field, _)| field).collect();
    assert_eq!(
      fields,
      vec![FilterField::Number, FilterField::Title, FilterField::UpdatedAt]
    );
  }
}
