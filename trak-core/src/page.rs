//! Paging state and the tri-state result paged services return.

use crate::consts::DEFAULT_PAGE_LIMIT;

/// Offset/size pair appended to every paged request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
  /// Zero-based index of the first record
  pub start: u32,
  /// Maximum number of records per page
  pub limit: u32,
}

impl PageRequest {
  pub const fn new(start: u32, limit: u32) -> Self {
    Self { start, limit }
  }

  /// First page with the given size.
  pub const fn with_limit(limit: u32) -> Self {
    Self { start: 0, limit }
  }

  /// The page following this one.
  pub const fn next(self) -> Self {
    Self {
      start: self.start.saturating_add(self.limit),
      limit: self.limit,
    }
  }
}

impl Default for PageRequest {
  fn default() -> Self {
    Self::with_limit(DEFAULT_PAGE_LIMIT)
  }
}

/// Outcome of a successful vendor call.
///
/// A reply can carry data, carry nothing, or carry an `errorMessages` payload
/// the vendor sent with a success status. Callers are expected to branch on
/// all three.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VendorResponse<T> {
  Data(T),
  Empty,
  VendorError(Vec<String>),
}

impl<T> VendorResponse<T> {
  pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> VendorResponse<U> {
    match self {
      Self::Data(data) => VendorResponse::Data(f(data)),
      Self::Empty => VendorResponse::Empty,
      Self::VendorError(messages) => VendorResponse::VendorError(messages),
    }
  }

  /// Like [`VendorResponse::map`] for fallible conversions.
  pub fn try_map<U, E, F: FnOnce(T) -> Result<U, E>>(self, f: F) -> Result<VendorResponse<U>, E> {
    Ok(match self {
      Self::Data(data) => VendorResponse::Data(f(data)?),
      Self::Empty => VendorResponse::Empty,
      Self::VendorError(messages) => VendorResponse::VendorError(messages),
    })
  }

  pub const fn is_vendor_error(&self) -> bool {
    matches!(self, Self::VendorError(_))
  }

  pub const fn is_empty(&self) -> bool {
    matches!(self, Self::Empty)
  }

  /// The payload, if any.
  pub fn data(self) -> Option<T> {
    match self {
      Self::Data(data) => Some(data),
      Self::Empty | Self::VendorError(_) => None,
    }
  }
}

impl<T> VendorResponse<Vec<T>> {
  /// Records in the reply; an empty list for `Empty` and `VendorError`.
  pub fn into_records(self) -> Vec<T> {
    self.data().unwrap_or_default()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_default_page() {
    let page = PageRequest::default();
    assert_eq!(page.start, 0);
    assert_eq!(page.limit, DEFAULT_PAGE_LIMIT);
    assert_eq!(page.next(), PageRequest::new(DEFAULT_PAGE_LIMIT, DEFAULT_PAGE_LIMIT));
  }

  #[test]
  fn test_into_records_never_fails() {
    let data: VendorResponse<Vec<u8>> = VendorResponse::Data(vec![1, 2]);
    assert_eq!(data.into_records(), vec![1, 2]);

    let empty: VendorResponse<Vec<u8>> = VendorResponse::Empty;
    assert!(empty.into_records().is_empty());

    let error: VendorResponse<Vec<u8>> = VendorResponse::VendorError(vec!["nope".to_string()]);
    assert!(error.is_vendor_error());
    assert!(error.into_records().is_empty());
  }

  #[test]
  fn test_try_map_keeps_tags() {
    let error: VendorResponse<u8> = VendorResponse::VendorError(vec!["x".to_string()]);
    let mapped: Result<VendorResponse<String>, ()> = error.try_map(|n| Ok(n.to_string()));
    assert_eq!(mapped, Ok(VendorResponse::VendorError(vec!["x".to_string()])));
  }
}
