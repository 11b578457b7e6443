//! # Tracker Errors
//!
//! The error taxonomy shared by every tracker adapter. Vendor-declared error
//! payloads on otherwise successful replies are not errors at the service
//! layer; they surface as [`crate::VendorResponse::VendorError`].

use thiserror::Error;

/// Result alias used throughout the tracker interface.
pub type TrackerResult<T> = Result<T, TrackerError>;

/// Errors raised while talking to an issue tracker.
#[derive(Debug, Error)]
pub enum TrackerError {
  /// Network failure or a non-2xx reply the caller did not opt into.
  #[error("transport error{}: {message}", .status.map(|s| format!(" (HTTP {s})")).unwrap_or_default())]
  Transport { status: Option<u16>, message: String },

  /// The vendor answered 404 for the requested resource.
  #[error("{0} not found")]
  NotFound(String),

  /// The vendor rejected the credentials (401/403).
  #[error("Authentication failed. Please check your tracker credentials.")]
  Authentication,

  /// A required field was absent from a vendor record.
  #[error("malformed response: missing or invalid field `{field}`")]
  MalformedResponse { field: String },

  /// The vendor has no counterpart for the requested operation. Permanent.
  #[error("unsupported operation: {0}")]
  Unsupported(String),

  /// The vendor replied with an `errorMessages` payload where a single record
  /// was required.
  #[error("tracker reported an error: {}", .0.join("; "))]
  VendorDeclared(Vec<String>),

  /// Missing or invalid adapter configuration.
  #[error("configuration error: {0}")]
  Config(String),
}

impl TrackerError {
  /// Shorthand for [`TrackerError::MalformedResponse`].
  pub fn malformed(field: &str) -> Self {
    Self::MalformedResponse {
      field: field.to_string(),
    }
  }

  /// Shorthand for [`TrackerError::Unsupported`].
  pub fn unsupported(reason: impl Into<String>) -> Self {
    Self::Unsupported(reason.into())
  }

  /// Whether retrying the same call can never succeed.
  pub const fn is_permanent(&self) -> bool {
    matches!(self, Self::Unsupported(_) | Self::MalformedResponse { .. })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_transport_error_message_includes_status() {
    let err = TrackerError::Transport {
      status: Some(500),
      message: "boom".to_string(),
    };
    assert_eq!(err.to_string(), "transport error (HTTP 500): boom");

    let err = TrackerError::Transport {
      status: None,
      message: "connection refused".to_string(),
    };
    assert_eq!(err.to_string(), "transport error: connection refused");
  }

  #[test]
  fn test_malformed_names_field() {
    let err = TrackerError::malformed("summary");
    assert!(err.to_string().contains("`summary`"));
    assert!(err.is_permanent());
  }

  #[test]
  fn test_vendor_declared_joins_messages() {
    let err = TrackerError::VendorDeclared(vec!["first".to_string(), "second".to_string()]);
    assert_eq!(err.to_string(), "tracker reported an error: first; second");
    assert!(!err.is_permanent());
  }
}
