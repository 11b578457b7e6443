//! # Trak Core Library
//!
//! Vendor-neutral building blocks for trak: the normalized issue records,
//! filter and paging types, the [`IssueTracker`] interface every adapter
//! implements, and the shared configuration, credential and output helpers.

pub mod config;
pub mod consts;
pub mod creds;
pub mod error;
pub mod filter;
pub mod issue;
pub mod output;
pub mod page;
pub mod tracker;
pub mod url;

// Re-export main types for adapter crates
pub use config::{AdapterKind, AuthenticationConfig, ConfigDirs, HttpAuthType, TrackerConfig, get_config_dirs};
pub use error::{TrackerError, TrackerResult};
pub use filter::{FilterCriteria, FilterField, FilterValue};
pub use issue::{NormalizedComment, NormalizedIssue, NormalizedProject};
pub use output::{ColorMode, print_error, print_info, print_success, print_warning};
pub use page::{PageRequest, VendorResponse};
pub use tracker::{IssueOptions, IssueTracker, IssueUpdate};
