//! # Credential Management
//!
//! Lookup and storage of tracker credentials in the user's `.netrc`, the same
//! file curl and git already read.

pub mod netrc;

use std::path::Path;

use anyhow::Result;

use self::netrc::{get_netrc_path, normalize_host, parse_netrc_file};

/// Machine entry consulted when no entry matches the configured host.
pub const FALLBACK_MACHINE: &str = "atlassian.net";

/// Represents credentials for a service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
  pub username: String,
  pub password: String,
}

/// Find credentials for `host` in `<home>/.netrc`.
///
/// The normalized host is tried first, then [`FALLBACK_MACHINE`]. A missing
/// `.netrc` yields `Ok(None)`.
pub fn find_credentials(home: &Path, host: &str) -> Result<Option<Credentials>> {
  let path = get_netrc_path(home);
  if !path.exists() {
    return Ok(None);
  }

  let normalized = normalize_host(host);
  if let Some(creds) = parse_netrc_file(&path, &normalized)? {
    return Ok(Some(creds));
  }
  parse_netrc_file(&path, FALLBACK_MACHINE)
}
