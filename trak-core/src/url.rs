//! URL helpers shared across crates.
//!
//! Configured hosts arrive in many shapes (`company.atlassian.net`,
//! `https://jira.example.com/`, `http:/typo.example.com`); these helpers turn
//! them into canonical URLs and extract hosts for repository matching.

use anyhow::Result;
use url::{Position, Url};

/// Normalize a URL by removing trailing slashes from the path when it's just
/// "/".
fn normalize_url(url: &Url) -> String {
  let mut result = String::new();
  result.push_str(&url[..Position::BeforePath]);

  let path = url.path();
  if path != "/" {
    result.push_str(path);
  }

  if let Some(query) = url.query() {
    result.push('?');
    result.push_str(query);
  }

  if let Some(fragment) = url.fragment() {
    result.push('#');
    result.push_str(fragment);
  }

  result
}

/// Parse a URL by prefixing it with https:// scheme.
fn parse_with_https_prefix(input: &str) -> Result<Url> {
  let mut candidate = input;

  if let Some(colon_index) = input.find(':') {
    let potential_scheme = &input[..colon_index];
    if ["http", "https"]
      .iter()
      .any(|scheme| potential_scheme.eq_ignore_ascii_case(scheme))
    {
      let remainder = input[colon_index + 1..].trim_start_matches('/');
      if !remainder.is_empty() {
        candidate = remainder;
      }
    }
  }

  let with_scheme = format!("https://{candidate}");
  Url::parse(&with_scheme).map_err(|e| anyhow::anyhow!("Failed to parse URL: '{input}' ({e}). Ensure it has a valid scheme."))
}

/// Ensure a URL has a proper scheme (http:// or https://).
///
/// If the input doesn't include a scheme, assumes https://. Also handles
/// malformed schemes like "http:/example.com" (missing slash).
pub fn ensure_url_scheme(input: &str) -> Result<String> {
  let trimmed = input.trim();
  if trimmed.is_empty() {
    return Err(anyhow::anyhow!("Host cannot be empty"));
  }

  let lowered = trimmed.to_ascii_lowercase();
  if lowered.starts_with("http:") && !lowered.starts_with("http://") {
    let remainder = trimmed.split_once(':').map(|(_, rest)| rest).unwrap_or("");
    return parse_with_https_prefix(remainder.trim_start_matches('/')).map(|url| normalize_url(&url));
  }

  if lowered.starts_with("https:") && !lowered.starts_with("https://") {
    let remainder = trimmed.split_once(':').map(|(_, rest)| rest).unwrap_or("");
    return parse_with_https_prefix(remainder.trim_start_matches('/')).map(|url| normalize_url(&url));
  }

  let url = if let Ok(url) = Url::parse(trimmed) {
    if url.scheme().len() > 1 && url.host().is_some() {
      url
    } else {
      parse_with_https_prefix(trimmed)?
    }
  } else {
    parse_with_https_prefix(trimmed)?
  };

  Ok(normalize_url(&url))
}

/// Lower-cased host of a URL-ish string, or `None` when it has no host.
///
/// Accepts scp-style git remotes (`git@host:owner/repo.git`) as well as
/// regular URLs and bare hosts.
pub fn host_of(input: &str) -> Option<String> {
  let trimmed = input.trim();
  if trimmed.is_empty() {
    return None;
  }

  if !trimmed.contains("://")
    && let Some((user_host, _path)) = trimmed.split_once(':')
    && let Some((_, host)) = user_host.split_once('@')
  {
    return Some(host.to_ascii_lowercase());
  }

  let url = match Url::parse(trimmed) {
    Ok(url) if url.host().is_some() => url,
    _ => parse_with_https_prefix(trimmed).ok()?,
  };
  url.host_str().map(str::to_ascii_lowercase)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_ensure_url_scheme_with_https() {
    let result = ensure_url_scheme("https://company.atlassian.net").unwrap();
    assert_eq!(result, "https://company.atlassian.net");
  }

  #[test]
  fn test_ensure_url_scheme_without_scheme() {
    let result = ensure_url_scheme("company.atlassian.net").unwrap();
    assert_eq!(result, "https://company.atlassian.net");
  }

  #[test]
  fn test_ensure_url_scheme_empty_string() {
    let result = ensure_url_scheme("");
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("Host cannot be empty"));
  }

  #[test]
  fn test_ensure_url_scheme_with_port() {
    let result = ensure_url_scheme("localhost:8080").unwrap();
    assert_eq!(result, "https://localhost:8080");
  }

  #[test]
  fn test_ensure_url_scheme_ip_address_with_port() {
    let result = ensure_url_scheme("192.168.1.100:8080").unwrap();
    assert_eq!(result, "https://192.168.1.100:8080");
  }

  #[test]
  fn test_ensure_url_scheme_with_path() {
    let result = ensure_url_scheme("example.com/path/to/resource").unwrap();
    assert_eq!(result, "https://example.com/path/to/resource");
  }

  #[test]
  fn test_ensure_url_scheme_case_sensitivity() {
    let result = ensure_url_scheme("HTTP://example.com").unwrap();
    assert_eq!(result, "http://example.com");
  }

  #[test]
  fn test_ensure_url_scheme_partial_scheme_http() {
    let result = ensure_url_scheme("http:/example.com").unwrap();
    assert_eq!(result, "https://example.com");
  }

  // Tests for host_of

  #[test]
  fn test_host_of_https_url() {
    assert_eq!(
      host_of("https://Company.atlassian.net/browse/PROJ-1").as_deref(),
      Some("company.atlassian.net")
    );
  }

  #[test]
  fn test_host_of_scp_remote() {
    assert_eq!(
      host_of("git@bitbucket.example.com:team/repo.git").as_deref(),
      Some("bitbucket.example.com")
    );
  }

  #[test]
  fn test_host_of_bare_host_with_port() {
    assert_eq!(host_of("jira.example.com:8443").as_deref(), Some("jira.example.com"));
  }

  #[test]
  fn test_host_of_empty() {
    assert_eq!(host_of("  "), None);
  }
}
