//! Authentication helpers for the Jira client.
//!
//! Credentials come from the `[authentication]` table of `tracker.toml` when
//! present, and from `~/.netrc` otherwise.

use std::path::Path;

use anyhow::{Result, anyhow};
use tracing::debug;
use trak_core::creds::netrc::normalize_host;
use trak_core::creds::{Credentials, FALLBACK_MACHINE, find_credentials};
use trak_core::{AuthenticationConfig, HttpAuthType, TrackerConfig};

use crate::models::JiraAuth;

/// Check if Jira credentials are available for the provided host.
pub fn check_jira_credentials(home: &Path, jira_host: &str) -> Result<bool> {
  Ok(find_credentials(home, jira_host)?.is_some())
}

/// Retrieve Jira credentials from `.netrc`.
pub fn get_jira_credentials(home: &Path, jira_host: &str) -> Result<Credentials> {
  find_credentials(home, jira_host)?.ok_or_else(|| {
    anyhow!(
      "Jira credentials not found in .netrc file. Please add credentials for machine '{}' or '{FALLBACK_MACHINE}'.",
      normalize_host(jira_host)
    )
  })
}

/// Turn the `[authentication]` table into client credentials.
pub fn auth_from_config(config: &AuthenticationConfig) -> Result<JiraAuth> {
  match config.http_auth_type {
    HttpAuthType::HttpPassword => {
      let username = config
        .username
        .clone()
        .ok_or_else(|| anyhow!("`username` is required when http_auth_type is http_password"))?;
      Ok(JiraAuth::Basic {
        username,
        api_token: config.password_or_token.clone(),
      })
    }
    HttpAuthType::HttpToken => Ok(JiraAuth::Bearer {
      token: config.password_or_token.clone(),
    }),
  }
}

/// Credentials for `base_url`: the configured table first, then `.netrc`.
///
/// `Ok(None)` means neither source has anything for this host.
pub fn resolve_jira_auth(config: &TrackerConfig, home: &Path, base_url: &str) -> Result<Option<JiraAuth>> {
  if let Some(table) = &config.authentication {
    debug!("Using credentials from tracker configuration");
    return auth_from_config(table).map(Some);
  }

  Ok(find_credentials(home, base_url)?.map(|creds| {
    debug!("Using .netrc credentials for {}", normalize_host(base_url));
    JiraAuth::Basic {
      username: creds.username,
      api_token: creds.password,
    }
  }))
}

#[cfg(test)]
mod tests {
  use trak_test_utils::NetrcGuard;

  use super::*;

  const NETRC: &str = r#"machine custom-jira-host.com
  login custom@example.com
  password custom-token

machine atlassian.com
  login test@example.com
  password test-token

machine atlassian.net
  login net@example.com
  password net-token
"#;

  #[test]
  fn test_get_jira_credentials() {
    let guard = NetrcGuard::new(NETRC);

    let jira_creds = get_jira_credentials(guard.home_dir(), "custom-jira-host.com").unwrap();
    assert_eq!(jira_creds.username, "custom@example.com");
    assert_eq!(jira_creds.password, "custom-token");

    let jira_creds = get_jira_credentials(guard.home_dir(), "https://nonexistent-host.com/").unwrap();
    assert_eq!(jira_creds.username, "net@example.com");
    assert!(check_jira_credentials(guard.home_dir(), "nonexistent-host.com").unwrap());
  }

  #[test]
  fn test_get_jira_credentials_error_messages() {
    let guard = NetrcGuard::new("");

    let error = get_jira_credentials(guard.home_dir(), "https://custom-jira-host.com")
      .unwrap_err()
      .to_string();
    assert!(error.contains("'custom-jira-host.com'"));
    assert!(error.contains("atlassian.net"));

    assert!(!check_jira_credentials(guard.home_dir(), "custom-jira-host.com").unwrap());
  }

  #[test]
  fn test_config_table_wins_over_netrc() {
    let guard = NetrcGuard::new(NETRC);
    let config = TrackerConfig {
      authentication: Some(AuthenticationConfig {
        http_auth_type: HttpAuthType::HttpToken,
        username: None,
        password_or_token: "pat".to_string(),
      }),
      ..Default::default()
    };

    let auth = resolve_jira_auth(&config, guard.home_dir(), "custom-jira-host.com").unwrap();
    assert_eq!(
      auth,
      Some(JiraAuth::Bearer {
        token: "pat".to_string()
      })
    );
  }

  #[test]
  fn test_netrc_fallback() {
    let guard = NetrcGuard::new(NETRC);

    let auth = resolve_jira_auth(&TrackerConfig::default(), guard.home_dir(), "https://custom-jira-host.com").unwrap();
    assert_eq!(
      auth,
      Some(JiraAuth::Basic {
        username: "custom@example.com".to_string(),
        api_token: "custom-token".to_string(),
      })
    );

    let empty = NetrcGuard::empty_home();
    assert_eq!(
      resolve_jira_auth(&TrackerConfig::default(), empty.home_dir(), "jira.example.com").unwrap(),
      None
    );
  }

  #[test]
  fn test_password_auth_requires_username() {
    let table = AuthenticationConfig {
      http_auth_type: HttpAuthType::HttpPassword,
      username: None,
      password_or_token: "secret".to_string(),
    };
    assert!(auth_from_config(&table).is_err());
  }
}
