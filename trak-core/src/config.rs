//! # Configuration Management
//!
//! Handles trak's directories (XDG on Unix) and the `tracker.toml` file that
//! selects an adapter and describes how to reach it.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_PAGE_LIMIT, ENV_JIRA_HOST, TRACKER_CONFIG_FILE};
use crate::url::ensure_url_scheme;

/// Which adapter the tracker configuration selects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdapterKind {
  /// Jira Cloud (`*.atlassian.net`)
  #[default]
  Jira,
  /// Self-hosted Jira Server / Data Center
  JiraEnterprise,
}

/// How credentials are presented to the vendor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HttpAuthType {
  /// HTTP Basic with a username and a password or API token
  #[default]
  HttpPassword,
  /// Bearer personal access token
  HttpToken,
}

/// The `[authentication]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticationConfig {
  #[serde(default)]
  pub http_auth_type: HttpAuthType,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub username: Option<String>,
  pub password_or_token: String,
}

/// Contents of `tracker.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerConfig {
  #[serde(default)]
  pub adapter: AdapterKind,
  /// REST base URL, e.g. `https://company.atlassian.net`
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub base_url: Option<String>,
  /// Browser-facing URL used for issue links and repository matching
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub repo_domain_url: Option<String>,
  /// Default project key for new issues
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub project: Option<String>,
  #[serde(default = "default_page_size")]
  pub page_size: u32,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub authentication: Option<AuthenticationConfig>,
}

const fn default_page_size() -> u32 {
  DEFAULT_PAGE_LIMIT
}

impl Default for TrackerConfig {
  fn default() -> Self {
    Self {
      adapter: AdapterKind::default(),
      base_url: None,
      repo_domain_url: None,
      project: None,
      page_size: DEFAULT_PAGE_LIMIT,
      authentication: None,
    }
  }
}

impl TrackerConfig {
  /// The REST base URL with a scheme and no trailing slash.
  ///
  /// `$JIRA_HOST` wins over the configured `base_url`.
  pub fn resolved_base_url(&self) -> Result<String> {
    let raw = match std::env::var(ENV_JIRA_HOST) {
      Ok(host) if !host.trim().is_empty() => host,
      _ => self.base_url.clone().with_context(|| {
        format!("No tracker base URL configured. Set `base_url` in {TRACKER_CONFIG_FILE} or ${ENV_JIRA_HOST}.")
      })?,
    };

    Ok(ensure_url_scheme(&raw)?.trim_end_matches('/').to_string())
  }

  /// The browser-facing URL, falling back to the base URL.
  pub fn resolved_repo_domain_url(&self) -> Result<String> {
    match &self.repo_domain_url {
      Some(domain) => Ok(ensure_url_scheme(domain)?.trim_end_matches('/').to_string()),
      None => self.resolved_base_url(),
    }
  }
}

/// Represents the configuration directories for the trak application
#[derive(Debug, Clone)]
pub struct ConfigDirs {
  pub config_dir: PathBuf,
  pub data_dir: PathBuf,
  pub cache_dir: Option<PathBuf>,
}

impl ConfigDirs {
  /// Create a new ConfigDirs instance
  pub fn new() -> Result<Self> {
    let proj_dirs = ProjectDirs::from("", "", "trak").context("Failed to determine project directories")?;

    Ok(Self {
      config_dir: proj_dirs.config_dir().to_path_buf(),
      data_dir: proj_dirs.data_dir().to_path_buf(),
      cache_dir: Some(proj_dirs.cache_dir().to_path_buf()),
    })
  }

  /// Lay the directories out under an explicit root.
  pub fn from_root(root: &Path) -> Self {
    Self {
      config_dir: root.join("config"),
      data_dir: root.join("data"),
      cache_dir: Some(root.join("cache")),
    }
  }

  /// Get the config directory
  pub fn config_dir(&self) -> &PathBuf {
    &self.config_dir
  }

  /// Get the data directory
  pub fn data_dir(&self) -> &PathBuf {
    &self.data_dir
  }

  /// Get the cache directory
  pub fn cache_dir(&self) -> Option<&PathBuf> {
    self.cache_dir.as_ref()
  }

  /// Initialize the configuration directories
  pub fn init(&self) -> Result<()> {
    fs::create_dir_all(&self.config_dir).context("Failed to create config directory")?;
    fs::create_dir_all(&self.data_dir).context("Failed to create data directory")?;
    if let Some(cache_dir) = &self.cache_dir {
      fs::create_dir_all(cache_dir).context("Failed to create cache directory")?;
    }

    Ok(())
  }

  /// Get the path to the tracker configuration file
  pub fn tracker_config_path(&self) -> PathBuf {
    self.config_dir.join(TRACKER_CONFIG_FILE)
  }

  /// Load the tracker configuration from file or return default
  pub fn load_tracker_config(&self) -> Result<TrackerConfig> {
    let config_path = self.tracker_config_path();

    if config_path.exists() {
      let content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read tracker config from {}", config_path.display()))?;

      let config: TrackerConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse tracker config from {}", config_path.display()))?;

      Ok(config)
    } else {
      Ok(TrackerConfig::default())
    }
  }

  /// Save the tracker configuration to file
  pub fn save_tracker_config(&self, config: &TrackerConfig) -> Result<()> {
    let config_path = self.tracker_config_path();

    if let Some(parent) = config_path.parent() {
      fs::create_dir_all(parent).with_context(|| format!("Failed to create config directory {}", parent.display()))?;
    }

    let content = toml::to_string_pretty(config).context("Failed to serialize tracker config to TOML")?;

    fs::write(&config_path, content)
      .with_context(|| format!("Failed to write tracker config to {}", config_path.display()))?;

    Ok(())
  }
}

/// Get the configuration directories
pub fn get_config_dirs() -> Result<ConfigDirs> {
  ConfigDirs::new()
}

#[cfg(test)]
mod tests {
  use trak_test_utils::{ConfigDirsTestGuard, EnvVarGuard};

  use super::*;

  #[test]
  fn test_load_missing_config_returns_default() {
    let guard = ConfigDirsTestGuard::new().unwrap();
    let dirs = ConfigDirs::from_root(guard.root());

    let config = dirs.load_tracker_config().unwrap();
    assert_eq!(config, TrackerConfig::default());
    assert_eq!(config.page_size, DEFAULT_PAGE_LIMIT);
  }

  #[test]
  fn test_load_enterprise_config() {
    let guard = ConfigDirsTestGuard::new().unwrap();
    guard
      .write_config_file(
        TRACKER_CONFIG_FILE,
        r#"
adapter = "jira_enterprise"
base_url = "https://jira.example.com/"
repo_domain_url = "https://jira.example.com"
project = "OPS"
page_size = 30

[authentication]
http_auth_type = "http_token"
password_or_token = "secret"
"#,
      )
      .unwrap();
    let dirs = ConfigDirs::from_root(guard.root());

    let config = dirs.load_tracker_config().unwrap();
    assert_eq!(config.adapter, AdapterKind::JiraEnterprise);
    assert_eq!(config.project.as_deref(), Some("OPS"));
    assert_eq!(config.page_size, 30);

    let auth = config.authentication.unwrap();
    assert_eq!(auth.http_auth_type, HttpAuthType::HttpToken);
    assert_eq!(auth.username, None);
    assert_eq!(auth.password_or_token, "secret");
  }

  #[test]
  fn test_invalid_config_reports_path() {
    let guard = ConfigDirsTestGuard::new().unwrap();
    guard
      .write_config_file(TRACKER_CONFIG_FILE, "adapter = \"gitlab\"\n")
      .unwrap();
    let dirs = ConfigDirs::from_root(guard.root());

    let err = dirs.load_tracker_config().unwrap_err();
    assert!(format!("{err:#}").contains(TRACKER_CONFIG_FILE));
  }

  #[test]
  fn test_save_then_load() {
    let guard = ConfigDirsTestGuard::new().unwrap();
    let dirs = ConfigDirs::from_root(guard.root());

    let config = TrackerConfig {
      base_url: Some("https://company.atlassian.net".to_string()),
      project: Some("PROJ".to_string()),
      ..Default::default()
    };
    dirs.save_tracker_config(&config).unwrap();

    assert_eq!(dirs.load_tracker_config().unwrap(), config);
  }

  #[test]
  fn test_resolved_base_url_prefers_env() {
    let env = EnvVarGuard::new(ENV_JIRA_HOST);
    let config = TrackerConfig {
      base_url: Some("configured.atlassian.net/".to_string()),
      ..Default::default()
    };

    env.remove();
    assert_eq!(config.resolved_base_url().unwrap(), "https://configured.atlassian.net");
    assert_eq!(
      config.resolved_repo_domain_url().unwrap(),
      "https://configured.atlassian.net"
    );

    env.set("override.atlassian.net");
    assert_eq!(config.resolved_base_url().unwrap(), "https://override.atlassian.net");
  }

  #[test]
  fn test_resolved_base_url_missing() {
    let env = EnvVarGuard::new(ENV_JIRA_HOST);
    env.remove();

    let err = TrackerConfig::default().resolved_base_url().unwrap_err();
    assert!(err.to_string().contains(ENV_JIRA_HOST));
  }
}
