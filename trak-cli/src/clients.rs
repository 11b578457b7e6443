//! # Client Creation
//!
//! Builds an authenticated [`JiraIssueTracker`] from the user's configuration,
//! together with the runtime the synchronous CLI drives it with.

use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::BaseDirs;
use tokio::runtime::Runtime;
use tracing::debug;
use trak_core::{ConfigDirs, IssueTracker, TrackerConfig, get_config_dirs};
use trak_jira::{JiraIssueTracker, create_issue_tracker};

/// The user's home directory, where `.netrc` lives.
pub fn get_home_dir() -> Result<PathBuf> {
  let base_dirs = BaseDirs::new().context("Failed to get $HOME directory")?;
  Ok(base_dirs.home_dir().to_path_buf())
}

/// Load `tracker.toml` (or its defaults) from the standard location.
pub fn load_config() -> Result<(ConfigDirs, TrackerConfig)> {
  let dirs = get_config_dirs()?;
  let config = dirs.load_tracker_config()?;
  debug!("Loaded tracker config from {}", dirs.tracker_config_path().display());
  Ok((dirs, config))
}

/// A tracker for the configured instance, credentials resolved but not yet
/// attached.
pub fn create_tracker() -> Result<JiraIssueTracker> {
  let (_, config) = load_config()?;
  let home = get_home_dir()?;
  create_issue_tracker(&config, &home)
}

/// Creates a tokio runtime and an authenticated tracker.
pub fn create_tracker_runtime() -> Result<(Runtime, JiraIssueTracker)> {
  let rt = Runtime::new().context("Failed to create async runtime")?;
  let mut tracker = create_tracker()?;
  rt.block_on(tracker.authenticate())
    .context("Failed to authenticate with Jira")?;

  Ok((rt, tracker))
}
