//! Configuration directory management for testing

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tempfile::TempDir;

/// A throwaway config/data/cache directory triple rooted in a temp dir.
pub struct ConfigDirsTestGuard {
  temp_dir: TempDir,
  /// The configuration directory
  pub config_dir: PathBuf,
  /// The data directory
  pub data_dir: PathBuf,
  /// The cache directory
  pub cache_dir: PathBuf,
}

impl ConfigDirsTestGuard {
  /// Create the directory layout
  pub fn new() -> anyhow::Result<Self> {
    let temp_dir = TempDir::new().context("Failed to create temporary directory")?;
    let config_dir = temp_dir.path().join("config");
    let data_dir = temp_dir.path().join("data");
    let cache_dir = temp_dir.path().join("cache");

    for dir in [&config_dir, &data_dir, &cache_dir] {
      fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;
    }

    Ok(Self {
      temp_dir,
      config_dir,
      data_dir,
      cache_dir,
    })
  }

  /// Root of the temporary tree. Useful as an `XDG_*` base for child processes.
  pub fn root(&self) -> &Path {
    self.temp_dir.path()
  }

  /// Write `content` to `name` inside the config directory
  pub fn write_config_file(&self, name: &str, content: &str) -> anyhow::Result<PathBuf> {
    let path = self.config_dir.join(name);
    fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
  }
}
