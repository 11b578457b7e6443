//! Environment variable management for testing
//!
//! Tests run in parallel threads of a single process, so every guard holds a
//! process-wide lock for its whole lifetime. Use at most one guard per test.

use std::env;
use std::sync::{Mutex, MutexGuard, PoisonError};

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// RAII guard for a single environment variable.
///
/// The original value is captured on creation and restored (or removed) when
/// the guard is dropped.
pub struct EnvVarGuard {
  key: String,
  original: Option<String>,
  _lock: MutexGuard<'static, ()>,
}

impl EnvVarGuard {
  /// Take ownership of `key` for the duration of the test.
  pub fn new(key: &str) -> Self {
    let lock = ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
    let original = env::var(key).ok();

    Self {
      key: key.to_string(),
      original,
      _lock: lock,
    }
  }

  /// Set the variable to `value`.
  pub fn set(&self, value: &str) {
    unsafe {
      env::set_var(&self.key, value);
    }
  }

  /// Remove the variable from the environment.
  pub fn remove(&self) {
    unsafe {
      env::remove_var(&self.key);
    }
  }
}

impl Drop for EnvVarGuard {
  fn drop(&mut self) {
    match &self.original {
      Some(val) => unsafe {
        env::set_var(&self.key, val);
      },
      None => unsafe {
        env::remove_var(&self.key);
      },
    }
  }
}
