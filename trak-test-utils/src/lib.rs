//! Test utilities shared across the trak workspace
//!
//! This crate provides common testing infrastructure including:
//! - Environment variable isolation ([`EnvVarGuard`])
//! - Throwaway `.netrc` homes ([`NetrcGuard`])
//! - Temporary configuration directories ([`ConfigDirsTestGuard`])
//! - Canned Jira payloads ([`fixtures`])
//!
//! The dead_code lint is disabled for this crate because test utilities may
//! not be used by all tests, and the compiler cannot detect usage across crate
//! boundaries in development dependencies.

#![allow(dead_code)]

pub mod config;
pub mod env;
pub mod fixtures;
pub mod netrc;

// Re-export commonly used items
pub use config::ConfigDirsTestGuard;
pub use env::EnvVarGuard;
pub use netrc::NetrcGuard;
