//! # Trak CLI Library
//!
//! Command definitions and handlers for the `trak` binary, plus the helpers
//! that turn the user's configuration into an authenticated tracker.

pub mod cli;
pub mod clients;
