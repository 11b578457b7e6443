//! Constants shared by trak crates.

/// Environment variable overriding the configured Jira base URL.
pub const ENV_JIRA_HOST: &str = "JIRA_HOST";

/// Page size used by the paged services when nothing else is configured.
pub const DEFAULT_PAGE_LIMIT: u32 = 50;

/// Page size the tracker facade uses when listing issues.
pub const ISSUE_LIST_PAGE_LIMIT: u32 = 30;

/// File name of the tracker configuration inside the config directory.
pub const TRACKER_CONFIG_FILE: &str = "tracker.toml";
