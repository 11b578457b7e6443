//! Constants for the trak-jira client.

/// User-Agent header value for the Jira API client
pub const USER_AGENT: &str = concat!("trak/", env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Path of the REST API below the base URL
pub const API_PATH: &str = "rest/api/2";

/// Domain every Jira Cloud site lives under
pub const CLOUD_DOMAIN: &str = "atlassian.net";

/// Issue type used when the caller does not name one
pub const DEFAULT_ISSUE_TYPE: &str = "Task";

/// Query parameter carrying the page offset
pub const PARAM_START_AT: &str = "startAt";

/// Query parameter carrying the page size
pub const PARAM_MAX_RESULTS: &str = "maxResults";

/// Query parameter carrying the JQL expression
pub const PARAM_JQL: &str = "jql";
