//! Configuration constants.
//!
//! This module defines the operational constants used outside the analyzers:
//! network timeouts, size limits, bulk pacing and history retention. Analyzer
//! thresholds live in each analyzer's `Thresholds` struct.

use std::time::Duration;

pub const DB_PATH: &str = "./seo_suite.db";

/// Per-request timeout in seconds for page fetches.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
/// TCP connection timeout in seconds
pub const TCP_CONNECT_TIMEOUT_SECS: u64 = 5;

/// Default User-Agent string for page fetches.
///
/// Users can override this via the `--user-agent` CLI flag.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (compatible; seo_suite/0.1)";

/// Maximum response body size in bytes (5MB)
/// Larger pages are rejected before analysis
pub const MAX_RESPONSE_BODY_SIZE: usize = 5 * 1024 * 1024;

/// Maximum number of redirect hops to follow
pub const MAX_REDIRECT_HOPS: usize = 10;

/// Pause between items of a bulk scan.
pub const DEFAULT_BULK_PAUSE: Duration = Duration::from_millis(100);

/// Number of history entries kept per key; older entries are pruned on insert.
pub const MAX_HISTORY_ENTRIES: usize = 10;

/// Site whose links count as internal in article content.
pub const DEFAULT_OWN_DOMAIN: &str = "dataengineerhub.blog";

/// Maximum error message length in characters (2000 chars)
/// Error messages longer than this are truncated with a note about the original length
pub const MAX_ERROR_MESSAGE_LENGTH: usize = 2000;
