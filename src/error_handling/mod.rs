//! Error handling and bulk scan statistics.
//!
//! This module provides:
//! - Error type definitions for fetching, history and start-up
//! - Failure categorization for reporting
//! - Bulk scan statistics keyed by failure kind

mod categorization;
mod stats;
mod types;

pub use categorization::{categorize_fetch_error, categorize_reqwest_error, extract_failure_kind};
pub use stats::ScanStats;
pub use types::{FetchError, HistoryError, InitializationError, ScanFailure};
