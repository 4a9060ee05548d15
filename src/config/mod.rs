//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (timeouts, limits, pacing, retention)
//! - CLI option types (log level/format, output format)
//! - The library `Config` struct

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{Config, LogFormat, LogLevel, OutputFormat};
