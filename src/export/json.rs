//! JSON export.

use serde::Serialize;

/// Pretty-prints any report as JSON (two-space indent).
///
/// # Errors
///
/// Returns the `serde_json` error if serialization fails.
pub fn export_json<T: Serialize + ?Sized>(report: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}
