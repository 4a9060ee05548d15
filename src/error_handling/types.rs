//! Error type definitions.
//!
//! The analyzers never fail; everything here belongs to the layers around them
//! (fetching, history, start-up).

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Errors raised while fetching a page for scanning.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The URL could not be parsed or uses an unsupported scheme.
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Transport-level failure (DNS, connect, timeout, body read).
    #[error("Failed to scan URL: {0}")]
    Http(#[from] ReqwestError),

    /// The server answered with a non-success status.
    #[error("Failed to scan URL: {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// The body exceeded the configured size limit.
    #[error("Failed to scan URL: {url} body exceeds {limit} bytes")]
    BodyTooLarge { url: String, limit: usize },
}

/// Error types for scan history operations.
#[derive(Error, Debug)]
pub enum HistoryError {
    /// Error creating the database file.
    #[error("Database file creation error: {0}")]
    FileCreationError(String),

    /// SQL execution error.
    #[error("SQL error: {0}")]
    SqlError(#[from] sqlx::Error),

    /// Stored details could not be encoded or decoded.
    #[error("History details serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Why a bulk item failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum ScanFailure {
    InvalidUrl,
    HttpTimeout,
    HttpConnect,
    HttpStatus,
    HttpBodyTooLarge,
    HttpOther,
    /// Item had neither content nor a URL.
    MissingInput,
    HistoryWrite,
}

impl ScanFailure {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScanFailure::InvalidUrl => "Invalid URL",
            ScanFailure::HttpTimeout => "HTTP request timeout",
            ScanFailure::HttpConnect => "HTTP connect error",
            ScanFailure::HttpStatus => "HTTP status error",
            ScanFailure::HttpBodyTooLarge => "Response body too large",
            ScanFailure::HttpOther => "HTTP request error",
            ScanFailure::MissingInput => "No content or URL to scan",
            ScanFailure::HistoryWrite => "History write error",
        }
    }
}

impl std::fmt::Display for ScanFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
