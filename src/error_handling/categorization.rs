//! Failure categorization for bulk statistics.

use super::types::{FetchError, ScanFailure};

/// Categorizes a `reqwest::Error` into a `ScanFailure`.
pub fn categorize_reqwest_error(error: &reqwest::Error) -> ScanFailure {
    if error.status().is_some() || error.is_status() {
        ScanFailure::HttpStatus
    } else if error.is_timeout() {
        ScanFailure::HttpTimeout
    } else if error.is_connect() {
        ScanFailure::HttpConnect
    } else if error.is_builder() {
        ScanFailure::InvalidUrl
    } else {
        ScanFailure::HttpOther
    }
}

/// Categorizes a fetch failure.
pub fn categorize_fetch_error(error: &FetchError) -> ScanFailure {
    match error {
        FetchError::InvalidUrl { .. } => ScanFailure::InvalidUrl,
        FetchError::Http(e) => categorize_reqwest_error(e),
        FetchError::Status { .. } => ScanFailure::HttpStatus,
        FetchError::BodyTooLarge { .. } => ScanFailure::HttpBodyTooLarge,
    }
}

/// Finds the failure kind behind an `anyhow` error chain.
///
/// Errors that did not come from fetching are reported as `HttpOther`.
pub fn extract_failure_kind(error: &anyhow::Error) -> ScanFailure {
    error
        .chain()
        .find_map(|cause| cause.downcast_ref::<FetchError>())
        .map(categorize_fetch_error)
        .unwrap_or(ScanFailure::HttpOther)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_categorize_fetch_error_variants() {
        let invalid = FetchError::InvalidUrl {
            url: "x".into(),
            reason: "bad".into(),
        };
        assert_eq!(categorize_fetch_error(&invalid), ScanFailure::InvalidUrl);

        let status = FetchError::Status {
            url: "x".into(),
            status: 500,
        };
        assert_eq!(categorize_fetch_error(&status), ScanFailure::HttpStatus);

        let large = FetchError::BodyTooLarge {
            url: "x".into(),
            limit: 10,
        };
        assert_eq!(categorize_fetch_error(&large), ScanFailure::HttpBodyTooLarge);
    }

    #[test]
    fn test_extract_failure_kind_through_context() {
        let result: Result<(), FetchError> = Err(FetchError::Status {
            url: "https://example.com".into(),
            status: 503,
        });
        let err = result.context("scanning item 3").unwrap_err();
        assert_eq!(extract_failure_kind(&err), ScanFailure::HttpStatus);

        let other = anyhow::anyhow!("something else");
        assert_eq!(extract_failure_kind(&other), ScanFailure::HttpOther);
    }
}
