//! URL validation and normalization for page fetches.

use log::warn;

use crate::error_handling::FetchError;

/// Maximum URL length (2048 characters), matching common browser and server limits.
const MAX_URL_LENGTH: usize = 2048;

/// Validates and normalizes a URL before fetching.
///
/// Trims surrounding whitespace and adds an `https://` prefix when no scheme is
/// given, then checks that the result parses and uses http or https. URLs longer
/// than `MAX_URL_LENGTH` (before or after normalization) are rejected.
///
/// # Errors
///
/// Returns `FetchError::InvalidUrl` with the reason for rejection.
pub fn normalize_url(url: &str) -> Result<String, FetchError> {
    let trimmed = url.trim();
    let invalid = |reason: String| {
        warn!("Skipping URL {}: {}", preview(trimmed), reason);
        FetchError::InvalidUrl {
            url: preview(trimmed),
            reason,
        }
    };

    if trimmed.is_empty() {
        return Err(invalid("empty URL".to_string()));
    }
    if trimmed.len() > MAX_URL_LENGTH {
        return Err(invalid(format!(
            "exceeds maximum length ({} > {})",
            trimmed.len(),
            MAX_URL_LENGTH
        )));
    }

    let normalized = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };
    if normalized.len() > MAX_URL_LENGTH {
        return Err(invalid(format!(
            "exceeds maximum length after normalization ({} > {})",
            normalized.len(),
            MAX_URL_LENGTH
        )));
    }

    match url::Url::parse(&normalized) {
        Ok(parsed) => match parsed.scheme() {
            "http" | "https" if parsed.host_str().is_some() => Ok(normalized),
            "http" | "https" => Err(invalid("missing host".to_string())),
            other => Err(invalid(format!("unsupported scheme '{other}'"))),
        },
        Err(e) => Err(invalid(e.to_string())),
    }
}

fn preview(url: &str) -> String {
    url.chars().take(80).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_normalize_url_adds_https() {
        assert_eq!(normalize_url("example.com").unwrap(), "https://example.com");
        assert_eq!(
            normalize_url("  example.com/blog/post  ").unwrap(),
            "https://example.com/blog/post"
        );
    }

    #[test]
    fn test_normalize_url_preserves_scheme() {
        assert_eq!(normalize_url("http://example.com").unwrap(), "http://example.com");
        assert_eq!(
            normalize_url("https://example.com:8443/a?b=c").unwrap(),
            "https://example.com:8443/a?b=c"
        );
    }

    #[test]
    fn test_normalize_url_rejects_unsupported_scheme() {
        for url in ["ftp://example.com", "file:///etc/passwd"] {
            match normalize_url(url) {
                Err(FetchError::InvalidUrl { reason, .. }) => {
                    assert!(reason.contains("scheme"), "{url}: {reason}")
                }
                other => panic!("expected invalid url for {url}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_normalize_url_rejects_empty_and_malformed() {
        assert!(normalize_url("").is_err());
        assert!(normalize_url("   ").is_err());
        assert!(normalize_url("https://").is_err());
        assert!(normalize_url("http://exa mple.com").is_err());
    }

    #[test]
    fn test_normalize_url_length_limit() {
        let at_limit = format!("https://example.com/{}", "a".repeat(MAX_URL_LENGTH - 20));
        assert_eq!(at_limit.len(), MAX_URL_LENGTH);
        assert!(normalize_url(&at_limit).is_ok());

        let over = format!("{at_limit}a");
        assert!(normalize_url(&over).is_err());

        // Fits before the prefix is added, not after
        let bare = format!("example.com/{}", "a".repeat(MAX_URL_LENGTH - 14));
        assert!(bare.len() <= MAX_URL_LENGTH);
        assert!(normalize_url(&bare).is_err());
    }

    proptest! {
        #[test]
        fn test_normalize_url_idempotent(url in "[a-z]{3,20}\\.[a-z]{2,5}(/[a-z]{1,10}){0,4}") {
            let once = normalize_url(&url).unwrap();
            prop_assert!(once.starts_with("https://"));
            prop_assert_eq!(normalize_url(&once).unwrap(), once);
        }

        #[test]
        fn test_normalize_url_never_panics(input in "\\PC{0,200}") {
            let _ = normalize_url(&input);
        }
    }
}
