//! Remote page fetching.
//!
//! Fetches a page over HTTP and hands the body to the Traditional scanner. The
//! analyzers never touch the network; this module is the only place that does.

mod url;

use log::{debug, warn};

use crate::config::MAX_RESPONSE_BODY_SIZE;
use crate::error_handling::FetchError;
use crate::scoring::Report;
use crate::traditional::{TraditionalCategory, TraditionalScanner};

pub use self::url::normalize_url;

/// A fetched HTML page.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// URL after normalization, as requested.
    pub url: String,
    /// URL after following redirects.
    pub final_url: String,
    pub status: u16,
    pub html: String,
}

/// Fetches the HTML of a page.
///
/// The URL is normalized first (see [`normalize_url`]). Redirects are followed by
/// the client. Bodies larger than `MAX_RESPONSE_BODY_SIZE` are rejected.
///
/// # Errors
///
/// Returns `FetchError` for invalid URLs, transport failures, non-success status
/// codes and oversized bodies.
pub async fn fetch_html(client: &reqwest::Client, url: &str) -> Result<FetchedPage, FetchError> {
    let url = normalize_url(url)?;
    debug!("Fetching {url}");

    let response = client.get(&url).send().await?;
    let status = response.status();
    let final_url = response.url().to_string();

    if !status.is_success() {
        warn!("{} returned HTTP {}", url, status.as_u16());
        return Err(FetchError::Status {
            url,
            status: status.as_u16(),
        });
    }

    let html = read_body_limited(response, &url, MAX_RESPONSE_BODY_SIZE).await?;
    debug!("Body length for {final_url}: {} bytes", html.len());

    Ok(FetchedPage {
        url,
        final_url,
        status: status.as_u16(),
        html,
    })
}

/// Fetches a page and runs the Traditional scanner over it.
///
/// The report URL is the final URL after redirects.
///
/// # Errors
///
/// Propagates any `FetchError` from [`fetch_html`].
pub async fn scan_url(
    client: &reqwest::Client,
    scanner: &TraditionalScanner,
    url: &str,
) -> Result<Report<TraditionalCategory>, FetchError> {
    let page = fetch_html(client, url).await?;
    Ok(scanner.analyze(&page.final_url, &page.html))
}

async fn read_body_limited(
    mut response: reqwest::Response,
    url: &str,
    limit: usize,
) -> Result<String, FetchError> {
    let too_large = || FetchError::BodyTooLarge {
        url: url.to_string(),
        limit,
    };

    if let Some(length) = response.content_length() {
        if length as usize > limit {
            debug!("Skipping large body: {length} bytes");
            return Err(too_large());
        }
    }

    let mut body: Vec<u8> = Vec::new();
    while let Some(chunk) = response.chunk().await? {
        if body.len() + chunk.len() > limit {
            debug!("Body for {url} exceeded {limit} bytes while streaming");
            return Err(too_large());
        }
        body.extend_from_slice(&chunk);
    }

    Ok(String::from_utf8_lossy(&body).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::Severity;
    use httptest::{matchers::*, responders::*, Expectation, Server};

    const PAGE: &str = "<html lang=\"en\"><head><title>Fetched page title for testing</title>\
        <meta name=\"viewport\" content=\"width=device-width\"></head>\
        <body><h1>Hello</h1><p>Short body.</p></body></html>";

    #[tokio::test]
    async fn test_fetch_html_success() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/page")).respond_with(
                status_code(200)
                    .insert_header("Content-Type", "text/html; charset=utf-8")
                    .body(PAGE),
            ),
        );

        let client = reqwest::Client::new();
        let url = server.url("/page").to_string();
        let page = fetch_html(&client, &url).await.unwrap();
        assert_eq!(page.status, 200);
        assert_eq!(page.html, PAGE);
        assert_eq!(page.final_url, url);
    }

    #[tokio::test]
    async fn test_fetch_html_non_success_status() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/missing"))
                .respond_with(status_code(404)),
        );

        let client = reqwest::Client::new();
        let err = fetch_html(&client, &server.url("/missing").to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_fetch_html_rejects_invalid_url_without_request() {
        let client = reqwest::Client::new();
        let err = fetch_html(&client, "ftp://example.com/file").await.unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl { .. }));
    }

    #[tokio::test]
    async fn test_read_body_limited_rejects_large_body() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/large"))
                .respond_with(status_code(200).body("x".repeat(2048))),
        );

        let client = reqwest::Client::new();
        let url = server.url("/large").to_string();
        let response = client.get(&url).send().await.unwrap();
        let err = read_body_limited(response, &url, 1024).await.unwrap_err();
        assert!(matches!(err, FetchError::BodyTooLarge { limit: 1024, .. }));
    }

    #[tokio::test]
    async fn test_scan_url_runs_traditional_scanner() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/article"))
                .respond_with(status_code(200).body(PAGE)),
        );

        let client = reqwest::Client::new();
        let url = server.url("/article").to_string();
        let report = scan_url(&client, &TraditionalScanner::new(), &url)
            .await
            .unwrap();
        assert_eq!(report.url.as_deref(), Some(url.as_str()));
        let title = report.find("Title Tag").unwrap();
        assert_eq!(title.severity, Severity::Good);
    }
}
