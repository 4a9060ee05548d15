//! Sequential bulk scanning.
//!
//! Items are scanned one at a time in input order with a pause between them.
//! A failed item is recorded as a result with score 0 and grade F and the run
//! continues. Cancellation is checked between items only.

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use log::{debug, info, warn};
use serde::Serialize;
use serde_json::json;
use tokio_util::sync::CancellationToken;

use crate::aggregate::{OverallReport, Suite};
use crate::config::{Config, DEFAULT_BULK_PAUSE};
use crate::error_handling::{extract_failure_kind, ScanFailure, ScanStats};
use crate::fetch::fetch_html;
use crate::history::ScanHistory;
use crate::models::Article;
use crate::scoring::Grade;
use crate::utils::sanitize::sanitize_and_truncate_error_message;

/// Outcome of scanning one bulk item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BulkResult {
    /// History key: the slug, or the URL when there is no slug.
    pub key: String,
    pub title: String,
    pub url: String,
    pub score: u8,
    pub grade: Grade,
    /// Change against the previous recorded scan of the same key.
    pub trend: i32,
    pub pseo: u8,
    pub aeo: u8,
    pub geo: u8,
    /// Critical checks in the Traditional report.
    pub critical: usize,
    /// Warnings across all reports.
    pub warning: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BulkResult {
    fn failed(article: &Article, error: String) -> Self {
        Self {
            key: item_key(article).to_string(),
            title: article.title.clone(),
            url: article.url.clone(),
            score: 0,
            grade: Grade::F,
            trend: 0,
            pseo: 0,
            aeo: 0,
            geo: 0,
            critical: 0,
            warning: 0,
            error: Some(error),
        }
    }
}

fn item_key(article: &Article) -> &str {
    if article.slug.is_empty() {
        &article.url
    } else {
        &article.slug
    }
}

/// Wraps article content into a minimal HTML page for the Traditional scanner.
pub fn wrap_content(title: &str, content: &str) -> String {
    format!(
        "<!DOCTYPE html><html><head><title>{}</title></head><body>{}</body></html>",
        title, content
    )
}

/// Scans a list of articles one after another.
pub struct BulkScanner {
    suite: Suite,
    client: Option<Arc<reqwest::Client>>,
    history: Option<ScanHistory>,
    pause: Duration,
    stats: Arc<ScanStats>,
}

impl BulkScanner {
    pub fn new(suite: Suite) -> Self {
        Self {
            suite,
            client: None,
            history: None,
            pause: DEFAULT_BULK_PAUSE,
            stats: Arc::new(ScanStats::new()),
        }
    }

    /// Scanner with the configured own domain and pause.
    pub fn from_config(config: &Config) -> Self {
        Self::new(Suite::with_own_domain(&config.own_domain)).with_pause(config.bulk_pause)
    }

    /// Enables fetching for items that have a URL but no content.
    pub fn with_client(mut self, client: Arc<reqwest::Client>) -> Self {
        self.client = Some(client);
        self
    }

    /// Computes trends against, and records scores into, `history`.
    pub fn with_history(mut self, history: ScanHistory) -> Self {
        self.history = Some(history);
        self
    }

    pub fn with_pause(mut self, pause: Duration) -> Self {
        self.pause = pause;
        self
    }

    pub fn stats(&self) -> Arc<ScanStats> {
        Arc::clone(&self.stats)
    }

    /// Scans `articles` in order.
    ///
    /// Returns one result per scanned item. When `cancel` fires, the items not yet
    /// started are skipped and the results so far are returned.
    pub async fn run(&self, articles: &[Article], cancel: &CancellationToken) -> Vec<BulkResult> {
        let start_time = Instant::now();
        let mut results = Vec::with_capacity(articles.len());

        for (index, article) in articles.iter().enumerate() {
            if cancel.is_cancelled() {
                info!(
                    "Bulk scan cancelled after {} of {} items",
                    index,
                    articles.len()
                );
                break;
            }

            let result = match self.scan_item(article, articles).await {
                Ok(result) => {
                    self.stats.record_success();
                    result
                }
                Err(e) => {
                    let failure = if article.content.is_empty() && article.url.is_empty() {
                        ScanFailure::MissingInput
                    } else {
                        extract_failure_kind(&e)
                    };
                    self.stats.increment_failure(failure);
                    warn!("Failed to scan {}: {:#}", item_key(article), e);
                    BulkResult::failed(
                        article,
                        sanitize_and_truncate_error_message(&format!("{:#}", e)),
                    )
                }
            };
            info!(
                "[{}/{}] {} scored {} ({})",
                index + 1,
                articles.len(),
                result.key,
                result.score,
                result.grade
            );
            results.push(result);

            if index + 1 < articles.len() && !self.pause.is_zero() {
                tokio::select! {
                    _ = tokio::time::sleep(self.pause) => {}
                    _ = cancel.cancelled() => {}
                }
            }
        }

        info!(
            "Scanned {} items in {:.2} seconds",
            results.len(),
            start_time.elapsed().as_secs_f64()
        );
        self.stats.log_summary();
        results
    }

    async fn scan_item(&self, article: &Article, all_articles: &[Article]) -> Result<BulkResult> {
        let report = if !article.content.is_empty() {
            let html = wrap_content(&article.title, &article.content);
            self.suite.analyze(article, Some(&html), all_articles)
        } else if !article.url.is_empty() {
            let client = self
                .client
                .as_ref()
                .context("Item has no content and fetching is disabled")?;
            let page = fetch_html(client, &article.url)
                .await
                .with_context(|| format!("Failed to fetch {}", article.url))?;
            let fetched = Article {
                url: page.final_url,
                content: page.html,
                ..article.clone()
            };
            self.suite
                .analyze(&fetched, Some(&fetched.content), all_articles)
        } else {
            anyhow::bail!("Item has neither content nor a URL");
        };

        let trend = self.record_history(article, &report).await;
        Ok(summarize(article, item_key(article), trend, &report))
    }

    /// Reads the trend under the slug, or the URL when there is no slug. Only
    /// items with a slug are written back.
    async fn record_history(&self, article: &Article, report: &OverallReport) -> i32 {
        let Some(history) = &self.history else {
            return 0;
        };
        let key = item_key(article);

        let trend = match history.trend(key, report.overall_score).await {
            Ok(trend) => trend,
            Err(e) => {
                warn!("Failed to read history for {key}: {e}");
                0
            }
        };

        if article.slug.is_empty() {
            debug!("Not recording history for {key}: item has no slug");
            return trend;
        }

        let details = json!({
            "pseo": report.pseo.as_ref().map(|r| r.score),
            "aeo": report.aeo.as_ref().map(|r| r.score),
            "geo": report.geo.as_ref().map(|r| r.score),
        });
        if let Err(e) = history.add_scan(key, report.overall_score, details).await {
            warn!("Failed to record history for {key}: {e}");
            self.stats.increment_failure(ScanFailure::HistoryWrite);
        }
        trend
    }
}

fn summarize(article: &Article, key: &str, trend: i32, report: &OverallReport) -> BulkResult {
    let warning = report.traditional.as_ref().map_or(0, |r| r.summary.warning)
        + report.pseo.as_ref().map_or(0, |r| r.summary.warning)
        + report.aeo.as_ref().map_or(0, |r| r.summary.warning)
        + report.geo.as_ref().map_or(0, |r| r.summary.warning);

    BulkResult {
        key: key.to_string(),
        title: article.title.clone(),
        url: article.url.clone(),
        score: report.overall_score,
        grade: report.overall_grade,
        trend,
        pseo: report.pseo.as_ref().map_or(0, |r| r.score),
        aeo: report.aeo.as_ref().map_or(0, |r| r.score),
        geo: report.geo.as_ref().map_or(0, |r| r.score),
        critical: report.traditional.as_ref().map_or(0, |r| r.summary.critical),
        warning,
        error: None,
    }
}

#[cfg(test)]
mod tests {
    include!("tests.rs");
}
