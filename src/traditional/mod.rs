//! Traditional on-page SEO scanner.
//!
//! Runs a fixed sequence of checks against a parsed HTML document and the URL it
//! was served from. Missing elements become checks, never errors, and an
//! unparseable URL only degrades the link and URL checks.
//!
//! Checks are grouped by concern:
//! - `meta`: title, description, robots, keywords
//! - `structure`: headings, URL shape, keywords in URL
//! - `links`: internal/external counts, anchor text
//! - `images`: alt text and legacy formats
//! - `social`: Open Graph, Twitter cards, share image
//! - `technical`: schema, canonical, viewport, HTTPS, encoding, language, accessibility
//! - `content`: length, readability, freshness, duplication
//! - `performance`: lazy loading, page size, resource count

mod content;
mod images;
mod links;
mod meta;
mod performance;
mod social;
mod structure;
mod technical;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::dom::{HtmlDocument, ParsedDocument};
use crate::scoring::{Analyzer, Category, Report, ReportType, ScoringProfile, Severity};

/// Check categories of the traditional scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TraditionalCategory {
    #[serde(rename = "Meta Tags")]
    Meta,
    Content,
    Structure,
    Links,
    Images,
    Technical,
    Social,
    Performance,
}

impl Category for TraditionalCategory {
    fn label(&self) -> &'static str {
        match self {
            TraditionalCategory::Meta => "Meta Tags",
            TraditionalCategory::Content => "Content",
            TraditionalCategory::Structure => "Structure",
            TraditionalCategory::Links => "Links",
            TraditionalCategory::Images => "Images",
            TraditionalCategory::Technical => "Technical",
            TraditionalCategory::Social => "Social",
            TraditionalCategory::Performance => "Performance",
        }
    }
}

/// Numeric limits used by the traditional checks.
#[derive(Debug, Clone, PartialEq)]
pub struct Thresholds {
    pub title_min_chars: usize,
    pub title_max_chars: usize,
    pub description_min_chars: usize,
    pub description_max_chars: usize,
    /// H1 texts are cut to this many chars in details.
    pub h1_detail_chars: usize,
    pub heading_detail_chars: usize,
    pub min_internal_links: usize,
    pub max_url_chars: usize,
    pub thin_content_words: usize,
    pub comprehensive_content_words: usize,
    pub max_avg_sentence_words: f64,
    /// Image count above which missing lazy loading is reported.
    pub lazy_loading_min_images: usize,
    pub social_image_min_width: u32,
    pub social_image_min_height: u32,
    pub stale_after_days: f64,
    pub max_page_size_kb: usize,
    pub max_scripts: usize,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            title_min_chars: 30,
            title_max_chars: 60,
            description_min_chars: 120,
            description_max_chars: 160,
            h1_detail_chars: 100,
            heading_detail_chars: 50,
            min_internal_links: 3,
            max_url_chars: 100,
            thin_content_words: 300,
            comprehensive_content_words: 1000,
            max_avg_sentence_words: 25.0,
            lazy_loading_min_images: 3,
            social_image_min_width: 1200,
            social_image_min_height: 630,
            stale_after_days: 365.0,
            max_page_size_kb: 500,
            max_scripts: 15,
        }
    }
}

/// Scanner for traditional on-page SEO.
///
/// # Examples
///
/// ```
/// use seo_suite::TraditionalScanner;
///
/// let report = TraditionalScanner::new().analyze(
///     "https://example.com/post",
///     "<html><head><title>Short</title></head><body></body></html>",
/// );
/// assert!(report.score <= 30);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TraditionalScanner {
    thresholds: Thresholds,
    clock: Option<DateTime<Utc>>,
}

impl TraditionalScanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_thresholds(thresholds: Thresholds) -> Self {
        Self {
            thresholds,
            clock: None,
        }
    }

    /// Pins "now" for the content freshness check.
    pub fn at(mut self, now: DateTime<Utc>) -> Self {
        self.clock = Some(now);
        self
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    /// Parses `html` and scans it.
    pub fn analyze(&self, url: &str, html: &str) -> Report<TraditionalCategory> {
        let document = ParsedDocument::parse(html);
        self.analyze_document(url, &document)
    }

    /// Scans an already-parsed document.
    pub fn analyze_document(
        &self,
        url: &str,
        doc: &dyn HtmlDocument,
    ) -> Report<TraditionalCategory> {
        let now = self.clock.unwrap_or_else(Utc::now);
        let mut ctx = ScanContext::new(url, doc, &self.thresholds, now);

        meta::check_title_tag(&mut ctx);
        meta::check_meta_description(&mut ctx);
        structure::check_h1_structure(&mut ctx);
        structure::check_heading_hierarchy(&mut ctx);
        links::check_internal_links(&mut ctx);
        links::check_external_links(&mut ctx);
        images::check_image_optimization(&mut ctx);
        technical::check_schema_markup(&mut ctx);
        social::check_open_graph_tags(&mut ctx);
        social::check_twitter_cards(&mut ctx);
        technical::check_canonical_url(&mut ctx);
        meta::check_robots_meta(&mut ctx);
        technical::check_viewport(&mut ctx);
        technical::check_ssl(&mut ctx);
        structure::check_url_structure(&mut ctx);
        content::check_content_analysis(&mut ctx);
        technical::check_accessibility(&mut ctx);
        technical::check_hreflang(&mut ctx);
        technical::check_favicon(&mut ctx);
        performance::check_lazy_loading(&mut ctx);
        technical::check_doctype(&mut ctx);
        technical::check_char_encoding(&mut ctx);
        structure::check_keywords_in_url(&mut ctx);
        social::check_social_image_size(&mut ctx);
        content::check_content_freshness(&mut ctx);
        technical::check_language_attribute(&mut ctx);
        meta::check_meta_keywords(&mut ctx);
        performance::check_page_size(&mut ctx);
        links::check_link_anchors(&mut ctx);
        content::check_duplicate_content(&mut ctx);

        ctx.analyzer.finish(Some(url.to_string()))
    }
}

/// State shared by the check functions during one scan.
struct ScanContext<'a> {
    url: &'a str,
    /// `None` when the URL does not parse.
    base: Option<Url>,
    host: String,
    doc: &'a dyn HtmlDocument,
    thresholds: &'a Thresholds,
    now: DateTime<Utc>,
    analyzer: Analyzer<TraditionalCategory>,
}

impl<'a> ScanContext<'a> {
    fn new(
        url: &'a str,
        doc: &'a dyn HtmlDocument,
        thresholds: &'a Thresholds,
        now: DateTime<Utc>,
    ) -> Self {
        let base = match Url::parse(url) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                log::debug!("Scanning with unparseable URL '{}': {}", url, e);
                None
            }
        };
        let host = base
            .as_ref()
            .and_then(|u| u.host_str())
            .unwrap_or_default()
            .to_string();

        Self {
            url,
            base,
            host,
            doc,
            thresholds,
            now,
            analyzer: Analyzer::new(ReportType::Traditional, ScoringProfile::TRADITIONAL),
        }
    }

    fn add(
        &mut self,
        name: &str,
        category: TraditionalCategory,
        severity: Severity,
        message: impl Into<String>,
        recommendation: Option<&str>,
        details: Option<Value>,
    ) {
        self.analyzer
            .add_check(name, category, severity, message, recommendation, details);
    }

    /// Non-empty `content` attribute of the first match.
    fn meta_content(&self, selector: &str) -> Option<String> {
        self.doc
            .query_selector(selector)
            .and_then(|el| el.attr("content").map(str::to_string))
            .filter(|c| !c.is_empty())
    }

    /// Trimmed text of the first match, if any element matches.
    fn trimmed_text(&self, selector: &str) -> Option<String> {
        self.doc
            .query_selector(selector)
            .map(|el| el.text().trim().to_string())
    }
}
