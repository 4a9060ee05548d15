//! Programmatic SEO analyzer.
//!
//! Judges whether an article fits a repeatable template: title and heading
//! patterns, metadata completeness, taxonomy and slug hygiene. When the rest of
//! the catalogue is supplied, title consistency and category balance are judged
//! across all articles.

use regex::Regex;
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::LazyLock;

use crate::config::DEFAULT_OWN_DOMAIN;
use crate::models::Article;
use crate::scoring::{Analyzer, Category, Report, ReportType, ScoringProfile, Severity};
use crate::utils::compile_regex_unsafe;
use crate::utils::text::{char_len, raw_token_count};

/// Check categories of the PSEO analyzer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PseoCategory {
    #[serde(rename = "Template Consistency")]
    Template,
    #[serde(rename = "Automation Quality")]
    Automation,
    Scalability,
    #[serde(rename = "Taxonomy Health")]
    Taxonomy,
    #[serde(rename = "Internal Linking Matrix")]
    Linking,
}

impl Category for PseoCategory {
    fn label(&self) -> &'static str {
        match self {
            PseoCategory::Template => "Template Consistency",
            PseoCategory::Automation => "Automation Quality",
            PseoCategory::Scalability => "Scalability",
            PseoCategory::Taxonomy => "Taxonomy Health",
            PseoCategory::Linking => "Internal Linking Matrix",
        }
    }
}

/// Title shapes recognized as templates, tried in order.
static TITLE_TEMPLATES: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    [
        ("Topic: Subtitle", r"^(.+):\s*(.+)$"),
        ("Topic - Subtitle", r"^(.+)\s*-\s*(.+)$"),
        ("How to ...", r"(?i)^How to\s+(.+)"),
        ("What is ...", r"(?i)^What is\s+(.+)"),
        ("... Guide", r"(?i)^(.+)\s+Guide(\s|$)"),
        ("Complete ...", r"(?i)^Complete\s+(.+)"),
        ("... Tutorial", r"(?i)^(.+)\s+Tutorial(\s|$)"),
    ]
    .into_iter()
    .map(|(name, pattern)| (name, compile_regex_unsafe(pattern, "TITLE_TEMPLATES")))
    .collect()
});

static SUBHEADING_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile_regex_unsafe(r"(?i)<h[2-3][^>]*>([^<]+)</h[2-3]>", "SUBHEADING_RE")
});
static HOW_TO_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(r"(?i)^how to", "HOW_TO_PREFIX_RE"));
static GUIDE_RE: LazyLock<Regex> = LazyLock::new(|| compile_regex_unsafe(r"(?i)guide", "GUIDE_RE"));
static ANCHOR_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile_regex_unsafe(r#"(?i)<a[^>]+href=["'][^"']*["'][^>]*>"#, "ANCHOR_TAG_RE")
});
static SLUG_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(r"^[a-z0-9-]+$", "SLUG_RE"));

/// Limits used by the PSEO checks.
#[derive(Debug, Clone, PartialEq)]
pub struct Thresholds {
    pub min_subheadings: usize,
    /// Share of titles sharing one pattern for a Good consistency result.
    pub strong_title_consistency: f64,
    pub moderate_title_consistency: f64,
    /// Category share (percent) above which the category is too broad.
    pub max_category_share: f64,
    pub min_tags: usize,
    pub max_tags: usize,
    pub min_internal_links: usize,
    pub slug_min_chars: usize,
    pub slug_max_chars: usize,
    pub min_words: usize,
    pub min_excerpt_chars: usize,
    pub min_title_chars: usize,
    pub min_pattern_excerpt_chars: usize,
    /// Quality signals (of 4) for a Good automation result.
    pub high_automation_quality: usize,
    /// Quality signals for an Info automation result; fewer is a Warning.
    pub moderate_automation_quality: usize,
    /// Scalability patterns (of 5) for an Info result; fewer is a Warning.
    pub partial_scalability_patterns: usize,
    /// Links mentioning this domain count as internal.
    pub own_domain: String,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            min_subheadings: 3,
            strong_title_consistency: 0.6,
            moderate_title_consistency: 0.3,
            max_category_share: 50.0,
            min_tags: 3,
            max_tags: 10,
            min_internal_links: 2,
            slug_min_chars: 10,
            slug_max_chars: 60,
            min_words: 500,
            min_excerpt_chars: 50,
            min_title_chars: 20,
            min_pattern_excerpt_chars: 20,
            high_automation_quality: 4,
            moderate_automation_quality: 2,
            partial_scalability_patterns: 3,
            own_domain: DEFAULT_OWN_DOMAIN.to_string(),
        }
    }
}

/// Analyzer for programmatic SEO readiness.
#[derive(Debug, Clone, Default)]
pub struct PseoAnalyzer {
    thresholds: Thresholds,
}

impl PseoAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_thresholds(thresholds: Thresholds) -> Self {
        Self { thresholds }
    }

    /// Analyzes one article; `all_articles` enables the cross-article checks.
    pub fn analyze(&self, article: &Article, all_articles: &[Article]) -> Report<PseoCategory> {
        let mut run = PseoRun {
            article,
            all_articles,
            thresholds: &self.thresholds,
            analyzer: Analyzer::new(ReportType::Pseo, ScoringProfile::PSEO),
        };

        run.check_template_consistency();
        run.check_title_pattern();
        run.check_content_structure();
        run.check_metadata_completeness();
        run.check_category_taxonomy();
        run.check_tag_usage();
        run.check_internal_linking();
        run.check_url_templating();
        run.check_content_automation_quality();
        run.check_scalability_patterns();

        run.analyzer.finish(None)
    }
}

struct PseoRun<'a> {
    article: &'a Article,
    all_articles: &'a [Article],
    thresholds: &'a Thresholds,
    analyzer: Analyzer<PseoCategory>,
}

impl PseoRun<'_> {
    fn add(
        &mut self,
        name: &str,
        category: PseoCategory,
        severity: Severity,
        message: impl Into<String>,
        recommendation: Option<&str>,
        details: Option<Value>,
    ) {
        self.analyzer
            .add_check(name, category, severity, message, recommendation, details);
    }

    fn check_template_consistency(&mut self) {
        let title = self.article.title.clone();
        let matched = TITLE_TEMPLATES
            .iter()
            .find(|(_, pattern)| pattern.is_match(&title));

        match matched {
            Some((name, pattern)) => self.add(
                "Title Template",
                PseoCategory::Template,
                Severity::Good,
                "Title follows a recognizable template pattern",
                None,
                Some(json!({ "template": name, "pattern": pattern.as_str(), "title": title })),
            ),
            None => self.add(
                "Title Template",
                PseoCategory::Template,
                Severity::Info,
                "Title doesn't follow common template patterns",
                Some("Consider using consistent title patterns for scalability"),
                Some(json!({ "title": title })),
            ),
        }

        let headings = SUBHEADING_RE.find_iter(&self.article.content).count();
        if headings >= self.thresholds.min_subheadings {
            self.add(
                "Heading Structure",
                PseoCategory::Template,
                Severity::Good,
                format!("Consistent heading structure ({} subheadings)", headings),
                None,
                Some(json!({ "count": headings })),
            );
        } else if headings > 0 {
            self.add(
                "Heading Structure",
                PseoCategory::Template,
                Severity::Warning,
                format!("Only {} subheading(s) found", headings),
                Some("Add more structured subheadings for better PSEO"),
                Some(json!({ "count": headings })),
            );
        } else {
            self.add(
                "Heading Structure",
                PseoCategory::Template,
                Severity::Warning,
                "No subheadings found in content",
                Some("Add H2/H3 headings to structure content"),
                None,
            );
        }
    }

    /// Only runs with at least two articles to compare.
    fn check_title_pattern(&mut self) {
        if self.all_articles.len() < 2 {
            return;
        }

        let titles: Vec<&str> = self.all_articles.iter().map(|a| a.title.as_str()).collect();
        let colon = titles.iter().filter(|t| t.contains(':')).count();
        let dash = titles.iter().filter(|t| t.contains(" - ")).count();
        let how_to = titles.iter().filter(|t| HOW_TO_PREFIX_RE.is_match(t)).count();
        let guide = titles.iter().filter(|t| GUIDE_RE.is_match(t)).count();

        let best = colon.max(dash).max(how_to).max(guide);
        let consistency = best as f64 / titles.len() as f64;
        let percent = (consistency * 100.0).round() as u64;
        let details = Some(json!({
            "patterns": {
                "colonPattern": colon,
                "dashPattern": dash,
                "howToPattern": how_to,
                "guidePattern": guide,
            }
        }));

        if consistency >= self.thresholds.strong_title_consistency {
            self.add(
                "Cross-Article Title Consistency",
                PseoCategory::Template,
                Severity::Good,
                format!("High title pattern consistency ({}%)", percent),
                None,
                details,
            );
        } else if consistency >= self.thresholds.moderate_title_consistency {
            self.add(
                "Cross-Article Title Consistency",
                PseoCategory::Template,
                Severity::Info,
                format!("Moderate title pattern consistency ({}%)", percent),
                Some("Consider standardizing title formats for PSEO"),
                details,
            );
        } else {
            self.add(
                "Cross-Article Title Consistency",
                PseoCategory::Template,
                Severity::Warning,
                "Low title pattern consistency",
                Some(r#"Standardize titles (e.g., "Topic: Complete Guide 2025")"#),
                details,
            );
        }
    }

    fn check_content_structure(&mut self) {
        let content = &self.article.content;
        let has_code_blocks = content.contains("<pre") || content.contains("<code");
        let has_lists = content.contains("<ul") || content.contains("<ol");
        let has_tables = content.contains("<table");
        let has_blockquotes = content.contains("<blockquote");

        let present = [has_code_blocks, has_lists, has_tables, has_blockquotes]
            .into_iter()
            .filter(|p| *p)
            .count();
        let details = json!({
            "hasCodeBlocks": has_code_blocks,
            "hasLists": has_lists,
            "hasTables": has_tables,
            "hasBlockquotes": has_blockquotes,
        });

        match present {
            0 => self.add(
                "Content Structure Variety",
                PseoCategory::Template,
                Severity::Warning,
                "No structured content elements found",
                Some("Add lists, tables, or code blocks for better engagement"),
                None,
            ),
            1 => self.add(
                "Content Structure Variety",
                PseoCategory::Template,
                Severity::Info,
                "Limited content structure variety",
                Some("Add more structured elements (lists, tables, code blocks)"),
                Some(details),
            ),
            n => self.add(
                "Content Structure Variety",
                PseoCategory::Template,
                Severity::Good,
                format!("Rich content structure ({} element types)", n),
                None,
                Some(details),
            ),
        }
    }

    fn check_metadata_completeness(&mut self) {
        let article = self.article;
        let missing_required: Vec<&str> = [
            ("title", article.title.is_empty()),
            ("excerpt", article.excerpt.is_empty()),
            ("category", article.category.is_empty()),
            ("slug", article.slug.is_empty()),
        ]
        .into_iter()
        .filter_map(|(field, missing)| missing.then_some(field))
        .collect();

        let optional = [
            ("tags", article.tags.is_none()),
            (
                "featuredImage",
                article.featured_image.as_deref().unwrap_or_default().is_empty(),
            ),
            (
                "readTime",
                article.read_time.as_deref().unwrap_or_default().is_empty(),
            ),
        ];
        let missing_optional: Vec<&str> = optional
            .iter()
            .filter_map(|(field, missing)| missing.then_some(*field))
            .collect();

        if missing_required.is_empty() {
            self.add(
                "Required Metadata",
                PseoCategory::Automation,
                Severity::Good,
                "All required metadata present",
                None,
                None,
            );
        } else {
            self.add(
                "Required Metadata",
                PseoCategory::Automation,
                Severity::Critical,
                format!("Missing required fields: {}", missing_required.join(", ")),
                Some("Ensure all required metadata is populated"),
                Some(json!({ "missing": missing_required })),
            );
        }

        // Nothing is reported when every optional field is missing.
        if missing_optional.is_empty() {
            self.add(
                "Optional Metadata",
                PseoCategory::Automation,
                Severity::Good,
                "All optional metadata present",
                None,
                None,
            );
        } else if missing_optional.len() < optional.len() {
            self.add(
                "Optional Metadata",
                PseoCategory::Automation,
                Severity::Info,
                format!("Missing optional fields: {}", missing_optional.join(", ")),
                Some("Add optional metadata for better automation"),
                Some(json!({ "missing": missing_optional })),
            );
        }
    }

    fn check_category_taxonomy(&mut self) {
        let category = self.article.category.clone();
        if category.is_empty() {
            self.add(
                "Category Assignment",
                PseoCategory::Taxonomy,
                Severity::Warning,
                "No category assigned",
                Some("Assign a category for proper content organization"),
                None,
            );
            return;
        }

        if self.all_articles.is_empty() {
            self.add(
                "Category Assignment",
                PseoCategory::Taxonomy,
                Severity::Good,
                format!("Category assigned: {}", category),
                None,
                Some(json!({ "category": category })),
            );
            return;
        }

        let same = self
            .all_articles
            .iter()
            .filter(|a| a.category == category)
            .count();
        let percentage = same as f64 / self.all_articles.len() as f64 * 100.0;

        if percentage > self.thresholds.max_category_share {
            self.add(
                "Category Distribution",
                PseoCategory::Taxonomy,
                Severity::Info,
                format!(
                    "Category \"{}\" has {}% of articles",
                    category,
                    percentage.round() as u64
                ),
                Some("Consider creating more specific subcategories"),
                Some(json!({
                    "category": category,
                    "articleCount": same,
                    "percentage": percentage,
                })),
            );
        } else {
            self.add(
                "Category Distribution",
                PseoCategory::Taxonomy,
                Severity::Good,
                format!("Category \"{}\" well-balanced", category),
                None,
                Some(json!({ "category": category })),
            );
        }
    }

    fn check_tag_usage(&mut self) {
        let article = self.article;
        let tags = article.tag_names();
        let count = tags.len();
        let details = Some(json!({ "tags": tags }));

        if count == 0 {
            self.add(
                "Tag Usage",
                PseoCategory::Taxonomy,
                Severity::Warning,
                "No tags assigned",
                Some("Add 3-7 relevant tags for better discoverability"),
                None,
            );
        } else if count < self.thresholds.min_tags {
            self.add(
                "Tag Usage",
                PseoCategory::Taxonomy,
                Severity::Info,
                format!("Only {} tag(s) assigned", count),
                Some("Consider adding more tags (aim for 3-7)"),
                details,
            );
        } else if count > self.thresholds.max_tags {
            self.add(
                "Tag Usage",
                PseoCategory::Taxonomy,
                Severity::Warning,
                format!("Too many tags ({})", count),
                Some("Reduce to 7 or fewer focused tags"),
                details,
            );
        } else {
            self.add(
                "Tag Usage",
                PseoCategory::Taxonomy,
                Severity::Good,
                format!("Good tag count ({} tags)", count),
                None,
                details,
            );
        }
    }

    fn check_internal_linking(&mut self) {
        let (article, thresholds) = (self.article, self.thresholds);
        let own_domain = thresholds.own_domain.as_str();
        let count = ANCHOR_TAG_RE
            .find_iter(&article.content)
            .map(|m| m.as_str())
            .filter(|tag| {
                (!own_domain.is_empty() && tag.contains(own_domain))
                    || (tag.contains("href=\"/") && !tag.contains("href=\"//"))
                    || tag.contains("href=\"./")
            })
            .count();
        let details = Some(json!({ "count": count }));

        if count == 0 {
            self.add(
                "Internal Links in Content",
                PseoCategory::Linking,
                Severity::Warning,
                "No internal links found in content",
                Some("Add 2-5 internal links to related articles"),
                details,
            );
        } else if count < self.thresholds.min_internal_links {
            self.add(
                "Internal Links in Content",
                PseoCategory::Linking,
                Severity::Info,
                format!("Only {} internal link(s)", count),
                Some("Add more internal links (aim for 2-5 per article)"),
                details,
            );
        } else {
            self.add(
                "Internal Links in Content",
                PseoCategory::Linking,
                Severity::Good,
                format!("Good internal linking ({} links)", count),
                None,
                details,
            );
        }
    }

    fn check_url_templating(&mut self) {
        let slug = self.article.slug.clone();
        let has_hyphens = slug.contains('-');
        let is_lowercase = slug == slug.to_lowercase();
        let length = char_len(&slug);
        let good_length =
            length >= self.thresholds.slug_min_chars && length <= self.thresholds.slug_max_chars;

        if has_hyphens && is_lowercase && good_length {
            self.add(
                "URL Template",
                PseoCategory::Scalability,
                Severity::Good,
                "URL follows good templating practices",
                None,
                Some(json!({ "slug": slug })),
            );
            return;
        }

        let mut issues = Vec::new();
        if !has_hyphens {
            issues.push("use hyphens");
        }
        if !is_lowercase {
            issues.push("use lowercase");
        }
        if !good_length {
            issues.push("adjust length (10-60 chars)");
        }
        let recommendation = issues.join(", ");
        self.add(
            "URL Template",
            PseoCategory::Scalability,
            Severity::Info,
            "URL could be improved",
            Some(recommendation.as_str()),
            Some(json!({ "slug": slug, "issues": issues })),
        );
    }

    fn check_content_automation_quality(&mut self) {
        let article = self.article;
        let word_count = raw_token_count(&article.content);
        let has_excerpt = char_len(&article.excerpt) > self.thresholds.min_excerpt_chars;
        let has_images = article.content.contains("<img");
        let long_title = char_len(&article.title) >= self.thresholds.min_title_chars;

        let quality = [
            word_count >= self.thresholds.min_words,
            has_excerpt,
            has_images,
            long_title,
        ]
        .into_iter()
        .filter(|q| *q)
        .count();
        let details = Some(json!({
            "wordCount": word_count,
            "hasExcerpt": has_excerpt,
            "hasImages": has_images,
        }));

        if quality >= self.thresholds.high_automation_quality {
            self.add(
                "Content Automation Quality",
                PseoCategory::Automation,
                Severity::Good,
                "High-quality automated content",
                None,
                details,
            );
        } else if quality >= self.thresholds.moderate_automation_quality {
            self.add(
                "Content Automation Quality",
                PseoCategory::Automation,
                Severity::Info,
                "Moderate automation quality",
                Some("Improve content completeness"),
                details,
            );
        } else {
            self.add(
                "Content Automation Quality",
                PseoCategory::Automation,
                Severity::Warning,
                "Low automation quality detected",
                Some("Ensure complete content generation"),
                details,
            );
        }
    }

    fn check_scalability_patterns(&mut self) {
        let article = self.article;
        let patterns = [
            ("hasConsistentSlug", SLUG_RE.is_match(&article.slug)),
            ("hasCategory", !article.category.is_empty()),
            ("hasTags", !article.tag_names().is_empty()),
            (
                "hasExcerpt",
                char_len(&article.excerpt) > self.thresholds.min_pattern_excerpt_chars,
            ),
            ("hasDate", article.any_date().is_some()),
        ];
        let followed = patterns.iter().filter(|(_, ok)| *ok).count();
        let total = patterns.len();
        let details = Some(json!({
            "patterns": patterns
                .iter()
                .map(|(name, ok)| (name.to_string(), Value::Bool(*ok)))
                .collect::<serde_json::Map<_, _>>()
        }));

        if followed == total {
            self.add(
                "Scalability Patterns",
                PseoCategory::Scalability,
                Severity::Good,
                "Article follows all scalable patterns",
                None,
                details,
            );
        } else if followed >= self.thresholds.partial_scalability_patterns {
            self.add(
                "Scalability Patterns",
                PseoCategory::Scalability,
                Severity::Info,
                format!("{}/{} scalable patterns followed", followed, total),
                Some("Complete all patterns for better PSEO"),
                details,
            );
        } else {
            self.add(
                "Scalability Patterns",
                PseoCategory::Scalability,
                Severity::Warning,
                "Low scalability score",
                Some("Implement consistent content patterns"),
                details,
            );
        }
    }
}
