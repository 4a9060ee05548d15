//! Generative engine optimization.
//!
//! Scores how easily an AI system can read, trust and cite an article. The first
//! group of checks looks at structure, schema, entities and authority; the
//! [`citation`] group looks at the signals answer engines quote directly:
//! summaries, tables, statistics, dates, short answers and outbound sources.

mod citation;

use regex::Regex;
use serde::Serialize;
use serde_json::json;
use std::borrow::Cow;
use std::sync::LazyLock;

use crate::config::DEFAULT_OWN_DOMAIN;
use crate::models::Article;
use crate::scoring::{Analyzer, Category, Report, ReportType, ScoringProfile, Severity};
use crate::utils::compile_regex_unsafe;
use crate::utils::text::{char_len, raw_token_count};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum GeoCategory {
    #[serde(rename = "AI Readability")]
    AiReadability,
    #[serde(rename = "Structured Data")]
    StructuredData,
    #[serde(rename = "Entity Optimization")]
    Entities,
    #[serde(rename = "Semantic HTML")]
    Semantic,
    #[serde(rename = "Topic Authority")]
    Authority,
}

impl Category for GeoCategory {
    fn label(&self) -> &'static str {
        match self {
            GeoCategory::AiReadability => "AI Readability",
            GeoCategory::StructuredData => "Structured Data",
            GeoCategory::Entities => "Entity Optimization",
            GeoCategory::Semantic => "Semantic HTML",
            GeoCategory::Authority => "Topic Authority",
        }
    }
}

/// Limits used by the GEO checks.
#[derive(Debug, Clone, PartialEq)]
pub struct Thresholds {
    pub rich_entity_count: usize,
    pub moderate_entity_count: usize,
    /// Sentences between 10 and 200 chars needed for the clear-sentences signal.
    pub min_clear_sentences: usize,
    pub min_semantic_elements: usize,
    /// Word count that counts as an authority signal.
    pub authority_words: usize,
    pub comprehensive_words: usize,
    pub comprehensive_headings: usize,
    pub moderate_depth_words: usize,
    pub min_definitions: usize,
    pub highly_citable_stats: usize,
    pub some_stats: usize,
    /// Inclusive word range for the first direct answer.
    pub min_answer_words: usize,
    pub max_answer_words: usize,
    pub authority_citations: usize,
    /// Links to this domain are not counted as source citations.
    pub own_domain: String,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            rich_entity_count: 10,
            moderate_entity_count: 3,
            min_clear_sentences: 5,
            min_semantic_elements: 3,
            authority_words: 1000,
            comprehensive_words: 1500,
            comprehensive_headings: 5,
            moderate_depth_words: 800,
            min_definitions: 3,
            highly_citable_stats: 5,
            some_stats: 2,
            min_answer_words: 40,
            max_answer_words: 80,
            authority_citations: 3,
            own_domain: DEFAULT_OWN_DOMAIN.to_string(),
        }
    }
}

static HEADING_OPEN_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(r"(?i)<h[2-6]", "HEADING_OPEN_RE"));
static LIST_OPEN_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(r"(?i)<[ou]l", "LIST_OPEN_RE"));
static PARAGRAPH_OPEN_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(r"(?i)<p", "PARAGRAPH_OPEN_RE"));
static CODE_OPEN_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(r"(?i)<pre|<code", "CODE_OPEN_RE"));
static SENTENCE_BREAK_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(r"[.!?]", "SENTENCE_BREAK_RE"));

static SCHEMA_TYPES: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    [
        ("Article", r#"(?i)"@type"\s*:\s*"Article""#),
        ("FAQPage", r"(?i)FAQPage"),
        ("HowTo", r#"(?i)"@type"\s*:\s*"HowTo""#),
        ("BreadcrumbList", r"(?i)BreadcrumbList"),
        ("Organization", r#"(?i)"@type"\s*:\s*"Organization""#),
    ]
    .into_iter()
    .map(|(kind, pattern)| (kind, compile_regex_unsafe(pattern, "SCHEMA_TYPES")))
    .collect()
});

static PROPER_NOUN_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile_regex_unsafe(r"\b[A-Z][a-z]+(?:\s+[A-Z][a-z]+)+\b", "PROPER_NOUN_RE")
});
static TECH_ENTITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile_regex_unsafe(
        r"(?i)\b(?:Snowflake|AWS|Azure|Python|SQL|dbt|Airflow|Databricks|Kafka|Spark)\b",
        "TECH_ENTITY_RE",
    )
});

const SEMANTIC_ELEMENTS: [&str; 7] = [
    "article", "section", "header", "nav", "main", "aside", "figure",
];

static EXPERT_SIGNAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile_regex_unsafe(
        r"(?i)expert|professional|years of experience|guide|complete|comprehensive",
        "EXPERT_SIGNAL_RE",
    )
});
static DATA_SIGNAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile_regex_unsafe(
        r"(?i)according to|research|study|statistics|data shows|benchmark",
        "DATA_SIGNAL_RE",
    )
});

static STAT_MENTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile_regex_unsafe(r"(?i)\d+%|\d+\s*(million|billion|thousand)", "STAT_MENTION_RE")
});
static QUOTE_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(r#"(?i)<blockquote|"[^"]{20,}""#, "QUOTE_RE"));
static INSIGHT_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile_regex_unsafe(
        r"(?i)however|in contrast|importantly|notably|surprisingly",
        "INSIGHT_RE",
    )
});
static CONCLUSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile_regex_unsafe(
        r"(?i)conclusion|summary|key takeaway|in summary",
        "CONCLUSION_RE",
    )
});
static DEFINITION_PHRASE_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile_regex_unsafe(
        r"(?i)(?:is defined as|refers to|means|is a|are)\s+",
        "DEFINITION_PHRASE_RE",
    )
});

/// Analyzer for generative-engine readiness of an article.
#[derive(Debug, Clone, Default)]
pub struct GeoAnalyzer {
    thresholds: Thresholds,
}

impl GeoAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_thresholds(thresholds: Thresholds) -> Self {
        Self { thresholds }
    }

    /// Default limits, with links to `own_domain` not counted as source citations.
    pub fn with_own_domain(own_domain: impl Into<String>) -> Self {
        Self::with_thresholds(Thresholds {
            own_domain: own_domain.into(),
            ..Thresholds::default()
        })
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    pub fn analyze(&self, article: &Article) -> Report<GeoCategory> {
        let mut analyzer = Analyzer::new(ReportType::Geo, ScoringProfile::GEO);
        let content = article.content.as_str();
        let markup = with_attached_schema(article);
        let limits = &self.thresholds;

        check_ai_readability(&mut analyzer, limits, content);
        check_structured_data(&mut analyzer, &markup);
        check_entity_density(&mut analyzer, limits, content);
        check_semantic_html(&mut analyzer, limits, content);
        check_topic_authority(&mut analyzer, limits, content, &article.title);
        check_citation_worthiness(&mut analyzer, content);
        check_comprehensiveness(&mut analyzer, limits, content);
        check_clear_definitions(&mut analyzer, limits, content);

        citation::check_tldr_summary(&mut analyzer, content);
        citation::check_data_tables(&mut analyzer, content);
        citation::check_statistics(&mut analyzer, limits, content);
        citation::check_freshness_signals(&mut analyzer, content, &markup);
        citation::check_answer_format(&mut analyzer, limits, content);
        citation::check_source_citations(&mut analyzer, limits, content);

        analyzer.finish(None)
    }
}

/// Content followed by the article's attached JSON-LD, if any.
fn with_attached_schema(article: &Article) -> Cow<'_, str> {
    match &article.schema {
        Some(schema) => Cow::Owned(format!("{}\n{}", article.content, schema)),
        None => Cow::Borrowed(article.content.as_str()),
    }
}

/// Number of proper-noun phrases plus known technology names.
pub fn entity_count(content: &str) -> usize {
    PROPER_NOUN_RE.find_iter(content).count() + TECH_ENTITY_RE.find_iter(content).count()
}

fn check_ai_readability(
    analyzer: &mut Analyzer<GeoCategory>,
    limits: &Thresholds,
    content: &str,
) {
    let clear_sentences = SENTENCE_BREAK_RE
        .split(content)
        .filter(|s| {
            let len = char_len(s.trim());
            len > 10 && len < 200
        })
        .count();
    let indicators = json!({
        "hasHeadings": HEADING_OPEN_RE.is_match(content),
        "hasLists": LIST_OPEN_RE.is_match(content),
        "hasParagraphs": PARAGRAPH_OPEN_RE.is_match(content),
        "hasCodeBlocks": CODE_OPEN_RE.is_match(content),
        "clearSentences": clear_sentences >= limits.min_clear_sentences,
    });
    let present = count_true(&indicators);

    let (severity, message, recommendation) = match present {
        0..=1 => (
            Severity::Warning,
            "Low AI readability",
            Some("Structure content with headings, lists, paragraphs"),
        ),
        2..=3 => (
            Severity::Info,
            "Moderate AI readability",
            Some("Add more structure (headings, lists)"),
        ),
        _ => (Severity::Good, "Content is AI-readable", None),
    };
    analyzer.add_check(
        "AI Readability",
        GeoCategory::AiReadability,
        severity,
        message,
        recommendation,
        Some(indicators),
    );
}

fn check_structured_data(analyzer: &mut Analyzer<GeoCategory>, markup: &str) {
    let types: Vec<&str> = SCHEMA_TYPES
        .iter()
        .filter(|(_, pattern)| pattern.is_match(markup))
        .map(|(kind, _)| *kind)
        .collect();

    match types.len() {
        0 => analyzer.add_check(
            "Structured Data",
            GeoCategory::StructuredData,
            Severity::Warning,
            "No schema markup detected",
            Some("Add JSON-LD structured data"),
            None,
        ),
        1 => analyzer.add_check(
            "Structured Data",
            GeoCategory::StructuredData,
            Severity::Info,
            format!("Schema found: {}", types[0]),
            Some("Add more schema types (FAQ, HowTo)"),
            Some(json!({ "schemaTypes": types })),
        ),
        _ => analyzer.add_check(
            "Structured Data",
            GeoCategory::StructuredData,
            Severity::Good,
            format!("Rich schema: {}", types.join(", ")),
            None,
            Some(json!({ "schemaTypes": types })),
        ),
    }
}

fn check_entity_density(
    analyzer: &mut Analyzer<GeoCategory>,
    limits: &Thresholds,
    content: &str,
) {
    let count = entity_count(content);

    if count >= limits.rich_entity_count {
        analyzer.add_check(
            "Entity Density",
            GeoCategory::Entities,
            Severity::Good,
            format!("Rich entity content ({}+ entities)", count),
            None,
            Some(json!({ "count": count })),
        );
    } else if count >= limits.moderate_entity_count {
        analyzer.add_check(
            "Entity Density",
            GeoCategory::Entities,
            Severity::Info,
            format!("Moderate entities ({})", count),
            Some("Reference more tools, brands, concepts"),
            Some(json!({ "count": count })),
        );
    } else {
        analyzer.add_check(
            "Entity Density",
            GeoCategory::Entities,
            Severity::Info,
            "Low entity density",
            Some("Add specific tools, technologies, brands"),
            None,
        );
    }
}

fn check_semantic_html(
    analyzer: &mut Analyzer<GeoCategory>,
    limits: &Thresholds,
    content: &str,
) {
    let lower = content.to_lowercase();
    let elements: serde_json::Map<String, serde_json::Value> = SEMANTIC_ELEMENTS
        .iter()
        .map(|tag| (tag.to_string(), json!(lower.contains(&format!("<{}", tag)))))
        .collect();
    let details = serde_json::Value::Object(elements);
    let count = count_true(&details);

    if count >= limits.min_semantic_elements {
        analyzer.add_check(
            "Semantic HTML",
            GeoCategory::Semantic,
            Severity::Good,
            format!("Good semantic structure ({} elements)", count),
            None,
            Some(details),
        );
    } else if count >= 1 {
        analyzer.add_check(
            "Semantic HTML",
            GeoCategory::Semantic,
            Severity::Info,
            format!("Limited semantics ({} elements)", count),
            Some("Use more semantic HTML5 tags"),
            Some(details),
        );
    } else {
        analyzer.add_check(
            "Semantic HTML",
            GeoCategory::Semantic,
            Severity::Info,
            "No semantic elements detected",
            Some("Wrap content in semantic tags"),
            None,
        );
    }
}

fn check_topic_authority(
    analyzer: &mut Analyzer<GeoCategory>,
    limits: &Thresholds,
    content: &str,
    title: &str,
) {
    let word_count = raw_token_count(content);
    let has_expert_signals = EXPERT_SIGNAL_RE.is_match(content) || EXPERT_SIGNAL_RE.is_match(title);
    let has_data_signals = DATA_SIGNAL_RE.is_match(content);

    let signals = [
        word_count >= limits.authority_words,
        has_expert_signals,
        has_data_signals,
    ]
        .into_iter()
        .filter(|s| *s)
        .count();

    if signals >= 2 {
        analyzer.add_check(
            "Topic Authority",
            GeoCategory::Authority,
            Severity::Good,
            "Strong authority signals",
            None,
            Some(json!({
                "wordCount": word_count,
                "hasExpertSignals": has_expert_signals,
                "hasDataSignals": has_data_signals,
            })),
        );
    } else {
        analyzer.add_check(
            "Topic Authority",
            GeoCategory::Authority,
            Severity::Info,
            "Limited authority signals",
            Some("Add expert insights and data references"),
            Some(json!({ "wordCount": word_count })),
        );
    }
}

fn check_citation_worthiness(analyzer: &mut Analyzer<GeoCategory>, content: &str) {
    let indicators = json!({
        "hasStats": STAT_MENTION_RE.is_match(content),
        "hasQuotes": QUOTE_RE.is_match(content),
        "hasUniqueInsight": INSIGHT_RE.is_match(content),
        "hasConclusion": CONCLUSION_RE.is_match(content),
    });

    if count_true(&indicators) >= 2 {
        analyzer.add_check(
            "Citation Worthiness",
            GeoCategory::Authority,
            Severity::Good,
            "Content is citation-worthy",
            None,
            Some(indicators),
        );
    } else {
        analyzer.add_check(
            "Citation Worthiness",
            GeoCategory::Authority,
            Severity::Info,
            "Limited citation signals",
            Some("Add stats, quotes, unique insights"),
            Some(indicators),
        );
    }
}

fn check_comprehensiveness(
    analyzer: &mut Analyzer<GeoCategory>,
    limits: &Thresholds,
    content: &str,
) {
    let word_count = raw_token_count(content);
    let headings = HEADING_OPEN_RE.find_iter(content).count();

    if word_count >= limits.comprehensive_words && headings >= limits.comprehensive_headings {
        analyzer.add_check(
            "Comprehensiveness",
            GeoCategory::AiReadability,
            Severity::Good,
            format!(
                "Comprehensive content ({} words, {} sections)",
                word_count, headings
            ),
            None,
            None,
        );
    } else if word_count >= limits.moderate_depth_words {
        analyzer.add_check(
            "Comprehensiveness",
            GeoCategory::AiReadability,
            Severity::Info,
            format!("Moderate depth ({} words)", word_count),
            Some("Expand with more sections"),
            Some(json!({ "wordCount": word_count })),
        );
    } else {
        analyzer.add_check(
            "Comprehensiveness",
            GeoCategory::AiReadability,
            Severity::Warning,
            format!("Thin content ({} words)", word_count),
            Some("Expand to 1000+ words"),
            Some(json!({ "wordCount": word_count })),
        );
    }
}

fn check_clear_definitions(
    analyzer: &mut Analyzer<GeoCategory>,
    limits: &Thresholds,
    content: &str,
) {
    let definitions = DEFINITION_PHRASE_RE.find_iter(content).count();

    if definitions >= limits.min_definitions {
        analyzer.add_check(
            "Clear Definitions",
            GeoCategory::AiReadability,
            Severity::Good,
            format!("{} clear definitions", definitions),
            None,
            None,
        );
    } else if definitions > 0 {
        analyzer.add_check(
            "Clear Definitions",
            GeoCategory::AiReadability,
            Severity::Info,
            format!("{} definition(s)", definitions),
            Some(r#"Add more "X is Y" definitions"#),
            None,
        );
    } else {
        analyzer.add_check(
            "Clear Definitions",
            GeoCategory::AiReadability,
            Severity::Info,
            "No clear definitions",
            Some("Define key terms explicitly"),
            None,
        );
    }
}

/// Number of `true` values in a flat JSON object of flags.
fn count_true(flags: &serde_json::Value) -> usize {
    flags
        .as_object()
        .map(|map| map.values().filter(|v| v.as_bool() == Some(true)).count())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    include!("tests.rs");
}
