//! Answer engine optimization: featured snippets, Q&A formatting and voice search.

use regex::Regex;
use serde::Serialize;
use serde_json::json;
use std::sync::LazyLock;

use crate::models::Article;
use crate::scoring::{Analyzer, Category, Report, ReportType, ScoringProfile, Severity};
use crate::utils::compile_regex_unsafe;
use crate::utils::text::{char_len, strip_tags};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AeoCategory {
    #[serde(rename = "Featured Snippet Potential")]
    FeaturedSnippet,
    #[serde(rename = "Q&A Formatting")]
    QaFormat,
    #[serde(rename = "Voice Search Optimization")]
    VoiceSearch,
    #[serde(rename = "FAQ Schema")]
    FaqSchema,
    #[serde(rename = "Direct Answer Formatting")]
    DirectAnswers,
}

impl Category for AeoCategory {
    fn label(&self) -> &'static str {
        match self {
            AeoCategory::FeaturedSnippet => "Featured Snippet Potential",
            AeoCategory::QaFormat => "Q&A Formatting",
            AeoCategory::VoiceSearch => "Voice Search Optimization",
            AeoCategory::FaqSchema => "FAQ Schema",
            AeoCategory::DirectAnswers => "Direct Answer Formatting",
        }
    }
}

static DEFINITION_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile_regex_unsafe(
        r"(?i)(?:is|are|means?|refers? to)\s+[^.]{20,200}\.",
        "DEFINITION_RE",
    )
});
static NUMBERED_LIST_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(r"(?i)<ol|step 1", "NUMBERED_LIST_RE"));
static BULLET_LIST_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(r"(?i)<ul", "BULLET_LIST_RE"));
static TABLE_RE: LazyLock<Regex> = LazyLock::new(|| compile_regex_unsafe(r"(?i)<table", "TABLE_RE"));
static HEADING_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile_regex_unsafe(r"(?i)<h[2-4][^>]*>[^<]+</h[2-4]>", "HEADING_RE")
});
static QUESTION_START_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile_regex_unsafe(
        r"(?i)^(what|why|how|when|where|who|can|is)\s",
        "QUESTION_START_RE",
    )
});
static LIST_RE: LazyLock<Regex> = LazyLock::new(|| compile_regex_unsafe(r"(?i)<[ou]l", "LIST_RE"));
static CONVERSATIONAL_TITLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile_regex_unsafe(
        r"(?i)^(how|what|why|when|where|who)\s",
        "CONVERSATIONAL_TITLE_RE",
    )
});
static PARAGRAPH_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(r"(?i)<p[^>]*>([^<]+)</p>", "PARAGRAPH_RE"));

/// Limits used by the AEO checks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    /// Snippet indicators (definition, numbered list, bullet list, table) for Good.
    pub min_snippet_indicators: usize,
    pub min_question_headings: usize,
    pub min_lists: usize,
    /// Paragraphs up to this many chars count as short.
    pub max_short_paragraph_chars: usize,
    /// Share of short paragraphs needed for a Good result.
    pub min_short_paragraph_ratio: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            min_snippet_indicators: 2,
            min_question_headings: 2,
            min_lists: 1,
            max_short_paragraph_chars: 300,
            min_short_paragraph_ratio: 0.5,
        }
    }
}

/// Analyzer for answer-engine readiness of an article.
#[derive(Debug, Clone, Copy, Default)]
pub struct AeoAnalyzer {
    thresholds: Thresholds,
}

impl AeoAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_thresholds(thresholds: Thresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    pub fn analyze(&self, article: &Article) -> Report<AeoCategory> {
        let mut analyzer = Analyzer::new(ReportType::Aeo, ScoringProfile::AEO);
        let content = article.content.as_str();
        let limits = &self.thresholds;

        check_snippet_potential(&mut analyzer, limits, content);
        check_question_headings(&mut analyzer, limits, content);
        check_list_formatting(&mut analyzer, limits, content);
        check_faq_schema(&mut analyzer, article);
        check_voice_search(&mut analyzer, &article.title);
        check_paragraph_length(&mut analyzer, limits, content);

        analyzer.finish(None)
    }
}

fn check_snippet_potential(
    analyzer: &mut Analyzer<AeoCategory>,
    limits: &Thresholds,
    content: &str,
) {
    let indicators = [
        ("definitionPattern", DEFINITION_RE.is_match(content)),
        ("numberList", NUMBERED_LIST_RE.is_match(content)),
        ("bulletList", BULLET_LIST_RE.is_match(content)),
        ("table", TABLE_RE.is_match(content)),
    ];
    let present = indicators.iter().filter(|(_, hit)| *hit).count();
    let details = indicators
        .iter()
        .map(|(name, hit)| (name.to_string(), json!(hit)))
        .collect::<serde_json::Map<_, _>>();

    if present >= limits.min_snippet_indicators {
        analyzer.add_check(
            "Snippet Potential",
            AeoCategory::FeaturedSnippet,
            Severity::Good,
            "High featured snippet potential",
            None,
            Some(details.into()),
        );
    } else {
        analyzer.add_check(
            "Snippet Potential",
            AeoCategory::FeaturedSnippet,
            Severity::Warning,
            "Low snippet potential",
            Some("Add definitions, lists, or tables"),
            Some(details.into()),
        );
    }
}

fn check_question_headings(
    analyzer: &mut Analyzer<AeoCategory>,
    limits: &Thresholds,
    content: &str,
) {
    let questions = HEADING_RE
        .find_iter(content)
        .filter(|m| QUESTION_START_RE.is_match(&strip_tags(m.as_str())))
        .count();

    if questions >= limits.min_question_headings {
        analyzer.add_check(
            "Question Headings",
            AeoCategory::QaFormat,
            Severity::Good,
            format!("{} question headings", questions),
            None,
            None,
        );
    } else {
        analyzer.add_check(
            "Question Headings",
            AeoCategory::QaFormat,
            Severity::Warning,
            "Few question headings",
            Some(r#"Use "What is X?", "How to Y?""#),
            None,
        );
    }
}

fn check_list_formatting(
    analyzer: &mut Analyzer<AeoCategory>,
    limits: &Thresholds,
    content: &str,
) {
    let lists = LIST_RE.find_iter(content).count();
    if lists >= limits.min_lists {
        analyzer.add_check(
            "List Formatting",
            AeoCategory::FeaturedSnippet,
            Severity::Good,
            format!("{} list(s) found", lists),
            None,
            None,
        );
    } else {
        analyzer.add_check(
            "List Formatting",
            AeoCategory::FeaturedSnippet,
            Severity::Warning,
            "No lists found",
            Some("Add numbered/bullet lists"),
            None,
        );
    }
}

/// Looks for FAQ markup in the content and in the article's attached schema.
fn check_faq_schema(analyzer: &mut Analyzer<AeoCategory>, article: &Article) {
    let mentions_faq = |text: &str| text.contains("FAQPage") || text.contains(r#""@type":"Question""#);
    let in_schema = article
        .schema
        .as_ref()
        .is_some_and(|schema| mentions_faq(&schema.to_string()));

    if mentions_faq(&article.content) || in_schema {
        analyzer.add_check(
            "FAQ Schema",
            AeoCategory::FaqSchema,
            Severity::Good,
            "FAQ schema detected",
            None,
            None,
        );
    } else {
        analyzer.add_check(
            "FAQ Schema",
            AeoCategory::FaqSchema,
            Severity::Info,
            "No FAQ schema",
            Some("Add FAQPage schema for rich results"),
            None,
        );
    }
}

fn check_voice_search(analyzer: &mut Analyzer<AeoCategory>, title: &str) {
    if CONVERSATIONAL_TITLE_RE.is_match(title) {
        analyzer.add_check(
            "Voice Search",
            AeoCategory::VoiceSearch,
            Severity::Good,
            "Conversational title",
            None,
            None,
        );
    } else {
        analyzer.add_check(
            "Voice Search",
            AeoCategory::VoiceSearch,
            Severity::Info,
            "Title not conversational",
            Some("Use question-format titles"),
            None,
        );
    }
}

fn check_paragraph_length(
    analyzer: &mut Analyzer<AeoCategory>,
    limits: &Thresholds,
    content: &str,
) {
    let lengths: Vec<usize> = PARAGRAPH_RE
        .captures_iter(content)
        .filter_map(|caps| caps.get(1).map(|text| char_len(text.as_str())))
        .collect();
    let short = lengths
        .iter()
        .filter(|len| **len <= limits.max_short_paragraph_chars)
        .count();
    let ratio = if lengths.is_empty() {
        0.0
    } else {
        short as f64 / lengths.len() as f64
    };

    if ratio >= limits.min_short_paragraph_ratio {
        analyzer.add_check(
            "Paragraph Length",
            AeoCategory::FeaturedSnippet,
            Severity::Good,
            "Good paragraph lengths",
            None,
            None,
        );
    } else {
        analyzer.add_check(
            "Paragraph Length",
            AeoCategory::FeaturedSnippet,
            Severity::Info,
            "Paragraphs may be long",
            Some("Use shorter paragraphs"),
            None,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::Grade;

    fn article(title: &str, content: &str) -> Article {
        Article {
            title: title.into(),
            content: content.into(),
            ..Default::default()
        }
    }

    fn severity_of(report: &Report<AeoCategory>, name: &str) -> Severity {
        report.find(name).expect("check present").severity
    }

    #[test]
    fn test_empty_article() {
        let report = AeoAnalyzer::new().analyze(&Article::default());
        let names: Vec<&str> = report.checks.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Snippet Potential",
                "Question Headings",
                "List Formatting",
                "FAQ Schema",
                "Voice Search",
                "Paragraph Length",
            ]
        );
        // 3 warnings, 3 info: (0.9 + 1.8) / 6
        assert_eq!(report.score, 45);
        assert_eq!(report.grade, Grade::C);
    }

    #[test]
    fn test_question_headings_threshold() {
        let two = "<h2>What is Snowflake?</h2><h2>How does loading work?</h2><h2>Setup</h2>";
        let report = AeoAnalyzer::new().analyze(&article("", two));
        let check = report.find("Question Headings").unwrap();
        assert_eq!(check.severity, Severity::Good);
        assert_eq!(check.message, "2 question headings");

        let one = "<h2>What is Snowflake?</h2><h3>Setup</h3><h4>Whatever</h4>";
        let report = AeoAnalyzer::new().analyze(&article("", one));
        assert_eq!(severity_of(&report, "Question Headings"), Severity::Warning);
    }

    #[test]
    fn test_question_heading_needs_whitespace_after_word() {
        let content = "<h2>Is it fast?</h2><h3>Can I use it?</h3><h2>Howdy</h2>";
        let report = AeoAnalyzer::new().analyze(&article("", content));
        assert_eq!(report.find("Question Headings").unwrap().message, "2 question headings");
    }

    #[test]
    fn test_snippet_potential_indicators() {
        let content = "<p>Snowflake is a cloud data platform built for analytics workloads.</p>\
                       <ol><li>Step</li></ol>";
        let report = AeoAnalyzer::new().analyze(&article("", content));
        let check = report.find("Snippet Potential").unwrap();
        assert_eq!(check.severity, Severity::Good);
        let details = check.details.as_ref().unwrap();
        assert_eq!(details["definitionPattern"], true);
        assert_eq!(details["numberList"], true);
        assert_eq!(details["table"], false);

        let report = AeoAnalyzer::new().analyze(&article("", "<table></table>"));
        assert_eq!(severity_of(&report, "Snippet Potential"), Severity::Warning);
    }

    #[test]
    fn test_list_count() {
        let report = AeoAnalyzer::new().analyze(&article("", "<ul></ul><OL></OL>"));
        assert_eq!(report.find("List Formatting").unwrap().message, "2 list(s) found");
    }

    #[test]
    fn test_faq_schema_in_content_or_attached_schema() {
        let report = AeoAnalyzer::new().analyze(&article(
            "",
            r#"<script type="application/ld+json">{"@type":"FAQPage"}</script>"#,
        ));
        assert_eq!(severity_of(&report, "FAQ Schema"), Severity::Good);

        let with_schema = Article {
            schema: Some(json!({ "@type": "Question", "name": "What?" })),
            ..Default::default()
        };
        let report = AeoAnalyzer::new().analyze(&with_schema);
        assert_eq!(severity_of(&report, "FAQ Schema"), Severity::Good);

        let report = AeoAnalyzer::new().analyze(&Article::default());
        assert_eq!(severity_of(&report, "FAQ Schema"), Severity::Info);
    }

    #[test]
    fn test_voice_search_title() {
        let report = AeoAnalyzer::new().analyze(&article("How to load data", ""));
        assert_eq!(severity_of(&report, "Voice Search"), Severity::Good);
        let report = AeoAnalyzer::new().analyze(&article("Loading data", ""));
        assert_eq!(severity_of(&report, "Voice Search"), Severity::Info);
        // "can" and "is" count for headings but not for titles.
        let report = AeoAnalyzer::new().analyze(&article("Can Snowflake scale", ""));
        assert_eq!(severity_of(&report, "Voice Search"), Severity::Info);
    }

    #[test]
    fn test_paragraph_length_ratio() {
        let long = "x".repeat(301);
        let content = format!("<p>short</p><p>{}</p>", long);
        let report = AeoAnalyzer::new().analyze(&article("", &content));
        assert_eq!(severity_of(&report, "Paragraph Length"), Severity::Good);

        let content = format!("<p>short</p><p>{long}</p><p>{long}</p>");
        let report = AeoAnalyzer::new().analyze(&article("", &content));
        assert_eq!(severity_of(&report, "Paragraph Length"), Severity::Info);
    }

    #[test]
    fn test_custom_thresholds() {
        let content = "<h2>What is Snowflake?</h2><ul><li>a</li></ul><p>short</p>";
        let report = AeoAnalyzer::new().analyze(&article("", content));
        assert_eq!(severity_of(&report, "Question Headings"), Severity::Warning);
        assert_eq!(severity_of(&report, "Snippet Potential"), Severity::Warning);
        assert_eq!(severity_of(&report, "List Formatting"), Severity::Good);
        assert_eq!(severity_of(&report, "Paragraph Length"), Severity::Good);

        let analyzer = AeoAnalyzer::with_thresholds(Thresholds {
            min_snippet_indicators: 1,
            min_question_headings: 1,
            min_lists: 2,
            max_short_paragraph_chars: 3,
            ..Thresholds::default()
        });
        assert_eq!(analyzer.thresholds().min_short_paragraph_ratio, 0.5);
        let report = analyzer.analyze(&article("", content));
        assert_eq!(severity_of(&report, "Question Headings"), Severity::Good);
        assert_eq!(severity_of(&report, "Snippet Potential"), Severity::Good);
        assert_eq!(severity_of(&report, "List Formatting"), Severity::Warning);
        assert_eq!(severity_of(&report, "Paragraph Length"), Severity::Info);
    }

    #[test]
    fn test_categories() {
        let report = AeoAnalyzer::new().analyze(&Article::default());
        assert_eq!(report.by_category["Featured Snippet Potential"].total, 3);
        assert_eq!(report.by_category["Q&A Formatting"].total, 1);
        assert!(!report.by_category.contains_key("Direct Answer Formatting"));
    }
}
