//! Signals that answer engines quote directly.

use regex::Regex;
use serde_json::json;
use std::sync::LazyLock;

use super::{GeoCategory, Thresholds};
use crate::scoring::{Analyzer, Severity};
use crate::utils::compile_regex_unsafe;
use crate::utils::text::raw_token_count;

const STAT_EXAMPLES: usize = 5;

static TLDR_LABEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile_regex_unsafe(
        r"(?i)(?:^|\n|<p>)(TL;?DR|Summary|Key Takeaways?|In Brief)[:;.\s]",
        "TLDR_LABEL_RE",
    )
});
static FIRST_PARAGRAPH_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(r"(?i)<p[^>]*>([^<]+)</p>", "FIRST_PARAGRAPH_RE"));
static TABLE_RE: LazyLock<Regex> = LazyLock::new(|| compile_regex_unsafe(r"(?i)<table", "TABLE_RE"));
static TABLE_HEADER_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(r"(?i)<th", "TABLE_HEADER_RE"));

static STATISTIC_PATTERNS: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        compile_regex_unsafe(r"\d+(?:\.\d+)?%", "STATISTIC_PATTERNS"),
        compile_regex_unsafe(
            r"(?i)\d+(?:,\d{3})*(?:\.\d+)?\s*(?:million|billion|thousand|MB|GB|TB|ms|seconds?|minutes?|hours?)",
            "STATISTIC_PATTERNS",
        ),
        compile_regex_unsafe(
            r"(?i)\$\d+(?:,\d{3})*(?:\.\d+)?(?:\s*(?:million|billion|thousand|k|M|B))?",
            "STATISTIC_PATTERNS",
        ),
    ]
});

static VISIBLE_DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile_regex_unsafe(
        r"(?i)(?:last |recently )?updated:?\s*(?:on\s*)?(?:\d{1,2}[/\-]\d{1,2}[/\-]\d{2,4}|\w+\s+\d{1,2},?\s+\d{4}|\d{4}-\d{2}-\d{2})",
        "VISIBLE_DATE_RE",
    )
});
static SCHEMA_DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(r"(?i)dateModified|datePublished", "SCHEMA_DATE_RE"));

static QUESTION_ANSWER_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile_regex_unsafe(
        r"(?i)<h[2-3][^>]*>([^<]*\?[^<]*)</h[2-3]>\s*<p[^>]*>([^<]+)</p>",
        "QUESTION_ANSWER_RE",
    )
});

static EXTERNAL_LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile_regex_unsafe(
        r#"(?i)<a[^>]+href=["']https?://([^"']+)["']"#,
        "EXTERNAL_LINK_RE",
    )
});
static AUTHORITY_DOMAIN_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile_regex_unsafe(
        r"(?i)docs\.snowflake|aws\.amazon|cloud\.google|microsoft\.com|github\.com|wikipedia\.org|arxiv\.org|medium\.com|towardsdatascience",
        "AUTHORITY_DOMAIN_RE",
    )
});

pub(super) fn check_tldr_summary(analyzer: &mut Analyzer<GeoCategory>, content: &str) {
    let has_opening_summary = FIRST_PARAGRAPH_RE
        .captures(content)
        .and_then(|caps| caps.get(1))
        .is_some_and(|text| text.as_str().split('.').count() >= 2);

    if TLDR_LABEL_RE.is_match(content) {
        analyzer.add_check(
            "TL;DR Summary",
            GeoCategory::AiReadability,
            Severity::Good,
            "TL;DR/Summary found - AI can extract key points",
            None,
            Some(json!({ "hasTLDR": true })),
        );
    } else if has_opening_summary {
        analyzer.add_check(
            "TL;DR Summary",
            GeoCategory::AiReadability,
            Severity::Info,
            "Opening summary exists but no TL;DR label",
            Some(r#"Add "TL;DR:" or "Key Takeaways:" label at start for better AI extraction"#),
            None,
        );
    } else {
        analyzer.add_check(
            "TL;DR Summary",
            GeoCategory::AiReadability,
            Severity::Warning,
            "Missing TL;DR summary",
            Some(r#"Add 2-3 sentence summary at article start with "TL;DR:" label"#),
            None,
        );
    }
}

pub(super) fn check_data_tables(analyzer: &mut Analyzer<GeoCategory>, content: &str) {
    let tables = TABLE_RE.find_iter(content).count();
    let has_headers = TABLE_HEADER_RE.is_match(content);

    if tables >= 1 && has_headers {
        analyzer.add_check(
            "Data Tables",
            GeoCategory::StructuredData,
            Severity::Good,
            format!("{} structured table(s) - AI can cite tabular data", tables),
            None,
            Some(json!({ "tableCount": tables, "hasHeaders": true })),
        );
    } else if tables >= 1 {
        analyzer.add_check(
            "Data Tables",
            GeoCategory::StructuredData,
            Severity::Info,
            format!("{} table(s) found but missing headers", tables),
            Some("Add <th> headers to tables for better AI understanding"),
            None,
        );
    } else {
        analyzer.add_check(
            "Data Tables",
            GeoCategory::StructuredData,
            Severity::Info,
            "No data tables found",
            Some("Add comparison/data tables for AI citation (e.g., tool comparisons, benchmarks)"),
            None,
        );
    }
}

/// Distinct statistic mentions in first-seen order.
pub(super) fn unique_statistics(content: &str) -> Vec<&str> {
    let mut unique: Vec<&str> = Vec::new();
    for pattern in STATISTIC_PATTERNS.iter() {
        for found in pattern.find_iter(content) {
            if !unique.contains(&found.as_str()) {
                unique.push(found.as_str());
            }
        }
    }
    unique
}

pub(super) fn check_statistics(
    analyzer: &mut Analyzer<GeoCategory>,
    limits: &Thresholds,
    content: &str,
) {
    let stats = unique_statistics(content);
    let count = stats.len();

    if count >= limits.highly_citable_stats {
        let examples: Vec<&str> = stats.into_iter().take(STAT_EXAMPLES).collect();
        analyzer.add_check(
            "Statistics & Data",
            GeoCategory::Authority,
            Severity::Good,
            format!("{} statistics found - highly citable", count),
            None,
            Some(json!({ "count": count, "examples": examples })),
        );
    } else if count >= limits.some_stats {
        analyzer.add_check(
            "Statistics & Data",
            GeoCategory::Authority,
            Severity::Info,
            format!("{} statistics found", count),
            Some("Add more specific numbers, percentages, or benchmarks for AI citation"),
            Some(json!({ "count": count })),
        );
    } else {
        analyzer.add_check(
            "Statistics & Data",
            GeoCategory::Authority,
            Severity::Warning,
            "Few or no statistics",
            Some(r#"Add specific numbers, percentages, benchmarks (e.g., "40% faster", "$30K/month")"#),
            None,
        );
    }
}

/// `markup` is the content plus any attached schema.
pub(super) fn check_freshness_signals(
    analyzer: &mut Analyzer<GeoCategory>,
    content: &str,
    markup: &str,
) {
    let visible = VISIBLE_DATE_RE.is_match(content);
    let schema = SCHEMA_DATE_RE.is_match(markup);

    match (visible, schema) {
        (true, true) => analyzer.add_check(
            "Freshness Signals",
            GeoCategory::Authority,
            Severity::Good,
            "Last updated date visible + schema markup",
            None,
            Some(json!({ "visible": true, "schema": true })),
        ),
        (true, false) => analyzer.add_check(
            "Freshness Signals",
            GeoCategory::Authority,
            Severity::Info,
            "Date visible but no schema",
            Some("Add dateModified to Article schema"),
            None,
        ),
        (false, true) => analyzer.add_check(
            "Freshness Signals",
            GeoCategory::Authority,
            Severity::Info,
            "Schema date but not visible",
            Some(r#"Add visible "Last Updated: [DATE]" on page"#),
            None,
        ),
        (false, false) => analyzer.add_check(
            "Freshness Signals",
            GeoCategory::Authority,
            Severity::Warning,
            "No freshness signals",
            Some(r#"Add visible "Last Updated: [DATE]" and dateModified schema property"#),
            None,
        ),
    }
}

/// Judges the paragraph that directly follows the first question heading.
pub(super) fn check_answer_format(
    analyzer: &mut Analyzer<GeoCategory>,
    limits: &Thresholds,
    content: &str,
) {
    let answers: Vec<&str> = QUESTION_ANSWER_RE
        .captures_iter(content)
        .filter_map(|caps| caps.get(2).map(|m| m.as_str()))
        .collect();

    let Some(first) = answers.first() else {
        analyzer.add_check(
            "Answer Format",
            GeoCategory::AiReadability,
            Severity::Info,
            "No question-answer format detected",
            Some(r#"Use question headings ("What is X?") followed by direct answers"#),
            None,
        );
        return;
    };

    let words = raw_token_count(first.trim());
    if (limits.min_answer_words..=limits.max_answer_words).contains(&words) {
        analyzer.add_check(
            "Answer Format",
            GeoCategory::AiReadability,
            Severity::Good,
            format!("Perfect answer length ({} words) - ideal for AI snippets", words),
            None,
            Some(json!({ "wordCount": words, "questionCount": answers.len() })),
        );
    } else if words < limits.min_answer_words {
        analyzer.add_check(
            "Answer Format",
            GeoCategory::AiReadability,
            Severity::Info,
            format!("Answer may be too brief ({} words)", words),
            Some("Expand first answer to 40-60 words for better AI extraction"),
            Some(json!({ "wordCount": words })),
        );
    } else {
        analyzer.add_check(
            "Answer Format",
            GeoCategory::AiReadability,
            Severity::Info,
            format!("Answer may be too long ({} words)", words),
            Some("Keep first answer concise (40-60 words), then elaborate below"),
            Some(json!({ "wordCount": words })),
        );
    }
}

/// Outbound `http(s)` anchor tags, excluding links whose host starts with the
/// first label of `own_domain`.
pub(super) fn external_link_tags<'a>(content: &'a str, own_domain: &str) -> Vec<&'a str> {
    let own_label = own_domain
        .split('.')
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();

    EXTERNAL_LINK_RE
        .captures_iter(content)
        .filter(|caps| {
            own_label.is_empty()
                || !caps
                    .get(1)
                    .is_some_and(|target| target.as_str().to_ascii_lowercase().starts_with(&own_label))
        })
        .filter_map(|caps| caps.get(0).map(|m| m.as_str()))
        .collect()
}

pub(super) fn check_source_citations(
    analyzer: &mut Analyzer<GeoCategory>,
    limits: &Thresholds,
    content: &str,
) {
    let external = external_link_tags(content, &limits.own_domain);
    let authority = external
        .iter()
        .filter(|tag| AUTHORITY_DOMAIN_RE.is_match(tag))
        .count();

    if authority >= limits.authority_citations {
        analyzer.add_check(
            "Source Citations",
            GeoCategory::Authority,
            Severity::Good,
            format!("{} authority citations - builds trust", authority),
            None,
            Some(json!({ "total": external.len(), "authority": authority })),
        );
    } else if authority >= 1 {
        analyzer.add_check(
            "Source Citations",
            GeoCategory::Authority,
            Severity::Info,
            format!("{} authority citation(s)", authority),
            Some("Add more links to official docs, research papers, or trusted sources"),
            Some(json!({ "authority": authority })),
        );
    } else if !external.is_empty() {
        analyzer.add_check(
            "Source Citations",
            GeoCategory::Authority,
            Severity::Info,
            format!("{} external link(s) but no authority sources", external.len()),
            Some("Link to official documentation (Snowflake docs, AWS, etc.)"),
            None,
        );
    } else {
        analyzer.add_check(
            "Source Citations",
            GeoCategory::Authority,
            Severity::Warning,
            "No external citations",
            Some("Add links to official documentation, research, or trusted sources"),
            None,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_statistics_dedupes_in_order() {
        let content = "Queries ran 40% faster, then 40% again. Costs fell by $30K and load took 5 seconds over 2 GB.";
        assert_eq!(
            unique_statistics(content),
            vec!["40%", "5 seconds", "2 GB", "$30K"]
        );
    }

    #[test]
    fn test_external_links_skip_own_domain() {
        let content = r#"<a href="https://dataengineerhub.blog/a">own</a>
            <a href="https://DataEngineerHub.blog/b">own upper</a>
            <a href="http://github.com/x">gh</a>
            <a href="/relative">rel</a>"#;
        let links = external_link_tags(content, "dataengineerhub.blog");
        assert_eq!(links.len(), 1);
        assert!(links[0].contains("github.com"));

        // Without an own domain every absolute link counts.
        assert_eq!(external_link_tags(content, "").len(), 3);
    }
}
