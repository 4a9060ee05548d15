//! Content checks: length, readability, freshness and duplication.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use regex::Regex;
use serde_json::json;
use std::sync::LazyLock;

use super::{ScanContext, TraditionalCategory::Content};
use crate::scoring::Severity;
use crate::utils::compile_regex_unsafe;
use crate::utils::text::word_count;

const MAIN_CONTENT_SELECTOR: &str = r#"main, article, .content, [role="main"]"#;

static SENTENCE_END_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(r"[.!?]+", "SENTENCE_END_RE"));

/// Parses the date formats seen in `article:modified_time` and `last-modified`.
pub(crate) fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(value) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

pub(super) fn check_content_analysis(ctx: &mut ScanContext<'_>) {
    let text = ctx
        .doc
        .query_selector(MAIN_CONTENT_SELECTOR)
        .or_else(|| ctx.doc.query_selector("body"))
        .map(|el| el.text().to_string())
        .unwrap_or_default();

    let words = word_count(&text);
    let details = Some(json!({ "wordCount": words }));

    if words < ctx.thresholds.thin_content_words {
        ctx.add(
            "Content Length",
            Content,
            Severity::Warning,
            format!("Thin content ({} words)", words),
            Some("Aim for at least 300 words for better rankings"),
            details,
        );
    } else if words >= ctx.thresholds.comprehensive_content_words {
        ctx.add(
            "Content Length",
            Content,
            Severity::Good,
            format!("Comprehensive content ({} words)", words),
            None,
            details,
        );
    } else {
        ctx.add(
            "Content Length",
            Content,
            Severity::Good,
            format!("Good content length ({} words)", words),
            None,
            details,
        );
    }

    let sentences = SENTENCE_END_RE
        .split(&text)
        .filter(|s| !s.trim().is_empty())
        .count();
    if sentences == 0 {
        return;
    }

    let average = words as f64 / sentences as f64;
    let rounded = average.round() as u64;
    if average > ctx.thresholds.max_avg_sentence_words {
        ctx.add(
            "Readability",
            Content,
            Severity::Warning,
            format!("Long sentences (avg {} words)", rounded),
            Some("Shorten sentences for better readability"),
            Some(json!({ "avgSentenceLength": rounded })),
        );
    } else if average > 0.0 {
        ctx.add(
            "Readability",
            Content,
            Severity::Good,
            format!("Good readability (avg {} words/sentence)", rounded),
            None,
            None,
        );
    }
}

pub(super) fn check_content_freshness(ctx: &mut ScanContext<'_>) {
    let modified = ctx
        .meta_content(r#"meta[property="article:modified_time"]"#)
        .or_else(|| ctx.meta_content(r#"meta[name="last-modified"]"#));

    if let Some(modified) = modified {
        // Unparseable dates are not reported as stale.
        let age_days = parse_timestamp(&modified)
            .map(|dt| (ctx.now - dt).num_seconds() as f64 / 86_400.0);

        match age_days {
            Some(days) if days > ctx.thresholds.stale_after_days => ctx.add(
                "Content Freshness",
                Content,
                Severity::Info,
                format!("Content last updated {} days ago", days.round() as i64),
                Some("Consider updating content to maintain relevance"),
                Some(json!({ "lastModified": modified })),
            ),
            _ => ctx.add(
                "Content Freshness",
                Content,
                Severity::Good,
                "Content recently updated",
                None,
                Some(json!({ "lastModified": modified })),
            ),
        }
    } else if let Some(published) = ctx.meta_content(r#"meta[property="article:published_time"]"#)
    {
        ctx.add(
            "Content Freshness",
            Content,
            Severity::Info,
            "Published date found, but no modified date",
            Some("Add article:modified_time meta tag"),
            Some(json!({ "published": published })),
        );
    }
}

/// Title and description are compared as found, so two missing values also match.
pub(super) fn check_duplicate_content(ctx: &mut ScanContext<'_>) {
    let title = ctx.trimmed_text("title");
    let description = ctx
        .doc
        .query_selector(r#"meta[name="description"]"#)
        .and_then(|m| m.attr("content").map(|c| c.trim().to_string()));

    if title == description {
        ctx.add(
            "Duplicate Content",
            Content,
            Severity::Warning,
            "Title and meta description are identical",
            Some("Make title and description unique and complementary"),
            None,
        );
    }
}
