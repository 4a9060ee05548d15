//! Meta tag checks.

use serde_json::json;

use super::{ScanContext, TraditionalCategory::Meta};
use crate::scoring::Severity;
use crate::utils::text::char_len;

pub(super) fn check_title_tag(ctx: &mut ScanContext<'_>) {
    let title = match ctx.trimmed_text("title").filter(|t| !t.is_empty()) {
        Some(title) => title,
        None => {
            ctx.add(
                "Title Tag",
                Meta,
                Severity::Critical,
                "No title tag found",
                Some("Add a unique, descriptive title tag between 30-60 characters"),
                None,
            );
            return;
        }
    };

    let length = char_len(&title);
    let details = Some(json!({ "title": title, "length": length }));

    if length < ctx.thresholds.title_min_chars {
        ctx.add(
            "Title Tag",
            Meta,
            Severity::Warning,
            format!("Title too short ({} chars)", length),
            Some("Expand your title to 30-60 characters for better CTR"),
            details,
        );
    } else if length > ctx.thresholds.title_max_chars {
        ctx.add(
            "Title Tag",
            Meta,
            Severity::Warning,
            format!("Title too long ({} chars) - may be truncated", length),
            Some("Shorten your title to under 60 characters to avoid truncation"),
            details,
        );
    } else {
        ctx.add(
            "Title Tag",
            Meta,
            Severity::Good,
            format!("Title tag optimized ({} chars)", length),
            None,
            details,
        );
    }
}

pub(super) fn check_meta_description(ctx: &mut ScanContext<'_>) {
    let description = ctx
        .meta_content(r#"meta[name="description"]"#)
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty());

    let Some(description) = description else {
        ctx.add(
            "Meta Description",
            Meta,
            Severity::Critical,
            "No meta description found",
            Some("Add a compelling meta description between 120-160 characters"),
            None,
        );
        return;
    };

    let length = char_len(&description);
    let details = Some(json!({ "description": description, "length": length }));

    if length < ctx.thresholds.description_min_chars {
        ctx.add(
            "Meta Description",
            Meta,
            Severity::Warning,
            format!("Meta description too short ({} chars)", length),
            Some("Expand to 120-160 characters for better search visibility"),
            details,
        );
    } else if length > ctx.thresholds.description_max_chars {
        ctx.add(
            "Meta Description",
            Meta,
            Severity::Warning,
            format!("Meta description too long ({} chars)", length),
            Some("Shorten to under 160 characters to avoid truncation"),
            details,
        );
    } else {
        ctx.add(
            "Meta Description",
            Meta,
            Severity::Good,
            format!("Meta description optimized ({} chars)", length),
            None,
            details,
        );
    }
}

pub(super) fn check_robots_meta(ctx: &mut ScanContext<'_>) {
    let Some(robots) = ctx
        .meta_content(r#"meta[name="robots"]"#)
        .map(|r| r.to_lowercase())
    else {
        ctx.add(
            "Robots Meta",
            Meta,
            Severity::Info,
            "No robots meta tag (defaults to index, follow)",
            None,
            None,
        );
        return;
    };

    let details = Some(json!({ "robots": robots }));
    if robots.contains("noindex") {
        ctx.add(
            "Robots Meta",
            Meta,
            Severity::Critical,
            "Page set to NOINDEX - will not appear in search!",
            Some("Remove noindex if you want this page indexed"),
            details,
        );
    } else if robots.contains("nofollow") {
        ctx.add(
            "Robots Meta",
            Meta,
            Severity::Warning,
            "Page set to NOFOLLOW - links won't pass equity",
            Some("Consider removing nofollow unless intentional"),
            details,
        );
    } else {
        ctx.add(
            "Robots Meta",
            Meta,
            Severity::Good,
            "Robots meta allows indexing and following",
            None,
            details,
        );
    }
}

pub(super) fn check_meta_keywords(ctx: &mut ScanContext<'_>) {
    if let Some(keywords) = ctx.meta_content(r#"meta[name="keywords"]"#) {
        ctx.add(
            "Meta Keywords",
            Meta,
            Severity::Info,
            "Meta keywords found (ignored by Google)",
            Some("Meta keywords have no SEO value but don't hurt"),
            Some(json!({ "keywords": keywords })),
        );
    }
}
