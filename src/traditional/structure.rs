//! Heading and URL shape checks.

use serde_json::json;

use super::{ScanContext, TraditionalCategory::Structure};
use crate::scoring::Severity;
use crate::utils::text::{char_len, truncate_chars};

pub(super) fn check_h1_structure(ctx: &mut ScanContext<'_>) {
    let h1s = ctx.doc.query_selector_all("h1");

    match h1s.len() {
        0 => ctx.add(
            "H1 Structure",
            Structure,
            Severity::Critical,
            "No H1 tag found",
            Some("Add exactly one H1 tag with your primary keyword"),
            None,
        ),
        1 => {
            let h1 = h1s[0].text().trim().to_string();
            ctx.add(
                "H1 Structure",
                Structure,
                Severity::Good,
                "Single H1 tag found",
                None,
                Some(json!({ "h1": h1 })),
            );
        }
        count => {
            let limit = ctx.thresholds.h1_detail_chars;
            let texts: Vec<String> = h1s
                .iter()
                .map(|h| truncate_chars(h.text().trim(), limit))
                .collect();
            ctx.add(
                "H1 Structure",
                Structure,
                Severity::Warning,
                format!("Multiple H1 tags found ({})", count),
                Some("Use only one H1 tag per page for proper hierarchy"),
                Some(json!({ "h1s": texts })),
            );
        }
    }
}

pub(super) fn check_heading_hierarchy(ctx: &mut ScanContext<'_>) {
    let headings = ctx.doc.query_selector_all("h1, h2, h3, h4, h5, h6");
    let limit = ctx.thresholds.heading_detail_chars;

    let hierarchy: Vec<(u8, String)> = headings
        .iter()
        .map(|h| {
            let level = h
                .tag_name()
                .strip_prefix('h')
                .and_then(|n| n.parse::<u8>().ok())
                .unwrap_or(0);
            (level, truncate_chars(h.text().trim(), limit))
        })
        .collect();

    // A jump of more than one level after the first heading is a skip.
    let mut skips_level = false;
    let mut previous = 0u8;
    for (level, _) in &hierarchy {
        if previous != 0 && *level > previous + 1 {
            skips_level = true;
            break;
        }
        previous = *level;
    }

    let hierarchy_json: Vec<_> = hierarchy
        .iter()
        .map(|(level, text)| json!({ "level": level, "text": text }))
        .collect();

    if headings.is_empty() {
        ctx.add(
            "Heading Hierarchy",
            Structure,
            Severity::Warning,
            "No headings found on page",
            Some("Add H1-H6 headings to structure your content"),
            None,
        );
    } else if skips_level {
        ctx.add(
            "Heading Hierarchy",
            Structure,
            Severity::Warning,
            "Heading levels skip order (e.g., H1 to H3)",
            Some("Use sequential heading levels: H1 → H2 → H3"),
            Some(json!({ "hierarchy": hierarchy_json })),
        );
    } else {
        ctx.add(
            "Heading Hierarchy",
            Structure,
            Severity::Good,
            format!("Proper heading hierarchy ({} headings)", headings.len()),
            None,
            Some(json!({ "hierarchy": hierarchy_json })),
        );
    }
}

pub(super) fn check_url_structure(ctx: &mut ScanContext<'_>) {
    let url = ctx.url;
    let mut issues: Vec<&str> = Vec::new();

    if char_len(url) > ctx.thresholds.max_url_chars {
        issues.push("URL too long (>100 chars)");
    }
    if url.contains('?') && !url.contains("utm_") {
        issues.push("URL contains query parameters");
    }
    if url.contains('_') {
        issues.push("URL uses underscores (use hyphens instead)");
    }
    if url != url.to_lowercase() {
        issues.push("URL contains uppercase letters");
    }

    if issues.is_empty() {
        ctx.add(
            "URL Structure",
            Structure,
            Severity::Good,
            "URL structure is SEO-friendly",
            None,
            Some(json!({ "url": url })),
        );
    } else {
        let recommendation = issues.join("; ");
        ctx.add(
            "URL Structure",
            Structure,
            Severity::Warning,
            format!("URL has {} issue(s)", issues.len()),
            Some(recommendation.as_str()),
            Some(json!({ "url": url, "issues": issues })),
        );
    }
}

pub(super) fn check_keywords_in_url(ctx: &mut ScanContext<'_>) {
    let title = ctx
        .doc
        .query_selector("title")
        .map(|t| t.text().to_lowercase())
        .unwrap_or_default();
    let path = ctx
        .base
        .as_ref()
        .map(|u| u.path().to_lowercase())
        .unwrap_or_default();

    let has_keyword = title
        .split_whitespace()
        .filter(|word| char_len(word) > 2)
        .any(|word| path.contains(word));

    if has_keyword {
        ctx.add(
            "Keywords in URL",
            Structure,
            Severity::Good,
            "URL contains relevant keywords",
            None,
            None,
        );
    } else {
        ctx.add(
            "Keywords in URL",
            Structure,
            Severity::Info,
            "URL may not contain keywords from title",
            Some("Consider including primary keyword in URL slug"),
            None,
        );
    }
}
