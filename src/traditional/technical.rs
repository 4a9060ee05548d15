//! Technical checks: structured data, canonical, viewport, transport, encoding,
//! language, alternates, icons and basic accessibility.

use serde_json::{json, Value};

use super::{ScanContext, TraditionalCategory::Technical};
use crate::scoring::Severity;

const INPUT_SELECTOR: &str =
    r#"input:not([type="hidden"]):not([type="submit"]):not([type="button"])"#;

/// Renders an `@type` value the way it appears in the message (arrays comma-joined).
fn type_label(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(type_label).collect::<Vec<_>>().join(","),
        other => other.to_string(),
    }
}

pub(super) fn check_schema_markup(ctx: &mut ScanContext<'_>) {
    let blocks = ctx
        .doc
        .query_selector_all(r#"script[type="application/ld+json"]"#);

    if blocks.is_empty() {
        ctx.add(
            "Schema Markup",
            Technical,
            Severity::Warning,
            "No structured data found",
            Some("Add JSON-LD schema to enable rich snippets in search results"),
            None,
        );
        return;
    }

    let mut types: Vec<Value> = Vec::new();
    for block in &blocks {
        match serde_json::from_str::<Value>(block.text()) {
            Ok(data) => {
                if let Some(kind) = data.get("@type") {
                    types.push(kind.clone());
                }
            }
            Err(e) => log::debug!("Skipping malformed JSON-LD block: {}", e),
        }
    }

    let listed = if types.is_empty() {
        "Unknown types".to_string()
    } else {
        types.iter().map(type_label).collect::<Vec<_>>().join(", ")
    };
    ctx.add(
        "Schema Markup",
        Technical,
        Severity::Good,
        format!("{} schema(s) found: {}", blocks.len(), listed),
        None,
        Some(json!({ "count": blocks.len(), "types": types })),
    );
}

pub(super) fn check_canonical_url(ctx: &mut ScanContext<'_>) {
    let href = ctx
        .doc
        .query_selector(r#"link[rel="canonical"]"#)
        .and_then(|link| link.attr("href").map(str::to_string))
        .filter(|h| !h.is_empty());

    let Some(href) = href else {
        ctx.add(
            "Canonical URL",
            Technical,
            Severity::Warning,
            "No canonical URL specified",
            Some("Add a canonical tag to prevent duplicate content issues"),
            None,
        );
        return;
    };

    // Resolve relative canonicals against the page URL.
    let canonical = ctx
        .base
        .as_ref()
        .and_then(|base| base.join(&href).ok())
        .map(|u| u.to_string())
        .unwrap_or(href);

    if canonical.trim_end_matches('/') == ctx.url.trim_end_matches('/') {
        ctx.add(
            "Canonical URL",
            Technical,
            Severity::Good,
            "Self-referential canonical URL set",
            None,
            Some(json!({ "canonical": canonical })),
        );
    } else {
        let current = ctx.url;
        ctx.add(
            "Canonical URL",
            Technical,
            Severity::Info,
            "Canonical points to different URL",
            Some("Verify this is intentional (e.g., for pagination)"),
            Some(json!({ "canonical": canonical, "currentUrl": current })),
        );
    }
}

pub(super) fn check_viewport(ctx: &mut ScanContext<'_>) {
    let Some(viewport) = ctx.meta_content(r#"meta[name="viewport"]"#) else {
        ctx.add(
            "Mobile Viewport",
            Technical,
            Severity::Critical,
            "No viewport meta tag found",
            Some(r#"Add <meta name="viewport" content="width=device-width, initial-scale=1">"#),
            None,
        );
        return;
    };

    if viewport.contains("width=device-width") {
        ctx.add(
            "Mobile Viewport",
            Technical,
            Severity::Good,
            "Mobile viewport properly configured",
            None,
            Some(json!({ "viewport": viewport })),
        );
    } else {
        ctx.add(
            "Mobile Viewport",
            Technical,
            Severity::Warning,
            "Viewport may not be mobile-friendly",
            Some("Ensure viewport includes width=device-width"),
            Some(json!({ "viewport": viewport })),
        );
    }
}

pub(super) fn check_ssl(ctx: &mut ScanContext<'_>) {
    if ctx.url.starts_with("https://") {
        ctx.add(
            "SSL/HTTPS",
            Technical,
            Severity::Good,
            "Site uses HTTPS",
            None,
            None,
        );
    } else {
        ctx.add(
            "SSL/HTTPS",
            Technical,
            Severity::Critical,
            "Site not using HTTPS",
            Some("Migrate to HTTPS for security and SEO benefits"),
            None,
        );
    }
}

/// Parsers normalize a missing doctype, so a parsed document always passes.
pub(super) fn check_doctype(ctx: &mut ScanContext<'_>) {
    ctx.add(
        "HTML Doctype",
        Technical,
        Severity::Good,
        "Valid HTML document",
        None,
        None,
    );
}

pub(super) fn check_char_encoding(ctx: &mut ScanContext<'_>) {
    let charset = ctx
        .doc
        .query_selector("meta[charset]")
        .and_then(|m| m.attr("charset").map(str::to_string))
        .filter(|c| !c.is_empty())
        .or_else(|| ctx.meta_content(r#"meta[http-equiv="Content-Type"]"#));

    match charset {
        None => ctx.add(
            "Character Encoding",
            Technical,
            Severity::Warning,
            "Character encoding not specified",
            Some(r#"Add <meta charset="UTF-8"> for proper character display"#),
            None,
        ),
        Some(charset) if charset.to_lowercase().contains("utf-8") => ctx.add(
            "Character Encoding",
            Technical,
            Severity::Good,
            "UTF-8 encoding specified",
            None,
            None,
        ),
        Some(charset) => ctx.add(
            "Character Encoding",
            Technical,
            Severity::Info,
            format!("Encoding: {}", charset),
            Some("Consider using UTF-8 for universal character support"),
            None,
        ),
    }
}

pub(super) fn check_language_attribute(ctx: &mut ScanContext<'_>) {
    match ctx.doc.root_attr("lang").filter(|l| !l.is_empty()) {
        Some(lang) => ctx.add(
            "Language Attribute",
            Technical,
            Severity::Good,
            format!("Language declared: {}", lang),
            None,
            Some(json!({ "lang": lang })),
        ),
        None => ctx.add(
            "Language Attribute",
            Technical,
            Severity::Warning,
            "No language attribute on HTML element",
            Some(r#"Add lang="en" (or appropriate language) to <html> tag"#),
            None,
        ),
    }
}

/// Single-language sites have no hreflang; absence emits nothing.
pub(super) fn check_hreflang(ctx: &mut ScanContext<'_>) {
    let alternates = ctx
        .doc
        .query_selector_all(r#"link[rel="alternate"][hreflang]"#);
    if alternates.is_empty() {
        return;
    }

    let languages: Vec<&str> = alternates
        .iter()
        .filter_map(|link| link.attr("hreflang"))
        .collect();
    ctx.add(
        "Hreflang Tags",
        Technical,
        Severity::Good,
        format!("{} hreflang tags found", alternates.len()),
        None,
        Some(json!({ "languages": languages })),
    );
}

pub(super) fn check_favicon(ctx: &mut ScanContext<'_>) {
    let favicon = ctx
        .doc
        .query_selector(r#"link[rel="icon"], link[rel="shortcut icon"]"#);
    if favicon.is_none() {
        ctx.add(
            "Favicon",
            Technical,
            Severity::Info,
            "No favicon specified",
            Some("Add a favicon for better branding in browser tabs"),
            None,
        );
        return;
    }

    let apple = if ctx
        .doc
        .query_selector(r#"link[rel="apple-touch-icon"]"#)
        .is_some()
    {
        " + Apple touch icon"
    } else {
        ""
    };
    ctx.add(
        "Favicon",
        Technical,
        Severity::Good,
        format!("Favicon found{}", apple),
        None,
        None,
    );
}

pub(super) fn check_accessibility(ctx: &mut ScanContext<'_>) {
    let mut issues: Vec<String> = Vec::new();

    if ctx
        .doc
        .query_selector(r##"a[href="#main"], a[href="#content"], .skip-link"##)
        .is_none()
    {
        issues.push("No skip navigation link".to_string());
    }

    let landmarks = ctx.doc.query_selector_all(
        r#"[role="main"], [role="navigation"], [role="banner"], main, nav, header"#,
    );
    if landmarks.is_empty() {
        issues.push("No ARIA landmarks or semantic elements".to_string());
    }

    let label_targets: Vec<String> = ctx
        .doc
        .query_selector_all("label[for]")
        .iter()
        .filter_map(|label| label.attr("for").map(str::to_string))
        .collect();
    let unlabeled = ctx
        .doc
        .query_selector_all(INPUT_SELECTOR)
        .iter()
        .filter(|input| {
            let has_label = input
                .attr("id")
                .filter(|id| !id.is_empty())
                .is_some_and(|id| label_targets.iter().any(|target| target == id));
            let has_aria = ["aria-label", "aria-labelledby"]
                .iter()
                .any(|name| input.attr(name).is_some_and(|v| !v.is_empty()));
            !has_label && !has_aria
        })
        .count();
    if unlabeled > 0 {
        issues.push(format!("{} form inputs without labels", unlabeled));
    }

    if issues.is_empty() {
        ctx.add(
            "Accessibility",
            Technical,
            Severity::Good,
            "Basic accessibility checks passed",
            None,
            None,
        );
    } else {
        let recommendation = issues.join("; ");
        ctx.add(
            "Accessibility",
            Technical,
            Severity::Info,
            format!("{} accessibility improvements possible", issues.len()),
            Some(recommendation.as_str()),
            Some(json!({ "issues": issues })),
        );
    }
}
