//! Social sharing checks.

use serde_json::json;

use super::{ScanContext, TraditionalCategory::Social};
use crate::scoring::Severity;

const REQUIRED_OG_TAGS: [&str; 5] = ["og:title", "og:description", "og:image", "og:url", "og:type"];

/// Leading integer of a dimension value such as `"1200"` or `"1200px"`.
fn parse_dimension(value: &str) -> u32 {
    let digits: String = value
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().unwrap_or(0)
}

pub(super) fn check_open_graph_tags(ctx: &mut ScanContext<'_>) {
    let (found, missing): (Vec<&str>, Vec<&str>) = REQUIRED_OG_TAGS
        .into_iter()
        .partition(|tag| ctx.meta_content(&format!(r#"meta[property="{}"]"#, tag)).is_some());

    if missing.len() == REQUIRED_OG_TAGS.len() {
        ctx.add(
            "Open Graph Tags",
            Social,
            Severity::Warning,
            "No Open Graph tags found",
            Some("Add OG tags for better social media sharing"),
            Some(json!({ "missing": missing })),
        );
    } else if !missing.is_empty() {
        ctx.add(
            "Open Graph Tags",
            Social,
            Severity::Warning,
            format!("Missing OG tags: {}", missing.join(", ")),
            Some("Add missing OG tags for complete social optimization"),
            Some(json!({ "found": found, "missing": missing })),
        );
    } else {
        ctx.add(
            "Open Graph Tags",
            Social,
            Severity::Good,
            "All required OG tags present",
            None,
            Some(json!({ "found": found })),
        );
    }
}

pub(super) fn check_twitter_cards(ctx: &mut ScanContext<'_>) {
    let Some(card) = ctx.meta_content(r#"meta[name="twitter:card"]"#) else {
        ctx.add(
            "Twitter Cards",
            Social,
            Severity::Info,
            "No Twitter Card tags found",
            Some("Add Twitter Card meta tags for better X/Twitter sharing"),
            None,
        );
        return;
    };

    match ctx.meta_content(r#"meta[name="twitter:title"]"#) {
        Some(title) => ctx.add(
            "Twitter Cards",
            Social,
            Severity::Good,
            format!("Twitter Card configured ({})", card),
            None,
            Some(json!({ "card": card, "title": title })),
        ),
        None => ctx.add(
            "Twitter Cards",
            Social,
            Severity::Warning,
            "Incomplete Twitter Card setup",
            Some("Add twitter:card, twitter:title, and twitter:description"),
            None,
        ),
    }
}

pub(super) fn check_social_image_size(ctx: &mut ScanContext<'_>) {
    let Some(image) = ctx.meta_content(r#"meta[property="og:image"]"#) else {
        ctx.add(
            "Social Image",
            Social,
            Severity::Warning,
            "No Open Graph image found",
            Some("Add og:image for better social media sharing"),
            None,
        );
        return;
    };

    let width = ctx.meta_content(r#"meta[property="og:image:width"]"#);
    let height = ctx.meta_content(r#"meta[property="og:image:height"]"#);
    let (Some(width), Some(height)) = (width, height) else {
        ctx.add(
            "Social Image Size",
            Social,
            Severity::Info,
            "OG image dimensions not specified",
            Some("Add og:image:width and og:image:height for faster loading"),
            Some(json!({ "image": image })),
        );
        return;
    };

    let width = parse_dimension(&width);
    let height = parse_dimension(&height);
    let details = Some(json!({ "width": width, "height": height, "image": image }));

    if width >= ctx.thresholds.social_image_min_width
        && height >= ctx.thresholds.social_image_min_height
    {
        ctx.add(
            "Social Image Size",
            Social,
            Severity::Good,
            format!("Social image properly sized ({}x{})", width, height),
            None,
            details,
        );
    } else {
        ctx.add(
            "Social Image Size",
            Social,
            Severity::Warning,
            format!("Social image too small ({}x{})", width, height),
            Some("Use at least 1200x630 pixels for optimal display"),
            details,
        );
    }
}
