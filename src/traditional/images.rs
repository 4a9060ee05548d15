//! Image checks.

use regex::Regex;
use serde_json::json;
use std::sync::LazyLock;

use super::{ScanContext, TraditionalCategory::Images};
use crate::scoring::Severity;
use crate::utils::compile_regex_unsafe;

static LEGACY_FORMAT_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile_regex_unsafe(r"(?i)\.(jpg|jpeg|png|gif)(\?|$)", "LEGACY_FORMAT_RE")
});

pub(super) fn check_image_optimization(ctx: &mut ScanContext<'_>) {
    let images = ctx.doc.query_selector_all("img");
    let total = images.len();

    if total == 0 {
        ctx.add(
            "Image Optimization",
            Images,
            Severity::Info,
            "No images found on page",
            Some("Consider adding relevant images to improve engagement"),
            None,
        );
        return;
    }

    let missing_alt = images
        .iter()
        .filter(|img| img.attr("alt").map(str::trim).unwrap_or_default().is_empty())
        .count();

    if missing_alt > 0 {
        ctx.add(
            "Image Alt Text",
            Images,
            Severity::Warning,
            format!("{}/{} images missing alt text", missing_alt, total),
            Some("Add descriptive alt text to all images for accessibility and SEO"),
            Some(json!({ "missingCount": missing_alt, "total": total })),
        );
    } else {
        ctx.add(
            "Image Alt Text",
            Images,
            Severity::Good,
            format!("All {} images have alt text", total),
            None,
            Some(json!({ "total": total })),
        );
    }

    let legacy = images
        .iter()
        .filter(|img| LEGACY_FORMAT_RE.is_match(img.attr("src").unwrap_or_default()))
        .count();
    if legacy > 0 {
        ctx.add(
            "Image Formats",
            Images,
            Severity::Info,
            format!("{} images use legacy formats", legacy),
            Some("Consider using WebP or AVIF for better compression"),
            Some(json!({ "legacyCount": legacy })),
        );
    }
}
