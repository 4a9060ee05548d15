//! Performance checks.

use serde_json::json;

use super::{ScanContext, TraditionalCategory::Performance};
use crate::scoring::Severity;

pub(super) fn check_lazy_loading(ctx: &mut ScanContext<'_>) {
    let images = ctx.doc.query_selector_all("img");
    let lazy = images
        .iter()
        .filter(|img| {
            img.attr("loading") == Some("lazy")
                || img.attr("data-src").is_some_and(|s| !s.is_empty())
                || img.has_class("lazy")
        })
        .count();

    if images.len() > ctx.thresholds.lazy_loading_min_images && lazy == 0 {
        ctx.add(
            "Lazy Loading",
            Performance,
            Severity::Info,
            "No lazy loading detected on images",
            Some(r#"Add loading="lazy" to below-fold images for faster page loads"#),
            Some(json!({ "totalImages": images.len() })),
        );
    } else if lazy > 0 {
        ctx.add(
            "Lazy Loading",
            Performance,
            Severity::Good,
            format!("{}/{} images use lazy loading", lazy, images.len()),
            None,
            None,
        );
    }
}

pub(super) fn check_page_size(ctx: &mut ScanContext<'_>) {
    let size_kb = (ctx.doc.outer_html().len() as f64 / 1024.0).round() as usize;

    if size_kb > ctx.thresholds.max_page_size_kb {
        ctx.add(
            "Page Size",
            Performance,
            Severity::Warning,
            format!("Large HTML document (~{} KB)", size_kb),
            Some("Consider reducing page size for faster loading"),
            Some(json!({ "sizeKB": size_kb })),
        );
    } else {
        ctx.add(
            "Page Size",
            Performance,
            Severity::Good,
            format!("Page size OK (~{} KB HTML)", size_kb),
            None,
            Some(json!({ "sizeKB": size_kb })),
        );
    }

    let scripts = ctx.doc.query_selector_all("script[src]").len();
    let stylesheets = ctx.doc.query_selector_all(r#"link[rel="stylesheet"]"#).len();
    let images = ctx.doc.query_selector_all("img").len();
    let too_many = scripts > ctx.thresholds.max_scripts;

    ctx.add(
        "Resource Count",
        Performance,
        if too_many {
            Severity::Warning
        } else {
            Severity::Info
        },
        format!(
            "{} scripts, {} stylesheets, {} images",
            scripts, stylesheets, images
        ),
        too_many.then_some("Consider reducing the number of scripts"),
        Some(json!({ "scripts": scripts, "stylesheets": stylesheets, "images": images })),
    );
}
