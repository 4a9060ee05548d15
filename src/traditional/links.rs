//! Link checks.

use serde_json::json;
use url::Url;

use super::{ScanContext, TraditionalCategory::Links};
use crate::scoring::Severity;

const GENERIC_ANCHORS: [&str; 5] = ["click here", "here", "read more", "link", "this"];

impl ScanContext<'_> {
    /// Root-relative links, and links resolving to the page's own host.
    fn is_internal_link(&self, href: &str) -> bool {
        if href.is_empty() || href.starts_with('#') || href.starts_with("javascript:") {
            return false;
        }
        if href.starts_with('/') {
            return true;
        }
        match &self.base {
            Some(base) => base
                .join(href)
                .map(|resolved| resolved.host_str().unwrap_or_default() == self.host)
                .unwrap_or(false),
            None => false,
        }
    }

    /// Absolute links to a different host.
    fn is_external_link(&self, href: &str) -> bool {
        if href.is_empty()
            || href.starts_with('#')
            || href.starts_with('/')
            || href.starts_with("javascript:")
        {
            return false;
        }
        Url::parse(href)
            .map(|link| link.host_str().unwrap_or_default() != self.host)
            .unwrap_or(false)
    }
}

pub(super) fn check_internal_links(ctx: &mut ScanContext<'_>) {
    let count = ctx
        .doc
        .query_selector_all("a[href]")
        .iter()
        .filter(|a| ctx.is_internal_link(a.attr("href").unwrap_or_default()))
        .count();

    if count == 0 {
        ctx.add(
            "Internal Links",
            Links,
            Severity::Warning,
            "No internal links found",
            Some("Add internal links to help users and search engines discover content"),
            None,
        );
    } else if count < ctx.thresholds.min_internal_links {
        ctx.add(
            "Internal Links",
            Links,
            Severity::Warning,
            format!("Only {} internal link(s) found", count),
            Some("Add more internal links (aim for 3-10 per page)"),
            Some(json!({ "count": count })),
        );
    } else {
        ctx.add(
            "Internal Links",
            Links,
            Severity::Good,
            format!("{} internal links found", count),
            None,
            Some(json!({ "count": count })),
        );
    }
}

pub(super) fn check_external_links(ctx: &mut ScanContext<'_>) {
    let external: Vec<_> = ctx
        .doc
        .query_selector_all("a[href]")
        .into_iter()
        .filter(|a| ctx.is_external_link(a.attr("href").unwrap_or_default()))
        .collect();
    let count = external.len();
    let nofollow = external
        .iter()
        .filter(|a| a.attr("rel").is_some_and(|rel| rel.contains("nofollow")))
        .count();

    if count == 0 {
        ctx.add(
            "External Links",
            Links,
            Severity::Info,
            "No external links found",
            Some("Consider linking to authoritative sources for credibility"),
            None,
        );
    } else {
        ctx.add(
            "External Links",
            Links,
            Severity::Good,
            format!("{} external links ({} nofollow)", count, nofollow),
            None,
            Some(json!({ "count": count, "nofollow": nofollow })),
        );
    }
}

pub(super) fn check_link_anchors(ctx: &mut ScanContext<'_>) {
    let mut generic: Vec<String> = Vec::new();
    for link in ctx.doc.query_selector_all("a[href]") {
        let text = link.text().trim().to_lowercase();
        if GENERIC_ANCHORS.contains(&text.as_str()) {
            generic.push(text);
        }
    }

    if generic.is_empty() {
        ctx.add(
            "Link Anchor Text",
            Links,
            Severity::Good,
            "All link anchors are descriptive",
            None,
            None,
        );
        return;
    }

    let count = generic.len();
    let mut unique: Vec<String> = Vec::new();
    for text in generic {
        if !unique.contains(&text) {
            unique.push(text);
        }
    }
    ctx.add(
        "Link Anchor Text",
        Links,
        Severity::Warning,
        format!("{} generic anchor texts found", count),
        Some("Use descriptive anchor text instead of \"click here\" or \"read more\""),
        Some(json!({ "badAnchors": unique })),
    );
}
