// Traditional scanner tests.

use super::*;
use crate::scoring::{Grade, Severity};
use chrono::TimeZone;

const URL: &str = "https://example.com/blog/snowflake-data-loading";

fn page(head: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html><html lang=\"en\"><head>{}</head><body>{}</body></html>",
        head, body
    )
}

fn scan(head: &str, body: &str) -> Report<TraditionalCategory> {
    TraditionalScanner::new().analyze(URL, &page(head, body))
}

fn severity_of(report: &Report<TraditionalCategory>, name: &str) -> Option<Severity> {
    report.find(name).map(|c| c.severity)
}

fn words(n: usize) -> String {
    (0..n)
        .map(|i| if i % 10 == 9 { "word." } else { "word" })
        .collect::<Vec<_>>()
        .join(" ")
}

#[test]
fn test_title_length_boundaries() {
    for (length, expected) in [
        (29, Severity::Warning),
        (30, Severity::Good),
        (60, Severity::Good),
        (61, Severity::Warning),
    ] {
        let head = format!("<title>{}</title>", "a".repeat(length));
        let report = scan(&head, "");
        let check = report.find("Title Tag").unwrap();
        assert_eq!(check.severity, expected, "title length {}", length);
        assert_eq!(check.details.as_ref().unwrap()["length"], length);
    }
}

#[test]
fn test_title_length_counts_chars_not_bytes() {
    let head = format!("<title>{}</title>", "é".repeat(30));
    let report = scan(&head, "");
    assert_eq!(severity_of(&report, "Title Tag"), Some(Severity::Good));
}

#[test]
fn test_missing_title_description_viewport_clamps_score() {
    let report = TraditionalScanner::new().analyze(URL, "<html><head></head><body></body></html>");
    assert_eq!(severity_of(&report, "Title Tag"), Some(Severity::Critical));
    assert_eq!(severity_of(&report, "Meta Description"), Some(Severity::Critical));
    assert_eq!(severity_of(&report, "Mobile Viewport"), Some(Severity::Critical));
    assert!(report.summary.critical > 2);
    assert!(report.score <= 30);
    assert_eq!(report.grade, Grade::F);
}

#[test]
fn test_empty_input_never_panics() {
    let report = TraditionalScanner::new().analyze("", "");
    assert!(report.summary.total > 0);
    assert!(report.score <= 100);
    assert_eq!(report.url.as_deref(), Some(""));
}

#[test]
fn test_checks_run_in_fixed_order() {
    let report = scan("<title>Loading Data Into Snowflake With COPY INTO</title>", "<h1>Hi</h1>");
    let names: Vec<&str> = report.checks.iter().map(|c| c.name.as_str()).collect();
    let position = |name: &str| names.iter().position(|n| *n == name).unwrap();
    assert_eq!(names[0], "Title Tag");
    assert_eq!(names[1], "Meta Description");
    assert!(position("H1 Structure") < position("Internal Links"));
    assert!(position("Schema Markup") < position("Open Graph Tags"));
    assert!(position("Canonical URL") < position("SSL/HTTPS"));
    assert!(position("Page Size") < position("Resource Count"));
    assert_eq!(*names.last().unwrap(), "Link Anchor Text");
}

#[test]
fn test_multiple_h1_truncates_details() {
    let long = "x".repeat(150);
    let body = format!("<h1>{}</h1><h1>Second</h1>", long);
    let report = scan("", &body);
    let check = report.find("H1 Structure").unwrap();
    assert_eq!(check.severity, Severity::Warning);
    let h1s = check.details.as_ref().unwrap()["h1s"].as_array().unwrap();
    assert_eq!(h1s[0].as_str().unwrap().chars().count(), 100);
    assert_eq!(h1s[1], "Second");
}

#[test]
fn test_heading_hierarchy() {
    let report = scan("", "");
    assert_eq!(severity_of(&report, "Heading Hierarchy"), Some(Severity::Warning));

    let report = scan("", "<h1>A</h1><h3>B</h3>");
    let check = report.find("Heading Hierarchy").unwrap();
    assert_eq!(check.severity, Severity::Warning);
    assert!(check.message.contains("skip"));

    // Starting below H1 is not a skip; going back up is fine.
    let report = scan("", "<h2>A</h2><h3>B</h3><h2>C</h2><h3>D</h3><h4>E</h4>");
    let check = report.find("Heading Hierarchy").unwrap();
    assert_eq!(check.severity, Severity::Good);
    assert_eq!(check.message, "Proper heading hierarchy (5 headings)");
}

#[test]
fn test_internal_and_external_links() {
    let body = r##"
        <a href="/one">one</a>
        <a href="https://example.com/two">two</a>
        <a href="three">three</a>
        <a href="#top">top</a>
        <a href="javascript:void(0)">js</a>
        <a href="https://docs.snowflake.com/" rel="nofollow noopener">docs</a>
        <a href="https://github.com/">gh</a>
    "##;
    let report = scan("", body);

    let internal = report.find("Internal Links").unwrap();
    assert_eq!(internal.severity, Severity::Good);
    assert_eq!(internal.details.as_ref().unwrap()["count"], 3);

    let external = report.find("External Links").unwrap();
    assert_eq!(external.severity, Severity::Good);
    assert_eq!(external.message, "2 external links (1 nofollow)");
}

#[test]
fn test_few_internal_links_warn() {
    let report = scan("", r#"<a href="/a">a</a>"#);
    let check = report.find("Internal Links").unwrap();
    assert_eq!(check.severity, Severity::Warning);
    assert_eq!(check.message, "Only 1 internal link(s) found");

    let report = scan("", "");
    assert_eq!(severity_of(&report, "Internal Links"), Some(Severity::Warning));
    assert_eq!(severity_of(&report, "External Links"), Some(Severity::Info));
}

#[test]
fn test_unparseable_url_degrades_link_checks() {
    let html = page(
        "<title>Title</title>",
        r#"<a href="/root">r</a><a href="relative">x</a><a href="https://other.com">o</a>"#,
    );
    let report = TraditionalScanner::new().analyze("not a url", &html);
    let internal = report.find("Internal Links").unwrap();
    assert_eq!(internal.details.as_ref().unwrap()["count"], 1);
    assert_eq!(severity_of(&report, "External Links"), Some(Severity::Good));
    assert_eq!(severity_of(&report, "Keywords in URL"), Some(Severity::Info));
    assert_eq!(severity_of(&report, "SSL/HTTPS"), Some(Severity::Critical));
}

#[test]
fn test_images() {
    let report = scan("", "");
    assert_eq!(severity_of(&report, "Image Optimization"), Some(Severity::Info));
    assert!(report.find("Image Alt Text").is_none());

    let report = scan(
        "",
        r#"<img src="a.png" alt="A"><img src="b.webp" alt="  "><img src="c.JPG?w=10">"#,
    );
    let alt = report.find("Image Alt Text").unwrap();
    assert_eq!(alt.severity, Severity::Warning);
    assert_eq!(alt.message, "2/3 images missing alt text");
    let formats = report.find("Image Formats").unwrap();
    assert_eq!(formats.severity, Severity::Info);
    assert_eq!(formats.details.as_ref().unwrap()["legacyCount"], 2);

    let report = scan("", r#"<img src="a.webp" alt="A">"#);
    assert_eq!(severity_of(&report, "Image Alt Text"), Some(Severity::Good));
    assert!(report.find("Image Formats").is_none());
}

#[test]
fn test_schema_markup_skips_malformed_blocks() {
    let head = r#"
        <script type="application/ld+json">{"@type": "Article"}</script>
        <script type="application/ld+json">{not json</script>
        <script type="application/ld+json">{"@type": ["FAQPage", "WebPage"]}</script>
    "#;
    let report = scan(head, "");
    let check = report.find("Schema Markup").unwrap();
    assert_eq!(check.severity, Severity::Good);
    assert_eq!(check.message, "3 schema(s) found: Article, FAQPage,WebPage");
    assert_eq!(check.details.as_ref().unwrap()["types"].as_array().unwrap().len(), 2);

    let report = scan("", "");
    assert_eq!(severity_of(&report, "Schema Markup"), Some(Severity::Warning));
}

#[test]
fn test_open_graph_and_twitter() {
    let report = scan("", "");
    assert_eq!(severity_of(&report, "Open Graph Tags"), Some(Severity::Warning));
    assert_eq!(severity_of(&report, "Twitter Cards"), Some(Severity::Info));

    let head = r#"
        <meta property="og:title" content="T">
        <meta property="og:description" content="D">
        <meta name="twitter:card" content="summary_large_image">
    "#;
    let report = scan(head, "");
    let og = report.find("Open Graph Tags").unwrap();
    assert_eq!(og.message, "Missing OG tags: og:image, og:url, og:type");
    assert_eq!(severity_of(&report, "Twitter Cards"), Some(Severity::Warning));

    let head = r#"
        <meta property="og:title" content="T">
        <meta property="og:description" content="D">
        <meta property="og:image" content="https://example.com/i.png">
        <meta property="og:url" content="https://example.com/">
        <meta property="og:type" content="article">
        <meta name="twitter:card" content="summary">
        <meta name="twitter:title" content="T">
    "#;
    let report = scan(head, "");
    assert_eq!(severity_of(&report, "Open Graph Tags"), Some(Severity::Good));
    assert_eq!(severity_of(&report, "Twitter Cards"), Some(Severity::Good));
}

#[test]
fn test_social_image_size() {
    let report = scan("", "");
    assert_eq!(severity_of(&report, "Social Image"), Some(Severity::Warning));

    let image = r#"<meta property="og:image" content="https://example.com/i.png">"#;
    let report = scan(image, "");
    assert_eq!(severity_of(&report, "Social Image Size"), Some(Severity::Info));

    let head = format!(
        r#"{}<meta property="og:image:width" content="800"><meta property="og:image:height" content="630">"#,
        image
    );
    let report = scan(&head, "");
    let check = report.find("Social Image Size").unwrap();
    assert_eq!(check.severity, Severity::Warning);
    assert_eq!(check.message, "Social image too small (800x630)");

    let head = format!(
        r#"{}<meta property="og:image:width" content="1200"><meta property="og:image:height" content="630">"#,
        image
    );
    let report = scan(&head, "");
    assert_eq!(severity_of(&report, "Social Image Size"), Some(Severity::Good));
}

#[test]
fn test_canonical_url() {
    let report = scan("", "");
    assert_eq!(severity_of(&report, "Canonical URL"), Some(Severity::Warning));

    let head = format!(r#"<link rel="canonical" href="{}/">"#, URL);
    let report = scan(&head, "");
    assert_eq!(severity_of(&report, "Canonical URL"), Some(Severity::Good));

    let report = scan(r#"<link rel="canonical" href="/blog/snowflake-data-loading">"#, "");
    assert_eq!(severity_of(&report, "Canonical URL"), Some(Severity::Good));

    let report = scan(r#"<link rel="canonical" href="https://example.com/page/2">"#, "");
    let check = report.find("Canonical URL").unwrap();
    assert_eq!(check.severity, Severity::Info);
    assert_eq!(check.details.as_ref().unwrap()["currentUrl"], URL);
}

#[test]
fn test_robots_meta() {
    let report = scan("", "");
    assert_eq!(severity_of(&report, "Robots Meta"), Some(Severity::Info));

    let report = scan(r#"<meta name="robots" content="NOINDEX, follow">"#, "");
    assert_eq!(severity_of(&report, "Robots Meta"), Some(Severity::Critical));

    let report = scan(r#"<meta name="robots" content="index, nofollow">"#, "");
    assert_eq!(severity_of(&report, "Robots Meta"), Some(Severity::Warning));

    let report = scan(r#"<meta name="robots" content="index, follow">"#, "");
    assert_eq!(severity_of(&report, "Robots Meta"), Some(Severity::Good));
}

#[test]
fn test_viewport_and_ssl() {
    let report = scan(r#"<meta name="viewport" content="width=device-width, initial-scale=1">"#, "");
    assert_eq!(severity_of(&report, "Mobile Viewport"), Some(Severity::Good));
    assert_eq!(severity_of(&report, "SSL/HTTPS"), Some(Severity::Good));

    let report = scan(r#"<meta name="viewport" content="initial-scale=1">"#, "");
    assert_eq!(severity_of(&report, "Mobile Viewport"), Some(Severity::Warning));

    let report = TraditionalScanner::new().analyze("http://example.com/", &page("", ""));
    assert_eq!(severity_of(&report, "SSL/HTTPS"), Some(Severity::Critical));
}

#[test]
fn test_url_structure_issues() {
    let report = scan("", "");
    assert_eq!(severity_of(&report, "URL Structure"), Some(Severity::Good));

    let report = TraditionalScanner::new().analyze("https://example.com/My_Page?id=3", &page("", ""));
    let check = report.find("URL Structure").unwrap();
    assert_eq!(check.severity, Severity::Warning);
    assert_eq!(check.message, "URL has 3 issue(s)");
    assert_eq!(
        check.recommendation.as_deref(),
        Some("URL contains query parameters; URL uses underscores (use hyphens instead); URL contains uppercase letters")
    );

    // Tracking parameters alone are tolerated.
    let report = TraditionalScanner::new().analyze("https://example.com/page?utm-source=x&utm_medium=y", &page("", ""));
    let check = report.find("URL Structure").unwrap();
    assert_eq!(check.message, "URL has 1 issue(s)");
}

#[test]
fn test_content_length_prefers_main_content() {
    let body = format!("<nav>{}</nav><main>{}</main>", words(500), words(50));
    let report = scan("", &body);
    let check = report.find("Content Length").unwrap();
    assert_eq!(check.severity, Severity::Warning);
    assert_eq!(check.message, "Thin content (50 words)");

    let report = scan("", &words(400));
    assert_eq!(report.find("Content Length").unwrap().message, "Good content length (400 words)");

    let report = scan("", &words(1000));
    assert_eq!(
        report.find("Content Length").unwrap().message,
        "Comprehensive content (1000 words)"
    );
}

#[test]
fn test_readability() {
    let report = scan("", "");
    assert!(report.find("Readability").is_none());

    let report = scan("", &words(100));
    let check = report.find("Readability").unwrap();
    assert_eq!(check.severity, Severity::Good);
    assert_eq!(check.message, "Good readability (avg 10 words/sentence)");

    let long_sentence = format!("{}.", vec!["word"; 30].join(" "));
    let report = scan("", &long_sentence);
    let check = report.find("Readability").unwrap();
    assert_eq!(check.severity, Severity::Warning);
    assert_eq!(check.details.as_ref().unwrap()["avgSentenceLength"], 30);
}

#[test]
fn test_accessibility() {
    let report = scan("", "<p>plain</p>");
    let check = report.find("Accessibility").unwrap();
    assert_eq!(check.severity, Severity::Info);
    assert_eq!(check.message, "2 accessibility improvements possible");

    let body = r##"
        <a href="#main" class="skip-link">Skip</a>
        <nav></nav>
        <main id="main">
          <label for="email">Email</label><input id="email" type="email">
          <input type="text" aria-label="Search">
          <input type="hidden" name="token">
          <input type="submit">
        </main>
    "##;
    let report = scan("", body);
    assert_eq!(severity_of(&report, "Accessibility"), Some(Severity::Good));

    let report = scan("", r##"<a href="#content">Skip</a><main><input type="text"></main>"##);
    let check = report.find("Accessibility").unwrap();
    assert_eq!(check.recommendation.as_deref(), Some("1 form inputs without labels"));
}

#[test]
fn test_silent_checks() {
    let report = scan("", "");
    assert!(report.find("Hreflang Tags").is_none());
    assert!(report.find("Meta Keywords").is_none());
    assert!(report.find("Lazy Loading").is_none());
    assert!(report.find("Content Freshness").is_none());

    let head = r#"
        <link rel="alternate" hreflang="en" href="/en">
        <link rel="alternate" hreflang="de" href="/de">
        <meta name="keywords" content="snowflake, sql">
    "#;
    let report = scan(head, "");
    let hreflang = report.find("Hreflang Tags").unwrap();
    assert_eq!(hreflang.severity, Severity::Good);
    assert_eq!(hreflang.details.as_ref().unwrap()["languages"][1], "de");
    assert_eq!(severity_of(&report, "Meta Keywords"), Some(Severity::Info));
}

#[test]
fn test_favicon_doctype_encoding_language() {
    let report = TraditionalScanner::new().analyze(URL, "<html><head></head><body></body></html>");
    assert_eq!(severity_of(&report, "Favicon"), Some(Severity::Info));
    assert_eq!(severity_of(&report, "HTML Doctype"), Some(Severity::Good));
    assert_eq!(severity_of(&report, "Character Encoding"), Some(Severity::Warning));
    assert_eq!(severity_of(&report, "Language Attribute"), Some(Severity::Warning));

    let head = r#"
        <meta charset="UTF-8">
        <link rel="icon" href="/favicon.ico">
        <link rel="apple-touch-icon" href="/apple.png">
    "#;
    let report = scan(head, "");
    assert_eq!(report.find("Favicon").unwrap().message, "Favicon found + Apple touch icon");
    assert_eq!(severity_of(&report, "Character Encoding"), Some(Severity::Good));
    assert_eq!(report.find("Language Attribute").unwrap().message, "Language declared: en");

    let report = scan(r#"<meta http-equiv="Content-Type" content="text/html; charset=ISO-8859-1">"#, "");
    assert_eq!(severity_of(&report, "Character Encoding"), Some(Severity::Info));
}

#[test]
fn test_lazy_loading() {
    let eager = r#"<img src="a.webp" alt="a">"#.repeat(4);
    let report = scan("", &eager);
    assert_eq!(severity_of(&report, "Lazy Loading"), Some(Severity::Info));

    let report = scan("", &r#"<img src="a.webp" alt="a">"#.repeat(3));
    assert!(report.find("Lazy Loading").is_none());

    let mixed = format!(
        r#"{}<img data-src="b.webp" alt="b"><img class="hero lazy" src="c.webp" alt="c">"#,
        eager
    );
    let report = scan("", &mixed);
    assert_eq!(report.find("Lazy Loading").unwrap().message, "2/6 images use lazy loading");
}

#[test]
fn test_keywords_in_url() {
    let report = scan("<title>Snowflake Loading Guide</title>", "");
    assert_eq!(severity_of(&report, "Keywords in URL"), Some(Severity::Good));

    let report = scan("<title>An Unrelated Title</title>", "");
    assert_eq!(severity_of(&report, "Keywords in URL"), Some(Severity::Info));
}

#[test]
fn test_content_freshness_uses_injected_clock() {
    let now = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
    let scanner = TraditionalScanner::new().at(now);

    let stale = page(r#"<meta property="article:modified_time" content="2024-04-27T00:00:00Z">"#, "");
    let report = scanner.analyze(URL, &stale);
    let check = report.find("Content Freshness").unwrap();
    assert_eq!(check.severity, Severity::Info);
    assert_eq!(check.message, "Content last updated 400 days ago");

    let fresh = page(r#"<meta name="last-modified" content="2025-05-01">"#, "");
    let report = scanner.analyze(URL, &fresh);
    assert_eq!(severity_of(&report, "Content Freshness"), Some(Severity::Good));

    let published = page(r#"<meta property="article:published_time" content="2020-01-01">"#, "");
    let report = scanner.analyze(URL, &published);
    let check = report.find("Content Freshness").unwrap();
    assert_eq!(check.severity, Severity::Info);
    assert_eq!(check.message, "Published date found, but no modified date");
}

#[test]
fn test_page_size_and_resources() {
    let report = scan("", "");
    assert_eq!(severity_of(&report, "Page Size"), Some(Severity::Good));
    assert_eq!(severity_of(&report, "Resource Count"), Some(Severity::Info));

    let big = "x".repeat(600 * 1024);
    let scripts = r#"<script src="/a.js"></script>"#.repeat(16);
    let report = scan(&scripts, &format!("<p>{}</p>", big));
    assert_eq!(severity_of(&report, "Page Size"), Some(Severity::Warning));
    let resources = report.find("Resource Count").unwrap();
    assert_eq!(resources.severity, Severity::Warning);
    assert!(resources.message.starts_with("16 scripts"));
}

#[test]
fn test_link_anchors() {
    let body = r#"<a href="/a">Click here</a><a href="/b"> read more </a><a href="/c">click here</a><a href="/d">Snowflake docs</a>"#;
    let report = scan("", body);
    let check = report.find("Link Anchor Text").unwrap();
    assert_eq!(check.severity, Severity::Warning);
    assert_eq!(check.message, "3 generic anchor texts found");
    assert_eq!(
        check.details.as_ref().unwrap()["badAnchors"],
        serde_json::json!(["click here", "read more"])
    );
}

#[test]
fn test_duplicate_content() {
    let head = r#"<title>Same text</title><meta name="description" content=" Same text ">"#;
    let report = scan(head, "");
    assert_eq!(severity_of(&report, "Duplicate Content"), Some(Severity::Warning));

    let head = r#"<title>Title</title><meta name="description" content="Different">"#;
    let report = scan(head, "");
    assert!(report.find("Duplicate Content").is_none());
}

#[test]
fn test_report_metadata() {
    let report = scan("", "");
    assert_eq!(report.kind, ReportType::Traditional);
    assert_eq!(report.url.as_deref(), Some(URL));
    assert_eq!(report.summary.total, report.checks.len());
    let categorized: usize = report.by_category.values().map(|s| s.total).sum();
    assert_eq!(categorized, report.checks.len());
    assert!(report.by_category.contains_key("Meta Tags"));
}

#[test]
fn test_custom_thresholds() {
    let scanner = TraditionalScanner::with_thresholds(Thresholds {
        title_min_chars: 5,
        ..Thresholds::default()
    });
    let report = scanner.analyze(URL, &page("<title>Short</title>", ""));
    assert_eq!(severity_of(&report, "Title Tag"), Some(Severity::Good));
    assert_eq!(scanner.thresholds().title_max_chars, 60);
}

#[test]
fn test_analyze_document_matches_analyze() {
    let html = page("<title>Loading Data Into Snowflake With COPY INTO</title>", "<h1>Hi</h1>");
    let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
    let scanner = TraditionalScanner::new().at(now);
    let parsed = ParsedDocument::parse(&html);
    let a = scanner.analyze(URL, &html);
    let mut b = scanner.analyze_document(URL, &parsed);
    b.analyzed_at = a.analyzed_at;
    assert_eq!(a, b);
}
