//! Markdown export.

use std::fmt::Write;

use crate::aggregate::OverallReport;
use crate::scoring::{Category, Report, Severity};

/// Options for [`export_markdown`].
#[derive(Debug, Clone)]
pub struct MarkdownOptions {
    /// Append each check's `details` payload under its bullet.
    pub include_details: bool,
    /// Top-level heading.
    pub title: String,
}

impl Default for MarkdownOptions {
    fn default() -> Self {
        Self {
            include_details: true,
            title: "SEO Analysis Report".to_string(),
        }
    }
}

/// Renders one report as Markdown.
///
/// Layout: title, URL/score/timestamp lines, a summary table, then the critical
/// issues, warnings and passed checks (each section only when non-empty).
pub fn export_markdown<C: Category>(report: &Report<C>, options: &MarkdownOptions) -> String {
    let mut md = format!("# {}\n\n", options.title);
    write_report(&mut md, report, options, 2);
    md
}

/// Renders an overall report, one section per analyzer that ran.
pub fn export_overall_markdown(report: &OverallReport, options: &MarkdownOptions) -> String {
    let mut md = format!("# {}\n\n", options.title);
    let _ = writeln!(
        md,
        "**Overall Score:** {}/100 ({})\n",
        report.overall_score, report.overall_grade
    );

    if let Some(r) = &report.traditional {
        write_section(&mut md, "Traditional SEO", r, options);
    }
    if let Some(r) = &report.pseo {
        write_section(&mut md, "Programmatic SEO", r, options);
    }
    if let Some(r) = &report.aeo {
        write_section(&mut md, "Answer Engine Optimization", r, options);
    }
    if let Some(r) = &report.geo {
        write_section(&mut md, "Generative Engine Optimization", r, options);
    }
    md
}

fn write_section<C: Category>(
    md: &mut String,
    heading: &str,
    report: &Report<C>,
    options: &MarkdownOptions,
) {
    let _ = writeln!(md, "## {heading}\n");
    write_report(md, report, options, 3);
    md.push('\n');
}

fn write_report<C: Category>(
    md: &mut String,
    report: &Report<C>,
    options: &MarkdownOptions,
    level: usize,
) {
    let hashes = "#".repeat(level);

    let _ = writeln!(md, "**URL:** {}", report.url.as_deref().unwrap_or("N/A"));
    let _ = writeln!(md, "**Score:** {}/100 ({})", report.score, report.grade);
    let _ = writeln!(
        md,
        "**Analyzed:** {}\n",
        report.analyzed_at.format("%Y-%m-%d %H:%M:%S UTC")
    );

    let _ = writeln!(md, "{hashes} Summary\n");
    md.push_str("| Status | Count |\n|--------|-------|\n");
    let _ = writeln!(md, "| ✅ Good | {} |", report.summary.good);
    let _ = writeln!(md, "| ⚠️ Warning | {} |", report.summary.warning);
    let _ = writeln!(md, "| ❌ Critical | {} |", report.summary.critical);
    let _ = writeln!(md, "| ℹ️ Info | {} |\n", report.summary.info);

    let sections = [
        (Severity::Critical, "❌ Critical Issues", true),
        (Severity::Warning, "⚠️ Warnings", true),
        (Severity::Good, "✅ Passed", false),
    ];
    for (severity, heading, with_fix) in sections {
        let mut checks = report.checks_with(severity).peekable();
        if checks.peek().is_none() {
            continue;
        }
        let _ = writeln!(md, "{hashes} {heading}\n");
        for check in checks {
            let _ = writeln!(md, "- **{}**: {}", check.name, check.message);
            if with_fix {
                if let Some(rec) = &check.recommendation {
                    let _ = writeln!(md, "  - Fix: {rec}");
                }
            }
            if options.include_details {
                if let Some(details) = &check.details {
                    let _ = writeln!(md, "  - Details: `{details}`");
                }
            }
        }
        md.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::analyze_article_full;
    use crate::models::Article;
    use crate::traditional::TraditionalScanner;

    const PAGE: &str = "<html><head><title>Short</title></head><body><p>Hi</p></body></html>";

    #[test]
    fn test_export_markdown_layout() {
        let report = TraditionalScanner::new().analyze("https://example.com/", PAGE);
        let md = export_markdown(&report, &MarkdownOptions::default());

        assert!(md.starts_with("# SEO Analysis Report\n\n**URL:** https://example.com/\n"));
        assert!(md.contains(&format!("**Score:** {}/100 ({})", report.score, report.grade)));
        assert!(md.contains("## Summary\n\n| Status | Count |\n|--------|-------|\n"));
        assert!(md.contains(&format!("| ❌ Critical | {} |", report.summary.critical)));
        assert!(md.contains("## ❌ Critical Issues"));
        assert!(md.contains("## ⚠️ Warnings"));
        assert!(md.contains("  - Fix: "));

        let critical = md.find("## ❌ Critical Issues").unwrap();
        let warnings = md.find("## ⚠️ Warnings").unwrap();
        assert!(critical < warnings);
    }

    #[test]
    fn test_export_markdown_options() {
        let report = TraditionalScanner::new().analyze("https://example.com/", PAGE);
        let options = MarkdownOptions {
            include_details: false,
            title: "Homepage Audit".into(),
        };
        let md = export_markdown(&report, &options);
        assert!(md.starts_with("# Homepage Audit\n"));
        assert!(!md.contains("  - Details: "));

        let with_details = export_markdown(&report, &MarkdownOptions::default());
        assert!(with_details.contains("  - Details: `"));
    }

    #[test]
    fn test_export_markdown_missing_url() {
        let report = crate::aeo::AeoAnalyzer::new().analyze(&Article::default());
        let md = export_markdown(&report, &MarkdownOptions::default());
        assert!(md.contains("**URL:** N/A\n"));
        assert!(!md.contains("## ✅ Passed"));
    }

    #[test]
    fn test_export_overall_markdown_sections() {
        let report = analyze_article_full(&Article::default(), None);
        let md = export_overall_markdown(&report, &MarkdownOptions::default());
        assert!(md.contains(&format!("**Overall Score:** {}/100", report.overall_score)));
        assert!(!md.contains("## Traditional SEO"));
        assert!(md.contains("## Programmatic SEO"));
        assert!(md.contains("## Answer Engine Optimization"));
        assert!(md.contains("## Generative Engine Optimization"));
        assert!(md.contains("### Summary"));
    }
}
