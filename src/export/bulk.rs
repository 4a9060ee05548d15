//! Exports for bulk scan results and history listings.

use std::fmt::Write;

use anyhow::{Context, Result};
use csv::{Terminator, WriterBuilder};
use serde::Serialize;

use crate::bulk::BulkResult;
use crate::history::ScanEntry;

fn to_csv<T: Serialize>(rows: &[T]) -> Result<String> {
    let mut writer = WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    for row in rows {
        writer.serialize(row)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to flush CSV writer: {}", e.error()))?;
    String::from_utf8(bytes).context("CSV output was not valid UTF-8")
}

#[derive(Serialize)]
struct BulkRow<'a> {
    key: &'a str,
    title: &'a str,
    url: &'a str,
    score: u8,
    grade: &'static str,
    trend: i32,
    pseo: u8,
    aeo: u8,
    geo: u8,
    critical: usize,
    warning: usize,
    error: &'a str,
}

/// One CSV row per bulk item, headed by the `BulkResult` field names.
pub fn export_bulk_csv(results: &[BulkResult]) -> Result<String> {
    let rows: Vec<BulkRow<'_>> = results
        .iter()
        .map(|r| BulkRow {
            key: &r.key,
            title: &r.title,
            url: &r.url,
            score: r.score,
            grade: r.grade.as_str(),
            trend: r.trend,
            pseo: r.pseo,
            aeo: r.aeo,
            geo: r.geo,
            critical: r.critical,
            warning: r.warning,
            error: r.error.as_deref().unwrap_or_default(),
        })
        .collect();
    to_csv(&rows)
}

/// Markdown table of bulk results, failed items last with their error.
pub fn export_bulk_markdown(results: &[BulkResult]) -> String {
    let mut md = String::from("# Bulk Scan Results\n\n");
    md.push_str("| Item | Score | Grade | Trend | PSEO | AEO | GEO | Critical | Warnings |\n");
    md.push_str("|------|-------|-------|-------|------|-----|-----|----------|----------|\n");
    for r in results.iter().filter(|r| r.error.is_none()) {
        let trend = match r.trend {
            t if t > 0 => format!("+{t}"),
            t => t.to_string(),
        };
        let _ = writeln!(
            md,
            "| {} | {} | {} | {} | {} | {} | {} | {} | {} |",
            label(r),
            r.score,
            r.grade,
            trend,
            r.pseo,
            r.aeo,
            r.geo,
            r.critical,
            r.warning
        );
    }

    let failed: Vec<&BulkResult> = results.iter().filter(|r| r.error.is_some()).collect();
    if !failed.is_empty() {
        md.push_str("\n## ❌ Failed\n\n");
        for r in failed {
            let _ = writeln!(
                md,
                "- **{}**: {}",
                label(r),
                r.error.as_deref().unwrap_or_default()
            );
        }
    }
    md
}

fn label(result: &BulkResult) -> &str {
    if result.title.is_empty() {
        &result.key
    } else {
        &result.title
    }
}

#[derive(Serialize)]
struct HistoryRow<'a> {
    key: &'a str,
    score: u8,
    scanned_at: String,
    details: String,
}

/// One CSV row per history entry; details are embedded as JSON text.
pub fn export_history_csv(entries: &[ScanEntry]) -> Result<String> {
    let rows: Vec<HistoryRow<'_>> = entries
        .iter()
        .map(|e| HistoryRow {
            key: &e.key,
            score: e.score,
            scanned_at: e.scanned_at.to_rfc3339(),
            details: e.details.to_string(),
        })
        .collect();
    to_csv(&rows)
}

/// Markdown table of history entries, newest first as given.
pub fn export_history_markdown(entries: &[ScanEntry]) -> String {
    let mut md = String::from("# Scan History\n\n| Key | Score | Scanned |\n|-----|-------|---------|\n");
    for e in entries {
        let _ = writeln!(
            md,
            "| {} | {} | {} |",
            e.key,
            e.score,
            e.scanned_at.format("%Y-%m-%d %H:%M:%S UTC")
        );
    }
    md
}
