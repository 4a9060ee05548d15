//! CSV export.
//!
//! One row per check. Fields are quoted only when they need it.

use anyhow::{Context, Result};
use csv::{Terminator, Writer, WriterBuilder};

use crate::aggregate::OverallReport;
use crate::scoring::{Category, Report};

const HEADERS: [&str; 5] = ["Check", "Category", "Status", "Message", "Recommendation"];

fn new_writer() -> Writer<Vec<u8>> {
    WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new())
}

fn write_rows<C: Category>(
    writer: &mut Writer<Vec<u8>>,
    prefix: Option<&str>,
    report: &Report<C>,
) -> Result<()> {
    for check in &report.checks {
        let row = [
            check.name.as_str(),
            check.category.label(),
            check.severity.as_str(),
            check.message.as_str(),
            check.recommendation.as_deref().unwrap_or(""),
        ];
        match prefix {
            Some(kind) => writer.write_record(std::iter::once(kind).chain(row))?,
            None => writer.write_record(row)?,
        }
    }
    Ok(())
}

fn finish(writer: Writer<Vec<u8>>) -> Result<String> {
    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to flush CSV writer: {}", e.error()))?;
    String::from_utf8(bytes).context("CSV output was not valid UTF-8")
}

/// Exports one report's checks as CSV with the header
/// `Check,Category,Status,Message,Recommendation`.
///
/// # Errors
///
/// Returns an error if a record cannot be written.
pub fn export_csv<C: Category>(report: &Report<C>) -> Result<String> {
    let mut writer = new_writer();
    writer.write_record(HEADERS)?;
    write_rows(&mut writer, None, report)?;
    finish(writer)
}

/// Exports every sub-report of an overall report, prefixed with a `Report` column.
///
/// # Errors
///
/// Returns an error if a record cannot be written.
pub fn export_overall_csv(report: &OverallReport) -> Result<String> {
    let mut writer = new_writer();
    writer.write_record(std::iter::once("Report").chain(HEADERS))?;
    if let Some(r) = &report.traditional {
        write_rows(&mut writer, Some(r.kind.as_str()), r)?;
    }
    if let Some(r) = &report.pseo {
        write_rows(&mut writer, Some(r.kind.as_str()), r)?;
    }
    if let Some(r) = &report.aeo {
        write_rows(&mut writer, Some(r.kind.as_str()), r)?;
    }
    if let Some(r) = &report.geo {
        write_rows(&mut writer, Some(r.kind.as_str()), r)?;
    }
    finish(writer)
}
