//! Report exporters.
//!
//! Renders a [`Report`](crate::scoring::Report) or an
//! [`OverallReport`](crate::aggregate::OverallReport) as Markdown, CSV or JSON,
//! plus tables for bulk results and history listings.

mod bulk;
mod csv;
mod json;
mod markdown;

pub use bulk::{
    export_bulk_csv, export_bulk_markdown, export_history_csv, export_history_markdown,
};
pub use self::csv::{export_csv, export_overall_csv};
pub use json::export_json;
pub use markdown::{export_markdown, export_overall_markdown, MarkdownOptions};
