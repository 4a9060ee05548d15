//! seo_suite library: multi-dimensional content scoring
//!
//! This library scores HTML pages and blog articles along four independent
//! dimensions and merges them into one overall grade:
//!
//! - **Traditional SEO**: meta tags, headings, links, images, social tags and
//!   technical signals of a rendered page
//! - **Programmatic SEO (PSEO)**: template consistency and metadata of an article
//!   within a collection
//! - **Answer Engine Optimization (AEO)**: featured-snippet and voice-search
//!   readiness
//! - **Generative Engine Optimization (GEO)**: how readily AI systems can quote
//!   and cite the content
//!
//! All analysis is deterministic pattern matching over HTML strings and DOM
//! queries. Fetching, bulk scanning, exports and the scan history are thin layers
//! around the analyzers.
//!
//! # Example
//!
//! ```no_run
//! use seo_suite::{analyze_article_full, Article};
//!
//! let article = Article {
//!     title: "How to Optimize Snowflake Warehouses".into(),
//!     content: "<h2>What is a warehouse?</h2><p>A warehouse is compute.</p>".into(),
//!     ..Default::default()
//! };
//!
//! let report = analyze_article_full(&article, None);
//! println!("{} ({})", report.overall_score, report.overall_grade);
//! ```
//!
//! # Requirements
//!
//! The analyzers are synchronous. `fetch`, `bulk` and `history` require a Tokio
//! runtime.

pub mod aeo;
pub mod aggregate;
pub mod bulk;
pub mod config;
pub mod dom;
pub mod error_handling;
pub mod export;
pub mod fetch;
pub mod geo;
pub mod history;
pub mod initialization;
pub mod models;
pub mod pseo;
pub mod scoring;
pub mod traditional;
mod utils;

// Re-export public API
pub use aeo::AeoAnalyzer;
pub use aggregate::{analyze_article_full, OverallReport, Suite};
pub use bulk::{BulkResult, BulkScanner};
pub use config::{Config, LogFormat, LogLevel, OutputFormat};
pub use fetch::{fetch_html, scan_url};
pub use geo::GeoAnalyzer;
pub use history::{ScanEntry, ScanHistory};
pub use models::{Article, Tag};
pub use pseo::PseoAnalyzer;
pub use scoring::{Check, Grade, Report, Severity};
pub use traditional::TraditionalScanner;
