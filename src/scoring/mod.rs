//! Check primitive, scoring engine and grade tables shared by all analyzers.
//!
//! An analyzer appends checks to an [`Analyzer`] and finishes it into a [`Report`].
//! Scoring is a pure function of the multiset of severities:
//!
//! ```text
//! score = round(Σ weight(severity) / count * 100)
//! ```
//!
//! with per-analyzer warning/info weights held in a [`ScoringProfile`].

mod check;
mod engine;
mod grade;

pub use check::{Category, Check, Severity};
pub use engine::{Analyzer, CriticalClamp, Report, ReportType, ScoringProfile, Summary};
pub use grade::{Grade, GradeTable};
