//! Generic scoring engine.
//!
//! Every analyzer is an `Analyzer<C>` that accumulates checks for one run and is
//! finished into a `Report<C>`. The per-analyzer differences (warning/info weights,
//! the critical clamp, the grade table) live in a `ScoringProfile`.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use strum::IntoEnumIterator;

use super::check::{Category, Check, Severity};
use super::grade::{Grade, GradeTable};

/// Which analyzer produced a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ReportType {
    Traditional,
    #[serde(rename = "PSEO")]
    Pseo,
    #[serde(rename = "AEO")]
    Aeo,
    #[serde(rename = "GEO")]
    Geo,
}

impl ReportType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportType::Traditional => "Traditional",
            ReportType::Pseo => "PSEO",
            ReportType::Aeo => "AEO",
            ReportType::Geo => "GEO",
        }
    }
}

/// Caps applied to the score when critical checks are present.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CriticalClamp {
    /// Cap applied when at least one critical check exists.
    pub any_cap: u8,
    /// Critical count above which `many_cap` applies.
    pub many_threshold: usize,
    pub many_cap: u8,
}

/// Weights, clamp and grade table for one analyzer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringProfile {
    pub warning_weight: f64,
    pub info_weight: f64,
    pub critical_clamp: Option<CriticalClamp>,
    pub grade_table: GradeTable,
}

impl ScoringProfile {
    pub const TRADITIONAL: ScoringProfile = ScoringProfile {
        warning_weight: 0.5,
        info_weight: 0.8,
        critical_clamp: Some(CriticalClamp {
            any_cap: 50,
            many_threshold: 2,
            many_cap: 30,
        }),
        grade_table: GradeTable::Fine,
    };

    pub const PSEO: ScoringProfile = ScoringProfile {
        warning_weight: 0.4,
        info_weight: 0.7,
        critical_clamp: None,
        grade_table: GradeTable::Fine,
    };

    pub const AEO: ScoringProfile = ScoringProfile {
        warning_weight: 0.3,
        info_weight: 0.6,
        critical_clamp: None,
        grade_table: GradeTable::Coarse,
    };

    pub const GEO: ScoringProfile = ScoringProfile {
        warning_weight: 0.3,
        info_weight: 0.6,
        critical_clamp: None,
        grade_table: GradeTable::Coarse,
    };

    pub fn weight(&self, severity: Severity) -> f64 {
        match severity {
            Severity::Critical => 0.0,
            Severity::Warning => self.warning_weight,
            Severity::Good => 1.0,
            Severity::Info => self.info_weight,
        }
    }

    /// Computes the 0-100 score for a set of checks.
    ///
    /// An empty check list scores 0.
    pub fn score<C: Category>(&self, checks: &[Check<C>]) -> u8 {
        if checks.is_empty() {
            return 0;
        }

        // Weighted from severity counts so the result depends only on the multiset.
        let mut summary = Summary::default();
        for check in checks {
            summary.record(check.severity);
        }
        let raw: f64 = Severity::iter()
            .map(|s| summary.count(s) as f64 * self.weight(s))
            .sum();
        let mut score = ((raw / summary.total as f64) * 100.0)
            .round()
            .clamp(0.0, 100.0) as u8;

        if let Some(clamp) = self.critical_clamp {
            let criticals = summary.critical;
            if criticals > 0 {
                score = score.min(clamp.any_cap);
            }
            if criticals > clamp.many_threshold {
                score = score.min(clamp.many_cap);
            }
        }

        score
    }
}

/// Counts of checks by severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub critical: usize,
    pub warning: usize,
    pub good: usize,
    pub info: usize,
}

impl Summary {
    fn record(&mut self, severity: Severity) {
        self.total += 1;
        match severity {
            Severity::Critical => self.critical += 1,
            Severity::Warning => self.warning += 1,
            Severity::Good => self.good += 1,
            Severity::Info => self.info += 1,
        }
    }

    pub fn count(&self, severity: Severity) -> usize {
        match severity {
            Severity::Critical => self.critical,
            Severity::Warning => self.warning,
            Severity::Good => self.good,
            Severity::Info => self.info,
        }
    }
}

/// Result of one analyzer run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report<C: Category> {
    #[serde(rename = "type")]
    pub kind: ReportType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub score: u8,
    pub grade: Grade,
    pub summary: Summary,
    pub checks: Vec<Check<C>>,
    /// Severity counts keyed by category label.
    pub by_category: BTreeMap<&'static str, Summary>,
    pub analyzed_at: DateTime<Utc>,
}

impl<C: Category> Report<C> {
    pub fn checks_with(&self, severity: Severity) -> impl Iterator<Item = &Check<C>> {
        self.checks.iter().filter(move |c| c.severity == severity)
    }

    /// First check with the given name, if the run emitted one.
    pub fn find(&self, name: &str) -> Option<&Check<C>> {
        self.checks.iter().find(|c| c.name == name)
    }
}

/// Accumulates checks for a single analyzer run.
pub struct Analyzer<C: Category> {
    kind: ReportType,
    profile: ScoringProfile,
    checks: Vec<Check<C>>,
}

impl<C: Category> Analyzer<C> {
    pub fn new(kind: ReportType, profile: ScoringProfile) -> Self {
        Self {
            kind,
            profile,
            checks: Vec::new(),
        }
    }

    /// Appends a check. Checks cannot be removed or changed once added.
    pub fn add_check(
        &mut self,
        name: &str,
        category: C,
        severity: Severity,
        message: impl Into<String>,
        recommendation: Option<&str>,
        details: Option<Value>,
    ) {
        self.checks.push(Check::new(
            name,
            category,
            severity,
            message,
            recommendation,
            details,
        ));
    }

    pub fn checks(&self) -> &[Check<C>] {
        &self.checks
    }

    /// Scores the accumulated checks and produces the report.
    pub fn finish(self, url: Option<String>) -> Report<C> {
        let score = self.profile.score(&self.checks);
        let grade = self.profile.grade_table.grade(score);

        let mut summary = Summary::default();
        let mut by_category: BTreeMap<&'static str, Summary> = BTreeMap::new();
        for check in &self.checks {
            summary.record(check.severity);
            by_category
                .entry(check.category.label())
                .or_default()
                .record(check.severity);
        }

        log::debug!(
            "{} analysis finished: score {} ({}) from {} checks",
            self.kind.as_str(),
            score,
            grade,
            summary.total
        );

        Report {
            kind: self.kind,
            url,
            score,
            grade,
            summary,
            checks: self.checks,
            by_category,
            analyzed_at: Utc::now(),
        }
    }
}
