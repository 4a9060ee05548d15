//! The check primitive shared by every analyzer.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum_macros::EnumIter as EnumIterMacro;

/// Outcome of a single check.
///
/// - `Critical`: a must-have is missing or broken
/// - `Warning`: present but sub-optimal
/// - `Good`: passes
/// - `Info`: observational, no pass/fail judgment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIterMacro)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Warning,
    Good,
    Info,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::Warning => "warning",
            Severity::Good => "good",
            Severity::Info => "info",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fixed category taxonomy owned by one analyzer.
///
/// Each analyzer defines its own enum; the label is what reports and exports show.
pub trait Category: Copy + Eq + std::fmt::Debug + Serialize + 'static {
    /// Human-readable label, e.g. `"Meta Tags"`.
    fn label(&self) -> &'static str;
}

/// A single named, categorized assertion about content.
///
/// Checks are immutable once created. `details` is carried for reporting only and
/// never influences scoring.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Check<C: Category> {
    pub name: String,
    pub category: C,
    pub severity: Severity,
    pub message: String,
    pub recommendation: Option<String>,
    pub details: Option<Value>,
    pub passed: bool,
}

impl<C: Category> Check<C> {
    pub fn new(
        name: &str,
        category: C,
        severity: Severity,
        message: impl Into<String>,
        recommendation: Option<&str>,
        details: Option<Value>,
    ) -> Self {
        Self {
            name: name.to_string(),
            category,
            severity,
            message: message.into(),
            recommendation: recommendation.map(str::to_string),
            details,
            passed: severity == Severity::Good,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
    enum Dummy {
        #[serde(rename = "Dummy Category")]
        Only,
    }

    impl Category for Dummy {
        fn label(&self) -> &'static str {
            "Dummy Category"
        }
    }

    #[test]
    fn test_passed_only_for_good() {
        for (severity, expected) in [
            (Severity::Critical, false),
            (Severity::Warning, false),
            (Severity::Good, true),
            (Severity::Info, false),
        ] {
            let check = Check::new("Name", Dummy::Only, severity, "msg", None, None);
            assert_eq!(check.passed, expected, "severity {:?}", severity);
        }
    }

    #[test]
    fn test_check_serializes_category_label_and_lowercase_severity() {
        let check = Check::new(
            "Title Tag",
            Dummy::Only,
            Severity::Warning,
            "Title too short (12 chars)",
            Some("Expand it"),
            Some(serde_json::json!({ "length": 12 })),
        );
        let value = serde_json::to_value(&check).unwrap();
        assert_eq!(value["category"], "Dummy Category");
        assert_eq!(value["severity"], "warning");
        assert_eq!(value["recommendation"], "Expand it");
        assert_eq!(value["details"]["length"], 12);
        assert_eq!(value["passed"], false);
    }

    #[test]
    fn test_severity_display() {
        assert_eq!(Severity::Critical.to_string(), "critical");
        assert_eq!(Severity::Info.to_string(), "info");
    }
}
