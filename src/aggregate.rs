//! Composition of the four analyzer reports into one overall grade.

use serde::Serialize;

use crate::aeo::{AeoAnalyzer, AeoCategory};
use crate::geo::{GeoAnalyzer, GeoCategory};
use crate::models::Article;
use crate::pseo::{self, PseoAnalyzer, PseoCategory};
use crate::scoring::{Grade, GradeTable, Report};
use crate::traditional::{TraditionalCategory, TraditionalScanner};

/// Reports from every analyzer that ran, plus the overall score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverallReport {
    pub traditional: Option<Report<TraditionalCategory>>,
    pub pseo: Option<Report<PseoCategory>>,
    pub aeo: Option<Report<AeoCategory>>,
    pub geo: Option<Report<GeoCategory>>,
    /// Rounded mean of the available sub-scores (0 when none ran).
    pub overall_score: u8,
    /// Graded on the coarse table.
    pub overall_grade: Grade,
}

impl OverallReport {
    pub fn from_reports(
        traditional: Option<Report<TraditionalCategory>>,
        pseo: Option<Report<PseoCategory>>,
        aeo: Option<Report<AeoCategory>>,
        geo: Option<Report<GeoCategory>>,
    ) -> Self {
        let scores: Vec<u8> = [
            traditional.as_ref().map(|r| r.score),
            pseo.as_ref().map(|r| r.score),
            aeo.as_ref().map(|r| r.score),
            geo.as_ref().map(|r| r.score),
        ]
        .into_iter()
        .flatten()
        .collect();

        let overall_score = overall_score(&scores);
        log::debug!(
            "Overall score {} from {} sub-reports",
            overall_score,
            scores.len()
        );

        Self {
            traditional,
            pseo,
            aeo,
            geo,
            overall_score,
            overall_grade: GradeTable::Coarse.grade(overall_score),
        }
    }
}

/// Rounded mean of `scores`; 0 for an empty slice.
pub fn overall_score(scores: &[u8]) -> u8 {
    if scores.is_empty() {
        return 0;
    }
    let sum: f64 = scores.iter().map(|&s| f64::from(s)).sum();
    (sum / scores.len() as f64).round().clamp(0.0, 100.0) as u8
}

/// The four analyzers, configured once and reused across articles.
#[derive(Debug, Clone, Default)]
pub struct Suite {
    pub traditional: TraditionalScanner,
    pub pseo: PseoAnalyzer,
    pub aeo: AeoAnalyzer,
    pub geo: GeoAnalyzer,
}

impl Suite {
    pub fn new() -> Self {
        Self::default()
    }

    /// Analyzers that treat links to `own_domain` as internal.
    pub fn with_own_domain(own_domain: &str) -> Self {
        Self {
            pseo: PseoAnalyzer::with_thresholds(pseo::Thresholds {
                own_domain: own_domain.to_string(),
                ..Default::default()
            }),
            geo: GeoAnalyzer::with_own_domain(own_domain),
            ..Default::default()
        }
    }

    /// Runs every applicable analyzer over an article.
    ///
    /// The Traditional scanner only runs when `html` is given, using the article URL.
    /// `all_articles` feeds the PSEO cross-article checks and may be empty.
    pub fn analyze(
        &self,
        article: &Article,
        html: Option<&str>,
        all_articles: &[Article],
    ) -> OverallReport {
        let traditional = html.map(|html| self.traditional.analyze(&article.url, html));
        OverallReport::from_reports(
            traditional,
            Some(self.pseo.analyze(article, all_articles)),
            Some(self.aeo.analyze(article)),
            Some(self.geo.analyze(article)),
        )
    }
}

/// Runs all analyzers with default configuration.
pub fn analyze_article_full(article: &Article, html: Option<&str>) -> OverallReport {
    Suite::new().analyze(article, html, &[])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article() -> Article {
        Article {
            title: "How to Tune Snowflake Warehouses for Cost".into(),
            content: "<h2>What is a warehouse?</h2><p>A warehouse is compute.</p>".into(),
            excerpt: "Practical tips for warehouse sizing and suspension.".into(),
            category: "Snowflake".into(),
            slug: "tune-snowflake-warehouses".into(),
            url: "https://example.com/tune-snowflake-warehouses".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_overall_score_mean_and_rounding() {
        assert_eq!(overall_score(&[]), 0);
        assert_eq!(overall_score(&[80]), 80);
        assert_eq!(overall_score(&[80, 81]), 81);
        assert_eq!(overall_score(&[70, 71, 71]), 71);
        assert_eq!(overall_score(&[0, 100]), 50);
    }

    #[test]
    fn test_without_html_skips_traditional() {
        let report = analyze_article_full(&article(), None);
        assert!(report.traditional.is_none());

        let pseo = report.pseo.as_ref().unwrap().score;
        let aeo = report.aeo.as_ref().unwrap().score;
        let geo = report.geo.as_ref().unwrap().score;
        assert_eq!(report.overall_score, overall_score(&[pseo, aeo, geo]));
        assert_eq!(
            report.overall_grade,
            GradeTable::Coarse.grade(report.overall_score)
        );
    }

    #[test]
    fn test_with_html_includes_traditional() {
        let html = "<html><head><title>Tune Snowflake Warehouses</title></head>\
            <body><h1>Tune</h1></body></html>";
        let report = analyze_article_full(&article(), Some(html));
        let traditional = report.traditional.as_ref().unwrap();
        assert_eq!(traditional.url.as_deref(), Some(article().url.as_str()));

        let scores = [
            traditional.score,
            report.pseo.as_ref().unwrap().score,
            report.aeo.as_ref().unwrap().score,
            report.geo.as_ref().unwrap().score,
        ];
        assert_eq!(report.overall_score, overall_score(&scores));
    }

    #[test]
    fn test_from_reports_all_missing() {
        let report = OverallReport::from_reports(None, None, None, None);
        assert_eq!(report.overall_score, 0);
        assert_eq!(report.overall_grade, Grade::D);
    }

    #[test]
    fn test_suite_own_domain_reaches_pseo_and_geo() {
        let suite = Suite::with_own_domain("example.com");
        let mut a = article();
        a.content = "<p><a href=\"https://example.com/a\">a</a> \
            <a href=\"https://example.com/b\">b</a></p>"
            .into();
        let report = suite.analyze(&a, None, &[]);
        let pseo = report.pseo.unwrap();
        let links = pseo.find("Internal Links in Content").unwrap();
        assert_eq!(links.severity, crate::scoring::Severity::Good);
    }
}
