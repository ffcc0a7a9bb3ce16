//! Regression comparison between two forecast documents
//!
//! Used to check a scoring change (or the legacy/current switch) against a
//! stored baseline: every location/date in the baseline must still be
//! present, and score drift is summarised.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::ForecastDocument;

/// Deltas at or above this size are listed individually
pub const NOTABLE_DELTA: f64 = 0.5;
/// Maximum number of listed deltas
pub const MAX_SAMPLES: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreDelta {
    pub section: &'static str,
    pub location: String,
    pub date: NaiveDate,
    pub baseline: f64,
    pub current: f64,
}

impl ScoreDelta {
    #[must_use]
    pub fn delta(&self) -> f64 {
        (self.baseline - self.current).abs()
    }
}

impl fmt::Display for ScoreDelta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}: {} -> {}",
            self.section, self.location, self.date, self.baseline, self.current
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ComparisonReport {
    /// Coverage problems: locations or dates missing from the current document
    pub issues: Vec<String>,
    pub max_score_delta: f64,
    /// First deltas of at least [`NOTABLE_DELTA`]
    pub samples: Vec<ScoreDelta>,
}

impl ComparisonReport {
    #[must_use]
    pub fn coverage_matches(&self) -> bool {
        self.issues.is_empty()
    }
}

impl fmt::Display for ComparisonReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.issues.is_empty() {
            writeln!(f, "Location/date coverage matches baseline.")?;
        } else {
            writeln!(f, "Issues found:")?;
            for issue in &self.issues {
                writeln!(f, "- {issue}")?;
            }
        }
        writeln!(f, "Max score delta: {:.1}", self.max_score_delta)?;
        if !self.samples.is_empty() {
            writeln!(f, "Sample diffs (>= {NOTABLE_DELTA}):")?;
            for sample in &self.samples {
                writeln!(f, "- {sample}")?;
            }
        }
        Ok(())
    }
}

/// Compare `current` against `baseline`, section by section
#[must_use]
pub fn compare_documents(baseline: &ForecastDocument, current: &ForecastDocument) -> ComparisonReport {
    let mut report = ComparisonReport::default();

    compare_section(
        "snorkel",
        &scores(&baseline.snorkel, |d| d.score),
        &scores(&current.snorkel, |d| d.score),
        &mut report,
    );
    compare_section(
        "sunbathing",
        &scores(&baseline.sunbathing, |d| d.score),
        &scores(&current.sunbathing, |d| d.score),
        &mut report,
    );

    report
}

type ScoreTable = BTreeMap<String, BTreeMap<NaiveDate, f64>>;

fn scores<T>(section: &BTreeMap<String, BTreeMap<NaiveDate, T>>, score: impl Fn(&T) -> f64) -> ScoreTable {
    section
        .iter()
        .map(|(location, days)| {
            let days = days.iter().map(|(date, day)| (*date, score(day))).collect();
            (location.clone(), days)
        })
        .collect()
}

fn compare_section(
    section: &'static str,
    baseline: &ScoreTable,
    current: &ScoreTable,
    report: &mut ComparisonReport,
) {
    for (location, base_days) in baseline {
        let Some(current_days) = current.get(location) else {
            report
                .issues
                .push(format!("Missing location in {section}: {location}"));
            continue;
        };

        for (date, base_score) in base_days {
            let Some(current_score) = current_days.get(date) else {
                report
                    .issues
                    .push(format!("Missing date in {section} for {location}: {date}"));
                continue;
            };

            let delta = ScoreDelta {
                section,
                location: location.clone(),
                date: *date,
                baseline: *base_score,
                current: *current_score,
            };
            report.max_score_delta = report.max_score_delta.max(delta.delta());
            if delta.delta() >= NOTABLE_DELTA && report.samples.len() < MAX_SAMPLES {
                report.samples.push(delta);
            }
        }
    }
}
