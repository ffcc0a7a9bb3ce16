//! Condition rating engine
//!
//! This module turns hourly marine/weather samples into activity scores:
//! - Compass helpers for shelter and offshore geometry
//! - Per-hour snorkel and beach scores
//! - Daily aggregation and best snorkelling window per location

pub mod aggregator;
pub mod calculator;
pub mod compass;

use crate::models::Location;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use aggregator::{DailyAggregate, HourlyCondition, aggregate_location, best_time_window};
pub use calculator::{SnorkelRating, beach_score, snorkel_score};
pub use compass::{CompassPoint, angular_diff, deg_to_compass, is_offshore, shelter_weight};

/// Scoring algorithm generation.
///
/// `Legacy` reproduces historical output: a binary 30° shelter cutoff, a
/// fixed E/NE/SE offshore quadrant, an unweighted daily mean and the
/// forward-walk best-time heuristic. `Current` uses graded shelter,
/// shoreline-relative offshore classification, morning weighting and the
/// sliding best-time window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoringMode {
    Legacy,
    #[default]
    Current,
}

impl ScoringMode {
    /// Fraction of the location's shelter applied to swell from `swell_dir`
    #[must_use]
    pub fn swell_shelter(self, location: &Location, swell_dir: Option<f64>) -> f64 {
        match self {
            ScoringMode::Legacy => {
                if compass::is_sheltered_from(
                    &location.shelter_from,
                    swell_dir,
                    compass::LEGACY_SHELTER_TOLERANCE_DEG,
                ) {
                    1.0
                } else {
                    0.0
                }
            }
            ScoringMode::Current => compass::shelter_weight(
                &location.shelter_from,
                swell_dir,
                compass::FULL_SHELTER_TOLERANCE_DEG,
                compass::PARTIAL_SHELTER_TOLERANCE_DEG,
            ),
        }
    }

    /// Wind speed felt on the water after shelter
    #[must_use]
    pub fn effective_wind(self, location: &Location, wind_speed: f64, wind_dir: Option<f64>) -> f64 {
        match self {
            ScoringMode::Legacy => wind_speed,
            ScoringMode::Current => {
                let weight = compass::shelter_weight(
                    &location.shelter_from,
                    wind_dir,
                    compass::FULL_SHELTER_TOLERANCE_DEG,
                    compass::PARTIAL_SHELTER_TOLERANCE_DEG,
                );
                wind_speed * (1.0 - location.shelter_factor * 0.4 * weight)
            }
        }
    }

    #[must_use]
    pub fn is_offshore(self, location: &Location, wind_dir: Option<f64>) -> bool {
        match self {
            ScoringMode::Legacy => compass::is_offshore_fixed_quadrant(wind_dir),
            ScoringMode::Current => compass::is_offshore(
                wind_dir,
                location.shore_normal_deg,
                compass::OFFSHORE_TOLERANCE_DEG,
            ),
        }
    }
}

impl fmt::Display for ScoringMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoringMode::Legacy => write!(f, "legacy"),
            ScoringMode::Current => write!(f, "current"),
        }
    }
}

impl FromStr for ScoringMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "legacy" => Ok(ScoringMode::Legacy),
            "current" => Ok(ScoringMode::Current),
            other => Err(format!("unknown scoring mode '{other}' (expected legacy or current)")),
        }
    }
}

/// Round half away from zero to `decimals` places
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10_f64.powi(decimals);
    (value * factor).round() / factor
}
