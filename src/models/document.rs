//! Forecast document handed to dashboard and notification collaborators

use crate::rating::ScoringMode;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Text label for a 0-10 score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RatingLabel {
    /// score >= 9
    Perfect,
    /// score >= 7.5
    Great,
    /// score >= 6
    Good,
    /// score >= 4.5, the lowest label a top pick may carry
    #[serde(rename = "OK")]
    Ok,
    /// score >= 3
    Poor,
    /// score < 3
    Bad,
}

impl RatingLabel {
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s >= 9.0 => RatingLabel::Perfect,
            s if s >= 7.5 => RatingLabel::Great,
            s if s >= 6.0 => RatingLabel::Good,
            s if s >= 4.5 => RatingLabel::Ok,
            s if s >= 3.0 => RatingLabel::Poor,
            _ => RatingLabel::Bad,
        }
    }
}

impl fmt::Display for RatingLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RatingLabel::Perfect => write!(f, "Perfect"),
            RatingLabel::Great => write!(f, "Great"),
            RatingLabel::Good => write!(f, "Good"),
            RatingLabel::Ok => write!(f, "OK"),
            RatingLabel::Poor => write!(f, "Poor"),
            RatingLabel::Bad => write!(f, "Bad"),
        }
    }
}

/// Snorkel rating for one location on one date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnorkelDay {
    pub rating: RatingLabel,
    pub score: f64,
    /// Weighted-average effective wave height in metres
    pub waves: f64,
    /// Representative wind speed in km/h (first evaluated hour)
    pub wind: f64,
    /// Best window, "HH:00-HH:00"
    pub best_time: String,
}

/// Beach rating for one location on one date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeachDay {
    pub rating: RatingLabel,
    pub score: f64,
    /// Representative air temperature, whole degrees
    pub temp: i64,
    pub temp_max: Option<i64>,
    pub temp_min: Option<i64>,
    /// Representative wind speed, whole km/h
    pub wind: i64,
    pub wind_max: Option<i64>,
}

/// Top pick for an activity.
///
/// When `viable` is false the spot/day/time/why fields are empty and `note`
/// explains why nothing made the cut.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopPick {
    pub viable: bool,
    pub spot: Option<String>,
    pub date: Option<NaiveDate>,
    /// Display label for `date` ("Tue 3rd")
    pub day: Option<String>,
    /// Best window, snorkel picks only
    pub time: Option<String>,
    pub score: f64,
    pub why: Option<String>,
    pub note: String,
}

impl TopPick {
    /// Structured "nothing worth going for" result
    #[must_use]
    pub fn unviable(score: f64, note: impl Into<String>) -> Self {
        Self {
            viable: false,
            spot: None,
            date: None,
            day: None,
            time: None,
            score,
            why: None,
            note: note.into(),
        }
    }
}

/// The three headline picks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopPicks {
    pub best_snorkel: TopPick,
    pub best_sunbathing: TopPick,
    pub hidden_gem: TopPick,
}

/// Header describing today's general weather
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TodaySummary {
    pub date: NaiveDate,
    pub date_label: String,
    pub temp_max: f64,
    pub wind_speed: f64,
    pub wind_direction: String,
    pub description: String,
}

/// Run metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunMeta {
    pub version: String,
    pub mode: ScoringMode,
    pub generated_at: DateTime<Utc>,
    /// Locations served from a cache by the provider layer
    #[serde(default)]
    pub cache_hits: Vec<String>,
}

/// Complete output of one forecast run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDocument {
    pub dates: Vec<NaiveDate>,
    pub date_labels: Vec<String>,
    pub water_temp_c: Option<f64>,
    pub today: TodaySummary,
    /// location -> date -> rating; dates without samples are absent
    pub snorkel: BTreeMap<String, BTreeMap<NaiveDate, SnorkelDay>>,
    pub sunbathing: BTreeMap<String, BTreeMap<NaiveDate, BeachDay>>,
    pub top_picks: TopPicks,
    pub summary: String,
    /// Locations the provider failed to fetch
    pub errors: Vec<String>,
    pub meta: RunMeta,
}
