//! Compass and direction helpers
//!
//! Degree/compass conversion, angular distance, directional shelter
//! weighting and offshore wind classification. Directions follow the
//! meteorological convention: the bearing the wind or swell comes FROM.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Within this many degrees of a shelter direction a location is fully sheltered
pub const FULL_SHELTER_TOLERANCE_DEG: f64 = 15.0;
/// Within this many degrees a location is partially sheltered
pub const PARTIAL_SHELTER_TOLERANCE_DEG: f64 = 45.0;
/// Binary cutoff used by legacy scoring
pub const LEGACY_SHELTER_TOLERANCE_DEG: f64 = 30.0;
/// Maximum deviation from the land-to-sea bearing still counted as offshore
pub const OFFSHORE_TOLERANCE_DEG: f64 = 65.0;

/// One of the 16 compass points
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CompassPoint {
    N,
    NNE,
    NE,
    ENE,
    E,
    ESE,
    SE,
    SSE,
    S,
    SSW,
    SW,
    WSW,
    W,
    WNW,
    NW,
    NNW,
}

impl CompassPoint {
    /// All points clockwise from north
    pub const ALL: [CompassPoint; 16] = [
        CompassPoint::N,
        CompassPoint::NNE,
        CompassPoint::NE,
        CompassPoint::ENE,
        CompassPoint::E,
        CompassPoint::ESE,
        CompassPoint::SE,
        CompassPoint::SSE,
        CompassPoint::S,
        CompassPoint::SSW,
        CompassPoint::SW,
        CompassPoint::WSW,
        CompassPoint::W,
        CompassPoint::WNW,
        CompassPoint::NW,
        CompassPoint::NNW,
    ];

    /// Nearest compass point for a bearing in degrees (any real value, wrapped)
    #[must_use]
    pub fn from_degrees(degrees: f64) -> Self {
        let sector = ((degrees + 11.25).rem_euclid(360.0) / 22.5).floor() as usize;
        Self::ALL[sector.min(Self::ALL.len() - 1)]
    }

    /// Centre bearing of this point in degrees
    #[must_use]
    pub fn degrees(self) -> f64 {
        let index = Self::ALL.iter().position(|p| *p == self).unwrap_or(0);
        index as f64 * 22.5
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            CompassPoint::N => "N",
            CompassPoint::NNE => "NNE",
            CompassPoint::NE => "NE",
            CompassPoint::ENE => "ENE",
            CompassPoint::E => "E",
            CompassPoint::ESE => "ESE",
            CompassPoint::SE => "SE",
            CompassPoint::SSE => "SSE",
            CompassPoint::S => "S",
            CompassPoint::SSW => "SSW",
            CompassPoint::SW => "SW",
            CompassPoint::WSW => "WSW",
            CompassPoint::W => "W",
            CompassPoint::WNW => "WNW",
            CompassPoint::NW => "NW",
            CompassPoint::NNW => "NNW",
        }
    }
}

impl fmt::Display for CompassPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CompassPoint {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.as_str() == upper)
            .ok_or_else(|| format!("unknown compass point '{s}'"))
    }
}

/// Convert a bearing to its compass label; absent input gives an empty string
#[must_use]
pub fn deg_to_compass(degrees: Option<f64>) -> &'static str {
    degrees.map_or("", |d| CompassPoint::from_degrees(d).as_str())
}

/// Convert a compass label to its bearing. Unknown labels map to north.
#[must_use]
pub fn compass_to_deg(compass: &str) -> f64 {
    compass
        .parse::<CompassPoint>()
        .map_or(0.0, CompassPoint::degrees)
}

/// Smallest angular distance between two bearings (0-180°)
#[must_use]
pub fn angular_diff(a: f64, b: f64) -> f64 {
    let diff = (a - b).rem_euclid(360.0);
    diff.min(360.0 - diff)
}

/// Graded shelter weight for a direction: 1.0 within `full` degrees of any
/// shelter direction, 0.5 within `partial`, otherwise 0.0.
#[must_use]
pub fn shelter_weight(
    shelter_from: &[CompassPoint],
    direction_deg: Option<f64>,
    full: f64,
    partial: f64,
) -> f64 {
    let Some(direction) = direction_deg else {
        return 0.0;
    };

    shelter_from
        .iter()
        .map(|point| angular_diff(direction, point.degrees()))
        .map(|diff| {
            if diff <= full {
                1.0
            } else if diff <= partial {
                0.5
            } else {
                0.0
            }
        })
        .fold(0.0, f64::max)
}

/// Binary shelter test used by legacy scoring
#[must_use]
pub fn is_sheltered_from(
    shelter_from: &[CompassPoint],
    direction_deg: Option<f64>,
    tolerance: f64,
) -> bool {
    let Some(direction) = direction_deg else {
        return false;
    };

    shelter_from
        .iter()
        .any(|point| angular_diff(direction, point.degrees()) <= tolerance)
}

/// Whether a wind blows from land to sea at a shoreline facing `shore_normal_deg`.
///
/// Offshore wind comes from the reciprocal of the shore normal, so a
/// west-facing beach (270°) has offshore winds from around 90°.
#[must_use]
pub fn is_offshore(wind_dir_deg: Option<f64>, shore_normal_deg: f64, tolerance: f64) -> bool {
    let Some(wind_dir) = wind_dir_deg else {
        return false;
    };

    let offshore_dir = (shore_normal_deg + 180.0).rem_euclid(360.0);
    angular_diff(wind_dir, offshore_dir) <= tolerance
}

/// Legacy offshore test: any wind from the E/NE/SE quadrant, whatever the shoreline
#[must_use]
pub fn is_offshore_fixed_quadrant(wind_dir_deg: Option<f64>) -> bool {
    wind_dir_deg.is_some_and(|d| (45.0..=135.0).contains(&d))
}
