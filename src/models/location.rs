//! Location model: coordinates plus shelter metadata

use crate::rating::compass::CompassPoint;
use serde::{Deserialize, Serialize};

/// Perth metro beaches generally face west
pub const DEFAULT_SHORE_NORMAL_DEG: f64 = 270.0;

/// Activities a location can be rated for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Activity {
    /// Calm-water snorkelling
    Snorkel,
    /// Sunbathing / beach comfort
    Beach,
}

/// A rated beach or snorkel spot
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Location {
    /// Canonical location name, used as the key in every output map
    pub name: String,
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// Directions the location is protected from (reef, headland, breakwater)
    #[serde(default)]
    pub shelter_from: Vec<CompassPoint>,
    /// Natural protection level, 0.0 (exposed) to 1.0 (enclosed)
    #[serde(default)]
    pub shelter_factor: f64,
    /// Bearing pointing out to sea from the shoreline
    #[serde(default = "default_shore_normal")]
    pub shore_normal_deg: f64,
    /// Activities this location is rated for
    pub activities: Vec<Activity>,
    /// Free-text description
    #[serde(default)]
    pub notes: String,
}

fn default_shore_normal() -> f64 {
    DEFAULT_SHORE_NORMAL_DEG
}

impl Location {
    /// Create an exposed, west-facing location rated for the given activities
    #[must_use]
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64, activities: &[Activity]) -> Self {
        Self {
            name: name.into(),
            latitude,
            longitude,
            shelter_from: Vec::new(),
            shelter_factor: 0.0,
            shore_normal_deg: DEFAULT_SHORE_NORMAL_DEG,
            activities: activities.to_vec(),
            notes: String::new(),
        }
    }

    /// Builder-style shelter setup
    #[must_use]
    pub fn with_shelter(mut self, shelter_from: &[CompassPoint], shelter_factor: f64) -> Self {
        self.shelter_from = shelter_from.to_vec();
        self.shelter_factor = shelter_factor;
        self
    }

    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Whether this location is rated for `activity`
    #[must_use]
    pub fn supports(&self, activity: Activity) -> bool {
        self.activities.contains(&activity)
    }

    /// Format location as coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }

    /// Check the static metadata is usable for scoring
    pub fn validate(&self) -> crate::Result<()> {
        if self.name.trim().is_empty() {
            return Err(crate::SnorkelAlertError::validation("location name cannot be empty"));
        }
        if !(0.0..=1.0).contains(&self.shelter_factor) {
            return Err(crate::SnorkelAlertError::validation(format!(
                "{}: shelter_factor {} must be between 0 and 1",
                self.name, self.shelter_factor
            )));
        }
        if !(-90.0..=90.0).contains(&self.latitude) || !(-180.0..=180.0).contains(&self.longitude) {
            return Err(crate::SnorkelAlertError::validation(format!(
                "{}: invalid coordinates {}",
                self.name,
                self.format_coordinates()
            )));
        }
        if self.activities.is_empty() {
            return Err(crate::SnorkelAlertError::validation(format!(
                "{}: no activities configured",
                self.name
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_defaults_from_toml_like_json() {
        let json = r#"{"name": "Trigg", "latitude": -31.87, "longitude": 115.75, "activities": ["beach"]}"#;
        let location: Location = serde_json::from_str(json).unwrap();
        assert_eq!(location.shore_normal_deg, DEFAULT_SHORE_NORMAL_DEG);
        assert!(location.shelter_from.is_empty());
        assert!(location.supports(Activity::Beach));
        assert!(!location.supports(Activity::Snorkel));
    }

    #[test]
    fn test_shelter_directions_deserialize_as_compass_labels() {
        let json = r#"{"name": "Mettams Pool", "latitude": -31.82, "longitude": 115.75,
            "shelter_from": ["W", "SW", "NW"], "shelter_factor": 0.8, "activities": ["snorkel"]}"#;
        let location: Location = serde_json::from_str(json).unwrap();
        assert_eq!(
            location.shelter_from,
            vec![CompassPoint::W, CompassPoint::SW, CompassPoint::NW]
        );
    }

    #[test]
    fn test_validate_rejects_bad_shelter_factor() {
        let location = Location::new("Reef", -31.8, 115.7, &[Activity::Snorkel])
            .with_shelter(&[CompassPoint::W], 1.5);
        assert!(location.validate().is_err());

        let ok = Location::new("Reef", -31.8, 115.7, &[Activity::Snorkel])
            .with_shelter(&[CompassPoint::W], 0.5);
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn test_validate_requires_activity() {
        let location = Location::new("Nowhere", -31.8, 115.7, &[]);
        assert!(location.validate().is_err());
    }
}
