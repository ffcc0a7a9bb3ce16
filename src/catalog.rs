//! Location catalog
//!
//! An immutable list of rated locations. Order matters: it breaks ties
//! between equally scored picks and fixes the order forecasts are
//! reported in.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::models::{Activity, Location};
use crate::rating::CompassPoint::{E, N, NE, NW, S, SE, SW, W};
use crate::{Result, SnorkelAlertError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationCatalog {
    locations: Vec<Location>,
}

impl LocationCatalog {
    /// Validate and wrap a list of locations
    pub fn new(locations: Vec<Location>) -> Result<Self> {
        if locations.is_empty() {
            return Err(SnorkelAlertError::validation("location catalog is empty"));
        }

        let mut seen = HashSet::new();
        for location in &locations {
            location.validate()?;
            if !seen.insert(location.name.as_str()) {
                return Err(SnorkelAlertError::validation(format!(
                    "duplicate location name: {}",
                    location.name
                )));
            }
        }

        Ok(Self { locations })
    }

    #[must_use]
    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Location> {
        self.locations.iter().find(|l| l.name == name)
    }

    /// Locations rated for `activity`, in catalog order
    pub fn for_activity(&self, activity: Activity) -> impl Iterator<Item = &Location> {
        self.locations.iter().filter(move |l| l.supports(activity))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Built-in Perth metropolitan coastline
    #[must_use]
    pub fn perth_metro() -> Self {
        use Activity::{Beach, Snorkel};

        let spot = |name: &str, lat: f64, lon: f64, activities: &[Activity]| {
            Location::new(name, lat, lon, activities)
        };

        let locations = vec![
            spot("Mettams Pool", -31.8195, 115.7517, &[Snorkel])
                .with_shelter(&[W, SW, NW], 0.8)
                .with_notes("Reef-enclosed lagoon sheltered from W/SW/NW swell. Shallow, good for beginners."),
            spot("Hamersley Pool", -31.8150, 115.7510, &[Snorkel])
                .with_shelter(&[W, SW, NW], 0.8)
                .with_notes("Tidal reef pool just north of Mettams with similar conditions and fewer people."),
            spot("Watermans Bay", -31.8456, 115.7537, &[Snorkel])
                .with_shelter(&[W, SW], 0.6)
                .with_notes("Partial reef shelter. Quieter than Mettams, suits families."),
            spot("North Cottesloe", -31.9856, 115.7517, &[Snorkel, Beach])
                .with_shelter(&[E, NE, SE], 0.3)
                .with_notes("Peters Pool reef snorkelling. Exposed to SW swell, good facilities."),
            spot("Boyinaboat Reef", -31.8234, 115.7389, &[Snorkel])
                .with_shelter(&[W, SW, NW, N], 0.7)
                .with_notes("Hillarys underwater trail, about 6m deep, behind the marina wall."),
            spot("Omeo Wreck", -32.1056, 115.7631, &[Snorkel])
                .with_shelter(&[W, SW], 0.5)
                .with_notes("Coogee Maritime Trail wreck 25m from shore, 2.5-5m deep."),
            spot("Point Peron", -32.2722, 115.6917, &[Snorkel])
                .with_shelter(&[W, SW, NW], 0.6)
                .with_notes("Rockingham. Garden Island blocks the swell. Caves and overhangs."),
            spot("Burns Beach", -31.7281, 115.7261, &[Snorkel])
                .with_shelter(&[W], 0.3)
                .with_notes("Rocky offshore reef. Less crowded, better for experienced snorkellers."),
            spot("Yanchep Lagoon", -31.5469, 115.6350, &[Snorkel])
                .with_shelter(&[W, SW, NW], 0.7)
                .with_notes("Protected lagoon 60km north of Perth with clear water."),
            spot("Cottesloe", -31.9939, 115.7522, &[Beach])
                .with_shelter(&[E, NE, SE], 0.3)
                .with_notes("Iconic Perth beach, busy on weekends. Exposed to SW swell."),
            spot("Swanbourne", -31.9672, 115.7583, &[Beach])
                .with_shelter(&[], 0.2)
                .with_notes("Quiet and less crowded."),
            spot("City Beach", -31.9389, 115.7583, &[Beach])
                .with_shelter(&[], 0.3)
                .with_notes("Family friendly, groynes give some protection."),
            spot("Floreat", -31.9283, 115.7561, &[Beach])
                .with_shelter(&[], 0.2)
                .with_notes("Boardwalk and kiosk, quieter than City Beach."),
            spot("Scarborough", -31.8939, 115.7569, &[Beach])
                .with_shelter(&[], 0.1)
                .with_notes("Popular surf beach. Often windy."),
            spot("Trigg", -31.8717, 115.7564, &[Beach])
                .with_shelter(&[], 0.1)
                .with_notes("Exposed surf beach with reef and island views."),
            spot("Sorrento", -31.8261, 115.7522, &[Beach])
                .with_shelter(&[], 0.2)
                .with_notes("Cafes at the Quay, good sunset spot."),
            spot("Hillarys", -31.8069, 115.7383, &[Beach])
                .with_shelter(&[W, SW, NW, N], 0.8)
                .with_notes("Marina breakwater gives excellent shelter."),
            spot("Leighton", -32.0264, 115.7511, &[Beach])
                .with_shelter(&[], 0.2)
                .with_notes("Dog beach and kite surfing. Can be windy."),
            spot("South Beach", -32.0731, 115.7558, &[Beach])
                .with_shelter(&[], 0.2)
                .with_notes("Fremantle, grassy areas and cafe strip nearby."),
            spot("Bathers Beach", -32.0561, 115.7467, &[Beach])
                .with_shelter(&[W, SW, NW, N, S], 0.9)
                .with_notes("Fremantle harbour. Very sheltered."),
        ];

        Self { locations }
    }
}

impl Default for LocationCatalog {
    fn default() -> Self {
        Self::perth_metro()
    }
}
