//! Recorded provider snapshots
//!
//! A snapshot holds everything a forecast run fetched, so the same run can
//! be replayed offline or used as a regression baseline.

use std::fs;
use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::forecast::AssemblyInput;
use crate::models::LocationForecast;
use crate::weather::FetchOutcome;
use crate::{Result, SnorkelAlertError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub generated_at: DateTime<Utc>,
    pub water_temp_c: Option<f64>,
    #[serde(default)]
    pub errors: Vec<String>,
    #[serde(default)]
    pub cache_hits: Vec<String>,
    pub forecasts: Vec<LocationForecast>,
}

impl Snapshot {
    #[must_use]
    pub fn from_outcome(outcome: FetchOutcome, generated_at: DateTime<Utc>) -> Self {
        Self {
            generated_at,
            water_temp_c: outcome.water_temp_c,
            errors: outcome.errors,
            cache_hits: outcome.cache_hits,
            forecasts: outcome.forecasts,
        }
    }

    /// Assembly input for a run on `today`
    #[must_use]
    pub fn into_input(self, today: NaiveDate) -> AssemblyInput {
        AssemblyInput {
            today,
            forecasts: self.forecasts,
            water_temp_c: self.water_temp_c,
            errors: self.errors,
            cache_hits: self.cache_hits,
            generated_at: self.generated_at,
        }
    }

    /// Earliest sampled date, the natural "today" for a replay
    #[must_use]
    pub fn first_date(&self) -> Option<NaiveDate> {
        self.forecasts
            .iter()
            .flat_map(|f| f.hourly.iter().map(|s| s.date()))
            .min()
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        info!("Saved snapshot with {} forecasts to {}", self.forecasts.len(), path.display());
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|e| {
            SnorkelAlertError::fixture(format!("Cannot read snapshot {}: {e}", path.display()))
        })?;
        serde_json::from_str(&raw).map_err(|e| {
            SnorkelAlertError::fixture(format!("Malformed snapshot {}: {e}", path.display()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DailyWeather, HourlySample};

    fn create_test_snapshot() -> Snapshot {
        let day = NaiveDate::from_ymd_opt(2026, 2, 3).unwrap();
        let mut forecast = LocationForecast::new(
            "Mettams Pool",
            vec![
                HourlySample {
                    swell_height: Some(0.3),
                    wind_speed: Some(10.0),
                    ..HourlySample::at(day.and_hms_opt(7, 0, 0).unwrap())
                },
                HourlySample::at((day - chrono::Duration::days(1)).and_hms_opt(23, 0, 0).unwrap()),
            ],
        );
        forecast.daily.push(DailyWeather {
            temperature_max: Some(31.0),
            ..DailyWeather::empty(day)
        });

        Snapshot {
            generated_at: DateTime::from_timestamp(1_770_000_000, 0).unwrap(),
            water_temp_c: Some(22.4),
            errors: vec!["Trigg".to_string()],
            cache_hits: Vec::new(),
            forecasts: vec![forecast],
        }
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir()
            .join(format!("snorkel-alert-fixture-{}", std::process::id()))
            .join("snapshot.json");
        let snapshot = create_test_snapshot();

        snapshot.save(&path).unwrap();
        let loaded = Snapshot::load(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(loaded, snapshot);
    }

    #[test]
    fn test_load_missing_file() {
        let result = Snapshot::load(Path::new("/nonexistent/snapshot.json"));
        assert!(matches!(result, Err(SnorkelAlertError::Fixture { .. })));
    }

    #[test]
    fn test_load_malformed_file() {
        let path = std::env::temp_dir().join(format!("snorkel-alert-bad-{}.json", std::process::id()));
        fs::write(&path, "{\"forecasts\": 3}").unwrap();
        let result = Snapshot::load(&path);
        fs::remove_file(&path).unwrap();

        let err = result.unwrap_err();
        assert!(matches!(err, SnorkelAlertError::Fixture { .. }));
        assert!(err.to_string().contains("Malformed snapshot"));
    }

    #[test]
    fn test_first_date_and_input() {
        let snapshot = create_test_snapshot();
        assert_eq!(snapshot.first_date(), NaiveDate::from_ymd_opt(2026, 2, 2));

        let input = snapshot.into_input(NaiveDate::from_ymd_opt(2026, 2, 3).unwrap());
        assert_eq!(input.errors, ["Trigg"]);
        assert_eq!(input.water_temp_c, Some(22.4));
        assert_eq!(input.forecasts.len(), 1);
    }
}
