//! Hourly and daily provider samples
//!
//! Every measurement is optional: marine and weather feeds drop values
//! independently and the rating engine substitutes neutral defaults.

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// One hour of combined marine + weather data at a location
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HourlySample {
    /// Local wall-clock time at the location
    pub timestamp: NaiveDateTime,
    /// Combined significant wave height in metres
    pub wave_height: Option<f64>,
    /// Swell component height in metres
    pub swell_height: Option<f64>,
    /// Locally generated wind-sea height in metres
    pub wind_wave_height: Option<f64>,
    /// Direction the swell comes from, degrees
    pub swell_direction: Option<f64>,
    /// Swell period in seconds
    pub swell_period: Option<f64>,
    /// Sea surface temperature in Celsius
    pub sea_temperature: Option<f64>,
    /// Air temperature at 2 m in Celsius
    pub air_temperature: Option<f64>,
    /// Feels-like temperature in Celsius
    pub apparent_temperature: Option<f64>,
    /// Sustained wind at 10 m in km/h
    pub wind_speed: Option<f64>,
    /// Direction the wind comes from, degrees
    pub wind_direction: Option<f64>,
    /// Wind gusts at 10 m in km/h
    pub wind_gusts: Option<f64>,
    /// Cloud cover percentage (0-100)
    pub cloud_cover: Option<f64>,
    /// UV index
    pub uv_index: Option<f64>,
    /// Relative humidity percentage
    pub humidity: Option<f64>,
}

impl HourlySample {
    /// Empty sample at `timestamp`; fill fields with struct update syntax
    #[must_use]
    pub fn at(timestamp: NaiveDateTime) -> Self {
        Self {
            timestamp,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    #[must_use]
    pub fn hour(&self) -> u32 {
        self.timestamp.hour()
    }
}

/// Provider daily block for one date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyWeather {
    pub date: NaiveDate,
    pub temperature_max: Option<f64>,
    pub temperature_min: Option<f64>,
    pub wind_speed_max: Option<f64>,
    /// Dominant wind direction in degrees
    pub wind_direction_dominant: Option<f64>,
    pub uv_index_max: Option<f64>,
}

impl DailyWeather {
    #[must_use]
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            temperature_max: None,
            temperature_min: None,
            wind_speed_max: None,
            wind_direction_dominant: None,
            uv_index_max: None,
        }
    }
}

/// Everything fetched for one location in a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationForecast {
    /// Canonical location name (matches `Location::name`)
    pub location: String,
    /// Hourly samples, in provider order
    pub hourly: Vec<HourlySample>,
    /// Daily blocks, one per forecast date
    #[serde(default)]
    pub daily: Vec<DailyWeather>,
}

impl LocationForecast {
    #[must_use]
    pub fn new(location: impl Into<String>, hourly: Vec<HourlySample>) -> Self {
        Self {
            location: location.into(),
            hourly,
            daily: Vec::new(),
        }
    }

    /// Daily block for `date`, if the provider sent one
    #[must_use]
    pub fn daily_for(&self, date: NaiveDate) -> Option<&DailyWeather> {
        self.daily.iter().find(|d| d.date == date)
    }
}
