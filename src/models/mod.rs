//! Data models for the snorkel alert application
//!
//! - Location: static spot metadata (coordinates, shelter, shoreline)
//! - Sample: hourly and daily provider data per location
//! - Document: the assembled forecast handed to collaborators

pub mod document;
pub mod location;
pub mod sample;

// Re-export all public types for convenient access
pub use document::{
    BeachDay, ForecastDocument, RatingLabel, RunMeta, SnorkelDay, TodaySummary, TopPick, TopPicks,
};
pub use location::{Activity, DEFAULT_SHORE_NORMAL_DEG, Location};
pub use sample::{DailyWeather, HourlySample, LocationForecast};
