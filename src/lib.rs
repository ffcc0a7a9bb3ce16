//! `snorkel-alert` - Snorkel and beach condition ratings for the Perth coast
//!
//! This library turns hourly marine and weather forecasts into per-location,
//! per-day ratings, picks the best spots of the week and assembles a
//! forecast document for publishing.

pub mod catalog;
pub mod config;
pub mod error;
pub mod fixture;
pub mod forecast;
pub mod logging;
pub mod models;
pub mod rating;
pub mod weather;

// Re-export core types for public API
pub use catalog::LocationCatalog;
pub use config::SnorkelAlertConfig;
pub use error::SnorkelAlertError;
pub use fixture::Snapshot;
pub use forecast::{AssemblyInput, AssemblySettings, ForecastAssembler, Summarizer, compare_documents};
pub use models::{ForecastDocument, HourlySample, Location, LocationForecast};
pub use rating::{ScoringMode, beach_score, snorkel_score};
pub use weather::{FetchOutcome, ForecastProvider, OpenMeteoProvider, fetch_all};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, SnorkelAlertError>;
