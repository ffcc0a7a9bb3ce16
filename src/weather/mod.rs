//! Forecast providers
//!
//! A provider turns a catalog location into hourly and daily samples.
//! [`fetch_all`] runs one provider over the whole catalog with bounded
//! concurrency and hands the rating core its input in catalog order.

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use tracing::{info, warn};

use crate::catalog::LocationCatalog;
use crate::models::{Location, LocationForecast};

pub mod open_meteo;

pub use open_meteo::OpenMeteoProvider;

#[async_trait]
pub trait ForecastProvider: Send + Sync {
    /// Hourly and daily data for one location
    async fn fetch_location(&self, location: &Location) -> crate::Result<LocationForecast>;

    /// Current coastal water temperature in Celsius, if known
    async fn water_temperature(&self) -> Option<f64>;
}

/// Result of fetching a whole catalog
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchOutcome {
    /// Successful forecasts, in catalog order
    pub forecasts: Vec<LocationForecast>,
    /// Names of locations whose fetch failed, in catalog order
    pub errors: Vec<String>,
    pub water_temp_c: Option<f64>,
    pub cache_hits: Vec<String>,
}

/// Fetch every catalog location, at most `concurrency` at a time
pub async fn fetch_all(
    provider: &dyn ForecastProvider,
    catalog: &LocationCatalog,
    concurrency: usize,
) -> FetchOutcome {
    info!(
        "Fetching forecasts for {} locations (concurrency {})",
        catalog.len(),
        concurrency
    );

    let mut results: Vec<(usize, &Location, crate::Result<LocationForecast>)> =
        stream::iter(catalog.locations().iter().enumerate())
            .map(|(index, location)| async move {
                (index, location, provider.fetch_location(location).await)
            })
            .buffer_unordered(concurrency.max(1))
            .collect()
            .await;
    results.sort_by_key(|(index, _, _)| *index);

    let mut outcome = FetchOutcome::default();
    for (_, location, result) in results {
        match result {
            Ok(forecast) => outcome.forecasts.push(forecast),
            Err(e) => {
                warn!("Failed to fetch forecast for {}: {}", location.name, e);
                outcome.errors.push(location.name.clone());
            }
        }
    }

    outcome.water_temp_c = provider.water_temperature().await;
    if outcome.water_temp_c.is_none() {
        warn!("Water temperature unavailable");
    }

    info!(
        "Fetched {} forecasts, {} failed",
        outcome.forecasts.len(),
        outcome.errors.len()
    );
    outcome
}
