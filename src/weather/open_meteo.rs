//! Open-Meteo marine + weather provider

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use reqwest::Url;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use super::ForecastProvider;
use crate::config::ProviderConfig;
use crate::models::{DailyWeather, HourlySample, Location, LocationForecast};
use crate::rating::round_to;
use crate::{Result, SnorkelAlertError};

const MARINE_HOURLY: &str = "wave_height,wind_wave_height,swell_wave_height,swell_wave_direction,swell_wave_period,sea_surface_temperature";
const WEATHER_HOURLY: &str = "temperature_2m,apparent_temperature,wind_speed_10m,wind_direction_10m,wind_gusts_10m,cloud_cover,uv_index,relative_humidity_2m";
const WEATHER_DAILY: &str = "temperature_2m_max,temperature_2m_min,wind_speed_10m_max,wind_direction_10m_dominant,uv_index_max";

type Series = Option<Vec<Option<f64>>>;

#[derive(Debug, Deserialize)]
pub struct MarineResponse {
    pub hourly: Option<MarineHourly>,
}

#[derive(Debug, Deserialize)]
pub struct MarineHourly {
    pub time: Vec<String>,
    pub wave_height: Series,
    pub wind_wave_height: Series,
    #[serde(rename = "swell_wave_height")]
    pub swell_height: Series,
    #[serde(rename = "swell_wave_direction")]
    pub swell_direction: Series,
    #[serde(rename = "swell_wave_period")]
    pub swell_period: Series,
    pub sea_surface_temperature: Series,
}

#[derive(Debug, Deserialize)]
pub struct WeatherResponse {
    pub hourly: Option<WeatherHourly>,
    pub daily: Option<WeatherDaily>,
}

#[derive(Debug, Deserialize)]
pub struct WeatherHourly {
    pub time: Vec<String>,
    #[serde(rename = "temperature_2m")]
    pub temperature: Series,
    pub apparent_temperature: Series,
    #[serde(rename = "wind_speed_10m")]
    pub wind_speed: Series,
    #[serde(rename = "wind_direction_10m")]
    pub wind_direction: Series,
    #[serde(rename = "wind_gusts_10m")]
    pub wind_gusts: Series,
    pub cloud_cover: Series,
    pub uv_index: Series,
    #[serde(rename = "relative_humidity_2m")]
    pub humidity: Series,
}

#[derive(Debug, Deserialize)]
pub struct WeatherDaily {
    pub time: Vec<String>,
    #[serde(rename = "temperature_2m_max")]
    pub temperature_max: Series,
    #[serde(rename = "temperature_2m_min")]
    pub temperature_min: Series,
    #[serde(rename = "wind_speed_10m_max")]
    pub wind_speed_max: Series,
    #[serde(rename = "wind_direction_10m_dominant")]
    pub wind_direction_dominant: Series,
    pub uv_index_max: Series,
}

fn value_at(series: &Series, index: usize) -> Option<f64> {
    series.as_ref().and_then(|values| values.get(index).copied().flatten())
}

fn parse_timestamp(raw: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M")
        .map_err(|e| SnorkelAlertError::provider(format!("Invalid timestamp '{raw}': {e}")))
}

/// Join marine rows onto weather rows by timestamp.
///
/// Weather hours drive the series; marine values missing for an hour stay
/// `None`.
pub fn merge_hourly(weather: &WeatherHourly, marine: Option<&MarineHourly>) -> Result<Vec<HourlySample>> {
    let marine_index: HashMap<&str, usize> = marine
        .map(|m| m.time.iter().enumerate().map(|(i, t)| (t.as_str(), i)).collect())
        .unwrap_or_default();

    weather
        .time
        .iter()
        .enumerate()
        .map(|(i, raw)| {
            let mut sample = HourlySample {
                air_temperature: value_at(&weather.temperature, i),
                apparent_temperature: value_at(&weather.apparent_temperature, i),
                wind_speed: value_at(&weather.wind_speed, i),
                wind_direction: value_at(&weather.wind_direction, i),
                wind_gusts: value_at(&weather.wind_gusts, i),
                cloud_cover: value_at(&weather.cloud_cover, i),
                uv_index: value_at(&weather.uv_index, i),
                humidity: value_at(&weather.humidity, i),
                ..HourlySample::at(parse_timestamp(raw)?)
            };

            if let (Some(m), Some(&j)) = (marine, marine_index.get(raw.as_str())) {
                sample.wave_height = value_at(&m.wave_height, j);
                sample.wind_wave_height = value_at(&m.wind_wave_height, j);
                sample.swell_height = value_at(&m.swell_height, j);
                sample.swell_direction = value_at(&m.swell_direction, j);
                sample.swell_period = value_at(&m.swell_period, j);
                sample.sea_temperature = value_at(&m.sea_surface_temperature, j);
            }

            Ok(sample)
        })
        .collect()
}

pub fn parse_daily(daily: &WeatherDaily) -> Result<Vec<DailyWeather>> {
    daily
        .time
        .iter()
        .enumerate()
        .map(|(i, raw)| {
            let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map_err(|e| SnorkelAlertError::provider(format!("Invalid date '{raw}': {e}")))?;
            Ok(DailyWeather {
                temperature_max: value_at(&daily.temperature_max, i),
                temperature_min: value_at(&daily.temperature_min, i),
                wind_speed_max: value_at(&daily.wind_speed_max, i),
                wind_direction_dominant: value_at(&daily.wind_direction_dominant, i),
                uv_index_max: value_at(&daily.uv_index_max, i),
                ..DailyWeather::empty(date)
            })
        })
        .collect()
}

/// Mean of the non-null sea surface temperatures, 1 decimal
#[must_use]
pub fn mean_sea_temperature(marine: &MarineResponse) -> Option<f64> {
    let temps: Vec<f64> = marine
        .hourly
        .as_ref()
        .and_then(|h| h.sea_surface_temperature.as_ref())
        .map(|values| values.iter().flatten().copied().collect())
        .unwrap_or_default();

    if temps.is_empty() {
        return None;
    }
    Some(round_to(temps.iter().sum::<f64>() / temps.len() as f64, 1))
}

pub struct OpenMeteoProvider {
    client: ClientWithMiddleware,
    marine_url: String,
    weather_url: String,
    timezone: String,
    forecast_days: u32,
    water_probe: (f64, f64),
}

impl OpenMeteoProvider {
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        let inner = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SnorkelAlertError::provider(format!("Failed to build HTTP client: {e}")))?;

        let client = ClientBuilder::new(inner)
            .with(RetryTransientMiddleware::new_with_policy(
                ExponentialBackoff::builder().build_with_max_retries(config.max_retries),
            ))
            .build();

        Ok(Self {
            client,
            marine_url: config.marine_url.clone(),
            weather_url: config.weather_url.clone(),
            timezone: config.timezone.clone(),
            forecast_days: config.forecast_days,
            water_probe: (config.water_probe_latitude, config.water_probe_longitude),
        })
    }

    fn url(&self, base: &str, params: &[(&str, String)]) -> Result<Url> {
        Url::parse_with_params(base, params)
            .map_err(|e| SnorkelAlertError::provider(format!("Invalid provider URL {base}: {e}")))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| SnorkelAlertError::provider(format!("Request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SnorkelAlertError::provider(format!(
                "Open-Meteo returned {status}: {body}"
            )));
        }

        response
            .json()
            .await
            .map_err(|e| SnorkelAlertError::provider(format!("Failed to parse Open-Meteo response: {e}")))
    }

    async fn marine(&self, latitude: f64, longitude: f64, hourly: &str, days: u32) -> Result<MarineResponse> {
        let url = self.url(
            &self.marine_url,
            &[
                ("latitude", latitude.to_string()),
                ("longitude", longitude.to_string()),
                ("hourly", hourly.to_string()),
                ("timezone", self.timezone.clone()),
                ("forecast_days", days.to_string()),
            ],
        )?;
        self.get_json(url).await
    }

    async fn weather(&self, latitude: f64, longitude: f64) -> Result<WeatherResponse> {
        let url = self.url(
            &self.weather_url,
            &[
                ("latitude", latitude.to_string()),
                ("longitude", longitude.to_string()),
                ("hourly", WEATHER_HOURLY.to_string()),
                ("daily", WEATHER_DAILY.to_string()),
                ("timezone", self.timezone.clone()),
                ("forecast_days", self.forecast_days.to_string()),
            ],
        )?;
        self.get_json(url).await
    }
}

#[async_trait]
impl ForecastProvider for OpenMeteoProvider {
    #[instrument(skip(self, location), fields(location = %location.name))]
    async fn fetch_location(&self, location: &Location) -> Result<LocationForecast> {
        let marine = self
            .marine(location.latitude, location.longitude, MARINE_HOURLY, self.forecast_days)
            .await?;
        let weather = self.weather(location.latitude, location.longitude).await?;

        let hourly = weather
            .hourly
            .as_ref()
            .ok_or_else(|| SnorkelAlertError::provider("Weather response has no hourly block"))?;
        let samples = merge_hourly(hourly, marine.hourly.as_ref())?;
        let daily = weather.daily.as_ref().map(parse_daily).transpose()?.unwrap_or_default();

        debug!("{} hourly samples, {} daily blocks", samples.len(), daily.len());
        Ok(LocationForecast {
            location: location.name.clone(),
            hourly: samples,
            daily,
        })
    }

    #[instrument(skip(self))]
    async fn water_temperature(&self) -> Option<f64> {
        let (latitude, longitude) = self.water_probe;
        match self.marine(latitude, longitude, "sea_surface_temperature", 1).await {
            Ok(marine) => mean_sea_temperature(&marine),
            Err(e) => {
                warn!("Water temperature probe failed: {}", e);
                None
            }
        }
    }
}
