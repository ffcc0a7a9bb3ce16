//! Configuration management for the snorkel alert application
//!
//! Handles loading configuration from files and environment variables,
//! validation of every setting, and loading a custom location catalog.

use crate::SnorkelAlertError;
use crate::catalog::LocationCatalog;
use crate::models::Location;
use crate::rating::ScoringMode;
use anyhow::{Context, Result};
use chrono_tz::Tz;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SnorkelAlertConfig {
    /// Forecast provider settings
    #[serde(default)]
    pub provider: ProviderConfig,
    /// Rating engine settings
    #[serde(default)]
    pub scoring: ScoringConfig,
    /// Top pick settings
    #[serde(default)]
    pub picks: PicksConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// TOML file with `[[locations]]` replacing the built-in Perth catalog
    #[serde(default)]
    pub locations_file: Option<PathBuf>,
}

/// Open-Meteo provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default = "default_marine_url")]
    pub marine_url: String,
    #[serde(default = "default_weather_url")]
    pub weather_url: String,
    /// IANA timezone for provider timestamps and "today"
    #[serde(default = "default_timezone")]
    pub timezone: String,
    #[serde(default = "default_forecast_days")]
    pub forecast_days: u32,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Maximum number of retries for transient failures
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Locations fetched in parallel
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
    #[serde(default = "default_probe_latitude")]
    pub water_probe_latitude: f64,
    #[serde(default = "default_probe_longitude")]
    pub water_probe_longitude: f64,
}

/// Rating engine settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    #[serde(default)]
    pub mode: ScoringMode,
    /// Width of the best-time window in hours
    #[serde(default = "default_window_hours")]
    pub window_hours: u32,
}

/// Top pick settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PicksConfig {
    /// Snorkel locations eligible as the hidden gem
    #[serde(default = "default_hidden_gem_candidates")]
    pub hidden_gem_candidates: Vec<String>,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    locations: Vec<Location>,
}

// Default value functions
fn default_marine_url() -> String {
    "https://marine-api.open-meteo.com/v1/marine".to_string()
}

fn default_weather_url() -> String {
    "https://api.open-meteo.com/v1/forecast".to_string()
}

fn default_timezone() -> String {
    "Australia/Perth".to_string()
}

fn default_forecast_days() -> u32 {
    7
}

fn default_timeout_secs() -> u64 {
    45
}

fn default_max_retries() -> u32 {
    5
}

fn default_concurrency() -> usize {
    4
}

// Cottesloe
fn default_probe_latitude() -> f64 {
    -31.9939
}

fn default_probe_longitude() -> f64 {
    115.7522
}

fn default_window_hours() -> u32 {
    3
}

fn default_hidden_gem_candidates() -> Vec<String> {
    vec!["Hamersley Pool".to_string(), "Watermans Bay".to_string()]
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            marine_url: default_marine_url(),
            weather_url: default_weather_url(),
            timezone: default_timezone(),
            forecast_days: default_forecast_days(),
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
            concurrency: default_concurrency(),
            water_probe_latitude: default_probe_latitude(),
            water_probe_longitude: default_probe_longitude(),
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            mode: ScoringMode::default(),
            window_hours: default_window_hours(),
        }
    }
}

impl Default for PicksConfig {
    fn default() -> Self {
        Self {
            hidden_gem_candidates: default_hidden_gem_candidates(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl ProviderConfig {
    /// Configured timezone; falls back to Perth if unparseable
    #[must_use]
    pub fn tz(&self) -> Tz {
        self.timezone.parse().unwrap_or(chrono_tz::Australia::Perth)
    }
}

impl SnorkelAlertConfig {
    /// Load configuration from the default file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // SNORKEL_ALERT_PROVIDER__TIMEOUT_SECS=60 -> provider.timeout_secs
        builder = builder.add_source(
            Environment::with_prefix("SNORKEL_ALERT")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: SnorkelAlertConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("snorkel-alert").join("config.toml"))
    }

    /// Apply default values to empty configuration fields
    pub fn apply_defaults(&mut self) {
        if self.provider.marine_url.is_empty() {
            self.provider.marine_url = default_marine_url();
        }
        if self.provider.weather_url.is_empty() {
            self.provider.weather_url = default_weather_url();
        }
        if self.provider.timezone.is_empty() {
            self.provider.timezone = default_timezone();
        }
        if self.provider.forecast_days == 0 {
            self.provider.forecast_days = default_forecast_days();
        }
        if self.provider.timeout_secs == 0 {
            self.provider.timeout_secs = default_timeout_secs();
        }
        if self.provider.concurrency == 0 {
            self.provider.concurrency = default_concurrency();
        }
        if self.scoring.window_hours == 0 {
            self.scoring.window_hours = default_window_hours();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.provider.timeout_secs > 300 {
            return Err(SnorkelAlertError::config("Provider timeout cannot exceed 300 seconds").into());
        }

        if self.provider.max_retries > 10 {
            return Err(SnorkelAlertError::config("Provider max retries cannot exceed 10").into());
        }

        if !(1..=32).contains(&self.provider.concurrency) {
            return Err(SnorkelAlertError::config("Provider concurrency must be between 1 and 32").into());
        }

        if !(1..=16).contains(&self.provider.forecast_days) {
            return Err(SnorkelAlertError::config("Forecast days must be between 1 and 16").into());
        }

        if !(1..=8).contains(&self.scoring.window_hours) {
            return Err(SnorkelAlertError::config("Best-time window must be between 1 and 8 hours").into());
        }

        Ok(())
    }

    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(SnorkelAlertError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(SnorkelAlertError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        for url in [&self.provider.marine_url, &self.provider.weather_url] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(SnorkelAlertError::config(format!(
                    "Provider URL '{url}' must be a valid HTTP or HTTPS URL"
                ))
                .into());
            }
        }

        if self.provider.timezone.parse::<Tz>().is_err() {
            return Err(SnorkelAlertError::config(format!(
                "Unknown timezone '{}'",
                self.provider.timezone
            ))
            .into());
        }

        Ok(())
    }

    /// Configured location catalog, or the built-in Perth catalog
    pub fn catalog(&self) -> Result<LocationCatalog> {
        match &self.locations_file {
            Some(path) => load_catalog(path),
            None => Ok(LocationCatalog::perth_metro()),
        }
    }
}

/// Load a location catalog from a TOML file of `[[locations]]` tables
pub fn load_catalog(path: &Path) -> Result<LocationCatalog> {
    let settings = Config::builder()
        .add_source(File::from(path).format(config::FileFormat::Toml))
        .build()
        .with_context(|| format!("Failed to read location catalog: {}", path.display()))?;

    let file: CatalogFile = settings
        .try_deserialize()
        .with_context(|| format!("Failed to parse location catalog: {}", path.display()))?;

    LocationCatalog::new(file.locations)
        .with_context(|| format!("Invalid location catalog: {}", path.display()))
}
