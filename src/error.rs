//! Error types and handling for the snorkel alert application
//!
//! The rating engine itself never fails: missing samples fall back to
//! defaults and empty days are dropped. These errors cover the edges around
//! it (configuration, provider calls, snapshot files).

use thiserror::Error;

/// Main error type for the snorkel alert application
#[derive(Error, Debug)]
pub enum SnorkelAlertError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Forecast provider errors (HTTP status, malformed payloads)
    #[error("Provider error: {message}")]
    Provider { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// Snapshot / baseline file errors
    #[error("Fixture error: {message}")]
    Fixture { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// JSON encoding or decoding errors
    #[error("JSON error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },
}

impl SnorkelAlertError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new provider error
    pub fn provider<S: Into<String>>(message: S) -> Self {
        Self::Provider {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new fixture error
    pub fn fixture<S: Into<String>>(message: S) -> Self {
        Self::Fixture {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            SnorkelAlertError::Config { .. } => {
                "Configuration error. Please check your config file and location catalog."
                    .to_string()
            }
            SnorkelAlertError::Provider { .. } => {
                "Unable to fetch forecast data. Please check your internet connection.".to_string()
            }
            SnorkelAlertError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            SnorkelAlertError::Fixture { message } => {
                format!("Snapshot file problem: {message}")
            }
            SnorkelAlertError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
            SnorkelAlertError::Json { .. } => {
                "Could not read or write forecast JSON.".to_string()
            }
        }
    }
}
