//! Error types for subfind.

use thiserror::Error;

/// Failure while fetching suggestions. Callers treat every variant as
/// "no suggestions available".
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Invalid API base URL '{0}'")]
    InvalidBaseUrl(String),

    #[error("Suggestion request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Suggestion endpoint returned HTTP {0}")]
    Status(u16),

    #[error("Could not decode suggestions: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            FetchError::Decode(e.to_string())
        } else if let Some(status) = e.status() {
            FetchError::Status(status.as_u16())
        } else {
            FetchError::Transport(e)
        }
    }
}

/// Failure while loading `subfind.toml`.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid TOML in {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid value for '{key}': {reason}")]
    InvalidValue { key: String, reason: String },
}

/// Result type alias for configuration loading
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
