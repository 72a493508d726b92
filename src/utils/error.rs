//! Error handling for the sentiment pipeline.

use thiserror::Error;

/// Main error type for the sentiment pipeline
#[derive(Debug, Error)]
pub enum Error {
    /// Bad symbol, limit, or other caller-supplied value
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Network or authentication failure against an external API
    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    /// Data-related errors (e.g. missing or malformed payloads)
    #[error("Data error: {0}")]
    DataError(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// TOML deserialization errors
    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),
}

/// Result type for the sentiment pipeline
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Map a transport-level `reqwest` failure onto the taxonomy, tagging it
    /// with the upstream that produced it.
    pub fn from_reqwest(upstream: &str, err: reqwest::Error) -> Self {
        if err.is_decode() {
            Error::DataError(format!("{} returned an unreadable payload: {}", upstream, err))
        } else {
            Error::UpstreamUnavailable(format!("{}: {}", upstream, err))
        }
    }

    /// True for failures the caller could not have avoided by passing
    /// different arguments.
    pub fn is_upstream(&self) -> bool {
        matches!(self, Error::UpstreamUnavailable(_) | Error::DataError(_))
    }
}
