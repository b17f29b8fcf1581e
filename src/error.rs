//! Error types for the courier desk

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Failures raised by the rate calculator
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RateError {
    /// Only the domestic (default) service raises this; other services price at 0
    #[error("Destination not found in tariff: {0}")]
    DestinationNotFound(String),

    #[error("Weight must be a positive number of kg, got {0}")]
    InvalidWeight(f64),
}

/// Crate-level errors
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Rate(#[from] RateError),

    #[error("Consignment not found: {0}")]
    ConsignmentNotFound(String),

    #[error("Unknown {kind}: {value}")]
    UnknownVariant { kind: &'static str, value: String },

    #[error("Rate table error: {0}")]
    RateTable(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("TOML write error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

impl Error {
    pub(crate) fn unknown(kind: &'static str, value: &str) -> Self {
        Error::UnknownVariant {
            kind,
            value: value.to_string(),
        }
    }
}
