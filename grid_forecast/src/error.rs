//! Error types for the grid_forecast crate

use chrono::NaiveDate;
use grid_math::MathError;
use thiserror::Error;

/// Custom error types for the grid_forecast crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// Requested range ends before it starts
    #[error("Invalid range: end date {end} is before start date {start}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    /// Not enough observations for the chosen strategy or window
    #[error("Insufficient history: {0}")]
    InsufficientHistory(String),

    /// Window size misconfigured relative to the data length
    #[error("Invalid window: {0}")]
    InvalidWindow(String),

    /// Horizon is zero or exceeds the configured bound
    #[error("Invalid horizon: {0}")]
    InvalidHorizon(String),

    /// Scaler used before it was fitted
    #[error("Scaler used before it was fitted")]
    ScalerNotFitted,

    /// Regressor name outside the configured set
    #[error("Unknown regressor: {0}")]
    UnknownRegressor(String),

    /// Configured regressor absent from the data
    #[error("Missing regressor: {0}")]
    MissingRegressor(String),

    /// Error reported by a model while predicting
    #[error("Model error: {0}")]
    ModelError(String),

    /// Models requested before they were loaded
    #[error("Model not loaded: {0}")]
    ModelNotLoaded(String),

    /// Error related to data validation or processing
    #[error("Data error: {0}")]
    DataError(String),

    /// Error parsing dates or numbers
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Other numeric preprocessing errors
    #[error("Math error: {0}")]
    MathError(String),

    /// Error from IO operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error reading CSV input
    #[error("CSV error: {0}")]
    CsvError(String),

    /// Error reading or writing JSON
    #[error("JSON error: {0}")]
    JsonError(String),
}

impl ForecastError {
    /// HTTP status a serving layer should answer with
    pub fn status_code(&self) -> u16 {
        match self {
            ForecastError::InvalidRange { .. }
            | ForecastError::InsufficientHistory(_)
            | ForecastError::InvalidWindow(_)
            | ForecastError::InvalidHorizon(_)
            | ForecastError::UnknownRegressor(_)
            | ForecastError::MissingRegressor(_)
            | ForecastError::DataError(_)
            | ForecastError::ParseError(_)
            | ForecastError::CsvError(_) => 400,
            ForecastError::ModelNotLoaded(_) => 503,
            _ => 500,
        }
    }
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;

impl From<MathError> for ForecastError {
    fn from(err: MathError) -> Self {
        match err {
            MathError::ScalerNotFitted => ForecastError::ScalerNotFitted,
            MathError::InvalidWindow { .. } => ForecastError::InvalidWindow(err.to_string()),
            MathError::InsufficientData { .. } => {
                ForecastError::InsufficientHistory(err.to_string())
            }
            other => ForecastError::MathError(other.to_string()),
        }
    }
}

impl From<csv::Error> for ForecastError {
    fn from(err: csv::Error) -> Self {
        ForecastError::CsvError(err.to_string())
    }
}

impl From<serde_json::Error> for ForecastError {
    fn from(err: serde_json::Error) -> Self {
        ForecastError::JsonError(err.to_string())
    }
}

impl From<chrono::ParseError> for ForecastError {
    fn from(err: chrono::ParseError) -> Self {
        ForecastError::ParseError(err.to_string())
    }
}

impl From<std::num::ParseFloatError> for ForecastError {
    fn from(err: std::num::ParseFloatError) -> Self {
        ForecastError::ParseError(err.to_string())
    }
}
