//! # Grid Math
//!
//! Numeric building blocks for electricity demand and price forecasting.
//! This crate provides the invertible scalers applied around model calls,
//! the fixed-length windows fed to autoregressive models, and a handful of
//! summary statistics used by feature derivation and evaluation.

use thiserror::Error;

pub mod scaling;
pub mod statistics;
pub mod windowing;

pub use scaling::{ScalerAdapter, ScalerKind, ScalerState};
pub use windowing::{last_window, slice, FeatureWindow};

/// Errors that can occur in numeric preprocessing
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("Scaler has not been fitted")]
    ScalerNotFitted,

    #[error("Scaler has already been fitted")]
    ScalerAlreadyFitted,

    #[error("Window size {window_size} is invalid for a series of length {len}")]
    InvalidWindow { window_size: usize, len: usize },

    #[error("Insufficient data: need {needed} values, have {available}")]
    InsufficientData { needed: usize, available: usize },

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for numeric preprocessing operations
pub type Result<T> = std::result::Result<T, MathError>;
