//! Forecasting configuration
//!
//! All tunable parameters live here. Every field has a default, so a JSON
//! config file only needs the fields it changes.

use crate::error::{ForecastError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Regressors the additive models are trained with
pub const DEFAULT_REGRESSORS: [&str; 11] = [
    "demand_lag_1",
    "demand_lag_7",
    "rrp_lag_1",
    "rrp_lag_7",
    "min_temperature",
    "max_temperature",
    "solar_exposure",
    "rainfall",
    "temp_rain_interaction",
    "is_weekend",
    "extreme_weather",
];

/// Master configuration for a forecasting process
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    /// Lookback of the autoregressive models, in days.
    pub window_size: usize,
    /// Longest forecast accepted, in days (~5 years).
    pub max_horizon_days: usize,
    /// Regressor names consumed by the additive models.
    pub regressors: Vec<String>,
    /// Share of windows used for training in hold-out evaluation.
    pub train_ratio: f64,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            window_size: 30,
            max_horizon_days: 1825,
            regressors: DEFAULT_REGRESSORS.iter().map(|r| r.to_string()).collect(),
            train_ratio: 0.8,
        }
    }
}

impl ForecastConfig {
    /// Read and validate a JSON config file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// Parse and validate a JSON config document
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let config: ForecastConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.window_size == 0 {
            return Err(ForecastError::ConfigError(
                "window_size must be positive".to_string(),
            ));
        }
        if self.max_horizon_days == 0 {
            return Err(ForecastError::ConfigError(
                "max_horizon_days must be positive".to_string(),
            ));
        }
        if !(self.train_ratio > 0.0 && self.train_ratio < 1.0) {
            return Err(ForecastError::ConfigError(format!(
                "train_ratio must be between 0 and 1, got {}",
                self.train_ratio
            )));
        }

        let mut seen = HashSet::new();
        for name in &self.regressors {
            if name.trim().is_empty() {
                return Err(ForecastError::ConfigError(
                    "Regressor names must not be empty".to_string(),
                ));
            }
            if !seen.insert(name.as_str()) {
                return Err(ForecastError::ConfigError(format!(
                    "Duplicate regressor '{}'",
                    name
                )));
            }
        }

        Ok(())
    }
}
