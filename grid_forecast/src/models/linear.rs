//! Linear models loaded from JSON artifacts
//!
//! Both models are fitted elsewhere; this module only evaluates them. An
//! artifact is the serde JSON form of the model struct.

use crate::error::{ForecastError, Result};
use crate::models::{AdditiveModel, SequenceModel};
use crate::regressors::{FutureFrame, RegressorSnapshot};
use chrono::{Datelike, NaiveDate};
use grid_math::FeatureWindow;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

fn read_artifact<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    let raw = fs::read_to_string(path)?;
    serde_json::from_str(&raw).map_err(|e| {
        ForecastError::ModelError(format!("Invalid model artifact {}: {}", path.display(), e))
    })
}

/// Weighted sum of the window plus an intercept
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearSequenceModel {
    pub name: String,
    /// One weight per window position, oldest first
    pub weights: Vec<f64>,
    #[serde(default)]
    pub intercept: f64,
}

impl LinearSequenceModel {
    pub fn new(name: impl Into<String>, weights: Vec<f64>, intercept: f64) -> Result<Self> {
        let model = Self {
            name: name.into(),
            weights,
            intercept,
        };
        model.validate()?;
        Ok(model)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let model: Self = read_artifact(path.as_ref())?;
        model.validate()?;
        Ok(model)
    }

    fn validate(&self) -> Result<()> {
        if self.weights.is_empty() {
            return Err(ForecastError::ModelError(format!(
                "Model '{}' has no weights",
                self.name
            )));
        }
        if !self.intercept.is_finite() || self.weights.iter().any(|w| !w.is_finite()) {
            return Err(ForecastError::ModelError(format!(
                "Model '{}' has non-finite parameters",
                self.name
            )));
        }
        Ok(())
    }
}

impl SequenceModel for LinearSequenceModel {
    fn predict(&self, window: &FeatureWindow) -> Result<f64> {
        if window.len() != self.weights.len() {
            return Err(ForecastError::InvalidWindow(format!(
                "Model '{}' expects {} values, window has {}",
                self.name,
                self.weights.len(),
                window.len()
            )));
        }

        let dot: f64 = self
            .weights
            .iter()
            .zip(window.as_slice())
            .map(|(w, x)| w * x)
            .sum();

        Ok(self.intercept + dot)
    }

    fn window_size(&self) -> usize {
        self.weights.len()
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Additive decomposition: intercept + linear trend + day-of-week effect +
/// weighted regressors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearAdditiveModel {
    pub name: String,
    /// Date at which the trend term is zero
    pub origin: NaiveDate,
    #[serde(default)]
    pub intercept: f64,
    /// Trend increment per day after `origin`
    #[serde(default)]
    pub trend_per_day: f64,
    /// Effect per weekday, Monday first
    #[serde(default)]
    pub weekday_effects: [f64; 7],
    /// Coefficient per regressor name
    #[serde(default)]
    pub regressor_coefficients: BTreeMap<String, f64>,
}

impl LinearAdditiveModel {
    pub fn new(name: impl Into<String>, origin: NaiveDate) -> Self {
        Self {
            name: name.into(),
            origin,
            intercept: 0.0,
            trend_per_day: 0.0,
            weekday_effects: [0.0; 7],
            regressor_coefficients: BTreeMap::new(),
        }
    }

    pub fn with_intercept(mut self, intercept: f64) -> Self {
        self.intercept = intercept;
        self
    }

    pub fn with_trend(mut self, trend_per_day: f64) -> Self {
        self.trend_per_day = trend_per_day;
        self
    }

    pub fn with_weekday_effects(mut self, effects: [f64; 7]) -> Self {
        self.weekday_effects = effects;
        self
    }

    pub fn with_regressor(mut self, name: impl Into<String>, coefficient: f64) -> Self {
        self.regressor_coefficients.insert(name.into(), coefficient);
        self
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        read_artifact(path.as_ref())
    }

    fn predict_day(&self, date: NaiveDate, regressors: &RegressorSnapshot) -> Result<f64> {
        let days = (date - self.origin).num_days() as f64;
        let weekday = self.weekday_effects[date.weekday().num_days_from_monday() as usize];

        let mut value = self.intercept + self.trend_per_day * days + weekday;
        for (name, coefficient) in &self.regressor_coefficients {
            value += coefficient * regressors.get(name)?;
        }
        Ok(value)
    }
}

impl AdditiveModel for LinearAdditiveModel {
    fn predict(&self, frame: &FutureFrame) -> Result<Vec<f64>> {
        frame
            .rows()
            .map(|(date, regressors)| self.predict_day(date, regressors))
            .collect()
    }

    fn name(&self) -> &str {
        &self.name
    }
}
