//! Top-level forecasting entry point
//!
//! Validates a requested date range against the available history, runs one
//! of the two strategies for demand and price, and merges the results.
//!
//! Date conventions differ between the strategies:
//! - Additive: one row per day in `[start, end]`, inclusive
//! - Autoregressive: one row per day in `[start + 1, end]`, because the seed
//!   window's newest value is the observation just before `start`

use crate::config::ForecastConfig;
use crate::data::{daily_range, HistoricalSeries, MarketHistory};
use crate::error::{ForecastError, Result};
use crate::models::{AdditiveModel, SequenceModel};
use crate::recursive::RecursivePredictor;
use crate::regressors::{snapshot, FutureFrame, RegressorSet};
use crate::registry::ModelRegistry;
use crate::result::{ForecastResult, Quantity, QuantityForecast};
use chrono::{Duration, NaiveDate};
use grid_math::{last_window, ScalerAdapter, ScalerKind};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Forecasting strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Trend + seasonality model with carried-forward regressors
    Additive,
    /// Windowed sequence model predicting recursively
    Autoregressive,
}

impl Strategy {
    /// Normalization used around this strategy's models
    pub fn scaler_kind(self) -> ScalerKind {
        match self {
            Strategy::Additive => ScalerKind::Standard,
            Strategy::Autoregressive => ScalerKind::MinMax,
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Additive => write!(f, "additive"),
            Strategy::Autoregressive => write!(f, "autoregressive"),
        }
    }
}

impl FromStr for Strategy {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "additive" | "prophet" => Ok(Strategy::Additive),
            "autoregressive" | "ar" | "lstm" => Ok(Strategy::Autoregressive),
            other => Err(ForecastError::ParseError(format!(
                "Unknown strategy '{}'",
                other
            ))),
        }
    }
}

/// Runs forecast requests against a set of trained models.
///
/// Holds only read-only state; scalers are fitted per request.
#[derive(Debug, Clone)]
pub struct ForecastOrchestrator {
    config: ForecastConfig,
    regressors: RegressorSet,
    models: ModelRegistry,
}

impl ForecastOrchestrator {
    /// Fails when a loaded sequence model's lookback differs from
    /// `config.window_size`
    pub fn new(config: ForecastConfig, models: ModelRegistry) -> Result<Self> {
        config.validate()?;
        let regressors = RegressorSet::from_config(&config)?;

        if let Ok(sequence) = models.sequence() {
            for model in [&sequence.demand, &sequence.price] {
                if model.window_size() != config.window_size {
                    return Err(ForecastError::ConfigError(format!(
                        "Model '{}' has a lookback of {} days, window_size is {}",
                        model.name(),
                        model.window_size(),
                        config.window_size
                    )));
                }
            }
        }
        Ok(Self {
            config,
            regressors,
            models,
        })
    }

    /// Orchestrator over the process-wide model registry
    pub fn from_global(config: ForecastConfig) -> Result<Self> {
        Self::new(config, ModelRegistry::global()?.clone())
    }

    pub fn config(&self) -> &ForecastConfig {
        &self.config
    }

    /// Forecast demand and price for `[start, end]`.
    ///
    /// The result covers the full range or the call fails.
    pub fn run(
        &self,
        history: &MarketHistory,
        start: NaiveDate,
        end: NaiveDate,
        strategy: Strategy,
    ) -> Result<ForecastResult> {
        if end < start {
            return Err(ForecastError::InvalidRange { start, end });
        }

        debug!(
            "{} forecast {}..{} over {} observations",
            strategy,
            start,
            end,
            history.len()
        );

        match strategy {
            Strategy::Additive => self.run_additive(history, start, end),
            Strategy::Autoregressive => self.run_autoregressive(history, start, end),
        }
    }

    fn run_additive(
        &self,
        history: &MarketHistory,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<ForecastResult> {
        if history.is_empty() {
            return Err(ForecastError::InsufficientHistory(
                "Additive forecasting needs at least one observation".to_string(),
            ));
        }

        let days = (end - start).num_days() as usize + 1;
        if days > self.config.max_horizon_days {
            return Err(ForecastError::InvalidHorizon(format!(
                "{} days requested, limit is {}",
                days, self.config.max_horizon_days
            )));
        }

        let models = self.models.additive()?;
        let context = snapshot(history.demand(), &self.regressors)?;
        let frame = FutureFrame::daily(start, end, context)?;

        let demand = Self::predict_additive(
            models.demand.as_ref(),
            &frame,
            history.demand(),
            Quantity::Demand,
        )?;
        let price = Self::predict_additive(
            models.price.as_ref(),
            &frame,
            history.price(),
            Quantity::Price,
        )?;

        ForecastResult::merge(demand, price)
    }

    fn predict_additive(
        model: &dyn AdditiveModel,
        frame: &FutureFrame,
        history: &HistoricalSeries,
        quantity: Quantity,
    ) -> Result<QuantityForecast> {
        let scaler = ScalerAdapter::fitted(Strategy::Additive.scaler_kind(), &history.values())?;

        let scaled = model.predict(frame)?;
        if scaled.len() != frame.len() {
            return Err(ForecastError::ModelError(format!(
                "Model '{}' returned {} values for {} dates",
                model.name(),
                scaled.len(),
                frame.len()
            )));
        }

        let values = scaler.inverse_all(&scaled)?;
        QuantityForecast::new(quantity, frame.dates(), &values)
    }

    fn run_autoregressive(
        &self,
        history: &MarketHistory,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<ForecastResult> {
        let window_size = self.config.window_size;
        let available = history.demand().count_before(start);
        if available < window_size {
            return Err(ForecastError::InsufficientHistory(format!(
                "{} observations before {}, need {}",
                available, start, window_size
            )));
        }

        let horizon = (end - start).num_days() as usize;
        let models = self.models.sequence()?;
        let predictor = RecursivePredictor::new(self.config.max_horizon_days);

        let demand = self.predict_recursive(
            &predictor,
            models.demand.as_ref(),
            history.demand(),
            available,
            horizon,
        )?;
        let price = self.predict_recursive(
            &predictor,
            models.price.as_ref(),
            history.price(),
            available,
            horizon,
        )?;

        let dates = daily_range(start + Duration::days(1), start + Duration::days(horizon as i64))?;

        ForecastResult::merge(
            QuantityForecast::new(Quantity::Demand, &dates, &demand)?,
            QuantityForecast::new(Quantity::Price, &dates, &price)?,
        )
    }

    fn predict_recursive(
        &self,
        predictor: &RecursivePredictor,
        model: &dyn SequenceModel,
        history: &HistoricalSeries,
        before_index: usize,
        horizon: usize,
    ) -> Result<Vec<f64>> {
        let values = history.values();
        let scaler = ScalerAdapter::fitted(Strategy::Autoregressive.scaler_kind(), &values)?;
        let scaled = scaler.transform_all(&values)?;

        let seed = last_window(&scaled, self.config.window_size, before_index)?;
        let predictions = predictor.forecast(model, &seed, horizon)?;

        Ok(scaler.inverse_all(&predictions)?)
    }
}
