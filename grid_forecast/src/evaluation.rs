//! Hold-out evaluation of sequence models
//!
//! The series is min-max scaled and sliced into `(window, target)` pairs;
//! the leading `train_ratio` share of pairs is the training set and the rest
//! is scored with one-step predictions in the original scale.

use crate::error::{ForecastError, Result};
use crate::metrics::{forecast_accuracy, ForecastAccuracy};
use crate::models::SequenceModel;
use grid_math::{slice, ScalerAdapter, ScalerKind};
use log::debug;
use serde::Serialize;

/// Outcome of a hold-out evaluation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HoldoutReport {
    pub train_windows: usize,
    pub test_windows: usize,
    /// Test targets, original scale
    pub actual: Vec<f64>,
    /// One-step predictions for the test targets, original scale
    pub predicted: Vec<f64>,
    pub accuracy: ForecastAccuracy,
}

/// Score one-step predictions of `model` on the tail of `values`
pub fn evaluate_holdout<M>(
    model: &M,
    values: &[f64],
    window_size: usize,
    train_ratio: f64,
) -> Result<HoldoutReport>
where
    M: SequenceModel + ?Sized,
{
    if !(train_ratio > 0.0 && train_ratio < 1.0) {
        return Err(ForecastError::ConfigError(format!(
            "train_ratio must be between 0 and 1, got {}",
            train_ratio
        )));
    }

    let scaler = ScalerAdapter::fitted(ScalerKind::MinMax, values)?;
    let scaled = scaler.transform_all(values)?;
    let pairs = slice(&scaled, window_size)?;

    let train_windows = (pairs.len() as f64 * train_ratio) as usize;
    let test = &pairs[train_windows..];
    if test.is_empty() {
        return Err(ForecastError::InsufficientHistory(format!(
            "{} windows leave no test set at train ratio {}",
            pairs.len(),
            train_ratio
        )));
    }

    let mut predicted = Vec::with_capacity(test.len());
    let mut targets = Vec::with_capacity(test.len());
    for (window, target) in test {
        predicted.push(model.predict(window)?);
        targets.push(*target);
    }

    let actual = scaler.inverse_all(&targets)?;
    let predicted = scaler.inverse_all(&predicted)?;
    let accuracy = forecast_accuracy(&predicted, &actual)?;

    debug!(
        "Hold-out for {}: {} train / {} test windows, RMSE {:.4}",
        model.name(),
        train_windows,
        test.len(),
        accuracy.rmse
    );

    Ok(HoldoutReport {
        train_windows,
        test_windows: test.len(),
        actual,
        predicted,
        accuracy,
    })
}
