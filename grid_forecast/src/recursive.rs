//! Recursive multi-step prediction
//!
//! Each prediction is fed back as the newest window value for the next step.
//! There is no re-anchoring to ground truth inside a horizon, so errors
//! compound from one step to the next.

use crate::error::{ForecastError, Result};
use crate::models::SequenceModel;
use grid_math::FeatureWindow;
use log::trace;

/// One prediction step: predict from `window`, then slide it.
///
/// Returns the prediction and the window for the next step; `window` itself
/// is left untouched.
pub fn step<M>(model: &M, window: &FeatureWindow) -> Result<(f64, FeatureWindow)>
where
    M: SequenceModel + ?Sized,
{
    let prediction = model.predict(window)?;
    if !prediction.is_finite() {
        return Err(ForecastError::ModelError(format!(
            "Model '{}' produced a non-finite prediction",
            model.name()
        )));
    }
    Ok((prediction, window.advance(prediction)))
}

/// Drives a sequence model one step at a time
#[derive(Debug, Clone, Copy)]
pub struct RecursivePredictor {
    max_horizon: usize,
}

impl RecursivePredictor {
    /// Create a predictor accepting horizons up to `max_horizon` steps
    pub fn new(max_horizon: usize) -> Self {
        Self { max_horizon }
    }

    pub fn max_horizon(&self) -> usize {
        self.max_horizon
    }

    /// Predict `horizon` values in chronological order
    pub fn forecast<M>(&self, model: &M, seed: &FeatureWindow, horizon: usize) -> Result<Vec<f64>>
    where
        M: SequenceModel + ?Sized,
    {
        if horizon == 0 {
            return Err(ForecastError::InvalidHorizon(
                "Horizon must be at least one step".to_string(),
            ));
        }
        if horizon > self.max_horizon {
            return Err(ForecastError::InvalidHorizon(format!(
                "Horizon of {} steps exceeds the limit of {}",
                horizon, self.max_horizon
            )));
        }
        if seed.len() != model.window_size() {
            return Err(ForecastError::InvalidWindow(format!(
                "Model '{}' expects a window of {}, seed has {}",
                model.name(),
                model.window_size(),
                seed.len()
            )));
        }

        let mut predictions = Vec::with_capacity(horizon);
        let mut window = seed.clone();
        for i in 0..horizon {
            let (prediction, next) = step(model, &window)?;
            trace!("{} step {}: {}", model.name(), i + 1, prediction);
            predictions.push(prediction);
            window = next;
        }

        Ok(predictions)
    }
}
