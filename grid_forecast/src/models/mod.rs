//! Forecasting model interfaces
//!
//! Models are opaque to the forecasting pipeline: it only needs a
//! `predict` call. Trained models are shared read-only between requests, so
//! both traits require `Send + Sync` and take `&self`.

use crate::error::Result;
use crate::regressors::FutureFrame;
use grid_math::FeatureWindow;
use std::fmt::{self, Debug};

/// Autoregressive model predicting the next normalized value from a window
pub trait SequenceModel: Debug + Send + Sync {
    /// Predict the value that follows `window`
    fn predict(&self, window: &FeatureWindow) -> Result<f64>;

    /// Lookback the model was trained with
    fn window_size(&self) -> usize;

    /// Name of the model
    fn name(&self) -> &str;
}

/// Trend + seasonality model with exogenous regressors.
///
/// Each row's prediction depends only on its date and regressors, so a whole
/// frame is predicted in one batched call.
pub trait AdditiveModel: Debug + Send + Sync {
    /// Predict one value per frame row, in row order
    fn predict(&self, frame: &FutureFrame) -> Result<Vec<f64>>;

    /// Name of the model
    fn name(&self) -> &str;
}

/// Adapts a plain function into a [`SequenceModel`]
pub struct FnModel<F> {
    name: String,
    window_size: usize,
    predict_fn: F,
}

impl<F> FnModel<F>
where
    F: Fn(&FeatureWindow) -> f64 + Send + Sync,
{
    pub fn new(name: impl Into<String>, window_size: usize, predict_fn: F) -> Self {
        Self {
            name: name.into(),
            window_size,
            predict_fn,
        }
    }
}

impl<F> Debug for FnModel<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnModel")
            .field("name", &self.name)
            .field("window_size", &self.window_size)
            .finish()
    }
}

impl<F> SequenceModel for FnModel<F>
where
    F: Fn(&FeatureWindow) -> f64 + Send + Sync,
{
    fn predict(&self, window: &FeatureWindow) -> Result<f64> {
        Ok((self.predict_fn)(window))
    }

    fn window_size(&self) -> usize {
        self.window_size
    }

    fn name(&self) -> &str {
        &self.name
    }
}

pub mod linear;
pub mod moving_average;
