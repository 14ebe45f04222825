//! Moving average models over a lookback window
//!
//! Baselines for the autoregressive path: they need no training and make a
//! handy reference when judging a trained sequence model.

use crate::error::{ForecastError, Result};
use crate::models::SequenceModel;
use grid_math::FeatureWindow;

/// Predicts the arithmetic mean of the window
#[derive(Debug, Clone)]
pub struct WindowMean {
    /// Name of the model
    name: String,
    /// Window size
    window: usize,
}

/// Predicts the exponentially smoothed level of the window
#[derive(Debug, Clone)]
pub struct WindowEma {
    /// Name of the model
    name: String,
    /// Window size
    window: usize,
    /// Smoothing factor
    alpha: f64,
}

fn check_length(expected: usize, window: &FeatureWindow) -> Result<()> {
    if window.len() != expected {
        return Err(ForecastError::InvalidWindow(format!(
            "Model expects {} values, window has {}",
            expected,
            window.len()
        )));
    }
    Ok(())
}

impl WindowMean {
    /// Create a new window mean model
    pub fn new(window: usize) -> Result<Self> {
        if window == 0 {
            return Err(ForecastError::InvalidWindow(
                "Window size must be positive".to_string(),
            ));
        }

        Ok(Self {
            name: format!("Window Mean (window={})", window),
            window,
        })
    }
}

impl SequenceModel for WindowMean {
    fn predict(&self, window: &FeatureWindow) -> Result<f64> {
        check_length(self.window, window)?;
        Ok(window.as_slice().iter().sum::<f64>() / self.window as f64)
    }

    fn window_size(&self) -> usize {
        self.window
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl WindowEma {
    /// Create a new exponential moving average model
    pub fn new(window: usize, alpha: f64) -> Result<Self> {
        if window == 0 {
            return Err(ForecastError::InvalidWindow(
                "Window size must be positive".to_string(),
            ));
        }
        if alpha <= 0.0 || alpha >= 1.0 {
            return Err(ForecastError::ConfigError(
                "Alpha must be between 0 and 1".to_string(),
            ));
        }

        Ok(Self {
            name: format!("Window EMA (window={}, alpha={})", window, alpha),
            window,
            alpha,
        })
    }
}

impl SequenceModel for WindowEma {
    fn predict(&self, window: &FeatureWindow) -> Result<f64> {
        check_length(self.window, window)?;

        // Initialize with the oldest value
        let values = window.as_slice();
        let level = values[1..]
            .iter()
            .fold(values[0], |level, &v| self.alpha * v + (1.0 - self.alpha) * level);

        Ok(level)
    }

    fn window_size(&self) -> usize {
        self.window
    }

    fn name(&self) -> &str {
        &self.name
    }
}
