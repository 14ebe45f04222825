//! Invertible scalers applied before a model call and reversed on its output
//!
//! Two normalizations are supported:
//! - Min-max scaling to `[0, 1]` (autoregressive models, bounded output)
//! - Standardization to zero mean and unit variance (additive models)
//!
//! Both are affine maps `(x - offset) / scale`, so values outside the fitted
//! range are extrapolated linearly rather than clamped.

use crate::statistics::{mean, min_max, population_std_dev};
use crate::{MathError, Result};
use serde::{Deserialize, Serialize};

/// Spreads at or below this are treated as zero and scaled by 1.0
const DEGENERATE_SCALE: f64 = 10.0 * f64::EPSILON;

/// Normalization method of a scaler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalerKind {
    /// Map the fitted minimum to 0 and maximum to 1
    MinMax,
    /// Subtract the mean and divide by the population standard deviation
    Standard,
}

/// Parameters learned by fitting a scaler
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScalerState {
    kind: ScalerKind,
    offset: f64,
    scale: f64,
}

impl ScalerState {
    /// Learn scaling parameters from a series
    pub fn fit(kind: ScalerKind, series: &[f64]) -> Result<Self> {
        if series.is_empty() {
            return Err(MathError::InsufficientData {
                needed: 1,
                available: 0,
            });
        }

        let (offset, spread) = match kind {
            ScalerKind::MinMax => {
                let (min, max) = min_max(series)?;
                (min, max - min)
            }
            ScalerKind::Standard => (mean(series)?, population_std_dev(series)?),
        };

        let scale = if spread.abs() <= DEGENERATE_SCALE {
            1.0
        } else {
            spread
        };

        Ok(Self {
            kind,
            offset,
            scale,
        })
    }

    /// Normalization method these parameters belong to
    pub fn kind(&self) -> ScalerKind {
        self.kind
    }

    /// Minimum (min-max) or mean (standard) of the fitted series
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Range (min-max) or standard deviation (standard) of the fitted series
    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn transform(&self, value: f64) -> f64 {
        (value - self.offset) / self.scale
    }

    pub fn inverse(&self, value: f64) -> f64 {
        value * self.scale + self.offset
    }
}

/// A scaler that must be fitted exactly once before use.
///
/// Each physical quantity gets its own adapter; demand and price never share
/// one.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalerAdapter {
    kind: ScalerKind,
    state: Option<ScalerState>,
}

impl ScalerAdapter {
    /// Create an unfitted scaler of the given kind
    pub fn new(kind: ScalerKind) -> Self {
        Self { kind, state: None }
    }

    /// Create an unfitted min-max scaler
    pub fn min_max() -> Self {
        Self::new(ScalerKind::MinMax)
    }

    /// Create an unfitted standardizing scaler
    pub fn standard() -> Self {
        Self::new(ScalerKind::Standard)
    }

    /// Create a scaler and fit it in one step
    pub fn fitted(kind: ScalerKind, series: &[f64]) -> Result<Self> {
        let mut scaler = Self::new(kind);
        scaler.fit(series)?;
        Ok(scaler)
    }

    /// Fit the scaler on a series. Fails if it was already fitted.
    pub fn fit(&mut self, series: &[f64]) -> Result<ScalerState> {
        if self.state.is_some() {
            return Err(MathError::ScalerAlreadyFitted);
        }
        let state = ScalerState::fit(self.kind, series)?;
        self.state = Some(state);
        Ok(state)
    }

    pub fn kind(&self) -> ScalerKind {
        self.kind
    }

    pub fn is_fitted(&self) -> bool {
        self.state.is_some()
    }

    /// Fitted parameters
    pub fn state(&self) -> Result<&ScalerState> {
        self.state.as_ref().ok_or(MathError::ScalerNotFitted)
    }

    /// Normalize a single value
    pub fn transform(&self, value: f64) -> Result<f64> {
        Ok(self.state()?.transform(value))
    }

    /// Normalize a sequence of values
    pub fn transform_all(&self, values: &[f64]) -> Result<Vec<f64>> {
        let state = self.state()?;
        Ok(values.iter().map(|&v| state.transform(v)).collect())
    }

    /// Map a normalized value back to the original scale
    pub fn inverse(&self, value: f64) -> Result<f64> {
        Ok(self.state()?.inverse(value))
    }

    /// Map a normalized sequence back to the original scale
    pub fn inverse_all(&self, values: &[f64]) -> Result<Vec<f64>> {
        let state = self.state()?;
        Ok(values.iter().map(|&v| state.inverse(v)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rstest::rstest;

    const DEMAND: [f64; 6] = [7100.0, 6850.5, 7420.0, 6990.25, 7310.0, 6725.0];

    #[rstest]
    #[case(ScalerKind::MinMax)]
    #[case(ScalerKind::Standard)]
    fn test_round_trip_within_fitted_range(#[case] kind: ScalerKind) {
        let scaler = ScalerAdapter::fitted(kind, &DEMAND).unwrap();

        for x in [6725.0, 6800.0, 7000.123, 7420.0] {
            let back = scaler.inverse(scaler.transform(x).unwrap()).unwrap();
            assert_abs_diff_eq!(back, x, epsilon = 1e-6);
        }

        let scaled = scaler.transform_all(&DEMAND).unwrap();
        let restored = scaler.inverse_all(&scaled).unwrap();
        for (a, b) in restored.iter().zip(DEMAND.iter()) {
            assert_abs_diff_eq!(*a, *b, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_min_max_maps_range_to_unit_interval() {
        let scaler = ScalerAdapter::fitted(ScalerKind::MinMax, &DEMAND).unwrap();

        assert_abs_diff_eq!(scaler.transform(6725.0).unwrap(), 0.0);
        assert_abs_diff_eq!(scaler.transform(7420.0).unwrap(), 1.0);
    }

    #[test]
    fn test_standard_has_zero_mean() {
        let scaler = ScalerAdapter::fitted(ScalerKind::Standard, &DEMAND).unwrap();
        let scaled = scaler.transform_all(&DEMAND).unwrap();

        let mean = scaled.iter().sum::<f64>() / scaled.len() as f64;
        assert_abs_diff_eq!(mean, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_out_of_range_values_extrapolate() {
        let scaler = ScalerAdapter::fitted(ScalerKind::MinMax, &[0.0, 10.0]).unwrap();

        assert_abs_diff_eq!(scaler.transform(20.0).unwrap(), 2.0);
        assert_abs_diff_eq!(scaler.inverse(1.5).unwrap(), 15.0);
        assert_abs_diff_eq!(scaler.inverse(-0.5).unwrap(), -5.0);
    }

    #[test]
    fn test_constant_series_is_shift_only() {
        let scaler = ScalerAdapter::fitted(ScalerKind::MinMax, &[42.0; 5]).unwrap();

        assert_eq!(scaler.state().unwrap().scale(), 1.0);
        assert_abs_diff_eq!(scaler.transform(42.0).unwrap(), 0.0);
        assert_abs_diff_eq!(scaler.inverse(0.25).unwrap(), 42.25);
    }

    #[test]
    fn test_use_before_fit_fails() {
        let scaler = ScalerAdapter::standard();

        assert_eq!(scaler.transform(1.0), Err(MathError::ScalerNotFitted));
        assert_eq!(scaler.inverse_all(&[1.0]), Err(MathError::ScalerNotFitted));
    }

    #[test]
    fn test_fit_only_once() {
        let mut scaler = ScalerAdapter::min_max();
        scaler.fit(&DEMAND).unwrap();

        assert_eq!(scaler.fit(&DEMAND), Err(MathError::ScalerAlreadyFitted));
    }

    #[test]
    fn test_fit_on_empty_series() {
        let mut scaler = ScalerAdapter::min_max();

        assert!(scaler.fit(&[]).is_err());
        assert!(!scaler.is_fitted());
    }
}
