//! Summary statistics over plain `f64` slices
//!
//! Thin wrappers around `statrs` that reject empty or non-finite input
//! instead of returning `NaN`.

use crate::{MathError, Result};
use statrs::statistics::{Data, OrderStatistics, Statistics};

fn ensure_usable(values: &[f64]) -> Result<()> {
    if values.is_empty() {
        return Err(MathError::InsufficientData {
            needed: 1,
            available: 0,
        });
    }
    if values.iter().any(|v| !v.is_finite()) {
        return Err(MathError::InvalidInput(
            "Series contains non-finite values".to_string(),
        ));
    }
    Ok(())
}

/// Arithmetic mean
pub fn mean(values: &[f64]) -> Result<f64> {
    ensure_usable(values)?;
    Ok(values.iter().mean())
}

/// Population standard deviation (divides by `n`, not `n - 1`)
pub fn population_std_dev(values: &[f64]) -> Result<f64> {
    ensure_usable(values)?;
    if values.len() == 1 {
        return Ok(0.0);
    }
    Ok(values.iter().population_std_dev())
}

/// Smallest and largest value of the series
pub fn min_max(values: &[f64]) -> Result<(f64, f64)> {
    ensure_usable(values)?;
    Ok((
        Statistics::min(values.iter()),
        Statistics::max(values.iter()),
    ))
}

/// Quantile `tau` in `[0, 1]`, interpolating linearly between the two
/// nearest order statistics at rank `(n - 1) * tau`
pub fn quantile(values: &[f64], tau: f64) -> Result<f64> {
    ensure_usable(values)?;
    if !(0.0..=1.0).contains(&tau) {
        return Err(MathError::InvalidInput(format!(
            "Quantile must be within [0, 1], got {}",
            tau
        )));
    }

    let rank = (values.len() - 1) as f64 * tau;
    let below = rank.floor();
    let mut data = Data::new(values.to_vec());
    // Order statistics are 1-based
    let low = data.order_statistic(below as usize + 1);
    let high = data.order_statistic(rank.ceil() as usize + 1);

    Ok(low + (rank - below) * (high - low))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_mean_and_std_dev() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];

        assert_abs_diff_eq!(mean(&values).unwrap(), 5.0, epsilon = 1e-12);
        assert_abs_diff_eq!(population_std_dev(&values).unwrap(), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_single_value_has_zero_spread() {
        assert_abs_diff_eq!(population_std_dev(&[3.5]).unwrap(), 0.0);
    }

    #[test]
    fn test_min_max() {
        let (min, max) = min_max(&[3.0, -1.0, 8.0, 2.0]).unwrap();
        assert_eq!(min, -1.0);
        assert_eq!(max, 8.0);
    }

    #[test]
    fn test_quantile_bounds() {
        let values: Vec<f64> = (1..=100).map(|v| v as f64).collect();

        let q95 = quantile(&values, 0.95).unwrap();
        assert!(q95 > 90.0 && q95 <= 100.0);
        assert_eq!(quantile(&values, 1.0).unwrap(), 100.0);
        assert!(quantile(&values, 1.5).is_err());
    }

    #[test]
    fn test_quantile_interpolates_between_neighbours() {
        let values: Vec<f64> = (1..=30).rev().map(|v| v as f64).collect();

        // Rank 29 * 0.95 = 27.55 falls between 28 and 29
        assert_abs_diff_eq!(quantile(&values, 0.95).unwrap(), 28.55, epsilon = 1e-9);
        assert_abs_diff_eq!(quantile(&values, 0.5).unwrap(), 15.5, epsilon = 1e-9);
        assert_eq!(quantile(&values, 0.0).unwrap(), 1.0);
        assert_eq!(quantile(&[4.0], 0.95).unwrap(), 4.0);
    }

    #[test]
    fn test_empty_and_non_finite_input() {
        assert_eq!(
            mean(&[]),
            Err(MathError::InsufficientData {
                needed: 1,
                available: 0
            })
        );
        assert!(matches!(
            min_max(&[1.0, f64::NAN]),
            Err(MathError::InvalidInput(_))
        ));
    }
}
