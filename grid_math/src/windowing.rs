//! Fixed-length input windows for autoregressive models
//!
//! Window `i` of a series covers indices `[i, i + window_size)` and its
//! training target is the value at `i + window_size`.

use crate::{MathError, Result};
use serde::{Deserialize, Serialize};

/// A fixed-length, ordered slice of normalized values (oldest first).
///
/// Windows are immutable; [`FeatureWindow::advance`] returns the next window
/// instead of shifting in place, so the length never changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureWindow {
    values: Vec<f64>,
}

impl FeatureWindow {
    /// Create a window from values ordered oldest to newest
    pub fn new(values: Vec<f64>) -> Result<Self> {
        if values.is_empty() {
            return Err(MathError::InvalidWindow {
                window_size: 0,
                len: 0,
            });
        }
        if values.iter().any(|v| !v.is_finite()) {
            return Err(MathError::InvalidInput(
                "Window contains non-finite values".to_string(),
            ));
        }
        Ok(Self { values })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false; windows hold at least one value
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Newest value in the window
    pub fn newest(&self) -> f64 {
        self.values[self.values.len() - 1]
    }

    /// Oldest value in the window
    pub fn oldest(&self) -> f64 {
        self.values[0]
    }

    /// Drop the oldest value and append `next` as the newest one
    pub fn advance(&self, next: f64) -> FeatureWindow {
        let values = self.values[1..]
            .iter()
            .copied()
            .chain(std::iter::once(next))
            .collect();
        FeatureWindow { values }
    }
}

fn check_window_size(window_size: usize, len: usize) -> Result<()> {
    if window_size == 0 || window_size >= len {
        return Err(MathError::InvalidWindow { window_size, len });
    }
    Ok(())
}

/// Slice a series into `(window, target)` training pairs.
///
/// A series of length `N` yields `N - window_size` pairs. Fails when
/// `window_size` is zero or not smaller than `N`.
pub fn slice(series: &[f64], window_size: usize) -> Result<Vec<(FeatureWindow, f64)>> {
    check_window_size(window_size, series.len())?;

    series
        .windows(window_size + 1)
        .map(|chunk| {
            let window = FeatureWindow::new(chunk[..window_size].to_vec())?;
            Ok((window, chunk[window_size]))
        })
        .collect()
}

/// The most recent complete window ending strictly before `before_index`.
///
/// Used to seed recursive prediction: the window covers
/// `[before_index - window_size, before_index)`.
pub fn last_window(series: &[f64], window_size: usize, before_index: usize) -> Result<FeatureWindow> {
    if window_size == 0 {
        return Err(MathError::InvalidWindow {
            window_size,
            len: series.len(),
        });
    }
    if before_index > series.len() {
        return Err(MathError::InvalidInput(format!(
            "Index {} is past the end of a series of length {}",
            before_index,
            series.len()
        )));
    }
    if before_index < window_size {
        return Err(MathError::InsufficientData {
            needed: window_size,
            available: before_index,
        });
    }

    FeatureWindow::new(series[before_index - window_size..before_index].to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(n: usize) -> Vec<f64> {
        (0..n).map(|i| i as f64).collect()
    }

    #[test]
    fn test_slice_pair_count_and_targets() {
        let series = ramp(10);
        let pairs = slice(&series, 3).unwrap();

        assert_eq!(pairs.len(), 7);
        for (i, (window, target)) in pairs.iter().enumerate() {
            assert_eq!(window.as_slice(), &series[i..i + 3]);
            assert_eq!(*target, series[i + 3]);
        }
    }

    #[test]
    fn test_slice_rejects_oversized_window() {
        let series = ramp(5);

        assert_eq!(
            slice(&series, 5).unwrap_err(),
            MathError::InvalidWindow {
                window_size: 5,
                len: 5
            }
        );
        assert!(slice(&series, 8).is_err());
        assert!(slice(&series, 0).is_err());
    }

    #[test]
    fn test_slice_single_pair() {
        let pairs = slice(&[1.0, 2.0, 3.0], 2).unwrap();

        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].1, 3.0);
    }

    #[test]
    fn test_last_window_ends_before_index() {
        let series = ramp(35);
        let window = last_window(&series, 30, 30).unwrap();

        assert_eq!(window.len(), 30);
        assert_eq!(window.oldest(), 0.0);
        assert_eq!(window.newest(), 29.0);

        let later = last_window(&series, 30, 35).unwrap();
        assert_eq!(later.oldest(), 5.0);
        assert_eq!(later.newest(), 34.0);
    }

    #[test]
    fn test_last_window_needs_full_history() {
        let series = ramp(35);

        assert_eq!(
            last_window(&series, 30, 29).unwrap_err(),
            MathError::InsufficientData {
                needed: 30,
                available: 29
            }
        );
        assert!(matches!(
            last_window(&series, 30, 36),
            Err(MathError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_advance_keeps_length() {
        let window = FeatureWindow::new(vec![1.0, 2.0, 3.0]).unwrap();
        let next = window.advance(4.0);

        assert_eq!(next.as_slice(), &[2.0, 3.0, 4.0]);
        assert_eq!(next.len(), window.len());
        assert_eq!(window.as_slice(), &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_window_rejects_bad_values() {
        assert!(FeatureWindow::new(Vec::new()).is_err());
        assert!(FeatureWindow::new(vec![1.0, f64::INFINITY]).is_err());
    }
}
