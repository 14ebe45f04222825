//! # Gridcast
//!
//! `gridcast_workspace` bundles the workspace crates behind one import:
//!
//! - [`math`]: scalers, windows and summary statistics (`grid_math`)
//! - [`forecast`]: data loading, models and the forecast orchestrator
//!   (`grid_forecast`)
//!
//! ## Example
//!
//! ```
//! use gridcast_workspace::forecast::{FnModel, ForecastConfig, ForecastOrchestrator};
//! use gridcast_workspace::forecast::{HistoricalSeries, MarketHistory, ModelRegistry, Strategy};
//! use gridcast_workspace::math::FeatureWindow;
//! use std::sync::Arc;
//!
//! let start = chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! let values: Vec<f64> = (0..40).map(|i| 100.0 + i as f64).collect();
//! let series = HistoricalSeries::from_values(start, &values).unwrap();
//! let history = MarketHistory::new(series.clone(), series).unwrap();
//!
//! let flat = Arc::new(FnModel::new("flat", 30, |w: &FeatureWindow| w.newest()));
//! let models = ModelRegistry::new().with_sequence(flat.clone(), flat);
//! let orchestrator = ForecastOrchestrator::new(ForecastConfig::default(), models).unwrap();
//!
//! let from = start + chrono::Duration::days(35);
//! let to = from + chrono::Duration::days(3);
//! let result = orchestrator.run(&history, from, to, Strategy::Autoregressive).unwrap();
//! assert_eq!(result.len(), 3);
//! ```

pub use grid_forecast as forecast;
pub use grid_math as math;
