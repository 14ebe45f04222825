//! # Grid Forecast
//!
//! Forecast daily electricity demand and price from historical data.
//!
//! ## Strategies
//!
//! - **Additive**: a trend + seasonality model with exogenous regressors.
//!   Regressors for future days are carried forward flat from the last
//!   observation, and every day is predicted in one batch.
//! - **Autoregressive**: a windowed sequence model. The newest window of
//!   history seeds the model and each prediction is fed back as input to
//!   the next step.
//!
//! Both strategies scale values around the model call (standardization for
//! additive models, min-max for sequence models) and return a table of
//! `{date, demand_forecast, price_forecast}` records.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chrono::NaiveDate;
//! use grid_forecast::models::moving_average::WindowMean;
//! use grid_forecast::{
//!     CsvLayout, DataLoader, ForecastConfig, ForecastOrchestrator, ModelRegistry, Strategy,
//! };
//! use std::sync::Arc;
//!
//! # fn main() -> grid_forecast::error::Result<()> {
//! let history = DataLoader::from_csv("market.csv", &CsvLayout::default())?;
//!
//! let models = ModelRegistry::new().with_sequence(
//!     Arc::new(WindowMean::new(30)?),
//!     Arc::new(WindowMean::new(30)?),
//! );
//! let orchestrator = ForecastOrchestrator::new(ForecastConfig::default(), models)?;
//!
//! let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
//! let end = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();
//! let result = orchestrator.run(&history, start, end, Strategy::Autoregressive)?;
//! println!("{}", result.to_json()?);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod data;
pub mod error;
pub mod evaluation;
pub mod features;
pub mod metrics;
pub mod models;
pub mod orchestrator;
pub mod recursive;
pub mod registry;
pub mod regressors;
pub mod result;

// Re-export commonly used types
pub use crate::config::ForecastConfig;
pub use crate::data::{CsvLayout, DataLoader, HistoricalSeries, MarketHistory, Observation};
pub use crate::error::ForecastError;
pub use crate::models::{AdditiveModel, FnModel, SequenceModel};
pub use crate::orchestrator::{ForecastOrchestrator, Strategy};
pub use crate::recursive::RecursivePredictor;
pub use crate::registry::ModelRegistry;
pub use crate::regressors::{FutureFrame, RegressorSet, RegressorSnapshot};
pub use crate::result::{ErrorBody, ForecastPoint, ForecastRecord, ForecastResult, Quantity};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
