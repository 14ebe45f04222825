//! Forecast output: per-quantity points and the merged table returned to
//! callers

use crate::error::{ForecastError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Physical quantity being forecast
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quantity {
    Demand,
    Price,
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quantity::Demand => write!(f, "demand"),
            Quantity::Price => write!(f, "price"),
        }
    }
}

/// One predicted value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub date: NaiveDate,
    pub predicted_value: f64,
}

/// Ordered forecast of one quantity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuantityForecast {
    quantity: Quantity,
    points: Vec<ForecastPoint>,
}

impl QuantityForecast {
    /// Pair dates with predicted values; both must have the same length
    pub fn new(quantity: Quantity, dates: &[NaiveDate], values: &[f64]) -> Result<Self> {
        if dates.len() != values.len() {
            return Err(ForecastError::ModelError(format!(
                "{} forecast has {} values for {} dates",
                quantity,
                values.len(),
                dates.len()
            )));
        }
        if let Some(pos) = values.iter().position(|v| !v.is_finite()) {
            return Err(ForecastError::ModelError(format!(
                "{} forecast for {} is not finite",
                quantity, dates[pos]
            )));
        }

        let points = dates
            .iter()
            .zip(values)
            .map(|(&date, &predicted_value)| ForecastPoint {
                date,
                predicted_value,
            })
            .collect();

        Ok(Self { quantity, points })
    }

    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    pub fn points(&self) -> &[ForecastPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.predicted_value).collect()
    }
}

/// One row of the output table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastRecord {
    pub date: NaiveDate,
    pub demand_forecast: f64,
    pub price_forecast: f64,
}

/// Demand and price forecasts merged on date
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ForecastResult {
    records: Vec<ForecastRecord>,
}

impl ForecastResult {
    /// Merge two quantity forecasts covering the same dates
    pub fn merge(demand: QuantityForecast, price: QuantityForecast) -> Result<Self> {
        if demand.len() != price.len() {
            return Err(ForecastError::DataError(format!(
                "Cannot merge {} demand points with {} price points",
                demand.len(),
                price.len()
            )));
        }

        let records = demand
            .points()
            .iter()
            .zip(price.points())
            .map(|(d, p)| {
                if d.date != p.date {
                    return Err(ForecastError::DataError(format!(
                        "Demand point {} does not match price point {}",
                        d.date, p.date
                    )));
                }
                Ok(ForecastRecord {
                    date: d.date,
                    demand_forecast: d.predicted_value,
                    price_forecast: p.predicted_value,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { records })
    }

    pub fn records(&self) -> &[ForecastRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.records.iter().map(|r| r.date).collect()
    }

    pub fn demand_values(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.demand_forecast).collect()
    }

    pub fn price_values(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.price_forecast).collect()
    }

    /// JSON array of `{date, demand_forecast, price_forecast}` records
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.records)?)
    }
}

/// Error object returned by the serving layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl From<&ForecastError> for ErrorBody {
    fn from(err: &ForecastError) -> Self {
        Self {
            error: err.to_string(),
        }
    }
}
