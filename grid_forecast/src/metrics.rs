//! Metrics for evaluating and summarizing forecasts

use crate::error::{ForecastError, Result};
use crate::result::ForecastResult;
use chrono::NaiveDate;
use serde::Serialize;

/// Error of one-step predictions against the values they target
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastAccuracy {
    pub mae: f64,
    pub mse: f64,
    pub rmse: f64,
    /// Mean of `forecast - actual`; positive when the model overshoots
    pub bias: f64,
    /// Percentage error over the non-zero actuals, `None` if every actual is zero
    pub mape: Option<f64>,
    /// Symmetric percentage error; pairs where both values are zero count as 0
    pub smape: f64,
}

#[derive(Default)]
struct ErrorSums {
    absolute: f64,
    squared: f64,
    signed: f64,
    percentage: f64,
    percentage_count: usize,
    symmetric: f64,
}

impl ErrorSums {
    fn add(mut self, forecast: f64, actual: f64) -> Self {
        let error = forecast - actual;
        self.absolute += error.abs();
        self.squared += error * error;
        self.signed += error;
        if actual != 0.0 {
            self.percentage += 100.0 * error.abs() / actual.abs();
            self.percentage_count += 1;
        }
        let magnitude = forecast.abs() + actual.abs();
        if magnitude > 0.0 {
            self.symmetric += 200.0 * error.abs() / magnitude;
        }
        self
    }
}

/// Score `forecast` against `actual`, pairwise
pub fn forecast_accuracy(forecast: &[f64], actual: &[f64]) -> Result<ForecastAccuracy> {
    if forecast.is_empty() || forecast.len() != actual.len() {
        return Err(ForecastError::DataError(format!(
            "Cannot score {} predictions against {} actual values",
            forecast.len(),
            actual.len()
        )));
    }

    let n = forecast.len() as f64;
    let sums = forecast
        .iter()
        .zip(actual)
        .fold(ErrorSums::default(), |sums, (&f, &a)| sums.add(f, a));

    let mse = sums.squared / n;
    Ok(ForecastAccuracy {
        mae: sums.absolute / n,
        mse,
        rmse: mse.sqrt(),
        bias: sums.signed / n,
        mape: (sums.percentage_count > 0)
            .then(|| sums.percentage / sums.percentage_count as f64),
        smape: sums.symmetric / n,
    })
}

impl std::fmt::Display for ForecastAccuracy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "MAE {:.4} | RMSE {:.4} | bias {:+.4} | sMAPE {:.2}%",
            self.mae, self.rmse, self.bias, self.smape
        )?;
        match self.mape {
            Some(mape) => write!(f, " | MAPE {:.2}%", mape),
            None => write!(f, " | MAPE n/a"),
        }
    }
}

/// A value and the day it is expected on
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DatedValue {
    pub date: NaiveDate,
    pub value: f64,
}

/// Headline figures of a forecast
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastSummary {
    pub peak_demand: DatedValue,
    pub total_demand: f64,
    pub peak_price: DatedValue,
    /// Lowest strictly positive price, if any
    pub lowest_price: Option<DatedValue>,
    pub average_price: f64,
}

impl ForecastSummary {
    pub fn from_result(result: &ForecastResult) -> Result<Self> {
        let records = result.records();
        let first = records.first().ok_or_else(|| {
            ForecastError::DataError("Cannot summarize an empty forecast".to_string())
        })?;

        let mut peak_demand = DatedValue {
            date: first.date,
            value: first.demand_forecast,
        };
        let mut peak_price = DatedValue {
            date: first.date,
            value: first.price_forecast,
        };
        let mut lowest_price: Option<DatedValue> = None;
        let mut total_demand = 0.0;
        let mut total_price = 0.0;

        for record in records {
            if record.demand_forecast > peak_demand.value {
                peak_demand = DatedValue {
                    date: record.date,
                    value: record.demand_forecast,
                };
            }
            if record.price_forecast > peak_price.value {
                peak_price = DatedValue {
                    date: record.date,
                    value: record.price_forecast,
                };
            }
            // Non-positive prices are excluded from the low
            let is_new_low = lowest_price.map_or(true, |low| record.price_forecast < low.value);
            if record.price_forecast > 0.0 && is_new_low {
                lowest_price = Some(DatedValue {
                    date: record.date,
                    value: record.price_forecast,
                });
            }
            total_demand += record.demand_forecast;
            total_price += record.price_forecast;
        }

        Ok(Self {
            peak_demand,
            total_demand,
            peak_price,
            lowest_price,
            average_price: total_price / records.len() as f64,
        })
    }
}

impl std::fmt::Display for ForecastSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Forecast Summary:")?;
        writeln!(
            f,
            "  Peak demand:   {:.2} on {}",
            self.peak_demand.value, self.peak_demand.date
        )?;
        writeln!(f, "  Total demand:  {:.2}", self.total_demand)?;
        writeln!(
            f,
            "  Peak price:    {:.2} on {}",
            self.peak_price.value, self.peak_price.date
        )?;
        match self.lowest_price {
            Some(low) => writeln!(f, "  Lowest price:  {:.2} on {}", low.value, low.date)?,
            None => writeln!(f, "  Lowest price:  n/a")?,
        }
        writeln!(f, "  Average price: {:.2}", self.average_price)?;
        Ok(())
    }
}
