//! Regressor derivation from raw daily market and weather data
//!
//! Produces the history the additive models are trained on and the context
//! they carry forward: demand and price lags, a temperature/rain interaction,
//! a weekend flag and an extreme-weather flag.

use crate::data::{parse_date, HistoricalSeries, MarketHistory, Observation};
use crate::error::{ForecastError, Result};
use chrono::{Datelike, NaiveDate};
use grid_math::statistics::quantile;
use log::debug;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Longest lag used, in days. Rows before it have incomplete lags and are
/// dropped.
pub const MAX_LAG: usize = 7;

/// Quantile above which temperature or rainfall counts as extreme
pub const EXTREME_QUANTILE: f64 = 0.95;

/// One day of raw market and weather data
#[derive(Debug, Clone, PartialEq)]
pub struct RawDay {
    pub date: NaiveDate,
    pub demand: f64,
    pub rrp: f64,
    pub min_temperature: f64,
    pub max_temperature: f64,
    pub solar_exposure: f64,
    pub rainfall: f64,
}

#[derive(Debug, Deserialize)]
struct RawRow {
    date: String,
    demand: f64,
    #[serde(alias = "RRP")]
    rrp: f64,
    min_temperature: f64,
    max_temperature: f64,
    solar_exposure: f64,
    rainfall: f64,
}

/// Read raw days from a CSV source with a header row
pub fn read_raw_days<R: Read>(reader: R) -> Result<Vec<RawDay>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    rdr.deserialize::<RawRow>()
        .map(|row| {
            let row = row?;
            Ok(RawDay {
                date: parse_date(&row.date)?,
                demand: row.demand,
                rrp: row.rrp,
                min_temperature: row.min_temperature,
                max_temperature: row.max_temperature,
                solar_exposure: row.solar_exposure,
                rainfall: row.rainfall,
            })
        })
        .collect()
}

/// Read raw days from a CSV file
pub fn raw_days_from_csv<P: AsRef<Path>>(path: P) -> Result<Vec<RawDay>> {
    read_raw_days(File::open(path)?)
}

/// Derive the regressor columns and pair them with demand and price.
///
/// Lags are taken by row, so the input should hold consecutive days. The
/// extreme-weather thresholds are computed over every input row.
pub fn derive_regressors(days: &[RawDay]) -> Result<MarketHistory> {
    if days.len() <= MAX_LAG {
        return Err(ForecastError::InsufficientHistory(format!(
            "Deriving lag-{} regressors needs more than {} days, got {}",
            MAX_LAG,
            MAX_LAG,
            days.len()
        )));
    }

    let max_temps: Vec<f64> = days.iter().map(|d| d.max_temperature).collect();
    let rainfall: Vec<f64> = days.iter().map(|d| d.rainfall).collect();
    let hot = quantile(&max_temps, EXTREME_QUANTILE)?;
    let wet = quantile(&rainfall, EXTREME_QUANTILE)?;

    let mut demand = Vec::with_capacity(days.len() - MAX_LAG);
    let mut price = Vec::with_capacity(days.len() - MAX_LAG);

    for i in MAX_LAG..days.len() {
        let day = &days[i];
        let weekend = day.date.weekday().num_days_from_monday() >= 5;
        let extreme = day.max_temperature > hot || day.rainfall > wet;

        let exogenous: BTreeMap<String, f64> = [
            ("demand_lag_1", days[i - 1].demand),
            ("demand_lag_7", days[i - 7].demand),
            ("rrp_lag_1", days[i - 1].rrp),
            ("rrp_lag_7", days[i - 7].rrp),
            ("min_temperature", day.min_temperature),
            ("max_temperature", day.max_temperature),
            ("solar_exposure", day.solar_exposure),
            ("rainfall", day.rainfall),
            ("temp_rain_interaction", day.min_temperature * day.rainfall),
            ("is_weekend", if weekend { 1.0 } else { 0.0 }),
            ("extreme_weather", if extreme { 1.0 } else { 0.0 }),
        ]
        .into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect();

        demand.push(Observation {
            date: day.date,
            value: day.demand,
            exogenous: exogenous.clone(),
        });
        price.push(Observation {
            date: day.date,
            value: day.rrp,
            exogenous,
        });
    }

    debug!(
        "Derived regressors for {} days (hot > {:.2}, wet > {:.2})",
        demand.len(),
        hot,
        wet
    );

    MarketHistory::new(HistoricalSeries::new(demand)?, HistoricalSeries::new(price)?)
}
