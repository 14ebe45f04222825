//! Daily historical series and CSV loading

use crate::error::{ForecastError, Result};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Accepted date formats, ISO first, then day-first variants
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y"];
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Cell contents read as a missing value
const MISSING_TOKENS: [&str; 11] = [
    "NA", "N/A", "n/a", "#N/A", "<NA>", "NaN", "nan", "-NaN", "NULL", "null", "None",
];

/// One daily observation of a quantity together with its exogenous context
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub date: NaiveDate,
    pub value: f64,
    #[serde(default)]
    pub exogenous: BTreeMap<String, f64>,
}

impl Observation {
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self {
            date,
            value,
            exogenous: BTreeMap::new(),
        }
    }

    /// Attach an exogenous value
    pub fn with_exogenous(mut self, name: impl Into<String>, value: f64) -> Self {
        self.exogenous.insert(name.into(), value);
        self
    }
}

/// Immutable, date-ordered observations of one quantity.
///
/// Dates are strictly increasing. Missing days are not detected here; the
/// windowing logic assumes one observation per calendar day.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HistoricalSeries {
    observations: Vec<Observation>,
}

impl HistoricalSeries {
    /// Create a series, validating ordering and values
    pub fn new(observations: Vec<Observation>) -> Result<Self> {
        for pair in observations.windows(2) {
            if pair[1].date <= pair[0].date {
                return Err(ForecastError::DataError(format!(
                    "Dates must be strictly increasing: {} follows {}",
                    pair[1].date, pair[0].date
                )));
            }
        }
        if let Some(bad) = observations.iter().find(|o| !o.value.is_finite()) {
            return Err(ForecastError::DataError(format!(
                "Non-finite value on {}",
                bad.date
            )));
        }

        Ok(Self { observations })
    }

    /// Create a series of consecutive days starting at `start`
    pub fn from_values(start: NaiveDate, values: &[f64]) -> Result<Self> {
        let observations = values
            .iter()
            .enumerate()
            .map(|(i, &value)| Observation::new(start + Duration::days(i as i64), value))
            .collect();
        Self::new(observations)
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn first(&self) -> Option<&Observation> {
        self.observations.first()
    }

    pub fn last(&self) -> Option<&Observation> {
        self.observations.last()
    }

    /// Observed values in date order
    pub fn values(&self) -> Vec<f64> {
        self.observations.iter().map(|o| o.value).collect()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.observations.iter().map(|o| o.date).collect()
    }

    /// Number of observations dated strictly before `date`
    pub fn count_before(&self, date: NaiveDate) -> usize {
        self.observations.partition_point(|o| o.date < date)
    }
}

/// Demand and price histories sharing the same dates
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketHistory {
    demand: HistoricalSeries,
    price: HistoricalSeries,
}

impl MarketHistory {
    /// Pair two histories, rejecting mismatched dates
    pub fn new(demand: HistoricalSeries, price: HistoricalSeries) -> Result<Self> {
        if demand.len() != price.len() {
            return Err(ForecastError::DataError(format!(
                "Demand has {} observations but price has {}",
                demand.len(),
                price.len()
            )));
        }
        let misaligned = demand
            .observations()
            .iter()
            .zip(price.observations())
            .find(|(d, p)| d.date != p.date);
        if let Some((d, p)) = misaligned {
            return Err(ForecastError::DataError(format!(
                "Demand date {} does not match price date {}",
                d.date, p.date
            )));
        }

        Ok(Self { demand, price })
    }

    pub fn demand(&self) -> &HistoricalSeries {
        &self.demand
    }

    pub fn price(&self) -> &HistoricalSeries {
        &self.price
    }

    pub fn len(&self) -> usize {
        self.demand.len()
    }

    pub fn is_empty(&self) -> bool {
        self.demand.is_empty()
    }
}

/// Column names of a market CSV file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsvLayout {
    pub date_column: String,
    pub demand_column: String,
    pub price_column: String,
}

impl CsvLayout {
    pub fn new(demand_column: impl Into<String>, price_column: impl Into<String>) -> Self {
        Self {
            date_column: "date".to_string(),
            demand_column: demand_column.into(),
            price_column: price_column.into(),
        }
    }
}

impl Default for CsvLayout {
    fn default() -> Self {
        Self::new("demand", "rrp")
    }
}

/// Data loader for market histories
#[derive(Debug)]
pub struct DataLoader;

impl DataLoader {
    /// Load a market history from a CSV file
    pub fn from_csv<P: AsRef<Path>>(path: P, layout: &CsvLayout) -> Result<MarketHistory> {
        let file = File::open(path.as_ref())?;
        let history = Self::from_reader(file, layout)?;
        debug!(
            "Loaded {} daily observations from {}",
            history.len(),
            path.as_ref().display()
        );
        Ok(history)
    }

    /// Load a market history from any CSV source.
    ///
    /// Rows with a missing demand or price value (an empty cell, an NA token
    /// or NaN) are dropped. Every other column holding a finite number
    /// becomes an exogenous value of that day.
    pub fn from_reader<R: Read>(reader: R, layout: &CsvLayout) -> Result<MarketHistory> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = rdr.headers()?.clone();
        let date_idx = Self::column_index(&headers, &layout.date_column)?;
        let demand_idx = Self::column_index(&headers, &layout.demand_column)?;
        let price_idx = Self::column_index(&headers, &layout.price_column)?;

        let mut demand = Vec::new();
        let mut price = Vec::new();

        for (line, record) in rdr.records().enumerate() {
            let record = record?;
            let targets = (
                target_value(record.get(demand_idx))?,
                target_value(record.get(price_idx))?,
            );
            let (demand_value, price_value) = match targets {
                (Some(d), Some(p)) => (d, p),
                _ => {
                    trace!("Skipping row {} with missing target values", line + 2);
                    continue;
                }
            };

            let date = parse_date(record.get(date_idx).unwrap_or(""))?;

            let mut exogenous = BTreeMap::new();
            for (idx, cell) in record.iter().enumerate() {
                if idx == date_idx || idx == demand_idx || idx == price_idx {
                    continue;
                }
                match (headers.get(idx), cell.parse::<f64>()) {
                    (Some(name), Ok(value)) if value.is_finite() => {
                        exogenous.insert(name.to_string(), value);
                    }
                    _ => {}
                }
            }

            demand.push(Observation {
                date,
                value: demand_value,
                exogenous: exogenous.clone(),
            });
            price.push(Observation {
                date,
                value: price_value,
                exogenous,
            });
        }

        MarketHistory::new(HistoricalSeries::new(demand)?, HistoricalSeries::new(price)?)
    }

    fn column_index(headers: &csv::StringRecord, name: &str) -> Result<usize> {
        headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
            .ok_or_else(|| ForecastError::DataError(format!("Column '{}' not found", name)))
    }
}

/// Parse a target cell, `None` when the value is missing
fn target_value(cell: Option<&str>) -> Result<Option<f64>> {
    let cell = cell.unwrap_or("");
    if cell.is_empty() || MISSING_TOKENS.contains(&cell) {
        return Ok(None);
    }
    let value: f64 = cell.parse()?;
    Ok(if value.is_nan() { None } else { Some(value) })
}

/// Every calendar day in `[start, end]`, inclusive
pub fn daily_range(start: NaiveDate, end: NaiveDate) -> Result<Vec<NaiveDate>> {
    if end < start {
        return Err(ForecastError::InvalidRange { start, end });
    }
    Ok(start.iter_days().take_while(|d| *d <= end).collect())
}

/// Parse a calendar date in ISO or day-first form
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    let input = input.trim();
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(input, format) {
            return Ok(date);
        }
    }
    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(input, format) {
            return Ok(datetime.date());
        }
    }
    Err(ForecastError::ParseError(format!(
        "Unrecognized date '{}'",
        input
    )))
}
