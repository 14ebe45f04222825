//! Regressor context for future dates
//!
//! True regressor values are unknown at prediction time. The context for
//! every future date is the exogenous values of the most recent historical
//! observation, held flat for the whole request.

use crate::config::ForecastConfig;
use crate::data::{daily_range, HistoricalSeries};
use crate::error::{ForecastError, Result};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Fixed, validated set of regressor names
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct RegressorSet {
    names: BTreeSet<String>,
}

impl RegressorSet {
    /// Build a set, rejecting empty or duplicate names
    pub fn new<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = BTreeSet::new();
        for name in names {
            let name = name.into();
            if name.trim().is_empty() {
                return Err(ForecastError::DataError(
                    "Regressor names must not be empty".to_string(),
                ));
            }
            if !set.insert(name.clone()) {
                return Err(ForecastError::DataError(format!(
                    "Duplicate regressor '{}'",
                    name
                )));
            }
        }
        Ok(Self { names: set })
    }

    pub fn from_config(config: &ForecastConfig) -> Result<Self> {
        Self::new(config.regressors.iter().cloned())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

/// Last known value of every regressor in a [`RegressorSet`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegressorSnapshot {
    values: BTreeMap<String, f64>,
}

impl RegressorSnapshot {
    /// Build a snapshot holding exactly the names of `set`
    pub fn new(set: &RegressorSet, values: BTreeMap<String, f64>) -> Result<Self> {
        if let Some(unknown) = values.keys().find(|name| !set.contains(name)) {
            return Err(ForecastError::UnknownRegressor(unknown.clone()));
        }
        if let Some(missing) = set.iter().find(|name| !values.contains_key(*name)) {
            return Err(ForecastError::MissingRegressor(missing.to_string()));
        }
        if let Some((name, _)) = values.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ForecastError::DataError(format!(
                "Regressor '{}' is not finite",
                name
            )));
        }
        Ok(Self { values })
    }

    /// Value of one regressor
    pub fn get(&self, name: &str) -> Result<f64> {
        self.values
            .get(name)
            .copied()
            .ok_or_else(|| ForecastError::UnknownRegressor(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Name/value pairs in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

/// Carry the exogenous values of the latest observation forward.
///
/// Only the names in `set` are taken; other exogenous columns are ignored.
pub fn snapshot(history: &HistoricalSeries, set: &RegressorSet) -> Result<RegressorSnapshot> {
    let last = history.last().ok_or_else(|| {
        ForecastError::InsufficientHistory(
            "Cannot carry regressors forward from an empty history".to_string(),
        )
    })?;

    let mut values = BTreeMap::new();
    for name in set.iter() {
        let value = last
            .exogenous
            .get(name)
            .copied()
            .ok_or_else(|| ForecastError::MissingRegressor(format!("{} (on {})", name, last.date)))?;
        values.insert(name.to_string(), value);
    }

    RegressorSnapshot::new(set, values)
}

/// Future dates sharing one regressor snapshot, the batch input of an
/// additive model
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FutureFrame {
    dates: Vec<NaiveDate>,
    regressors: RegressorSnapshot,
}

impl FutureFrame {
    /// One row per day in `[start, end]`
    pub fn daily(start: NaiveDate, end: NaiveDate, regressors: RegressorSnapshot) -> Result<Self> {
        Ok(Self {
            dates: daily_range(start, end)?,
            regressors,
        })
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn regressors(&self) -> &RegressorSnapshot {
        &self.regressors
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Regressor context of a date in the frame
    pub fn context_for(&self, date: NaiveDate) -> Option<&RegressorSnapshot> {
        self.dates
            .binary_search(&date)
            .ok()
            .map(|_| &self.regressors)
    }

    /// `(date, regressors)` rows in date order
    pub fn rows(&self) -> impl Iterator<Item = (NaiveDate, &RegressorSnapshot)> {
        self.dates.iter().map(move |&date| (date, &self.regressors))
    }
}
