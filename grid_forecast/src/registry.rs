//! Trained models shared by every forecast request
//!
//! A registry is built once at startup, optionally installed as the
//! process-wide instance, and only read afterwards. Models sit behind `Arc`
//! so orchestrators can hold cheap clones.

use crate::error::{ForecastError, Result};
use crate::models::linear::{LinearAdditiveModel, LinearSequenceModel};
use crate::models::{AdditiveModel, SequenceModel};
use log::{debug, info};
use std::path::Path;
use std::sync::{Arc, OnceLock};

/// Artifact file names looked up by [`ModelRegistry::load_dir`]
pub const ADDITIVE_DEMAND_FILE: &str = "additive_demand.json";
pub const ADDITIVE_PRICE_FILE: &str = "additive_price.json";
pub const SEQUENCE_DEMAND_FILE: &str = "sequence_demand.json";
pub const SEQUENCE_PRICE_FILE: &str = "sequence_price.json";

static GLOBAL: OnceLock<ModelRegistry> = OnceLock::new();

/// Demand and price models of the additive strategy
#[derive(Debug, Clone)]
pub struct AdditiveModels {
    pub demand: Arc<dyn AdditiveModel>,
    pub price: Arc<dyn AdditiveModel>,
}

/// Demand and price models of the autoregressive strategy
#[derive(Debug, Clone)]
pub struct SequenceModels {
    pub demand: Arc<dyn SequenceModel>,
    pub price: Arc<dyn SequenceModel>,
}

#[derive(Debug, Clone, Default)]
pub struct ModelRegistry {
    additive: Option<AdditiveModels>,
    sequence: Option<SequenceModels>,
}

impl ModelRegistry {
    /// An empty registry
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_additive(
        mut self,
        demand: Arc<dyn AdditiveModel>,
        price: Arc<dyn AdditiveModel>,
    ) -> Self {
        self.additive = Some(AdditiveModels { demand, price });
        self
    }

    pub fn with_sequence(
        mut self,
        demand: Arc<dyn SequenceModel>,
        price: Arc<dyn SequenceModel>,
    ) -> Self {
        self.sequence = Some(SequenceModels { demand, price });
        self
    }

    /// Load whichever model pairs have artifacts in `dir`.
    ///
    /// A strategy is registered only when both its demand and price
    /// artifacts exist. Fails when neither strategy can be registered.
    pub fn load_dir<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        let mut registry = Self::new();

        let (demand, price) = (dir.join(ADDITIVE_DEMAND_FILE), dir.join(ADDITIVE_PRICE_FILE));
        if demand.is_file() && price.is_file() {
            registry = registry.with_additive(
                Arc::new(LinearAdditiveModel::from_json_file(&demand)?),
                Arc::new(LinearAdditiveModel::from_json_file(&price)?),
            );
            debug!("Loaded additive models from {}", dir.display());
        }

        let (demand, price) = (dir.join(SEQUENCE_DEMAND_FILE), dir.join(SEQUENCE_PRICE_FILE));
        if demand.is_file() && price.is_file() {
            registry = registry.with_sequence(
                Arc::new(LinearSequenceModel::from_json_file(&demand)?),
                Arc::new(LinearSequenceModel::from_json_file(&price)?),
            );
            debug!("Loaded sequence models from {}", dir.display());
        }

        if registry.additive.is_none() && registry.sequence.is_none() {
            return Err(ForecastError::ModelNotLoaded(format!(
                "No complete model pair found in {}",
                dir.display()
            )));
        }

        Ok(registry)
    }

    pub fn additive(&self) -> Result<&AdditiveModels> {
        self.additive.as_ref().ok_or_else(|| {
            ForecastError::ModelNotLoaded("additive demand/price models".to_string())
        })
    }

    pub fn sequence(&self) -> Result<&SequenceModels> {
        self.sequence.as_ref().ok_or_else(|| {
            ForecastError::ModelNotLoaded("sequence demand/price models".to_string())
        })
    }

    /// Install this registry as the process-wide instance.
    ///
    /// Can succeed only once per process; the instance lives until exit.
    pub fn install(self) -> Result<&'static ModelRegistry> {
        GLOBAL
            .set(self)
            .map_err(|_| ForecastError::ConfigError("Model registry already installed".to_string()))?;
        info!("Model registry installed");
        GLOBAL
            .get()
            .ok_or_else(|| ForecastError::ModelNotLoaded("model registry".to_string()))
    }

    /// The process-wide registry
    pub fn global() -> Result<&'static ModelRegistry> {
        GLOBAL
            .get()
            .ok_or_else(|| ForecastError::ModelNotLoaded("model registry".to_string()))
    }
}
