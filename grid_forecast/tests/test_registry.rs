use grid_forecast::models::moving_average::WindowMean;
use grid_forecast::registry::{
    ADDITIVE_DEMAND_FILE, ADDITIVE_PRICE_FILE, SEQUENCE_DEMAND_FILE, SEQUENCE_PRICE_FILE,
};
use grid_forecast::{
    AdditiveModel, ForecastConfig, ForecastError, ForecastOrchestrator, ModelRegistry,
    SequenceModel,
};
use std::fs;
use std::sync::Arc;
use tempfile::tempdir;

const SEQUENCE_ARTIFACT: &str = r#"{"name": "ar", "weights": [0.5, 0.5]}"#;
const ADDITIVE_ARTIFACT: &str = r#"{"name": "additive", "origin": "2024-01-01"}"#;

#[test]
fn test_load_dir_with_both_strategies() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join(SEQUENCE_DEMAND_FILE), SEQUENCE_ARTIFACT).unwrap();
    fs::write(dir.path().join(SEQUENCE_PRICE_FILE), SEQUENCE_ARTIFACT).unwrap();
    fs::write(dir.path().join(ADDITIVE_DEMAND_FILE), ADDITIVE_ARTIFACT).unwrap();
    fs::write(dir.path().join(ADDITIVE_PRICE_FILE), ADDITIVE_ARTIFACT).unwrap();

    let registry = ModelRegistry::load_dir(dir.path()).unwrap();

    assert_eq!(registry.sequence().unwrap().demand.window_size(), 2);
    assert_eq!(registry.additive().unwrap().price.name(), "additive");
}

#[test]
fn test_load_dir_needs_complete_pairs() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join(SEQUENCE_DEMAND_FILE), SEQUENCE_ARTIFACT).unwrap();
    fs::write(dir.path().join(SEQUENCE_PRICE_FILE), SEQUENCE_ARTIFACT).unwrap();
    fs::write(dir.path().join(ADDITIVE_DEMAND_FILE), ADDITIVE_ARTIFACT).unwrap();

    let registry = ModelRegistry::load_dir(dir.path()).unwrap();

    assert!(registry.sequence().is_ok());
    assert!(matches!(
        registry.additive(),
        Err(ForecastError::ModelNotLoaded(_))
    ));
}

#[test]
fn test_load_dir_without_artifacts() {
    let dir = tempdir().unwrap();

    assert!(matches!(
        ModelRegistry::load_dir(dir.path()),
        Err(ForecastError::ModelNotLoaded(_))
    ));
}

#[test]
fn test_load_dir_with_corrupt_artifact() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join(SEQUENCE_DEMAND_FILE), "not json").unwrap();
    fs::write(dir.path().join(SEQUENCE_PRICE_FILE), SEQUENCE_ARTIFACT).unwrap();

    assert!(matches!(
        ModelRegistry::load_dir(dir.path()),
        Err(ForecastError::ModelError(_))
    ));
}

// The global registry is process-wide, so its whole lifecycle is checked in
// a single test
#[test]
fn test_global_registry_lifecycle() {
    assert!(matches!(
        ModelRegistry::global(),
        Err(ForecastError::ModelNotLoaded(_))
    ));
    assert!(ForecastOrchestrator::from_global(ForecastConfig::default()).is_err());

    let model = Arc::new(WindowMean::new(30).unwrap());
    let installed = ModelRegistry::new()
        .with_sequence(model.clone(), model)
        .install()
        .unwrap();
    assert!(installed.sequence().is_ok());

    assert!(ModelRegistry::global().unwrap().sequence().is_ok());
    assert!(ForecastOrchestrator::from_global(ForecastConfig::default()).is_ok());

    let again = ModelRegistry::new().install();
    assert!(matches!(again, Err(ForecastError::ConfigError(_))));
}
