use approx::assert_abs_diff_eq;
use chrono::NaiveDate;
use grid_forecast::models::linear::{LinearAdditiveModel, LinearSequenceModel};
use grid_forecast::models::moving_average::{WindowEma, WindowMean};
use grid_forecast::{AdditiveModel, ForecastError, FutureFrame, RegressorSet, RegressorSnapshot, SequenceModel};
use grid_math::FeatureWindow;
use std::collections::BTreeMap;
use std::io::Write;
use tempfile::NamedTempFile;

fn window(values: &[f64]) -> FeatureWindow {
    FeatureWindow::new(values.to_vec()).unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn rainfall_snapshot(value: f64) -> RegressorSnapshot {
    let set = RegressorSet::new(["rainfall"]).unwrap();
    let mut values = BTreeMap::new();
    values.insert("rainfall".to_string(), value);
    RegressorSnapshot::new(&set, values).unwrap()
}

#[test]
fn test_window_mean() {
    let model = WindowMean::new(4).unwrap();

    assert_eq!(model.window_size(), 4);
    assert_abs_diff_eq!(model.predict(&window(&[1.0, 2.0, 3.0, 6.0])).unwrap(), 3.0);
    assert!(matches!(
        model.predict(&window(&[1.0, 2.0])),
        Err(ForecastError::InvalidWindow(_))
    ));
    assert!(WindowMean::new(0).is_err());
}

#[test]
fn test_window_ema() {
    let model = WindowEma::new(3, 0.5).unwrap();

    // 1.0 -> 0.5 * 3 + 0.5 * 1 = 2.0 -> 0.5 * 5 + 0.5 * 2 = 3.5
    assert_abs_diff_eq!(model.predict(&window(&[1.0, 3.0, 5.0])).unwrap(), 3.5);
    assert!(model.name().contains("alpha=0.5"));
}

#[test]
fn test_window_ema_parameter_validation() {
    assert!(matches!(
        WindowEma::new(3, 0.0),
        Err(ForecastError::ConfigError(_))
    ));
    assert!(WindowEma::new(3, 1.0).is_err());
    assert!(WindowEma::new(0, 0.5).is_err());
}

#[test]
fn test_linear_sequence_model() {
    let model = LinearSequenceModel::new("linear", vec![0.2, 0.3, 0.5], 0.1).unwrap();

    assert_eq!(model.window_size(), 3);
    assert_abs_diff_eq!(
        model.predict(&window(&[1.0, 1.0, 2.0])).unwrap(),
        0.1 + 0.2 + 0.3 + 1.0,
        epsilon = 1e-12
    );
    assert!(model.predict(&window(&[1.0])).is_err());
}

#[test]
fn test_linear_sequence_model_rejects_bad_parameters() {
    assert!(LinearSequenceModel::new("empty", Vec::new(), 0.0).is_err());
    assert!(LinearSequenceModel::new("nan", vec![f64::NAN], 0.0).is_err());
}

#[test]
fn test_linear_additive_components() {
    // 2024-01-01 is a Monday
    let model = LinearAdditiveModel::new("additive", date(2024, 1, 1))
        .with_intercept(1.0)
        .with_trend(0.5)
        .with_weekday_effects([0.0, 0.0, 0.0, 0.0, 0.0, 10.0, 10.0])
        .with_regressor("rainfall", 2.0);

    let frame = FutureFrame::daily(date(2024, 1, 5), date(2024, 1, 6), rainfall_snapshot(3.0)).unwrap();
    let predictions = model.predict(&frame).unwrap();

    // Friday: 1 + 0.5 * 4 + 0 + 2 * 3
    assert_abs_diff_eq!(predictions[0], 9.0);
    // Saturday: 1 + 0.5 * 5 + 10 + 2 * 3
    assert_abs_diff_eq!(predictions[1], 19.5);
}

#[test]
fn test_linear_additive_unknown_coefficient() {
    let model = LinearAdditiveModel::new("additive", date(2024, 1, 1)).with_regressor("humidity", 1.0);
    let frame = FutureFrame::daily(date(2024, 1, 2), date(2024, 1, 2), rainfall_snapshot(3.0)).unwrap();

    assert!(matches!(
        model.predict(&frame),
        Err(ForecastError::UnknownRegressor(_))
    ));
}

#[test]
fn test_artifacts_from_json() {
    let mut sequence = NamedTempFile::new().unwrap();
    write!(sequence, r#"{{"name": "demand_ar", "weights": [0.0, 1.0]}}"#).unwrap();
    let model = LinearSequenceModel::from_json_file(sequence.path()).unwrap();
    assert_eq!(model.name(), "demand_ar");
    assert_abs_diff_eq!(model.predict(&window(&[4.0, 7.0])).unwrap(), 7.0);

    let mut additive = NamedTempFile::new().unwrap();
    write!(
        additive,
        r#"{{"name": "demand_additive", "origin": "2024-01-01", "intercept": 2.5}}"#
    )
    .unwrap();
    let model = LinearAdditiveModel::from_json_file(additive.path()).unwrap();
    assert_eq!(model.weekday_effects, [0.0; 7]);
    assert!(model.regressor_coefficients.is_empty());

    let mut broken = NamedTempFile::new().unwrap();
    write!(broken, r#"{{"name": "broken"}}"#).unwrap();
    assert!(matches!(
        LinearSequenceModel::from_json_file(broken.path()),
        Err(ForecastError::ModelError(_))
    ));
}
