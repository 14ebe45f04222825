use chrono::Duration;
use grid_forecast::evaluation::evaluate_holdout;
use grid_forecast::features::{derive_regressors, raw_days_from_csv};
use grid_forecast::models::linear::LinearAdditiveModel;
use grid_forecast::models::moving_average::WindowMean;
use grid_forecast::{ForecastConfig, ForecastOrchestrator, ModelRegistry, Strategy};
use std::path::PathBuf;
use std::sync::Arc;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let csv_path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("examples")
        .join("csv")
        .join("daily_market.csv");

    let raw = raw_days_from_csv(&csv_path)?;
    let history = derive_regressors(&raw)?;
    println!("Derived regressors for {} days", history.len());

    let origin = history.demand().first().ok_or("empty history")?.date;
    let weekend_dip = [0.1, 0.1, 0.1, 0.1, 0.1, -0.6, -0.6];

    // Coefficients act on standardized targets
    let demand = LinearAdditiveModel::new("demand", origin)
        .with_weekday_effects(weekend_dip)
        .with_regressor("max_temperature", 0.05)
        .with_regressor("demand_lag_1", 0.000_002);
    let price = LinearAdditiveModel::new("price", origin)
        .with_trend(0.002)
        .with_regressor("rrp_lag_1", 0.004)
        .with_regressor("extreme_weather", 0.5);

    let config = ForecastConfig::default();
    let models = ModelRegistry::new().with_additive(Arc::new(demand), Arc::new(price));
    let orchestrator = ForecastOrchestrator::new(config.clone(), models)?;

    let last = history.demand().last().ok_or("empty history")?.date;
    let start = last + Duration::days(1);
    let result = orchestrator.run(&history, start, start + Duration::days(6), Strategy::Additive)?;
    println!("{}", serde_json::to_string_pretty(result.records())?);

    // Reference point for a trained sequence model
    let baseline = WindowMean::new(config.window_size)?;
    let report = evaluate_holdout(
        &baseline,
        &history.demand().values(),
        config.window_size,
        config.train_ratio,
    )?;
    println!(
        "Window mean baseline over {} test windows:\n{}",
        report.test_windows, report.accuracy
    );

    Ok(())
}
