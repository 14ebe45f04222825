use chrono::Duration;
use grid_forecast::metrics::ForecastSummary;
use grid_forecast::models::moving_average::WindowEma;
use grid_forecast::{CsvLayout, DataLoader, ForecastConfig, ForecastOrchestrator, ModelRegistry, Strategy};
use std::path::PathBuf;
use std::sync::Arc;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let csv_path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("examples")
        .join("csv")
        .join("daily_market.csv");

    println!("Loading data from: {}", csv_path.display());
    let history = DataLoader::from_csv(&csv_path, &CsvLayout::default())?;
    println!("Loaded {} days", history.len());

    let config = ForecastConfig::default();
    let models = ModelRegistry::new().with_sequence(
        Arc::new(WindowEma::new(config.window_size, 0.3)?),
        Arc::new(WindowEma::new(config.window_size, 0.3)?),
    );
    let orchestrator = ForecastOrchestrator::new(config, models)?;

    // Seed from the last observed day and roll two weeks ahead
    let last = history.demand().last().ok_or("empty history")?.date;
    let start = last + Duration::days(1);
    let end = start + Duration::days(14);
    let result = orchestrator.run(&history, start, end, Strategy::Autoregressive)?;

    println!("{:<12} {:>14} {:>10}", "date", "demand", "price");
    for record in result.records() {
        println!(
            "{:<12} {:>14.2} {:>10.2}",
            record.date, record.demand_forecast, record.price_forecast
        );
    }

    println!("\n{}", ForecastSummary::from_result(&result)?);
    Ok(())
}
