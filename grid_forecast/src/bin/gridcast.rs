use clap::{Parser, ValueEnum};
use grid_forecast::error::Result;
use grid_forecast::metrics::ForecastSummary;
use grid_forecast::models::moving_average::{WindowEma, WindowMean};
use grid_forecast::models::SequenceModel;
use grid_forecast::{
    data::parse_date, CsvLayout, DataLoader, ErrorBody, ForecastConfig, ForecastOrchestrator,
    ModelRegistry, Strategy,
};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StrategyArg {
    Additive,
    Autoregressive,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Additive => Strategy::Additive,
            StrategyArg::Autoregressive => Strategy::Autoregressive,
        }
    }
}

/// Baseline sequence models used when no model directory is given
#[derive(Debug, Clone, Copy, ValueEnum)]
enum BaselineArg {
    Mean,
    Ema,
}

/// Forecast daily electricity demand and price from a CSV history
#[derive(Debug, Parser)]
#[command(name = "gridcast", version)]
struct Args {
    /// CSV file with a date column plus demand and price columns
    #[arg(short, long)]
    input: PathBuf,

    /// First day of the requested range
    #[arg(short, long)]
    start: String,

    /// Last day of the requested range
    #[arg(short, long)]
    end: String,

    #[arg(long, value_enum, default_value_t = StrategyArg::Autoregressive)]
    strategy: StrategyArg,

    /// Baseline model for the autoregressive strategy without --models-dir
    #[arg(long, value_enum, default_value_t = BaselineArg::Mean)]
    baseline: BaselineArg,

    /// Smoothing factor of the EMA baseline
    #[arg(long, default_value_t = 0.3)]
    alpha: f64,

    /// Directory holding JSON model artifacts
    #[arg(long)]
    models_dir: Option<PathBuf>,

    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, default_value = "demand")]
    demand_column: String,

    #[arg(long, default_value = "rrp")]
    price_column: String,

    /// Log a summary of the forecast
    #[arg(long)]
    summary: bool,
}

fn baseline(args: &Args, window: usize) -> Result<Arc<dyn SequenceModel>> {
    let model: Arc<dyn SequenceModel> = match args.baseline {
        BaselineArg::Mean => Arc::new(WindowMean::new(window)?),
        BaselineArg::Ema => Arc::new(WindowEma::new(window, args.alpha)?),
    };
    Ok(model)
}

fn run(args: &Args) -> Result<String> {
    let config = match &args.config {
        Some(path) => ForecastConfig::from_json_file(path)?,
        None => ForecastConfig::default(),
    };

    let models = match &args.models_dir {
        Some(dir) => ModelRegistry::load_dir(dir)?,
        None => ModelRegistry::new().with_sequence(
            baseline(args, config.window_size)?,
            baseline(args, config.window_size)?,
        ),
    };
    models.install()?;

    let layout = CsvLayout::new(args.demand_column.as_str(), args.price_column.as_str());
    let history = DataLoader::from_csv(&args.input, &layout)?;
    let start = parse_date(&args.start)?;
    let end = parse_date(&args.end)?;

    let orchestrator = ForecastOrchestrator::from_global(config)?;
    let result = orchestrator.run(&history, start, end, args.strategy.into())?;

    if args.summary {
        log::info!("\n{}", ForecastSummary::from_result(&result)?);
    }

    result.to_json()
}

fn main() -> ExitCode {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = Args::parse();
    log::debug!("Parsed arguments: {:?}", args);

    match run(&args) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("Forecast failed: {}", err);
            let body = ErrorBody::from(&err);
            println!(
                "{}",
                body.to_json()
                    .unwrap_or_else(|_| format!("{{\"error\":\"{}\"}}", err))
            );
            ExitCode::from(1)
        }
    }
}
