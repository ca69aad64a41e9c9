//! Reorder forecasting CLI.
//!
//! # Usage
//!
//! ```bash
//! # One-off report from exported inventory and usage files
//! reorder-forecast forecast -i inventory.csv -u usage.csv -o report.csv
//!
//! # Recompute every 15 seconds, rewriting the report each time
//! reorder-forecast watch -i inventory.json -u usage.csv -o report.csv
//!
//! # Run on generated workshop data
//! reorder-forecast demo --seed 42
//! ```

use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand, ValueEnum};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use reorder_forecast::forecast::{ExponentialSmoothing, MovingAverage, UsageEstimator};
use reorder_forecast::io::{ingest, reporting, synthetic};
use reorder_forecast::planning::{
    ForecastConfig, ForecastEngine, ForecastRow, InventorySnapshot, SnapshotCache,
};
use reorder_forecast::Result;

#[derive(Parser)]
#[command(name = "reorder-forecast")]
#[command(author, version, about = "Inventory replenishment forecasting")]
struct Cli {
    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute forecasts once and export them
    Forecast {
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        opts: ForecastOpts,
    },
    /// Recompute on an interval, keeping the last good report on failure
    Watch {
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        opts: ForecastOpts,

        /// Seconds between recomputations
        #[arg(long, env = "REORDER_REFRESH_SECS", default_value_t = 15)]
        interval: u64,

        /// Seconds a loaded snapshot is reused before the files are read again
        #[arg(long, env = "REORDER_CACHE_TTL_SECS", default_value_t = 15)]
        cache_ttl: u64,

        /// Stop after this many recomputations (runs forever if omitted)
        #[arg(long)]
        iterations: Option<u64>,
    },
    /// Forecast generated workshop data
    Demo {
        #[command(flatten)]
        opts: ForecastOpts,

        /// Days of usage history to generate
        #[arg(long, default_value_t = 30)]
        days: usize,

        /// RNG seed for reproducible data
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(Args)]
struct InputArgs {
    /// Inventory export (.csv or .json)
    #[arg(short, long)]
    inventory: PathBuf,

    /// Usage history CSV with headers sku,date,qtyUsed
    #[arg(short, long)]
    usage: Option<PathBuf>,
}

#[derive(Args)]
struct ForecastOpts {
    /// Trailing usage window, in days
    #[arg(long, env = "REORDER_WINDOW_DAYS", default_value_t = 14)]
    window_days: usize,

    /// Planning horizon of the projected trajectory, in days
    #[arg(long, env = "REORDER_HORIZON_DAYS", default_value_t = 30)]
    horizon_days: usize,

    /// How average daily usage is estimated
    #[arg(long, value_enum, default_value_t = EstimatorKind::MovingAverage)]
    estimator: EstimatorKind,

    /// Smoothing factor for the exponential-smoothing estimator
    #[arg(long, default_value_t = 0.3)]
    alpha: f64,

    /// Reference date for ETAs (defaults to today)
    #[arg(long)]
    today: Option<NaiveDate>,

    /// Write the report here instead of stdout
    #[arg(short, long)]
    out: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
    format: OutputFormat,
}

#[derive(Clone, Copy, ValueEnum)]
enum EstimatorKind {
    MovingAverage,
    ExponentialSmoothing,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Flat CSV export
    Csv,
    /// Full rows including the projected trajectory
    Json,
}

impl ForecastOpts {
    fn engine(&self, config: ForecastConfig) -> Result<ForecastEngine> {
        config.validate()?;
        let estimator: Box<dyn UsageEstimator> = match self.estimator {
            EstimatorKind::MovingAverage => Box::new(MovingAverage::new(config.window_days)),
            EstimatorKind::ExponentialSmoothing => {
                Box::new(ExponentialSmoothing::new(self.alpha, config.window_days))
            }
        };
        Ok(ForecastEngine::new(config, estimator))
    }

    fn config(&self) -> ForecastConfig {
        ForecastConfig {
            window_days: self.window_days,
            horizon_days: self.horizon_days,
            ..ForecastConfig::default()
        }
    }

    fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    if let Err(e) = run(cli) {
        error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn init_tracing(json: bool) {
    // Defaults to info level for our crate if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "reorder_forecast=info".into());

    // Reports may go to stdout, so logs always go to stderr
    let json_layer = json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer =
        (!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Forecast { input, opts } => {
            let engine = opts.engine(opts.config())?;
            let snapshot = ingest::load_snapshot(&input.inventory, input.usage.as_deref())?;
            let rows = engine.run(&snapshot, opts.today());
            emit(&engine, &opts, &rows)
        }
        Commands::Watch {
            input,
            opts,
            interval,
            cache_ttl,
            iterations,
        } => {
            let config = ForecastConfig {
                refresh_interval: Duration::from_secs(interval),
                cache_ttl: Duration::from_secs(cache_ttl),
                ..opts.config()
            };
            let engine = opts.engine(config)?;
            watch(&engine, &opts, &input, iterations)
        }
        Commands::Demo { opts, days, seed } => {
            let engine = opts.engine(opts.config())?;
            let today = opts.today();
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            let snapshot = InventorySnapshot {
                items: synthetic::demo_inventory(),
                usage: synthetic::demo_usage(&mut rng, today, days)?,
            };
            let rows = engine.run(&snapshot, today);
            emit(&engine, &opts, &rows)
        }
    }
}

/// Polls the input files, recomputing on every tick.
///
/// A failed reload keeps the previous report in place.
fn watch(
    engine: &ForecastEngine,
    opts: &ForecastOpts,
    input: &InputArgs,
    iterations: Option<u64>,
) -> Result<()> {
    let mut cache = SnapshotCache::new(engine.config().cache_ttl);
    let mut tick: u64 = 0;

    loop {
        let loaded = cache.refresh_with(Instant::now(), || {
            ingest::load_snapshot(&input.inventory, input.usage.as_deref())
        });

        if let Some(snapshot) = loaded {
            let rows = engine.run(snapshot, opts.today());
            if let Err(e) = emit(engine, opts, &rows) {
                warn!("Export failed: {e}");
            }
        }

        tick += 1;
        if iterations.is_some_and(|limit| tick >= limit) {
            return Ok(());
        }
        std::thread::sleep(engine.config().refresh_interval);
    }
}

fn emit(engine: &ForecastEngine, opts: &ForecastOpts, rows: &[ForecastRow]) -> Result<()> {
    let summary = engine.summarize(rows);
    info!(
        reorder_now = summary.reorder_now,
        overstock = summary.overstock,
        approaching = summary.approaching_reorder,
        suggested_units = summary.total_suggested_qty,
        "inventory status"
    );

    match (&opts.out, opts.format) {
        (Some(path), OutputFormat::Csv) => reporting::write_report_file(path, rows),
        (Some(path), OutputFormat::Json) => write_json(path, rows),
        (None, OutputFormat::Csv) => {
            reporting::write_forecast_report(std::io::stdout().lock(), rows)
        }
        (None, OutputFormat::Json) => {
            let mut out = std::io::stdout().lock();
            serde_json::to_writer_pretty(&mut out, rows)?;
            writeln!(out)?;
            Ok(())
        }
    }
}

fn write_json(path: &Path, rows: &[ForecastRow]) -> Result<()> {
    let file = std::fs::File::create(path)?;
    serde_json::to_writer_pretty(file, rows)?;
    info!(rows = rows.len(), path = %path.display(), "forecast written as JSON");
    Ok(())
}
