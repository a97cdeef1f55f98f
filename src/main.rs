//! Crudewatch CLI - oil price and event-impact data service

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crudewatch::config::{self, CrudewatchConfig};
use crudewatch::generator::{DEFAULT_END, DEFAULT_START, GeneratorConfig};
use crudewatch::output::OutputMode;
use crudewatch::query::{DateRange, EventFilter};

mod commands;

#[derive(Parser)]
#[command(name = "crudewatch")]
#[command(version)]
#[command(about = "Oil price and historical event-impact data service")]
#[command(long_about = r#"
Crudewatch serves a daily oil price series and a table of historical events
to a charting frontend, and can generate a synthetic price series for demos.

Example usage:
  crudewatch generate --seed 42
  crudewatch serve --port 5000
  crudewatch impact --date 2020-03-11 --window 30
  crudewatch stats --start 2014-01-01 --end 2015-12-31
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the price and event tables
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputMode::Text)]
    format: OutputMode,

    #[command(subcommand)]
    command: Commands,
}

/// Optional inclusive date bounds (YYYY-MM-DD)
#[derive(Args, Debug)]
pub struct RangeArgs {
    /// First date to include
    #[arg(long, value_parser = parse_date)]
    pub start: Option<NaiveDate>,

    /// Last date to include
    #[arg(long, value_parser = parse_date)]
    pub end: Option<NaiveDate>,
}

impl RangeArgs {
    pub fn range(&self) -> DateRange {
        DateRange::new(self.start, self.end)
    }
}

#[derive(Args, Debug)]
pub struct ImpactArgs {
    /// Event date (YYYY-MM-DD)
    #[arg(short, long, value_parser = parse_date)]
    pub date: NaiveDate,

    /// Half-width of the window in calendar days
    #[arg(short, long)]
    pub window: Option<u32>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API
    Serve {
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Generate a synthetic price table
    Generate {
        /// Output CSV (defaults to the configured price table)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// RNG seed for reproducible output
        #[arg(short, long)]
        seed: Option<u64>,

        /// First trading day
        #[arg(long, value_parser = parse_date, default_value_t = DEFAULT_START)]
        start: NaiveDate,

        /// Last trading day
        #[arg(long, value_parser = parse_date, default_value_t = DEFAULT_END)]
        end: NaiveDate,
    },

    /// List prices in a date range
    Prices(RangeArgs),

    /// List events, optionally filtered
    Events {
        /// Exact category match
        #[arg(long)]
        category: Option<String>,

        /// Exact impact level match
        #[arg(long)]
        impact_level: Option<String>,

        #[command(flatten)]
        range: RangeArgs,
    },

    /// Descriptive statistics and volatility for a date range
    Stats(RangeArgs),

    /// Mean price before vs after an event
    Impact(ImpactArgs),

    /// Distinct event categories and impact levels
    Categories,

    /// First and last date of the price table
    Range,

    /// Write a default config file
    Init {
        /// Overwrite an existing config
        #[arg(long)]
        force: bool,
    },
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    crudewatch::price::parse_iso_date(s).map_err(|e| e.to_string())
}

/// Merge the config file (if any) with global CLI overrides
fn resolve_config(cli: &Cli) -> anyhow::Result<CrudewatchConfig> {
    let mut resolved = config::load_config(cli.config.as_deref())?.unwrap_or_default();
    if let Some(dir) = &cli.data_dir {
        resolved.data_dir = dir.clone();
    }
    Ok(resolved)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging; RUST_LOG takes precedence over --verbose
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let mode = cli.format;

    if let Commands::Init { force } = &cli.command {
        let path = cli.config.clone().unwrap_or_else(config::default_config_path);
        return commands::run_init(&path, *force, mode);
    }

    let mut settings = resolve_config(&cli)?;

    match cli.command {
        Commands::Serve { port } => {
            if let Some(port) = port {
                settings.port = port;
            }
            commands::run_serve(&settings).await?;
        }

        Commands::Generate { output, seed, start, end } => {
            let mut generator_config = GeneratorConfig::default().with_range(start, end);
            if let Some(seed) = seed.or(settings.seed) {
                generator_config = generator_config.with_seed(seed);
            }
            let output = output.unwrap_or_else(|| settings.prices_path());
            commands::run_generate(generator_config, &output, mode)?;
        }

        Commands::Prices(range) => commands::run_prices(&settings, &range, mode)?,

        Commands::Events { category, impact_level, range } => {
            let mut filter = EventFilter::new().with_range(range.range());
            if let Some(category) = category {
                filter = filter.with_category(category);
            }
            if let Some(level) = impact_level {
                filter = filter.with_impact_level(level);
            }
            commands::run_events(&settings, &filter, mode)?;
        }

        Commands::Stats(range) => commands::run_stats(&settings, &range, mode)?,

        Commands::Impact(args) => commands::run_impact(&settings, &args, mode)?,

        Commands::Categories => commands::run_categories(&settings, mode)?,

        Commands::Range => commands::run_range(&settings, mode)?,

        Commands::Init { .. } => {}
    }

    Ok(())
}
