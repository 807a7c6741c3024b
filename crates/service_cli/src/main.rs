//! fxhedge - Command Line Front End for the FX Hedging Engine
//!
//! # Commands
//!
//! - `fxhedge price --portfolio <file>` - Price instruments and report MTM
//! - `fxhedge risk --portfolio <file>` - VaR, expected shortfall and hedge coverage
//! - `fxhedge stress --portfolio <file>` - Preset or custom stress scenarios
//! - `fxhedge check` - Validate and print the effective configuration
//!
//! Market data defaults to reference G10 quotes when `--market` is absent.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use pricer_risk::scenarios::PresetScenario;
use tracing::{debug, error};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;
mod input;
mod output;

use commands::price::PriceArgs;
use commands::risk::RiskArgs;
use commands::stress::StressArgs;
use commands::Context;
use config::{build_config, CliOverrides, LogLevel};
use error::Result;
use output::OutputFormat;

/// FX hedging pricing and risk engine
#[derive(Parser)]
#[command(name = "fxhedge")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file path (TOML format)
    #[arg(short, long, global = true, value_name = "FILE", env = "FXHEDGE_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Log line format
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Monte Carlo seed
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Price unrecognised instrument kinds as vanilla calls
    #[arg(long, global = true)]
    allow_unknown_kinds: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

/// Inputs shared by the portfolio commands
#[derive(Args, Debug, Clone)]
struct BookArgs {
    /// Portfolio JSON file (instrument array or book with strategies)
    #[arg(short, long)]
    portfolio: PathBuf,

    /// Market set JSON file keyed by pair
    #[arg(short, long)]
    market: Option<PathBuf>,

    /// Valuation date for reference quotes (YYYY-MM-DD)
    #[arg(short, long)]
    date: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Price every instrument and report its MTM
    Price {
        #[command(flatten)]
        book: BookArgs,
    },

    /// Aggregate VaR, expected shortfall and exposure coverage
    Risk {
        #[command(flatten)]
        book: BookArgs,

        /// Underlying exposures JSON file
        #[arg(short, long)]
        exposures: Option<PathBuf>,
    },

    /// Run stress scenarios
    Stress {
        #[command(flatten)]
        book: BookArgs,

        /// Underlying exposures JSON file
        #[arg(short, long)]
        exposures: Option<PathBuf>,

        /// Preset to run (usd-strength, eur-crisis, risk-off); all when omitted
        #[arg(long)]
        preset: Option<PresetScenario>,

        /// Scenario JSON file
        #[arg(long, value_name = "FILE")]
        scenario: Option<PathBuf>,

        /// Uniform spot shock in percent (e.g. -10)
        #[arg(long, allow_hyphen_values = true)]
        spot_shock: Option<f64>,

        /// Uniform volatility shock in volatility points (e.g. 5)
        #[arg(long, allow_hyphen_values = true)]
        vol_shock: Option<f64>,

        /// Print per-instrument impacts
        #[arg(long)]
        detail: bool,
    },

    /// Check configuration
    Check,
}

fn init_tracing(log_level: &str, format: LogFormat) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Text => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}

fn run(cli: Cli) -> Result<String> {
    let log_level = cli
        .log_level
        .as_deref()
        .map(str::parse::<LogLevel>)
        .transpose()?;
    let overrides = CliOverrides {
        config_file: cli.config,
        log_level,
        seed: cli.seed,
        allow_unknown_kinds: cli.allow_unknown_kinds,
    };
    let config = build_config(&overrides)?;

    init_tracing(config.log_level.as_filter_str(), cli.log_format);
    debug!(?config, "configuration loaded");

    let ctx = Context {
        config,
        format: cli.format,
    };

    match cli.command {
        Commands::Price { book } => commands::price::run(
            &ctx,
            &PriceArgs {
                portfolio: book.portfolio,
                market: book.market,
                date: book.date,
            },
        ),
        Commands::Risk { book, exposures } => commands::risk::run(
            &ctx,
            &RiskArgs {
                portfolio: book.portfolio,
                market: book.market,
                exposures,
                date: book.date,
            },
        ),
        Commands::Stress {
            book,
            exposures,
            preset,
            scenario,
            spot_shock,
            vol_shock,
            detail,
        } => commands::stress::run(
            &ctx,
            &StressArgs {
                portfolio: book.portfolio,
                market: book.market,
                exposures,
                date: book.date,
                preset,
                scenario_file: scenario,
                spot_shock,
                vol_shock,
                detail,
            },
        ),
        Commands::Check => commands::check::run(&ctx),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match run(cli) {
        Ok(output) => {
            print!("{output}");
            if !output.ends_with('\n') {
                println!();
            }
            Ok(())
        }
        Err(err) => {
            error!(error = %err, "fxhedge failed");
            Err(err)
        }
    }
}
