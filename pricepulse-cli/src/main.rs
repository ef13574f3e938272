//! PricePulse CLI: analyze price files, generate synthetic series, print config.
//!
//! Commands:
//! - `analyze` — compute indicators and a BUY/SELL/HOLD signal for each CSV file
//! - `synth` — write a deterministic synthetic price series as CSV
//! - `config` — print the default configuration as TOML

mod config;
mod loader;
mod report;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pricepulse_core::signal::SignalSynthesizer;
use pricepulse_core::synthetic::SyntheticSeries;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::config::{AppConfig, LogConfig, LogFormat};
use crate::report::{analyze_all, check_unique_assets, AnalyzeOptions};

#[derive(Parser)]
#[command(
    name = "pricepulse",
    about = "PricePulse CLI — technical indicators and composite trading signals"
)]
struct Cli {
    /// Path to a TOML config file. Defaults are used when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the log filter (e.g. "debug", "pricepulse_core=trace").
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze one or more CSV price files (columns: time,value).
    Analyze {
        /// Price files; the file stem names the asset.
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Use synthetic data when a file is missing, malformed, or too short.
        #[arg(long, default_value_t = false)]
        synthetic: bool,

        /// Master seed for synthetic fallback series.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Pretty-print JSON output.
        #[arg(long, default_value_t = false)]
        pretty: bool,

        /// Write one `<asset>.json` per asset here instead of printing to stdout.
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
    /// Generate a synthetic price series.
    Synth {
        /// Number of points.
        #[arg(long, default_value_t = 200)]
        points: usize,

        /// RNG seed.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// First price.
        #[arg(long, default_value_t = 100.0)]
        start_price: f64,

        /// Output CSV path.
        #[arg(long)]
        output: PathBuf,
    },
    /// Print the default configuration as TOML.
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut app_config = match &cli.config {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::default(),
    };
    if let Some(level) = cli.log_level {
        app_config.log.level = level;
    }
    init_tracing(&app_config.log);

    match cli.command {
        Commands::Analyze {
            files,
            synthetic,
            seed,
            pretty,
            output_dir,
        } => {
            let opts = AnalyzeOptions {
                synthetic_fallback: synthetic,
                seed,
            };
            let pretty = pretty || app_config.output.pretty;
            run_analyze(&app_config, &files, &opts, pretty, output_dir.as_deref())
        }
        Commands::Synth {
            points,
            seed,
            start_price,
            output,
        } => run_synth(points, seed, start_price, &output),
        Commands::Config => {
            print!("{}", AppConfig::default_toml()?);
            Ok(())
        }
    }
}

fn init_tracing(log: &LogConfig) {
    let filter = EnvFilter::new(&log.level);
    match log.format {
        LogFormat::Json => {
            tracing_subscriber::fmt()
                .json()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Text => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

fn run_analyze(
    app_config: &AppConfig,
    files: &[PathBuf],
    opts: &AnalyzeOptions,
    pretty: bool,
    output_dir: Option<&Path>,
) -> Result<()> {
    let synthesizer = SignalSynthesizer::new(app_config.signal.clone())
        .context("invalid signal configuration")?;
    if output_dir.is_some() {
        check_unique_assets(files).context("reports would overwrite each other")?;
    }

    let results = analyze_all(files, &synthesizer, opts);

    let mut reports = Vec::with_capacity(results.len());
    let mut failures = 0usize;
    for result in results {
        match result {
            Ok(report) => reports.push(report),
            Err(err) => {
                error!(error = %err, "asset failed");
                failures += 1;
            }
        }
    }

    match output_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("failed to create {}", dir.display()))?;
            for report in &reports {
                let path = dir.join(format!("{}.json", report.asset));
                std::fs::write(&path, render(report, pretty)?)
                    .with_context(|| format!("failed to write {}", path.display()))?;
                info!(asset = %report.asset, path = %path.display(), "report written");
            }
        }
        None => println!("{}", render(&reports, pretty)?),
    }

    for report in &reports {
        let signal = &report.analysis.signal;
        eprintln!(
            "{:<12} {:<4} {:>3}%  {}",
            report.asset, signal.action, signal.confidence, signal.summary
        );
    }

    if failures > 0 {
        eprintln!("{failures} of {} assets failed", files.len());
        std::process::exit(1);
    }
    Ok(())
}

fn render<T: serde::Serialize + ?Sized>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

fn run_synth(points: usize, seed: u64, start_price: f64, output: &Path) -> Result<()> {
    let generator = SyntheticSeries {
        start_price,
        ..SyntheticSeries::with_seed(seed)
    };
    let series = generator
        .generate(points)
        .context("failed to generate synthetic series")?;
    loader::write_series(output, &series)?;
    info!(points, seed, path = %output.display(), "synthetic series written");
    Ok(())
}

