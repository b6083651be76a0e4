//! herald binary.
//!
//! Picks a markdown file and an image, asks a local model for a caption and
//! posts it to Facebook and Instagram, on a schedule or once.

use clap::Parser;
use herald::observability::{ObservabilityConfig, init_observability};
use herald_bot::{HeraldConfig, Scheduler};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(name = "herald")]
#[command(about = "Scheduled restaurant promo posts to Facebook and Instagram")]
#[command(version)]
struct Args {
    /// Configuration file (defaults to ./herald.toml when present)
    #[arg(short, long, env = "HERALD_CONFIG")]
    config: Option<PathBuf>,

    /// Run the pipeline once and exit
    #[arg(long)]
    once: bool,

    /// Emit JSON logs
    #[arg(long)]
    json_logs: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let dotenv = dotenvy::dotenv();

    let mut observability = ObservabilityConfig::new().with_json_logs(args.json_logs);
    if args.verbose {
        observability = observability.with_log_level("debug");
    }
    init_observability(&observability)?;

    match dotenv {
        Ok(path) => info!(path = %path.display(), "Loaded environment file"),
        Err(e) if e.not_found() => debug!("No .env file"),
        Err(e) => warn!(error = %e, "Failed to load .env file"),
    }

    let config = HeraldConfig::load(args.config.as_deref())?;
    for warning in config.validate() {
        warn!("{}", warning);
    }
    debug!(config = ?config, "Configuration loaded");

    let http = reqwest::Client::new();

    let ollama = herald::build_generator(&config, http.clone())?;
    if let Err(e) = ollama.validate().await {
        warn!(error = %e, "Ollama check failed, runs will fail until it is reachable");
    }

    let pipeline = herald::build_pipeline(&config, http)?;
    let scheduler = Scheduler::new(Arc::new(pipeline), config.schedule());

    if args.once {
        let report = scheduler.run_once().await?;
        println!("{}", serde_json::to_string_pretty(report.context())?);
        return Ok(());
    }

    info!(schedule = %scheduler.schedule(), "Starting herald");

    tokio::select! {
        result = scheduler.run_forever() => result?,
        signal = tokio::signal::ctrl_c() => {
            signal?;
            info!("Shutdown requested");
        }
    }

    info!(metrics = ?scheduler.metrics().snapshot(), "herald stopped");
    Ok(())
}
