//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `geobatch` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - Ctrl-C handling
//! - User-facing output formatting

use anyhow::{Context, Result};
use clap::Parser;
use std::process;
use tokio_util::sync::CancellationToken;

use geobatch::initialization::init_logger_with;
use geobatch::{run_geocode, spawn_signal_listener, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // .env may hold GEOBATCH_API_KEY; it must be loaded before clap reads env
    if dotenvy::dotenv().is_err() {
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let env_path = exe_dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                }
            }
        }
    }

    let config = Config::parse();

    init_logger_with(config.log_level.clone().into(), config.log_format.clone())
        .context("Failed to initialize logger")?;

    let cancel = CancellationToken::new();
    let listener = spawn_signal_listener(cancel.clone());

    let result = run_geocode(config, cancel.clone()).await;
    cancel.cancel();
    let _ = listener.await;

    match result {
        Ok(report) => {
            println!(
                "{} {} record{} ({} ok, {} low precision, {} not found, {} errors) in {:.1}s, {} still unresolved",
                if report.interrupted { "Interrupted after" } else { "Geocoded" },
                report.processed,
                if report.processed == 1 { "" } else { "s" },
                report.stats.ok,
                report.stats.low_precision,
                report.stats.not_found,
                report.stats.error,
                report.elapsed_seconds,
                report.unresolved()
            );
            println!("Table saved in {}", report.path.display());
            Ok(())
        }
        Err(e) => {
            eprintln!("geobatch error: {:#}", e);
            process::exit(1);
        }
    }
}
