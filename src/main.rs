//! weathernow - current, hourly and daily forecast in the terminal
//!
//! Shows the cached forecast right away, then fetches a fresh one from
//! weatherapi.com and shows that too.

use std::io::IsTerminal;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

use weathernow::cache::CacheManager;
use weathernow::cli::Cli;
use weathernow::data::{ForecastClient, ForecastRequest};
use weathernow::refresh::{ForecastSnapshot, Refresher};
use weathernow::report;

/// Prints a snapshot as text or JSON
fn print_snapshot(snapshot: &ForecastSnapshot, json: bool) -> Result<(), serde_json::Error> {
    if json {
        println!("{}", serde_json::to_string_pretty(snapshot)?);
    } else {
        println!("{}", report::render(snapshot));
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "weathernow=info".into()),
        )
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .init();

    // Load .env if present so WEATHERAPI_KEY can live there
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let request = match ForecastRequest::from_cli(&cli) {
        Ok(request) => request,
        Err(e) => {
            error!(error = %e, "invalid arguments");
            return Ok(ExitCode::FAILURE);
        }
    };

    let cache = match &cli.cache_dir {
        Some(dir) => Some(CacheManager::with_dir(dir.clone())),
        None => CacheManager::new(),
    };
    if cache.is_none() {
        warn!("no cache directory available, forecasts will not be cached");
    }

    let client = ForecastClient::new(cli.api_key.clone().unwrap_or_default());
    let refresher = Refresher::new(client, cache, request);
    let mut updates = refresher.subscribe();

    refresher.restore_from_cache();
    let cached: Option<Arc<ForecastSnapshot>> = updates.borrow_and_update().clone();
    if let Some(snapshot) = &cached {
        print_snapshot(snapshot, cli.json)?;
    }

    if cli.offline {
        if cached.is_none() {
            error!("no cached forecast available");
            return Ok(ExitCode::FAILURE);
        }
        return Ok(ExitCode::SUCCESS);
    }

    if cli.api_key.as_deref().map_or(true, str::is_empty) {
        error!("missing API key: pass --api-key or set WEATHERAPI_KEY");
        return Ok(if cached.is_some() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        });
    }

    match refresher.refresh().await {
        Ok(_) => {
            if let Some(snapshot) = updates.borrow_and_update().clone() {
                print_snapshot(&snapshot, cli.json)?;
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            // The cached forecast, if any, is still the latest thing shown
            error!(error = %e, "failed to refresh forecast");
            Ok(if cached.is_some() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
    }
}
