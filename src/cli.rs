//! Command-line interface parsing for weathernow
//!
//! This module handles parsing of CLI arguments using clap and turns them
//! into the [`ForecastRequest`] and startup options used by `main`.

use std::path::PathBuf;

use clap::Parser;
use thiserror::Error;

use crate::data::client::{DEFAULT_DAYS, DEFAULT_QUERY};
use crate::data::ForecastRequest;

/// Fewest forecast days the report can be built from
pub const MIN_DAYS: u8 = 3;

/// Most forecast days the provider returns
pub const MAX_DAYS: u8 = 14;

/// Error types for CLI argument parsing
#[derive(Debug, Error)]
pub enum CliError {
    /// The requested number of forecast days is out of range
    #[error("Invalid days: {0}. Expected a value from 3 to 14")]
    InvalidDays(u8),

    /// The location query is empty
    #[error("Location must not be empty")]
    EmptyQuery,
}

/// weathernow - current, hourly and daily forecast from weatherapi.com
#[derive(Parser, Debug)]
#[command(name = "weathernow")]
#[command(about = "Current, hourly and daily weather forecast")]
#[command(version)]
pub struct Cli {
    /// Location name or "latitude,longitude"
    ///
    /// Examples:
    ///   weathernow                  # Moscow
    ///   weathernow London
    ///   weathernow 55.75,37.62
    #[arg(value_name = "LOCATION", default_value = DEFAULT_QUERY)]
    pub query: String,

    /// Number of forecast days to request (3-14)
    #[arg(long, default_value_t = DEFAULT_DAYS)]
    pub days: u8,

    /// Request air quality data
    #[arg(long)]
    pub aqi: bool,

    /// Request weather alerts
    #[arg(long)]
    pub alerts: bool,

    /// weatherapi.com API key
    #[arg(long, env = "WEATHERAPI_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Directory for the cached forecast (defaults to the XDG cache directory)
    #[arg(long, value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Only show the cached forecast, do not fetch
    #[arg(long)]
    pub offline: bool,

    /// Print the forecast as JSON instead of a text report
    #[arg(long)]
    pub json: bool,
}

impl ForecastRequest {
    /// Creates a ForecastRequest from parsed CLI arguments.
    ///
    /// # Returns
    /// * `Ok(ForecastRequest)` with the requested location and options
    /// * `Err(CliError)` if the location is empty or days is out of range
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let query = cli.query.trim();
        if query.is_empty() {
            return Err(CliError::EmptyQuery);
        }
        if !(MIN_DAYS..=MAX_DAYS).contains(&cli.days) {
            return Err(CliError::InvalidDays(cli.days));
        }

        Ok(ForecastRequest {
            query: query.to_string(),
            days: cli.days,
            include_air_quality: cli.aqi,
            include_alerts: cli.alerts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_no_args() {
        let cli = Cli::parse_from(["weathernow"]);
        assert_eq!(cli.query, "Moscow");
        assert_eq!(cli.days, 3);
        assert!(!cli.aqi);
        assert!(!cli.alerts);
        assert!(!cli.offline);
        assert!(!cli.json);
        assert!(cli.cache_dir.is_none());
    }

    #[test]
    fn test_cli_parse_location_and_flags() {
        let cli = Cli::parse_from([
            "weathernow",
            "55.75,37.62",
            "--days",
            "7",
            "--aqi",
            "--alerts",
            "--api-key",
            "secret",
            "--cache-dir",
            "/tmp/wn",
        ]);
        assert_eq!(cli.query, "55.75,37.62");
        assert_eq!(cli.days, 7);
        assert!(cli.aqi);
        assert!(cli.alerts);
        assert_eq!(cli.api_key.as_deref(), Some("secret"));
        assert_eq!(cli.cache_dir, Some(PathBuf::from("/tmp/wn")));
    }

    #[test]
    fn test_request_from_cli_defaults() {
        let cli = Cli::parse_from(["weathernow"]);
        let request = ForecastRequest::from_cli(&cli).unwrap();
        assert_eq!(request, ForecastRequest::default());
    }

    #[test]
    fn test_request_from_cli_with_options() {
        let cli = Cli::parse_from(["weathernow", "  London ", "--days", "5", "--aqi"]);
        let request = ForecastRequest::from_cli(&cli).unwrap();
        assert_eq!(request.query, "London");
        assert_eq!(request.days, 5);
        assert!(request.include_air_quality);
        assert!(!request.include_alerts);
    }

    #[test]
    fn test_request_from_cli_rejects_too_few_days() {
        let cli = Cli::parse_from(["weathernow", "--days", "2"]);
        let err = ForecastRequest::from_cli(&cli).unwrap_err();
        assert!(matches!(err, CliError::InvalidDays(2)));
        assert!(err.to_string().contains("Invalid days"));
    }

    #[test]
    fn test_request_from_cli_rejects_too_many_days() {
        let cli = Cli::parse_from(["weathernow", "--days", "15"]);
        assert!(ForecastRequest::from_cli(&cli).is_err());
    }

    #[test]
    fn test_request_from_cli_rejects_blank_location() {
        let cli = Cli::parse_from(["weathernow", "   "]);
        assert!(matches!(
            ForecastRequest::from_cli(&cli),
            Err(CliError::EmptyQuery)
        ));
    }
}
