//! Forecast data models and the pipeline that produces them
//!
//! A raw weatherapi.com document is fetched by [`ForecastClient`], kept
//! verbatim as a [`RawForecast`], and normalized into the three records the
//! report shows: current conditions, the next 24 hours and the next 3 days.

pub mod client;
pub mod conditions;
pub mod error;
pub mod hourly;
pub mod normalize;
pub mod time;

pub use client::{ForecastClient, ForecastRequest};
pub use conditions::{condition_icon, condition_text, ConditionIcon};
pub use error::ForecastError;
pub use hourly::{select_next_hours, HourSlot};
pub use normalize::{format_temperature, normalize};
pub use time::{corrected_last_updated, format_provider_time, parse_provider_time};

use serde::de::IgnoredAny;
use serde::Serialize;

/// A provider forecast document, kept as the exact text received
///
/// Construction only checks that the text is JSON; required fields are
/// checked by [`normalize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawForecast {
    body: String,
}

impl RawForecast {
    /// Wrap a response body, failing with `MalformedResponse` if it is not JSON
    pub fn parse(body: impl Into<String>) -> Result<Self, ForecastError> {
        let body = body.into();
        serde_json::from_str::<IgnoredAny>(&body)?;
        Ok(Self { body })
    }

    /// The document text as received from the provider
    pub fn body(&self) -> &str {
        &self.body
    }
}

/// Current conditions at the requested location
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrentConditions {
    /// Location name reported by the provider
    pub city: String,
    /// Corrected "last updated" time, `H:mm`
    pub last_updated: String,
    /// Current temperature, e.g. `21°`
    pub temperature: String,
    pub icon: ConditionIcon,
    /// English condition text, e.g. `Partly cloudy`
    pub condition: &'static str,
    /// Today's minimum temperature
    pub min_temperature: String,
    /// Today's maximum temperature
    pub max_temperature: String,
}

/// One row of the hourly forecast
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HourlyEntry {
    /// `HH:00`
    pub hour: String,
    pub icon: ConditionIcon,
    pub temperature: String,
}

/// One row of the daily forecast
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyEntry {
    /// ISO date as returned by the provider
    pub date: String,
    pub icon: ConditionIcon,
    pub min_temperature: String,
    pub max_temperature: String,
}

/// Everything derived from one forecast document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedForecast {
    pub current: CurrentConditions,
    /// Exactly 24 entries, starting with the hour after the provider's local hour
    pub hourly: Vec<HourlyEntry>,
    /// Exactly 3 entries: today, tomorrow, the day after
    pub daily: Vec<DailyEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_forecast_keeps_body_verbatim() {
        let body = "{ \"location\" : {\"name\": \"Moscow\"} }";
        let raw = RawForecast::parse(body).expect("valid JSON");
        assert_eq!(raw.body(), body);
    }

    #[test]
    fn test_raw_forecast_rejects_invalid_json() {
        let result = RawForecast::parse("{ invalid json }");
        assert!(matches!(result, Err(ForecastError::MalformedResponse(_))));
    }

    #[test]
    fn test_raw_forecast_rejects_empty_body() {
        assert!(RawForecast::parse("").is_err());
    }
}
