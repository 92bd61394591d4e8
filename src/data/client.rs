//! weatherapi.com forecast client
//!
//! Issues a single `forecast.json` request per call and returns the body as a
//! [`RawForecast`]. There is no retry; callers decide whether to ask again.

use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::{ForecastError, RawForecast};

/// Base URL for the weatherapi.com API
const WEATHER_API_BASE_URL: &str = "https://api.weatherapi.com/v1";

/// Location used when none is given
pub const DEFAULT_QUERY: &str = "Moscow";

/// Forecast days requested by default
pub const DEFAULT_DAYS: u8 = 3;

/// Parameters of a forecast request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForecastRequest {
    /// Location name or `"latitude,longitude"`
    pub query: String,
    /// Number of forecast days to request
    pub days: u8,
    /// Ask the provider for air quality data (`aqi=yes`)
    pub include_air_quality: bool,
    /// Ask the provider for weather alerts (`alerts=yes`)
    pub include_alerts: bool,
}

impl Default for ForecastRequest {
    fn default() -> Self {
        Self {
            query: DEFAULT_QUERY.to_string(),
            days: DEFAULT_DAYS,
            include_air_quality: false,
            include_alerts: false,
        }
    }
}

impl ForecastRequest {
    /// Create a request for the given location with default options
    pub fn for_query(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    /// Query string pairs, without the API key
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("q", self.query.clone()),
            ("days", self.days.to_string()),
            ("aqi", yes_no(self.include_air_quality).to_string()),
            ("alerts", yes_no(self.include_alerts).to_string()),
        ]
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

/// Client for fetching forecasts from weatherapi.com
#[derive(Debug, Clone)]
pub struct ForecastClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl ForecastClient {
    /// Create a new ForecastClient for the given API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: WEATHER_API_BASE_URL.to_string(),
        }
    }

    /// Point the client at a different API root (mock servers, proxies)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Fetch the forecast document for a request
    ///
    /// # Returns
    /// * `Ok(RawForecast)` - The response body, validated as JSON
    /// * `Err(ForecastError::Network)` - The provider could not be reached
    /// * `Err(ForecastError::Http)` - The provider answered with a non-2xx status
    /// * `Err(ForecastError::MalformedResponse)` - The body is not JSON
    pub async fn fetch(&self, request: &ForecastRequest) -> Result<RawForecast, ForecastError> {
        let url = format!("{}/forecast.json", self.base_url.trim_end_matches('/'));
        debug!(url = %url, query = %request.query, days = request.days, "requesting forecast");

        let response = self
            .client
            .get(&url)
            .query(&[("key", self.api_key.as_str())])
            .query(&request.query_pairs())
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        debug!(status = status.as_u16(), bytes = body.len(), "forecast response received");

        if !status.is_success() {
            let message = provider_error_message(&body).unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("unexpected status")
                    .to_string()
            });
            return Err(ForecastError::Http {
                status: status.as_u16(),
                message,
            });
        }

        RawForecast::parse(body)
    }
}

/// Error body returned by weatherapi.com, e.g. for an unknown location
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

fn provider_error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .map(|body| body.error.message)
}
