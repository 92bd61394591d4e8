use thiserror::Error;

/// Errors that can occur when fetching or normalizing a forecast
#[derive(Debug, Error)]
pub enum ForecastError {
    /// The provider could not be reached (DNS, connect, timeout, body read)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The provider answered with a non-success status
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// The body is not JSON or lacks a required field
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// A provider timestamp does not match `yyyy-MM-dd H:mm`
    #[error("Invalid time format: {0}")]
    InvalidTimeFormat(String),

    /// The hourly window needs an hour the response does not contain
    #[error("No hourly data for forecast day {day}, hour {hour}")]
    MissingHour { day: usize, hour: u32 },
}

impl From<serde_json::Error> for ForecastError {
    fn from(err: serde_json::Error) -> Self {
        ForecastError::MalformedResponse(err.to_string())
    }
}
