//! Forecast normalization
//!
//! Turns one weatherapi.com forecast document into the current, hourly and
//! daily records shown to the user. The three records are always derived
//! together from the same document.

use chrono::{NaiveDateTime, Timelike};
use serde::{de, Deserialize, Deserializer};

use super::conditions::{condition_icon, condition_text};
use super::hourly::select_next_hours;
use super::time::{corrected_last_updated, format_provider_time, parse_provider_time};
use super::{
    CurrentConditions, DailyEntry, ForecastError, HourlyEntry, NormalizedForecast, RawForecast,
};

/// Number of forecast days shown in the daily list
pub const DAILY_WINDOW: usize = 3;

/// Characters of the corrected timestamp shown as "last updated" (`H:mm`)
const LAST_UPDATED_DISPLAY_LEN: usize = 5;

/// Normalize a raw forecast document
///
/// `device_now` is the device's local wall-clock time, used to re-anchor the
/// provider's "last updated" timestamp.
///
/// # Errors
/// * `MalformedResponse` - a required field is absent or has the wrong shape
/// * `InvalidTimeFormat` - `last_updated` or `localtime` is not `yyyy-MM-dd H:mm`
/// * `MissingHour` - the hourly window needs an hour the document lacks
pub fn normalize(
    raw: &RawForecast,
    device_now: NaiveDateTime,
) -> Result<NormalizedForecast, ForecastError> {
    let response: ApiResponse = serde_json::from_str(raw.body())?;
    let days = &response.forecast.forecastday;
    let local_time = parse_provider_time(&response.location.localtime)?;

    let current = current_conditions(&response, local_time, device_now)?;
    let hourly = hourly_entries(days, local_time.hour())?;
    let daily = daily_entries(days)?;

    Ok(NormalizedForecast {
        current,
        hourly,
        daily,
    })
}

/// Format a temperature as its integer part followed by a degree sign
///
/// Truncates toward zero, so 21.4 and 21.9 both read "21°".
pub fn format_temperature(celsius: f64) -> String {
    format!("{}°", celsius.trunc() as i64)
}

fn current_conditions(
    response: &ApiResponse,
    local_time: NaiveDateTime,
    device_now: NaiveDateTime,
) -> Result<CurrentConditions, ForecastError> {
    let current = &response.current;
    let today = forecast_day(&response.forecast.forecastday, 0)?;

    let last_updated = parse_provider_time(&current.last_updated)?;
    let corrected = format_provider_time(corrected_last_updated(
        last_updated,
        local_time,
        device_now,
    )?);
    let display_start = corrected.len().saturating_sub(LAST_UPDATED_DISPLAY_LEN);

    Ok(CurrentConditions {
        city: response.location.name.clone(),
        last_updated: corrected[display_start..].to_string(),
        temperature: format_temperature(current.temp_c),
        icon: condition_icon(current.condition.code, current.is_day),
        condition: condition_text(current.condition.code, current.is_day),
        min_temperature: format_temperature(today.day.mintemp_c),
        max_temperature: format_temperature(today.day.maxtemp_c),
    })
}

fn hourly_entries(days: &[ForecastDay], local_hour: u32) -> Result<Vec<HourlyEntry>, ForecastError> {
    // Today and tomorrow must carry an hour list; an absent tomorrow only
    // fails if the window rolls over into it
    let hours = days
        .iter()
        .take(2)
        .enumerate()
        .map(|(index, day)| {
            day.hour.as_deref().ok_or_else(|| {
                ForecastError::MalformedResponse(format!(
                    "missing field `forecast.forecastday[{}].hour`",
                    index
                ))
            })
        })
        .collect::<Result<Vec<&[HourRecord]>, ForecastError>>()?;
    let hours_per_day: Vec<usize> = hours.iter().map(|day| day.len()).collect();

    select_next_hours(local_hour, &hours_per_day)?
        .into_iter()
        .map(|slot| -> Result<HourlyEntry, ForecastError> {
            let record = hours
                .get(slot.day)
                .and_then(|day| day.get(slot.hour as usize))
                .ok_or(ForecastError::MissingHour {
                    day: slot.day,
                    hour: slot.hour,
                })?;

            Ok(HourlyEntry {
                hour: slot.label(),
                icon: condition_icon(record.condition.code, record.is_day),
                temperature: format_temperature(record.temp_c),
            })
        })
        .collect()
}

fn daily_entries(days: &[ForecastDay]) -> Result<Vec<DailyEntry>, ForecastError> {
    (0..DAILY_WINDOW)
        .map(|index| -> Result<DailyEntry, ForecastError> {
            let day = forecast_day(days, index)?;
            Ok(DailyEntry {
                date: day.date.clone(),
                // Daily summaries always use the daytime icon
                icon: condition_icon(day.day.condition.code, true),
                min_temperature: format_temperature(day.day.mintemp_c),
                max_temperature: format_temperature(day.day.maxtemp_c),
            })
        })
        .collect()
}

fn forecast_day(days: &[ForecastDay], index: usize) -> Result<&ForecastDay, ForecastError> {
    days.get(index).ok_or_else(|| {
        ForecastError::MalformedResponse(format!("missing field `forecast.forecastday[{}]`", index))
    })
}

/// weatherapi.com forecast document, restricted to the fields we read
#[derive(Debug, Deserialize)]
struct ApiResponse {
    location: Location,
    current: CurrentWeather,
    forecast: Forecast,
}

#[derive(Debug, Deserialize)]
struct Location {
    name: String,
    localtime: String,
}

#[derive(Debug, Deserialize)]
struct CurrentWeather {
    #[serde(deserialize_with = "lenient_f64")]
    temp_c: f64,
    #[serde(deserialize_with = "lenient_flag")]
    is_day: bool,
    last_updated: String,
    condition: Condition,
}

#[derive(Debug, Deserialize)]
struct Condition {
    #[serde(deserialize_with = "lenient_i64")]
    code: i64,
}

#[derive(Debug, Deserialize)]
struct Forecast {
    forecastday: Vec<ForecastDay>,
}

#[derive(Debug, Deserialize)]
struct ForecastDay {
    date: String,
    day: DaySummary,
    hour: Option<Vec<HourRecord>>,
}

#[derive(Debug, Deserialize)]
struct DaySummary {
    #[serde(deserialize_with = "lenient_f64")]
    mintemp_c: f64,
    #[serde(deserialize_with = "lenient_f64")]
    maxtemp_c: f64,
    condition: Condition,
}

#[derive(Debug, Deserialize)]
struct HourRecord {
    #[serde(deserialize_with = "lenient_f64")]
    temp_c: f64,
    #[serde(deserialize_with = "lenient_flag")]
    is_day: bool,
    condition: Condition,
}

/// Numeric fields arrive as JSON numbers, but older payloads quote them
#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

fn lenient_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    match NumberOrText::deserialize(deserializer)? {
        NumberOrText::Number(value) => Ok(value),
        NumberOrText::Text(text) => text
            .trim()
            .parse()
            .map_err(|_| de::Error::custom(format!("expected a number, found {:?}", text))),
    }
}

fn lenient_i64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    let value = lenient_f64(deserializer)?;
    if value.fract() != 0.0 {
        return Err(de::Error::custom(format!("expected an integer, found {}", value)));
    }
    Ok(value as i64)
}

fn lenient_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(lenient_i64(deserializer)? == 1)
}
