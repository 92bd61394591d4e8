//! Provider timestamp handling
//!
//! weatherapi.com reports `last_updated` and `localtime` as naive wall-clock
//! strings (`2024-07-05 9:45`). The "last updated" shown to the user keeps the
//! provider's staleness interval but anchors it to the device clock.

use chrono::NaiveDateTime;

use super::ForecastError;

/// Pattern used for parsing provider timestamps; the hour may have one digit
const PROVIDER_PARSE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Pattern used for formatting, hour without zero padding (`H:mm`)
const PROVIDER_DISPLAY_FORMAT: &str = "%Y-%m-%d %-H:%M";

/// Parse a provider timestamp such as `2024-07-05 14:07` or `2024-07-05 9:07`
pub fn parse_provider_time(value: &str) -> Result<NaiveDateTime, ForecastError> {
    NaiveDateTime::parse_from_str(value.trim(), PROVIDER_PARSE_FORMAT)
        .map_err(|_| ForecastError::InvalidTimeFormat(value.to_string()))
}

/// Format a timestamp back to the provider's `yyyy-MM-dd H:mm` pattern
pub fn format_provider_time(time: NaiveDateTime) -> String {
    time.format(PROVIDER_DISPLAY_FORMAT).to_string()
}

/// Compute the "last updated" instant in device time
///
/// `device_now - (local_time - last_updated)`: the gap between the provider's
/// last refresh and its local time is preserved and re-anchored at `device_now`.
pub fn corrected_last_updated(
    last_updated: NaiveDateTime,
    local_time: NaiveDateTime,
    device_now: NaiveDateTime,
) -> Result<NaiveDateTime, ForecastError> {
    let staleness = local_time.signed_duration_since(last_updated);
    device_now.checked_sub_signed(staleness).ok_or_else(|| {
        ForecastError::InvalidTimeFormat(format!(
            "last updated {} is out of range",
            format_provider_time(last_updated)
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Timelike};

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 7, 5)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    #[test]
    fn test_parse_two_digit_hour() {
        assert_eq!(parse_provider_time("2024-07-05 14:07").unwrap(), at(14, 7));
    }

    #[test]
    fn test_parse_single_digit_hour() {
        let time = parse_provider_time("2024-07-05 9:05").unwrap();
        assert_eq!(time, at(9, 5));
        assert_eq!(time.hour(), 9);
    }

    #[test]
    fn test_parse_invalid() {
        assert!(parse_provider_time("2024-07-05T14:07").is_err());
        assert!(parse_provider_time("not a time").is_err());
        assert!(parse_provider_time("").is_err());

        match parse_provider_time("14:07") {
            Err(ForecastError::InvalidTimeFormat(value)) => assert_eq!(value, "14:07"),
            other => panic!("Expected InvalidTimeFormat, got {:?}", other),
        }
    }

    #[test]
    fn test_format_drops_hour_padding() {
        assert_eq!(format_provider_time(at(9, 5)), "2024-07-05 9:05");
        assert_eq!(format_provider_time(at(21, 30)), "2024-07-05 21:30");
    }

    #[test]
    fn test_device_clock_matching_provider_keeps_last_updated() {
        let last_updated = at(13, 45);
        let local_time = at(14, 7);

        let corrected = corrected_last_updated(last_updated, local_time, local_time).unwrap();
        assert_eq!(corrected, last_updated);
    }

    #[test]
    fn test_just_updated_equals_device_now() {
        let provider = at(14, 7);
        let device_now = at(17, 20);

        let corrected = corrected_last_updated(provider, provider, device_now).unwrap();
        assert_eq!(corrected, device_now);
    }

    #[test]
    fn test_staleness_is_reanchored_to_device_clock() {
        // Provider is three hours ahead of the device, data is 22 minutes old
        let corrected = corrected_last_updated(at(16, 45), at(17, 7), at(14, 7)).unwrap();
        assert_eq!(corrected, at(13, 45));
    }

    #[test]
    fn test_correction_crosses_midnight() {
        let device_now = NaiveDate::from_ymd_opt(2024, 7, 6)
            .unwrap()
            .and_hms_opt(0, 10, 0)
            .unwrap();

        let corrected = corrected_last_updated(at(23, 30), at(23, 50), device_now).unwrap();
        assert_eq!(format_provider_time(corrected), "2024-07-05 23:50");
    }
}
