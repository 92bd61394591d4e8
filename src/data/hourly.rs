//! Selection of the next 24 hourly forecast slots
//!
//! The provider returns hours per forecast day. Starting after the provider's
//! current local hour, the window walks forward through day 0 and rolls over
//! into day 1 at midnight, exactly once.

use super::ForecastError;

/// Number of hourly entries shown
pub const HOURLY_WINDOW: usize = 24;

/// A position in the provider's per-day hourly arrays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HourSlot {
    /// Forecast day index (0 = today, 1 = tomorrow)
    pub day: usize,
    /// Hour of day, 0-23
    pub hour: u32,
}

impl HourSlot {
    /// Label for the slot, e.g. `"07:00"`
    pub fn label(&self) -> String {
        format!("{:02}:00", self.hour)
    }
}

/// Select the 24 slots following `local_hour`
///
/// `hours_per_day` holds the number of hourly records available for each
/// forecast day. Fails with [`ForecastError::MissingHour`] if a selected slot
/// is not covered, e.g. when day 1 is absent and the window rolls over.
pub fn select_next_hours(
    local_hour: u32,
    hours_per_day: &[usize],
) -> Result<Vec<HourSlot>, ForecastError> {
    if local_hour > 23 {
        return Err(ForecastError::MalformedResponse(format!(
            "local hour {} is out of range",
            local_hour
        )));
    }

    let mut slots = Vec::with_capacity(HOURLY_WINDOW);
    let mut day = 0;
    let mut hour = local_hour;

    for _ in 0..HOURLY_WINDOW {
        hour += 1;
        if hour == 24 {
            day = 1;
            hour = 0;
        }

        let available = hours_per_day.get(day).copied().unwrap_or(0);
        if hour as usize >= available {
            return Err(ForecastError::MissingHour { day, hour });
        }

        slots.push(HourSlot { day, hour });
    }

    Ok(slots)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const FULL: [usize; 2] = [24, 24];

    #[test]
    fn test_last_hour_of_day_starts_at_next_midnight() {
        let slots = select_next_hours(23, &FULL).unwrap();

        assert_eq!(slots[0], HourSlot { day: 1, hour: 0 });
        assert_eq!(slots[23], HourSlot { day: 1, hour: 23 });
        assert!(slots.iter().all(|slot| slot.day == 1));
    }

    #[test]
    fn test_midnight_walks_today_then_rolls_over() {
        let slots = select_next_hours(0, &FULL).unwrap();

        for (i, slot) in slots.iter().take(23).enumerate() {
            assert_eq!(*slot, HourSlot { day: 0, hour: i as u32 + 1 });
        }
        assert_eq!(slots[23], HourSlot { day: 1, hour: 0 });
    }

    #[test]
    fn test_every_start_hour_yields_24_distinct_slots() {
        for start in 0..24 {
            let slots = select_next_hours(start, &FULL).unwrap();
            assert_eq!(slots.len(), HOURLY_WINDOW);

            let unique: HashSet<HourSlot> = slots.iter().copied().collect();
            assert_eq!(unique.len(), HOURLY_WINDOW, "duplicates for start {}", start);

            let rollovers = slots.windows(2).filter(|w| w[0].day != w[1].day).count();
            assert!(rollovers <= 1, "more than one rollover for start {}", start);
        }
    }

    #[test]
    fn test_mid_day_rollover_position() {
        let slots = select_next_hours(14, &FULL).unwrap();

        assert_eq!(slots[0], HourSlot { day: 0, hour: 15 });
        assert_eq!(slots[8], HourSlot { day: 0, hour: 23 });
        assert_eq!(slots[9], HourSlot { day: 1, hour: 0 });
        assert_eq!(slots[23], HourSlot { day: 1, hour: 14 });
    }

    #[test]
    fn test_missing_next_day_fails_on_rollover() {
        let result = select_next_hours(23, &[24]);

        match result {
            Err(ForecastError::MissingHour { day, hour }) => {
                assert_eq!(day, 1);
                assert_eq!(hour, 0);
            }
            other => panic!("Expected MissingHour, got {:?}", other),
        }
    }

    #[test]
    fn test_short_day_fails_instead_of_truncating() {
        assert!(matches!(
            select_next_hours(10, &[24, 5]),
            Err(ForecastError::MissingHour { day: 1, hour: 5 })
        ));
    }

    #[test]
    fn test_out_of_range_hour_is_rejected() {
        assert!(matches!(
            select_next_hours(24, &FULL),
            Err(ForecastError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_label_is_zero_padded() {
        assert_eq!(HourSlot { day: 0, hour: 7 }.label(), "07:00");
        assert_eq!(HourSlot { day: 1, hour: 0 }.label(), "00:00");
        assert_eq!(HourSlot { day: 0, hour: 18 }.label(), "18:00");
    }
}
