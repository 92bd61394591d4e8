//! Plain-text rendering of a forecast snapshot

use std::fmt;

use chrono::NaiveDate;

use crate::refresh::{ForecastSnapshot, SnapshotSource};

/// Renders a snapshot as the text report printed by the CLI
pub fn render(snapshot: &ForecastSnapshot) -> String {
    Report(snapshot).to_string()
}

/// Text report over a borrowed snapshot
struct Report<'a>(&'a ForecastSnapshot);

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let snapshot = self.0;
        let current = &snapshot.forecast.current;

        writeln!(f, "{}", current.city)?;
        writeln!(
            f,
            "Updated {}{}",
            current.last_updated.trim_start(),
            match snapshot.source {
                SnapshotSource::Cache => " (cached)",
                SnapshotSource::Network => "",
            }
        )?;
        writeln!(
            f,
            "{} {}  {}  {}/{}",
            current.icon.glyph(),
            current.temperature,
            current.condition,
            current.min_temperature,
            current.max_temperature
        )?;

        writeln!(f, "\nNext 24 hours")?;
        for entry in &snapshot.forecast.hourly {
            writeln!(f, "  {}  {}  {:>4}", entry.hour, entry.icon.glyph(), entry.temperature)?;
        }

        writeln!(f, "\nNext 3 days")?;
        for entry in &snapshot.forecast.daily {
            writeln!(
                f,
                "  {}  {}  {}/{}",
                day_label(&entry.date),
                entry.icon.glyph(),
                entry.min_temperature,
                entry.max_temperature
            )?;
        }

        Ok(())
    }
}

/// `2024-07-05` -> `05.07`; anything unparseable is shown as-is
fn day_label(date: &str) -> String {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map(|d| d.format("%d.%m").to_string())
        .unwrap_or_else(|_| date.to_string())
}
