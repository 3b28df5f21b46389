//! Baseline glucose estimates: fasting and overnight averages

use chrono::{Duration, Timelike};

use crate::merge::MealEvent;
use crate::reading::{mean_present, ReadingTable};

/// Mean glucose of readings whose hour of day is in `[start_hour, end_hour)`
///
/// Hours are taken from the device-local timestamp. `None` when no reading in
/// that band carries a value.
pub fn overnight_average(table: &ReadingTable, start_hour: u32, end_hour: u32) -> Option<f64> {
    mean_present(
        table
            .iter()
            .filter(|r| (start_hour..end_hour).contains(&r.timestamp.hour()))
            .map(|r| r.glucose),
    )
}

/// Mean glucose of readings outside every meal exclusion window
///
/// Each event excludes `[first_timestamp, first_timestamp + exclusion]`.
/// Overlapping windows simply union.
pub fn fasting_average(
    table: &ReadingTable,
    events: &[MealEvent],
    exclusion: Duration,
) -> Option<f64> {
    let windows: Vec<_> = events
        .iter()
        .map(|e| (e.first_timestamp, e.first_timestamp + exclusion))
        .collect();

    mean_present(
        table
            .iter()
            .filter(|r| {
                !windows
                    .iter()
                    .any(|&(start, end)| r.timestamp >= start && r.timestamp <= end)
            })
            .map(|r| r.glucose),
    )
}
