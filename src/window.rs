//! Windowed lookups over a reading table
//!
//! All intervals are inclusive at both ends.

use chrono::{Duration, NaiveDateTime};

use crate::reading::{Reading, ReadingTable};

/// Reading closest to `target` within `[target - tolerance, target + tolerance]`
///
/// Ties on distance go to the reading that appears first in the table. A
/// reading without a glucose value can still be the closest one; callers
/// decide what an absent value means for them.
pub fn nearest_reading(
    table: &ReadingTable,
    target: NaiveDateTime,
    tolerance: Duration,
) -> Option<&Reading> {
    let mut best: Option<(&Reading, Duration)> = None;

    for reading in table.between(target - tolerance, target + tolerance) {
        let offset = reading.timestamp - target;
        let distance = if offset < Duration::zero() { -offset } else { offset };
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((reading, distance)),
        }
    }

    best.map(|(reading, _)| reading)
}

/// Maximum glucose in `[start, start + duration]`, `None` if no value present
pub fn peak_in_interval(
    table: &ReadingTable,
    start: NaiveDateTime,
    duration: Duration,
) -> Option<f64> {
    table
        .between(start, start + duration)
        .filter_map(|r| r.glucose)
        .fold(None, |peak: Option<f64>, v| Some(peak.map_or(v, |p| p.max(v))))
}

/// Glucose of the reading nearest to `start + offset`
///
/// Absent when no reading is within tolerance or the nearest one has no value.
pub fn glucose_at_offset(
    table: &ReadingTable,
    start: NaiveDateTime,
    offset: Duration,
    tolerance: Duration,
) -> Option<f64> {
    nearest_reading(table, start + offset, tolerance).and_then(|r| r.glucose)
}
