//! Per-meal glycemic response metrics
//!
//! Initial glucose is anchored at the meal's first note; peak and
//! postprandial are measured from its latest note. A meal with no reading near
//! its first note yields no record at all.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::AnalysisConfig;
use crate::merge::MealEvent;
use crate::reading::ReadingTable;
use crate::units::Glucose;
use crate::window::{glucose_at_offset, nearest_reading, peak_in_interval};

/// Response metrics for one meal event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealMetrics {
    /// First note timestamp of the meal
    pub timestamp: NaiveDateTime,
    pub note: String,
    pub initial: Option<Glucose>,
    pub peak: Option<Glucose>,
    pub postprandial: Option<Glucose>,
    /// Postprandial minus initial
    pub delta: Option<Glucose>,
}

impl MealMetrics {
    /// Build a record from mmol/L values, deriving delta and mg/dL
    pub fn from_mmol(
        timestamp: NaiveDateTime,
        note: impl Into<String>,
        initial: Option<f64>,
        peak: Option<f64>,
        postprandial: Option<f64>,
    ) -> Self {
        Self {
            timestamp,
            note: note.into(),
            initial: Glucose::from_optional(initial),
            peak: Glucose::from_optional(peak),
            postprandial: Glucose::from_optional(postprandial),
            delta: Glucose::from_optional(glucose_delta(initial, postprandial)),
        }
    }
}

/// `postprandial - initial` when both are present
pub fn glucose_delta(initial: Option<f64>, postprandial: Option<f64>) -> Option<f64> {
    match (initial, postprandial) {
        (Some(initial), Some(postprandial)) => Some(postprandial - initial),
        _ => None,
    }
}

/// Compute the metrics for a single meal
///
/// Returns `None` when no reading lies within tolerance of the meal's first
/// note. A reading that is found but carries no value keeps the record, with
/// `initial` (and therefore `delta`) absent.
pub fn meal_metrics(
    table: &ReadingTable,
    event: &MealEvent,
    config: &AnalysisConfig,
) -> Option<MealMetrics> {
    let anchor = nearest_reading(table, event.first_timestamp, config.match_tolerance())?;

    let peak = peak_in_interval(table, event.latest_timestamp, config.peak_window());
    let postprandial = glucose_at_offset(
        table,
        event.latest_timestamp,
        config.postprandial_offset(),
        config.match_tolerance(),
    );

    Some(MealMetrics::from_mmol(
        event.first_timestamp,
        event.text.clone(),
        anchor.glucose,
        peak,
        postprandial,
    ))
}

/// Compute metrics for every anchored meal, ordered by timestamp
pub fn all_meal_metrics(
    table: &ReadingTable,
    events: &[MealEvent],
    config: &AnalysisConfig,
) -> Vec<MealMetrics> {
    let mut records: Vec<MealMetrics> = events
        .iter()
        .filter_map(|event| {
            let record = meal_metrics(table, event, config);
            if record.is_none() {
                debug!(
                    "Dropping meal at {} ({:?}): no reading within {} min",
                    event.first_timestamp, event.text, config.match_tolerance_minutes
                );
            }
            record
        })
        .collect();

    records.sort_by_key(|r| r.timestamp);
    records
}
