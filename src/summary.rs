//! Per-file analysis pipeline and summary statistics
//!
//! `analyze` is a pure function of the export and the config: no I/O and no
//! state shared between files.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::baseline::{fasting_average, overnight_average};
use crate::config::AnalysisConfig;
use crate::loader::Export;
use crate::meal::{all_meal_metrics, MealMetrics};
use crate::merge::merge_notes;
use crate::reading::mean_present;
use crate::units::Glucose;

/// Aggregate statistics for one export
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    pub avg_fasting: Option<Glucose>,
    pub avg_overnight: Option<Glucose>,
    pub avg_peak: Option<Glucose>,
    pub avg_postprandial: Option<Glucose>,
}

/// Complete result for one export
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    /// Meal records ordered by timestamp
    pub records: Vec<MealMetrics>,
    pub summary: SummaryStats,
    pub reading_count: usize,
    pub note_count: usize,
    /// Meal events after merging, including any dropped for lack of an anchor
    pub event_count: usize,
}

/// Run the full pipeline over a loaded export
pub fn analyze(export: &Export, config: &AnalysisConfig) -> Analysis {
    let table = &export.table;
    let events = merge_notes(&export.notes, config.merge_window());

    let avg_fasting = fasting_average(table, &events, config.fasting_exclusion());
    let avg_overnight = overnight_average(
        table,
        config.overnight_start_hour,
        config.overnight_end_hour,
    );

    let records = all_meal_metrics(table, &events, config);

    let avg_peak = mean_present(records.iter().map(|r| r.peak.map(|g| g.mmol_l)));
    let avg_postprandial =
        mean_present(records.iter().map(|r| r.postprandial.map(|g| g.mmol_l)));

    debug!(
        readings = table.len(),
        notes = export.notes.len(),
        events = events.len(),
        records = records.len(),
        "Analysis complete"
    );

    Analysis {
        summary: SummaryStats {
            avg_fasting: Glucose::from_optional(avg_fasting),
            avg_overnight: Glucose::from_optional(avg_overnight),
            avg_peak: Glucose::from_optional(avg_peak),
            avg_postprandial: Glucose::from_optional(avg_postprandial),
        },
        reading_count: table.len(),
        note_count: export.notes.len(),
        event_count: events.len(),
        records,
    }
}
