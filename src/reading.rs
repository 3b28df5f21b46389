//! Reading table: the in-memory glucose time series for one export
//!
//! Readings keep file row order. Nothing here sorts or mutates them after
//! construction; the window queries rely on row order for tie-breaking.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A single monitor sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// Device-local timestamp (minute resolution)
    pub timestamp: NaiveDateTime,
    /// Scan glucose if recorded, otherwise historic glucose (mmol/L)
    pub glucose: Option<f64>,
}

impl Reading {
    pub fn new(timestamp: NaiveDateTime, glucose: Option<f64>) -> Self {
        Self { timestamp, glucose }
    }
}

/// A reading that also carries operator-entered annotation text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawNote {
    pub timestamp: NaiveDateTime,
    pub text: String,
    /// Glucose recorded on the annotated row, if any
    pub glucose: Option<f64>,
}

impl RawNote {
    pub fn new(timestamp: NaiveDateTime, text: impl Into<String>, glucose: Option<f64>) -> Self {
        Self {
            timestamp,
            text: text.into(),
            glucose,
        }
    }
}

/// Immutable glucose time series in file row order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReadingTable {
    readings: Vec<Reading>,
}

impl ReadingTable {
    pub fn new(readings: Vec<Reading>) -> Self {
        Self { readings }
    }

    pub fn readings(&self) -> &[Reading] {
        &self.readings
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Reading> {
        self.readings.iter()
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    /// Readings with `start <= timestamp <= end`, in row order
    pub fn between(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> impl Iterator<Item = &Reading> + '_ {
        self.readings
            .iter()
            .filter(move |r| r.timestamp >= start && r.timestamp <= end)
    }
}

impl FromIterator<Reading> for ReadingTable {
    fn from_iter<I: IntoIterator<Item = Reading>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Arithmetic mean of the present values, `None` when nothing is present
pub fn mean_present<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = Option<f64>>,
{
    let (sum, count) = values
        .into_iter()
        .flatten()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));

    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}
