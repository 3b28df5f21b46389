//! CSV export of meal records with a summary footer row
//!
//! Absent values become empty cells. The footer row reuses the meal columns:
//! fasting goes under "Initial Glucose", and the average peak and
//! postprandial go under their own columns.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::meal::MealMetrics;
use crate::summary::{Analysis, SummaryStats};
use crate::units::Glucose;

/// Label placed in the note column of the footer row
pub const SUMMARY_LABEL: &str = "SUMMARY STATISTICS";

/// Timestamp format used in exported rows
pub const EXPORT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

const HEADERS: [&str; 12] = [
    "Timestamp",
    "Note",
    "Initial Glucose (mmol/L)",
    "Initial Glucose (mg/dL)",
    "Peak (mmol/L)",
    "Peak (mg/dL)",
    "Postprandial (mmol/L)",
    "Postprandial (mg/dL)",
    "Delta (mmol/L)",
    "Delta (mg/dL)",
    "Overnight Glucose (mmol/L)",
    "Overnight Glucose (mg/dL)",
];

/// CSV report formatter
#[derive(Debug, Default)]
pub struct CsvReport {
    records: Vec<MealMetrics>,
    summary: SummaryStats,
}

impl CsvReport {
    pub fn new(summary: SummaryStats) -> Self {
        Self {
            records: Vec::new(),
            summary,
        }
    }

    pub fn from_analysis(analysis: &Analysis) -> Self {
        Self {
            records: analysis.records.clone(),
            summary: analysis.summary.clone(),
        }
    }

    pub fn add_record(&mut self, record: MealMetrics) {
        self.records.push(record);
    }

    /// Shortest round-trip form; whole values keep their decimal point (`5.0`)
    fn number_cell(value: f64) -> String {
        format!("{:?}", value)
    }

    /// Both unit cells for an optional value
    fn glucose_cells(value: Option<Glucose>) -> [String; 2] {
        match value {
            Some(g) => [Self::number_cell(g.mmol_l), Self::number_cell(g.mg_dl)],
            None => [String::new(), String::new()],
        }
    }

    fn record_row(record: &MealMetrics) -> Vec<String> {
        let mut row = vec![
            record.timestamp.format(EXPORT_TIMESTAMP_FORMAT).to_string(),
            record.note.clone(),
        ];
        for value in [
            record.initial,
            record.peak,
            record.postprandial,
            record.delta,
            None,
        ] {
            row.extend(Self::glucose_cells(value));
        }
        row
    }

    fn summary_row(&self) -> Vec<String> {
        let s = &self.summary;
        let mut row = vec![String::new(), SUMMARY_LABEL.to_string()];
        row.extend(Self::glucose_cells(s.avg_fasting));
        row.extend(Self::glucose_cells(s.avg_peak));
        row.extend(Self::glucose_cells(s.avg_postprandial));
        row.extend(Self::glucose_cells(None));
        row.extend(Self::glucose_cells(s.avg_overnight));
        row
    }

    /// Generate CSV output as string
    pub fn to_csv(&self) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(HEADERS)?;
        for record in &self.records {
            writer.write_record(Self::record_row(record))?;
        }
        writer.write_record(self.summary_row())?;

        let bytes = writer
            .into_inner()
            .map_err(|e| anyhow::anyhow!("Failed to flush CSV writer: {}", e))?;
        Ok(String::from_utf8(bytes)?)
    }

    /// Write `<output_dir>/<stem>_analysis.csv`, creating the directory
    pub fn save(&self, output_dir: &Path, input: &Path) -> Result<PathBuf> {
        fs::create_dir_all(output_dir).with_context(|| {
            format!("Failed to create output directory: {}", output_dir.display())
        })?;

        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "export".to_string());
        let path = output_dir.join(format!("{}_analysis.csv", stem));

        fs::write(&path, self.to_csv()?)
            .with_context(|| format!("Failed to write CSV output: {}", path.display()))?;
        Ok(path)
    }
}
