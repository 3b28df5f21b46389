//! JSON output format for meal response analyses
//!
//! Absent values serialize as `null` so consumers can tell "not available"
//! apart from a measured zero.

use serde::{Deserialize, Serialize};

use crate::batch::FileReport;
use crate::meal::MealMetrics;
use crate::summary::SummaryStats;

/// Analysis of one export file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonFileAnalysis {
    /// Input path as given
    pub file: String,
    /// Load error, if the file could not be analyzed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub readings: usize,
    pub meals: Vec<MealMetrics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<SummaryStats>,
}

/// Top-level JSON document for a batch run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonOutput {
    /// Format version identifier
    pub version: String,
    /// Format name
    pub format: String,
    pub files: Vec<JsonFileAnalysis>,
}

impl JsonOutput {
    /// Create a new JSON output structure
    pub fn new() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            format: "glucoflow-json-v1".to_string(),
            files: Vec::new(),
        }
    }

    /// Add a file report (successful or failed)
    pub fn add_report(&mut self, report: &FileReport) {
        let file = report.path.display().to_string();
        let entry = match &report.outcome {
            Ok(analysis) => JsonFileAnalysis {
                file,
                error: None,
                readings: analysis.reading_count,
                meals: analysis.records.clone(),
                summary: Some(analysis.summary.clone()),
            },
            Err(e) => JsonFileAnalysis {
                file,
                error: Some(e.to_string()),
                readings: 0,
                meals: Vec::new(),
                summary: None,
            },
        };
        self.files.push(entry);
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Default for JsonOutput {
    fn default() -> Self {
        Self::new()
    }
}
