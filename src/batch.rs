//! Batch processing over many export files
//!
//! Files are processed one at a time in path order. A file that fails to
//! load is reported and skipped; it never stops the files after it.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::config::AnalysisConfig;
use crate::error::LoadError;
use crate::loader::load_export;
use crate::summary::{analyze, Analysis};

/// Outcome of processing a single export file
#[derive(Debug)]
pub struct FileReport {
    pub path: PathBuf,
    pub outcome: std::result::Result<Analysis, LoadError>,
}

impl FileReport {
    /// File name for display, falling back to the full path
    pub fn display_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// Find every `.csv` file directly inside `dir`, sorted by path
pub fn discover_inputs<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to read data directory: {}", dir.display()))?;

    let mut inputs = Vec::new();
    for entry in entries {
        let path = entry
            .with_context(|| format!("Failed to list data directory: {}", dir.display()))?
            .path();
        let is_csv = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        if is_csv && path.is_file() {
            inputs.push(path);
        }
    }

    inputs.sort();
    Ok(inputs)
}

/// Load and analyze a single export file
pub fn process_file<P: AsRef<Path>>(
    path: P,
    config: &AnalysisConfig,
) -> std::result::Result<Analysis, LoadError> {
    let export = load_export(path)?;
    Ok(analyze(&export, config))
}

/// Process every input independently, one report per input in order
pub fn run_batch(inputs: &[PathBuf], config: &AnalysisConfig) -> Vec<FileReport> {
    info!("Processing {} export file(s)", inputs.len());

    inputs
        .iter()
        .map(|path| {
            let outcome = process_file(path, config);
            match &outcome {
                Ok(analysis) => info!(
                    "Processed {}: {} meal record(s) from {} reading(s)",
                    path.display(),
                    analysis.records.len(),
                    analysis.reading_count
                ),
                Err(e) => warn!("Failed to process {}: {}", path.display(), e),
            }
            FileReport {
                path: path.clone(),
                outcome,
            }
        })
        .collect()
}
