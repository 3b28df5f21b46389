//! Analysis configuration
//!
//! Every window used by the pipeline lives here so a TOML file (or CLI flags)
//! can adjust them without touching the algorithms. Defaults reproduce the
//! standard two-hour postprandial protocol.

use anyhow::{Context, Result};
use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Upper bound for any configured window (one week)
const MAX_WINDOW_MINUTES: i64 = 7 * 24 * 60;

/// Tunable windows and thresholds for meal response analysis
///
/// # Example
/// ```
/// use glucoflow::config::AnalysisConfig;
///
/// let config = AnalysisConfig::default();
/// assert_eq!(config.merge_window_minutes, 60);
/// assert!(config.validate().is_ok());
/// ```
///
/// # Example TOML
/// ```toml
/// merge_window_minutes = 45
/// match_tolerance_minutes = 10
/// highlight_threshold_mmol = 8.5
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Notes within this many minutes of a group's first note join the group
    ///
    /// The window is anchored at the first note and never slides forward.
    pub merge_window_minutes: i64,

    /// Maximum distance between a target time and its matched reading
    pub match_tolerance_minutes: i64,

    /// Length of the peak search window after the latest note
    pub peak_window_minutes: i64,

    /// Offset after the latest note at which postprandial glucose is read
    pub postprandial_offset_minutes: i64,

    /// Readings this long after a meal's first note are excluded from fasting
    pub fasting_exclusion_minutes: i64,

    /// First hour of day (inclusive) counted as overnight
    pub overnight_start_hour: u32,

    /// Hour of day (exclusive) at which overnight ends
    pub overnight_end_hour: u32,

    /// Peak and postprandial values above this (mmol/L) are flagged in reports
    pub highlight_threshold_mmol: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            merge_window_minutes: 60,
            match_tolerance_minutes: 15,
            peak_window_minutes: 120,
            postprandial_offset_minutes: 120,
            fasting_exclusion_minutes: 120,
            overnight_start_hour: 0,
            overnight_end_hour: 6,
            highlight_threshold_mmol: 7.8,
        }
    }
}

impl AnalysisConfig {
    /// Load configuration from a TOML file; missing keys keep their defaults
    pub fn from_toml<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).with_context(|| {
            format!("Failed to read config file: {}", path.as_ref().display())
        })?;

        let config: Self = toml::from_str(&content).with_context(|| {
            format!("Failed to parse TOML config: {}", path.as_ref().display())
        })?;

        config
            .validate()
            .map_err(|e| anyhow::anyhow!("Invalid config {}: {}", path.as_ref().display(), e))?;

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        let windows = [
            ("merge_window_minutes", self.merge_window_minutes),
            ("peak_window_minutes", self.peak_window_minutes),
            ("postprandial_offset_minutes", self.postprandial_offset_minutes),
            ("fasting_exclusion_minutes", self.fasting_exclusion_minutes),
        ];
        for (name, minutes) in windows {
            if minutes <= 0 || minutes > MAX_WINDOW_MINUTES {
                return Err(format!(
                    "{} must be in 1..={}, got {}",
                    name, MAX_WINDOW_MINUTES, minutes
                ));
            }
        }

        if !(0..=MAX_WINDOW_MINUTES).contains(&self.match_tolerance_minutes) {
            return Err(format!(
                "match_tolerance_minutes must be in 0..={}, got {}",
                MAX_WINDOW_MINUTES, self.match_tolerance_minutes
            ));
        }

        if self.overnight_start_hour >= self.overnight_end_hour || self.overnight_end_hour > 24 {
            return Err(format!(
                "overnight hours must satisfy start < end <= 24, got {}..{}",
                self.overnight_start_hour, self.overnight_end_hour
            ));
        }

        if !self.highlight_threshold_mmol.is_finite() {
            return Err(format!(
                "highlight_threshold_mmol must be finite, got {}",
                self.highlight_threshold_mmol
            ));
        }

        Ok(())
    }

    pub fn merge_window(&self) -> Duration {
        Duration::minutes(self.merge_window_minutes)
    }

    pub fn match_tolerance(&self) -> Duration {
        Duration::minutes(self.match_tolerance_minutes)
    }

    pub fn peak_window(&self) -> Duration {
        Duration::minutes(self.peak_window_minutes)
    }

    pub fn postprandial_offset(&self) -> Duration {
        Duration::minutes(self.postprandial_offset_minutes)
    }

    pub fn fasting_exclusion(&self) -> Duration {
        Duration::minutes(self.fasting_exclusion_minutes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = AnalysisConfig::default();
        assert_eq!(config.match_tolerance(), Duration::minutes(15));
        assert_eq!(config.peak_window(), Duration::hours(2));
        assert_eq!(config.postprandial_offset(), Duration::hours(2));
        assert_eq!(config.fasting_exclusion(), Duration::hours(2));
        assert_eq!(config.overnight_start_hour, 0);
        assert_eq!(config.overnight_end_hour, 6);
        assert!(config.validate().is_ok());
    }

    #[test]
    #[allow(clippy::field_reassign_with_default)]
    fn test_invalid_merge_window() {
        let mut config = AnalysisConfig::default();
        config.merge_window_minutes = 0;
        let err = config.validate().unwrap_err();
        assert!(err.contains("merge_window_minutes"));
    }

    #[test]
    #[allow(clippy::field_reassign_with_default)]
    fn test_zero_tolerance_is_valid() {
        let mut config = AnalysisConfig::default();
        config.match_tolerance_minutes = 0;
        assert!(config.validate().is_ok());
    }

    #[test]
    #[allow(clippy::field_reassign_with_default)]
    fn test_invalid_overnight_hours() {
        let mut config = AnalysisConfig::default();
        config.overnight_start_hour = 6;
        config.overnight_end_hour = 6;
        assert!(config.validate().is_err());

        config.overnight_start_hour = 22;
        config.overnight_end_hour = 25;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_toml_partial_keeps_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "merge_window_minutes = 30").unwrap();
        writeln!(file, "highlight_threshold_mmol = 9.0").unwrap();

        let config = AnalysisConfig::from_toml(file.path()).unwrap();
        assert_eq!(config.merge_window_minutes, 30);
        assert_eq!(config.highlight_threshold_mmol, 9.0);
        assert_eq!(config.match_tolerance_minutes, 15);
    }

    #[test]
    fn test_from_toml_rejects_unknown_keys() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "merge_windw_minutes = 30").unwrap();
        assert!(AnalysisConfig::from_toml(file.path()).is_err());
    }

    #[test]
    fn test_from_toml_rejects_invalid_values() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "peak_window_minutes = -5").unwrap();
        let err = AnalysisConfig::from_toml(file.path()).unwrap_err();
        assert!(err.to_string().contains("peak_window_minutes"));
    }

    #[test]
    fn test_from_toml_missing_file() {
        assert!(AnalysisConfig::from_toml("/nonexistent/glucoflow.toml").is_err());
    }
}
