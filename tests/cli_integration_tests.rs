// CLI integration tests: batch processing, output formats, CSV export

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn data_dir_with_fixture() -> TempDir {
    let dir = TempDir::new().unwrap();
    let data = dir.path().join("data");
    fs::create_dir(&data).unwrap();
    fs::copy(fixture("libre_week.csv"), data.join("libre_week.csv")).unwrap();
    dir
}

// ============================================================================
// Text report
// ============================================================================

#[test]
fn test_text_report_for_explicit_file() {
    let mut cmd = Command::cargo_bin("glucoflow").unwrap();
    cmd.arg(fixture("libre_week.csv"));

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("=== libre_week.csv ==="))
        .stdout(predicate::str::contains("Time: 2024-03-01 08:02"))
        .stdout(predicate::str::contains("Note: breakfast | coffee"))
        .stdout(predicate::str::contains(
            "Initial Glucose: 5.0 mmol/L (90 mg/dL)",
        ))
        .stdout(predicate::str::contains(
            "Peak (2h): 8.9 mmol/L (160 mg/dL) ***",
        ))
        .stdout(predicate::str::contains(
            "Postprandial (2h): 7.4 mmol/L (133 mg/dL)\n",
        ))
        .stdout(predicate::str::contains("Delta: +2.4 mmol/L (+43 mg/dL)"))
        .stdout(predicate::str::contains("Note: afternoon cake"))
        .stdout(predicate::str::contains("SUMMARY STATISTICS"))
        .stdout(predicate::str::contains(
            "Average Overnight Glucose: 5.0 mmol/L (90 mg/dL)",
        ))
        .stdout(predicate::str::contains(
            "Average Fasting Glucose: 5.9 mmol/L (106 mg/dL)",
        ));
}

#[test]
fn test_default_data_dir_is_scanned() {
    let dir = data_dir_with_fixture();

    let mut cmd = Command::cargo_bin("glucoflow").unwrap();
    cmd.current_dir(dir.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("=== libre_week.csv ==="));
}

#[test]
fn test_empty_data_dir_reports_nothing_found() {
    let dir = TempDir::new().unwrap();

    let mut cmd = Command::cargo_bin("glucoflow").unwrap();
    cmd.arg("--data-dir").arg(dir.path());

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("No export files found"));
}

#[test]
fn test_missing_data_dir_fails() {
    let mut cmd = Command::cargo_bin("glucoflow").unwrap();
    cmd.arg("--data-dir").arg("/nonexistent/glucoflow-data");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read data directory"));
}

// ============================================================================
// Per-file error isolation
// ============================================================================

#[test]
fn test_bad_file_does_not_stop_batch() {
    let dir = data_dir_with_fixture();
    let data = dir.path().join("data");
    fs::write(
        data.join("aaa_broken.csv"),
        "meta\nDevice Timestamp,Historic Glucose mmol/L,Scan Glucose mmol/L,Notes\nyesterday,5.0,,\n",
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("glucoflow").unwrap();
    cmd.arg("--data-dir").arg(&data);

    cmd.assert()
        .success()
        .stderr(predicate::str::contains(
            "Error processing aaa_broken.csv: Invalid timestamp on line 3",
        ))
        .stdout(predicate::str::contains("=== libre_week.csv ==="))
        .stdout(predicate::str::contains("aaa_broken").not());
}

#[test]
fn test_missing_column_reported() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("export.csv");
    fs::write(&file, "meta\nDevice Timestamp,Notes\n").unwrap();

    let mut cmd = Command::cargo_bin("glucoflow").unwrap();
    cmd.arg(&file);

    cmd.assert().success().stderr(predicate::str::contains(
        "Error processing export.csv: Missing required column: Scan Glucose mmol/L",
    ));
}

// ============================================================================
// Machine-readable formats
// ============================================================================

#[test]
fn test_json_format() {
    let mut cmd = Command::cargo_bin("glucoflow").unwrap();
    cmd.arg("--format").arg("json").arg(fixture("libre_week.csv"));

    let output = cmd.assert().success().get_output().stdout.clone();
    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();

    assert_eq!(json["format"], "glucoflow-json-v1");
    let file = &json["files"][0];
    assert_eq!(file["readings"], 11);
    assert_eq!(file["meals"][0]["note"], "breakfast | coffee");
    assert_eq!(file["meals"][0]["peak"]["mmol_l"], 8.9);
    assert!(file["meals"][1]["initial"].is_null());
    assert_eq!(file["summary"]["avg_overnight"]["mmol_l"], 5.0);
}

#[test]
fn test_csv_format_to_stdout() {
    let mut cmd = Command::cargo_bin("glucoflow").unwrap();
    cmd.arg("--format").arg("csv").arg(fixture("libre_week.csv"));

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with(
            "Timestamp,Note,Initial Glucose (mmol/L),Initial Glucose (mg/dL)",
        ))
        .stdout(predicate::str::contains(
            "2024-03-01 08:02,breakfast | coffee,5.0,90.09,8.9,",
        ))
        .stdout(predicate::str::contains(",SUMMARY STATISTICS,"));
}

#[test]
fn test_csv_flag_saves_analysis() {
    let dir = data_dir_with_fixture();

    let mut cmd = Command::cargo_bin("glucoflow").unwrap();
    cmd.current_dir(dir.path()).arg("--csv");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("CSV output saved to:"));

    let saved = dir.path().join("output").join("libre_week_analysis.csv");
    let content = fs::read_to_string(saved).unwrap();
    assert!(content.starts_with("Timestamp,Note,"));
    assert!(content.contains("afternoon cake"));
    assert_eq!(content.lines().count(), 4);
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_merge_window_override_splits_meal() {
    let mut cmd = Command::cargo_bin("glucoflow").unwrap();
    cmd.arg("--merge-window")
        .arg("10")
        .arg(fixture("libre_week.csv"));

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Note: breakfast\n"))
        .stdout(predicate::str::contains("Note: coffee\n"));
}

#[test]
fn test_config_file_threshold() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("glucoflow.toml");
    fs::write(&config, "highlight_threshold_mmol = 9.5\n").unwrap();

    let mut cmd = Command::cargo_bin("glucoflow").unwrap();
    cmd.arg("--config").arg(&config).arg(fixture("libre_week.csv"));

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Peak (2h): 8.9 mmol/L (160 mg/dL)\n"));
}

#[test]
fn test_invalid_config_aborts() {
    let mut cmd = Command::cargo_bin("glucoflow").unwrap();
    cmd.arg("--tolerance")
        .arg("20000")
        .arg(fixture("libre_week.csv"));

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("match_tolerance_minutes"));
}
