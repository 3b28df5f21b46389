//! CGM export loader
//!
//! Export layout:
//! - line 1: device metadata (ignored)
//! - line 2: header row
//! - remaining lines: one sample per row
//!
//! Only four columns are used; everything else in the export is ignored.

use chrono::{Datelike, NaiveDateTime};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use crate::error::{LoadError, Result};
use crate::reading::{RawNote, Reading, ReadingTable};

pub const TIMESTAMP_COLUMN: &str = "Device Timestamp";
pub const SCAN_GLUCOSE_COLUMN: &str = "Scan Glucose mmol/L";
pub const HISTORIC_GLUCOSE_COLUMN: &str = "Historic Glucose mmol/L";
pub const NOTES_COLUMN: &str = "Notes";

/// Device timestamp format (day-month-year, 24h clock)
pub const TIMESTAMP_FORMAT: &str = "%d-%m-%Y %H:%M";

/// Accepted calendar years; keeps every window bound inside chrono's range
pub const MIN_YEAR: i32 = 1;
pub const MAX_YEAR: i32 = 9999;

/// Parsed contents of one export file
#[derive(Debug, Clone, Default)]
pub struct Export {
    pub table: ReadingTable,
    /// Annotated rows in file order
    pub notes: Vec<RawNote>,
}

/// Column positions resolved from the header row
#[derive(Debug, Clone, Copy)]
struct Columns {
    timestamp: usize,
    scan: usize,
    historic: usize,
    notes: usize,
}

impl Columns {
    fn resolve(headers: &csv::StringRecord) -> Result<Self> {
        let find = |name: &'static str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or(LoadError::MissingColumn(name))
        };

        Ok(Self {
            timestamp: find(TIMESTAMP_COLUMN)?,
            scan: find(SCAN_GLUCOSE_COLUMN)?,
            historic: find(HISTORIC_GLUCOSE_COLUMN)?,
            notes: find(NOTES_COLUMN)?,
        })
    }
}

/// Load an export file from disk
pub fn load_export<P: AsRef<Path>>(path: P) -> Result<Export> {
    let file = File::open(path.as_ref())?;
    parse_export(file)
}

/// Parse an export from any reader
pub fn parse_export<R: Read>(reader: R) -> Result<Export> {
    let mut reader = BufReader::new(reader);

    let mut metadata = String::new();
    if reader.read_line(&mut metadata)? == 0 {
        return Err(LoadError::MissingHeader);
    }

    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    if headers.is_empty() {
        return Err(LoadError::MissingHeader);
    }
    let columns = Columns::resolve(&headers)?;

    let mut readings = Vec::new();
    let mut notes = Vec::new();

    for record in csv_reader.records() {
        let record = record?;
        // +1 for the skipped metadata line
        let line = record.position().map_or(0, |p| p.line() + 1);

        let timestamp = parse_timestamp(cell(&record, columns.timestamp), line)?;
        let scan = parse_glucose(cell(&record, columns.scan), SCAN_GLUCOSE_COLUMN, line)?;
        let historic = parse_glucose(
            cell(&record, columns.historic),
            HISTORIC_GLUCOSE_COLUMN,
            line,
        )?;
        let glucose = scan.or(historic);

        let text = cell(&record, columns.notes).trim();
        if !text.is_empty() {
            notes.push(RawNote::new(timestamp, text, glucose));
        }
        readings.push(Reading::new(timestamp, glucose));
    }

    Ok(Export {
        table: ReadingTable::new(readings),
        notes,
    })
}

/// Cell contents, empty for short rows
fn cell(record: &csv::StringRecord, index: usize) -> &str {
    record.get(index).unwrap_or("")
}

fn parse_timestamp(value: &str, line: u64) -> Result<NaiveDateTime> {
    let invalid = || LoadError::InvalidTimestamp {
        line,
        value: value.to_string(),
    };

    let timestamp =
        NaiveDateTime::parse_from_str(value.trim(), TIMESTAMP_FORMAT).map_err(|_| invalid())?;
    if !(MIN_YEAR..=MAX_YEAR).contains(&timestamp.year()) {
        return Err(invalid());
    }
    Ok(timestamp)
}

fn parse_glucose(value: &str, column: &'static str, line: u64) -> Result<Option<f64>> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }

    match value.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(Some(v)),
        _ => Err(LoadError::InvalidGlucose {
            line,
            column,
            value: value.to_string(),
        }),
    }
}
