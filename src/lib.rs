//! glucoflow - post-meal glucose response analysis for CGM exports
//!
//! This library loads continuous glucose monitor exports, merges meal notes
//! into meal events, and derives per-meal response metrics (initial, peak,
//! postprandial, delta) together with fasting and overnight baselines.
//!
//! ```
//! use glucoflow::{config::AnalysisConfig, loader::parse_export, summary::analyze};
//!
//! let data = "Glucose Data\n\
//!     Device Timestamp,Historic Glucose mmol/L,Scan Glucose mmol/L,Notes\n\
//!     01-03-2024 08:00,5.0,,breakfast\n\
//!     01-03-2024 10:00,7.2,,\n";
//! let export = parse_export(data.as_bytes())?;
//! let analysis = analyze(&export, &AnalysisConfig::default());
//! assert_eq!(analysis.records.len(), 1);
//! # Ok::<(), glucoflow::error::LoadError>(())
//! ```

pub mod baseline;
pub mod batch;
pub mod cli;
pub mod config;
pub mod csv_output;
pub mod error;
pub mod json_output;
pub mod loader;
pub mod meal;
pub mod merge;
pub mod reading;
pub mod summary;
pub mod text_output;
pub mod units;
pub mod window;
