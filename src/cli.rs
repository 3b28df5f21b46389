//! CLI argument parsing for glucoflow

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for the stdout report
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format (default)
    Text,
    /// JSON format for machine parsing
    Json,
    /// CSV format for spreadsheet analysis
    Csv,
}

#[derive(Parser, Debug)]
#[command(name = "glucoflow")]
#[command(version)]
#[command(about = "Post-meal glucose response analysis for CGM exports", long_about = None)]
pub struct Cli {
    /// Export files to analyze (defaults to every *.csv in --data-dir)
    #[arg(value_name = "FILE")]
    pub inputs: Vec<PathBuf>,

    /// Directory scanned for exports when no files are given
    #[arg(long = "data-dir", value_name = "DIR", default_value = "data")]
    pub data_dir: PathBuf,

    /// Also save a CSV analysis per file into --output-dir
    #[arg(long = "csv")]
    pub save_csv: bool,

    /// Directory for saved CSV analyses
    #[arg(long = "output-dir", value_name = "DIR", default_value = "output")]
    pub output_dir: PathBuf,

    /// Output format (text, json or csv)
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Analysis configuration file (TOML)
    #[arg(short = 'c', long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Note merge window in minutes (overrides config)
    #[arg(long = "merge-window", value_name = "MINUTES")]
    pub merge_window: Option<i64>,

    /// Reading match tolerance in minutes (overrides config)
    #[arg(long = "tolerance", value_name = "MINUTES")]
    pub tolerance: Option<i64>,

    /// Enable debug tracing on stderr
    #[arg(long = "debug")]
    pub debug: bool,
}
