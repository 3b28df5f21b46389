use anyhow::Result;
use clap::Parser;
use glucoflow::batch::{self, FileReport};
use glucoflow::cli::{Cli, OutputFormat};
use glucoflow::config::AnalysisConfig;
use glucoflow::csv_output::CsvReport;
use glucoflow::json_output::JsonOutput;
use glucoflow::text_output::TextReport;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Build the analysis config from the optional TOML file plus CLI overrides
fn load_config(args: &Cli) -> Result<AnalysisConfig> {
    let mut config = match &args.config {
        Some(path) => AnalysisConfig::from_toml(path)?,
        None => AnalysisConfig::default(),
    };

    if let Some(minutes) = args.merge_window {
        config.merge_window_minutes = minutes;
    }
    if let Some(minutes) = args.tolerance {
        config.match_tolerance_minutes = minutes;
    }

    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid configuration: {}", e))?;
    Ok(config)
}

/// Print per-file failures; they never abort the run
fn report_failures(reports: &[FileReport]) {
    for report in reports {
        if let Err(e) = &report.outcome {
            eprintln!("Error processing {}: {}", report.display_name(), e);
        }
    }
}

fn print_reports(args: &Cli, config: &AnalysisConfig, reports: &[FileReport]) -> Result<()> {
    match args.format {
        OutputFormat::Text => {
            let text = TextReport::new(config.highlight_threshold_mmol);
            for report in reports {
                if let Ok(analysis) = &report.outcome {
                    println!("=== {} ===", report.display_name());
                    print!("{}", text.format_analysis(analysis));
                }
            }
        }
        OutputFormat::Json => {
            let mut output = JsonOutput::new();
            for report in reports {
                output.add_report(report);
            }
            println!("{}", output.to_json()?);
        }
        OutputFormat::Csv => {
            for report in reports {
                if let Ok(analysis) = &report.outcome {
                    print!("{}", CsvReport::from_analysis(analysis).to_csv()?);
                }
            }
        }
    }
    Ok(())
}

fn save_csv_reports(args: &Cli, reports: &[FileReport]) {
    for report in reports {
        let Ok(analysis) = &report.outcome else {
            continue;
        };
        match CsvReport::from_analysis(analysis).save(&args.output_dir, &report.path) {
            Ok(path) if args.format == OutputFormat::Text => {
                println!("\nCSV output saved to: {}", path.display())
            }
            Ok(path) => eprintln!("CSV output saved to: {}", path.display()),
            Err(e) => eprintln!("Error processing {}: {:#}", report.display_name(), e),
        }
    }
}

fn main() -> Result<()> {
    let args = Cli::parse();

    // Initialize tracing if --debug flag is set
    init_tracing(args.debug);

    let config = load_config(&args)?;

    let inputs = if args.inputs.is_empty() {
        batch::discover_inputs(&args.data_dir)?
    } else {
        args.inputs.clone()
    };

    if inputs.is_empty() {
        eprintln!("No export files found in {}", args.data_dir.display());
        return Ok(());
    }

    let reports = batch::run_batch(&inputs, &config);

    report_failures(&reports);
    print_reports(&args, &config, &reports)?;

    if args.save_csv {
        save_csv_reports(&args, &reports);
    }

    Ok(())
}
