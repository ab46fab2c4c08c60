//! # Product Catalog Summary Report
//!
//! Loads a product catalog CSV, skips malformed rows, and reports three
//! views of what is left: in-stock products above a minimum price, product
//! counts per category, and the most expensive products.
//!
//! ## Usage
//!
//! ```bash
//! # Default input (products.csv), reports written to the current directory
//! $ cargo run --release
//!
//! # Custom threshold, top count and output directory
//! $ cargo run --release -- catalog.csv --min-price 100 --top 3 -o reports
//!
//! # Count and rank only the filtered products
//! $ cargo run --release -- catalog.csv -m 100 --scope filtered
//! ```
//!
//! ## Generated Reports
//!
//! 1. `summary_report.txt` - Plain-text summary
//! 2. `summary_report.json` - Filtered products, category counts and top products
//! 3. `summary_report.html` - HTML version of the summary
//! 4. `[basename]_rejected_rows.log` - Skipped rows with reasons (only if any)
//!
//! If no row survives validation the run stops before aggregating and no
//! file is written.

use std::process;

use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::aggregator::aggregate;
use crate::cli::{Cli, usage_exit_code};
use crate::config::ReportConfig;
use crate::error::{ReportError, Result};
use crate::report_assembler::assemble;
use crate::report_writer::{
    WrittenReports, print_console_tables, print_saved_message, write_rejected_log_file,
    write_reports,
};
use crate::source::load_from_path;

/// What a finished run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub valid_rows: usize,
    pub rejected_rows: usize,
    pub written: WrittenReports,
}

/// Runs one load, aggregate, report pass.
///
/// # Errors
///
/// * [`ReportError::SourceRead`] - the input could not be read; nothing written
/// * [`ReportError::EmptyResult`] - no valid product; nothing written
/// * [`ReportError::Io`] / [`ReportError::Json`] - a report could not be written
pub fn run(config: &ReportConfig) -> Result<RunSummary> {
    info!(input = %config.input.display(), "Loading product catalog");
    debug!("Run configuration: {:?}", config);

    let outcome = load_from_path(&config.input, &config.source)?;
    info!(
        rows = outcome.rows_read(),
        valid = outcome.products.len(),
        rejected = outcome.rejected.len(),
        "Catalog loaded"
    );

    if outcome.products.is_empty() {
        return Err(ReportError::EmptyResult {
            path: config.input.clone(),
            rejected: outcome.rejected.len(),
        });
    }

    println!(
        "CSV successfully loaded: {} valid row(s), {} skipped.",
        outcome.products.len(),
        outcome.rejected.len()
    );

    let result = aggregate(&outcome.products, &config.aggregate);
    let report = assemble(&result, &config.aggregate, outcome.rejected.len());

    print_console_tables(&report);

    let mut written = write_reports(&report, &config.output_dir)?;
    written.rejected_log =
        write_rejected_log_file(&outcome.rejected, &config.input, &config.output_dir)?;

    print_saved_message(&written);

    Ok(RunSummary {
        valid_rows: outcome.products.len(),
        rejected_rows: outcome.rejected.len(),
        written,
    })
}

/// Installs the stderr log subscriber. `RUST_LOG` wins over `-v`.
fn init_logging(config: &ReportConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.log_level()));

    // A second install (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Main entry point for the product report generator.
///
/// Parses the command line, runs the report and maps failures to exit codes:
/// 2 when the catalog had no valid product, 1 for anything else (usage
/// errors included), 0 for `--help` and `--version`.
pub fn product_report_main() {
    let cli = Cli::try_parse().unwrap_or_else(|err| {
        // clap renders help/version to stdout and usage errors to stderr
        let _ = err.print();
        process::exit(usage_exit_code(&err));
    });

    let config = cli.into_config().unwrap_or_else(|err| {
        eprintln!("Error: {}", err);
        process::exit(err.exit_code());
    });

    init_logging(&config);

    if let Err(err) = run(&config) {
        match &err {
            ReportError::EmptyResult { .. } => {
                eprintln!("{}. Nothing to report; no files were written.", err);
            }
            _ => eprintln!("Error: {}", err),
        }
        process::exit(err.exit_code());
    }
}
