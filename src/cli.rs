//! Command-line flags.

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};

use crate::aggregator::{AggregateOptions, ReferenceSet};
use crate::config::ReportConfig;
use crate::error::{ReportError, Result};
use crate::record_parser::ColumnNames;
use crate::source::SourceOptions;

/// Summarize a product catalog CSV into console tables and text/JSON/HTML reports
#[derive(Debug, Parser)]
#[command(name = "product_report_rust", version)]
pub struct Cli {
    /// Path to the product catalog CSV
    #[arg(default_value = "products.csv", env = "PRODUCT_REPORT_INPUT")]
    pub input: PathBuf,

    /// Minimum price filter for in-stock products (exclusive)
    #[arg(
        short,
        long,
        default_value_t = 0.0,
        allow_negative_numbers = true,
        env = "PRODUCT_REPORT_MIN_PRICE"
    )]
    pub min_price: f64,

    /// Number of top expensive products to display
    #[arg(
        short,
        long,
        default_value_t = 5,
        allow_negative_numbers = true,
        env = "PRODUCT_REPORT_TOP"
    )]
    pub top: i64,

    /// Products counted per category and ranked for the top list
    #[arg(long, value_enum, default_value_t = Scope::All, env = "PRODUCT_REPORT_SCOPE")]
    pub scope: Scope,

    /// Directory the report files are written to (created if missing)
    #[arg(short, long, default_value = ".", env = "PRODUCT_REPORT_OUTPUT_DIR")]
    pub output_dir: PathBuf,

    /// Field delimiter of the source file
    #[arg(long, default_value = ",")]
    pub delimiter: String,

    /// Header of the product name column
    #[arg(long, default_value = "ProductName")]
    pub name_column: String,

    /// Header of the price column
    #[arg(long, default_value = "Price")]
    pub price_column: String,

    /// Header of the category column
    #[arg(long, default_value = "Category")]
    pub category_column: String,

    /// Header of the in-stock column
    #[arg(long, default_value = "InStock")]
    pub stock_column: String,

    /// Log more detail to stderr (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Scope {
    /// Every valid product
    All,
    /// Only in-stock products above the minimum price
    Filtered,
}

impl From<Scope> for ReferenceSet {
    fn from(scope: Scope) -> Self {
        match scope {
            Scope::All => ReferenceSet::All,
            Scope::Filtered => ReferenceSet::Filtered,
        }
    }
}

/// Exit code for a command line that did not parse into [`Cli`].
///
/// `--help` and `--version` exit with 0 and usage errors with 1; clap's own
/// default of 2 is the empty-catalog code.
pub fn usage_exit_code(err: &clap::Error) -> i32 {
    if err.use_stderr() { 1 } else { 0 }
}

impl Cli {
    /// Checks the flag values and turns them into a run configuration.
    pub fn into_config(self) -> Result<ReportConfig> {
        if !self.min_price.is_finite() {
            return Err(ReportError::InvalidConfig(format!(
                "--min-price must be a finite number, got {}",
                self.min_price
            )));
        }

        let delimiter = match self.delimiter.as_bytes() {
            [byte] => *byte,
            _ => {
                return Err(ReportError::InvalidConfig(format!(
                    "--delimiter must be a single byte, got {:?}",
                    self.delimiter
                )));
            }
        };

        // A non-positive count asks for an empty top list.
        let top = usize::try_from(self.top).unwrap_or(0);

        Ok(ReportConfig {
            input: self.input,
            output_dir: self.output_dir,
            aggregate: AggregateOptions {
                min_price: self.min_price,
                top,
                reference_set: self.scope.into(),
            },
            source: SourceOptions {
                delimiter,
                columns: ColumnNames {
                    name: self.name_column,
                    price: self.price_column,
                    category: self.category_column,
                    in_stock: self.stock_column,
                },
            },
            verbosity: self.verbose,
        })
    }
}
