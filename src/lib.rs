//! Product catalog summary reports.
//!
//! - [`record_parser`]: raw row to validated [`record_parser::Product`]
//! - [`aggregator`]: stock/price filter, category counts, top-N
//! - [`report_assembler`]: tables, text, HTML and JSON export
//! - [`source`] / [`report_writer`]: reading the CSV, writing the reports
//! - [`product_report`]: the run itself

pub mod aggregator;
pub mod cli;
pub mod config;
pub mod error;
pub mod product_report;
pub mod record_parser;
pub mod report_assembler;
pub mod report_writer;
pub mod source;

pub use config::ReportConfig;
pub use error::{ReportError, Result};
pub use product_report::{RunSummary, product_report_main, run};
