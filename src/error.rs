//! Error types for the product report generator.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using the run-level error type.
pub type Result<T> = std::result::Result<T, ReportError>;

/// Run-level failures. Per-row validation failures are not errors at this
/// level; they are [`crate::record_parser::RejectReason`] values collected
/// alongside the valid products.
#[derive(Error, Debug)]
pub enum ReportError {
    /// The input source could not be opened, decoded or its header read.
    #[error("Error reading CSV source {}: {source}", path.display())]
    SourceRead {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Parsing finished without a single valid product.
    #[error("No valid products found in {} ({rejected} malformed row(s) skipped)", path.display())]
    EmptyResult { path: PathBuf, rejected: usize },

    /// Flag values that parsed but cannot be used.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Output directory or report file failures.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON export failures.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ReportError {
    /// Process exit code for this error.
    ///
    /// An empty result is a clean, reported outcome and gets its own code so
    /// scripts can tell it apart from a crash-like failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::EmptyResult { .. } => 2,
            _ => 1,
        }
    }
}
