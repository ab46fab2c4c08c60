//! Resolved settings for one run.

use std::path::PathBuf;

use crate::aggregator::AggregateOptions;
use crate::source::SourceOptions;

/// Plain values the pipeline consumes; built from [`crate::cli::Cli`].
#[derive(Debug, Clone, PartialEq)]
pub struct ReportConfig {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    pub aggregate: AggregateOptions,
    pub source: SourceOptions,
    pub verbosity: u8,
}

impl ReportConfig {
    /// Configuration for `input` with every other setting at its default.
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output_dir: PathBuf::from("."),
            aggregate: AggregateOptions::default(),
            source: SourceOptions::default(),
            verbosity: 0,
        }
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    pub fn with_aggregate(mut self, aggregate: AggregateOptions) -> Self {
        self.aggregate = aggregate;
        self
    }

    /// Default `tracing` filter directive for the verbosity level.
    pub fn log_level(&self) -> &'static str {
        match self.verbosity {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}
