//! Reads the catalog source row by row and splits it into valid products
//! and rejected rows.
//!
//! Rows are validated as they stream past; nothing is aggregated here. A
//! transport-level failure (unreadable file, invalid UTF-8, broken header)
//! stops the load. A row that merely fails validation never does.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::{debug, warn};

use crate::error::{ReportError, Result};
use crate::record_parser::{ColumnNames, Product, RawRow, RejectedRow, parse};

/// How the delimited source is laid out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceOptions {
    pub delimiter: u8,
    pub columns: ColumnNames,
}

impl Default for SourceOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            columns: ColumnNames::default(),
        }
    }
}

/// The partitioned input of one run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadOutcome {
    pub products: Vec<Product>,
    pub rejected: Vec<RejectedRow>,
}

impl LoadOutcome {
    /// Number of data rows read, header excluded.
    pub fn rows_read(&self) -> usize {
        self.products.len() + self.rejected.len()
    }
}

/// Opens `path` and loads it with [`load_from_reader`].
///
/// # Arguments
///
/// * `path` - Path to the catalog CSV
/// * `options` - Delimiter and column names of the catalog
///
/// # Returns
///
/// * `Result<LoadOutcome>` - Valid products and rejected rows, or
///   [`ReportError::SourceRead`] if the file cannot be opened or decoded
pub fn load_from_path(path: impl AsRef<Path>, options: &SourceOptions) -> Result<LoadOutcome> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| ReportError::SourceRead {
        path: path.to_path_buf(),
        source: csv::Error::from(e),
    })?;
    load_from_reader(file, options).map_err(|source| ReportError::SourceRead {
        path: path.to_path_buf(),
        source,
    })
}

/// Streams every record of `reader` through the record parser.
///
/// Rows with fewer or more fields than the header are accepted; a missing
/// field simply fails validation for that row. Only header names are
/// trimmed: field values reach the parser, and the rejected-rows log,
/// exactly as written.
pub fn load_from_reader<R: Read>(
    reader: R,
    options: &SourceOptions,
) -> std::result::Result<LoadOutcome, csv::Error> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .delimiter(options.delimiter)
        .trim(Trim::Headers)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    debug!("CSV headers: {:?}", headers);

    let mut outcome = LoadOutcome::default();

    for (row_index, result) in csv_reader.records().enumerate() {
        let record = result?;
        let raw = raw_row(&headers, &record);

        match parse(&raw, &options.columns) {
            Ok(product) => outcome.products.push(product),
            Err(reason) => {
                // header is line 1, so the first data row is line 2
                warn!(line = row_index + 2, %reason, "Skipping malformed row");
                outcome.rejected.push(RejectedRow { raw, reason });
            }
        }
    }

    debug!(
        valid = outcome.products.len(),
        rejected = outcome.rejected.len(),
        "Finished reading source"
    );
    Ok(outcome)
}

fn raw_row(headers: &StringRecord, record: &StringRecord) -> RawRow {
    let mut raw: RawRow = headers
        .iter()
        .enumerate()
        .filter_map(|(idx, header)| record.get(idx).map(|value| (header, value)))
        .collect();

    // Extra trailing fields have no header; keep them so the log shows the
    // row as it was read.
    for (idx, value) in record.iter().enumerate().skip(headers.len()) {
        raw.push(format!("_{}", idx + 1), value);
    }
    raw
}
