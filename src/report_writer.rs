//! Console printing and report files.
//!
//! Every file is created (or truncated) once per run:
//!
//! 1. `summary_report.txt` - plain-text summary with fixed section headers
//! 2. `summary_report.json` - the three views as a JSON object
//! 3. `summary_report.html` - the summary as a simple HTML page
//! 4. `[basename]_rejected_rows.log` - one line per skipped row, only when
//!    rows were skipped

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::Result;
use crate::record_parser::RejectedRow;
use crate::report_assembler::{ConsoleTable, Report};

pub const TEXT_REPORT_FILE: &str = "summary_report.txt";
pub const JSON_REPORT_FILE: &str = "summary_report.json";
pub const HTML_REPORT_FILE: &str = "summary_report.html";

/// Paths written by one run, in the order they were written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WrittenReports {
    pub text: PathBuf,
    pub json: PathBuf,
    pub html: PathBuf,
    pub rejected_log: Option<PathBuf>,
}

impl WrittenReports {
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        [&self.text, &self.json, &self.html]
            .into_iter()
            .map(PathBuf::as_path)
            .chain(self.rejected_log.as_deref())
    }
}

/// Renders a table with fixed-width, left-aligned columns.
pub fn format_table(table: &ConsoleTable) -> String {
    let column_count = table
        .rows
        .iter()
        .map(Vec::len)
        .chain(std::iter::once(table.header.len()))
        .max()
        .unwrap_or(0);

    let mut widths = vec![0usize; column_count];
    for row in std::iter::once(&table.header).chain(table.rows.iter()) {
        for (idx, cell) in row.iter().enumerate() {
            widths[idx] = widths[idx].max(cell.chars().count());
        }
    }

    let rule = widths
        .iter()
        .map(|w| "-".repeat(w + 2))
        .collect::<Vec<_>>()
        .join("+");
    let rule = format!("+{}+", rule);

    let line = |cells: &[String]| {
        let body = widths
            .iter()
            .enumerate()
            .map(|(idx, &width)| {
                let cell = cells.get(idx).map(String::as_str).unwrap_or("");
                format!(" {:<width$} ", cell, width = width)
            })
            .collect::<Vec<_>>()
            .join("|");
        format!("|{}|", body)
    };

    let mut out = vec![rule.clone(), line(&table.header), rule.clone()];
    out.extend(table.rows.iter().map(|row| line(row)));
    out.push(rule);
    out.join("\n")
}

/// Prints the three tables to stdout, each under its heading.
pub fn print_console_tables(report: &Report<'_>) {
    for table in &report.tables {
        println!("\n{}:\n", table.title);
        println!("{}", format_table(table));
    }
}

/// Writes the text, JSON and HTML reports into `output_dir`, creating the
/// directory if needed.
///
/// # Arguments
///
/// * `report` - The assembled report for this run
/// * `output_dir` - Directory where report files will be saved
///
/// # Returns
///
/// * `Result<WrittenReports>` - Paths of the files written, or the first IO/JSON error
pub fn write_reports(report: &Report<'_>, output_dir: impl AsRef<Path>) -> Result<WrittenReports> {
    let output_dir = output_dir.as_ref();
    fs::create_dir_all(output_dir)?;

    let text = output_dir.join(TEXT_REPORT_FILE);
    fs::write(&text, &report.text)?;
    info!(path = %text.display(), "Wrote text report");

    let json = output_dir.join(JSON_REPORT_FILE);
    let mut json_file = BufWriter::new(File::create(&json)?);
    serde_json::to_writer_pretty(&mut json_file, &report.export)?;
    writeln!(json_file)?;
    json_file.flush()?;
    info!(path = %json.display(), "Wrote JSON report");

    let html = output_dir.join(HTML_REPORT_FILE);
    fs::write(&html, &report.html)?;
    info!(path = %html.display(), "Wrote HTML report");

    Ok(WrittenReports {
        text,
        json,
        html,
        rejected_log: None,
    })
}

/// Writes one line per rejected row: `#<seq> <reason>: <raw row as JSON>`,
/// with `seq` counting from 1.
pub fn write_rejected_log<W: Write>(mut writer: W, rejected: &[RejectedRow]) -> Result<()> {
    for (idx, row) in rejected.iter().enumerate() {
        let raw = serde_json::to_string(&row.raw)?;
        writeln!(writer, "#{} {}: {}", idx + 1, row.reason, raw)?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes the rejected rows log next to the other reports. Returns `None`
/// without touching the filesystem when nothing was rejected.
pub fn write_rejected_log_file(
    rejected: &[RejectedRow],
    input_path: impl AsRef<Path>,
    output_dir: impl AsRef<Path>,
) -> Result<Option<PathBuf>> {
    if rejected.is_empty() {
        return Ok(None);
    }

    let basename = extract_basename(&input_path)?;
    let path = output_dir
        .as_ref()
        .join(format!("{}_rejected_rows.log", basename));
    let file = BufWriter::new(File::create(&path)?);
    write_rejected_log(file, rejected)?;
    info!(path = %path.display(), count = rejected.len(), "Wrote rejected rows log");

    Ok(Some(path))
}

/// Extracts the basename from a file path without extension.
///
/// # Arguments
///
/// * `file_path` - Path of the source file, e.g. `data/products.csv`
///
/// # Returns
///
/// * `Ok(String)` - The name up to its first `.`, e.g. `products`, or
///   `unknown` when that part is empty
/// * `Err(io::Error)` - The path has no file name component
fn extract_basename(file_path: impl AsRef<Path>) -> io::Result<String> {
    let path_ref = file_path.as_ref();

    let filename = path_ref.file_name().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("Invalid file path: {:?}", path_ref),
        )
    })?;

    let filename_str = filename.to_string_lossy();
    Ok(filename_str
        .split('.')
        .next()
        .filter(|stem| !stem.is_empty())
        .unwrap_or("unknown")
        .to_string())
}

/// Prints where the reports went.
pub fn print_saved_message(written: &WrittenReports) {
    println!("\nReports saved:");
    for path in written.paths() {
        println!("- {}", path.display());
    }
}
