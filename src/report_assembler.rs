//! # Report Assembler
//!
//! Lays the aggregate views out for display: console tables, the plain-text
//! summary, an HTML page and the structured JSON export. Formatting only;
//! every number shown here was computed by the aggregator.

use serde::Serialize;

use crate::aggregator::{AggregateOptions, AggregateResult, CategoryCounts};
use crate::record_parser::Product;

const REPORT_TITLE: &str = "Product Summary Report";

/// A titled table for the console: header cells plus row tuples.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleTable {
    pub title: String,
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Machine-readable mirror of the three views.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportExport<'a> {
    pub filtered_products: Vec<&'a Product>,
    pub category_counts: CategoryCounts,
    pub top_expensive: Vec<&'a Product>,
}

/// Everything the writer needs to print and persist one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Report<'a> {
    pub tables: Vec<ConsoleTable>,
    pub text: String,
    pub html: String,
    pub export: ReportExport<'a>,
}

/// Renders a price the way the reports show it: `200`, `12.5`.
pub fn format_price(price: f64) -> String {
    format!("{}", price)
}

fn filtered_heading(min_price: f64) -> String {
    format!("In-stock products > {}", format_price(min_price))
}

fn top_heading(top: usize) -> String {
    format!("Top {} Most Expensive Products", top)
}

/// Builds the display-ready report for one run.
///
/// `rejected` is the number of malformed rows skipped while loading; a
/// non-zero count adds a closing line to the text report.
pub fn assemble<'a>(
    result: &AggregateResult<'a>,
    options: &AggregateOptions,
    rejected: usize,
) -> Report<'a> {
    Report {
        tables: console_tables(result, options),
        text: text_report(result, options, rejected),
        html: html_report(result, options),
        export: ReportExport {
            filtered_products: result.filtered.clone(),
            category_counts: result.category_counts.clone(),
            top_expensive: result.top_n.clone(),
        },
    }
}

fn product_rows(products: &[&Product]) -> Vec<Vec<String>> {
    products
        .iter()
        .map(|p| vec![p.name().to_string(), format_price(p.price())])
        .collect()
}

fn console_tables(result: &AggregateResult<'_>, options: &AggregateOptions) -> Vec<ConsoleTable> {
    let product_header = vec!["Product Name".to_string(), "Price".to_string()];

    vec![
        ConsoleTable {
            title: filtered_heading(options.min_price),
            header: product_header.clone(),
            rows: product_rows(&result.filtered),
        },
        ConsoleTable {
            title: "Products per category".to_string(),
            header: vec!["Category".to_string(), "Count".to_string()],
            rows: result
                .category_counts
                .iter()
                .map(|(category, count)| vec![category.to_string(), count.to_string()])
                .collect(),
        },
        ConsoleTable {
            title: format!("Top {} most expensive products", options.top),
            header: product_header,
            rows: product_rows(&result.top_n),
        },
    ]
}

fn text_report(result: &AggregateResult<'_>, options: &AggregateOptions, rejected: usize) -> String {
    let mut lines = vec![
        format!("=== {} ===", REPORT_TITLE),
        String::new(),
        format!("{}:", filtered_heading(options.min_price)),
    ];
    lines.extend(
        result
            .filtered
            .iter()
            .map(|p| format!("- {} ({})", p.name(), format_price(p.price()))),
    );

    lines.push(String::new());
    lines.push("Products per category:".to_string());
    lines.extend(
        result
            .category_counts
            .iter()
            .map(|(category, count)| format!("- {}: {}", category, count)),
    );

    lines.push(String::new());
    lines.push(format!("{}:", top_heading(options.top)));
    lines.extend(
        result
            .top_n
            .iter()
            .map(|p| format!("- {} ({})", p.name(), format_price(p.price()))),
    );

    if rejected > 0 {
        lines.push(String::new());
        lines.push(format!("Skipped {} malformed row(s).", rejected));
    }

    lines.join("\n")
}

/// Escapes the five HTML-significant characters.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn html_list<I: IntoIterator<Item = String>>(items: I) -> String {
    let items: String = items
        .into_iter()
        .map(|item| format!("<li>{}</li>", escape_html(&item)))
        .collect();
    format!("<ul>{}</ul>", items)
}

fn html_report(result: &AggregateResult<'_>, options: &AggregateOptions) -> String {
    let product_item = |p: &&Product| format!("{} ({})", p.name(), format_price(p.price()));

    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html>\n");
    html.push_str(&format!(
        "<head><meta charset=\"utf-8\"><title>{}</title></head>\n",
        REPORT_TITLE
    ));
    html.push_str("<body>\n");
    html.push_str(&format!("<h1>{}</h1>\n", REPORT_TITLE));

    html.push_str(&format!(
        "<h2>{}</h2>\n",
        escape_html(&filtered_heading(options.min_price))
    ));
    html.push_str(&html_list(result.filtered.iter().map(product_item)));
    html.push('\n');

    html.push_str("<h2>Products per category</h2>\n");
    html.push_str(&html_list(
        result
            .category_counts
            .iter()
            .map(|(category, count)| format!("{}: {}", category, count)),
    ));
    html.push('\n');

    html.push_str(&format!("<h2>{}</h2>\n", top_heading(options.top)));
    html.push_str(&html_list(result.top_n.iter().map(product_item)));
    html.push('\n');

    html.push_str("</body>\n</html>\n");
    html
}
