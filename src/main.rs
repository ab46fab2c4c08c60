//! Product Catalog Summary Report - Main Application
//!
//! Entry point for the product report generator. All the work happens in
//! the `product_report` module of the library crate.
//!
//! # Usage
//!
//! ```bash
//! # Basic usage (reads products.csv, writes reports to the current directory)
//! $ cargo run --release
//!
//! # With a catalog path, price threshold and custom output directory
//! $ cargo run --release -- path/to/catalog.csv --min-price 100 -o reports
//! ```

use product_report_rust::product_report_main;

/// call from module
fn main() {
    product_report_main();
}
