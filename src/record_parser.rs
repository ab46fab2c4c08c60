//! # Record Parser
//!
//! Turns one untyped catalog row into a validated [`Product`], or explains
//! why it could not. A failed row is an ordinary return value: the caller
//! files it under the rejected rows and keeps going.
//!
//! Validation runs in a fixed order and stops at the first failure:
//!
//! 1. product name present and non-empty after trimming
//! 2. price parses as a finite number
//! 3. category present and non-empty after trimming
//! 4. stock flag is `true` or `false`, ignoring case

use std::fmt;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Header names of the four catalog columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnNames {
    pub name: String,
    pub price: String,
    pub category: String,
    pub in_stock: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            name: "ProductName".to_string(),
            price: "Price".to_string(),
            category: "Category".to_string(),
            in_stock: "InStock".to_string(),
        }
    }
}

/// One input row before validation: column name to raw value, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    fields: Vec<(String, String)>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a field. Later duplicates of a column name are kept but never
    /// win a lookup.
    pub fn push(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.fields.push((column.into(), value.into()));
    }

    /// Looks a column up by exact name, falling back to an ASCII
    /// case-insensitive match.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .or_else(|| {
                self.fields
                    .iter()
                    .find(|(name, _)| name.eq_ignore_ascii_case(column))
            })
            .map(|(_, value)| value.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = RawRow::new();
        for (column, value) in iter {
            row.push(column, value);
        }
        row
    }
}

// Serialized as a JSON object so the rejected-rows log shows the row the
// way it appeared in the source, column order included.
impl Serialize for RawRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (column, value) in &self.fields {
            map.serialize_entry(column, value)?;
        }
        map.end()
    }
}

/// A validated catalog entry. Only [`parse`] builds one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    #[serde(rename = "ProductName")]
    name: String,
    #[serde(rename = "Price")]
    price: f64,
    #[serde(rename = "Category")]
    category: String,
    #[serde(rename = "InStock")]
    in_stock: bool,
}

impl Product {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn in_stock(&self) -> bool {
        self.in_stock
    }
}

/// Why a row was turned away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    MissingName,
    InvalidPrice,
    MissingCategory,
    InvalidStockFlag,
}

impl RejectReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingName => "missing or empty product name",
            Self::InvalidPrice => "invalid price",
            Self::MissingCategory => "missing or empty category",
            Self::InvalidStockFlag => "invalid stock flag",
        }
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A source row that failed validation, kept with its reason.
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedRow {
    pub raw: RawRow,
    pub reason: RejectReason,
}

/// Validates one raw row.
///
/// Deterministic and side-effect free. A missing column counts the same as
/// an empty value.
pub fn parse(raw: &RawRow, columns: &ColumnNames) -> Result<Product, RejectReason> {
    let name = non_empty(raw.get(&columns.name)).ok_or(RejectReason::MissingName)?;

    let price = raw
        .get(&columns.price)
        .and_then(parse_price)
        .ok_or(RejectReason::InvalidPrice)?;

    let category = non_empty(raw.get(&columns.category)).ok_or(RejectReason::MissingCategory)?;

    let in_stock = raw
        .get(&columns.in_stock)
        .and_then(parse_stock_flag)
        .ok_or(RejectReason::InvalidStockFlag)?;

    Ok(Product {
        name: name.to_string(),
        price,
        category: category.to_string(),
        in_stock,
    })
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

// `f64::from_str` accepts "inf" and "NaN"; neither is a price.
fn parse_price(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|price| price.is_finite())
}

fn parse_stock_flag(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, price: &str, category: &str, stock: &str) -> RawRow {
        [
            ("ProductName", name),
            ("Price", price),
            ("Category", category),
            ("InStock", stock),
        ]
        .into_iter()
        .collect()
    }

    fn parse_default(raw: &RawRow) -> Result<Product, RejectReason> {
        parse(raw, &ColumnNames::default())
    }

    #[test]
    fn parses_valid_row_and_trims_text_fields() {
        let product = parse_default(&row("  Laptop ", "1500", " Tech", "true")).unwrap();
        assert_eq!(product.name(), "Laptop");
        assert_eq!(product.price(), 1500.0);
        assert_eq!(product.category(), "Tech");
        assert!(product.in_stock());
    }

    #[test]
    fn stock_flag_is_case_insensitive() {
        assert!(parse_default(&row("A", "1", "X", "TRUE")).unwrap().in_stock());
        assert!(parse_default(&row("A", "1", "X", "True")).unwrap().in_stock());
        assert!(!parse_default(&row("A", "1", "X", "FaLsE")).unwrap().in_stock());
    }

    #[test]
    fn rejects_empty_or_blank_name() {
        assert_eq!(
            parse_default(&row("", "20", "Home", "true")),
            Err(RejectReason::MissingName)
        );
        assert_eq!(
            parse_default(&row("   ", "20", "Home", "true")),
            Err(RejectReason::MissingName)
        );
    }

    #[test]
    fn rejects_unparseable_and_non_finite_prices() {
        for price in ["", "abc", "12abc", "NaN", "inf", "-infinity"] {
            assert_eq!(
                parse_default(&row("A", price, "Home", "true")),
                Err(RejectReason::InvalidPrice),
                "price {price:?}"
            );
        }
    }

    #[test]
    fn accepts_negative_and_padded_prices() {
        assert_eq!(parse_default(&row("A", "-5", "X", "false")).unwrap().price(), -5.0);
        assert_eq!(parse_default(&row("A", " 12.5 ", "X", "false")).unwrap().price(), 12.5);
    }

    #[test]
    fn rejects_missing_category() {
        assert_eq!(
            parse_default(&row("A", "10", " ", "true")),
            Err(RejectReason::MissingCategory)
        );
    }

    #[test]
    fn rejects_anything_but_true_or_false() {
        for flag in ["", "yes", "1", "t", " true"] {
            assert_eq!(
                parse_default(&row("A", "10", "X", flag)),
                Err(RejectReason::InvalidStockFlag),
                "flag {flag:?}"
            );
        }
    }

    #[test]
    fn first_failing_rule_wins() {
        assert_eq!(
            parse_default(&row("", "abc", "", "maybe")),
            Err(RejectReason::MissingName)
        );
        assert_eq!(
            parse_default(&row("A", "abc", "", "maybe")),
            Err(RejectReason::InvalidPrice)
        );
        assert_eq!(
            parse_default(&row("A", "1", "", "maybe")),
            Err(RejectReason::MissingCategory)
        );
    }

    #[test]
    fn missing_columns_are_treated_as_empty() {
        let raw: RawRow = [("ProductName", "A"), ("Price", "3")].into_iter().collect();
        assert_eq!(parse_default(&raw), Err(RejectReason::MissingCategory));

        let raw: RawRow = [("Price", "3")].into_iter().collect();
        assert_eq!(parse_default(&raw), Err(RejectReason::MissingName));
    }

    #[test]
    fn column_lookup_falls_back_to_case_insensitive() {
        let raw: RawRow = [
            ("productname", "Desk"),
            ("PRICE", "99"),
            ("category", "Office"),
            ("instock", "false"),
        ]
        .into_iter()
        .collect();
        let product = parse_default(&raw).unwrap();
        assert_eq!(product.name(), "Desk");
        assert!(!product.in_stock());
    }

    #[test]
    fn custom_column_names() {
        let columns = ColumnNames {
            name: "title".to_string(),
            price: "cost".to_string(),
            category: "group".to_string(),
            in_stock: "available".to_string(),
        };
        let raw: RawRow = [
            ("title", "Lamp"),
            ("cost", "40"),
            ("group", "Home"),
            ("available", "true"),
        ]
        .into_iter()
        .collect();
        assert_eq!(parse(&raw, &columns).unwrap().name(), "Lamp");
    }

    #[test]
    fn reasons_name_the_broken_field() {
        assert_eq!(RejectReason::MissingName.to_string(), "missing or empty product name");
        assert_eq!(RejectReason::InvalidPrice.to_string(), "invalid price");
        assert_eq!(RejectReason::MissingCategory.to_string(), "missing or empty category");
        assert_eq!(RejectReason::InvalidStockFlag.to_string(), "invalid stock flag");
    }

    #[test]
    fn raw_row_serializes_in_column_order() {
        let raw = row("", "20", "Home", "true");
        assert_eq!(
            serde_json::to_string(&raw).unwrap(),
            r#"{"ProductName":"","Price":"20","Category":"Home","InStock":"true"}"#
        );
    }
}
