//! # Aggregator
//!
//! Three independent, pure views over validated products: the in-stock
//! price filter, per-category counts and the top-N most expensive. All of
//! them keep input order where ordering is otherwise a tie.

use std::cmp::Ordering;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::record_parser::Product;

/// Which products feed the category counts and the top-N view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReferenceSet {
    /// Every validated product.
    #[default]
    All,
    /// Only the products that passed the stock and price filter.
    Filtered,
}

/// Per-category counts in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryCounts {
    entries: Vec<(String, usize)>,
}

impl CategoryCounts {
    pub fn get(&self, category: &str) -> Option<usize> {
        self.entries
            .iter()
            .find(|(name, _)| name == category)
            .map(|&(_, count)| count)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts, equal to the length of the counted input.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|&(_, count)| count).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|(name, count)| (name.as_str(), *count))
    }

    fn increment(&mut self, category: &str) {
        match self.entries.iter_mut().find(|(name, _)| name == category) {
            Some((_, count)) => *count += 1,
            None => self.entries.push((category.to_string(), 1)),
        }
    }
}

impl Serialize for CategoryCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (category, count) in &self.entries {
            map.serialize_entry(category, count)?;
        }
        map.end()
    }
}

/// Keeps products that are in stock and priced strictly above `min_price`.
pub fn filter_by_stock_and_price<'a, I>(products: I, min_price: f64) -> Vec<&'a Product>
where
    I: IntoIterator<Item = &'a Product>,
{
    products
        .into_iter()
        .filter(|p| p.in_stock() && p.price() > min_price)
        .collect()
}

/// Counts products per category.
pub fn count_by_category<'a, I>(products: I) -> CategoryCounts
where
    I: IntoIterator<Item = &'a Product>,
{
    let mut counts = CategoryCounts::default();
    for product in products {
        counts.increment(product.category());
    }
    counts
}

/// The `n` most expensive products, price descending. Equal prices keep
/// their input order.
pub fn top_n<'a, I>(products: I, n: usize) -> Vec<&'a Product>
where
    I: IntoIterator<Item = &'a Product>,
{
    if n == 0 {
        return Vec::new();
    }
    let mut sorted: Vec<&Product> = products.into_iter().collect();
    // `sort_by` is stable. Prices are finite, so `partial_cmp` always answers,
    // and `-0.0` ties with `0.0`.
    sorted.sort_by(|a, b| {
        b.price()
            .partial_cmp(&a.price())
            .unwrap_or(Ordering::Equal)
    });
    sorted.truncate(n);
    sorted
}

/// Run parameters for [`aggregate`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AggregateOptions {
    pub min_price: f64,
    pub top: usize,
    pub reference_set: ReferenceSet,
}

impl Default for AggregateOptions {
    fn default() -> Self {
        Self {
            min_price: 0.0,
            top: 5,
            reference_set: ReferenceSet::All,
        }
    }
}

/// The three views of one run.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateResult<'a> {
    pub filtered: Vec<&'a Product>,
    pub category_counts: CategoryCounts,
    pub top_n: Vec<&'a Product>,
}

/// Computes all three views, feeding counts and top-N from one reference set.
pub fn aggregate<'a>(products: &'a [Product], options: &AggregateOptions) -> AggregateResult<'a> {
    let filtered = filter_by_stock_and_price(products, options.min_price);

    let (category_counts, top) = match options.reference_set {
        ReferenceSet::All => (count_by_category(products), top_n(products, options.top)),
        ReferenceSet::Filtered => (
            count_by_category(filtered.iter().copied()),
            top_n(filtered.iter().copied(), options.top),
        ),
    };

    AggregateResult {
        filtered,
        category_counts,
        top_n: top,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record_parser::{ColumnNames, RawRow, parse};

    fn product(name: &str, price: f64, category: &str, in_stock: bool) -> Product {
        let raw: RawRow = [
            ("ProductName", name.to_string()),
            ("Price", price.to_string()),
            ("Category", category.to_string()),
            ("InStock", in_stock.to_string()),
        ]
        .into_iter()
        .collect();
        parse(&raw, &ColumnNames::default()).unwrap()
    }

    fn names(products: &[&Product]) -> Vec<String> {
        products.iter().map(|p| p.name().to_string()).collect()
    }

    fn scenario() -> Vec<Product> {
        vec![
            product("A", 200.0, "Tech", true),
            product("B", 80.0, "Tech", true),
            product("C", 150.0, "Home", false),
            product("D", 500.0, "Home", true),
        ]
    }

    #[test]
    fn filter_keeps_in_stock_above_threshold_in_order() {
        let products = scenario();
        let filtered = filter_by_stock_and_price(&products, 100.0);
        assert_eq!(names(&filtered), ["A", "D"]);
    }

    #[test]
    fn filter_excludes_price_equal_to_threshold() {
        let products = vec![
            product("Edge", 100.0, "X", true),
            product("Above", 100.01, "X", true),
        ];
        assert_eq!(names(&filter_by_stock_and_price(&products, 100.0)), ["Above"]);
    }

    #[test]
    fn counts_follow_first_seen_order() {
        let products = vec![
            product("a", 1.0, "Home", true),
            product("b", 1.0, "Tech", true),
            product("c", 1.0, "Home", false),
            product("d", 1.0, "Garden", true),
        ];
        let counts = count_by_category(&products);
        let entries: Vec<_> = counts.iter().collect();
        assert_eq!(entries, [("Home", 2), ("Tech", 1), ("Garden", 1)]);
        assert_eq!(counts.total(), products.len());
    }

    #[test]
    fn counts_of_empty_input_are_empty() {
        let counts = count_by_category(std::iter::empty::<&Product>());
        assert!(counts.is_empty());
        assert_eq!(counts.total(), 0);
    }

    #[test]
    fn category_counts_serialize_as_ordered_object() {
        let counts = count_by_category(&scenario());
        assert_eq!(serde_json::to_string(&counts).unwrap(), r#"{"Tech":2,"Home":2}"#);
    }

    #[test]
    fn top_n_sorts_descending_and_truncates() {
        let products = scenario();
        assert_eq!(names(&top_n(&products, 2)), ["D", "A"]);
        assert_eq!(names(&top_n(&products, 9)), ["D", "A", "C", "B"]);
        assert!(top_n(&products, 0).is_empty());
    }

    #[test]
    fn top_n_is_stable_on_equal_prices() {
        let products = vec![
            product("first", 10.0, "X", true),
            product("big", 99.0, "X", true),
            product("second", 10.0, "X", false),
            product("third", 10.0, "Y", true),
        ];
        assert_eq!(names(&top_n(&products, 4)), ["big", "first", "second", "third"]);
    }

    #[test]
    fn top_n_treats_signed_zeros_as_equal_prices() {
        let raw = |name: &str, price: &str| -> RawRow {
            [
                ("ProductName", name),
                ("Price", price),
                ("Category", "X"),
                ("InStock", "true"),
            ]
            .into_iter()
            .collect()
        };
        let products = vec![
            parse(&raw("neg_zero", "-0"), &ColumnNames::default()).unwrap(),
            parse(&raw("zero", "0"), &ColumnNames::default()).unwrap(),
            parse(&raw("one", "1"), &ColumnNames::default()).unwrap(),
        ];
        assert_eq!(names(&top_n(&products, 3)), ["one", "neg_zero", "zero"]);
    }

    #[test]
    fn aggregate_over_all_products() {
        let products = scenario();
        let options = AggregateOptions {
            min_price: 100.0,
            top: 2,
            reference_set: ReferenceSet::All,
        };
        let result = aggregate(&products, &options);
        assert_eq!(names(&result.filtered), ["A", "D"]);
        assert_eq!(result.category_counts.get("Tech"), Some(2));
        assert_eq!(result.category_counts.get("Home"), Some(2));
        assert_eq!(names(&result.top_n), ["D", "A"]);
    }

    #[test]
    fn aggregate_over_filtered_products() {
        let products = scenario();
        let options = AggregateOptions {
            min_price: 100.0,
            top: 5,
            reference_set: ReferenceSet::Filtered,
        };
        let result = aggregate(&products, &options);
        assert_eq!(result.category_counts.total(), result.filtered.len());
        assert_eq!(result.category_counts.get("Tech"), Some(1));
        assert_eq!(result.category_counts.get("Home"), Some(1));
        assert_eq!(names(&result.top_n), ["D", "A"]);
    }
}
