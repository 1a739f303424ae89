// ============================================================
// RAW ROW
// ============================================================
// One parsed data line keyed by lower-cased header name

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{COL_PRODUCT_ID, COL_PRODUCT_TITLE, COL_REVIEW, COL_REVIEW_TEXT, UNKNOWN_PRODUCT};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRow {
    /// Data row index (0-based, header and blank lines excluded)
    pub index: usize,

    cells: HashMap<String, String>,
}

impl RawRow {
    /// Zip header names with the cell values of one line.
    ///
    /// Missing trailing cells become empty strings; cells beyond the header
    /// count are dropped. A repeated header keeps the value of its last column.
    pub fn from_cells(index: usize, headers: &[String], values: Vec<String>) -> Self {
        let mut values = values.into_iter();
        let cells = headers
            .iter()
            .map(|header| (header.clone(), values.next().unwrap_or_default()))
            .collect();

        Self { index, cells }
    }

    /// Build a row directly from `(column, value)` pairs
    pub fn from_pairs<I, K, V>(index: usize, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let cells = pairs
            .into_iter()
            .map(|(k, v)| (k.into().trim().to_lowercase(), v.into()))
            .collect();

        Self { index, cells }
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells.get(column).map(String::as_str)
    }

    /// Value of `column` when present and non-empty
    pub fn non_empty(&self, column: &str) -> Option<&str> {
        self.get(column).filter(|value| !value.is_empty())
    }

    pub fn product_title(&self) -> Option<&str> {
        self.non_empty(COL_PRODUCT_TITLE)
    }

    /// `product_id`, else `product_title`, else the unknown-product literal
    pub fn product_key(&self) -> &str {
        self.non_empty(COL_PRODUCT_ID)
            .or_else(|| self.product_title())
            .unwrap_or(UNKNOWN_PRODUCT)
    }

    /// Review body, falling back to a legacy `review` column
    pub fn review_text(&self) -> &str {
        self.non_empty(COL_REVIEW_TEXT)
            .or_else(|| self.non_empty(COL_REVIEW))
            .unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
