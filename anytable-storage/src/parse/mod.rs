//! File parsers producing a uniform in-memory shape.
//!
//! Both the slurp store and the in-memory query engine are built from
//! a [`ParsedTable`], so the two code paths always see identical row
//! content for the same file.

pub mod flat;
pub mod markup;

use anytable_core::Row;

/// A fully parsed table file: column names in file order plus rows.
#[derive(Debug, Clone, Default)]
pub struct ParsedTable {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl ParsedTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
