//! Slurp store: a small table held fully in memory.

use std::collections::{BTreeMap, HashSet};

use anytable_core::Row;

use crate::parse::ParsedTable;
use crate::query::builder::Predicate;
use crate::query::matcher::row_matches;

/// In-memory materialization of a table, built once at open time and
/// never mutated afterwards. Query results are copied out and never
/// alias the store.
///
/// Keyed tables index rows by key value; duplicate keys keep the last
/// row (known divergence from engine mode, which returns every
/// match). Unkeyed tables preserve file order.
#[derive(Debug)]
pub enum SlurpStore {
    Keyed { rows: BTreeMap<String, Row> },
    Ordered { rows: Vec<Row> },
}

impl SlurpStore {
    /// Build the store from a parsed file.
    ///
    /// For keyed tables, comment rows (key starting with `#`) and
    /// rows without a key value are dropped here, mirroring the
    /// implicit predicate the query builder applies in engine mode.
    pub fn build(parsed: ParsedTable, keyed: bool, key_column: &str) -> Self {
        if keyed {
            let mut rows = BTreeMap::new();
            for row in parsed.rows {
                let key = match row.value(key_column) {
                    Some(key) if !key.starts_with('#') => key.to_string(),
                    _ => continue,
                };
                rows.insert(key, row);
            }
            SlurpStore::Keyed { rows }
        } else {
            SlurpStore::Ordered { rows: parsed.rows }
        }
    }

    pub fn len(&self) -> usize {
        match self {
            SlurpStore::Keyed { rows } => rows.len(),
            SlurpStore::Ordered { rows } => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate rows: key order when keyed, file order otherwise.
    pub fn iter(&self) -> Box<dyn Iterator<Item = &Row> + '_> {
        match self {
            SlurpStore::Keyed { rows } => Box::new(rows.values()),
            SlurpStore::Ordered { rows } => Box::new(rows.iter()),
        }
    }

    /// All rows, copied out.
    pub fn all_rows(&self) -> Vec<Row> {
        self.iter().cloned().collect()
    }

    /// Point lookup by key value. Keyed stores only.
    pub fn get(&self, key: &str) -> Option<&Row> {
        match self {
            SlurpStore::Keyed { rows } => rows.get(key),
            SlurpStore::Ordered { .. } => None,
        }
    }

    /// First row in iteration order.
    pub fn first(&self) -> Option<&Row> {
        self.iter().next()
    }

    /// Rows satisfying every predicate, copied out, iteration order.
    pub fn filter(&self, predicates: &[Predicate]) -> Vec<Row> {
        self.iter()
            .filter(|row| row_matches(row, predicates))
            .cloned()
            .collect()
    }

    /// First row satisfying every predicate.
    pub fn first_match(&self, predicates: &[Predicate]) -> Option<&Row> {
        self.iter().find(|row| row_matches(row, predicates))
    }

    /// Project one column across all rows, iteration order.
    pub fn project(&self, column: &str) -> Vec<Option<String>> {
        self.iter().map(|row| row.get(column).flatten()).collect()
    }

    /// Project one column with duplicates removed, first occurrence
    /// kept.
    pub fn project_distinct(&self, column: &str) -> Vec<Option<String>> {
        let mut seen: HashSet<Option<String>> = HashSet::new();
        let mut values = Vec::new();
        for row in self.iter() {
            let value = row.get(column).flatten();
            if seen.insert(value.clone()) {
                values.push(value);
            }
        }
        values
    }
}
