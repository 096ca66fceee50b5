//! Filter criteria: column → scalar value map.

use std::collections::BTreeMap;

/// A criteria map: column name → optional scalar value.
///
/// Values are plain strings; a value containing the `%` wildcard
/// marker selects pattern matching, anything else exact matching.
/// A `None` value is a caller error and is rejected with a
/// `ValidationError` before any query is built — it is deliberately
/// not rendered as `IS NULL`.
///
/// Backed by a `BTreeMap` so iteration is always sorted by column
/// name, which keeps rendered query text (and therefore cache keys)
/// deterministic for semantically identical maps.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Criteria {
    entries: BTreeMap<String, Option<String>>,
}

impl Criteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an exact or wildcard criterion.
    pub fn with(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(column.into(), Some(value.into()));
        self
    }

    /// Add a criterion from an optional value. Passing `None` is kept
    /// so that the undefined-value caller error can surface with the
    /// offending column name instead of being silently dropped.
    pub fn with_opt(mut self, column: impl Into<String>, value: Option<String>) -> Self {
        self.entries.insert(column.into(), value);
        self
    }

    /// Iterate criteria in sorted column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries
            .iter()
            .map(|(column, value)| (column.as_str(), value.as_deref()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The single criterion, if there is exactly one.
    pub fn single(&self) -> Option<(&str, Option<&str>)> {
        if self.entries.len() == 1 {
            self.iter().next()
        } else {
            None
        }
    }

    /// Whether the sole criterion targets the given column.
    pub fn is_single_on(&self, column: &str) -> bool {
        matches!(self.single(), Some((col, _)) if col == column)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Criteria {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), Some(v.into())))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iteration_is_sorted_by_column() {
        let criteria = Criteria::new().with("zeta", "1").with("alpha", "2");
        let cols: Vec<&str> = criteria.iter().map(|(c, _)| c).collect();
        assert_eq!(cols, vec!["alpha", "zeta"]);
    }

    #[test]
    fn single_detection() {
        let one = Criteria::new().with("entry", "third");
        assert!(one.is_single_on("entry"));
        assert!(!one.is_single_on("number"));

        let two = one.clone().with("number", "3rd");
        assert_eq!(two.single(), None);
    }
}
