//! A single table row: ordered column → optional value mapping.

/// One row of a table.
///
/// Columns keep the order they carry in the physical file (or the
/// engine's result set). A `None` value is a SQL NULL or a missing
/// field; empty strings in flat files are normalized to `None` by the
/// parsers before rows are built.
///
/// Rows are plain owned data. Results handed to callers are copies and
/// never alias the slurp store.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Row {
    fields: Vec<(String, Option<String>)>,
}

impl Row {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    pub fn with_capacity(n: usize) -> Self {
        Self {
            fields: Vec::with_capacity(n),
        }
    }

    /// Append a column. Later pushes with the same name shadow earlier
    /// ones for `value` lookups but both remain in iteration order.
    pub fn push(&mut self, column: impl Into<String>, value: Option<String>) {
        self.fields.push((column.into(), value));
    }

    /// Value of a column, or `None` if the column is absent or NULL.
    /// Use [`Row::has_column`] to tell the two apart.
    pub fn value(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .and_then(|(_, value)| value.as_deref())
    }

    /// Value of a column as an owned optional, preserving NULL.
    /// Returns `None` only when the column itself is absent.
    pub fn get(&self, column: &str) -> Option<Option<String>> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.clone())
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.fields.iter().any(|(name, _)| name == column)
    }

    /// Column names in row order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.fields
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_deref()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FromIterator<(String, Option<String>)> for Row {
    fn from_iter<I: IntoIterator<Item = (String, Option<String>)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}
