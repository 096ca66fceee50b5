//! Caller-input validation errors.

/// Errors raised when a caller passes unusable criteria or requests
/// a column/lookup the table cannot satisfy.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    /// A criterion was supplied with no value. Rendering this as
    /// `IS NULL` would silently change semantics, so it is rejected.
    #[error("criterion for column '{column}' has an undefined value")]
    UndefinedCriterion { column: String },

    /// A dynamic attribute request named a column that does not exist
    /// in the matched row's schema.
    #[error("no such column '{column}' in table '{table}'")]
    NoSuchColumn { column: String, table: String },

    /// A key-style lookup was attempted on a table opened without a
    /// key column.
    #[error("key lookup '{accessor}' on unkeyed table '{table}'")]
    KeyLookupOnUnkeyed { accessor: String, table: String },
}
