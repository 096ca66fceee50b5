//! Top-level error for public table operations.

use super::{BackendError, ConfigError, ParseError, ValidationError};

/// Aggregate error returned by every public `Table` operation.
///
/// All variants are fatal to the triggering call: they propagate
/// immediately and nothing is retried internally.
#[derive(Debug, thiserror::Error)]
pub enum AccessError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// No physical file was found for the table in the probing
    /// sequence (`.sql`, `.csv.gz`, `.db.gz`, `.psv`, `.csv`, `.db`,
    /// `.xml`).
    #[error("no table file for '{base}' in {directory}")]
    TableNotFound { directory: String, base: String },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Backend(#[from] BackendError),
}
