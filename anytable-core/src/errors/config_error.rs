//! Configuration errors.

/// Errors raised while validating a `TableConfig`.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("directory is required but was not set")]
    MissingDirectory,

    #[error("not a directory: {path}")]
    NotADirectory { path: String },

    #[error("table name must not be empty")]
    EmptyName,
}
