//! File parsing errors.

/// Errors raised when a flat or markup file is rejected by its parser.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("flat file '{path}' rejected: {message}")]
    FlatFile { path: String, message: String },

    #[error("markup file '{path}' rejected: {message}")]
    Markup { path: String, message: String },

    #[error("could not read '{path}': {message}")]
    Io { path: String, message: String },
}
