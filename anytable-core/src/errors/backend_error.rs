//! Query engine errors.

/// Errors surfaced from the underlying query engine during prepare
/// or execute.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("failed to open engine for '{path}': {message}")]
    Open { path: String, message: String },

    #[error("prepare failed: {message}")]
    Prepare { message: String },

    #[error("execute failed: {message}")]
    Execute { message: String },
}
