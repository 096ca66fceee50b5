//! Error handling for anytable.
//! One error enum per failure domain, `thiserror` only, zero `anyhow`.

pub mod access_error;
pub mod backend_error;
pub mod config_error;
pub mod parse_error;
pub mod validation_error;

pub use access_error::AccessError;
pub use backend_error::BackendError;
pub use config_error::ConfigError;
pub use parse_error::ParseError;
pub use validation_error::ValidationError;
