//! Core types for the anytable access layer: configuration, error
//! taxonomy, row/criteria types, and the injectable cache trait.
//!
//! This crate does no I/O. The storage backends, slurp store, and the
//! `Table` facade live in `anytable-storage`.

pub mod config;
pub mod errors;
pub mod traits;
pub mod types;

pub use config::TableConfig;
pub use errors::{AccessError, BackendError, ConfigError, ParseError, ValidationError};
pub use traits::{CachedValue, TableCache};
pub use types::{Criteria, Row};
