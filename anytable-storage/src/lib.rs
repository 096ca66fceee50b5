//! Backend selection and execution for anytable.
//!
//! Probes a directory for a table's physical representation (SQLite
//! file, separated flat file, optionally gzip-compressed, or XML),
//! slurps small tables fully into memory, and answers row/column
//! queries uniformly through the [`Table`] facade.

pub mod backend;
pub mod cache;
pub mod format;
pub mod parse;
pub mod query;
pub mod slurp;
pub mod table;

pub use backend::{Backend, BackendKind};
pub use cache::MemoryCache;
pub use table::Table;

pub use anytable_core::{
    AccessError, BackendError, CachedValue, ConfigError, Criteria, ParseError, Row, TableCache,
    TableConfig, ValidationError,
};
