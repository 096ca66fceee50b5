//! Configuration for a single table.
//! Explicit immutable values, no process-wide mutable defaults.

pub mod table_config;

pub use table_config::TableConfig;
