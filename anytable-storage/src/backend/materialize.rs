//! In-memory engine materialization for flat and markup tables.
//!
//! The Rust rendition of a flat-file/markup SQL driver: parsed rows
//! are loaded into an in-memory SQLite table, over which built SQL
//! executes with the exact semantics the relational backend has.

use anytable_core::BackendError;
use rusqlite::{params_from_iter, Connection};

use crate::parse::ParsedTable;
use crate::query::builder::quote_ident;

/// Load a parsed table into a fresh in-memory connection, all columns
/// typed TEXT. An empty, headerless file still yields a queryable
/// one-column table named after `fallback_column`.
pub fn materialize(
    table: &str,
    parsed: &ParsedTable,
    fallback_column: &str,
) -> Result<Connection, BackendError> {
    let conn = Connection::open_in_memory().map_err(|e| BackendError::Open {
        path: ":memory:".to_string(),
        message: e.to_string(),
    })?;

    let fallback = [fallback_column.to_string()];
    let columns: &[String] = if parsed.columns.is_empty() {
        &fallback
    } else {
        &parsed.columns
    };

    let column_defs: Vec<String> = columns
        .iter()
        .map(|c| format!("{} TEXT", quote_ident(c)))
        .collect();
    conn.execute(
        &format!(
            "CREATE TABLE {} ({})",
            quote_ident(table),
            column_defs.join(", ")
        ),
        [],
    )
    .map_err(|e| BackendError::Prepare {
        message: e.to_string(),
    })?;

    let placeholders: Vec<String> = (1..=columns.len()).map(|n| format!("?{n}")).collect();
    let insert = format!(
        "INSERT INTO {} VALUES ({})",
        quote_ident(table),
        placeholders.join(", ")
    );
    let mut stmt = conn.prepare(&insert).map_err(|e| BackendError::Prepare {
        message: e.to_string(),
    })?;

    for row in &parsed.rows {
        let values: Vec<Option<String>> = columns
            .iter()
            .map(|column| row.get(column).flatten())
            .collect();
        stmt.execute(params_from_iter(values.iter()))
            .map_err(|e| BackendError::Execute {
                message: e.to_string(),
            })?;
    }
    drop(stmt);

    tracing::debug!(table, rows = parsed.rows.len(), "materialized in-memory engine");
    Ok(conn)
}
