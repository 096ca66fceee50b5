//! Backend adapters: uniform query execution over a connection-like
//! resource, polymorphic over the physical formats.

pub mod materialize;
pub mod pragmas;

use std::path::Path;

use anytable_core::{AccessError, BackendError, Row, TableConfig};
use rusqlite::types::ValueRef;
use rusqlite::{params_from_iter, Connection, OpenFlags};

use crate::format::Resolved;
use crate::parse::{flat::parse_flat, markup::parse_markup};

use self::materialize::materialize;
use self::pragmas::apply_read_pragmas;

/// Which physical storage format services a table.
///
/// Resolved once per table and fixed for the facade's lifetime. The
/// only consumers of this tag are the format resolver and the query
/// builder; operations never re-derive format-specific behavior ad
/// hoc.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Relational,
    FlatFile,
    Markup,
}

/// A backend holding the engine connection for one table.
///
/// Slurped tables have no backend at all until one is demanded (for
/// raw SQL); the facade carries `Option<Backend>` for exactly that
/// reason.
#[derive(Debug)]
pub enum Backend {
    /// SQLite file opened read-only with read-workload pragmas.
    Relational { conn: Connection, table: String },
    /// Flat file materialized into an in-memory engine.
    FlatFile {
        conn: Connection,
        table: String,
        separator: u8,
    },
    /// Markup file materialized into an in-memory engine.
    Markup { conn: Connection, table: String },
}

impl Backend {
    /// Build the backend for a resolved table file.
    pub fn open(resolved: &Resolved, config: &TableConfig) -> Result<Self, AccessError> {
        let table = config.name.clone();
        match resolved.kind {
            BackendKind::Relational => {
                let conn = open_read_only(&resolved.path)?;
                Ok(Backend::Relational { conn, table })
            }
            BackendKind::FlatFile => {
                let parsed = parse_flat(
                    &resolved.path,
                    resolved.separator,
                    config.columns.as_deref(),
                )?;
                let conn = materialize(&table, &parsed, &config.key_column)?;
                Ok(Backend::FlatFile {
                    conn,
                    table,
                    separator: resolved.separator,
                })
            }
            BackendKind::Markup => {
                let parsed = parse_markup(&resolved.path)?;
                let conn = materialize(&table, &parsed, &config.key_column)?;
                Ok(Backend::Markup { conn, table })
            }
        }
    }

    pub fn kind(&self) -> BackendKind {
        match self {
            Backend::Relational { .. } => BackendKind::Relational,
            Backend::FlatFile { .. } => BackendKind::FlatFile,
            Backend::Markup { .. } => BackendKind::Markup,
        }
    }

    pub fn table(&self) -> &str {
        match self {
            Backend::Relational { table, .. }
            | Backend::FlatFile { table, .. }
            | Backend::Markup { table, .. } => table,
        }
    }

    fn conn(&self) -> &Connection {
        match self {
            Backend::Relational { conn, .. }
            | Backend::FlatFile { conn, .. }
            | Backend::Markup { conn, .. } => conn,
        }
    }

    /// Prepare and execute a SELECT, returning fully copied-out rows.
    pub fn select(&self, sql: &str, args: &[String]) -> Result<Vec<Row>, BackendError> {
        tracing::trace!(table = self.table(), sql, "executing query");
        let mut stmt = self
            .conn()
            .prepare(sql)
            .map_err(|e| BackendError::Prepare {
                message: e.to_string(),
            })?;
        let columns: Vec<String> = stmt.column_names().iter().map(|c| c.to_string()).collect();

        let mut rows = stmt
            .query(params_from_iter(args.iter()))
            .map_err(execute_error)?;

        let mut out = Vec::new();
        while let Some(row) = rows.next().map_err(execute_error)? {
            let mut copied = Row::with_capacity(columns.len());
            for (i, column) in columns.iter().enumerate() {
                let value = match row.get_ref(i).map_err(execute_error)? {
                    ValueRef::Null => None,
                    ValueRef::Integer(n) => Some(n.to_string()),
                    ValueRef::Real(f) => Some(f.to_string()),
                    ValueRef::Text(t) => Some(String::from_utf8_lossy(t).into_owned()),
                    ValueRef::Blob(b) => Some(String::from_utf8_lossy(b).into_owned()),
                };
                copied.push(column.clone(), value);
            }
            out.push(copied);
        }
        Ok(out)
    }
}

fn open_read_only(path: &Path) -> Result<Connection, AccessError> {
    let conn = Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .map_err(|e| BackendError::Open {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    apply_read_pragmas(&conn)?;
    Ok(conn)
}

fn execute_error(e: rusqlite::Error) -> BackendError {
    BackendError::Execute {
        message: e.to_string(),
    }
}
