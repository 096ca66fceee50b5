//! SQLite pragmas for a read-only workload.

use anytable_core::BackendError;
use rusqlite::Connection;

/// Apply read-workload pragmas: no syncing (nothing is written),
/// enlarged page cache, temp tables in memory.
pub fn apply_read_pragmas(conn: &Connection) -> Result<(), BackendError> {
    conn.execute_batch(
        "PRAGMA query_only = ON;
         PRAGMA synchronous = OFF;
         PRAGMA cache_size = -8192;
         PRAGMA temp_store = MEMORY;",
    )
    .map_err(|e| BackendError::Open {
        path: "<pragmas>".to_string(),
        message: e.to_string(),
    })
}
