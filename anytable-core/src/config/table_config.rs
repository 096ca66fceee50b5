//! Per-table configuration with builder-style overrides.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::errors::ConfigError;
use crate::traits::TableCache;

/// Default key column name.
pub const DEFAULT_KEY_COLUMN: &str = "entry";
/// Default flat-file field separator.
pub const DEFAULT_SEPARATOR: u8 = b'!';
/// Default slurp threshold in bytes. `0` disables slurping.
pub const DEFAULT_MAX_SLURP_BYTES: u64 = 16_384;
/// Default cache entry TTL.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(3600);

/// Configuration resolved once at `Table` construction.
///
/// Immutable afterwards; `Table::with_overrides` clones the config and
/// applies edits to the copy. Unset options fall back to the compiled
/// defaults above.
#[derive(Clone)]
pub struct TableConfig {
    /// Directory holding the table's physical file. Must exist.
    pub directory: PathBuf,
    /// Base name of the table file (probed with the known extensions).
    pub name: String,
    /// Designated key column used for keying, ordering, and
    /// comment-row filtering.
    pub key_column: String,
    /// Whether the table has a meaningful key column. `false` disables
    /// keyed fast paths, implicit filtering, and ordering.
    pub keyed: bool,
    /// Field separator for flat files. `.psv` files override this
    /// to `|` at resolve time.
    pub separator: u8,
    /// Files at or below this size are slurped into memory at open.
    /// `0` forces query-engine mode for every size.
    pub max_slurp_bytes: u64,
    /// Optional result cache. Best-effort: absence never changes
    /// results, only performance.
    pub cache: Option<Arc<dyn TableCache>>,
    /// TTL handed to the cache on every write-through.
    pub cache_ttl: Duration,
    /// Column names for physical files that carry no header row
    /// (fixed-format files such as system account tables).
    pub columns: Option<Vec<String>>,
}

impl TableConfig {
    /// Config for a table `name` under `directory`, with defaults for
    /// everything else.
    pub fn new(directory: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            name: name.into(),
            key_column: DEFAULT_KEY_COLUMN.to_string(),
            keyed: true,
            separator: DEFAULT_SEPARATOR,
            max_slurp_bytes: DEFAULT_MAX_SLURP_BYTES,
            cache: None,
            cache_ttl: DEFAULT_CACHE_TTL,
            columns: None,
        }
    }

    pub fn key_column(mut self, column: impl Into<String>) -> Self {
        self.key_column = column.into();
        self
    }

    /// Mark the table as having no meaningful key column.
    pub fn unkeyed(mut self) -> Self {
        self.keyed = false;
        self
    }

    pub fn separator(mut self, sep: u8) -> Self {
        self.separator = sep;
        self
    }

    pub fn max_slurp_bytes(mut self, bytes: u64) -> Self {
        self.max_slurp_bytes = bytes;
        self
    }

    pub fn cache(mut self, cache: Arc<dyn TableCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    /// Column-name override for headerless files.
    pub fn columns(mut self, columns: Vec<String>) -> Self {
        self.columns = Some(columns);
        self
    }

    /// Validate the config. Runs before any file probing.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.is_empty() {
            return Err(ConfigError::EmptyName);
        }
        if self.directory.as_os_str().is_empty() {
            return Err(ConfigError::MissingDirectory);
        }
        if !self.directory.is_dir() {
            return Err(ConfigError::NotADirectory {
                path: self.directory.display().to_string(),
            });
        }
        Ok(())
    }
}

impl fmt::Debug for TableConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableConfig")
            .field("directory", &self.directory)
            .field("name", &self.name)
            .field("key_column", &self.key_column)
            .field("keyed", &self.keyed)
            .field("separator", &(self.separator as char))
            .field("max_slurp_bytes", &self.max_slurp_bytes)
            .field("cache", &self.cache.as_ref().map(|_| "<cache>"))
            .field("cache_ttl", &self.cache_ttl)
            .field("columns", &self.columns)
            .finish()
    }
}
