//! Bundled in-process result cache.

use std::time::{Duration, Instant};

use anytable_core::{CachedValue, TableCache};
use moka::sync::Cache;
use moka::Expiry;

const DEFAULT_MAX_ENTRIES: u64 = 10_000;

/// Honors the TTL each entry was stored with.
struct PerEntryTtl;

impl Expiry<String, (CachedValue, Duration)> for PerEntryTtl {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &(CachedValue, Duration),
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.1)
    }
}

/// Default `TableCache` implementation backed by `moka`.
///
/// Shareable across tables; keys already encode the table name via
/// the rendered SQL.
pub struct MemoryCache {
    inner: Cache<String, (CachedValue, Duration)>,
}

impl MemoryCache {
    pub fn new(max_entries: u64) -> Self {
        Self {
            inner: Cache::builder()
                .max_capacity(max_entries)
                .expire_after(PerEntryTtl)
                .build(),
        }
    }

    pub fn entry_count(&self) -> u64 {
        self.inner.entry_count()
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ENTRIES)
    }
}

impl TableCache for MemoryCache {
    fn get(&self, key: &str) -> Option<CachedValue> {
        self.inner.get(key).map(|(value, _)| value)
    }

    fn set(&self, key: &str, value: CachedValue, ttl: Duration) {
        self.inner.insert(key.to_string(), (value, ttl));
    }
}
