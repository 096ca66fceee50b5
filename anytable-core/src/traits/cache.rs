//! Injectable result cache.

use std::time::Duration;

use crate::types::Row;

/// A value stored under a query signature.
///
/// The list/single split is carried in the value as well as in the
/// cache key, so a single-result lookup can never be satisfied by a
/// cached multi-row collection and vice versa. `OneRow(None)` and
/// `OneValue(None)` are valid cached "no match" results, distinct
/// from a cache miss.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CachedValue {
    Rows(Vec<Row>),
    OneRow(Option<Row>),
    Values(Vec<Option<String>>),
    OneValue(Option<String>),
}

/// The cache collaborator.
///
/// Best-effort by contract: the access layer computes the
/// authoritative result from its own stores on every miss and only
/// writes through afterwards, so a cache that loses entries (or is
/// absent entirely) affects performance, never correctness. TTL
/// enforcement is the implementation's job; the core never evicts.
///
/// Implementations are expected to be either externally synchronized
/// or process-local; the core adds no locking of its own.
pub trait TableCache: Send + Sync {
    /// Look up a previously stored value. `None` is a miss.
    fn get(&self, key: &str) -> Option<CachedValue>;

    /// Store a value under `key` for at most `ttl`.
    fn set(&self, key: &str, value: CachedValue, ttl: Duration);
}
