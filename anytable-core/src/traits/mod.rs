//! Collaborator traits injected into the access layer.

pub mod cache;

pub use cache::{CachedValue, TableCache};
