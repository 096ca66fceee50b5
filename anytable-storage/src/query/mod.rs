//! Query construction and predicate evaluation.
//!
//! The builder renders SQL for the engine path; the matcher applies
//! the same EQ/LIKE semantics to in-memory rows so slurp-mode results
//! are equivalent. The signature module derives the cache key from
//! the rendered query shape.

pub mod builder;
pub mod matcher;
pub mod signature;

pub use builder::{build, predicates_from, Op, Predicate, QuerySpec};
pub use matcher::{like_match, row_matches};
pub use signature::signature;
