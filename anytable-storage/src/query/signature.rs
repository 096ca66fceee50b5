//! Cache key derivation from query shape.

/// Compose the deterministic cache key for a query.
///
/// Covers the operation name, the fully rendered SQL, the bound
/// argument values (already in sorted-by-column order, since the
/// builder sorts predicates), and the list/single context flag — so
/// a single-result lookup can never be answered by a cached
/// collection or vice versa.
pub fn signature(operation: &str, sql: &str, args: &[String], want_all: bool) -> String {
    let mut key = String::with_capacity(
        operation.len() + sql.len() + args.iter().map(|a| a.len() + 1).sum::<usize>() + 8,
    );
    key.push_str(operation);
    key.push('|');
    key.push_str(sql);
    key.push('|');
    for arg in args {
        key.push_str(arg);
        key.push('\u{1f}');
    }
    key.push('|');
    key.push_str(if want_all { "all" } else { "one" });
    key
}
