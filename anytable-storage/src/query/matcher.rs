//! In-memory predicate evaluation with SQL-equivalent semantics.
//!
//! Slurp-mode filtering must return the same rows the engine would,
//! so `LIKE` is implemented the way SQLite does: `%` matches any
//! sequence, `_` any single character, ASCII case-insensitive.
//! Equality is case-sensitive and a NULL never matches either
//! operator.

use anytable_core::Row;

use super::builder::{Op, Predicate};

/// SQLite-style LIKE match.
pub fn like_match(pattern: &str, value: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().map(|c| c.to_ascii_lowercase()).collect();
    let value: Vec<char> = value.chars().map(|c| c.to_ascii_lowercase()).collect();

    let mut pi = 0;
    let mut vi = 0;
    let mut star: Option<usize> = None;
    let mut mark = 0;

    while vi < value.len() {
        if pi < pattern.len() && (pattern[pi] == '_' || pattern[pi] == value[vi]) {
            pi += 1;
            vi += 1;
        } else if pi < pattern.len() && pattern[pi] == '%' {
            star = Some(pi);
            mark = vi;
            pi += 1;
        } else if let Some(s) = star {
            pi = s + 1;
            mark += 1;
            vi = mark;
        } else {
            return false;
        }
    }
    while pi < pattern.len() && pattern[pi] == '%' {
        pi += 1;
    }
    pi == pattern.len()
}

/// Whether `row` satisfies one predicate.
pub fn predicate_matches(row: &Row, predicate: &Predicate) -> bool {
    match row.value(&predicate.column) {
        None => false,
        Some(value) => match predicate.op {
            Op::Eq => value == predicate.value,
            Op::Like => like_match(&predicate.value, value),
        },
    }
}

/// Whether `row` satisfies every predicate.
pub fn row_matches(row: &Row, predicates: &[Predicate]) -> bool {
    predicates.iter().all(|p| predicate_matches(row, p))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_matches_any_sequence() {
        assert!(like_match("ro%", "root"));
        assert!(like_match("%oo%", "root"));
        assert!(like_match("%", ""));
        assert!(!like_match("ro%", "daemon"));
    }

    #[test]
    fn underscore_matches_single_char() {
        assert!(like_match("r__t", "root"));
        assert!(!like_match("r__t", "roost"));
    }

    #[test]
    fn like_is_ascii_case_insensitive() {
        assert!(like_match("ROOT", "root"));
        assert!(like_match("de%", "Deux"));
    }

    #[test]
    fn literal_pattern_requires_full_match() {
        assert!(like_match("root", "root"));
        assert!(!like_match("root", "rootlet"));
    }

    #[test]
    fn null_never_matches() {
        let mut row = Row::new();
        row.push("shell", None);
        let eq = Predicate {
            column: "shell".into(),
            op: Op::Eq,
            value: "".into(),
        };
        let like = Predicate {
            column: "shell".into(),
            op: Op::Like,
            value: "%".into(),
        };
        assert!(!predicate_matches(&row, &eq));
        assert!(!predicate_matches(&row, &like));
    }

    #[test]
    fn eq_is_case_sensitive() {
        let mut row = Row::new();
        row.push("fr", Some("Deux".into()));
        let eq = Predicate {
            column: "fr".into(),
            op: Op::Eq,
            value: "deux".into(),
        };
        assert!(!predicate_matches(&row, &eq));
    }
}
