//! Parameterized SELECT construction from criteria.

use anytable_core::{Criteria, ValidationError};

use crate::backend::BackendKind;

/// Marker character selecting pattern matching. A criterion value
/// containing it is rendered as `LIKE` with the value used verbatim;
/// anything else is exact equality.
pub const WILDCARD: char = '%';

/// Predicate operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Eq,
    Like,
}

/// One rendered predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
    pub column: String,
    pub op: Op,
    pub value: String,
}

/// Everything the builder needs to render one SELECT.
#[derive(Debug, Clone)]
pub struct QuerySpec<'a> {
    pub table: &'a str,
    pub kind: BackendKind,
    pub keyed: bool,
    pub key_column: &'a str,
    /// Project a single column (attribute path) instead of `*`.
    pub projection: Option<&'a str>,
    pub distinct: bool,
    pub predicates: &'a [Predicate],
    /// `false` appends a one-row limit instead of the full set.
    pub want_all: bool,
}

/// Turn a criteria map into predicates.
///
/// Criteria iterate sorted by column name, so semantically identical
/// maps always produce the same predicate order and therefore the
/// same rendered SQL — required for cache-key determinism. A `None`
/// value fails fast before any SQL exists.
pub fn predicates_from(criteria: &Criteria) -> Result<Vec<Predicate>, ValidationError> {
    let mut predicates = Vec::with_capacity(criteria.len());
    for (column, value) in criteria.iter() {
        let value = value.ok_or_else(|| ValidationError::UndefinedCriterion {
            column: column.to_string(),
        })?;
        let op = if value.contains(WILDCARD) { Op::Like } else { Op::Eq };
        predicates.push(Predicate {
            column: column.to_string(),
            op,
            value: value.to_string(),
        });
    }
    Ok(predicates)
}

/// Render a SELECT with positional `?n` placeholders.
///
/// Keyed flat-file tables get the implicit comment/null-key filter
/// prepended before any caller predicates; keyed want-all queries are
/// ordered by the key column (skipped under DISTINCT projection,
/// where the key is not in the result set).
pub fn build(spec: &QuerySpec<'_>) -> (String, Vec<String>) {
    let mut sql = String::from("SELECT ");
    match spec.projection {
        Some(column) => {
            if spec.distinct {
                sql.push_str("DISTINCT ");
            }
            sql.push_str(&quote_ident(column));
        }
        None => sql.push('*'),
    }
    sql.push_str(" FROM ");
    sql.push_str(&quote_ident(spec.table));

    let mut clauses: Vec<String> = Vec::new();
    if spec.kind == BackendKind::FlatFile && spec.keyed {
        let key = quote_ident(spec.key_column);
        clauses.push(format!("{key} IS NOT NULL AND {key} NOT LIKE '#%'"));
    }

    let mut args = Vec::with_capacity(spec.predicates.len());
    for predicate in spec.predicates {
        args.push(predicate.value.clone());
        let op = match predicate.op {
            Op::Eq => "=",
            Op::Like => "LIKE",
        };
        clauses.push(format!(
            "{} {} ?{}",
            quote_ident(&predicate.column),
            op,
            args.len()
        ));
    }

    if !clauses.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&clauses.join(" AND "));
    }

    if !spec.want_all {
        sql.push_str(" LIMIT 1");
    } else if spec.keyed && !spec.distinct {
        sql.push_str(" ORDER BY ");
        sql.push_str(&quote_ident(spec.key_column));
    }

    (sql, args)
}

/// Double-quote an identifier, escaping embedded quotes.
pub(crate) fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
