//! The public table facade.
//!
//! Owns the configuration, lazily resolves the physical format on
//! first data access, and routes every operation through the slurp
//! store when one exists, otherwise through the query builder, the
//! result cache, and the backend engine.

use std::time::SystemTime;

use anytable_core::{
    AccessError, CachedValue, ConfigError, Criteria, Row, TableConfig, ValidationError,
};

use crate::backend::{Backend, BackendKind};
use crate::format::{self, Resolved};
use crate::parse::flat::parse_flat;
use crate::parse::markup::parse_markup;
use crate::query::builder::{self, Op, Predicate, QuerySpec};
use crate::query::{self, signature};
use crate::slurp::SlurpStore;

/// Read-only access to one table.
///
/// Construction only validates configuration; the backend is resolved
/// and opened on the first data-accessing call and fixed for the
/// instance's lifetime. Dropping the table closes the engine
/// connection and removes any temporary decompressed file.
#[derive(Debug)]
pub struct Table {
    config: TableConfig,
    state: Option<Opened>,
}

#[derive(Debug)]
struct Opened {
    kind: BackendKind,
    resolved: Resolved,
    slurp: Option<SlurpStore>,
    backend: Option<Backend>,
}

impl Opened {
    /// The engine connection, materialized on demand for tables that
    /// were slurped at open time (raw SQL still needs an engine).
    fn engine(&mut self, config: &TableConfig) -> Result<&Backend, AccessError> {
        let backend = match self.backend.take() {
            Some(backend) => backend,
            None => Backend::open(&self.resolved, config)?,
        };
        Ok(self.backend.insert(backend))
    }
}

impl Table {
    /// Validate the config and create an unopened table. Fails with
    /// `ConfigError` before any file probing when `directory` does
    /// not name a directory.
    pub fn new(config: TableConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            state: None,
        })
    }

    /// Clone this table's configuration, apply edits, and build a
    /// fresh (unopened) table from the result.
    pub fn with_overrides(
        &self,
        edits: impl FnOnce(&mut TableConfig),
    ) -> Result<Table, ConfigError> {
        let mut config = self.config.clone();
        edits(&mut config);
        Table::new(config)
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// Every non-comment row; key order when keyed, file order
    /// otherwise. Criteria filter with exact or wildcard matching.
    pub fn fetch_all(&mut self, criteria: &Criteria) -> Result<Vec<Row>, AccessError> {
        let predicates = query::predicates_from(criteria)?;
        self.with_open(|config, opened| {
            if let Some(slurp) = &opened.slurp {
                let rows = if predicates.is_empty() {
                    slurp.all_rows()
                } else {
                    slurp.filter(&predicates)
                };
                return Ok(rows);
            }

            let (sql, args) = builder::build(&select_spec(config, opened.kind, &predicates, true));
            let key = signature("fetch_all", &sql, &args, true);
            if let Some(CachedValue::Rows(rows)) = cache_get(config, &key) {
                return Ok(rows);
            }
            let rows = opened.engine(config)?.select(&sql, &args)?;
            cache_set(config, &key, CachedValue::Rows(rows.clone()));
            Ok(rows)
        })
    }

    /// First matching row, or `None`. A sole exact criterion on the
    /// key column short-circuits to the slurp store's point lookup.
    pub fn fetch_one(&mut self, criteria: &Criteria) -> Result<Option<Row>, AccessError> {
        let predicates = query::predicates_from(criteria)?;
        self.with_open(|config, opened| {
            if let Some(slurp) = &opened.slurp {
                if let Some(key) = key_point_lookup(config, &predicates) {
                    return Ok(slurp.get(key).cloned());
                }
                if predicates.is_empty() {
                    return Ok(slurp.first().cloned());
                }
                return Ok(slurp.first_match(&predicates).cloned());
            }

            let (sql, args) = builder::build(&select_spec(config, opened.kind, &predicates, false));
            let key = signature("fetch_one", &sql, &args, false);
            if let Some(CachedValue::OneRow(row)) = cache_get(config, &key) {
                return Ok(row);
            }
            let row = opened
                .engine(config)?
                .select(&sql, &args)?
                .into_iter()
                .next();
            cache_set(config, &key, CachedValue::OneRow(row.clone()));
            Ok(row)
        })
    }

    /// Point lookup by key value. Fails before any lookup when the
    /// table is unkeyed.
    pub fn fetch_by_key(&mut self, key: &str) -> Result<Option<Row>, AccessError> {
        self.require_keyed("fetch_by_key")?;
        let criteria = Criteria::new().with(self.config.key_column.clone(), key);
        self.fetch_one(&criteria)
    }

    /// Single value of an arbitrary column, from the first matching
    /// row.
    pub fn attribute(
        &mut self,
        column: &str,
        criteria: &Criteria,
    ) -> Result<Option<String>, AccessError> {
        let predicates = query::predicates_from(criteria)?;
        self.with_open(|config, opened| {
            if let Some(slurp) = &opened.slurp {
                return slurp_attribute_one(config, slurp, column, &predicates);
            }

            let mut spec = select_spec(config, opened.kind, &predicates, false);
            spec.projection = Some(column);
            let (sql, args) = builder::build(&spec);
            let key = signature("attribute", &sql, &args, false);
            if let Some(CachedValue::OneValue(value)) = cache_get(config, &key) {
                return Ok(value);
            }
            let value = opened
                .engine(config)?
                .select(&sql, &args)?
                .into_iter()
                .next()
                .and_then(|row| single_value(&row));
            cache_set(config, &key, CachedValue::OneValue(value.clone()));
            Ok(value)
        })
    }

    /// Values of an arbitrary column across every matching row,
    /// optionally de-duplicated.
    pub fn attribute_all(
        &mut self,
        column: &str,
        criteria: &Criteria,
        distinct: bool,
    ) -> Result<Vec<Option<String>>, AccessError> {
        let predicates = query::predicates_from(criteria)?;
        self.with_open(|config, opened| {
            if let Some(slurp) = &opened.slurp {
                let values = if predicates.is_empty() {
                    if distinct {
                        slurp.project_distinct(column)
                    } else {
                        slurp.project(column)
                    }
                } else {
                    let projected = slurp
                        .filter(&predicates)
                        .iter()
                        .map(|row| row.get(column).flatten())
                        .collect();
                    if distinct {
                        distinct_values(projected)
                    } else {
                        projected
                    }
                };
                return Ok(values);
            }

            let mut spec = select_spec(config, opened.kind, &predicates, true);
            spec.projection = Some(column);
            spec.distinct = distinct;
            let (sql, args) = builder::build(&spec);
            let key = signature("attribute", &sql, &args, true);
            if let Some(CachedValue::Values(values)) = cache_get(config, &key) {
                return Ok(values);
            }
            let values: Vec<Option<String>> = opened
                .engine(config)?
                .select(&sql, &args)?
                .iter()
                .map(single_value)
                .collect();
            cache_set(config, &key, CachedValue::Values(values.clone()));
            Ok(values)
        })
    }

    /// Single value of `column` for the row keyed by `key`. Fails
    /// before any lookup when the table is unkeyed.
    pub fn attribute_for_key(
        &mut self,
        column: &str,
        key: &str,
    ) -> Result<Option<String>, AccessError> {
        self.require_keyed(column)?;
        let criteria = Criteria::new().with(self.config.key_column.clone(), key);
        self.attribute(column, &criteria)
    }

    /// Execute a raw SQL fragment against the engine. A
    /// `FROM <table>` clause is inserted when the fragment has none.
    /// Slurped tables materialize their engine on demand here.
    pub fn raw_query(&mut self, fragment: &str) -> Result<Vec<Row>, AccessError> {
        self.with_open(|config, opened| {
            let sql = ensure_from_clause(fragment, &config.name);
            let key = signature("raw", &sql, &[], true);
            if let Some(CachedValue::Rows(rows)) = cache_get(config, &key) {
                return Ok(rows);
            }
            let rows = opened.engine(config)?.select(&sql, &[])?;
            cache_set(config, &key, CachedValue::Rows(rows.clone()));
            Ok(rows)
        })
    }

    /// Last-modified time of the table's physical file.
    pub fn updated(&mut self) -> Result<SystemTime, AccessError> {
        self.with_open(|_, opened| Ok(opened.resolved.updated))
    }

    /// Which physical format services this table.
    pub fn backend_kind(&mut self) -> Result<BackendKind, AccessError> {
        self.with_open(|_, opened| Ok(opened.kind))
    }

    /// Whether the table was loaded fully into memory at open time.
    pub fn is_slurped(&mut self) -> Result<bool, AccessError> {
        self.with_open(|_, opened| Ok(opened.slurp.is_some()))
    }

    /// Run `f` with the opened state, opening on first use. Repeat
    /// calls are no-ops once opened; the backend kind never changes
    /// afterwards.
    fn with_open<T>(
        &mut self,
        f: impl FnOnce(&TableConfig, &mut Opened) -> Result<T, AccessError>,
    ) -> Result<T, AccessError> {
        let opened = match self.state.take() {
            Some(opened) => opened,
            None => open_state(&self.config)?,
        };
        f(&self.config, self.state.insert(opened))
    }

    fn require_keyed(&self, accessor: &str) -> Result<(), ValidationError> {
        if self.config.keyed {
            Ok(())
        } else {
            Err(ValidationError::KeyLookupOnUnkeyed {
                accessor: accessor.to_string(),
                table: self.config.name.clone(),
            })
        }
    }
}

/// Resolve the format and build slurp store or backend, per the
/// slurp policy: flat/markup files at or below the threshold are
/// slurped, everything else goes to the engine. `.sql` always wins
/// regardless of size and is never slurped.
fn open_state(config: &TableConfig) -> Result<Opened, AccessError> {
    let resolved = format::resolve(&config.directory, &config.name, config.separator)?;
    let kind = resolved.kind;

    let slurpable = kind != BackendKind::Relational
        && config.max_slurp_bytes > 0
        && resolved.size <= config.max_slurp_bytes;

    let slurp = if slurpable {
        let parsed = match kind {
            BackendKind::FlatFile => Some(parse_flat(
                &resolved.path,
                resolved.separator,
                config.columns.as_deref(),
            )?),
            BackendKind::Markup => Some(parse_markup(&resolved.path)?),
            BackendKind::Relational => None,
        };
        parsed.map(|p| SlurpStore::build(p, config.keyed, &config.key_column))
    } else {
        None
    };

    let backend = if slurp.is_none() {
        Some(Backend::open(&resolved, config)?)
    } else {
        None
    };

    tracing::debug!(
        table = %config.name,
        ?kind,
        slurped = slurp.is_some(),
        "opened table"
    );

    Ok(Opened {
        kind,
        resolved,
        slurp,
        backend,
    })
}

fn select_spec<'a>(
    config: &'a TableConfig,
    kind: BackendKind,
    predicates: &'a [Predicate],
    want_all: bool,
) -> QuerySpec<'a> {
    QuerySpec {
        table: &config.name,
        kind,
        keyed: config.keyed,
        key_column: &config.key_column,
        projection: None,
        distinct: false,
        predicates,
        want_all,
    }
}

/// The key value, when the predicates are a sole exact match on the
/// key column of a keyed table.
fn key_point_lookup<'a>(config: &TableConfig, predicates: &'a [Predicate]) -> Option<&'a str> {
    match predicates {
        [p] if config.keyed && p.column == config.key_column && p.op == Op::Eq => Some(&p.value),
        _ => None,
    }
}

fn slurp_attribute_one(
    config: &TableConfig,
    slurp: &SlurpStore,
    column: &str,
    predicates: &[Predicate],
) -> Result<Option<String>, AccessError> {
    if predicates.is_empty() {
        return Ok(slurp.first().and_then(|row| row.get(column)).flatten());
    }
    if let Some(key) = key_point_lookup(config, predicates) {
        return match slurp.get(key) {
            None => Ok(None),
            Some(row) if !row.has_column(column) => Err(ValidationError::NoSuchColumn {
                column: column.to_string(),
                table: config.name.clone(),
            }
            .into()),
            Some(row) => Ok(row.get(column).flatten()),
        };
    }
    Ok(slurp
        .first_match(predicates)
        .and_then(|row| row.get(column))
        .flatten())
}

/// First column of a projected row.
fn single_value(row: &Row) -> Option<String> {
    row.iter()
        .next()
        .and_then(|(_, value)| value.map(str::to_string))
}

fn distinct_values(values: Vec<Option<String>>) -> Vec<Option<String>> {
    let mut seen = std::collections::HashSet::new();
    values
        .into_iter()
        .filter(|value| seen.insert(value.clone()))
        .collect()
}

fn cache_get(config: &TableConfig, key: &str) -> Option<CachedValue> {
    let cache = config.cache.as_ref()?;
    let hit = cache.get(key);
    tracing::trace!(table = %config.name, hit = hit.is_some(), "cache probe");
    hit
}

fn cache_set(config: &TableConfig, key: &str, value: CachedValue) {
    if let Some(cache) = &config.cache {
        cache.set(key, value, config.cache_ttl);
    }
}

/// Insert a `FROM` clause when the fragment carries none: before the
/// first trailing clause keyword if present, otherwise at the end.
fn ensure_from_clause(fragment: &str, table: &str) -> String {
    let mut tokens: Vec<String> = fragment.split_whitespace().map(str::to_string).collect();
    if tokens.iter().any(|t| t.eq_ignore_ascii_case("from")) {
        return fragment.to_string();
    }
    let from = format!("FROM {}", builder::quote_ident(table));
    let clause = tokens.iter().position(|t| {
        ["where", "group", "order", "limit"]
            .iter()
            .any(|kw| t.eq_ignore_ascii_case(kw))
    });
    match clause {
        Some(i) => tokens.insert(i, from),
        None => tokens.push(from),
    }
    tokens.join(" ")
}
