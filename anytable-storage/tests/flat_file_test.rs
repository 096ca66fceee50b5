//! Flat-file tables: separators, headers, comment filtering, gzip.

use anytable_storage::{BackendKind, Criteria, Table, TableConfig};

fn table_in(dir: &tempfile::TempDir, name: &str) -> TableConfig {
    TableConfig::new(dir.path(), name)
}

#[test]
fn comma_file_with_column_override() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("ordinals.csv"), "one,1st\ntwo,2nd\nthree,3rd\n").unwrap();

    let mut table = Table::new(
        table_in(&dir, "ordinals")
            .unkeyed()
            .separator(b',')
            .columns(vec!["cardinal".to_string(), "ordinal".to_string()]),
    )
    .unwrap();

    let value = table
        .attribute("ordinal", &Criteria::new().with("cardinal", "one"))
        .unwrap();
    assert_eq!(value.as_deref(), Some("1st"));

    let rows = table.fetch_all(&Criteria::new()).unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].value("cardinal"), Some("one"));
    assert_eq!(rows[2].value("ordinal"), Some("3rd"));
}

#[test]
fn psv_file_keyed_lookup_and_absent_key() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("nums.psv"), "first|1st\nsecond|2nd\nthird|3rd\n").unwrap();

    let mut table = Table::new(
        table_in(&dir, "nums").columns(vec!["entry".to_string(), "number".to_string()]),
    )
    .unwrap();

    assert_eq!(table.backend_kind().unwrap(), BackendKind::FlatFile);
    assert_eq!(
        table
            .attribute("number", &Criteria::new().with("entry", "third"))
            .unwrap()
            .as_deref(),
        Some("3rd")
    );
    assert_eq!(
        table
            .attribute("number", &Criteria::new().with("entry", "fourth"))
            .unwrap(),
        None
    );
}

#[test]
fn bang_separator_is_the_default_for_db_files() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("hosts.db"),
        "entry!address\nweb!10.0.0.1\nmail!10.0.0.2\n",
    )
    .unwrap();

    let mut table = Table::new(table_in(&dir, "hosts")).unwrap();
    let row = table.fetch_by_key("mail").unwrap().unwrap();
    assert_eq!(row.value("address"), Some("10.0.0.2"));
}

#[test]
fn comment_and_null_key_rows_are_excluded_in_both_modes() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("t.csv"),
        "entry,v\n# a comment,x\nreal,1\n,orphaned\nother,2\n",
    )
    .unwrap();

    for max_slurp in [16_384u64, 0] {
        let mut table =
            Table::new(table_in(&dir, "t").separator(b',').max_slurp_bytes(max_slurp)).unwrap();
        assert_eq!(table.is_slurped().unwrap(), max_slurp > 0);

        let rows = table.fetch_all(&Criteria::new()).unwrap();
        let keys: Vec<_> = rows.iter().map(|r| r.value("entry").unwrap()).collect();
        assert_eq!(keys, vec!["other", "real"], "mode max_slurp={max_slurp}");
    }
}

#[test]
fn unkeyed_tables_keep_comment_rows_and_file_order() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("t.csv"), "entry,v\n#note,x\nzz,1\naa,2\n").unwrap();

    let mut table = Table::new(table_in(&dir, "t").separator(b',').unkeyed()).unwrap();
    let rows = table.fetch_all(&Criteria::new()).unwrap();
    let keys: Vec<_> = rows.iter().map(|r| r.value("entry").unwrap()).collect();
    assert_eq!(keys, vec!["#note", "zz", "aa"]);
}

#[test]
fn wildcard_criteria_pattern_match_exact_criteria_do_not() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("accounts.csv"),
        "entry,shell\nroot,/bin/sh\nrobot,/bin/false\ndaemon,/bin/sh\n",
    )
    .unwrap();

    for max_slurp in [16_384u64, 0] {
        let mut table = Table::new(
            table_in(&dir, "accounts")
                .separator(b',')
                .max_slurp_bytes(max_slurp),
        )
        .unwrap();

        let patterned = table.fetch_all(&Criteria::new().with("entry", "ro%")).unwrap();
        assert_eq!(patterned.len(), 2, "mode max_slurp={max_slurp}");

        let exact = table.fetch_all(&Criteria::new().with("entry", "ro")).unwrap();
        assert!(exact.is_empty(), "mode max_slurp={max_slurp}");
    }
}

#[test]
fn gzip_flat_file_round_trip() {
    use std::io::Write;

    let dir = tempfile::tempdir().unwrap();
    let file = std::fs::File::create(dir.path().join("zipped.csv.gz")).unwrap();
    let mut encoder = flate2::write::GzEncoder::new(file, flate2::Compression::default());
    encoder
        .write_all(b"entry,number\nfirst,1st\nsecond,2nd\n")
        .unwrap();
    encoder.finish().unwrap();

    let mut table = Table::new(table_in(&dir, "zipped").separator(b',')).unwrap();
    assert_eq!(table.backend_kind().unwrap(), BackendKind::FlatFile);
    assert_eq!(
        table.attribute_for_key("number", "second").unwrap().as_deref(),
        Some("2nd")
    );
}

#[test]
fn blank_fields_read_back_as_null() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("t.csv"), "entry,note\nfirst,\nsecond,set\n").unwrap();

    let mut table = Table::new(table_in(&dir, "t").separator(b',')).unwrap();
    let row = table.fetch_by_key("first").unwrap().unwrap();
    assert!(row.has_column("note"));
    assert_eq!(row.value("note"), None);
}
