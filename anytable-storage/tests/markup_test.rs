//! Markup (XML) tables.

use anytable_storage::{BackendKind, Criteria, Table, TableConfig};

const NUMBERS: &str = "<numbers>\
    <num><entry>one</entry><fr>Un</fr></num>\
    <num><entry>two</entry><fr>Deux</fr></num>\
    <num><entry>both</entry><fr>Deux</fr></num>\
</numbers>";

fn write_numbers(dir: &tempfile::TempDir) {
    std::fs::write(dir.path().join("numbers.xml"), NUMBERS).unwrap();
}

#[test]
fn filtered_fetch_all_counts_matches() {
    let dir = tempfile::tempdir().unwrap();
    write_numbers(&dir);

    for max_slurp in [16_384u64, 0] {
        let mut table = Table::new(
            TableConfig::new(dir.path(), "numbers").max_slurp_bytes(max_slurp),
        )
        .unwrap();
        assert_eq!(table.backend_kind().unwrap(), BackendKind::Markup);

        let rows = table.fetch_all(&Criteria::new().with("fr", "Deux")).unwrap();
        assert_eq!(rows.len(), 2, "mode max_slurp={max_slurp}");
    }
}

#[test]
fn keyed_markup_lookup() {
    let dir = tempfile::tempdir().unwrap();
    write_numbers(&dir);

    let mut table = Table::new(TableConfig::new(dir.path(), "numbers")).unwrap();
    assert_eq!(
        table.attribute_for_key("fr", "two").unwrap().as_deref(),
        Some("Deux")
    );
    assert_eq!(table.attribute_for_key("fr", "ten").unwrap(), None);
}

#[test]
fn distinct_attribute_values_across_markup_rows() {
    let dir = tempfile::tempdir().unwrap();
    write_numbers(&dir);

    for max_slurp in [16_384u64, 0] {
        let mut table = Table::new(
            TableConfig::new(dir.path(), "numbers").max_slurp_bytes(max_slurp),
        )
        .unwrap();

        let distinct = table
            .attribute_all("fr", &Criteria::new(), true)
            .unwrap();
        assert_eq!(distinct.len(), 2, "mode max_slurp={max_slurp}");

        let all = table.attribute_all("fr", &Criteria::new(), false).unwrap();
        assert_eq!(all.len(), 3, "mode max_slurp={max_slurp}");
    }
}

#[test]
fn missing_fields_are_null() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("t.xml"),
        "<t><r><entry>a</entry><note/></r><r><entry>b</entry><note>set</note></r></t>",
    )
    .unwrap();

    let mut table = Table::new(TableConfig::new(dir.path(), "t")).unwrap();
    let row = table.fetch_by_key("a").unwrap().unwrap();
    assert!(row.has_column("note"));
    assert_eq!(row.value("note"), None);
}
