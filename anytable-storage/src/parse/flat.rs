//! Separated flat-file parser.

use std::path::Path;

use anytable_core::{ParseError, Row};

use super::ParsedTable;

/// Parse a separated flat file.
///
/// The first record is the header unless a `columns` override is
/// given (headerless fixed-format files such as system account
/// tables). Ragged records are tolerated: missing trailing fields and
/// empty strings both become NULL, extra fields are dropped. Blank
/// lines are skipped by the reader. Comment rows are NOT filtered
/// here; keyed-table comment policy is applied by the slurp store and
/// the query builder.
pub fn parse_flat(
    path: &Path,
    separator: u8,
    columns: Option<&[String]>,
) -> Result<ParsedTable, ParseError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(separator)
        .flexible(true)
        .has_headers(false)
        .from_path(path)
        .map_err(|e| reject(path, e))?;

    let mut records = reader.records();

    let columns: Vec<String> = match columns {
        Some(cols) => cols.to_vec(),
        None => match records.next() {
            Some(header) => header
                .map_err(|e| reject(path, e))?
                .iter()
                .map(|field| field.to_string())
                .collect(),
            None => Vec::new(),
        },
    };

    let mut rows = Vec::new();
    for record in records {
        let record = record.map_err(|e| reject(path, e))?;
        let mut row = Row::with_capacity(columns.len());
        for (i, column) in columns.iter().enumerate() {
            let value = record
                .get(i)
                .filter(|field| !field.is_empty())
                .map(|field| field.to_string());
            row.push(column.clone(), value);
        }
        rows.push(row);
    }

    tracing::trace!(path = %path.display(), rows = rows.len(), "parsed flat file");
    Ok(ParsedTable { columns, rows })
}

fn reject(path: &Path, e: csv::Error) -> ParseError {
    ParseError::FlatFile {
        path: path.display().to_string(),
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(contents: &str) -> tempfile::TempPath {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, contents.as_bytes()).unwrap();
        file.into_temp_path()
    }

    #[test]
    fn header_row_names_columns() {
        let path = write("entry!number\nfirst!1st\nsecond!2nd\n");
        let parsed = parse_flat(&path, b'!', None).unwrap();
        assert_eq!(parsed.columns, vec!["entry", "number"]);
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed.rows[0].value("number"), Some("1st"));
    }

    #[test]
    fn columns_override_treats_every_record_as_data() {
        let path = write("one,1st\ntwo,2nd\nthree,3rd\n");
        let cols = vec!["cardinal".to_string(), "ordinal".to_string()];
        let parsed = parse_flat(&path, b',', Some(&cols)).unwrap();
        assert_eq!(parsed.len(), 3);
        assert_eq!(parsed.rows[0].value("cardinal"), Some("one"));
        assert_eq!(parsed.rows[2].value("ordinal"), Some("3rd"));
    }

    #[test]
    fn blank_fields_and_short_records_are_null() {
        let path = write("entry!a!b\nx!!only-a-missing\ny!short\n");
        let parsed = parse_flat(&path, b'!', None).unwrap();
        assert_eq!(parsed.rows[0].value("a"), None);
        assert_eq!(parsed.rows[0].value("b"), Some("only-a-missing"));
        assert_eq!(parsed.rows[1].value("a"), Some("short"));
        assert_eq!(parsed.rows[1].get("b"), Some(None));
    }

    #[test]
    fn blank_lines_are_skipped() {
        let path = write("entry!v\n\nfirst!1\n\nsecond!2\n");
        let parsed = parse_flat(&path, b'!', None).unwrap();
        assert_eq!(parsed.len(), 2);
    }
}
