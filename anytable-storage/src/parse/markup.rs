//! Hierarchical markup (XML) parser.
//!
//! Expects the simple two-level shape `<table><row><col>value</col>
//! ...</row>...</table>`: children of the root are records, their
//! children are columns. Element names become column names; empty
//! elements and empty text become NULL. Deeper nesting is ignored.

use std::path::Path;

use anytable_core::{ParseError, Row};
use quick_xml::events::Event;
use quick_xml::Reader;

use super::ParsedTable;

pub fn parse_markup(path: &Path) -> Result<ParsedTable, ParseError> {
    let mut reader = Reader::from_file(path).map_err(|e| reject(path, e.to_string()))?;
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut depth = 0usize;
    let mut columns: Vec<String> = Vec::new();
    let mut rows: Vec<Row> = Vec::new();
    let mut row: Option<Row> = None;
    let mut field: Option<String> = None;
    let mut text: Option<String> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Err(e) => return Err(reject(path, e.to_string())),
            Ok(Event::Eof) => break,
            Ok(Event::Start(e)) => {
                depth += 1;
                match depth {
                    2 => row = Some(Row::new()),
                    3 => {
                        field = Some(String::from_utf8_lossy(e.name().as_ref()).into_owned());
                        text = None;
                    }
                    _ => {}
                }
            }
            Ok(Event::Empty(e)) => {
                if depth == 2 {
                    if let Some(current) = row.as_mut() {
                        let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                        remember(&mut columns, &name);
                        current.push(name, None);
                    }
                } else if depth == 1 {
                    rows.push(Row::new());
                }
            }
            Ok(Event::Text(t)) => {
                if field.is_some() {
                    let value = t
                        .unescape()
                        .map_err(|e| reject(path, e.to_string()))?
                        .into_owned();
                    text = Some(value);
                }
            }
            Ok(Event::CData(t)) => {
                if field.is_some() {
                    text = Some(String::from_utf8_lossy(&t.into_inner()).into_owned());
                }
            }
            Ok(Event::End(_)) => {
                match depth {
                    3 => {
                        if let Some(name) = field.take() {
                            if let Some(current) = row.as_mut() {
                                remember(&mut columns, &name);
                                let value = text.take().filter(|s| !s.is_empty());
                                current.push(name, value);
                            }
                        }
                    }
                    2 => {
                        if let Some(finished) = row.take() {
                            rows.push(finished);
                        }
                    }
                    _ => {}
                }
                depth = depth.saturating_sub(1);
            }
            Ok(_) => {}
        }
        buf.clear();
    }

    tracing::trace!(path = %path.display(), rows = rows.len(), "parsed markup file");
    Ok(ParsedTable { columns, rows })
}

fn remember(columns: &mut Vec<String>, name: &str) {
    if !columns.iter().any(|c| c == name) {
        columns.push(name.to_string());
    }
}

fn reject(path: &Path, message: String) -> ParseError {
    ParseError::Markup {
        path: path.display().to_string(),
        message,
    }
}
