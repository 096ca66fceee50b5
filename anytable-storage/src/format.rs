//! Format resolver: probe a directory for a table's physical file.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use anytable_core::{AccessError, ParseError};
use flate2::read::GzDecoder;
use tempfile::NamedTempFile;

use crate::backend::BackendKind;

/// Outcome of format probing: which backend kind applies, the file to
/// read, and the table's "updated" timestamp.
///
/// For compressed tables `path` points at the decompressed temp file,
/// whose handle is held here so it lives as long as the opened table
/// and is removed on drop.
#[derive(Debug)]
pub struct Resolved {
    pub kind: BackendKind,
    pub path: PathBuf,
    /// Effective flat-file separator. `.psv` forces `|`.
    pub separator: u8,
    /// Last-modified time of the chosen physical file, exposed
    /// verbatim to callers.
    pub updated: SystemTime,
    /// Size of the file the parsers will read (decompressed size for
    /// compressed tables). Drives the slurp decision.
    pub size: u64,
    /// Guard for the decompressed temp file, held only for its drop.
    _temp: Option<NamedTempFile>,
}

/// Probe `directory` for `base`, first match wins:
/// `.sql`, `.csv.gz`, `.db.gz`, `.psv`, `.csv`, `.db`, `.xml`.
pub fn resolve(directory: &Path, base: &str, separator: u8) -> Result<Resolved, AccessError> {
    let sql = directory.join(format!("{base}.sql"));
    if sql.is_file() {
        return plain(BackendKind::Relational, sql, separator);
    }

    for ext in ["csv.gz", "db.gz"] {
        let path = directory.join(format!("{base}.{ext}"));
        if path.is_file() {
            return decompress(path, separator);
        }
    }

    let psv = directory.join(format!("{base}.psv"));
    if psv.is_file() {
        return plain(BackendKind::FlatFile, psv, b'|');
    }

    for ext in ["csv", "db"] {
        let path = directory.join(format!("{base}.{ext}"));
        if path.is_file() {
            return plain(BackendKind::FlatFile, path, separator);
        }
    }

    let xml = directory.join(format!("{base}.xml"));
    if xml.is_file() {
        return plain(BackendKind::Markup, xml, separator);
    }

    Err(AccessError::TableNotFound {
        directory: directory.display().to_string(),
        base: base.to_string(),
    })
}

fn plain(kind: BackendKind, path: PathBuf, separator: u8) -> Result<Resolved, AccessError> {
    let meta = stat(&path)?;
    tracing::debug!(path = %path.display(), ?kind, "resolved table file");
    Ok(Resolved {
        kind,
        updated: modified(&path, &meta)?,
        size: meta.len(),
        separator,
        path,
        _temp: None,
    })
}

/// Gunzip a compressed flat file into a temp file and treat that as
/// the table's physical file. The original file's mtime is kept as
/// the updated timestamp.
fn decompress(path: PathBuf, separator: u8) -> Result<Resolved, AccessError> {
    let meta = stat(&path)?;
    let updated = modified(&path, &meta)?;

    let source = File::open(&path).map_err(|e| io_error(&path, e))?;
    let mut decoder = GzDecoder::new(source);
    let mut temp = NamedTempFile::new().map_err(|e| io_error(&path, e))?;
    let size = io::copy(&mut decoder, &mut temp).map_err(|e| io_error(&path, e))?;
    tracing::debug!(
        path = %path.display(),
        temp = %temp.path().display(),
        size,
        "decompressed table file"
    );

    Ok(Resolved {
        kind: BackendKind::FlatFile,
        path: temp.path().to_path_buf(),
        separator,
        updated,
        size,
        _temp: Some(temp),
    })
}

fn stat(path: &Path) -> Result<std::fs::Metadata, AccessError> {
    path.metadata().map_err(|e| io_error(path, e))
}

fn modified(path: &Path, meta: &std::fs::Metadata) -> Result<SystemTime, AccessError> {
    meta.modified().map_err(|e| io_error(path, e))
}

fn io_error(path: &Path, e: io::Error) -> AccessError {
    ParseError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn probe_order_prefers_sql() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("t.csv"), "entry!v\na!1\n").unwrap();
        std::fs::write(dir.path().join("t.sql"), b"").unwrap();
        let resolved = resolve(dir.path(), "t", b'!').unwrap();
        assert_eq!(resolved.kind, BackendKind::Relational);
    }

    #[test]
    fn psv_forces_pipe_separator() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("t.psv"), "entry|v\na|1\n").unwrap();
        let resolved = resolve(dir.path(), "t", b'!').unwrap();
        assert_eq!(resolved.kind, BackendKind::FlatFile);
        assert_eq!(resolved.separator, b'|');
    }

    #[test]
    fn missing_table_names_directory_and_base() {
        let dir = tempfile::tempdir().unwrap();
        let err = resolve(dir.path(), "absent", b'!').unwrap_err();
        match err {
            AccessError::TableNotFound { directory, base } => {
                assert_eq!(base, "absent");
                assert!(directory.contains(dir.path().file_name().unwrap().to_str().unwrap()));
            }
            other => panic!("expected TableNotFound, got {other:?}"),
        }
    }

    #[test]
    fn gzip_is_decompressed_to_temp() {
        let dir = tempfile::tempdir().unwrap();
        let gz_path = dir.path().join("t.csv.gz");
        let file = std::fs::File::create(&gz_path).unwrap();
        let mut encoder = flate2::write::GzEncoder::new(file, flate2::Compression::default());
        encoder.write_all(b"entry,v\na,1\n").unwrap();
        encoder.finish().unwrap();

        let resolved = resolve(dir.path(), "t", b',').unwrap();
        assert_eq!(resolved.kind, BackendKind::FlatFile);
        assert_ne!(resolved.path, gz_path);
        assert_eq!(std::fs::read_to_string(&resolved.path).unwrap(), "entry,v\na,1\n");
        assert_eq!(resolved.size, 12);
    }
}
