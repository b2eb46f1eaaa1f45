//! Shared helper functions for CLI commands
//!
//! Loading and saving sheets, row numbering, and small formatting helpers
//! used across command modules.

use miette::{IntoDiagnostic, Result, WrapErr};
use std::fs;
use std::path::Path;

use crate::core::{CollectionError, SampleCollection};
use crate::sheet::{SheetCodec, SheetFormat};

/// Read a sheet from disk into a collection
///
/// Rows without a sample name are named with `prefix`.
pub fn load_collection(path: &Path, prefix: &str) -> Result<SampleCollection> {
    if !path.exists() {
        return Err(miette::miette!("File not found: {}", path.display()));
    }
    let bytes = fs::read(path)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to read {}", path.display()))?;

    let mut collection =
        SampleCollection::new().with_codec(SheetCodec::new().with_name_prefix(prefix));
    collection
        .decode(&bytes)
        .wrap_err_with(|| format!("Failed to import {}", path.display()))?;
    Ok(collection)
}

/// Format to write for a path
///
/// Only CSV and xlsx are written; legacy workbook formats can be read but
/// have to be exported to one of those first.
pub fn writable_format(path: &Path) -> Result<SheetFormat> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());
    match ext.as_deref() {
        Some("xls") | Some("xlsb") | Some("ods") => Err(miette::miette!(
            help = "use `chy export` to convert it to .xlsx or .csv first",
            "Cannot write {} files: {}",
            ext.as_deref().unwrap_or_default(),
            path.display()
        )),
        _ => Ok(SheetFormat::from_path(path)),
    }
}

/// Encode a collection and write it to `path`
pub fn save_collection(collection: &SampleCollection, path: &Path) -> Result<SheetFormat> {
    let format = writable_format(path)?;
    let bytes = collection.encode(format)?;
    fs::write(path, bytes)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to write {}", path.display()))?;
    Ok(format)
}

/// Convert a 1-based row number to a collection index
pub fn row_index(row: usize) -> Result<usize> {
    row.checked_sub(1)
        .ok_or_else(|| miette::miette!("Rows are numbered from 1"))
}

/// Describe a collection error using 1-based row numbers
pub fn describe_row_error(err: CollectionError) -> miette::Report {
    match err {
        CollectionError::IndexOutOfRange { index, len } => miette::miette!(
            "Row {} does not exist (sheet has {} sample(s))",
            index + 1,
            len
        ),
        other => other.into(),
    }
}

/// Truncate a string to max_len characters, adding "..." if truncated
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::sample::Field;
    use tempfile::tempdir;

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("hello", 10), "hello");
        assert_eq!(truncate_str("hello world", 8), "hello...");
        assert_eq!(truncate_str("hi", 2), "hi");
        assert_eq!(truncate_str("サンプル名前", 5), "サン...");
    }

    #[test]
    fn test_row_index() {
        assert_eq!(row_index(1).unwrap(), 0);
        assert!(row_index(0).is_err());
    }

    #[test]
    fn test_writable_format() {
        assert_eq!(writable_format(Path::new("a.xlsx")).unwrap(), SheetFormat::Xlsx);
        assert_eq!(writable_format(Path::new("a.csv")).unwrap(), SheetFormat::Csv);
        assert!(writable_format(Path::new("a.xls")).is_err());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempdir().unwrap();
        for name in ["samples.csv", "samples.xlsx"] {
            let path = dir.path().join(name);
            let mut collection = SampleCollection::with_samples("Sample", 2);
            collection.update(1, Field::CrucibleWeight, "10.2").unwrap();

            save_collection(&collection, &path).unwrap();
            let loaded = load_collection(&path, "Sample").unwrap();
            assert_eq!(loaded.records(), collection.records());
        }
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        assert!(load_collection(&dir.path().join("nope.csv"), "Sample").is_err());
    }

    #[test]
    fn test_describe_row_error_uses_row_numbers() {
        let err = CollectionError::IndexOutOfRange { index: 4, len: 2 };
        assert_eq!(
            describe_row_error(err).to_string(),
            "Row 5 does not exist (sheet has 2 sample(s))"
        );
    }
}
