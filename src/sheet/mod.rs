//! Spreadsheet import/export
//!
//! Samples are exchanged as a single table with a fixed header row:
//!
//! | Sample Name | Crucible Number | Crucible Weight | Sample Weight | Ash Weight | Char Yield |
//!
//! Columns are matched by header name, in any order. Two formats are
//! supported: CSV and Excel workbooks. Workbooks are read with calamine
//! (xlsx, xls, xlsb, ods) and written as xlsx.

mod common;
mod delimited;
mod workbook;

use miette::Diagnostic;
use std::borrow::Cow;
use std::path::Path;
use thiserror::Error;

use crate::entities::sample::{SampleRecord, DEFAULT_NAME_PREFIX};

pub use common::Column;

/// Errors raised while reading or writing a sheet
#[derive(Debug, Error, Diagnostic)]
pub enum CodecError {
    #[error("Malformed spreadsheet: {reason}")]
    #[diagnostic(
        code(chy::sheet::malformed),
        help("expected a header row with: Sample Name, Crucible Number, Crucible Weight, Sample Weight, Ash Weight, Char Yield")
    )]
    MalformedFile { reason: String },

    #[error("Failed to write spreadsheet: {0}")]
    #[diagnostic(code(chy::sheet::encode))]
    Encode(String),
}

impl CodecError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        CodecError::MalformedFile {
            reason: reason.into(),
        }
    }
}

/// On-disk sheet formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SheetFormat {
    /// Comma-separated values, UTF-8
    #[default]
    Csv,
    /// Excel workbook
    Xlsx,
}

const ZIP_MAGIC: &[u8] = b"PK\x03\x04";
const OLE_MAGIC: &[u8] = b"\xD0\xCF\x11\xE0";

impl SheetFormat {
    /// Sniff the format from file contents
    ///
    /// ZIP containers (xlsx, xlsb, ods) and OLE2 compound files (xls) are
    /// workbooks; anything else is treated as CSV.
    pub fn detect(bytes: &[u8]) -> Self {
        if bytes.starts_with(ZIP_MAGIC) || bytes.starts_with(OLE_MAGIC) {
            SheetFormat::Xlsx
        } else {
            SheetFormat::Csv
        }
    }

    /// Pick the format to write from a file extension
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .as_deref()
        {
            Some("xlsx") => SheetFormat::Xlsx,
            _ => SheetFormat::Csv,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            SheetFormat::Csv => "csv",
            SheetFormat::Xlsx => "xlsx",
        }
    }
}

impl std::fmt::Display for SheetFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// Converts between sheet bytes and sample records
#[derive(Debug, Clone)]
pub struct SheetCodec {
    name_prefix: String,
}

impl Default for SheetCodec {
    fn default() -> Self {
        Self {
            name_prefix: DEFAULT_NAME_PREFIX.to_string(),
        }
    }
}

impl SheetCodec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefix for names given to rows without a sample name
    pub fn with_name_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.name_prefix = prefix.into();
        self
    }

    /// Prefix for default sample names
    pub fn name_prefix(&self) -> &str {
        &self.name_prefix
    }

    /// Read the first sheet of a CSV or workbook file
    pub fn decode(&self, bytes: &[u8]) -> Result<Vec<SampleRecord>, CodecError> {
        let format = SheetFormat::detect(bytes);
        let table = match format {
            SheetFormat::Csv => delimited::read(bytes)?,
            SheetFormat::Xlsx => workbook::read(bytes)?,
        };
        let records = common::table_to_records(&table, &self.name_prefix)?;
        tracing::debug!(%format, rows = table.rows.len(), records = records.len(), "decoded sheet");
        Ok(records)
    }

    /// Write one header row plus one row per record
    ///
    /// Records without a name are written under their positional default
    /// name, so every record produces a non-blank row that decodes back.
    pub fn encode(
        &self,
        records: &[SampleRecord],
        format: SheetFormat,
    ) -> Result<Vec<u8>, CodecError> {
        let records = self.with_default_names(records);
        let bytes = match format {
            SheetFormat::Csv => delimited::write(&records)?,
            SheetFormat::Xlsx => workbook::write(&records)?,
        };
        tracing::debug!(%format, records = records.len(), bytes = bytes.len(), "encoded sheet");
        Ok(bytes)
    }

    fn with_default_names<'a>(&self, records: &'a [SampleRecord]) -> Cow<'a, [SampleRecord]> {
        if records.iter().all(|r| !r.name.trim().is_empty()) {
            return Cow::Borrowed(records);
        }
        let named = records
            .iter()
            .enumerate()
            .map(|(idx, record)| {
                let mut record = record.clone();
                if record.name.trim().is_empty() {
                    record.name = format!("{} {}", self.name_prefix, idx + 1);
                }
                record
            })
            .collect();
        Cow::Owned(named)
    }
}

/// Decode with the default codec
pub fn decode(bytes: &[u8]) -> Result<Vec<SampleRecord>, CodecError> {
    SheetCodec::default().decode(bytes)
}

/// Encode with the default codec
pub fn encode(records: &[SampleRecord], format: SheetFormat) -> Result<Vec<u8>, CodecError> {
    SheetCodec::default().encode(records, format)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(name: &str, number: &str, weights: [&str; 3]) -> SampleRecord {
        let mut r = SampleRecord::new(name);
        r.crucible_number = number.to_string();
        r.crucible_weight = weights[0].to_string();
        r.sample_weight = weights[1].to_string();
        r.ash_weight = weights[2].to_string();
        r
    }

    fn mixed_collection() -> Vec<SampleRecord> {
        let mut computed = sample("Pine bark", "C-07", ["10", "5", "11.5"]);
        computed.set_yield(Some(30.0));
        let mut fractional = sample("Husk, rice", "C-08", ["12.3456", "1.0321", "12.5012"]);
        fractional.set_yield(Some(15.08));
        let pending = sample("Sample 3", "", ["10.00", "", ""]);
        vec![computed, fractional, pending]
    }

    #[test]
    fn test_detect_format() {
        assert_eq!(SheetFormat::detect(b"PK\x03\x04rest"), SheetFormat::Xlsx);
        assert_eq!(SheetFormat::detect(b"\xD0\xCF\x11\xE0rest"), SheetFormat::Xlsx);
        assert_eq!(SheetFormat::detect(b"Sample Name,Char Yield"), SheetFormat::Csv);
        assert_eq!(SheetFormat::detect(b""), SheetFormat::Csv);
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(SheetFormat::from_path(Path::new("run.XLSX")), SheetFormat::Xlsx);
        assert_eq!(SheetFormat::from_path(Path::new("run.csv")), SheetFormat::Csv);
        assert_eq!(SheetFormat::from_path(Path::new("run")), SheetFormat::Csv);
    }

    #[test]
    fn test_csv_round_trip() {
        let records = mixed_collection();
        let bytes = encode(&records, SheetFormat::Csv).unwrap();
        assert_eq!(decode(&bytes).unwrap(), records);
    }

    #[test]
    fn test_xlsx_round_trip() {
        let records = mixed_collection();
        let bytes = encode(&records, SheetFormat::Xlsx).unwrap();
        assert!(bytes.starts_with(ZIP_MAGIC));
        assert_eq!(decode(&bytes).unwrap(), records);
    }

    #[test]
    fn test_csv_layout() {
        let records = mixed_collection();
        let bytes = encode(&records[..1], SheetFormat::Csv).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        insta::assert_snapshot!(text, @r"
        Sample Name,Crucible Number,Crucible Weight,Sample Weight,Ash Weight,Char Yield
        Pine bark,C-07,10,5,11.5,30.00
        ");
    }

    #[test]
    fn test_empty_collection_encodes_header_only() {
        let bytes = encode(&[], SheetFormat::Csv).unwrap();
        assert!(decode(&bytes).unwrap().is_empty());
        let bytes = encode(&[], SheetFormat::Xlsx).unwrap();
        assert!(decode(&bytes).unwrap().is_empty());
    }

    #[test]
    fn test_custom_name_prefix() {
        let codec = SheetCodec::new().with_name_prefix("Run");
        let records = codec
            .decode(b"Sample Name,Crucible Weight\n,10\n,11\n")
            .unwrap();
        assert_eq!(records[0].name, "Run 1");
        assert_eq!(records[1].name, "Run 2");
    }

    #[test]
    fn test_garbage_workbook_is_malformed() {
        let err = decode(b"PK\x03\x04 definitely not a zip").unwrap_err();
        assert!(matches!(err, CodecError::MalformedFile { .. }));
    }

    #[test]
    fn test_blank_named_empty_rows_are_kept() {
        let records = vec![
            SampleRecord::new("Sample 1"),
            SampleRecord::new(""),
            sample("Sample 3", "", ["10", "", ""]),
            SampleRecord::new(" "),
        ];
        for format in [SheetFormat::Csv, SheetFormat::Xlsx] {
            let decoded = decode(&encode(&records, format).unwrap()).unwrap();
            let names: Vec<_> = decoded.iter().map(|r| r.name.as_str()).collect();
            assert_eq!(names, ["Sample 1", "Sample 2", "Sample 3", "Sample 4"], "{format}");
            assert_eq!(decoded[2].crucible_weight, "10");
        }
    }
}
