//! Excel workbook reader/writer
//!
//! Reading goes through calamine, so xls/xlsb/ods files open as well.
//! Writing always produces a single-sheet xlsx.

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use rust_xlsxwriter::{ColNum, RowNum, Workbook, Worksheet, XlsxError};
use std::io::Cursor;

use crate::entities::sample::SampleRecord;

use super::common::{Column, Table};
use super::CodecError;

/// Name of the exported sheet
pub(crate) const SHEET_NAME: &str = "Char Yield Data";

impl From<XlsxError> for CodecError {
    fn from(e: XlsxError) -> Self {
        CodecError::Encode(e.to_string())
    }
}

/// Render a cell the way it would be typed
///
/// Numbers use the shortest round-trip form, so 10.0 reads back as "10".
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt.as_f64().to_string(),
    }
}

pub(crate) fn read(bytes: &[u8]) -> Result<Table, CodecError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
        .map_err(|e| CodecError::malformed(format!("unreadable workbook: {}", e)))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| CodecError::malformed("workbook has no sheets"))?
        .map_err(|e| CodecError::malformed(format!("unreadable first sheet: {}", e)))?;

    let mut rows = range.rows();
    let headers = rows
        .next()
        .map(|row| row.iter().map(cell_text).collect())
        .unwrap_or_default();

    Ok(Table {
        headers,
        rows: rows
            .map(|row| row.iter().map(cell_text).collect())
            .collect(),
    })
}

/// Text cell, left blank when empty
fn write_text(sheet: &mut Worksheet, row: RowNum, col: ColNum, text: &str) -> Result<(), XlsxError> {
    if !text.is_empty() {
        sheet.write_string(row, col, text)?;
    }
    Ok(())
}

/// Weight cell: a number when the text is exactly how Rust prints that
/// number, otherwise kept as text so "10.50" survives a round trip
fn write_weight(sheet: &mut Worksheet, row: RowNum, col: ColNum, text: &str) -> Result<(), XlsxError> {
    let canonical = text
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && v.to_string() == text);
    match canonical {
        Some(value) => {
            sheet.write_number(row, col, value)?;
            Ok(())
        }
        None => write_text(sheet, row, col, text),
    }
}

pub(crate) fn write(records: &[SampleRecord]) -> Result<Vec<u8>, CodecError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    for (col, column) in Column::ALL.iter().enumerate() {
        sheet.write_string(0, col as ColNum, column.label())?;
    }

    for (idx, record) in records.iter().enumerate() {
        let row = (idx + 1) as RowNum;
        write_text(sheet, row, 0, &record.name)?;
        write_text(sheet, row, 1, &record.crucible_number)?;
        write_weight(sheet, row, 2, &record.crucible_weight)?;
        write_weight(sheet, row, 3, &record.sample_weight)?;
        write_weight(sheet, row, 4, &record.ash_weight)?;
        if let Some(value) = record.yield_percent() {
            sheet.write_number(row, 5, value)?;
        }
    }

    Ok(workbook.save_to_buffer()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_written_cells_read_back() {
        let mut record = SampleRecord::new("12");
        record.crucible_number = "007".to_string();
        record.crucible_weight = "10.50".to_string();
        record.sample_weight = "2".to_string();
        record.ash_weight = "abc".to_string();
        record.set_yield(Some(33.33));

        let bytes = write(&[record]).unwrap();
        let table = read(&bytes).unwrap();

        assert_eq!(
            table.headers,
            Column::ALL.iter().map(|c| c.label()).collect::<Vec<_>>()
        );
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0], ["12", "007", "10.50", "2", "abc", "33.33"]);
    }

    #[test]
    fn test_canonical_weights_become_numbers() {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        write_weight(sheet, 0, 0, "11.5").unwrap();
        write_weight(sheet, 0, 1, "11.50").unwrap();
        let bytes = workbook.save_to_buffer().unwrap();

        let mut wb = open_workbook_auto_from_rs(Cursor::new(bytes)).unwrap();
        let range = wb.worksheet_range_at(0).unwrap().unwrap();
        assert_eq!(range.get_value((0, 0)), Some(&Data::Float(11.5)));
        assert_eq!(range.get_value((0, 1)), Some(&Data::String("11.50".to_string())));
    }
}
