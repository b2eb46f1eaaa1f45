//! Header contract and row mapping shared by the CSV and workbook readers

use std::collections::HashMap;

use crate::core::yield_calc::{round_half_up, YIELD_PLACES};
use crate::entities::sample::SampleRecord;

use super::CodecError;

/// Columns of the sample sheet, in export order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    SampleName,
    CrucibleNumber,
    CrucibleWeight,
    SampleWeight,
    AshWeight,
    CharYield,
}

impl Column {
    pub const ALL: [Column; 6] = [
        Column::SampleName,
        Column::CrucibleNumber,
        Column::CrucibleWeight,
        Column::SampleWeight,
        Column::AshWeight,
        Column::CharYield,
    ];

    /// Header label written on export
    pub fn label(&self) -> &'static str {
        match self {
            Column::SampleName => "Sample Name",
            Column::CrucibleNumber => "Crucible Number",
            Column::CrucibleWeight => "Crucible Weight",
            Column::SampleWeight => "Sample Weight",
            Column::AshWeight => "Ash Weight",
            Column::CharYield => "Char Yield",
        }
    }

    /// Additional header labels accepted on import
    fn aliases(&self) -> &'static [&'static str] {
        match self {
            Column::SampleName => &["サンプル名"],
            Column::CrucibleNumber => &["るつぼ番号"],
            Column::CrucibleWeight => &["るつぼ重量"],
            Column::SampleWeight => &["サンプル重量"],
            Column::AshWeight => &["灰化後重量"],
            Column::CharYield => &["チャー収率"],
        }
    }

    /// Match a header cell, ignoring case and surrounding whitespace
    pub fn from_header(header: &str) -> Option<Column> {
        let header = header.trim();
        Column::ALL.into_iter().find(|column| {
            column.label().eq_ignore_ascii_case(header) || column.aliases().contains(&header)
        })
    }
}

/// First sheet of a file as plain text cells
#[derive(Debug, Default)]
pub(crate) struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Build a map from column to cell index; the first matching header wins
pub(crate) fn build_header_map(headers: &[String]) -> HashMap<Column, usize> {
    let mut map = HashMap::new();
    for (i, header) in headers.iter().enumerate() {
        if let Some(column) = Column::from_header(header) {
            map.entry(column).or_insert(i);
        }
    }
    map
}

/// Get a cell by column, `None` if the column or cell is missing
pub(crate) fn get_field<'a>(
    row: &'a [String],
    header_map: &HashMap<Column, usize>,
    column: Column,
) -> Option<&'a str> {
    header_map
        .get(&column)
        .and_then(|&idx| row.get(idx))
        .map(String::as_str)
}

/// Parse a Char Yield cell ("30.00", "30", "30.00 %")
pub(crate) fn parse_yield(text: &str) -> Option<f64> {
    let text = text.trim();
    let text = text.strip_suffix('%').unwrap_or(text).trim();
    text.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(|v| round_half_up(v, YIELD_PLACES))
}

/// Map table rows onto sample records
///
/// Blank rows are skipped. Rows without a sample name are named
/// `"{prefix} {n}"` where n counts the records produced so far.
pub(crate) fn table_to_records(
    table: &Table,
    name_prefix: &str,
) -> Result<Vec<SampleRecord>, CodecError> {
    if table.headers.iter().all(|h| h.trim().is_empty()) {
        return Err(CodecError::malformed("missing header row"));
    }

    let header_map = build_header_map(&table.headers);
    if header_map.is_empty() {
        return Err(CodecError::malformed(format!(
            "header row has none of the expected columns (found: {})",
            table.headers.join(", ")
        )));
    }

    let mut records = Vec::with_capacity(table.rows.len());
    for (row_idx, row) in table.rows.iter().enumerate() {
        if row.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }

        let text = |column| {
            get_field(row, &header_map, column)
                .unwrap_or_default()
                .to_string()
        };

        let name = get_field(row, &header_map, Column::SampleName)
            .filter(|name| !name.trim().is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("{} {}", name_prefix, records.len() + 1));

        let mut record = SampleRecord::new(name);
        record.crucible_number = text(Column::CrucibleNumber);
        record.crucible_weight = text(Column::CrucibleWeight);
        record.sample_weight = text(Column::SampleWeight);
        record.ash_weight = text(Column::AshWeight);

        let yield_cell = get_field(row, &header_map, Column::CharYield)
            .filter(|cell| !cell.trim().is_empty());
        if let Some(cell) = yield_cell {
            let parsed = parse_yield(cell);
            if parsed.is_none() {
                // Header is line 1
                tracing::warn!(row = row_idx + 2, value = cell, "ignoring unreadable char yield");
            }
            record.set_yield(parsed);
        }

        records.push(record);
    }

    Ok(records)
}
