//! CSV reader/writer

use csv::{ReaderBuilder, StringRecord, WriterBuilder};

use crate::entities::sample::SampleRecord;

use super::common::{Column, Table};
use super::CodecError;

/// Excel prepends this when saving "CSV UTF-8"
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

fn cells(record: &StringRecord) -> Vec<String> {
    record.iter().map(str::to_string).collect()
}

pub(crate) fn read(bytes: &[u8]) -> Result<Table, CodecError> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let headers = rdr
        .headers()
        .map_err(|e| CodecError::malformed(format!("unreadable header row: {}", e)))?;
    let mut table = Table {
        headers: cells(headers),
        rows: Vec::new(),
    };

    for (row_idx, result) in rdr.records().enumerate() {
        let record = result.map_err(|e| {
            CodecError::malformed(format!("CSV parse error at row {}: {}", row_idx + 2, e))
        })?;
        table.rows.push(cells(&record));
    }

    Ok(table)
}

pub(crate) fn write(records: &[SampleRecord]) -> Result<Vec<u8>, CodecError> {
    let encode_err = |e: csv::Error| CodecError::Encode(e.to_string());

    let mut wtr = WriterBuilder::new().from_writer(Vec::new());
    wtr.write_record(Column::ALL.iter().map(Column::label))
        .map_err(encode_err)?;

    for record in records {
        let yield_text = record.yield_display();
        wtr.write_record([
            record.name.as_str(),
            record.crucible_number.as_str(),
            record.crucible_weight.as_str(),
            record.sample_weight.as_str(),
            record.ash_weight.as_str(),
            yield_text.as_str(),
        ])
        .map_err(encode_err)?;
    }

    wtr.into_inner()
        .map_err(|e| CodecError::Encode(e.to_string()))
}
