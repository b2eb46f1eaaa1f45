//! Table formatting for sample listings

use miette::{IntoDiagnostic, Result};
use tabled::{builder::Builder, settings::Style};

use crate::cli::helpers::truncate_str;
use crate::cli::OutputFormat;
use crate::entities::sample::SampleRecord;
use crate::sheet::{self, Column, SheetFormat};

const NAME_WIDTH: usize = 32;

const TABLE_HEADERS: [&str; 7] = [
    "#",
    "Sample Name",
    "Crucible No.",
    "Crucible (g)",
    "Sample (g)",
    "Ash (g)",
    "Char Yield (%)",
];

fn table_row(row: usize, record: &SampleRecord, truncate: bool) -> [String; 7] {
    let name = if truncate {
        truncate_str(&record.name, NAME_WIDTH)
    } else {
        record.name.clone()
    };
    [
        row.to_string(),
        name,
        record.crucible_number.clone(),
        record.crucible_weight.clone(),
        record.sample_weight.clone(),
        record.ash_weight.clone(),
        record.yield_display(),
    ]
}

/// Render samples in the requested format
pub fn render(records: &[SampleRecord], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Auto | OutputFormat::Md => {
            let mut builder = Builder::default();
            builder.push_record(TABLE_HEADERS);
            for (idx, record) in records.iter().enumerate() {
                builder.push_record(table_row(idx + 1, record, format == OutputFormat::Auto));
            }
            let mut table = builder.build();
            if format == OutputFormat::Md {
                table.with(Style::markdown());
            } else {
                table.with(Style::rounded());
            }
            Ok(format!("{}\n", table))
        }
        OutputFormat::Tsv => {
            let mut out = String::new();
            for (idx, record) in records.iter().enumerate() {
                let cells = table_row(idx + 1, record, false);
                out.push_str(&cells.join("\t"));
                out.push('\n');
            }
            Ok(out)
        }
        OutputFormat::Csv => {
            let bytes = sheet::encode(records, SheetFormat::Csv)?;
            String::from_utf8(bytes).into_diagnostic()
        }
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(records).into_diagnostic()?;
            json.push('\n');
            Ok(json)
        }
    }
}

/// Header row of an import template
pub fn template_headers() -> Vec<&'static str> {
    Column::ALL.iter().map(Column::label).collect()
}
