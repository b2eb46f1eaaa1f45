//! Ordered collection of samples
//!
//! The collection is the single owner of the sample records. Edits go
//! through [`SampleCollection::update`], which revalidates the touched record
//! silently; [`SampleCollection::recalculate_all`] revalidates everything and
//! keeps the last error for display.

use miette::Diagnostic;
use thiserror::Error;

use crate::core::validation::{self, BulkReport, Outcome, ValidationError};
use crate::entities::sample::{Field, SampleRecord};
use crate::sheet::{CodecError, SheetCodec, SheetFormat};

/// Errors from collection operations
#[derive(Debug, Error, Diagnostic)]
pub enum CollectionError {
    #[error("Sample index {index} is out of range (collection has {len} sample(s))")]
    #[diagnostic(code(chy::collection::index_out_of_range))]
    IndexOutOfRange { index: usize, len: usize },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Codec(#[from] CodecError),
}

/// All samples of one sheet, in display and export order
#[derive(Debug, Clone, Default)]
pub struct SampleCollection {
    records: Vec<SampleRecord>,
    last_error: Option<ValidationError>,
    codec: SheetCodec,
}

impl SampleCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a sheet with `count` empty samples named `"{prefix} 1"`, ...
    pub fn with_samples(prefix: &str, count: usize) -> Self {
        let mut collection = Self::new();
        for _ in 0..count {
            collection.append(prefix);
        }
        collection
    }

    /// Use a custom codec (e.g. a different default-name prefix on import)
    pub fn with_codec(mut self, codec: SheetCodec) -> Self {
        self.codec = codec;
        self
    }

    pub fn records(&self) -> &[SampleRecord] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&SampleRecord> {
        self.records.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SampleRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Error surfaced by the last bulk recalculation, if still current
    pub fn last_error(&self) -> Option<ValidationError> {
        self.last_error
    }

    pub fn last_error_message(&self) -> Option<String> {
        self.last_error.map(|e| e.to_string())
    }

    /// Add an empty sample named `"{prefix} {len + 1}"`
    pub fn append(&mut self, prefix: &str) -> &SampleRecord {
        let name = format!("{} {}", prefix, self.records.len() + 1);
        tracing::debug!(%name, "appending sample");
        self.records.push(SampleRecord::new(name));
        &self.records[self.records.len() - 1]
    }

    /// Set one field of the sample at `index`
    ///
    /// Weight edits revalidate that sample; the outcome is returned but never
    /// surfaced as the collection's error. Any successful edit clears the
    /// previously surfaced error. A blank name falls back to the positional
    /// default (`"{prefix} {index + 1}"`), so a sample never turns into an
    /// empty sheet row.
    pub fn update(
        &mut self,
        index: usize,
        field: Field,
        value: impl Into<String>,
    ) -> Result<Option<Outcome>, CollectionError> {
        let len = self.records.len();
        let record = self
            .records
            .get_mut(index)
            .ok_or(CollectionError::IndexOutOfRange { index, len })?;

        let mut value = value.into();
        if field == Field::Name && value.trim().is_empty() {
            value = format!("{} {}", self.codec.name_prefix(), index + 1);
        }
        record.set_field(field, value);
        let outcome = field
            .is_weight()
            .then(|| validation::apply_incremental(record));
        self.last_error = None;

        tracing::debug!(index, %field, ?outcome, "sample updated");
        Ok(outcome)
    }

    /// Revalidate every sample in order
    ///
    /// The returned report lists every failure; only the last one is kept as
    /// the collection's surfaced error.
    pub fn recalculate_all(&mut self) -> BulkReport {
        let report = validation::apply_bulk(&mut self.records);
        self.last_error = report.surfaced();
        report
    }

    /// Replace all samples with the contents of a sheet
    ///
    /// On failure the collection is left exactly as it was.
    pub fn decode(&mut self, bytes: &[u8]) -> Result<(), CollectionError> {
        let records = self.codec.decode(bytes)?;
        self.records = records;
        self.last_error = None;
        Ok(())
    }

    /// Serialize all samples in order
    pub fn encode(&self, format: SheetFormat) -> Result<Vec<u8>, CollectionError> {
        Ok(self.codec.encode(&self.records, format)?)
    }
}

impl<'a> IntoIterator for &'a SampleCollection {
    type Item = &'a SampleRecord;
    type IntoIter = std::slice::Iter<'a, SampleRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
