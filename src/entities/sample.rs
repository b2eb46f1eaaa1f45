//! Sample entity - one ashed sample with its weighings
//!
//! A sample records the crucible it was ashed in and three weighings:
//! the empty crucible, the raw sample, and crucible plus residue after ashing.
//! The char yield is derived from those weighings and is never entered directly.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Prefix used for generated sample names ("Sample 1", "Sample 2", ...)
pub const DEFAULT_NAME_PREFIX: &str = "Sample";

/// Editable fields of a sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Sample label
    Name,
    /// Crucible label
    CrucibleNumber,
    /// Empty crucible weight (g)
    CrucibleWeight,
    /// Raw sample weight (g)
    SampleWeight,
    /// Crucible plus residue after ashing (g)
    AshWeight,
}

impl Field {
    /// Whether editing this field can change the derived yield
    pub fn is_weight(&self) -> bool {
        matches!(
            self,
            Field::CrucibleWeight | Field::SampleWeight | Field::AshWeight
        )
    }

    pub fn all() -> &'static [Field] {
        &[
            Field::Name,
            Field::CrucibleNumber,
            Field::CrucibleWeight,
            Field::SampleWeight,
            Field::AshWeight,
        ]
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Field::Name => "sample name",
            Field::CrucibleNumber => "crucible number",
            Field::CrucibleWeight => "crucible weight",
            Field::SampleWeight => "sample weight",
            Field::AshWeight => "ash weight",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect();
        match key.as_str() {
            "name" | "samplename" => Ok(Field::Name),
            "cruciblenumber" | "crucibleno" | "cruciblenum" => Ok(Field::CrucibleNumber),
            "crucible" | "crucibleweight" => Ok(Field::CrucibleWeight),
            "sample" | "sampleweight" => Ok(Field::SampleWeight),
            "ash" | "ashweight" => Ok(Field::AshWeight),
            _ => Err(format!(
                "Unknown field: '{}'. Supported: name, crucible-number, crucible, sample, ash",
                s
            )),
        }
    }
}

/// A single sample row
///
/// Weights keep the text exactly as entered; an empty string means the
/// weighing has not been recorded yet.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SampleRecord {
    /// Sample label
    pub name: String,

    /// Crucible label
    pub crucible_number: String,

    /// Empty crucible weight in grams
    pub crucible_weight: String,

    /// Raw sample weight in grams
    pub sample_weight: String,

    /// Crucible plus residue weight in grams
    pub ash_weight: String,

    /// Derived char yield in percent, two decimals
    yield_percent: Option<f64>,
}

impl SampleRecord {
    /// Create an empty record with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Derived char yield, if the last validation succeeded
    pub fn yield_percent(&self) -> Option<f64> {
        self.yield_percent
    }

    pub(crate) fn set_yield(&mut self, value: Option<f64>) {
        self.yield_percent = value;
    }

    /// Current text of a field
    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::CrucibleNumber => &self.crucible_number,
            Field::CrucibleWeight => &self.crucible_weight,
            Field::SampleWeight => &self.sample_weight,
            Field::AshWeight => &self.ash_weight,
        }
    }

    /// Replace the text of a field
    ///
    /// Does not touch the yield; callers that edit weights are expected to
    /// revalidate.
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Name => self.name = value,
            Field::CrucibleNumber => self.crucible_number = value,
            Field::CrucibleWeight => self.crucible_weight = value,
            Field::SampleWeight => self.sample_weight = value,
            Field::AshWeight => self.ash_weight = value,
        }
    }

    /// Yield formatted for display ("30.00"), empty when not computed
    pub fn yield_display(&self) -> String {
        self.yield_percent
            .map(|y| format!("{:.2}", y))
            .unwrap_or_default()
    }
}
