//! Sample validation
//!
//! Rules are evaluated in order and the first one that applies decides the
//! outcome:
//!
//! 1. a weighing is missing → [`Outcome::Incomplete`]
//! 2. a weighing is not a number → [`ValidationError::NonNumericInput`]
//! 3. ash weight not above crucible weight → [`ValidationError::InvalidAshWeight`]
//! 4. sample weight not above zero → [`ValidationError::InvalidSampleWeight`]
//! 5. otherwise the yield is computed; a result too large to represent is
//!    [`ValidationError::YieldOutOfRange`]
//!
//! Two modes apply these rules. Incremental validation runs after a single
//! edit and fails silently. Bulk validation runs over every record and keeps
//! the last error it saw for display.

use miette::Diagnostic;
use thiserror::Error;

use crate::core::yield_calc;
use crate::entities::sample::{Field, SampleRecord};

/// Validation failures for a single sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Diagnostic)]
pub enum ValidationError {
    #[error("All input values must be numeric ({field} is not)")]
    #[diagnostic(code(chy::validation::non_numeric))]
    NonNumericInput { field: Field },

    #[error("Ash weight must be greater than crucible weight")]
    #[diagnostic(
        code(chy::validation::ash_weight),
        help("the ash weighing includes the crucible, so it must exceed the empty crucible")
    )]
    InvalidAshWeight,

    #[error("Sample weight must be greater than 0")]
    #[diagnostic(code(chy::validation::sample_weight))]
    InvalidSampleWeight,

    #[error("Char yield is out of range for these weights")]
    #[diagnostic(
        code(chy::validation::yield_range),
        help("check the units; all weights should be in grams")
    )]
    YieldOutOfRange,
}

/// Result of validating one sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    /// At least one weighing is missing; not an error
    Incomplete,
    /// Inputs are present but unusable
    Error(ValidationError),
    /// Computed yield in percent
    Ok(f64),
}

impl Outcome {
    /// Yield to store on the record
    pub fn yield_value(&self) -> Option<f64> {
        match self {
            Outcome::Ok(value) => Some(*value),
            _ => None,
        }
    }

    /// Validation failure, if any
    pub fn error(&self) -> Option<ValidationError> {
        match self {
            Outcome::Error(e) => Some(*e),
            _ => None,
        }
    }
}

/// Parse a weighing, `None` when it is not a finite number
fn parse_weight(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Apply the validation rules to one sample
pub fn validate(record: &SampleRecord) -> Outcome {
    const WEIGHTS: [Field; 3] = [Field::CrucibleWeight, Field::SampleWeight, Field::AshWeight];

    if WEIGHTS
        .iter()
        .any(|field| record.field(*field).trim().is_empty())
    {
        return Outcome::Incomplete;
    }

    let mut values = [0.0; 3];
    for (slot, field) in values.iter_mut().zip(WEIGHTS) {
        match parse_weight(record.field(field)) {
            Some(v) => *slot = v,
            None => return Outcome::Error(ValidationError::NonNumericInput { field }),
        }
    }
    let [crucible, sample, ash] = values;

    if ash <= crucible {
        return Outcome::Error(ValidationError::InvalidAshWeight);
    }
    if sample <= 0.0 {
        return Outcome::Error(ValidationError::InvalidSampleWeight);
    }

    let value = yield_calc::calculate(crucible, sample, ash);
    if !value.is_finite() {
        return Outcome::Error(ValidationError::YieldOutOfRange);
    }
    Outcome::Ok(value)
}

/// Revalidate a single edited record
///
/// Failures only clear the yield; nothing is surfaced.
pub fn apply_incremental(record: &mut SampleRecord) -> Outcome {
    let outcome = validate(record);
    record.set_yield(outcome.yield_value());
    if let Some(e) = outcome.error() {
        tracing::debug!(sample = %record.name, error = %e, "auto-calculation skipped");
    }
    outcome
}

/// Summary of a bulk validation pass
#[derive(Debug, Default, Clone, PartialEq)]
pub struct BulkReport {
    /// Records that received a yield
    pub computed: usize,
    /// Records with a missing weighing
    pub incomplete: usize,
    /// Every failing record as (index, error), in iteration order
    pub errors: Vec<(usize, ValidationError)>,
}

impl BulkReport {
    /// The single error shown to the user: the last one encountered
    pub fn surfaced(&self) -> Option<ValidationError> {
        self.errors.last().map(|(_, e)| *e)
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Revalidate every record in order
///
/// A failing record has its yield cleared and processing continues.
pub fn apply_bulk(records: &mut [SampleRecord]) -> BulkReport {
    let mut report = BulkReport::default();

    for (index, record) in records.iter_mut().enumerate() {
        let outcome = validate(record);
        record.set_yield(outcome.yield_value());
        match outcome {
            Outcome::Ok(_) => report.computed += 1,
            Outcome::Incomplete => report.incomplete += 1,
            Outcome::Error(e) => report.errors.push((index, e)),
        }
    }

    tracing::debug!(
        records = records.len(),
        computed = report.computed,
        incomplete = report.incomplete,
        errors = report.errors.len(),
        "bulk recalculation finished"
    );

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(crucible: &str, sample: &str, ash: &str) -> SampleRecord {
        let mut r = SampleRecord::new("Sample 1");
        r.crucible_weight = crucible.to_string();
        r.sample_weight = sample.to_string();
        r.ash_weight = ash.to_string();
        r
    }

    #[test]
    fn test_valid_sample_computes_yield() {
        assert_eq!(validate(&record("10.00", "5.00", "11.50")), Outcome::Ok(30.0));
    }

    #[test]
    fn test_any_missing_weight_is_incomplete() {
        assert_eq!(validate(&record("", "5.00", "11.50")), Outcome::Incomplete);
        assert_eq!(validate(&record("10.00", "", "11.50")), Outcome::Incomplete);
        assert_eq!(validate(&record("10.00", "5.00", "  ")), Outcome::Incomplete);
    }

    #[test]
    fn test_missing_wins_over_non_numeric() {
        assert_eq!(validate(&record("abc", "", "11.50")), Outcome::Incomplete);
    }

    #[test]
    fn test_non_numeric_names_first_bad_field() {
        assert_eq!(
            validate(&record("10.00", "five", "x")),
            Outcome::Error(ValidationError::NonNumericInput {
                field: Field::SampleWeight
            })
        );
        assert_eq!(
            validate(&record("10.00", "5", "NaN")),
            Outcome::Error(ValidationError::NonNumericInput {
                field: Field::AshWeight
            })
        );
    }

    #[test]
    fn test_ash_not_above_crucible() {
        assert_eq!(
            validate(&record("10.00", "5.00", "9.00")),
            Outcome::Error(ValidationError::InvalidAshWeight)
        );
        assert_eq!(
            validate(&record("10.00", "5.00", "10.00")),
            Outcome::Error(ValidationError::InvalidAshWeight)
        );
        // checked before the sample weight
        assert_eq!(
            validate(&record("10.00", "-1", "9.00")),
            Outcome::Error(ValidationError::InvalidAshWeight)
        );
    }

    #[test]
    fn test_sample_must_be_positive() {
        assert_eq!(
            validate(&record("10.00", "0", "11.50")),
            Outcome::Error(ValidationError::InvalidSampleWeight)
        );
        assert_eq!(
            validate(&record("10.00", "-2.5", "11.50")),
            Outcome::Error(ValidationError::InvalidSampleWeight)
        );
    }

    #[test]
    fn test_overflowing_yield_is_an_error() {
        let outcome = validate(&record("0", "1e-300", "1e10"));
        assert_eq!(outcome, Outcome::Error(ValidationError::YieldOutOfRange));
        assert_eq!(outcome.yield_value(), None);
        assert_eq!(outcome.error(), Some(ValidationError::YieldOutOfRange));

        let mut r = record("0", "1e-300", "1e10");
        apply_incremental(&mut r);
        assert!(r.yield_percent().is_none());
    }

    #[test]
    fn test_large_finite_yield_is_kept() {
        let outcome = validate(&record("0", "1e-200", "1e10"));
        let value = outcome.yield_value().unwrap();
        assert!(value.is_finite());
        assert_eq!(outcome.error(), None);
    }

    #[test]
    fn test_incremental_clears_stale_yield() {
        let mut r = record("10.00", "5.00", "11.50");
        apply_incremental(&mut r);
        assert_eq!(r.yield_percent(), Some(30.0));

        r.ash_weight = "9".to_string();
        let outcome = apply_incremental(&mut r);
        assert_eq!(outcome, Outcome::Error(ValidationError::InvalidAshWeight));
        assert_eq!(r.yield_percent(), None);

        r.ash_weight.clear();
        apply_incremental(&mut r);
        assert_eq!(r.yield_percent(), None);
    }

    #[test]
    fn test_bulk_keeps_last_error() {
        let mut records = vec![
            record("10.00", "5.00", "9.00"),
            record("10.00", "5.00", "11.50"),
            record("10.00", "0", "11.50"),
            record("", "", ""),
        ];
        let report = apply_bulk(&mut records);

        assert_eq!(report.computed, 1);
        assert_eq!(report.incomplete, 1);
        assert_eq!(
            report.errors,
            vec![
                (0, ValidationError::InvalidAshWeight),
                (2, ValidationError::InvalidSampleWeight)
            ]
        );
        assert_eq!(report.surfaced(), Some(ValidationError::InvalidSampleWeight));
        assert_eq!(records[1].yield_percent(), Some(30.0));
        assert!(records[0].yield_percent().is_none());
        assert!(records[2].yield_percent().is_none());
        assert!(records[3].yield_percent().is_none());
    }

    #[test]
    fn test_bulk_without_errors() {
        let mut records = vec![record("20", "3", "21"), record("10", "5", "11.5")];
        let report = apply_bulk(&mut records);
        assert!(!report.has_errors());
        assert_eq!(report.surfaced(), None);
        assert_eq!(records[0].yield_percent(), Some(33.33));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ValidationError::InvalidAshWeight.to_string(),
            "Ash weight must be greater than crucible weight"
        );
        assert_eq!(
            ValidationError::NonNumericInput {
                field: Field::CrucibleWeight
            }
            .to_string(),
            "All input values must be numeric (crucible weight is not)"
        );
    }
}
