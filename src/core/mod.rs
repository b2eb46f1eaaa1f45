//! Core module - yield formula, validation and the sample collection

pub mod collection;
pub mod config;
pub mod guide;
pub mod validation;
pub mod yield_calc;

pub use collection::{CollectionError, SampleCollection};
pub use config::Config;
pub use validation::{BulkReport, Outcome, ValidationError};
