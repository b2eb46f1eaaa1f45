//! Entity type definitions
//!
//! - [`SampleRecord`] - one ashed sample with its crucible and weighings

pub mod sample;

pub use sample::{Field, SampleRecord, DEFAULT_NAME_PREFIX};
