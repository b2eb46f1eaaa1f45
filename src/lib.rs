//! CHY: Char Yield Toolkit
//!
//! Record crucible, sample and ash weighings for a batch of samples,
//! compute their char yield, and exchange the batch as a CSV or Excel sheet.

pub mod cli;
pub mod core;
pub mod entities;
pub mod sheet;
