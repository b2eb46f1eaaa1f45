//! CLI command implementations

pub mod add;
pub mod calc;
pub mod completions;
pub mod export;
pub mod guide;
pub mod new;
pub mod set;
pub mod show;
pub mod template;
