//! CLI command implementations

pub mod completions;
pub mod edit;
pub mod fields;
pub mod volume;
