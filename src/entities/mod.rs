//! Entity type definitions

pub mod source;

pub use source::{Field, FieldValue, ParameterRecord, ParseFieldError};
