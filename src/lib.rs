//! DSE: Deformation Source Editor
//!
//! Parameter model and Apply/OK/Cancel commit logic behind the editing form
//! of an ellipsoidal point deformation source.

pub mod cli;
pub mod core;
pub mod entities;
