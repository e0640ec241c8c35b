//! Core module - parameter model, constraints and commit logic

pub mod commit;
pub mod config;
pub mod constraint;
pub mod model;
pub mod session;
pub mod volume;

pub use commit::{Action, CommitController, CommitState, Transition};
pub use config::{CommitFormat, Config, ConfigError};
pub use constraint::{ConstraintTable, FieldConstraint};
pub use model::{FieldEdit, ParameterModel};
pub use session::{EditSession, Form, RecordingForm, RecordingOwner, SourceOwner};
pub use volume::{ellipsoid_volume, record_volume};
