//! Parameter model - committed state plus live edit buffer
//!
//! [`ParameterModel`] is the single owner of the two records of an editing
//! session. Writes go to `pending` only, always through the field's
//! constraint, and keep the derived volume in step with the semi-axes.

use tracing::{debug, warn};

use crate::core::constraint::ConstraintTable;
use crate::core::volume::record_volume;
use crate::entities::{Field, FieldValue, ParameterRecord};

/// A raw edit reported by the form
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldEdit {
    /// Typed value
    Entry(f64),
    /// Spin increments; negative to decrement
    Step(i32),
}

impl std::fmt::Display for FieldEdit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldEdit::Entry(v) => write!(f, "= {}", v),
            FieldEdit::Step(n) => write!(f, "step {:+}", n),
        }
    }
}

/// Committed and pending parameter records of one editing session
#[derive(Debug, Clone)]
pub struct ParameterModel {
    committed: ParameterRecord,
    pending: ParameterRecord,
    constraints: ConstraintTable,
}

impl ParameterModel {
    /// Open a model on `initial` with the default constraints
    pub fn new(initial: ParameterRecord) -> Self {
        Self::with_constraints(initial, ConstraintTable::default())
    }

    /// Open a model on `initial`
    ///
    /// Every field of `initial` is normalized into its domain and the volume
    /// is recomputed, so both records start valid and identical.
    pub fn with_constraints(initial: ParameterRecord, constraints: ConstraintTable) -> Self {
        let mut record = initial;
        for field in Field::EDITABLE {
            if let Some(constraint) = constraints.get(field) {
                let value = constraint.accept(record.get(field).as_f64());
                record.set(field, value);
            }
        }
        record.volume = record_volume(&record);

        Self {
            committed: record,
            pending: record,
            constraints,
        }
    }

    pub fn constraints(&self) -> &ConstraintTable {
        &self.constraints
    }

    /// Last record accepted by the owner
    pub fn committed(&self) -> &ParameterRecord {
        &self.committed
    }

    /// Live edit buffer
    pub fn pending(&self) -> &ParameterRecord {
        &self.pending
    }

    /// Copy of the edit buffer
    pub fn snapshot_pending(&self) -> ParameterRecord {
        self.pending
    }

    /// Whether the edit buffer holds unapplied changes
    pub fn is_dirty(&self) -> bool {
        self.pending != self.committed
    }

    /// Typed entry into `field`; returns the value actually stored
    pub fn set_field(&mut self, field: Field, value: f64) -> FieldValue {
        self.write(field, value, 0.0)
    }

    /// Spin `field` by `steps` increments; returns the value actually stored
    pub fn step_field(&mut self, field: Field, steps: i32) -> FieldValue {
        let Some(constraint) = self.constraints.get(field) else {
            return self.read_only(field);
        };
        let current = self.pending.get(field).as_f64();
        self.write(field, current, f64::from(steps) * constraint.step)
    }

    /// Apply a form edit to `field`
    pub fn apply_edit(&mut self, field: Field, edit: FieldEdit) -> FieldValue {
        match edit {
            FieldEdit::Entry(value) => self.set_field(field, value),
            FieldEdit::Step(steps) => self.step_field(field, steps),
        }
    }

    fn write(&mut self, field: Field, current: f64, delta: f64) -> FieldValue {
        let Some(constraint) = self.constraints.get(field) else {
            return self.read_only(field);
        };

        let requested = current + delta;
        let value = constraint.normalize(current, delta);
        if value != requested {
            debug!(%field, requested, stored = value, "normalized field edit");
        }
        self.pending.set(field, value);

        if field.is_axis() {
            self.pending.volume = record_volume(&self.pending);
        }
        self.pending.get(field)
    }

    fn read_only(&self, field: Field) -> FieldValue {
        warn!(%field, "ignoring write to derived field");
        self.pending.get(field)
    }

    /// Accept the edit buffer; returns the new committed record
    pub fn commit(&mut self) -> ParameterRecord {
        self.committed = self.pending;
        debug!(record = %self.committed, "committed pending parameters");
        self.committed
    }

    /// Drop unapplied edits
    pub fn discard(&mut self) {
        if self.is_dirty() {
            debug!(record = %self.committed, "discarding pending parameters");
        }
        self.pending = self.committed;
    }
}

impl Default for ParameterModel {
    fn default() -> Self {
        Self::new(ParameterRecord::default())
    }
}
