//! Editing session - the boundary between the core and its collaborators
//!
//! The form sits on one side: it reports raw field edits and button
//! activations, and receives redisplay and close requests. The owning
//! application sits on the other: it receives every committed record.

use tracing::debug;

use crate::core::commit::{Action, CommitController, CommitState};
use crate::core::constraint::ConstraintTable;
use crate::core::model::{FieldEdit, ParameterModel};
use crate::entities::{Field, FieldValue, ParameterRecord};

/// Presentation layer that shows the parameters
pub trait Form {
    /// Refresh the control of `field`
    fn display_field(&mut self, field: Field, value: FieldValue);

    /// Ask for the editing window to close
    fn request_close(&mut self);
}

/// Application that owns the source being edited
pub trait SourceOwner {
    /// Called on Apply and on OK with the new committed record
    fn on_committed(&mut self, record: &ParameterRecord);
}

impl<T: Form + ?Sized> Form for &mut T {
    fn display_field(&mut self, field: Field, value: FieldValue) {
        (**self).display_field(field, value);
    }

    fn request_close(&mut self) {
        (**self).request_close();
    }
}

impl<T: SourceOwner + ?Sized> SourceOwner for &mut T {
    fn on_committed(&mut self, record: &ParameterRecord) {
        (**self).on_committed(record);
    }
}

/// Form that remembers everything it was told
#[derive(Debug, Clone, Default)]
pub struct RecordingForm {
    pub displayed: Vec<(Field, FieldValue)>,
    pub close_requests: u32,
}

impl RecordingForm {
    /// Latest value shown for `field`
    pub fn last(&self, field: Field) -> Option<FieldValue> {
        self.displayed
            .iter()
            .rev()
            .find(|(f, _)| *f == field)
            .map(|(_, v)| *v)
    }
}

impl Form for RecordingForm {
    fn display_field(&mut self, field: Field, value: FieldValue) {
        self.displayed.push((field, value));
    }

    fn request_close(&mut self) {
        self.close_requests += 1;
    }
}

/// Owner that keeps every published record
#[derive(Debug, Clone, Default)]
pub struct RecordingOwner {
    pub received: Vec<ParameterRecord>,
}

impl SourceOwner for RecordingOwner {
    fn on_committed(&mut self, record: &ParameterRecord) {
        self.received.push(*record);
    }
}

/// One editing session of one source
///
/// Owns its model outright; sessions never share state.
pub struct EditSession<F: Form, O: SourceOwner> {
    model: ParameterModel,
    controller: CommitController,
    form: F,
    owner: O,
}

impl<F: Form, O: SourceOwner> EditSession<F, O> {
    /// Open a session on `initial` and show every field once
    pub fn open(initial: ParameterRecord, constraints: ConstraintTable, form: F, owner: O) -> Self {
        let mut session = Self {
            model: ParameterModel::with_constraints(initial, constraints),
            controller: CommitController::new(),
            form,
            owner,
        };
        session.display_all();
        session
    }

    /// Inbound: the user changed a control
    pub fn report_field_edit(&mut self, field: Field, edit: FieldEdit) {
        let Some(value) = self
            .controller
            .field_edit(&mut self.model, field, edit)
        else {
            return;
        };

        self.form.display_field(field, value);
        if field.is_axis() {
            self.form
                .display_field(Field::Volume, self.model.pending().get(Field::Volume));
        }
    }

    /// Inbound: the user pressed Apply, OK or Cancel
    pub fn report_action(&mut self, action: Action) -> CommitState {
        let was_dirty = self.model.is_dirty();
        let transition = self
            .controller
            .action(&mut self.model, &mut self.owner, action);

        if transition.to == CommitState::Cancelled && transition.from != transition.to && was_dirty
        {
            // Controls still show the discarded edits
            self.display_all();
        }
        if transition.close_requested {
            debug!(state = %transition.to, "requesting form close");
            self.form.request_close();
        }
        transition.to
    }

    fn display_all(&mut self) {
        let record = *self.model.pending();
        for field in Field::ALL {
            self.form.display_field(field, record.get(field));
        }
    }

    pub fn state(&self) -> CommitState {
        self.controller.state()
    }

    pub fn is_open(&self) -> bool {
        !self.state().is_terminal()
    }

    /// Number of records published this session
    pub fn commits(&self) -> u32 {
        self.controller.commits()
    }

    pub fn model(&self) -> &ParameterModel {
        &self.model
    }

    pub fn form(&self) -> &F {
        &self.form
    }

    pub fn owner(&self) -> &O {
        &self.owner
    }

    /// End the session and hand back the collaborators
    pub fn into_parts(self) -> (F, O) {
        (self.form, self.owner)
    }
}
