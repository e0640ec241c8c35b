//! Apply / OK / Cancel commit state machine
//!
//! [`CommitController`] decides when the edit buffer of a
//! [`ParameterModel`] becomes authoritative. Apply and OK commit and publish
//! the record to the owner; OK and Cancel end the session. Once a session has
//! ended every further event is ignored.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::model::{FieldEdit, ParameterModel};
use crate::core::session::SourceOwner;
use crate::entities::{Field, FieldValue, ParameterRecord};

/// Session state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CommitState {
    #[default]
    Editing,
    Committed,
    Cancelled,
}

impl CommitState {
    /// Whether the session has ended
    pub fn is_terminal(&self) -> bool {
        !matches!(self, CommitState::Editing)
    }
}

impl std::fmt::Display for CommitState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommitState::Editing => write!(f, "editing"),
            CommitState::Committed => write!(f, "committed"),
            CommitState::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Button activations of the form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Apply,
    Ok,
    Cancel,
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Apply => write!(f, "apply"),
            Action::Ok => write!(f, "ok"),
            Action::Cancel => write!(f, "cancel"),
        }
    }
}

impl std::str::FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "apply" => Ok(Action::Apply),
            "ok" => Ok(Action::Ok),
            "cancel" => Ok(Action::Cancel),
            _ => Err(format!("Unknown action: {}", s)),
        }
    }
}

/// Effects of one handled action
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub from: CommitState,
    pub to: CommitState,
    /// Record pushed to the owner, if any
    pub published: Option<ParameterRecord>,
    /// Whether the form was asked to close
    pub close_requested: bool,
}

impl Transition {
    fn ignored(state: CommitState) -> Self {
        Self {
            from: state,
            to: state,
            published: None,
            close_requested: false,
        }
    }
}

/// Commit state machine of one editing session
#[derive(Debug, Clone, Default)]
pub struct CommitController {
    state: CommitState,
    commits: u32,
}

impl CommitController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> CommitState {
        self.state
    }

    /// Number of records published this session
    pub fn commits(&self) -> u32 {
        self.commits
    }

    /// Check if a state change is part of the machine
    pub fn is_valid_transition(&self, from: CommitState, to: CommitState) -> bool {
        matches!(
            (from, to),
            (CommitState::Editing, CommitState::Editing)
                | (CommitState::Editing, CommitState::Committed)
                | (CommitState::Editing, CommitState::Cancelled)
        )
    }

    /// Forward a field edit to the model while the session is open
    ///
    /// Returns the stored value, or `None` when the session has ended.
    pub fn field_edit(
        &mut self,
        model: &mut ParameterModel,
        field: Field,
        edit: FieldEdit,
    ) -> Option<FieldValue> {
        if self.state.is_terminal() {
            debug!(state = %self.state, %field, %edit, "ignoring edit after session end");
            return None;
        }
        Some(model.apply_edit(field, edit))
    }

    /// Handle a button activation
    pub fn action<O>(
        &mut self,
        model: &mut ParameterModel,
        owner: &mut O,
        action: Action,
    ) -> Transition
    where
        O: SourceOwner + ?Sized,
    {
        let from = self.state;
        if from.is_terminal() {
            debug!(state = %from, %action, "ignoring action after session end");
            return Transition::ignored(from);
        }

        let (to, published, close_requested) = match action {
            Action::Apply => (CommitState::Editing, Some(self.publish(model, owner)), false),
            Action::Ok => (CommitState::Committed, Some(self.publish(model, owner)), true),
            Action::Cancel => {
                model.discard();
                (CommitState::Cancelled, None, true)
            }
        };

        debug_assert!(self.is_valid_transition(from, to));
        self.state = to;
        info!(%action, from = %from, to = %to, commits = self.commits, "commit transition");

        Transition {
            from,
            to,
            published,
            close_requested,
        }
    }

    fn publish<O>(&mut self, model: &mut ParameterModel, owner: &mut O) -> ParameterRecord
    where
        O: SourceOwner + ?Sized,
    {
        let record = model.commit();
        self.commits += 1;
        owner.on_committed(&record);
        record
    }
}
