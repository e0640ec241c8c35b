//! `dse edit` command - Edit an ellipsoidal source
//!
//! Opens one editing session. With a terminal on stdin the session runs as
//! an interactive form; with a pipe (or `--script`) it replays an edit
//! script. Every Apply/OK publishes the committed source on stdout.

use console::style;
use dialoguer::{theme::ColorfulTheme, Input, Select};
use miette::{IntoDiagnostic, Result};
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use tracing::info;

use crate::cli::helpers::{format_with_unit, parse_assignment, stdin_has_data};
use crate::cli::output::commit_format;
use crate::cli::script::{parse_script, ScriptEvent};
use crate::cli::terminal::{PublishingOwner, TerminalForm};
use crate::cli::GlobalOpts;
use crate::core::{Action, CommitState, Config, ConstraintTable, EditSession, FieldEdit};
use crate::entities::{Field, ParameterRecord};

const ACTIONS: [Action; 3] = [Action::Apply, Action::Ok, Action::Cancel];

#[derive(clap::Args, Debug)]
pub struct EditArgs {
    /// Value the source starts with, as FIELD=VALUE (repeatable)
    #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = parse_assignment)]
    pub set: Vec<(Field, f64)>,

    /// Read the edit script from a file instead of stdin
    #[arg(long, short = 's', value_name = "FILE")]
    pub script: Option<PathBuf>,

    /// Use the interactive form even if stdin is not a terminal
    #[arg(long, short = 'i', conflicts_with = "script")]
    pub interactive: bool,
}

/// Run the edit command
pub fn run(args: EditArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load().into_diagnostic()?;
    let constraints = config.constraint_table();
    let initial = args
        .set
        .iter()
        .fold(config.initial_record(), |record, &(field, value)| {
            record.with(field, constraints.accept(field, value))
        });
    let mut owner = PublishingOwner::new(
        io::stdout(),
        commit_format(global.format, config.commit_format()),
    );

    let script = if let Some(path) = &args.script {
        Some(fs::read_to_string(path).into_diagnostic()?)
    } else if !args.interactive && stdin_has_data() {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text).into_diagnostic()?;
        Some(text)
    } else {
        None
    };

    let (state, commits) = match script {
        Some(text) => run_script(&text, initial, constraints, &mut owner)?,
        None => run_interactive(initial, constraints, &mut owner)?,
    };

    match state {
        CommitState::Committed => eprintln!(
            "{} Source committed ({} revision(s) published)",
            style("✓").green(),
            commits
        ),
        _ => eprintln!(
            "{} Edits discarded ({} revision(s) published before cancel)",
            style("•").yellow(),
            commits
        ),
    }
    Ok(())
}

/// Replay a script against a fresh session
///
/// The whole script is checked first, so a malformed line publishes nothing.
/// A script that never presses OK or Cancel is cancelled at the end.
pub fn run_script<W: Write>(
    text: &str,
    initial: ParameterRecord,
    constraints: ConstraintTable,
    owner: &mut PublishingOwner<W>,
) -> Result<(CommitState, u32)> {
    let events = parse_script(text).map_err(|e| miette::miette!("{}", e))?;

    let mut session = EditSession::open(initial, constraints, TerminalForm::new(false), owner);
    for event in events {
        match event {
            ScriptEvent::Edit(field, edit) => session.report_field_edit(field, edit),
            ScriptEvent::Action(action) => {
                session.report_action(action);
            }
        }
    }

    if session.is_open() {
        info!("edit script ended without ok or cancel; cancelling");
        session.report_action(Action::Cancel);
    }
    Ok((session.state(), session.commits()))
}

fn run_interactive<W: Write>(
    initial: ParameterRecord,
    constraints: ConstraintTable,
    owner: &mut PublishingOwner<W>,
) -> Result<(CommitState, u32)> {
    let theme = ColorfulTheme::default();

    eprintln!("{} Ellipsoid source", style("◆").cyan());
    let mut session = EditSession::open(initial, constraints, TerminalForm::new(true), owner);
    let mut cursor = 0;

    while session.is_open() {
        let form = session.form();
        let mut items: Vec<String> = Field::EDITABLE
            .iter()
            .map(|field| form.menu_line(*field))
            .collect();
        items.extend(ACTIONS.iter().map(|a| style(a.to_string().to_uppercase()).bold().to_string()));

        let volume = session.model().pending().get(Field::Volume);
        let prompt = format!(
            "Volume {}{}",
            format_with_unit(Field::Volume, volume),
            if session.model().is_dirty() {
                " (unapplied changes)"
            } else {
                ""
            }
        );

        let selection = Select::with_theme(&theme)
            .with_prompt(prompt)
            .items(&items)
            .default(cursor)
            .interact_opt()
            .into_diagnostic()?;

        // Esc closes the form like Cancel
        let Some(index) = selection else {
            session.report_action(Action::Cancel);
            break;
        };
        cursor = index;

        match Field::EDITABLE.get(index) {
            Some(&field) => {
                let current = session.model().pending().get(field);
                let unit = field.unit();
                let label = if unit.is_empty() {
                    field.label().to_string()
                } else {
                    format!("{} [{}]", field.label(), unit)
                };
                let value: f64 = Input::with_theme(&theme)
                    .with_prompt(label)
                    .with_initial_text(current.to_string())
                    .interact_text()
                    .into_diagnostic()?;
                session.report_field_edit(field, FieldEdit::Entry(value));
            }
            None => {
                let action = ACTIONS[index - Field::EDITABLE.len()];
                session.report_action(action);
            }
        }
    }

    Ok((session.state(), session.commits()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CommitFormat;

    fn replay(text: &str) -> (CommitState, u32, Vec<serde_json::Value>) {
        let mut owner = PublishingOwner::new(Vec::new(), CommitFormat::Json);
        let (state, commits) = run_script(
            text,
            ParameterRecord::default(),
            ConstraintTable::default(),
            &mut owner,
        )
        .unwrap();
        let out = String::from_utf8(owner.into_inner()).unwrap();
        let published = out
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        (state, commits, published)
    }

    #[test]
    fn test_script_apply_then_ok() {
        let (state, commits, published) =
            replay("set rotation_z 50\napply\nset rotation_z 80\nok\n");
        assert_eq!(state, CommitState::Committed);
        assert_eq!(commits, 2);
        assert_eq!(published.len(), 2);
        assert_eq!(published[0]["source"]["rotation_z"], 50.0);
        assert_eq!(published[1]["source"]["rotation_z"], 80.0);
    }

    #[test]
    fn test_script_without_close_is_cancelled() {
        let (state, commits, published) = replay("set dVx 50\n");
        assert_eq!(state, CommitState::Cancelled);
        assert_eq!(commits, 0);
        assert!(published.is_empty());
    }

    #[test]
    fn test_script_events_after_ok_are_ignored() {
        let (state, commits, published) = replay("ok\napply\ncancel\n");
        assert_eq!(state, CommitState::Committed);
        assert_eq!(commits, 1);
        assert_eq!(published.len(), 1);
    }

    #[test]
    fn test_script_wraps_easting() {
        let (_, _, published) = replay("set easting 10000000\nstep easting 1\nok\n");
        assert_eq!(published[0]["source"]["easting"], -10_000_000);
    }

    #[test]
    fn test_malformed_script_publishes_nothing() {
        let mut owner = PublishingOwner::new(Vec::new(), CommitFormat::Json);
        let result = run_script(
            "apply\nset dVx ten\n",
            ParameterRecord::default(),
            ConstraintTable::default(),
            &mut owner,
        );
        assert!(result.is_err());
        assert_eq!(owner.revision(), 0);
    }
}
