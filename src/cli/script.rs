//! Edit scripts - session events read from a pipe
//!
//! One event per line:
//!
//! ```text
//! set <field> <value>
//! step <field> <n>
//! apply | ok | cancel
//! ```
//!
//! Blank lines and `#` comments are skipped. Malformed lines are rejected
//! here, before anything reaches the parameter model.

use thiserror::Error;

use crate::core::{Action, FieldEdit};
use crate::entities::{Field, ParseFieldError};

/// One scripted form event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScriptEvent {
    Edit(Field, FieldEdit),
    Action(Action),
}

/// Errors in an edit script
#[derive(Debug, Error, PartialEq)]
pub enum ScriptError {
    #[error("line {line}: unknown command '{verb}' (expected set, step, apply, ok or cancel)")]
    UnknownCommand { line: usize, verb: String },

    #[error("line {line}: {source}")]
    UnknownField {
        line: usize,
        #[source]
        source: ParseFieldError,
    },

    #[error("line {line}: '{field}' is computed and cannot be edited")]
    ReadOnlyField { line: usize, field: Field },

    #[error("line {line}: '{value}' is not a number")]
    NotNumeric { line: usize, value: String },

    #[error("line {line}: usage: {usage}")]
    Usage { line: usize, usage: &'static str },
}

/// Parse a single script line; `Ok(None)` for blanks and comments
pub fn parse_line(line_no: usize, line: &str) -> Result<Option<ScriptEvent>, ScriptError> {
    let line = line.split('#').next().unwrap_or("").trim();
    if line.is_empty() {
        return Ok(None);
    }

    let words: Vec<&str> = line.split_whitespace().collect();
    let verb = words[0].to_lowercase();

    match verb.as_str() {
        "set" | "step" => {
            let usage = if verb == "set" {
                "set <field> <value>"
            } else {
                "step <field> <n>"
            };
            let [_, name, value] = words.as_slice() else {
                return Err(ScriptError::Usage {
                    line: line_no,
                    usage,
                });
            };

            let field: Field = name.parse().map_err(|source| ScriptError::UnknownField {
                line: line_no,
                source,
            })?;
            if field.is_derived() {
                return Err(ScriptError::ReadOnlyField {
                    line: line_no,
                    field,
                });
            }

            let not_numeric = || ScriptError::NotNumeric {
                line: line_no,
                value: value.to_string(),
            };
            let edit = if verb == "set" {
                FieldEdit::Entry(value.parse::<f64>().map_err(|_| not_numeric())?)
            } else {
                FieldEdit::Step(value.parse::<i32>().map_err(|_| not_numeric())?)
            };
            Ok(Some(ScriptEvent::Edit(field, edit)))
        }
        _ => match verb.parse::<Action>() {
            Ok(action) if words.len() == 1 => Ok(Some(ScriptEvent::Action(action))),
            Ok(_) => Err(ScriptError::Usage {
                line: line_no,
                usage: "apply | ok | cancel",
            }),
            Err(_) => Err(ScriptError::UnknownCommand {
                line: line_no,
                verb: words[0].to_string(),
            }),
        },
    }
}

/// Parse a whole script; stops at the first bad line
pub fn parse_script(text: &str) -> Result<Vec<ScriptEvent>, ScriptError> {
    let mut events = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        if let Some(event) = parse_line(idx + 1, line)? {
            events.push(event);
        }
    }
    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_events() {
        let script = "\
# open a reservoir
set dVx 10
step easting -2
apply

OK
";
        let events = parse_script(script).unwrap();
        assert_eq!(
            events,
            vec![
                ScriptEvent::Edit(Field::DVx, FieldEdit::Entry(10.0)),
                ScriptEvent::Edit(Field::Easting, FieldEdit::Step(-2)),
                ScriptEvent::Action(Action::Apply),
                ScriptEvent::Action(Action::Ok),
            ]
        );
    }

    #[test]
    fn test_trailing_comment() {
        assert_eq!(
            parse_line(1, "set nu 0.25  # poisson").unwrap(),
            Some(ScriptEvent::Edit(Field::Nu, FieldEdit::Entry(0.25)))
        );
    }

    #[test]
    fn test_errors_carry_line_numbers() {
        let err = parse_script("set dVx 1\nset length_x 5\n").unwrap_err();
        assert!(matches!(err, ScriptError::UnknownField { line: 2, .. }));
        assert!(err.to_string().starts_with("line 2:"));
    }

    #[test]
    fn test_rejects_malformed_lines() {
        assert!(matches!(
            parse_line(3, "set depth deep"),
            Err(ScriptError::NotNumeric { line: 3, .. })
        ));
        assert!(matches!(
            parse_line(1, "step depth 1.5"),
            Err(ScriptError::NotNumeric { .. })
        ));
        assert!(matches!(
            parse_line(1, "set depth"),
            Err(ScriptError::Usage { .. })
        ));
        assert!(matches!(
            parse_line(1, "close"),
            Err(ScriptError::UnknownCommand { .. })
        ));
        assert!(matches!(
            parse_line(1, "ok now"),
            Err(ScriptError::Usage { .. })
        ));
        assert!(matches!(
            parse_line(1, "set volume 5"),
            Err(ScriptError::ReadOnlyField { .. })
        ));
    }
}
