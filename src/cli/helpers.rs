//! Shared helper functions for CLI commands

use std::io::{self, IsTerminal};

use crate::entities::{Field, FieldValue};

/// Parse a `field=value` assignment
///
/// Used as a clap value parser for `--set`, so errors are plain strings.
pub fn parse_assignment(s: &str) -> Result<(Field, f64), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=VALUE, got '{}'", s))?;

    let field: Field = name.parse().map_err(|e| format!("{}", e))?;
    if field.is_derived() {
        return Err(format!("'{}' is computed and cannot be set", field));
    }

    let value = value
        .trim()
        .parse::<f64>()
        .map_err(|_| format!("'{}' is not a number", value.trim()))?;
    Ok((field, value))
}

/// Format a field value with its unit, e.g. `1500 m`
pub fn format_with_unit(field: Field, value: FieldValue) -> String {
    let unit = field.unit();
    let number = match value {
        FieldValue::Float(v) if field.is_derived() => format!("{:.2}", v),
        other => other.to_string(),
    };
    if unit.is_empty() {
        number
    } else {
        format!("{} {}", number, unit)
    }
}

/// Check if stdin has piped input available
///
/// Returns `true` if stdin is not a terminal (i.e., data is being piped in).
pub fn stdin_has_data() -> bool {
    !io::stdin().is_terminal()
}
