//! Terminal collaborators of an editing session
//!
//! [`TerminalForm`] plays the form: it tracks what each control shows and
//! optionally echoes redisplays. [`PublishingOwner`] plays the owning
//! application: every committed record is written to an output stream for
//! the downstream model evaluation to pick up.

use chrono::{DateTime, Utc};
use console::style;
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write;
use tracing::{debug, error};

use crate::cli::helpers::format_with_unit;
use crate::core::{CommitFormat, Form, SourceOwner};
use crate::entities::{Field, FieldValue, ParameterRecord};

/// Form backed by the terminal
#[derive(Debug, Default)]
pub struct TerminalForm {
    values: BTreeMap<Field, FieldValue>,
    echo: bool,
    closed: bool,
}

impl TerminalForm {
    pub fn new(echo: bool) -> Self {
        Self {
            echo,
            ..Self::default()
        }
    }

    /// Value currently shown for `field`
    pub fn value(&self, field: Field) -> Option<FieldValue> {
        self.values.get(&field).copied()
    }

    /// Whether the session asked this form to close
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Menu line for `field`, e.g. `Depth (depth)  1500 m`
    pub fn menu_line(&self, field: Field) -> String {
        let shown = self
            .value(field)
            .map(|v| format_with_unit(field, v))
            .unwrap_or_default();
        format!("{:<16} {:<11} {}", field.label(), field.as_str(), shown)
    }
}

impl Form for TerminalForm {
    fn display_field(&mut self, field: Field, value: FieldValue) {
        let changed = self.values.insert(field, value) != Some(value);
        debug!(%field, %value, "display");
        if self.echo && changed {
            eprintln!(
                "  {} {} {}",
                style("•").dim(),
                style(field.as_str()).cyan(),
                style(format_with_unit(field, value)).yellow()
            );
        }
    }

    fn request_close(&mut self) {
        self.closed = true;
    }
}

/// Envelope of one published record
#[derive(Debug, Serialize)]
pub struct CommitNotice<'a> {
    pub revision: u32,
    pub committed_at: DateTime<Utc>,
    pub source: &'a ParameterRecord,
}

/// Owner that writes every committed record to `out`
pub struct PublishingOwner<W: Write> {
    out: W,
    format: CommitFormat,
    revision: u32,
}

impl<W: Write> PublishingOwner<W> {
    pub fn new(out: W, format: CommitFormat) -> Self {
        Self {
            out,
            format,
            revision: 0,
        }
    }

    /// Number of records published so far
    pub fn revision(&self) -> u32 {
        self.revision
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn render(&self, notice: &CommitNotice<'_>) -> Result<String, String> {
        match self.format {
            CommitFormat::Yaml => serde_yml::to_string(notice)
                .map(|yaml| format!("---\n{}", yaml))
                .map_err(|e| e.to_string()),
            CommitFormat::Json => serde_json::to_string(notice)
                .map(|json| format!("{}\n", json))
                .map_err(|e| e.to_string()),
            CommitFormat::Text => Ok(format!(
                "revision {} at {}: {}\n",
                notice.revision,
                notice.committed_at.format("%Y-%m-%dT%H:%M:%SZ"),
                notice.source
            )),
        }
    }
}

impl<W: Write> SourceOwner for PublishingOwner<W> {
    fn on_committed(&mut self, record: &ParameterRecord) {
        self.revision += 1;
        let notice = CommitNotice {
            revision: self.revision,
            committed_at: Utc::now(),
            source: record,
        };

        // The owner contract is fire-and-forget; failures are logged only
        let written = self
            .render(&notice)
            .and_then(|text| {
                self.out
                    .write_all(text.as_bytes())
                    .and_then(|_| self.out.flush())
                    .map_err(|e| e.to_string())
            });
        if let Err(message) = written {
            error!(revision = self.revision, %message, "failed to publish committed source");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> ParameterRecord {
        ParameterRecord {
            d_vx: 10,
            d_vy: 5,
            d_vz: 4,
            rotation_z: 50.0,
            volume: 837.758,
            ..ParameterRecord::default()
        }
    }

    #[test]
    fn test_form_tracks_values() {
        let mut form = TerminalForm::new(false);
        form.display_field(Field::Depth, FieldValue::Int(1500));
        assert_eq!(form.value(Field::Depth), Some(FieldValue::Int(1500)));
        assert!(form.menu_line(Field::Depth).contains("1500 m"));
        assert!(!form.is_closed());
        form.request_close();
        assert!(form.is_closed());
    }

    #[test]
    fn test_publish_json_lines() {
        let mut owner = PublishingOwner::new(Vec::new(), CommitFormat::Json);
        owner.on_committed(&record());
        owner.on_committed(&record());
        let out = String::from_utf8(owner.into_inner()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["revision"], 1);
        assert_eq!(first["source"]["dVx"], 10);
        assert_eq!(first["source"]["rotation_z"], 50.0);
        let second: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second["revision"], 2);
    }

    #[test]
    fn test_publish_yaml_documents() {
        let mut owner = PublishingOwner::new(Vec::new(), CommitFormat::Yaml);
        owner.on_committed(&record());
        assert_eq!(owner.revision(), 1);
        let out = String::from_utf8(owner.into_inner()).unwrap();
        assert!(out.starts_with("---\n"));
        assert!(out.contains("revision: 1"));
        assert!(out.contains("dVx: 10"));
    }

    #[test]
    fn test_publish_text() {
        let mut owner = PublishingOwner::new(Vec::new(), CommitFormat::Text);
        owner.on_committed(&record());
        let out = String::from_utf8(owner.into_inner()).unwrap();
        assert!(out.starts_with("revision 1 at "));
        assert!(out.contains("dVx=10"));
    }
}
