//! `dse fields` command - Show the field schema
//!
//! Lists every parameter with its unit and domain, as the owning
//! application sees them.

use console::style;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use crate::cli::output::effective_format;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::{Config, ConstraintTable};
use crate::entities::Field;

#[derive(clap::Args, Debug)]
pub struct FieldsArgs {
    /// Include the derived volume field
    #[arg(long)]
    pub all: bool,
}

/// One row of the schema listing
#[derive(Debug, Serialize, Tabled)]
pub struct FieldRow {
    #[tabled(rename = "FIELD")]
    pub name: &'static str,
    #[tabled(rename = "LABEL")]
    pub label: &'static str,
    #[tabled(rename = "UNIT")]
    pub unit: &'static str,
    #[tabled(rename = "MIN")]
    pub min: String,
    #[tabled(rename = "MAX")]
    pub max: String,
    #[tabled(rename = "STEP")]
    pub step: String,
    #[tabled(rename = "KIND")]
    pub kind: &'static str,
    #[tabled(rename = "WRAPS")]
    pub wraps: bool,
}

/// Build schema rows for the given constraint table
pub fn schema_rows(table: &ConstraintTable, include_derived: bool) -> Vec<FieldRow> {
    Field::ALL
        .iter()
        .filter(|f| include_derived || !f.is_derived())
        .map(|&field| match table.get(field) {
            Some(c) => FieldRow {
                name: field.as_str(),
                label: field.label(),
                unit: field.unit(),
                min: c.min.to_string(),
                max: c.max.to_string(),
                step: c.step.to_string(),
                kind: if c.integral { "integer" } else { "float" },
                wraps: c.wraps,
            },
            None => FieldRow {
                name: field.as_str(),
                label: field.label(),
                unit: field.unit(),
                min: "-".to_string(),
                max: "-".to_string(),
                step: "-".to_string(),
                kind: "derived",
                wraps: false,
            },
        })
        .collect()
}

/// Run the fields command
pub fn run(args: FieldsArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load().into_diagnostic()?;
    let rows = schema_rows(&config.constraint_table(), args.all);

    match effective_format(global.format) {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&rows).into_diagnostic()?
            );
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yml::to_string(&rows).into_diagnostic()?);
        }
        OutputFormat::Table | OutputFormat::Auto => {
            println!("{}", Table::new(&rows).with(Style::sharp()));
            println!();
            println!(
                "Set fields with {}",
                style("dse edit --set <field>=<value>").cyan()
            );
        }
    }

    Ok(())
}
