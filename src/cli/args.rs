//! Command-line arguments

use clap::{Parser, Subcommand, ValueEnum};

use crate::cli::commands::completions::CompletionsArgs;
use crate::cli::commands::edit::EditArgs;
use crate::cli::commands::fields::FieldsArgs;
use crate::cli::commands::volume::VolumeArgs;

/// Deformation Source Editor - edit ellipsoidal point source parameters
#[derive(Parser, Debug)]
#[command(name = "dse", version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every command
#[derive(clap::Args, Debug, Clone)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Increase log verbosity (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(long, short = 'v', global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pick per command
    Auto,
    /// Human-readable table / text
    Table,
    Yaml,
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the editable fields with units and domains
    Fields(FieldsArgs),

    /// Compute the volume of an ellipsoid from its semi-axes
    Volume(VolumeArgs),

    /// Open an editing session (interactive, or scripted from stdin)
    Edit(EditArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbose_counts() {
        let cli = Cli::parse_from(["dse", "-vv", "fields"]);
        assert_eq!(cli.global.verbose, 2);
        assert_eq!(cli.global.format, OutputFormat::Auto);
    }

    #[test]
    fn test_global_format_after_subcommand() {
        let cli = Cli::parse_from(["dse", "fields", "--format", "json"]);
        assert_eq!(cli.global.format, OutputFormat::Json);
    }
}
