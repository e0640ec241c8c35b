//! Output formatting utilities

use crate::cli::OutputFormat;
use crate::core::CommitFormat;

/// Determine the effective output format for listing commands
pub fn effective_format(format: OutputFormat) -> OutputFormat {
    match format {
        OutputFormat::Auto => OutputFormat::Table,
        other => other,
    }
}

/// Format for published commits: an explicit flag beats the config
pub fn commit_format(format: OutputFormat, configured: CommitFormat) -> CommitFormat {
    match format {
        OutputFormat::Auto => configured,
        OutputFormat::Table => CommitFormat::Text,
        OutputFormat::Yaml => CommitFormat::Yaml,
        OutputFormat::Json => CommitFormat::Json,
    }
}
