use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Output mode for reconstructed history
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Top-level CLI parser for the `audit-history` binary.
#[derive(Debug, Parser)]
#[command(name = "audit-history", version, about = "Show human-readable history from the audit log")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// JSON file describing the audited entity types
    #[arg(short, long, global = true, default_value = "schema.json")]
    pub schema: PathBuf,

    /// Output format: text, json
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the full history of one record
    Show {
        /// Entity type, e.g. Person
        entity_type: String,
        /// Primary key of the record
        record_id: String,
        /// Only report these fields (repeatable, keeps order)
        #[arg(long = "field")]
        fields: Vec<String>,
        /// Hide these fields for this call (repeatable)
        #[arg(long = "exclude")]
        excluded_fields: Vec<String>,
    },
    /// Show the newest changes of an entity type
    Recent {
        entity_type: String,
        /// Number of audit rows to read (defaults to HISTORY_RECENT_LIMIT)
        #[arg(short, long)]
        limit: Option<i64>,
    },
}
