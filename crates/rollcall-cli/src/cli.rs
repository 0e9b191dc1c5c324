//! CLI command definitions and argument parsing.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Rollcall - Extract people and their interests from documents.
#[derive(Debug, Parser)]
#[command(name = "rollcall")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path (default: ~/.rollcall/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (names only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract people from documents and merge them into the table
    Ingest(IngestArgs),

    /// Print the table, most recently updated first
    Show(ShowArgs),

    /// Print the effective configuration
    Config(ConfigArgs),
}

/// Arguments for the ingest command.
#[derive(Debug, Parser)]
pub struct IngestArgs {
    /// Documents to read (.docx, .pdf, .pages, .txt)
    pub files: Vec<PathBuf>,

    /// Table file (overrides [store] path)
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// API key for the completion service
    #[arg(long, env = "DEEPSEEK_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Model name (overrides [provider] model)
    #[arg(long)]
    pub model: Option<String>,

    /// Chat completions endpoint (overrides [provider] endpoint)
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Do not take the advisory lock on the table
    #[arg(long)]
    pub no_lock: bool,
}

/// Arguments for the show command.
#[derive(Debug, Parser)]
pub struct ShowArgs {
    /// Table file (overrides [store] path)
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Maximum number of rows
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,
}

/// Arguments for the config command.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    /// Write the default configuration file if none exists
    #[arg(long)]
    pub write: bool,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}
