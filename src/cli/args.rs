//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::cli::commands::{
    completions::CompletionsArgs,
    config::ConfigCommands,
    convert::ConvertArgs,
    list::ListArgs,
    mark::MarkArgs,
    reset::ResetArgs,
    show::ShowArgs,
    summary::SummaryArgs,
};
use crate::core::Config;

#[derive(Parser)]
#[command(name = "fec")]
#[command(author, version, about = "Fire Extinguisher Checker")]
#[command(long_about = "Track monthly fire extinguisher inspections in a CSV or JSON inventory. Every save writes a timestamped backup first.")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output (debug logging)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Directory for timestamped backups (default: ./backup)
    #[arg(long, global = true, value_name = "DIR")]
    pub backup_dir: Option<PathBuf>,
}

impl GlobalOpts {
    /// Fill unset options from configuration
    ///
    /// Flags given on the command line always win.
    pub fn apply_config(&mut self, config: &Config) {
        if self.format == OutputFormat::Auto {
            if let Some(format) = config
                .default_format
                .as_deref()
                .and_then(|f| OutputFormat::from_str(f, true).ok())
            {
                self.format = format;
            }
        }
        if self.backup_dir.is_none() {
            self.backup_dir = Some(config.backup_dir());
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// List extinguishers with their inspection status
    List(ListArgs),

    /// Show every field of one extinguisher
    Show(ShowArgs),

    /// Mark extinguishers as passed and save
    Pass(MarkArgs),

    /// Mark extinguishers as failed and save
    Fail(MarkArgs),

    /// Reset every extinguisher to unchecked for a new month
    Reset(ResetArgs),

    /// Convert a CSV, TSV, spreadsheet or JSON inventory to JSON with stable ids
    Convert(ConvertArgs),

    /// Show inspection progress
    Summary(SummaryArgs),

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Automatically detect based on context (yaml for show, tsv for list)
    #[default]
    Auto,
    /// YAML format (full fidelity)
    Yaml,
    /// Tab-separated values (for piping)
    Tsv,
    /// JSON format (for programming)
    Json,
    /// CSV format (for spreadsheets)
    Csv,
    /// Markdown tables
    Md,
    /// Just IDs, one per line
    Id,
}
