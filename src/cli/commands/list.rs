//! `fec list` command - filtered view of the inventory

use clap::ValueEnum;
use console::style;
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;

use crate::cli::commands::utils::open_inventory;
use crate::cli::helpers::extinguishers;
use crate::cli::table::{TableFormatter, TableRow, RECORD_COLUMNS};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::{Config, Record, Status, StatusCounts};

/// Status filter
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum StatusFilter {
    Unchecked,
    Pass,
    Fail,
    /// Pass or fail
    Checked,
    /// All statuses
    All,
}

impl StatusFilter {
    pub fn accepts(self, status: Status) -> bool {
        match self {
            StatusFilter::Unchecked => status == Status::Unchecked,
            StatusFilter::Pass => status == Status::Pass,
            StatusFilter::Fail => status == Status::Fail,
            StatusFilter::Checked => status != Status::Unchecked,
            StatusFilter::All => true,
        }
    }
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Inventory file (.csv, .tsv, .xlsx, .xls, .ods or .json)
    pub file: PathBuf,

    /// Case-insensitive substring match on Location or Barcode
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Filter by status
    #[arg(long, default_value = "all")]
    pub status: StatusFilter,

    /// Show the Serial Number column (default from config `show_serial`)
    #[arg(long)]
    pub serial: bool,

    /// Hide the Serial Number column even if config enables it
    #[arg(long, conflicts_with = "serial")]
    pub no_serial: bool,

    /// Show only the count of matching extinguishers
    #[arg(long)]
    pub count: bool,
}

pub fn run(args: ListArgs, global: &GlobalOpts, config: &Config) -> Result<()> {
    let inventory = open_inventory(&args.file, global)?;

    let query = args.search.as_deref().unwrap_or("");
    let records: Vec<&Record> = inventory
        .filtered_records(query)
        .into_iter()
        .filter(|r| args.status.accepts(r.status()))
        .collect();

    if args.count {
        println!("{}", records.len());
        return Ok(());
    }

    let format = match global.format {
        OutputFormat::Auto => OutputFormat::Tsv,
        f => f,
    };

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&records).into_diagnostic()?;
            println!("{}", json);
        }
        OutputFormat::Yaml => {
            let yaml = serde_yml::to_string(&records).into_diagnostic()?;
            print!("{}", yaml);
        }
        _ => {
            if records.is_empty() && format == OutputFormat::Tsv {
                if !global.quiet {
                    println!("No extinguishers found.");
                }
                return Ok(());
            }

            let show_serial = !args.no_serial && (args.serial || config.show_serial());
            let columns = visible_columns(show_serial);
            let rows: Vec<TableRow> = records.iter().map(|r| TableRow::from_record(r)).collect();
            TableFormatter::new(RECORD_COLUMNS).output(&rows, format, &columns);

            if format == OutputFormat::Tsv && !global.quiet {
                let counts = StatusCounts::tally(records.iter().copied());
                println!();
                println!(
                    "{} shown: {} pass, {} fail, {} unchecked",
                    style(extinguishers(counts.total())).cyan(),
                    style(counts.pass).green(),
                    style(counts.fail).red(),
                    counts.unchecked
                );
            }
        }
    }

    Ok(())
}

fn visible_columns(show_serial: bool) -> Vec<&'static str> {
    let mut columns = vec!["id", "location", "barcode"];
    if show_serial {
        columns.push("serial");
    }
    columns.push("status");
    columns
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_filter() {
        assert!(StatusFilter::Checked.accepts(Status::Fail));
        assert!(!StatusFilter::Checked.accepts(Status::Unchecked));
        assert!(StatusFilter::Unchecked.accepts(Status::Unchecked));
        assert!(StatusFilter::All.accepts(Status::Pass));
        assert!(!StatusFilter::Pass.accepts(Status::Fail));
    }

    #[test]
    fn test_visible_columns() {
        assert_eq!(visible_columns(false), ["id", "location", "barcode", "status"]);
        assert_eq!(
            visible_columns(true),
            ["id", "location", "barcode", "serial", "status"]
        );
    }
}
