//! `fec convert` command - write any supported inventory out as JSON
//!
//! Converting a CSV, TSV or spreadsheet assigns every row an id once, so later
//! `pass`/`fail` runs against the JSON file address the same extinguishers.

use console::style;
use miette::Result;
use std::path::PathBuf;

use crate::cli::commands::utils::{open_inventory, print_save_report};
use crate::cli::helpers::extinguishers;
use crate::cli::GlobalOpts;

#[derive(clap::Args, Debug)]
pub struct ConvertArgs {
    /// Source inventory (.csv, .tsv, .xlsx, .xls, .ods or .json)
    pub file: PathBuf,

    /// Destination JSON file
    pub output: PathBuf,
}

pub fn run(args: ConvertArgs, global: &GlobalOpts) -> Result<()> {
    let mut inventory = open_inventory(&args.file, global)?;
    let report = inventory.save_as(&args.output)?;

    if !global.quiet {
        println!(
            "{} Converted {} from {}",
            style("✓").green(),
            style(extinguishers(inventory.store().len())).cyan(),
            args.file.display()
        );
    }
    print_save_report(&report, global);

    Ok(())
}
