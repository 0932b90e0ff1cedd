//! `fec reset` command - start a new inspection month

use console::style;
use dialoguer::{theme::ColorfulTheme, Confirm};
use miette::{IntoDiagnostic, Result};
use std::io::IsTerminal;
use std::path::PathBuf;

use crate::cli::commands::utils::{open_inventory, print_save_report, save_inventory};
use crate::cli::helpers::extinguishers;
use crate::cli::GlobalOpts;

#[derive(clap::Args, Debug)]
pub struct ResetArgs {
    /// Inventory file (.csv, .tsv, .xlsx, .xls, .ods or .json)
    pub file: PathBuf,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,

    /// JSON file to save to (default: the source, or <stem>.json beside a CSV, TSV or spreadsheet)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

pub fn run(args: ResetArgs, global: &GlobalOpts) -> Result<()> {
    let mut inventory = open_inventory(&args.file, global)?;

    if !args.yes {
        if !std::io::stdin().is_terminal() {
            return Err(miette::miette!(
                help = "Pass --yes to reset without a prompt",
                "Refusing to reset without confirmation (stdin is not a terminal)"
            ));
        }

        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt("Are you sure you want to reset the database?")
            .default(false)
            .interact()
            .into_diagnostic()?;
        if !confirmed {
            if !global.quiet {
                println!("Reset cancelled.");
            }
            return Ok(());
        }
    }

    let changed = inventory.reset_all();
    let report = save_inventory(&mut inventory, args.output.as_deref())?;

    if !global.quiet {
        println!(
            "{} Reset {} to Unchecked",
            style("✓").green(),
            style(extinguishers(changed)).cyan()
        );
    }
    print_save_report(&report, global);

    Ok(())
}
