//! `fec pass` / `fec fail` commands - record verdicts and save

use console::style;
use miette::Result;
use std::path::PathBuf;

use crate::cli::commands::utils::{open_inventory, print_save_report, save_inventory};
use crate::cli::helpers::{short_id, styled_status};
use crate::cli::GlobalOpts;
use crate::core::{EditOutcome, RecordId, Verdict};

#[derive(clap::Args, Debug)]
pub struct MarkArgs {
    /// JSON inventory file
    pub file: PathBuf,

    /// Extinguisher ids (or unique prefixes of at least 4 characters)
    #[arg(required = true)]
    pub ids: Vec<String>,

    /// JSON file to save to instead of the source
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Show what would change without saving
    #[arg(long)]
    pub dry_run: bool,
}

pub fn run(args: MarkArgs, verdict: Verdict, global: &GlobalOpts) -> Result<()> {
    let mut inventory = open_inventory(&args.file, global)?;

    // CSV, TSV and spreadsheet rows get new ids on every load, so ids can't be carried over
    if inventory.active_path().is_none() {
        return Err(miette::miette!(
            help = format!(
                "Run 'fec convert {} <FILE>.json' once and mark the JSON file instead",
                args.file.display()
            ),
            "{} has no stable ids",
            args.file.display()
        ));
    }

    // Resolve everything up front so a typo leaves the file untouched
    let ids = args
        .ids
        .iter()
        .map(|input| inventory.resolve_id(input))
        .collect::<crate::core::error::Result<Vec<RecordId>>>()?;

    let mut changed = 0;
    for id in &ids {
        let outcome = inventory.set_status(id.as_str(), verdict)?;
        if outcome.is_change() {
            changed += 1;
        }
        if global.quiet {
            continue;
        }

        let location = inventory.find(id.as_str())?.location().into_owned();
        match outcome {
            EditOutcome::Changed { from, to } => println!(
                "{} {} {} {} {} {}",
                style("✓").green(),
                style(short_id(id.as_str())).cyan(),
                location,
                styled_status(from),
                style("→").dim(),
                styled_status(to)
            ),
            EditOutcome::Unchanged(status) => println!(
                "{} {} {} already {}",
                style("·").dim(),
                style(short_id(id.as_str())).cyan(),
                location,
                styled_status(status)
            ),
            EditOutcome::NoSelection => {}
        }
    }

    if args.dry_run {
        if !global.quiet {
            println!(
                "{} Dry run: {} change(s) not saved",
                style("!").yellow(),
                changed
            );
        }
        return Ok(());
    }

    let report = save_inventory(&mut inventory, args.output.as_deref())?;
    print_save_report(&report, global);

    Ok(())
}
