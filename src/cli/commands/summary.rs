//! `fec summary` command - inspection progress at a glance

use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use std::path::PathBuf;
use tabled::{builder::Builder, settings::Style};

use crate::cli::commands::utils::open_inventory;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::{Status, StatusCounts};

#[derive(clap::Args, Debug)]
pub struct SummaryArgs {
    /// Inventory file (.csv, .tsv, .xlsx, .xls, .ods or .json)
    pub file: PathBuf,
}

#[derive(Serialize)]
struct Summary {
    total: usize,
    pass: usize,
    fail: usize,
    unchecked: usize,
    percent_complete: f64,
}

impl From<StatusCounts> for Summary {
    fn from(counts: StatusCounts) -> Self {
        Self {
            total: counts.total(),
            pass: counts.pass,
            fail: counts.fail,
            unchecked: counts.unchecked,
            percent_complete: (counts.percent_complete() * 10.0).round() / 10.0,
        }
    }
}

pub fn run(args: SummaryArgs, global: &GlobalOpts) -> Result<()> {
    let inventory = open_inventory(&args.file, global)?;
    let counts = inventory.store().counts();

    match global.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&Summary::from(counts)).into_diagnostic()?;
            println!("{}", json);
        }
        OutputFormat::Yaml => {
            let yaml = serde_yml::to_string(&Summary::from(counts)).into_diagnostic()?;
            print!("{}", yaml);
        }
        _ => println!("{}", render_table(&counts)),
    }

    Ok(())
}

fn render_table(counts: &StatusCounts) -> String {
    let mut table = Builder::default();
    table.push_record(["Status", "Count"]);
    for status in Status::all() {
        table.push_record([status.to_string(), counts.get(*status).to_string()]);
    }
    table.push_record(["Total".to_string(), counts.total().to_string()]);
    table.push_record([
        "Complete".to_string(),
        format!("{:.1}%", counts.percent_complete()),
    ]);
    table.build().with(Style::markdown()).to_string()
}
