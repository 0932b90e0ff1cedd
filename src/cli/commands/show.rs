//! `fec show` command - every field of one extinguisher

use console::style;
use miette::{IntoDiagnostic, Result};
use serde_json::Value;
use std::path::PathBuf;

use crate::cli::commands::utils::open_inventory;
use crate::cli::helpers::styled_status;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::record::keys;

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Inventory file (.csv, .tsv, .xlsx, .xls, .ods or .json)
    pub file: PathBuf,

    /// Extinguisher id, or a unique prefix of at least 4 characters
    pub id: String,
}

pub fn run(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let inventory = open_inventory(&args.file, global)?;
    let id = inventory.resolve_id(&args.id)?;
    let record = inventory.find(id.as_str())?;

    let format = match global.format {
        OutputFormat::Auto => OutputFormat::Yaml,
        f => f,
    };

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(record).into_diagnostic()?;
            println!("{}", json);
        }
        OutputFormat::Yaml => {
            let yaml = serde_yml::to_string(record).into_diagnostic()?;
            print!("{}", yaml);
        }
        OutputFormat::Id => {
            println!("{}", record.id());
        }
        _ => {
            println!("{}", style("─".repeat(60)).dim());
            println!("{}: {}", style("ID").bold(), style(record.id()).cyan());
            println!(
                "{}: {}",
                style("Location").bold(),
                style(record.location()).yellow()
            );
            println!("{}: {}", style("Barcode").bold(), record.barcode());
            println!("{}: {}", style("Serial Number").bold(), record.serial_number());
            println!("{}: {}", style("Status").bold(), styled_status(record.status()));

            let extra: Vec<(&String, &Value)> = record
                .fields()
                .iter()
                .filter(|(k, _)| !is_standard_key(k))
                .collect();
            if !extra.is_empty() {
                println!("{}", style("─".repeat(60)).dim());
                for (key, value) in extra {
                    println!("{}: {}", style(key).bold(), display_value(value));
                }
            }
            println!("{}", style("─".repeat(60)).dim());
        }
    }

    Ok(())
}

fn is_standard_key(key: &str) -> bool {
    matches!(
        key,
        keys::ID | keys::LOCATION | keys::BARCODE | keys::SERIAL_NUMBER | keys::STATUS
    )
}

fn display_value(value: &Value) -> String {
    match value {
        Value::Null => "-".to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
