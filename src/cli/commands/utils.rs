//! Shared utilities for CLI commands

use console::style;
use miette::Result;
use std::path::{Path, PathBuf};

use crate::cli::GlobalOpts;
use crate::core::{Inventory, Persistence, SaveReport};

/// Persistence configured from `--backup-dir` (already merged with config)
pub fn persistence(global: &GlobalOpts) -> Persistence {
    match &global.backup_dir {
        Some(dir) => Persistence::new(dir.clone()),
        None => Persistence::default(),
    }
}

/// Load an inventory file for a command
pub fn open_inventory(file: &Path, global: &GlobalOpts) -> Result<Inventory> {
    let inventory = Inventory::open(file, persistence(global))?;
    tracing::debug!(
        path = %file.display(),
        records = inventory.store().len(),
        "inventory opened"
    );
    Ok(inventory)
}

/// Where a save without an explicit destination goes
///
/// JSON sources are written back in place. Other sources get a sibling
/// `<stem>.json`, since only JSON carries ids.
pub fn default_destination(inventory: &Inventory) -> Option<PathBuf> {
    if let Some(path) = inventory.active_path() {
        return Some(path.to_path_buf());
    }
    inventory
        .source()
        .map(|source| source.path.with_extension("json"))
}

/// Save to `output` if given, otherwise to [`default_destination`]
///
/// A sibling JSON that already exists is never replaced implicitly: it holds
/// the ids and notes that the tabular source lacks.
pub fn save_inventory(inventory: &mut Inventory, output: Option<&Path>) -> Result<SaveReport> {
    let report = match output {
        Some(path) => inventory.save_as(path)?,
        None if inventory.active_path().is_some() => inventory.save()?,
        None => {
            let target = default_destination(inventory)
                .ok_or_else(|| miette::miette!("No inventory loaded, nothing to save"))?;
            if target.exists() {
                return Err(miette::miette!(
                    help = format!(
                        "Run the command on {} directly, or pass --output <FILE>.json",
                        target.display()
                    ),
                    "{} already exists; refusing to replace it",
                    target.display()
                ));
            }
            inventory.save_as(&target)?
        }
    };
    Ok(report)
}

/// Print where a save went
pub fn print_save_report(report: &SaveReport, global: &GlobalOpts) {
    if global.quiet {
        return;
    }
    println!(
        "{} Saved {}",
        style("✓").green(),
        style(report.primary.display()).cyan()
    );
    println!(
        "   {} {}",
        style("backup:").dim(),
        style(report.backup.display()).dim()
    );
}
