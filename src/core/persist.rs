//! Persistence - timestamped backup, then atomic overwrite of the inventory
//!
//! Both files are written through a temporary file in the destination
//! directory that is synced and renamed into place, so a crash mid-write
//! never leaves a truncated inventory behind. The backup is written first;
//! if it fails, the primary file is not touched.

use chrono::{Local, NaiveDateTime};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use crate::core::error::{InventoryError, Result};
use crate::core::store::RecordStore;

/// Backup directory used when nothing else is configured
pub const DEFAULT_BACKUP_DIR: &str = "backup";

/// `YYYYMMDD_HHMMSS`, local time
const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Writes inventories and their backups
#[derive(Debug, Clone)]
pub struct Persistence {
    backup_dir: PathBuf,
}

/// Files written by one save
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveReport {
    pub primary: PathBuf,
    pub backup: PathBuf,
}

impl Default for Persistence {
    fn default() -> Self {
        Self::new(DEFAULT_BACKUP_DIR)
    }
}

impl Persistence {
    /// `backup_dir` is resolved against the working directory when relative
    pub fn new(backup_dir: impl Into<PathBuf>) -> Self {
        Self {
            backup_dir: backup_dir.into(),
        }
    }

    pub fn backup_dir(&self) -> &Path {
        &self.backup_dir
    }

    /// `<stem>_backup_<YYYYMMDD>_<HHMMSS>.json`
    pub fn backup_file_name(path: &Path, at: NaiveDateTime) -> String {
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "inventory".to_string());
        format!("{}_backup_{}.json", stem, at.format(TIMESTAMP_FORMAT))
    }

    /// Save `store` to `path`, backing it up first
    pub fn save(&self, store: &RecordStore, path: &Path) -> Result<SaveReport> {
        self.save_at(store, path, Local::now().naive_local())
    }

    /// Same as [`Persistence::save`] with an explicit backup timestamp
    pub fn save_at(
        &self,
        store: &RecordStore,
        path: &Path,
        at: NaiveDateTime,
    ) -> Result<SaveReport> {
        // One snapshot feeds both writes
        let mut bytes = serde_json::to_vec_pretty(store.all())?;
        bytes.push(b'\n');

        fs::create_dir_all(&self.backup_dir)
            .map_err(|e| InventoryError::io(&self.backup_dir, e))?;
        let backup = self.backup_dir.join(Self::backup_file_name(path, at));

        atomic_write(&backup, &bytes)?;
        tracing::info!(backup = %backup.display(), "backup written");

        atomic_write(path, &bytes)?;
        tracing::info!(path = %path.display(), records = store.len(), "inventory saved");

        Ok(SaveReport {
            primary: path.to_path_buf(),
            backup,
        })
    }
}

/// Write `bytes` to `path` via a synced temp file and a rename
fn atomic_write(path: &Path, bytes: &[u8]) -> Result<()> {
    let io_err = |e: std::io::Error| InventoryError::io(path, e);

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(io_err)?;
    tmp.write_all(bytes).map_err(io_err)?;
    tmp.flush().map_err(io_err)?;
    if let Ok(meta) = fs::metadata(path) {
        // Keep the replaced file's permissions instead of the temp file's 0600
        tmp.as_file()
            .set_permissions(meta.permissions())
            .map_err(io_err)?;
    }
    tmp.as_file().sync_all().map_err(io_err)?;
    tmp.persist(path).map_err(|e| io_err(e.error))?;

    Ok(())
}
