//! Inventory - the application context the presentation layer talks to
//!
//! Owns the record store, remembers where the data came from, and knows where
//! a save should go. Nothing here is global: callers hold an `Inventory` and
//! pass it by reference.

use std::path::{Path, PathBuf};

use crate::core::editor::{EditOutcome, StatusEditor};
use crate::core::error::{InventoryError, Result};
use crate::core::identity::RecordId;
use crate::core::loader::{self, SourceFormat};
use crate::core::persist::{Persistence, SaveReport};
use crate::core::record::{Record, Verdict};
use crate::core::store::RecordStore;

/// Where the current records were loaded from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    pub path: PathBuf,
    pub format: SourceFormat,
}

#[derive(Debug, Default)]
pub struct Inventory {
    store: RecordStore,
    source: Option<Source>,
    active_path: Option<PathBuf>,
    persistence: Persistence,
}

impl Inventory {
    pub fn new(persistence: Persistence) -> Self {
        Self {
            persistence,
            ..Self::default()
        }
    }

    /// Create an inventory and load `path` into it
    pub fn open(path: &Path, persistence: Persistence) -> Result<Self> {
        let mut inventory = Self::new(persistence);
        inventory.load_file(path)?;
        Ok(inventory)
    }

    /// Replace the current contents with the records in `path`
    ///
    /// A JSON source becomes the active save path; a tabular source clears
    /// it. On error the previous contents are kept.
    pub fn load_file(&mut self, path: &Path) -> Result<usize> {
        let (format, records) = loader::load(path)?;

        self.store = RecordStore::from_records(records);
        self.active_path = format.round_trips().then(|| path.to_path_buf());
        self.source = Some(Source {
            path: path.to_path_buf(),
            format,
        });

        Ok(self.store.len())
    }

    pub fn source(&self) -> Option<&Source> {
        self.source.as_ref()
    }

    /// The JSON file [`Inventory::save`] writes to, if any
    pub fn active_path(&self) -> Option<&Path> {
        self.active_path.as_deref()
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn persistence(&self) -> &Persistence {
        &self.persistence
    }

    pub fn all_records(&self) -> &[Record] {
        self.store.all()
    }

    pub fn filtered_records(&self, query: &str) -> Vec<&Record> {
        self.store.filter(query)
    }

    pub fn find(&self, id: &str) -> Result<&Record> {
        self.store.find_by_id(id)
    }

    /// Resolve a full id or a unique prefix of one
    pub fn resolve_id(&self, input: &str) -> Result<RecordId> {
        self.store.resolve_id(input)
    }

    pub fn set_status(&mut self, id: &str, verdict: Verdict) -> Result<EditOutcome> {
        StatusEditor::apply(&mut self.store, Some(id), verdict)
    }

    /// Monthly reset: every status back to `Unchecked`
    pub fn reset_all(&mut self) -> usize {
        let changed = self.store.reset_all();
        tracing::info!(changed, total = self.store.len(), "statuses reset");
        changed
    }

    /// Back up and overwrite the active path
    pub fn save(&self) -> Result<SaveReport> {
        let path = self
            .active_path
            .as_deref()
            .ok_or(InventoryError::NoActivePath)?;
        self.persistence.save(&self.store, path)
    }

    /// Save to `path` and make it the active path
    ///
    /// Only JSON destinations are accepted, since that is the only format
    /// that round-trips ids.
    pub fn save_as(&mut self, path: &Path) -> Result<SaveReport> {
        let format = SourceFormat::from_path(path)?;
        if !format.round_trips() {
            return Err(InventoryError::UnsupportedFormat {
                path: path.to_path_buf(),
                extension: path
                    .extension()
                    .map(|e| e.to_string_lossy().into_owned())
                    .unwrap_or_default(),
            });
        }

        let report = self.persistence.save(&self.store, path)?;
        self.active_path = Some(path.to_path_buf());
        Ok(report)
    }
}
