//! Record store - insertion-ordered records with an id index

use std::collections::HashMap;

use crate::core::error::{InventoryError, Result};
use crate::core::identity::RecordId;
use crate::core::record::{Record, Status};

/// Shortest id prefix accepted by [`RecordStore::resolve_id`]
pub const MIN_ID_PREFIX: usize = 4;

/// In-memory collection of inspection records
///
/// Records keep the order they were loaded in. Ids are unique for the
/// lifetime of the store and no operation changes them; edits mutate the
/// existing record in place.
#[derive(Debug, Default, Clone)]
pub struct RecordStore {
    records: Vec<Record>,
    index: HashMap<RecordId, usize>,
}

/// Number of records per status
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StatusCounts {
    pub unchecked: usize,
    pub pass: usize,
    pub fail: usize,
}

impl StatusCounts {
    pub fn total(&self) -> usize {
        self.unchecked + self.pass + self.fail
    }

    pub fn checked(&self) -> usize {
        self.pass + self.fail
    }

    /// Share of records with a verdict, 0-100
    pub fn percent_complete(&self) -> f64 {
        if self.total() == 0 {
            return 0.0;
        }
        self.checked() as f64 * 100.0 / self.total() as f64
    }

    /// Count statuses over any set of records
    pub fn tally<'a>(records: impl IntoIterator<Item = &'a Record>) -> Self {
        let mut counts = StatusCounts::default();
        for record in records {
            match record.status() {
                Status::Unchecked => counts.unchecked += 1,
                Status::Pass => counts.pass += 1,
                Status::Fail => counts.fail += 1,
            }
        }
        counts
    }

    pub fn get(&self, status: Status) -> usize {
        match status {
            Status::Unchecked => self.unchecked,
            Status::Pass => self.pass,
            Status::Fail => self.fail,
        }
    }
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from freshly loaded records
    ///
    /// A record whose id repeats an earlier one gets a new id, so uniqueness
    /// holds even for hand-edited files.
    pub fn from_records(records: impl IntoIterator<Item = Record>) -> Self {
        let mut store = Self::new();
        for mut record in records {
            if store.index.contains_key(record.id()) {
                let duplicate = record.id().clone();
                record.regenerate_id();
                tracing::warn!(
                    duplicate = %duplicate,
                    replacement = %record.id(),
                    "duplicate id in inventory, assigned a new one"
                );
            }
            store.index.insert(record.id().clone(), store.records.len());
            store.records.push(record);
        }
        store
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Full contents in insertion order
    pub fn all(&self) -> &[Record] {
        &self.records
    }

    /// Records whose location or barcode contains `query`, ignoring case
    ///
    /// An empty query returns every record.
    pub fn filter(&self, query: &str) -> Vec<&Record> {
        let needle = query.to_lowercase();
        if needle.is_empty() {
            return self.records.iter().collect();
        }
        self.records.iter().filter(|r| r.matches(&needle)).collect()
    }

    pub fn find_by_id(&self, id: &str) -> Result<&Record> {
        self.index
            .get(id)
            .map(|&pos| &self.records[pos])
            .ok_or_else(|| InventoryError::NotFound(id.to_string()))
    }

    /// Resolve a full id or a unique prefix of one
    pub fn resolve_id(&self, input: &str) -> Result<RecordId> {
        if let Some((id, _)) = self.index.get_key_value(input) {
            return Ok(id.clone());
        }
        if input.len() < MIN_ID_PREFIX {
            return Err(InventoryError::NotFound(input.to_string()));
        }

        let matches: Vec<&Record> = self
            .records
            .iter()
            .filter(|r| r.id().starts_with(input))
            .collect();
        match matches.as_slice() {
            [] => Err(InventoryError::NotFound(input.to_string())),
            [only] => Ok(only.id().clone()),
            many => Err(InventoryError::AmbiguousId {
                prefix: input.to_string(),
                matches: many.iter().map(|r| r.id().to_string()).collect(),
            }),
        }
    }

    /// Set one record's status, returning the previous one
    pub fn set_status(&mut self, id: &str, status: Status) -> Result<Status> {
        let pos = *self
            .index
            .get(id)
            .ok_or_else(|| InventoryError::NotFound(id.to_string()))?;
        let record = &mut self.records[pos];
        let previous = record.status();
        record.set_status(status);
        Ok(previous)
    }

    /// Set every status back to `Unchecked`, returning how many changed
    pub fn reset_all(&mut self) -> usize {
        let mut changed = 0;
        for record in &mut self.records {
            if record.status() != Status::Unchecked {
                changed += 1;
            }
            record.set_status(Status::Unchecked);
        }
        changed
    }

    pub fn counts(&self) -> StatusCounts {
        StatusCounts::tally(&self.records)
    }
}
