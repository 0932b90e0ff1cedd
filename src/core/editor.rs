//! Status editor - records a technician's verdict on the selected extinguisher

use crate::core::error::Result;
use crate::core::record::{Status, Verdict};
use crate::core::store::RecordStore;

/// What a status edit did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// Nothing was selected, so nothing changed
    NoSelection,
    /// The record already had this verdict
    Unchanged(Status),
    /// The status moved from `from` to `to`
    Changed { from: Status, to: Status },
}

impl EditOutcome {
    pub fn is_change(&self) -> bool {
        matches!(self, EditOutcome::Changed { .. })
    }
}

/// Thin orchestration over [`RecordStore::set_status`]
pub struct StatusEditor;

impl StatusEditor {
    /// Apply `verdict` to the record identified by `selection`
    ///
    /// An empty selection is a no-op. An id that is not in the store comes
    /// back as `NotFound` without touching anything.
    pub fn apply(
        store: &mut RecordStore,
        selection: Option<&str>,
        verdict: Verdict,
    ) -> Result<EditOutcome> {
        let Some(id) = selection else {
            return Ok(EditOutcome::NoSelection);
        };

        let to = Status::from(verdict);
        let from = store.set_status(id, to)?;
        tracing::debug!(%id, %from, %to, "status updated");

        if from == to {
            Ok(EditOutcome::Unchanged(to))
        } else {
            Ok(EditOutcome::Changed { from, to })
        }
    }
}
