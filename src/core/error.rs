//! Errors surfaced by inventory operations

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

use crate::json::JsonSyntaxError;

/// Errors that can occur while loading, editing or saving an inventory
///
/// None of these are fatal to the caller: the inventory stays usable and the
/// triggering action may be retried.
#[derive(Debug, Error, Diagnostic)]
pub enum InventoryError {
    #[error("unsupported file type '{extension}' for {path:?}")]
    #[diagnostic(
        code(fec::load::unsupported_format),
        help("Inventories must be .csv, .tsv, .xlsx, .xls, .ods or .json.")
    )]
    UnsupportedFormat { path: PathBuf, extension: String },

    #[error("no extinguisher with id '{0}'")]
    #[diagnostic(code(fec::store::not_found))]
    NotFound(String),

    #[error("id prefix '{prefix}' is ambiguous, matches: {}", matches.join(", "))]
    #[diagnostic(
        code(fec::store::ambiguous_id),
        help("Type more characters of the id.")
    )]
    AmbiguousId {
        prefix: String,
        matches: Vec<String>,
    },

    #[error("nothing to save: no JSON file is associated with this inventory")]
    #[diagnostic(
        code(fec::save::no_active_path),
        help("Load a .json inventory, or save to an explicit JSON path first.")
    )]
    NoActivePath,

    #[error("I/O error on {path:?}: {source}")]
    #[diagnostic(code(fec::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    JsonSyntax(#[from] JsonSyntaxError),

    #[error("{path:?} is not an inventory: {reason}")]
    #[diagnostic(
        code(fec::load::invalid_inventory),
        help("A JSON inventory is a top-level array with one object per extinguisher.")
    )]
    InvalidInventory { path: PathBuf, reason: String },

    #[error("could not read CSV {path:?}: {source}")]
    #[diagnostic(code(fec::load::csv))]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("could not read spreadsheet {path:?}: {source}")]
    #[diagnostic(code(fec::load::spreadsheet))]
    Spreadsheet {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    #[error("could not serialize inventory: {0}")]
    #[diagnostic(code(fec::save::serialize))]
    Serialize(#[from] serde_json::Error),
}

impl InventoryError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        InventoryError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, InventoryError>;
