//! Core module - records, the store, loading and persistence

pub mod config;
pub mod editor;
pub mod error;
pub mod identity;
pub mod inventory;
pub mod loader;
pub mod persist;
pub mod record;
pub mod store;

pub use config::Config;
pub use editor::{EditOutcome, StatusEditor};
pub use error::InventoryError;
pub use identity::RecordId;
pub use inventory::{Inventory, Source};
pub use loader::SourceFormat;
pub use persist::{Persistence, SaveReport};
pub use record::{Record, Status, Verdict};
pub use store::{RecordStore, StatusCounts};
