//! Inspection record - typed view over a passthrough field map

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use std::borrow::Cow;

use crate::core::identity::RecordId;

/// Field names used by inventory files
pub mod keys {
    pub const ID: &str = "id";
    pub const LOCATION: &str = "Location";
    pub const BARCODE: &str = "Barcode";
    pub const SERIAL_NUMBER: &str = "Serial Number";
    pub const STATUS: &str = "Pass Y/N";
}

pub const UNKNOWN_LOCATION: &str = "Unknown Location";
pub const UNKNOWN_BARCODE: &str = "Unknown Barcode";
pub const UNKNOWN_SERIAL: &str = "Unknown Serial";

/// Inspection outcome of one extinguisher
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum Status {
    #[default]
    Unchecked,
    Pass,
    Fail,
}

impl Status {
    pub fn all() -> &'static [Status] {
        &[Status::Unchecked, Status::Pass, Status::Fail]
    }

    /// Interpret a raw field value, falling back to `Unchecked`
    pub fn from_value(value: Option<&Value>) -> Self {
        match value {
            Some(Value::String(s)) => s.parse().unwrap_or_default(),
            Some(Value::Bool(true)) => Status::Pass,
            Some(Value::Bool(false)) => Status::Fail,
            _ => Status::Unchecked,
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::Unchecked => write!(f, "Unchecked"),
            Status::Pass => write!(f, "Pass"),
            Status::Fail => write!(f, "Fail"),
        }
    }
}

impl std::str::FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // "Pass Y/N" spreadsheets often hold Y/N rather than the full word
        match s.trim().to_lowercase().as_str() {
            "unchecked" => Ok(Status::Unchecked),
            "pass" | "y" | "yes" => Ok(Status::Pass),
            "fail" | "n" | "no" => Ok(Status::Fail),
            _ => Err(format!("Unknown status: {}", s)),
        }
    }
}

/// A verdict a technician can record for one extinguisher
///
/// `Unchecked` is deliberately absent: it is only reachable through a reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    Pass,
    Fail,
}

impl From<Verdict> for Status {
    fn from(verdict: Verdict) -> Self {
        match verdict {
            Verdict::Pass => Status::Pass,
            Verdict::Fail => Status::Fail,
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Status::from(*self).fmt(f)
    }
}

/// One fire extinguisher inspection entry
///
/// All fields from the source file, including the id, live in a single
/// ordered map so that unknown columns and key order survive a save.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    id: RecordId,
    fields: Map<String, Value>,
}

impl Record {
    /// Build a record with a freshly generated id
    ///
    /// Any `id` already present in `fields` is replaced; its key position is kept.
    pub fn new(mut fields: Map<String, Value>) -> Self {
        let id = RecordId::generate();
        fields.insert(keys::ID.to_string(), Value::String(id.to_string()));
        Self { id, fields }
    }

    /// Build a record that keeps the id already present in `fields`
    ///
    /// Returns `None` when there is no usable id (missing or null). Non-string
    /// ids are kept verbatim in the map and addressed by their JSON text.
    pub fn with_existing_id(fields: Map<String, Value>) -> Option<Self> {
        let id = existing_id(&fields)?;
        Some(Self { id, fields })
    }

    /// Keep a usable existing id, otherwise generate one
    pub fn from_object(fields: Map<String, Value>) -> Self {
        match existing_id(&fields) {
            Some(id) => Self { id, fields },
            None => Self::new(fields),
        }
    }

    /// Replace a colliding id before the record enters a store
    pub(crate) fn regenerate_id(&mut self) {
        let id = RecordId::generate();
        self.fields
            .insert(keys::ID.to_string(), Value::String(id.to_string()));
        self.id = id;
    }

    pub fn id(&self) -> &RecordId {
        &self.id
    }

    /// All fields, in source order
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Text of a field; `None` when absent or null
    pub fn text(&self, key: &str) -> Option<Cow<'_, str>> {
        match self.fields.get(key)? {
            Value::Null => None,
            Value::String(s) => Some(Cow::Borrowed(s.as_str())),
            other => Some(Cow::Owned(other.to_string())),
        }
    }

    pub fn location(&self) -> Cow<'_, str> {
        self.text(keys::LOCATION)
            .unwrap_or(Cow::Borrowed(UNKNOWN_LOCATION))
    }

    pub fn barcode(&self) -> Cow<'_, str> {
        self.text(keys::BARCODE)
            .unwrap_or(Cow::Borrowed(UNKNOWN_BARCODE))
    }

    pub fn serial_number(&self) -> Cow<'_, str> {
        self.text(keys::SERIAL_NUMBER)
            .unwrap_or(Cow::Borrowed(UNKNOWN_SERIAL))
    }

    pub fn status(&self) -> Status {
        Status::from_value(self.fields.get(keys::STATUS))
    }

    /// Overwrite the status field in place
    pub fn set_status(&mut self, status: Status) {
        self.fields
            .insert(keys::STATUS.to_string(), Value::String(status.to_string()));
    }

    /// Case-insensitive substring match on location and barcode
    ///
    /// `needle` must already be lowercase. Absent fields match as empty text,
    /// so the sentinels never produce hits.
    pub fn matches(&self, needle: &str) -> bool {
        [keys::LOCATION, keys::BARCODE].iter().any(|key| {
            self.text(key)
                .map_or(needle.is_empty(), |text| text.to_lowercase().contains(needle))
        })
    }
}

fn existing_id(fields: &Map<String, Value>) -> Option<RecordId> {
    match fields.get(keys::ID)? {
        Value::Null => None,
        Value::String(s) => Some(RecordId::from_existing(s.as_str())),
        other => Some(RecordId::from_existing(other.to_string())),
    }
}

impl Serialize for Record {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.fields.serialize(serializer)
    }
}
