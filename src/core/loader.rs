//! Inventory loading from tabular, spreadsheet or JSON files
//!
//! The file format is decided once, from the extension, by
//! [`SourceFormat::from_path`]. Everything after that works on the chosen
//! variant instead of re-inspecting the path.

use calamine::{open_workbook_auto, Data, Reader};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

use crate::core::error::{InventoryError, Result};
use crate::core::record::Record;
use crate::json::parse_with_diagnostics;

/// Supported inventory formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// Delimited text with a header row (CSV or TSV)
    Tabular { delimiter: u8 },
    /// Excel or OpenDocument workbook, first worksheet only
    Spreadsheet,
    /// A JSON array of flat objects
    Json,
}

impl SourceFormat {
    /// Pick the format for `path` from its extension (case-insensitive)
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "csv" => Ok(SourceFormat::Tabular { delimiter: b',' }),
            "tsv" => Ok(SourceFormat::Tabular { delimiter: b'\t' }),
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Ok(SourceFormat::Spreadsheet),
            "json" => Ok(SourceFormat::Json),
            _ => Err(InventoryError::UnsupportedFormat {
                path: path.to_path_buf(),
                extension,
            }),
        }
    }

    /// Whether saving back to the source path is meaningful
    pub fn round_trips(&self) -> bool {
        matches!(self, SourceFormat::Json)
    }

    /// Read `path` into records, in file order
    pub fn load(&self, path: &Path) -> Result<Vec<Record>> {
        match self {
            SourceFormat::Tabular { delimiter } => load_tabular(path, *delimiter),
            SourceFormat::Spreadsheet => load_spreadsheet(path),
            SourceFormat::Json => load_json(path),
        }
    }
}

/// Load records from any supported file
pub fn load(path: &Path) -> Result<(SourceFormat, Vec<Record>)> {
    let format = SourceFormat::from_path(path)?;
    let records = format.load(path)?;
    tracing::debug!(path = %path.display(), ?format, count = records.len(), "inventory loaded");
    Ok((format, records))
}

/// Every row becomes a record with a fresh id
///
/// Cells stay strings so barcodes keep leading zeros; empty cells are null.
fn load_tabular(path: &Path, delimiter: u8) -> Result<Vec<Record>> {
    let csv_err = |source: csv::Error| InventoryError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let file = fs::File::open(path).map_err(|e| InventoryError::io(path, e))?;
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(file);

    let headers: Vec<String> = reader
        .headers()
        .map_err(csv_err)?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
        .collect();

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(csv_err)?;
        records.push(row_to_record(&headers, |i| row.get(i)));
    }

    Ok(records)
}

/// Same shape as [`load_tabular`]: first row is the header, cells become
/// strings, every row gets a fresh id
fn load_spreadsheet(path: &Path) -> Result<Vec<Record>> {
    // Surface a missing file as I/O rather than a workbook error
    fs::metadata(path).map_err(|e| InventoryError::io(path, e))?;

    let sheet_err = |source: calamine::Error| InventoryError::Spreadsheet {
        path: path.to_path_buf(),
        source,
    };

    let mut workbook = open_workbook_auto(path).map_err(sheet_err)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| InventoryError::InvalidInventory {
            path: path.to_path_buf(),
            reason: "workbook has no worksheets".to_string(),
        })?
        .map_err(sheet_err)?;

    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return Ok(Vec::new());
    };
    let headers: Vec<String> = header_row
        .iter()
        .map(|cell| cell_text(cell).trim().to_string())
        .collect();

    let records = rows
        .map(|row| {
            let cells: Vec<String> = row.iter().map(cell_text).collect();
            row_to_record(&headers, |i| cells.get(i).map(String::as_str))
        })
        .collect();

    Ok(records)
}

/// Numbers render without a trailing `.0`, so a numeric barcode 123 reads "123"
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Build one record from a header row and a cell lookup
///
/// Columns with a blank header are dropped; blank or missing cells are null.
fn row_to_record<'a>(headers: &[String], cell: impl Fn(usize) -> Option<&'a str>) -> Record {
    let mut fields = Map::new();
    for (i, header) in headers.iter().enumerate() {
        if header.is_empty() {
            continue;
        }
        let value = match cell(i).map(str::trim) {
            Some(text) if !text.is_empty() => Value::String(text.to_string()),
            _ => Value::Null,
        };
        fields.insert(header.clone(), value);
    }
    Record::new(fields)
}

/// Objects keep their `id` when they have one; the rest get a fresh id
fn load_json(path: &Path) -> Result<Vec<Record>> {
    let content = fs::read_to_string(path).map_err(|e| InventoryError::io(path, e))?;
    let filename = path.display().to_string();
    let value = parse_with_diagnostics(&content, &filename)?;

    let invalid = |reason: String| InventoryError::InvalidInventory {
        path: path.to_path_buf(),
        reason,
    };

    let Value::Array(items) = value else {
        return Err(invalid(format!(
            "expected a top-level array, found {}",
            json_kind(&value)
        )));
    };

    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| match item {
            Value::Object(fields) => Ok(Record::from_object(fields)),
            other => Err(invalid(format!(
                "item {} is {}, expected an object",
                i,
                json_kind(&other)
            ))),
        })
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
