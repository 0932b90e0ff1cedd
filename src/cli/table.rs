//! Table formatting for extinguisher lists
//!
//! Rows are built from typed cells so each output format can render them
//! its own way: padded and coloured for the terminal, escaped for CSV and
//! Markdown, bare ids for piping.

use console::style;

use crate::cli::helpers::{escape_csv, short_id, styled_status, truncate_str};
use crate::cli::OutputFormat;
use crate::core::record::{Record, Status};

/// A typed cell value with semantic meaning for formatting
#[derive(Debug, Clone)]
pub enum CellValue {
    /// Record id (shortened and cyan in the terminal)
    Id(String),
    /// Plain text, truncated to the column width
    Text(String),
    /// Inspection status with color coding
    Status(Status),
}

impl CellValue {
    /// Format for TSV output (with colors if terminal)
    pub fn format_tsv(&self, width: usize) -> String {
        match self {
            CellValue::Id(id) => format!("{:<width$}", style(short_id(id)).cyan(), width = width),
            CellValue::Text(s) => {
                let truncated = truncate_str(s, width.saturating_sub(2));
                format!("{:<width$}", truncated, width = width)
            }
            CellValue::Status(status) => {
                format!("{:<width$}", styled_status(*status), width = width)
            }
        }
    }

    /// Format for CSV output (RFC 4180, no colors)
    pub fn format_csv(&self) -> String {
        escape_csv(&self.raw())
    }

    /// Format for Markdown output (no colors, escaped pipes)
    pub fn format_md(&self) -> String {
        let raw = match self {
            CellValue::Status(Status::Fail) => "**Fail**".to_string(),
            other => other.raw(),
        };
        raw.replace('|', "\\|")
    }

    /// Get raw string value (no formatting)
    pub fn raw(&self) -> String {
        match self {
            CellValue::Id(id) => id.clone(),
            CellValue::Text(s) => s.clone(),
            CellValue::Status(status) => status.to_string(),
        }
    }

    /// Display width of this cell's content (for dynamic column sizing)
    pub fn display_width(&self) -> usize {
        match self {
            CellValue::Id(id) => short_id(id).chars().count(),
            CellValue::Text(s) => s.chars().count(),
            CellValue::Status(status) => status.to_string().len(),
        }
    }
}

/// Column definition with header label and maximum width
#[derive(Debug, Clone)]
pub struct ColumnDef {
    pub key: &'static str,
    pub header: &'static str,
    pub width: usize,
}

impl ColumnDef {
    pub const fn new(key: &'static str, header: &'static str, width: usize) -> Self {
        Self { key, header, width }
    }
}

/// Columns of the extinguisher list, in display order
pub const RECORD_COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("id", "ID", 10),
    ColumnDef::new("location", "LOCATION", 40),
    ColumnDef::new("barcode", "BARCODE", 20),
    ColumnDef::new("serial", "SERIAL NUMBER", 20),
    ColumnDef::new("status", "STATUS", 10),
];

/// A row of cell values for table output
pub struct TableRow {
    pub full_id: String,
    pub cells: Vec<(&'static str, CellValue)>,
}

impl TableRow {
    pub fn new(full_id: String) -> Self {
        Self {
            full_id,
            cells: Vec::new(),
        }
    }

    pub fn cell(mut self, key: &'static str, value: CellValue) -> Self {
        self.cells.push((key, value));
        self
    }

    pub fn get(&self, key: &str) -> Option<&CellValue> {
        self.cells.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    /// Standard row for one record
    pub fn from_record(record: &Record) -> Self {
        let id = record.id().to_string();
        Self::new(id.clone())
            .cell("id", CellValue::Id(id))
            .cell("location", CellValue::Text(record.location().into_owned()))
            .cell("barcode", CellValue::Text(record.barcode().into_owned()))
            .cell("serial", CellValue::Text(record.serial_number().into_owned()))
            .cell("status", CellValue::Status(record.status()))
    }
}

/// Renders rows in the requested output format
pub struct TableFormatter<'a> {
    columns: &'a [ColumnDef],
}

impl<'a> TableFormatter<'a> {
    pub fn new(columns: &'a [ColumnDef]) -> Self {
        Self { columns }
    }

    /// Render rows; `visible_columns` selects which column keys appear
    pub fn render(&self, rows: &[TableRow], format: OutputFormat, visible_columns: &[&str]) -> String {
        let columns: Vec<&ColumnDef> = self
            .columns
            .iter()
            .filter(|c| visible_columns.contains(&c.key))
            .collect();

        match format {
            OutputFormat::Csv => render_csv(rows, &columns),
            OutputFormat::Md => render_md(rows, &columns),
            OutputFormat::Id => rows.iter().map(|r| format!("{}\n", r.full_id)).collect(),
            _ => render_tsv(rows, &columns),
        }
    }

    pub fn output(&self, rows: &[TableRow], format: OutputFormat, visible_columns: &[&str]) {
        print!("{}", self.render(rows, format, visible_columns));
    }
}

/// Column widths sized to content, capped at each column's maximum
fn calculate_widths(rows: &[TableRow], columns: &[&ColumnDef]) -> Vec<usize> {
    columns
        .iter()
        .map(|col| {
            let max_content = rows
                .iter()
                .filter_map(|r| r.get(col.key))
                .map(|v| v.display_width())
                .max()
                .unwrap_or(0);
            col.header
                .len()
                .max(max_content.saturating_add(2))
                .min(col.width)
        })
        .collect()
}

fn render_tsv(rows: &[TableRow], columns: &[&ColumnDef]) -> String {
    let widths = calculate_widths(rows, columns);
    let mut out = String::new();

    let header: Vec<String> = columns
        .iter()
        .zip(&widths)
        .map(|(col, w)| format!("{:<width$}", style(col.header).bold(), width = w))
        .collect();
    out.push_str(header.join(" ").trim_end());
    out.push('\n');

    let total_width: usize = widths.iter().sum::<usize>() + widths.len().saturating_sub(1);
    out.push_str(&"-".repeat(total_width));
    out.push('\n');

    for row in rows {
        let parts: Vec<String> = columns
            .iter()
            .zip(&widths)
            .map(|(col, &w)| match row.get(col.key) {
                Some(value) => value.format_tsv(w),
                None => format!("{:<width$}", "-", width = w),
            })
            .collect();
        out.push_str(parts.join(" ").trim_end());
        out.push('\n');
    }

    out
}

fn render_csv(rows: &[TableRow], columns: &[&ColumnDef]) -> String {
    let mut out = String::new();
    let headers: Vec<&str> = columns.iter().map(|c| c.key).collect();
    out.push_str(&headers.join(","));
    out.push('\n');

    for row in rows {
        let values: Vec<String> = columns
            .iter()
            .map(|col| row.get(col.key).map(CellValue::format_csv).unwrap_or_default())
            .collect();
        out.push_str(&values.join(","));
        out.push('\n');
    }

    out
}

fn render_md(rows: &[TableRow], columns: &[&ColumnDef]) -> String {
    let mut out = String::new();
    let headers: Vec<&str> = columns.iter().map(|c| c.header).collect();
    out.push_str(&format!("| {} |\n", headers.join(" | ")));
    let separators: Vec<&str> = headers.iter().map(|_| "---").collect();
    out.push_str(&format!("|{}|\n", separators.join("|")));

    for row in rows {
        let values: Vec<String> = columns
            .iter()
            .map(|col| {
                row.get(col.key)
                    .map(CellValue::format_md)
                    .unwrap_or_else(|| "-".to_string())
            })
            .collect();
        out.push_str(&format!("| {} |\n", values.join(" | ")));
    }

    out
}
