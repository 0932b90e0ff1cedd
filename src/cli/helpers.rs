//! Shared helper functions for CLI commands
//!
//! This module contains utility functions that are used across multiple
//! command modules to avoid code duplication.

use console::{style, StyledObject};

use crate::core::record::Status;

/// Number of id characters shown in tables
///
/// Long enough to be accepted back as an id prefix by `fec pass`/`fec fail`.
pub const SHORT_ID_LEN: usize = 8;

/// Leading characters of an id for display
pub fn short_id(id: &str) -> &str {
    match id.char_indices().nth(SHORT_ID_LEN) {
        Some((end, _)) => &id[..end],
        None => id,
    }
}

/// Truncate a string to max_len characters, adding "..." if truncated
///
/// Useful for table columns that need fixed-width output.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Escape a string for CSV output
///
/// Handles commas, quotes, and newlines according to RFC 4180.
pub fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

/// Status text coloured the way the checklist shows it
pub fn styled_status(status: Status) -> StyledObject<String> {
    let s = status.to_string();
    match status {
        Status::Pass => style(s).green(),
        Status::Fail => style(s).red().bold(),
        Status::Unchecked => style(s),
    }
}

/// Pluralize "extinguisher" for summaries
pub fn extinguishers(n: usize) -> String {
    if n == 1 {
        "1 extinguisher".to_string()
    } else {
        format!("{} extinguishers", n)
    }
}
