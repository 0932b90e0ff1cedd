//! JSON parsing helpers with rich diagnostics

pub mod diagnostics;

pub use diagnostics::JsonSyntaxError;

/// Parse JSON text, turning syntax errors into annotated diagnostics
pub fn parse_with_diagnostics(
    source: &str,
    filename: &str,
) -> Result<serde_json::Value, JsonSyntaxError> {
    serde_json::from_str(source)
        .map_err(|e| JsonSyntaxError::from_serde_error(&e, source, filename))
}
