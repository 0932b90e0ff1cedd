//! JSON error diagnostics with source snippets

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// JSON syntax error with source location
#[derive(Debug, Error, Diagnostic)]
#[error("JSON syntax error: {message}")]
#[diagnostic(code(fec::json::syntax))]
pub struct JsonSyntaxError {
    #[source_code]
    src: NamedSource<String>,

    #[label("error here")]
    span: SourceSpan,

    #[help]
    help: Option<String>,

    message: String,
}

impl JsonSyntaxError {
    /// Create a syntax error from a serde_json error
    pub fn from_serde_error(err: &serde_json::Error, source: &str, filename: &str) -> Self {
        let line = err.line().max(1);
        let column = err.column().max(1);

        let offset = line_col_to_offset(source, line, column);
        let message = err.to_string();
        let help = generate_help(&message);

        Self {
            src: NamedSource::new(filename, source.to_string()),
            span: SourceSpan::from(offset..offset.saturating_add(1)),
            help,
            message,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Convert a 1-based line/column to a byte offset, clamped to the source
fn line_col_to_offset(source: &str, line: usize, column: usize) -> usize {
    let mut current_line = 1;
    let mut line_start = 0;

    for (i, ch) in source.char_indices() {
        if current_line == line {
            break;
        }
        if ch == '\n' {
            current_line += 1;
            line_start = i + 1;
        }
    }

    if current_line < line {
        return source.len().saturating_sub(1);
    }

    source[line_start..]
        .char_indices()
        .take_while(|(_, c)| *c != '\n')
        .nth(column - 1)
        .map(|(j, _)| line_start + j)
        .unwrap_or_else(|| source.len().min(line_start + column - 1).saturating_sub(1))
}

fn generate_help(message: &str) -> Option<String> {
    let msg_lower = message.to_lowercase();

    if msg_lower.contains("trailing comma") {
        return Some("JSON does not allow a comma after the last item. Remove it.".to_string());
    }

    if msg_lower.contains("key must be a string") {
        return Some("Object keys need double quotes: {\"Location\": \"Hall\"}".to_string());
    }

    if msg_lower.contains("eof while parsing") {
        return Some("The file ends early. Check for a missing ']' or '}'.".to_string());
    }

    if msg_lower.contains("expected `,` or") {
        return Some("Items need commas between them: [{...}, {...}]".to_string());
    }

    if msg_lower.contains("expected value") {
        return Some(
            "Strings must use double quotes, and the file must start with '['.".to_string(),
        );
    }

    None
}
