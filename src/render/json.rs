//! JSON rendering of grouped lines.

use crate::error::{Error, Result};
use crate::model::Line;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Serialize lines as a JSON array of block arrays.
pub fn lines_to_json(lines: &[Line<'_>], format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(lines),
        JsonFormat::Compact => serde_json::to_string(lines),
    };

    result.map_err(|e| Error::InvalidDocument(format!("JSON serialization error: {}", e)))
}
