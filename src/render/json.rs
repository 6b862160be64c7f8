//! JSON renderer implementation.

use crate::error::{Error, Result};
use crate::model::Matrix;

/// JSON output format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum JsonFormat {
    /// Compact single-line JSON
    #[default]
    Compact,
    /// Pretty-printed with 2-space indentation
    Pretty,
}

/// Convert a Matrix to a JSON array of arrays of strings.
///
/// Non-ASCII text is written as UTF-8, not as `\u` escapes.
pub fn to_json(matrix: &Matrix, format: JsonFormat) -> Result<String> {
    let json = match format {
        JsonFormat::Compact => serde_json::to_string(matrix),
        JsonFormat::Pretty => serde_json::to_string_pretty(matrix),
    };
    json.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}
