//! Template filters for documentation pages

use minijinja::{Error, ErrorKind, Value};

/// Render a schema literal (enum entry, default) as compact JSON
///
/// Usage: {{ node.default | literal }}
pub fn literal(value: Value) -> Result<String, Error> {
    let json_value: serde_json::Value = serde_json::to_value(&value)
        .map_err(|e| Error::new(ErrorKind::InvalidOperation, e.to_string()))?;

    serde_json::to_string(&json_value)
        .map_err(|e| Error::new(ErrorKind::InvalidOperation, e.to_string()))
}

/// Render a numeric bound without a trailing `.0` for whole numbers
///
/// Usage: {{ node.minimum | bound }}
#[must_use]
pub fn bound(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}
