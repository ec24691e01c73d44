//! Flatten JSON records into dotted-key rows and write them as CSV/TSV.
//!
//! Nested objects contribute `parent.child` columns, arrays contribute
//! `parent.0`, `parent.1`, ... columns. The header is the union of every
//! row's columns in first-seen order.

use std::collections::{HashMap, HashSet};

use serde_json::Value;

use crate::error::ApiError;

/// Column name used when a row is a bare scalar rather than an object.
const SCALAR_COLUMN: &str = "value";

/// Flatten one JSON value into `(dotted.key, cell)` pairs.
pub fn flatten(value: &Value) -> Vec<(String, String)> {
    let mut out = Vec::new();
    match value {
        Value::Object(_) | Value::Array(_) => flatten_into("", value, &mut out),
        scalar => out.push((SCALAR_COLUMN.to_string(), cell(scalar))),
    }
    out
}

fn flatten_into(prefix: &str, value: &Value, out: &mut Vec<(String, String)>) {
    let join = |key: &str| {
        if prefix.is_empty() {
            key.to_string()
        } else {
            format!("{prefix}.{key}")
        }
    };
    match value {
        Value::Object(map) if !map.is_empty() => {
            for (k, v) in map {
                flatten_into(&join(k), v, out);
            }
        }
        Value::Array(items) if !items.is_empty() => {
            for (i, v) in items.iter().enumerate() {
                flatten_into(&join(&i.to_string()), v, out);
            }
        }
        other => {
            if !prefix.is_empty() {
                out.push((prefix.to_string(), cell(other)));
            }
        }
    }
}

fn cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Object(_) | Value::Array(_) => String::new(),
        other => other.to_string(),
    }
}

/// Write `rows` as delimited text with a header line.
///
/// Returns an empty string when there is nothing to write.
pub fn to_delimited(rows: &[Value], delimiter: u8) -> Result<String, ApiError> {
    let flat: Vec<Vec<(String, String)>> = rows.iter().map(flatten).collect();
    let cells = flat
        .iter()
        .map(|row| cells_of(row))
        .collect::<Result<Vec<_>, _>>()?;

    let mut headers: Vec<&str> = Vec::new();
    let mut seen = HashSet::new();
    for row in &flat {
        for (key, _) in row {
            if seen.insert(key.as_str()) {
                headers.push(key.as_str());
            }
        }
    }
    if headers.is_empty() {
        return Ok(String::new());
    }

    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());
    writer.write_record(&headers)?;
    for row in &cells {
        writer.write_record(headers.iter().map(|h| row.get(h).copied().unwrap_or("")))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ApiError::Export(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ApiError::Export(e.to_string()))
}

/// Index one flattened row by column. A literal dotted key such as `"a.b"`
/// and the nested path `a` -> `b` name the same column and are rejected.
fn cells_of(row: &[(String, String)]) -> Result<HashMap<&str, &str>, ApiError> {
    let mut cells = HashMap::with_capacity(row.len());
    for (key, value) in row {
        if cells.insert(key.as_str(), value.as_str()).is_some() {
            return Err(ApiError::Export(format!("duplicate column '{key}'")));
        }
    }
    Ok(cells)
}

/// Treat a single object as a one-row table; arrays are used as-is.
pub fn rows_of(value: Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items,
        other => vec![other],
    }
}
