pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::{Map, Value};

/// Columns moved to the front of row tables when present.
const LEADING_COLUMNS: [&str; 2] = ["period", "month"];

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Render a scalar JSON value for a table cell or CSV field.
pub(crate) fn cell(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}

/// Column order for schedule-like rows: period first, then the rest by name.
pub(crate) fn row_headers(first: &Map<String, Value>) -> Vec<String> {
    let mut headers: Vec<String> = first.keys().cloned().collect();
    headers.sort_by_key(|h| !LEADING_COLUMNS.contains(&h.as_str()));
    headers
}

/// Flatten nested objects into dotted keys; arrays are left to the caller.
pub(crate) fn flatten<'a>(
    prefix: &str,
    map: &'a Map<String, Value>,
    out: &mut Vec<(String, &'a Value)>,
) {
    for (key, val) in map {
        let name = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match val {
            Value::Object(inner) => flatten(&name, inner, out),
            Value::Array(_) => {}
            _ => out.push((name, val)),
        }
    }
}
