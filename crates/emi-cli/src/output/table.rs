use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use emi_core::presentation::format_fixed;

use super::{flatten, row_headers};

/// Format output as tables using the tabled crate.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => match map.get("result") {
            Some(Value::Object(result)) => print_result(result, map),
            _ => print_fields(map),
        },
        Value::Array(rows) => print_rows(rows),
        _ => println!("{}", table_cell(value)),
    }
}

fn print_result(result: &Map<String, Value>, envelope: &Map<String, Value>) {
    print_fields(result);

    for (key, val) in result {
        if let Value::Array(rows) = val {
            println!("\n{}:", key);
            print_rows(rows);
        }
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings.iter().filter_map(Value::as_str) {
                println!("  - {}", w);
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn print_fields(map: &Map<String, Value>) {
    let mut fields = Vec::new();
    flatten("", map, &mut fields);
    if fields.is_empty() {
        return;
    }

    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in fields {
        builder.push_record([key, table_cell(val)]);
    }
    println!("{}", Table::from(builder));
}

fn print_rows(rows: &[Value]) {
    let Some(Value::Object(first)) = rows.first() else {
        if rows.is_empty() {
            println!("(empty)");
        }
        for item in rows {
            println!("{}", table_cell(item));
        }
        return;
    };

    let headers = row_headers(first);
    let mut builder = Builder::default();
    builder.push_record(headers.iter().cloned());
    for item in rows.iter().filter_map(Value::as_object) {
        builder.push_record(
            headers
                .iter()
                .map(|h| item.get(h.as_str()).map(table_cell).unwrap_or_default()),
        );
    }
    println!("{}", Table::from(builder));
}

/// Amounts are shown to two decimals; integers and text verbatim.
fn table_cell(value: &Value) -> String {
    match value {
        Value::Number(n) if n.is_f64() => n.as_f64().map(format_fixed).unwrap_or_default(),
        Value::Null => "null".to_string(),
        Value::Array(arr) => arr.iter().map(table_cell).collect::<Vec<_>>().join(", "),
        _ => super::cell(value),
    }
}
