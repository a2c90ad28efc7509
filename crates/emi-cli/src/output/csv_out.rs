use serde_json::{Map, Value};
use std::io;
use tracing::error;

use super::{cell, flatten, row_headers};

/// Write output as CSV to stdout.
///
/// Schedules become one record per period; anything else a two-column
/// `field,value` listing of the flattened result.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());
    if let Err(e) = write_csv(&mut wtr, value) {
        error!(error = %e, "failed to write CSV output");
    }
}

fn write_csv<W: io::Write>(wtr: &mut csv::Writer<W>, value: &Value) -> csv::Result<()> {
    match value {
        Value::Object(map) => {
            let result = match map.get("result") {
                Some(Value::Object(result)) => result,
                _ => map,
            };
            match result.get("schedule") {
                Some(Value::Array(rows)) => write_rows(wtr, rows)?,
                _ => write_fields(wtr, result)?,
            }
        }
        Value::Array(rows) => write_rows(wtr, rows)?,
        _ => wtr.write_record([cell(value)])?,
    }
    wtr.flush()?;
    Ok(())
}

fn write_fields<W: io::Write>(wtr: &mut csv::Writer<W>, map: &Map<String, Value>) -> csv::Result<()> {
    let mut fields = Vec::new();
    flatten("", map, &mut fields);
    wtr.write_record(["field", "value"])?;
    for (key, val) in fields {
        wtr.write_record([key, cell(val)])?;
    }
    Ok(())
}

fn write_rows<W: io::Write>(wtr: &mut csv::Writer<W>, rows: &[Value]) -> csv::Result<()> {
    let Some(Value::Object(first)) = rows.first() else {
        for item in rows {
            wtr.write_record([cell(item)])?;
        }
        return Ok(());
    };

    let headers = row_headers(first);
    wtr.write_record(&headers)?;
    for item in rows.iter().filter_map(Value::as_object) {
        wtr.write_record(
            headers
                .iter()
                .map(|h| item.get(h.as_str()).map(cell).unwrap_or_default()),
        )?;
    }
    Ok(())
}
