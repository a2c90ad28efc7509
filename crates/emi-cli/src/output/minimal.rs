use serde_json::Value;

use super::cell;

/// Fields answering "what is the EMI?", most specific first.
const PRIORITY_KEYS: [&str; 3] = ["emi", "periodic_payment", "principal"];

/// Print just the key answer value from the output.
pub fn print_minimal(value: &Value) {
    println!("{}", minimal_value(value));
}

fn minimal_value(value: &Value) -> String {
    let result = value.get("result").unwrap_or(value);

    for scope in [Some(result), result.get("summary")].into_iter().flatten() {
        for key in PRIORITY_KEYS {
            if let Some(v) = scope.get(key).filter(|v| !v.is_null()) {
                return cell(v);
            }
        }
    }

    match result {
        Value::Object(map) => map
            .iter()
            .next()
            .map(|(k, v)| format!("{}: {}", k, cell(v)))
            .unwrap_or_default(),
        Value::Array(rows) => format!("{} rows", rows.len()),
        _ => cell(result),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_emi_from_envelope_summary() {
        let v = json!({"result": {"summary": {"periodic_payment": 4339.5, "term_months": 240}}});
        assert_eq!(minimal_value(&v), "4339.5");
    }

    #[test]
    fn test_formatted_emi_preferred() {
        let v = json!({"result": {"emi": "₹ 4,339.12", "loan_tenure": "240 Months"}});
        assert_eq!(minimal_value(&v), "₹ 4,339.12");
    }

    #[test]
    fn test_schedule_row_count() {
        let v = json!([{"period": 1}, {"period": 2}]);
        assert_eq!(minimal_value(&v), "2 rows");
    }
}
