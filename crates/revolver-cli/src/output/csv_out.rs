use serde_json::Value;
use std::io;

/// Write output as CSV to stdout.
///
/// Scenario output flattens into a single row stream with a leading
/// `scenario` column, so the periods of every scenario land in one
/// importable sheet.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    match value {
        Value::Object(map) => {
            if let Some(Value::Object(scenarios)) = map.get("scenarios") {
                write_scenario_csv(&mut wtr, scenarios);
            } else if is_scenario_map(map) {
                write_scenario_csv(&mut wtr, map);
            } else {
                let _ = wtr.write_record(["field", "value"]);
                for (key, val) in map {
                    let _ = wtr.write_record([key.as_str(), &format_csv_value(val)]);
                }
            }
        }
        Value::Array(arr) => {
            write_array_csv(&mut wtr, arr);
        }
        _ => {
            let _ = wtr.write_record([&format_csv_value(value)]);
        }
    }

    let _ = wtr.flush();
}

/// True when every value is a scenario table (an object carrying rows).
fn is_scenario_map(map: &serde_json::Map<String, Value>) -> bool {
    !map.is_empty()
        && map
            .values()
            .all(|v| v.as_object().map_or(false, |t| t.contains_key("rows")))
}

fn write_scenario_csv(
    wtr: &mut csv::Writer<io::StdoutLock<'_>>,
    scenarios: &serde_json::Map<String, Value>,
) {
    // Headers come from the first scenario with at least one row.
    let mut headers: Vec<String> = Vec::new();
    for table in scenarios.values() {
        if let Some(Value::Array(rows)) = table.get("rows") {
            if let Some(Value::Object(first)) = rows.first() {
                headers = first.keys().cloned().collect();
                break;
            }
        }
    }
    if headers.is_empty() {
        return;
    }

    let mut header_record: Vec<String> = vec!["scenario".to_string()];
    header_record.extend(headers.iter().cloned());
    let _ = wtr.write_record(&header_record);

    for (label, table) in scenarios {
        if let Some(Value::Array(rows)) = table.get("rows") {
            for row in rows {
                if let Value::Object(map) = row {
                    let mut record: Vec<String> = vec![label.clone()];
                    record.extend(headers.iter().map(|h| {
                        map.get(h.as_str())
                            .map(format_csv_value)
                            .unwrap_or_default()
                    }));
                    let _ = wtr.write_record(&record);
                }
            }
        }
    }
}

fn write_array_csv(wtr: &mut csv::Writer<io::StdoutLock<'_>>, arr: &[Value]) {
    if arr.is_empty() {
        return;
    }

    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
        let _ = wtr.write_record(&headers);

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(*h).map(format_csv_value).unwrap_or_default())
                    .collect();
                let _ = wtr.write_record(&row);
            }
        }
    } else {
        for item in arr {
            let _ = wtr.write_record([&format_csv_value(item)]);
        }
    }
}

fn format_csv_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        // A defined DSCR serialises as a one-variant object; show the number.
        Value::Object(map) if map.len() == 1 && map.contains_key("Ratio") => map
            .get("Ratio")
            .map(format_csv_value)
            .unwrap_or_default(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
