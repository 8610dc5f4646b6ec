use serde_json::Value;
use tabled::{builder::Builder, Table};

/// Format output as tables using the tabled crate.
///
/// Scenario output prints one period table per scenario under a heading
/// line; the full analysis leads with the per-scenario summary table.
/// Anything else falls back to a generic record or field/value table.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => {
            if let Some(Value::Object(scenarios)) = map.get("scenarios") {
                if let Some(Value::Array(summaries)) = map.get("summaries") {
                    println!("Scenario summary");
                    print_record_table(summaries);
                }
                print_scenario_tables(scenarios);
            } else if is_scenario_map(map) {
                print_scenario_tables(map);
            } else {
                print_field_table(map);
            }
        }
        Value::Array(arr) => print_record_table(arr),
        _ => println!("{}", value),
    }
}

/// True when every value is a scenario table (an object carrying rows).
fn is_scenario_map(map: &serde_json::Map<String, Value>) -> bool {
    !map.is_empty()
        && map
            .values()
            .all(|v| v.as_object().map_or(false, |t| t.contains_key("rows")))
}

fn print_scenario_tables(scenarios: &serde_json::Map<String, Value>) {
    for (label, table) in scenarios {
        let rate = table
            .get("all_in_rate")
            .map(format_value)
            .unwrap_or_default();
        println!("\nScenario: {} (all-in rate {})", label, rate);
        match table.get("rows") {
            Some(Value::Array(rows)) => print_record_table(rows),
            _ => println!("(no rows)"),
        }
    }
}

fn print_record_table(arr: &[Value]) {
    if arr.is_empty() {
        println!("(empty)");
        return;
    }

    // Headers come from the first record.
    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<String> = first.keys().cloned().collect();
        let mut builder = Builder::default();
        builder.push_record(&headers);

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(h.as_str()).map(format_value).unwrap_or_default())
                    .collect();
                builder.push_record(row);
            }
        }

        let table = Table::from(builder);
        println!("{}", table);
    } else {
        for item in arr {
            println!("{}", format_value(item));
        }
    }
}

fn print_field_table(map: &serde_json::Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        builder.push_record([key.as_str(), &format_value(val)]);
    }
    let table = Table::from(builder);
    println!("{}", table);
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(format_value).collect();
            items.join(", ")
        }
        Value::Object(map) => {
            // A defined DSCR serialises as a one-variant object; show the number.
            if map.len() == 1 {
                if let Some(inner) = map.get("Ratio") {
                    return format_value(inner);
                }
            }
            serde_json::to_string(value).unwrap_or_default()
        }
    }
}
