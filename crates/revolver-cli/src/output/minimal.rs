use serde_json::Value;

/// Print just the headline figures from the output.
///
/// The full analysis prints one line per scenario from its summary; a
/// bare scenario map prints each all-in rate; a sweep trajectory prints
/// the ending balance. Everything else falls back to the first field.
pub fn print_minimal(value: &Value) {
    match value {
        Value::Object(map) => {
            if let Some(Value::Array(summaries)) = map.get("summaries") {
                print_summaries(summaries);
                return;
            }
            if is_scenario_map(map) {
                for (label, table) in map {
                    let rate = table
                        .get("all_in_rate")
                        .map(format_minimal)
                        .unwrap_or_default();
                    println!("{}: all-in rate {}", label, rate);
                }
                return;
            }
            if let Some((key, val)) = map.iter().next() {
                println!("{}: {}", key, format_minimal(val));
            }
        }
        Value::Array(arr) => {
            // A sweep trajectory: the ending balance is the headline.
            match arr.last().and_then(|p| p.get("revolver_balance")) {
                Some(balance) => println!("ending balance: {}", format_minimal(balance)),
                None => println!("(empty)"),
            }
        }
        _ => println!("{}", format_minimal(value)),
    }
}

/// True when every value is a scenario table (an object carrying rows).
fn is_scenario_map(map: &serde_json::Map<String, Value>) -> bool {
    !map.is_empty()
        && map
            .values()
            .all(|v| v.as_object().map_or(false, |t| t.contains_key("rows")))
}

fn print_summaries(summaries: &[Value]) {
    for s in summaries {
        let label = s.get("label").map(format_minimal).unwrap_or_default();
        let total = s.get("total_cost").map(format_minimal).unwrap_or_default();
        let breach = s
            .get("any_covenant_breach")
            .and_then(Value::as_bool)
            .unwrap_or(false);
        let status = if breach {
            "covenant breach"
        } else {
            "covenants pass"
        };
        println!("{}: total cost {} ({})", label, total, status);
    }
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
