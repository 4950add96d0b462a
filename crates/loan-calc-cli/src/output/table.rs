use serde_json::Value;
use tabled::{builder::Builder, Table};

use super::{schedule_row_cells, schedule_totals_cells};

/// Format output as a table using the tabled crate.
pub fn print_table(value: &Value) {
    if let Some(rows) = value.pointer("/result/rows").and_then(Value::as_array) {
        print_schedule_table(value, rows);
        return;
    }

    match value {
        Value::Object(map) => {
            if let Some(result) = map.get("result") {
                print_result_table(result, map);
            } else {
                print_flat_object(value);
            }
        }
        _ => {
            println!("{}", value);
        }
    }
}

/// Schedule envelopes render as a parameter block, the installment rows,
/// and the appended synthetic Totals row.
fn print_schedule_table(envelope: &Value, rows: &[Value]) {
    if let Some(Value::Object(params)) = envelope.pointer("/result/input") {
        let mut builder = Builder::default();
        builder.push_record(["Parameter", "Value"]);
        for (key, val) in params {
            builder.push_record([key.as_str(), &format_value(val)]);
        }
        println!("{}", Table::from(builder));
        println!();
    }

    let mut builder = Builder::default();
    builder.push_record([
        "#",
        "Due date",
        "Payment",
        "Amortization",
        "Interest",
        "Balance",
    ]);
    for row in rows {
        builder.push_record(schedule_row_cells(row));
    }
    if let Some(totals) = envelope.get("totals") {
        builder.push_record(schedule_totals_cells(totals));
    }
    println!("{}", Table::from(builder));

    print_envelope_trailer(envelope);
}

fn print_result_table(result: &Value, envelope: &serde_json::Map<String, Value>) {
    if let Value::Object(res_map) = result {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for (key, val) in res_map {
            builder.push_record([key.as_str(), &format_value(val)]);
        }
        println!("{}", Table::from(builder));
    } else {
        print_flat_object(&Value::Object(envelope.clone()));
    }

    print_envelope_trailer(&Value::Object(envelope.clone()));
}

fn print_envelope_trailer(envelope: &Value) {
    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn print_flat_object(value: &Value) {
    if let Value::Object(map) = value {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for (key, val) in map {
            builder.push_record([key.as_str(), &format_value(val)]);
        }
        println!("{}", Table::from(builder));
    }
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
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
