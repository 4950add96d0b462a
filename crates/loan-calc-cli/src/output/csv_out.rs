use serde_json::Value;
use std::io;

use super::{schedule_row_cells, schedule_totals_cells};

/// Write output as CSV to stdout.
///
/// Schedules use the layout of the original export: a parameter header
/// block, a blank line, the installment table, a blank line, then the
/// Totals record. Record lengths vary, so the writer runs flexible.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(stdout.lock());

    if let Some(rows) = value.pointer("/result/rows").and_then(Value::as_array) {
        write_schedule_csv(&mut wtr, value, rows);
    } else if let Some(Value::Object(result)) = value.as_object().and_then(|m| m.get("result")) {
        let _ = wtr.write_record(["field", "value"]);
        for (key, val) in result {
            let _ = wtr.write_record([key.as_str(), &format_csv_value(val)]);
        }
    } else if let Value::Object(map) = value {
        let _ = wtr.write_record(["field", "value"]);
        for (key, val) in map {
            let _ = wtr.write_record([key.as_str(), &format_csv_value(val)]);
        }
    } else {
        let _ = wtr.write_record([&format_csv_value(value)]);
    }

    let _ = wtr.flush();
}

fn write_schedule_csv(wtr: &mut csv::Writer<io::StdoutLock<'_>>, envelope: &Value, rows: &[Value]) {
    if let Some(Value::Object(params)) = envelope.pointer("/result/input") {
        for (key, val) in params {
            let _ = wtr.write_record([key.as_str(), &format_csv_value(val)]);
        }
        let _ = wtr.write_record([""]);
    }

    let _ = wtr.write_record([
        "installment",
        "due_date",
        "payment",
        "amortization",
        "interest",
        "balance",
    ]);
    for row in rows {
        let _ = wtr.write_record(schedule_row_cells(row));
    }

    if let Some(totals) = envelope.get("totals") {
        let _ = wtr.write_record([""]);
        let _ = wtr.write_record(schedule_totals_cells(totals));
    }
}

fn format_csv_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
