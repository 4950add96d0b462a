pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Column order of the original simulator table, shared by the table and
/// CSV writers: installment, due date, payment, amortization, interest,
/// balance.
pub(crate) fn schedule_row_cells(row: &Value) -> [String; 6] {
    [
        cell(row, "index"),
        cell(row, "due_date"),
        cell(row, "payment"),
        cell(row, "principal_portion"),
        cell(row, "interest"),
        cell(row, "remaining_balance"),
    ]
}

/// The synthetic trailing "Totals" row, built from the totals the
/// schedule command attached next to the envelope.
pub(crate) fn schedule_totals_cells(totals: &Value) -> [String; 6] {
    [
        "Totals".to_string(),
        String::new(),
        cell(totals, "total_payment"),
        cell(totals, "total_principal"),
        cell(totals, "total_interest"),
        String::new(),
    ]
}

fn cell(obj: &Value, key: &str) -> String {
    match obj.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}
