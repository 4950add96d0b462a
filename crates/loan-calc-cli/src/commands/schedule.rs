use chrono::NaiveDate;
use clap::{Args, ValueEnum};
use serde_json::Value;

use loan_calc_core::fields;
use loan_calc_core::schedule;
use loan_calc_core::{AmortizationSystem, ScheduleInput};

use crate::input;

/// Arguments for amortization schedule generation.
#[derive(Args)]
pub struct ScheduleArgs {
    /// Path to a JSON or YAML file with the schedule parameters
    /// (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Financed amount
    #[arg(long)]
    pub principal: Option<String>,

    /// Monthly interest rate in percent (e.g. "1.5" or "1,5")
    #[arg(long = "rate")]
    pub monthly_rate_pct: Option<String>,

    /// Number of installments
    #[arg(long = "term")]
    pub term_months: Option<u32>,

    /// Amortization system
    #[arg(long, value_enum)]
    pub system: Option<SystemArg>,

    /// Date of the first installment (YYYY-MM-DD)
    #[arg(long)]
    pub first_due_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SystemArg {
    /// Fixed installments (Price table)
    Price,
    /// Constant amortization (SAC table)
    Sac,
}

impl From<SystemArg> for AmortizationSystem {
    fn from(system: SystemArg) -> Self {
        match system {
            SystemArg::Price => AmortizationSystem::Price,
            SystemArg::Sac => AmortizationSystem::Sac,
        }
    }
}

pub fn run_schedule(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let schedule_input: ScheduleInput = if let Some(ref path) = args.input {
        input::file::read_params(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        ScheduleInput {
            principal: fields::parse_decimal(
                "principal",
                args.principal
                    .as_deref()
                    .ok_or("--principal is required (or provide --input)")?,
            )?,
            monthly_rate_pct: fields::parse_decimal(
                "monthly_rate_pct",
                args.monthly_rate_pct
                    .as_deref()
                    .ok_or("--rate is required (or provide --input)")?,
            )?,
            term_months: args.term_months.ok_or("--term is required (or provide --input)")?,
            system: args
                .system
                .ok_or("--system is required (or provide --input)")?
                .into(),
            first_due_date: args
                .first_due_date
                .ok_or("--first-due-date is required (or provide --input)")?,
        }
    };

    let output = schedule::generate_schedule(&schedule_input)?;
    let totals = schedule::schedule_totals(&output.result);

    // The synthetic trailing "Totals" row belongs to the display/export
    // layer; ship the sums alongside the envelope for it to use.
    let mut value = serde_json::to_value(output)?;
    if let Value::Object(ref mut map) = value {
        map.insert("totals".to_string(), serde_json::to_value(totals)?);
    }
    Ok(value)
}
