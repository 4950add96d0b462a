//! Amortization schedule generation for Price and SAC systems.
//!
//! A single forward loop over the installments. Price fixes the payment
//! via the annuity formula and lets the amortization grow; SAC fixes the
//! amortization at principal/term and lets the payment shrink. Due dates
//! advance in fixed 30-day steps from the first due date, matching the
//! behaviour the simulator has always had; this is not calendar-month
//! arithmetic.

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use std::time::Instant;

use crate::annuity;
use crate::error::LoanCalcError;
use crate::types::{
    with_metadata, AmortizationRow, AmortizationSchedule, AmortizationSystem, ComputationOutput,
    ScheduleInput, ScheduleTotals,
};
use crate::LoanCalcResult;

const PERCENT: Decimal = Decimal::ONE_HUNDRED;

/// Days between consecutive due dates.
const DUE_DATE_STEP_DAYS: i64 = 30;

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Generate the full amortization schedule for a loan.
///
/// The rate arrives in percent per month (as entered on the form) and is
/// converted to a fraction here. The schedule is immutable once produced;
/// display and export layers only read it.
pub fn generate_schedule(
    input: &ScheduleInput,
) -> LoanCalcResult<ComputationOutput<AmortizationSchedule>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_schedule_input(input)?;

    let rate = input.monthly_rate_pct / PERCENT;
    if rate.is_zero() && input.system == AmortizationSystem::Sac {
        warnings.push("Zero rate: the schedule carries no interest".to_string());
    }

    let rows = match input.system {
        AmortizationSystem::Price => price_rows(input, rate)?,
        AmortizationSystem::Sac => sac_rows(input, rate)?,
    };

    let schedule = AmortizationSchedule {
        input: input.clone(),
        rows,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        methodology(input.system),
        &serde_json::json!({
            "principal": input.principal.to_string(),
            "monthly_rate_pct": input.monthly_rate_pct.to_string(),
            "term_months": input.term_months,
            "system": input.system,
            "first_due_date": input.first_due_date,
            "due_date_step_days": DUE_DATE_STEP_DAYS,
        }),
        warnings,
        elapsed,
        schedule,
    ))
}

/// Column sums over a schedule, for the synthetic trailing "Totals" row
/// that display and export layers append.
pub fn schedule_totals(schedule: &AmortizationSchedule) -> ScheduleTotals {
    let mut totals = ScheduleTotals {
        total_payment: Decimal::ZERO,
        total_principal: Decimal::ZERO,
        total_interest: Decimal::ZERO,
    };
    for row in &schedule.rows {
        totals.total_payment += row.payment;
        totals.total_principal += row.principal_portion;
        totals.total_interest += row.interest;
    }
    totals
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_schedule_input(input: &ScheduleInput) -> LoanCalcResult<()> {
    if input.principal <= Decimal::ZERO {
        return Err(LoanCalcError::domain("principal", "must be positive"));
    }
    if input.term_months == 0 {
        return Err(LoanCalcError::domain("term_months", "must be at least 1"));
    }
    if input.monthly_rate_pct < Decimal::ZERO {
        return Err(LoanCalcError::domain(
            "monthly_rate_pct",
            "must not be negative",
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn methodology(system: AmortizationSystem) -> &'static str {
    match system {
        AmortizationSystem::Price => "Price amortization table (fixed installment)",
        AmortizationSystem::Sac => "SAC amortization table (constant amortization)",
    }
}

fn price_rows(input: &ScheduleInput, rate: Decimal) -> LoanCalcResult<Vec<AmortizationRow>> {
    let payment = annuity::payment_from_principal(input.principal, rate, input.term_months)?;

    let mut rows = Vec::with_capacity(input.term_months as usize);
    let mut balance = input.principal;

    for index in 1..=input.term_months {
        let interest = balance * rate;
        let principal_portion = payment - interest;
        balance = (balance - principal_portion).max(Decimal::ZERO);

        rows.push(AmortizationRow {
            index,
            due_date: due_date(input.first_due_date, index)?,
            payment,
            interest,
            principal_portion,
            remaining_balance: balance,
        });
    }

    Ok(rows)
}

fn sac_rows(input: &ScheduleInput, rate: Decimal) -> LoanCalcResult<Vec<AmortizationRow>> {
    let principal_portion = input.principal / Decimal::from(input.term_months);

    let mut rows = Vec::with_capacity(input.term_months as usize);
    let mut balance = input.principal;

    for index in 1..=input.term_months {
        let interest = balance * rate;
        let payment = principal_portion + interest;
        balance = (balance - principal_portion).max(Decimal::ZERO);

        rows.push(AmortizationRow {
            index,
            due_date: due_date(input.first_due_date, index)?,
            payment,
            interest,
            principal_portion,
            remaining_balance: balance,
        });
    }

    Ok(rows)
}

fn due_date(first: NaiveDate, index: u32) -> LoanCalcResult<NaiveDate> {
    first
        .checked_add_signed(Duration::days(DUE_DATE_STEP_DAYS * (i64::from(index) - 1)))
        .ok_or_else(|| {
            LoanCalcError::Date(format!(
                "due date overflow at installment {index} from {first}"
            ))
        })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
