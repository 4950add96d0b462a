//! Compound growth solver.
//!
//! The 3-of-4 pattern over {present value, future value, rate, periods}
//! with the relation `future = present * (1+rate)^periods`. Solving for
//! the periods takes the ceiling of the logarithm ratio, so the result is
//! the first whole period at which the target is reached or passed.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::LoanCalcError;
use crate::fields::{GrowthField, GrowthFields};
use crate::types::{with_metadata, ComputationOutput, GrowthMode, Money, Rate};
use crate::LoanCalcResult;

const PERCENT: Decimal = dec!(100);

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// Result of a 3-of-4 growth query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrowthSolution {
    pub unknown: GrowthField,
    /// The solved value. A rate is a fraction per period; periods are whole.
    pub value: Decimal,
    /// Percent rendering of a solved rate, for display layers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate_pct: Option<Decimal>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// `present * (1+rate)^periods`.
pub fn future_value(present: Money, rate: Rate, periods: u32) -> LoanCalcResult<Money> {
    validate_positive("present_value", present)?;
    validate_rate_above_minus_one(rate)?;

    let factor = growth_factor(rate, periods)?;
    present
        .checked_mul(factor)
        .ok_or_else(|| LoanCalcError::domain("future_value", "result overflows decimal range"))
}

/// Present value of a future amount.
///
/// `GrowthMode::Standard` divides by `(1+rate)^periods`;
/// `GrowthMode::UniformSeries` divides by `(1+rate)^periods - 1`, the
/// uniform-series form. The mode is always chosen by the caller.
pub fn present_value(
    future: Money,
    rate: Rate,
    periods: u32,
    mode: GrowthMode,
) -> LoanCalcResult<Money> {
    validate_positive("future_value", future)?;
    validate_rate_above_minus_one(rate)?;

    let divisor = match mode {
        GrowthMode::Standard => growth_factor(rate, periods)?,
        GrowthMode::UniformSeries => growth_factor(rate, periods)? - Decimal::ONE,
    };
    if divisor.is_zero() {
        return Err(LoanCalcError::domain(
            "rate",
            "growth divisor is zero; the uniform-series form needs a non-zero rate and at least one period",
        ));
    }

    Ok(future / divisor)
}

/// Whole periods needed for `present` to grow to `future`:
/// `ceil(ln(future/present) / ln(1+rate))`.
pub fn periods_from_rate_and_values(
    present: Money,
    future: Money,
    rate: Rate,
) -> LoanCalcResult<u32> {
    validate_positive("present_value", present)?;
    validate_positive("future_value", future)?;
    if rate <= Decimal::ZERO {
        return Err(LoanCalcError::domain(
            "rate",
            "must be positive to solve for periods",
        ));
    }
    if future < present {
        return Err(LoanCalcError::domain(
            "future_value",
            "must be at least the present value; positive growth never shrinks",
        ));
    }

    let ratio = future / present;
    let periods = (ratio.ln() / (Decimal::ONE + rate).ln()).ceil();
    periods
        .to_u32()
        .ok_or_else(|| LoanCalcError::domain("periods", "result does not fit a whole period count"))
}

/// Per-period rate implied by the values and term: `(future/present)^(1/periods) - 1`.
pub fn rate_from_values_and_periods(
    present: Money,
    future: Money,
    periods: u32,
) -> LoanCalcResult<Rate> {
    validate_positive("present_value", present)?;
    validate_positive("future_value", future)?;
    if periods == 0 {
        return Err(LoanCalcError::domain("periods", "must be at least 1"));
    }

    let ratio = future / present;
    Ok(ratio.powd(Decimal::ONE / Decimal::from(periods)) - Decimal::ONE)
}

/// Solve a 3-of-4 growth query from raw form fields.
pub fn solve_growth(
    fields: &GrowthFields,
    mode: GrowthMode,
) -> LoanCalcResult<ComputationOutput<GrowthSolution>> {
    let start = Instant::now();

    let supplied = fields.supplied_count();
    if supplied != 3 {
        return Err(LoanCalcError::InputCount { supplied });
    }

    let parsed = fields.parse()?;

    let solution = match (
        parsed.present_value,
        parsed.future_value,
        parsed.rate,
        parsed.periods,
    ) {
        (Some(present), None, Some(rate), Some(periods)) => GrowthSolution {
            unknown: GrowthField::FutureValue,
            value: future_value(present, rate, periods)?,
            rate_pct: None,
        },
        (None, Some(future), Some(rate), Some(periods)) => GrowthSolution {
            unknown: GrowthField::PresentValue,
            value: present_value(future, rate, periods, mode)?,
            rate_pct: None,
        },
        (Some(present), Some(future), None, Some(periods)) => {
            let rate = rate_from_values_and_periods(present, future, periods)?;
            GrowthSolution {
                unknown: GrowthField::Rate,
                value: rate,
                rate_pct: Some(rate * PERCENT),
            }
        }
        (Some(present), Some(future), Some(rate), None) => GrowthSolution {
            unknown: GrowthField::Periods,
            value: Decimal::from(periods_from_rate_and_values(present, future, rate)?),
            rate_pct: None,
        },
        _ => return Err(LoanCalcError::InputCount { supplied }),
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Compound growth solver (3-of-4)",
        &serde_json::json!({
            "unknown": solution.unknown,
            "mode": mode,
            "relation": "future = present * (1+rate)^periods",
        }),
        Vec::new(),
        elapsed,
        solution,
    ))
}

// ---------------------------------------------------------------------------
// Validation and helpers
// ---------------------------------------------------------------------------

fn validate_positive(field: &'static str, value: Decimal) -> LoanCalcResult<()> {
    if value <= Decimal::ZERO {
        return Err(LoanCalcError::domain(field, "must be positive"));
    }
    Ok(())
}

fn validate_rate_above_minus_one(rate: Rate) -> LoanCalcResult<()> {
    if rate <= dec!(-1) {
        return Err(LoanCalcError::domain(
            "rate",
            "must be greater than -100%",
        ));
    }
    Ok(())
}

/// `(1+rate)^periods` by iterated multiplication; overflow surfaces as a
/// domain error instead of a panic.
fn growth_factor(rate: Rate, periods: u32) -> LoanCalcResult<Decimal> {
    let base = Decimal::ONE + rate;
    let mut factor = Decimal::ONE;
    for _ in 0..periods {
        factor = factor.checked_mul(base).ok_or_else(|| {
            LoanCalcError::domain("rate", "compound factor overflows decimal range")
        })?;
    }
    Ok(factor)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
