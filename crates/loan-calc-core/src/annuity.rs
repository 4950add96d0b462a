//! Fixed-installment annuity solver.
//!
//! Given exactly three of {principal, monthly rate, term, payment}, computes
//! the fourth from the annuity relation
//! `payment = principal * rate / (1 - (1+rate)^-term)`. The payment and
//! principal directions are closed-form; the rate is found by bisection.
//! All math uses `rust_decimal::Decimal`.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::LoanCalcError;
use crate::fields::{LoanField, LoanFields};
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::LoanCalcResult;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Default bracket width at which the rate bisection stops.
pub const DEFAULT_RATE_PRECISION: Decimal = dec!(0.000001);

/// Upper bound of the rate search bracket (100% per month).
const RATE_SEARCH_HI: Decimal = Decimal::ONE;

/// Percent per fraction.
const PERCENT: Decimal = dec!(100);

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// Result of a 3-of-4 annuity query: which field was solved and its value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnuitySolution {
    pub unknown: LoanField,
    /// The solved value. A rate is a fraction per month.
    pub value: Decimal,
    /// Percent rendering of a solved rate, for display layers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate_pct: Option<Decimal>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Payment of a fixed-installment loan: `principal * rate / (1 - (1+rate)^-term)`.
pub fn payment_from_principal(
    principal: Money,
    monthly_rate: Rate,
    term_months: u32,
) -> LoanCalcResult<Money> {
    validate_positive("principal", principal)?;
    validate_rate_and_term(monthly_rate, term_months)?;

    Ok(principal * monthly_rate / annuity_factor(monthly_rate, term_months))
}

/// Principal implied by a fixed payment: `payment * (1 - (1+rate)^-term) / rate`.
pub fn principal_from_payment(
    payment: Money,
    monthly_rate: Rate,
    term_months: u32,
) -> LoanCalcResult<Money> {
    validate_positive("payment", payment)?;
    validate_rate_and_term(monthly_rate, term_months)?;

    Ok(payment * annuity_factor(monthly_rate, term_months) / monthly_rate)
}

/// Monthly rate implied by a payment, term and principal, to the default
/// precision of 1e-6.
pub fn rate_from_payment(
    payment: Money,
    term_months: u32,
    principal: Money,
) -> LoanCalcResult<Rate> {
    rate_from_payment_with_precision(payment, term_months, principal, DEFAULT_RATE_PRECISION)
}

/// Bisection search for the monthly rate over [0, 1].
///
/// The implied principal `payment * (1 - (1+rate)^-term) / rate` decreases
/// monotonically in the rate, so the loop keeps a bracket whose low end
/// implies a principal above the target and whose high end implies one
/// below it, halving until the bracket is narrower than `precision`.
/// Terminates in ceil(log2(1/precision)) iterations (about 20 at 1e-6).
pub fn rate_from_payment_with_precision(
    payment: Money,
    term_months: u32,
    principal: Money,
    precision: Decimal,
) -> LoanCalcResult<Rate> {
    validate_positive("payment", payment)?;
    validate_positive("principal", principal)?;
    if term_months == 0 {
        return Err(LoanCalcError::domain("term_months", "must be at least 1"));
    }
    if precision <= Decimal::ZERO {
        return Err(LoanCalcError::domain("precision", "must be positive"));
    }

    // At rate -> 0 the implied principal tends to payment * term; a target
    // at or above that has no positive-rate solution.
    if payment * Decimal::from(term_months) <= principal {
        return Err(LoanCalcError::domain(
            "payment",
            "payment * term must exceed the principal for a positive rate to exist",
        ));
    }

    let mut lo = Decimal::ZERO;
    let mut hi = RATE_SEARCH_HI;

    // The high end must already imply a principal below the target.
    if principal_from_payment(payment, hi, term_months)? >= principal {
        return Err(LoanCalcError::domain(
            "monthly_rate",
            "no solution at or below 100% per month",
        ));
    }

    while hi - lo > precision {
        let mid = (lo + hi) / dec!(2);
        let implied = principal_from_payment(payment, mid, term_months)?;
        if implied > principal {
            lo = mid;
        } else {
            hi = mid;
        }
    }

    Ok((lo + hi) / dec!(2))
}

/// Solve a 3-of-4 annuity query from raw form fields.
///
/// Exactly three fields must be supplied; the fourth is computed. Solving
/// for the term is not supported and is rejected as a domain error.
pub fn solve_annuity(fields: &LoanFields) -> LoanCalcResult<ComputationOutput<AnnuitySolution>> {
    let start = Instant::now();

    let supplied = fields.supplied_count();
    if supplied != 3 {
        return Err(LoanCalcError::InputCount { supplied });
    }

    let parsed = fields.parse()?;

    let solution = match (
        parsed.principal,
        parsed.monthly_rate,
        parsed.term_months,
        parsed.payment,
    ) {
        (Some(principal), Some(rate), Some(term), None) => AnnuitySolution {
            unknown: LoanField::Payment,
            value: payment_from_principal(principal, rate, term)?,
            rate_pct: None,
        },
        (None, Some(rate), Some(term), Some(payment)) => AnnuitySolution {
            unknown: LoanField::Principal,
            value: principal_from_payment(payment, rate, term)?,
            rate_pct: None,
        },
        (Some(principal), None, Some(term), Some(payment)) => {
            let rate = rate_from_payment(payment, term, principal)?;
            AnnuitySolution {
                unknown: LoanField::MonthlyRate,
                value: rate,
                rate_pct: Some(rate * PERCENT),
            }
        }
        (Some(_), Some(_), None, Some(_)) => {
            return Err(LoanCalcError::domain(
                "term_months",
                "solving for the term is not supported; supply term_months",
            ));
        }
        _ => return Err(LoanCalcError::InputCount { supplied }),
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Fixed-installment annuity solver (3-of-4)",
        &serde_json::json!({
            "unknown": solution.unknown,
            "relation": "payment = principal * rate / (1 - (1+rate)^-term)",
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

fn validate_rate_and_term(monthly_rate: Rate, term_months: u32) -> LoanCalcResult<()> {
    if monthly_rate <= Decimal::ZERO {
        return Err(LoanCalcError::domain(
            "monthly_rate",
            "must be positive; the annuity relation divides by the rate",
        ));
    }
    if term_months == 0 {
        return Err(LoanCalcError::domain("term_months", "must be at least 1"));
    }
    Ok(())
}

/// `1 - (1+rate)^-term`, the shared factor of both closed forms.
///
/// Computed by iterating the reciprocal of the compound base so that long
/// terms underflow towards zero instead of overflowing `Decimal`. Callers
/// have already rejected a zero rate, so the factor is strictly positive.
fn annuity_factor(monthly_rate: Rate, term_months: u32) -> Decimal {
    let recip_base = Decimal::ONE / (Decimal::ONE + monthly_rate);
    let mut recip = Decimal::ONE;
    for _ in 0..term_months {
        recip *= recip_base;
    }
    Decimal::ONE - recip
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn field(text: &str) -> Option<String> {
        Some(text.to_string())
    }

    fn assert_close(actual: Decimal, expected: Decimal, tol: Decimal) {
        assert!(
            (actual - expected).abs() < tol,
            "expected ~{}, got {}",
            expected,
            actual
        );
    }

    // -----------------------------------------------------------------------
    // 1. Payment formula against the reference scenario
    // -----------------------------------------------------------------------
    #[test]
    fn test_payment_reference_scenario() {
        // 2000.00 at 1.5%/month over 12 months: 30 / (1 - 1.015^-12) ~ 183.36
        let payment = payment_from_principal(dec!(2000), dec!(0.015), 12).unwrap();
        assert_close(payment, dec!(183.36), dec!(0.01));
    }

    // -----------------------------------------------------------------------
    // 2. Principal formula inverts the payment formula
    // -----------------------------------------------------------------------
    #[test]
    fn test_principal_round_trip() {
        let payment = payment_from_principal(dec!(35000), dec!(0.021), 48).unwrap();
        let principal = principal_from_payment(payment, dec!(0.021), 48).unwrap();
        assert_close(principal, dec!(35000), dec!(0.01));
    }

    // -----------------------------------------------------------------------
    // 3. Zero rate is a domain error
    // -----------------------------------------------------------------------
    #[test]
    fn test_zero_rate_rejected() {
        let err = payment_from_principal(dec!(1000), Decimal::ZERO, 12).unwrap_err();
        match err {
            LoanCalcError::Domain { field, .. } => assert_eq!(field, "monthly_rate"),
            other => panic!("Expected Domain, got {:?}", other),
        }
    }

    // -----------------------------------------------------------------------
    // 4. Zero term is a domain error
    // -----------------------------------------------------------------------
    #[test]
    fn test_zero_term_rejected() {
        let err = payment_from_principal(dec!(1000), dec!(0.01), 0).unwrap_err();
        match err {
            LoanCalcError::Domain { field, .. } => assert_eq!(field, "term_months"),
            other => panic!("Expected Domain, got {:?}", other),
        }
    }

    // -----------------------------------------------------------------------
    // 5. Bisection recovers a known rate
    // -----------------------------------------------------------------------
    #[test]
    fn test_rate_bisection_round_trip() {
        let payment = payment_from_principal(dec!(2000), dec!(0.015), 12).unwrap();
        let rate = rate_from_payment(payment, 12, dec!(2000)).unwrap();
        assert_close(rate, dec!(0.015), dec!(0.000001));
    }

    // -----------------------------------------------------------------------
    // 6. Unsolvable rate precondition
    // -----------------------------------------------------------------------
    #[test]
    fn test_rate_unsolvable_precondition() {
        // 12 payments of 100 cannot finance 2000 at any positive rate.
        let err = rate_from_payment(dec!(100), 12, dec!(2000)).unwrap_err();
        match err {
            LoanCalcError::Domain { field, .. } => assert_eq!(field, "payment"),
            other => panic!("Expected Domain, got {:?}", other),
        }
    }

    // -----------------------------------------------------------------------
    // 7. 3-of-4 dispatch: solve payment
    // -----------------------------------------------------------------------
    #[test]
    fn test_solve_annuity_payment() {
        let fields = LoanFields {
            principal: field("2000"),
            monthly_rate_pct: field("1,5"),
            term_months: field("12"),
            payment: None,
        };
        let out = solve_annuity(&fields).unwrap();
        assert_eq!(out.result.unknown, LoanField::Payment);
        assert_close(out.result.value, dec!(183.36), dec!(0.01));
        assert!(out.result.rate_pct.is_none());
    }

    // -----------------------------------------------------------------------
    // 8. 3-of-4 dispatch: solve rate carries the percent rendering
    // -----------------------------------------------------------------------
    #[test]
    fn test_solve_annuity_rate() {
        let fields = LoanFields {
            principal: field("2000"),
            monthly_rate_pct: None,
            term_months: field("12"),
            payment: field("183.36"),
        };
        let out = solve_annuity(&fields).unwrap();
        assert_eq!(out.result.unknown, LoanField::MonthlyRate);
        assert_close(out.result.value, dec!(0.015), dec!(0.0001));
        assert_close(out.result.rate_pct.unwrap(), dec!(1.5), dec!(0.01));
    }

    // -----------------------------------------------------------------------
    // 9. Wrong field counts
    // -----------------------------------------------------------------------
    #[test]
    fn test_solve_annuity_four_fields() {
        let fields = LoanFields {
            principal: field("2000"),
            monthly_rate_pct: field("1.5"),
            term_months: field("12"),
            payment: field("183.36"),
        };
        let err = solve_annuity(&fields).unwrap_err();
        match err {
            LoanCalcError::InputCount { supplied } => assert_eq!(supplied, 4),
            other => panic!("Expected InputCount, got {:?}", other),
        }
        assert!(err.to_string().contains("3 of 4"));
    }

    #[test]
    fn test_solve_annuity_two_fields() {
        let fields = LoanFields {
            principal: field("2000"),
            monthly_rate_pct: None,
            term_months: field("12"),
            payment: None,
        };
        let err = solve_annuity(&fields).unwrap_err();
        match err {
            LoanCalcError::InputCount { supplied } => assert_eq!(supplied, 2),
            other => panic!("Expected InputCount, got {:?}", other),
        }
    }

    // -----------------------------------------------------------------------
    // 10. Term as the unknown is rejected
    // -----------------------------------------------------------------------
    #[test]
    fn test_solve_annuity_term_unsupported() {
        let fields = LoanFields {
            principal: field("2000"),
            monthly_rate_pct: field("1.5"),
            term_months: None,
            payment: field("183.36"),
        };
        let err = solve_annuity(&fields).unwrap_err();
        match err {
            LoanCalcError::Domain { field, .. } => assert_eq!(field, "term_months"),
            other => panic!("Expected Domain, got {:?}", other),
        }
    }

    // -----------------------------------------------------------------------
    // 11. Envelope metadata
    // -----------------------------------------------------------------------
    #[test]
    fn test_solve_annuity_metadata() {
        let fields = LoanFields {
            principal: field("2000"),
            monthly_rate_pct: field("1.5"),
            term_months: field("12"),
            payment: None,
        };
        let out = solve_annuity(&fields).unwrap();
        assert!(out.methodology.contains("annuity"));
        assert_eq!(out.metadata.precision, "rust_decimal_128bit");
    }
}
