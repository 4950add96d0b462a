use loan_calc_core::fields::{GrowthField, GrowthFields};
use loan_calc_core::growth::{
    future_value, periods_from_rate_and_values, present_value, rate_from_values_and_periods,
    solve_growth,
};
use loan_calc_core::{GrowthMode, LoanCalcError};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Compound growth solver tests
// ===========================================================================

fn field(text: &str) -> Option<String> {
    Some(text.to_string())
}

fn assert_close(actual: Decimal, expected: Decimal, tol: Decimal, msg: &str) {
    assert!(
        (actual - expected).abs() < tol,
        "{msg}: expected ~{expected}, got {actual}"
    );
}

#[test]
fn test_future_and_present_value_invert() {
    let fv = future_value(dec!(5000), dec!(0.008), 24).unwrap();
    // 5000 * 1.008^24 ~ 6053.73
    assert_close(fv, dec!(6053.73), dec!(0.01), "future value");

    let pv = present_value(fv, dec!(0.008), 24, GrowthMode::Standard).unwrap();
    assert_close(pv, dec!(5000), dec!(0.01), "present value round trip");
}

#[test]
fn test_periods_takes_the_ceiling() {
    // Doubling at 2%: ln(2)/ln(1.02) ~ 35.003 -> 36 whole periods.
    let periods = periods_from_rate_and_values(dec!(1000), dec!(2000), dec!(0.02)).unwrap();
    assert_eq!(periods, 36);

    // Tripling at 5%: ln(3)/ln(1.05) ~ 22.52 -> 23 whole periods.
    let periods = periods_from_rate_and_values(dec!(1000), dec!(3000), dec!(0.05)).unwrap();
    assert_eq!(periods, 23);
}

#[test]
fn test_rate_inverts_future_value() {
    let fv = future_value(dec!(1200), dec!(0.03), 18).unwrap();
    let rate = rate_from_values_and_periods(dec!(1200), fv, 18).unwrap();
    assert_close(rate, dec!(0.03), dec!(0.0001), "implied rate");
}

#[test]
fn test_uniform_series_mode_is_caller_selected() {
    // Identical fields, different modes, different present values.
    let fields = GrowthFields {
        present_value: None,
        future_value: field("1218.99"),
        rate_pct: field("2"),
        periods: field("10"),
    };

    let standard = solve_growth(&fields, GrowthMode::Standard).unwrap();
    let uniform = solve_growth(&fields, GrowthMode::UniformSeries).unwrap();

    assert_eq!(standard.result.unknown, GrowthField::PresentValue);
    // Standard: 1218.99 / 1.02^10 ~ 1000
    assert_close(standard.result.value, dec!(1000), dec!(0.01), "standard pv");
    // Uniform series: 1218.99 / (1.02^10 - 1) ~ 5566.31
    assert_close(uniform.result.value, dec!(5566.31), dec!(0.05), "uniform pv");
}

#[test]
fn test_non_positive_log_operands_rejected() {
    // Zero rate makes ln(1+rate) zero.
    let err = periods_from_rate_and_values(dec!(1000), dec!(2000), Decimal::ZERO).unwrap_err();
    assert!(matches!(err, LoanCalcError::Domain { .. }));

    // A target below the present value can never be reached by growth.
    let err = periods_from_rate_and_values(dec!(2000), dec!(1000), dec!(0.02)).unwrap_err();
    assert!(matches!(err, LoanCalcError::Domain { .. }));
}

#[test]
fn test_solve_growth_field_count() {
    let two = GrowthFields {
        present_value: field("1000"),
        future_value: None,
        rate_pct: field("2"),
        periods: None,
    };
    let err = solve_growth(&two, GrowthMode::Standard).unwrap_err();
    match err {
        LoanCalcError::InputCount { supplied } => assert_eq!(supplied, 2),
        other => panic!("Expected InputCount, got {:?}", other),
    }
}

#[test]
fn test_solve_growth_comma_decimals() {
    let fields = GrowthFields {
        present_value: field("1000,00"),
        future_value: None,
        rate_pct: field("0,8"),
        periods: field("24"),
    };
    let out = solve_growth(&fields, GrowthMode::Standard).unwrap();
    assert_eq!(out.result.unknown, GrowthField::FutureValue);
    // 1000 * 1.008^24 ~ 1210.75
    assert_close(out.result.value, dec!(1210.75), dec!(0.01), "future value");
}
