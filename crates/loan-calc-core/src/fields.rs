//! Raw form-field handling for the 3-of-4 solvers.
//!
//! UI layers hand over the text of each field untouched; this module
//! normalizes decimal separators, parses, and works out which field is
//! the unknown. Empty or whitespace-only text counts as an absent field.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::LoanCalcError;
use crate::types::{Money, Rate};
use crate::LoanCalcResult;

const PERCENT: Decimal = dec!(100);

/// The four loan form fields, as entered. The rate is in percent per
/// month, matching the form label.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoanFields {
    pub principal: Option<String>,
    pub monthly_rate_pct: Option<String>,
    pub term_months: Option<String>,
    pub payment: Option<String>,
}

/// The four growth form fields, as entered. The rate is in percent per
/// period.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GrowthFields {
    pub present_value: Option<String>,
    pub future_value: Option<String>,
    pub rate_pct: Option<String>,
    pub periods: Option<String>,
}

/// Identifies a loan field, used to tag which one was solved for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanField {
    Principal,
    MonthlyRate,
    TermMonths,
    Payment,
}

/// Identifies a growth field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrowthField {
    PresentValue,
    FutureValue,
    Rate,
    Periods,
}

/// Loan fields after parsing; `None` marks the unknown.
#[derive(Debug, Clone)]
pub struct ParsedLoanFields {
    pub principal: Option<Money>,
    /// Fraction per month (0.015 = 1.5%).
    pub monthly_rate: Option<Rate>,
    pub term_months: Option<u32>,
    pub payment: Option<Money>,
}

/// Growth fields after parsing; `None` marks the unknown.
#[derive(Debug, Clone)]
pub struct ParsedGrowthFields {
    pub present_value: Option<Money>,
    /// Fraction per period.
    pub rate: Option<Rate>,
    pub periods: Option<u32>,
    pub future_value: Option<Money>,
}

impl LoanFields {
    pub fn supplied_count(&self) -> usize {
        [
            &self.principal,
            &self.monthly_rate_pct,
            &self.term_months,
            &self.payment,
        ]
        .iter()
        .filter(|f| is_supplied(f))
        .count()
    }

    /// Parse every supplied field. Does not enforce the 3-of-4 count;
    /// the solver dispatch does.
    pub fn parse(&self) -> LoanCalcResult<ParsedLoanFields> {
        Ok(ParsedLoanFields {
            principal: parse_opt_money("principal", &self.principal)?,
            monthly_rate: parse_opt_rate_pct("monthly_rate_pct", &self.monthly_rate_pct)?,
            term_months: parse_opt_count("term_months", &self.term_months)?,
            payment: parse_opt_money("payment", &self.payment)?,
        })
    }
}

impl GrowthFields {
    pub fn supplied_count(&self) -> usize {
        [
            &self.present_value,
            &self.future_value,
            &self.rate_pct,
            &self.periods,
        ]
        .iter()
        .filter(|f| is_supplied(f))
        .count()
    }

    pub fn parse(&self) -> LoanCalcResult<ParsedGrowthFields> {
        Ok(ParsedGrowthFields {
            present_value: parse_opt_money("present_value", &self.present_value)?,
            rate: parse_opt_rate_pct("rate_pct", &self.rate_pct)?,
            periods: parse_opt_count("periods", &self.periods)?,
            future_value: parse_opt_money("future_value", &self.future_value)?,
        })
    }
}

fn is_supplied(field: &Option<String>) -> bool {
    matches!(field, Some(text) if !text.trim().is_empty())
}

/// Decimal comma and decimal point are interchangeable on the forms.
fn normalize(text: &str) -> String {
    text.trim().replace(',', ".")
}

/// Parse a monetary or plain decimal value.
pub fn parse_decimal(field: &'static str, text: &str) -> LoanCalcResult<Decimal> {
    normalize(text)
        .parse::<Decimal>()
        .map_err(|_| LoanCalcError::Parse {
            field,
            value: text.to_string(),
        })
}

/// Parse a rate entered in percent, returning the fraction.
pub fn parse_rate_pct(field: &'static str, text: &str) -> LoanCalcResult<Rate> {
    Ok(parse_decimal(field, text)? / PERCENT)
}

/// Parse a whole number of months/periods.
pub fn parse_count(field: &'static str, text: &str) -> LoanCalcResult<u32> {
    text.trim()
        .parse::<u32>()
        .map_err(|_| LoanCalcError::Parse {
            field,
            value: text.to_string(),
        })
}

fn parse_opt_money(field: &'static str, text: &Option<String>) -> LoanCalcResult<Option<Money>> {
    match text {
        Some(t) if !t.trim().is_empty() => Ok(Some(parse_decimal(field, t)?)),
        _ => Ok(None),
    }
}

fn parse_opt_rate_pct(field: &'static str, text: &Option<String>) -> LoanCalcResult<Option<Rate>> {
    match text {
        Some(t) if !t.trim().is_empty() => Ok(Some(parse_rate_pct(field, t)?)),
        _ => Ok(None),
    }
}

fn parse_opt_count(field: &'static str, text: &Option<String>) -> LoanCalcResult<Option<u32>> {
    match text {
        Some(t) if !t.trim().is_empty() => Ok(Some(parse_count(field, t)?)),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(text: &str) -> Option<String> {
        Some(text.to_string())
    }

    #[test]
    fn test_comma_and_point_equivalent() {
        let comma = parse_decimal("principal", "1234,56").unwrap();
        let point = parse_decimal("principal", "1234.56").unwrap();
        assert_eq!(comma, point);
        assert_eq!(comma, dec!(1234.56));
    }

    #[test]
    fn test_rate_pct_converts_to_fraction() {
        assert_eq!(parse_rate_pct("rate_pct", "1,5").unwrap(), dec!(0.015));
        assert_eq!(parse_rate_pct("rate_pct", "100").unwrap(), dec!(1));
    }

    #[test]
    fn test_garbage_text_is_parse_error() {
        let err = parse_decimal("payment", "abc").unwrap_err();
        match err {
            LoanCalcError::Parse { field, value } => {
                assert_eq!(field, "payment");
                assert_eq!(value, "abc");
            }
            other => panic!("Expected Parse, got {:?}", other),
        }
    }

    #[test]
    fn test_count_rejects_decimals() {
        assert!(parse_count("term_months", "12").is_ok());
        assert!(parse_count("term_months", "12.5").is_err());
        assert!(parse_count("term_months", "-3").is_err());
    }

    #[test]
    fn test_blank_fields_are_absent() {
        let fields = LoanFields {
            principal: field("2000"),
            monthly_rate_pct: field("   "),
            term_months: field("12"),
            payment: None,
        };
        assert_eq!(fields.supplied_count(), 2);

        let parsed = fields.parse().unwrap();
        assert!(parsed.monthly_rate.is_none());
        assert!(parsed.payment.is_none());
        assert_eq!(parsed.principal, Some(dec!(2000)));
    }

    #[test]
    fn test_growth_fields_parse() {
        let fields = GrowthFields {
            present_value: field("1000,00"),
            future_value: field("1500"),
            rate_pct: field("2"),
            periods: None,
        };
        assert_eq!(fields.supplied_count(), 3);

        let parsed = fields.parse().unwrap();
        assert_eq!(parsed.present_value, Some(dec!(1000.00)));
        assert_eq!(parsed.rate, Some(dec!(0.02)));
        assert!(parsed.periods.is_none());
    }
}
