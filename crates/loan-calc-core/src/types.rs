use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.015 = 1.5% per month). Never as percentages.
pub type Rate = Decimal;

/// Amortization system for installment schedules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AmortizationSystem {
    /// Fixed installment (French/Price table); interest portion decreases.
    Price,
    /// Constant amortization; total payment decreases.
    Sac,
}

/// Present-value formula selection for the compound growth solver.
///
/// `UniformSeries` divides by `(1+rate)^periods - 1` instead of
/// `(1+rate)^periods` when solving for the present value. It is only
/// consulted when the present value is the unknown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrowthMode {
    #[default]
    Standard,
    UniformSeries,
}

/// One installment of an amortization schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationRow {
    /// 1-based installment number.
    pub index: u32,
    pub due_date: NaiveDate,
    pub payment: Money,
    pub interest: Money,
    pub principal_portion: Money,
    /// Balance after this installment, clamped at zero.
    pub remaining_balance: Money,
}

/// Input for schedule generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleInput {
    pub principal: Money,
    /// Monthly rate in percent (1.5 = 1.5%), converted internally.
    pub monthly_rate_pct: Decimal,
    pub term_months: u32,
    pub system: AmortizationSystem,
    pub first_due_date: NaiveDate,
}

/// A complete amortization schedule with its originating parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    pub input: ScheduleInput,
    pub rows: Vec<AmortizationRow>,
}

/// Column sums over a schedule. The trailing "Totals" row shown by
/// display/export layers is built from this; it is not a schedule row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleTotals {
    pub total_payment: Money,
    pub total_principal: Money,
    pub total_interest: Money,
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}
