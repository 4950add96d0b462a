use clap::{Args, ValueEnum};
use serde_json::Value;

use loan_calc_core::fields::GrowthFields;
use loan_calc_core::growth;
use loan_calc_core::GrowthMode;

/// Arguments for the 3-of-4 compound-growth solver.
#[derive(Args)]
pub struct GrowthArgs {
    /// Present value
    #[arg(long)]
    pub present_value: Option<String>,

    /// Future value
    #[arg(long)]
    pub future_value: Option<String>,

    /// Per-period interest rate in percent
    #[arg(long = "rate")]
    pub rate_pct: Option<String>,

    /// Number of periods
    #[arg(long)]
    pub periods: Option<String>,

    /// Present-value formula: standard divides by (1+rate)^periods,
    /// uniform-series by (1+rate)^periods - 1
    #[arg(long, value_enum, default_value = "standard")]
    pub mode: GrowthModeArg,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum GrowthModeArg {
    Standard,
    UniformSeries,
}

impl From<GrowthModeArg> for GrowthMode {
    fn from(mode: GrowthModeArg) -> Self {
        match mode {
            GrowthModeArg::Standard => GrowthMode::Standard,
            GrowthModeArg::UniformSeries => GrowthMode::UniformSeries,
        }
    }
}

pub fn run_growth(args: GrowthArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let fields = GrowthFields {
        present_value: args.present_value,
        future_value: args.future_value,
        rate_pct: args.rate_pct,
        periods: args.periods,
    };

    let result = growth::solve_growth(&fields, args.mode.into())?;
    Ok(serde_json::to_value(result)?)
}
