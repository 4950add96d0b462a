use clap::Args;
use serde_json::Value;

use loan_calc_core::annuity;
use loan_calc_core::fields::LoanFields;

/// Arguments for the 3-of-4 annuity solver.
///
/// Leave exactly one flag out; that field is solved for. Values are raw
/// form text, so decimal commas are accepted.
#[derive(Args)]
pub struct SolveArgs {
    /// Financed amount
    #[arg(long)]
    pub principal: Option<String>,

    /// Monthly interest rate in percent (e.g. "1.5" or "1,5")
    #[arg(long = "rate")]
    pub monthly_rate_pct: Option<String>,

    /// Term in months
    #[arg(long = "term")]
    pub term_months: Option<String>,

    /// Installment amount
    #[arg(long)]
    pub payment: Option<String>,
}

pub fn run_solve(args: SolveArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let fields = LoanFields {
        principal: args.principal,
        monthly_rate_pct: args.monthly_rate_pct,
        term_months: args.term_months,
        payment: args.payment,
    };

    let result = annuity::solve_annuity(&fields)?;
    Ok(serde_json::to_value(result)?)
}
