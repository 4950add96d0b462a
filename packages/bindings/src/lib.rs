use napi::Result as NapiResult;
use napi_derive::napi;

use loan_calc_core::GrowthMode;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// 3-of-4 solvers
// ---------------------------------------------------------------------------

#[napi]
pub fn solve_annuity(input_json: String) -> NapiResult<String> {
    let fields: loan_calc_core::fields::LoanFields =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = loan_calc_core::annuity::solve_annuity(&fields).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn solve_growth(input_json: String, mode: String) -> NapiResult<String> {
    let mode = match mode.as_str() {
        "standard" => GrowthMode::Standard,
        "uniform_series" => GrowthMode::UniformSeries,
        other => {
            return Err(napi::Error::from_reason(format!(
                "Unknown growth mode '{other}'; use 'standard' or 'uniform_series'"
            )))
        }
    };

    let fields: loan_calc_core::fields::GrowthFields =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = loan_calc_core::growth::solve_growth(&fields, mode).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Amortization schedules
// ---------------------------------------------------------------------------

#[napi]
pub fn generate_schedule(input_json: String) -> NapiResult<String> {
    let input: loan_calc_core::ScheduleInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = loan_calc_core::schedule::generate_schedule(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn schedule_totals(schedule_json: String) -> NapiResult<String> {
    let schedule: loan_calc_core::AmortizationSchedule =
        serde_json::from_str(&schedule_json).map_err(to_napi_error)?;
    let totals = loan_calc_core::schedule::schedule_totals(&schedule);
    serde_json::to_string(&totals).map_err(to_napi_error)
}
