pub mod annuity;
pub mod error;
pub mod fields;
pub mod growth;
pub mod schedule;
pub mod types;

pub use error::LoanCalcError;
pub use types::*;

/// Standard result type for all loan-calc operations
pub type LoanCalcResult<T> = Result<T, LoanCalcError>;
