use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoanCalcError {
    #[error("Invalid number in {field}: '{value}'")]
    Parse { field: &'static str, value: String },

    #[error("Need exactly 3 of 4 fields, got {supplied}")]
    InputCount { supplied: usize },

    #[error("Domain error: {field}: {reason}")]
    Domain { field: String, reason: String },

    #[error("Date error: {0}")]
    Date(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl LoanCalcError {
    pub(crate) fn domain(field: impl Into<String>, reason: impl Into<String>) -> Self {
        LoanCalcError::Domain {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for LoanCalcError {
    fn from(e: serde_json::Error) -> Self {
        LoanCalcError::Serialization(e.to_string())
    }
}
