use thiserror::Error;

#[derive(Debug, Error)]
pub enum MortgageCalcError {
    /// Parameters that make the amortization formula mathematically undefined.
    #[error("Invalid loan parameters: {field} — {reason}")]
    InvalidLoanParameters { field: String, reason: String },

    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl MortgageCalcError {
    pub(crate) fn loan_parameters(field: &str, reason: impl Into<String>) -> Self {
        MortgageCalcError::InvalidLoanParameters {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn input(field: &str, reason: impl Into<String>) -> Self {
        MortgageCalcError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for MortgageCalcError {
    fn from(e: serde_json::Error) -> Self {
        MortgageCalcError::SerializationError(e.to_string())
    }
}
