//! Error types for calc-engine

use thiserror::Error;

/// Calculation errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    #[error("Conversion error: {0}")]
    Conversion(String),

    #[error("Invalid expression: {0}")]
    Evaluation(String),

    #[error("Missing parameter: {0}")]
    MissingParameter(String),

    #[error("Unsupported calculation type: {0}")]
    UnsupportedCalculation(String),

    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

impl CalcError {
    pub fn conversion(msg: impl Into<String>) -> Self {
        Self::Conversion(msg.into())
    }

    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    pub fn missing_parameter(name: impl Into<String>) -> Self {
        Self::MissingParameter(name.into())
    }

    pub fn unsupported_calculation(name: impl Into<String>) -> Self {
        Self::UnsupportedCalculation(name.into())
    }

    pub fn unsupported_operation(name: impl Into<String>) -> Self {
        Self::UnsupportedOperation(name.into())
    }

    pub fn invalid_parameter(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, CalcError>;
