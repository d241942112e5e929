//! Core domain errors

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised while constructing domain values
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Amount cannot be negative: {0}")]
    NegativeAmount(Decimal),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("{0} identifier cannot be empty")]
    EmptyIdentifier(&'static str),

    #[error("Invalid hex payload: {0}")]
    InvalidHex(String),
}

/// Result type for core operations
pub type CoreResult<T> = Result<T, CoreError>;
