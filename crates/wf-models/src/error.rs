//! Error types for model configuration.
//!
//! Model evaluation never fails for in-domain inputs; these errors come from
//! checking coefficients and curves before a solve.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("Invalid coefficient: {what}")]
    InvalidCoefficient { what: &'static str },

    #[error("Invalid performance curve: {what}")]
    InvalidCurve { what: &'static str },

    #[error("Unknown model name: {name} (expected one of {expected})")]
    UnknownModel { name: String, expected: &'static str },
}

pub type ModelResult<T> = Result<T, ModelError>;
