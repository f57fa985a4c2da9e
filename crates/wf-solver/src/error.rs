//! Error types for solver operations.

use thiserror::Error;
use wf_farm::FarmError;
use wf_models::ModelError;

/// Errors that stop a solve before any field is computed.
///
/// Numerical trouble during a solve is not an error: it is clamped, recorded
/// as an [`Anomaly`](crate::Anomaly) and the solve carries on.
#[derive(Error, Debug)]
pub enum SolverError {
    #[error("Configuration error: {what}")]
    Configuration { what: String },

    #[error("Farm error: {0}")]
    Farm(#[from] FarmError),

    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    #[error("Flow case {index} out of range ({count} cases)")]
    CaseOutOfRange { index: usize, count: usize },

    #[error("Invalid state: {what}")]
    InvalidState { what: String },
}

impl SolverError {
    /// True for errors caused by the problem definition rather than the solver.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            SolverError::Configuration { .. } | SolverError::Farm(_) | SolverError::Model(_)
        )
    }
}

pub type SolverResult<T> = Result<T, SolverError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_errors_are_classified() {
        let e: SolverError = FarmError::EmptyFarm.into();
        assert!(e.is_configuration());
        let e = SolverError::CaseOutOfRange { index: 4, count: 2 };
        assert!(!e.is_configuration());
        assert!(e.to_string().contains("4"));
    }
}
