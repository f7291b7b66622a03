//! Error types for minimiser setup.

use thiserror::Error;
use vc_core::VcError;

/// Errors raised before a minimiser starts iterating.
///
/// Once iteration begins, problems with the objective are reported through
/// [`Termination`](crate::Termination) and the best point found, never as errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    #[error("Invalid bounds: {what}")]
    InvalidBounds { what: &'static str },

    #[error("Invalid start point: {what}")]
    InvalidStart { what: &'static str },

    #[error("Invalid solver configuration: {what}")]
    InvalidConfig { what: &'static str },
}

pub type SolverResult<T> = Result<T, SolverError>;

impl From<SolverError> for VcError {
    fn from(e: SolverError) -> Self {
        match e {
            SolverError::InvalidBounds { what }
            | SolverError::InvalidStart { what }
            | SolverError::InvalidConfig { what } => VcError::InvalidArg { what },
        }
    }
}
