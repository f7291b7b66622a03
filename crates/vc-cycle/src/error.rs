//! Error types for cycle operations.

use thiserror::Error;
use vc_core::VcError;
use vc_fluids::FluidError;
use vc_solver::SolverError;

/// Errors that can occur while building or evaluating a cycle.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CycleError {
    #[error("Property lookup failed: {0}")]
    PropertyLookup(#[from] FluidError),

    #[error(
        "Infeasible boundary condition: T_cond {t_cond_k:.2} K - T_evap {t_evap_k:.2} K is below the {min_span_k} K minimum span"
    )]
    InfeasibleBoundaryCondition {
        t_evap_k: f64,
        t_cond_k: f64,
        min_span_k: f64,
    },

    #[error("Pressure ratio {pressure_ratio} outside efficiency model domain [{min}, {max}]")]
    ModelDomain {
        pressure_ratio: f64,
        min: f64,
        max: f64,
    },

    #[error("Non-physical value: {what}")]
    NonPhysical { what: &'static str },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },
}

pub type CycleResult<T> = Result<T, CycleError>;

impl From<SolverError> for CycleError {
    fn from(e: SolverError) -> Self {
        match e {
            SolverError::InvalidBounds { what }
            | SolverError::InvalidStart { what }
            | SolverError::InvalidConfig { what } => CycleError::InvalidArg { what },
        }
    }
}

impl From<CycleError> for VcError {
    fn from(e: CycleError) -> Self {
        match e {
            CycleError::PropertyLookup(inner) => inner.into(),
            e @ CycleError::InfeasibleBoundaryCondition { .. } => VcError::Infeasible {
                message: e.to_string(),
            },
            CycleError::ModelDomain { .. } => VcError::InvalidArg {
                what: "pressure ratio outside efficiency model domain",
            },
            CycleError::NonPhysical { what } => VcError::Invariant { what },
            CycleError::InvalidArg { what } => VcError::InvalidArg { what },
        }
    }
}
