//! Bounded minimisers for small, expensive objectives.
//!
//! The objectives here are scalar functions of a handful of variables whose
//! every evaluation may hit a property backend, so the solvers count
//! evaluations, respect box bounds at every trial point and can be cancelled
//! between evaluations.
//!
//! Two implementations of [`Minimizer`] are provided: a derivative-free
//! [`NelderMead`] (the default) and a [`ProjectedGradient`] descent driven by
//! finite-difference gradients.

pub mod bounds;
pub mod error;
pub mod gradient;
pub mod minimizer;
pub mod nelder_mead;
pub mod projected_gradient;

pub use bounds::Bounds;
pub use error::{SolverError, SolverResult};
pub use minimizer::{MinimizeResult, Minimizer, Termination};
pub use nelder_mead::{NelderMead, NelderMeadConfig};
pub use projected_gradient::{ProjectedGradient, ProjectedGradientConfig};
