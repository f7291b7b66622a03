//! Minimiser trait and shared evaluation bookkeeping.

use crate::bounds::Bounds;
use crate::error::SolverResult;
use nalgebra::DVector;
use std::fmt;

/// Why a minimiser stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// Tolerances on the objective and the iterate were met.
    Converged,
    MaxIterations,
    MaxEvaluations,
    /// The stop hook fired between evaluations.
    Cancelled,
}

impl Termination {
    pub fn as_str(&self) -> &'static str {
        match self {
            Termination::Converged => "converged",
            Termination::MaxIterations => "max_iterations",
            Termination::MaxEvaluations => "max_evaluations",
            Termination::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Best point found by a minimiser.
#[derive(Debug, Clone, PartialEq)]
pub struct MinimizeResult {
    /// Best point (always inside the bounds)
    pub x: Vec<f64>,
    /// Objective value at `x`
    pub value: f64,
    pub iterations: usize,
    /// Number of objective evaluations
    pub evaluations: usize,
    pub termination: Termination,
}

/// Bounded minimiser over a black-box scalar objective.
///
/// Implementations must only evaluate the objective inside the bounds and must
/// return their best point whatever the termination reason. Errors are
/// reserved for invalid setup (bounds, start point, configuration).
pub trait Minimizer: Send + Sync {
    /// Get the minimiser name (for logging).
    fn name(&self) -> &str;

    /// Minimise, checking `should_stop` before every objective evaluation.
    fn minimize_with_stop(
        &self,
        objective: &dyn Fn(&[f64]) -> f64,
        start: &[f64],
        bounds: &Bounds,
        should_stop: &dyn Fn() -> bool,
    ) -> SolverResult<MinimizeResult>;

    fn minimize(
        &self,
        objective: &dyn Fn(&[f64]) -> f64,
        start: &[f64],
        bounds: &Bounds,
    ) -> SolverResult<MinimizeResult> {
        self.minimize_with_stop(objective, start, bounds, &|| false)
    }
}

/// Counts evaluations, enforces the budget and polls the stop hook.
///
/// Non-finite objective values are ranked as `+inf` so that they never win a
/// comparison.
pub(crate) struct Evaluator<'a> {
    objective: &'a dyn Fn(&[f64]) -> f64,
    should_stop: &'a dyn Fn() -> bool,
    max_evaluations: usize,
    pub(crate) evaluations: usize,
}

impl<'a> Evaluator<'a> {
    pub(crate) fn new(
        objective: &'a dyn Fn(&[f64]) -> f64,
        should_stop: &'a dyn Fn() -> bool,
        max_evaluations: usize,
    ) -> Self {
        Self {
            objective,
            should_stop,
            max_evaluations,
            evaluations: 0,
        }
    }

    pub(crate) fn eval(&mut self, x: &DVector<f64>) -> Result<f64, Termination> {
        if (self.should_stop)() {
            return Err(Termination::Cancelled);
        }
        if self.evaluations >= self.max_evaluations {
            return Err(Termination::MaxEvaluations);
        }
        self.evaluations += 1;
        let v = (self.objective)(x.as_slice());
        Ok(if v.is_nan() { f64::INFINITY } else { v })
    }
}
