//! Box bounds.

use crate::error::{SolverError, SolverResult};
use nalgebra::DVector;

/// Per-variable closed interval `[lower, upper]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Bounds {
    lower: DVector<f64>,
    upper: DVector<f64>,
}

impl Bounds {
    /// Build bounds from `(lower, upper)` pairs.
    ///
    /// Every pair must be finite with `lower < upper`.
    pub fn new(pairs: &[(f64, f64)]) -> SolverResult<Self> {
        if pairs.is_empty() {
            return Err(SolverError::InvalidBounds {
                what: "at least one variable is required",
            });
        }
        for &(lo, hi) in pairs {
            if !lo.is_finite() || !hi.is_finite() {
                return Err(SolverError::InvalidBounds {
                    what: "bounds must be finite",
                });
            }
            if lo >= hi {
                return Err(SolverError::InvalidBounds {
                    what: "lower bound must be below upper bound",
                });
            }
        }
        Ok(Self {
            lower: DVector::from_iterator(pairs.len(), pairs.iter().map(|p| p.0)),
            upper: DVector::from_iterator(pairs.len(), pairs.iter().map(|p| p.1)),
        })
    }

    pub fn dim(&self) -> usize {
        self.lower.len()
    }

    pub fn lower(&self, i: usize) -> f64 {
        self.lower[i]
    }

    pub fn upper(&self, i: usize) -> f64 {
        self.upper[i]
    }

    pub fn width(&self, i: usize) -> f64 {
        self.upper[i] - self.lower[i]
    }

    pub fn contains(&self, x: &[f64]) -> bool {
        x.len() == self.dim()
            && x.iter()
                .enumerate()
                .all(|(i, &v)| v >= self.lower[i] && v <= self.upper[i])
    }

    /// Clamp `x` into the box in place.
    pub fn project(&self, x: &mut DVector<f64>) {
        for i in 0..x.len() {
            x[i] = vc_core::clamp(x[i], self.lower[i], self.upper[i]);
        }
    }

    /// Validate a start point and return it projected into the box.
    pub fn feasible_start(&self, start: &[f64]) -> SolverResult<DVector<f64>> {
        if start.len() != self.dim() {
            return Err(SolverError::InvalidStart {
                what: "start point dimension does not match bounds",
            });
        }
        if start.iter().any(|v| !v.is_finite()) {
            return Err(SolverError::InvalidStart {
                what: "start point must be finite",
            });
        }
        let mut x = DVector::from_column_slice(start);
        self.project(&mut x);
        Ok(x)
    }
}
