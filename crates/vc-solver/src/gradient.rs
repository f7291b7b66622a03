//! Finite difference gradients on a bounded domain.
//!
//! Perturbations step away from the nearest bound so every trial point stays
//! feasible.

use crate::bounds::Bounds;
use nalgebra::DVector;

fn step_for(x: &DVector<f64>, j: usize, epsilon: f64, bounds: &Bounds) -> f64 {
    let dx = epsilon * x[j].abs().max(1.0);
    if x[j] + dx > bounds.upper(j) { -dx } else { dx }
}

/// Compute the gradient using forward finite differences.
///
/// `f_x` is the objective at `x`, already known to the caller. For each
/// component j, perturbs x[j] by dx and computes (f(x+dx) - f(x))/dx. Near the
/// upper bound dx is negated (a backward difference).
pub fn finite_difference_gradient<F, E>(
    x: &DVector<f64>,
    f_x: f64,
    mut f: F,
    epsilon: f64,
    bounds: &Bounds,
) -> Result<DVector<f64>, E>
where
    F: FnMut(&DVector<f64>) -> Result<f64, E>,
{
    let n = x.len();
    let mut grad = DVector::zeros(n);

    for j in 0..n {
        let dx = step_for(x, j, epsilon, bounds);
        let mut x_perturbed = x.clone();
        x_perturbed[j] += dx;
        grad[j] = (f(&x_perturbed)? - f_x) / dx;
    }

    Ok(grad)
}
