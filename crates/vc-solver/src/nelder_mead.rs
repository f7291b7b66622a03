//! Bounded Nelder-Mead simplex search.
//!
//! Every trial vertex is projected into the box before it is evaluated, so the
//! objective never sees an out-of-bounds point.

use crate::bounds::Bounds;
use crate::error::{SolverError, SolverResult};
use crate::minimizer::{Evaluator, MinimizeResult, Minimizer, Termination};
use nalgebra::DVector;
use tracing::debug;

/// Nelder-Mead configuration.
#[derive(Debug, Clone)]
pub struct NelderMeadConfig {
    /// Reflection coefficient
    pub alpha: f64,
    /// Expansion coefficient
    pub gamma: f64,
    /// Contraction coefficient
    pub rho: f64,
    /// Shrink coefficient
    pub sigma: f64,
    /// Initial simplex edge as a fraction of each bound width
    pub initial_step: f64,
    pub max_iterations: usize,
    pub max_evaluations: usize,
    /// Spread of objective values across the simplex
    pub f_tol: f64,
    /// Largest vertex distance from the best vertex (per coordinate)
    pub x_tol: f64,
}

impl Default for NelderMeadConfig {
    fn default() -> Self {
        Self {
            alpha: 1.0,
            gamma: 2.0,
            rho: 0.5,
            sigma: 0.5,
            initial_step: 0.05,
            max_iterations: 400,
            max_evaluations: 1000,
            f_tol: 1e-10,
            x_tol: 1e-7,
        }
    }
}

impl NelderMeadConfig {
    fn validate(&self) -> SolverResult<()> {
        let positive = |v: f64| v.is_finite() && v > 0.0;
        if !positive(self.alpha) || !(self.gamma > self.alpha) || !self.gamma.is_finite() {
            return Err(SolverError::InvalidConfig {
                what: "need alpha > 0 and gamma > alpha",
            });
        }
        if !(self.rho > 0.0 && self.rho < 1.0) || !(self.sigma > 0.0 && self.sigma < 1.0) {
            return Err(SolverError::InvalidConfig {
                what: "contraction and shrink coefficients must lie in (0, 1)",
            });
        }
        if !(self.initial_step > 0.0 && self.initial_step <= 1.0) {
            return Err(SolverError::InvalidConfig {
                what: "initial_step must lie in (0, 1]",
            });
        }
        if self.max_iterations == 0 || self.max_evaluations == 0 {
            return Err(SolverError::InvalidConfig {
                what: "iteration and evaluation limits must be positive",
            });
        }
        if !(self.f_tol >= 0.0) || !(self.x_tol >= 0.0) {
            return Err(SolverError::InvalidConfig {
                what: "tolerances must be non-negative",
            });
        }
        Ok(())
    }
}

/// Derivative-free simplex minimiser with box constraints.
#[derive(Debug, Clone, Default)]
pub struct NelderMead {
    pub config: NelderMeadConfig,
}

impl NelderMead {
    pub fn new(config: NelderMeadConfig) -> Self {
        Self { config }
    }
}

struct Vertex {
    x: DVector<f64>,
    f: f64,
}

fn sort(simplex: &mut [Vertex]) {
    simplex.sort_by(|a, b| a.f.total_cmp(&b.f));
}

fn finish(
    simplex: &mut [Vertex],
    iterations: usize,
    evaluations: usize,
    termination: Termination,
) -> MinimizeResult {
    sort(simplex);
    let best = &simplex[0];
    debug!(
        %termination,
        iterations,
        evaluations,
        value = best.f,
        "nelder-mead finished"
    );
    MinimizeResult {
        x: best.x.iter().copied().collect(),
        value: best.f,
        iterations,
        evaluations,
        termination,
    }
}

impl Minimizer for NelderMead {
    fn name(&self) -> &str {
        "nelder-mead"
    }

    fn minimize_with_stop(
        &self,
        objective: &dyn Fn(&[f64]) -> f64,
        start: &[f64],
        bounds: &Bounds,
        should_stop: &dyn Fn() -> bool,
    ) -> SolverResult<MinimizeResult> {
        let cfg = &self.config;
        cfg.validate()?;
        let x0 = bounds.feasible_start(start)?;
        let n = x0.len();
        let mut ev = Evaluator::new(objective, should_stop, cfg.max_evaluations);

        let project = |mut x: DVector<f64>| {
            bounds.project(&mut x);
            x
        };

        // Initial simplex: x0 plus one step along each axis, turned back at the upper bound.
        let mut simplex: Vec<Vertex> = Vec::with_capacity(n + 1);
        let mut points = vec![x0.clone()];
        for i in 0..n {
            let step = cfg.initial_step * bounds.width(i);
            let mut x = x0.clone();
            x[i] = if x0[i] + step <= bounds.upper(i) {
                x0[i] + step
            } else {
                x0[i] - step
            };
            points.push(x);
        }
        for x in points {
            match ev.eval(&x) {
                Ok(f) => simplex.push(Vertex { x, f }),
                Err(t) if simplex.is_empty() => {
                    // Nothing evaluated yet; report the start point unscored.
                    return Ok(MinimizeResult {
                        x: x.iter().copied().collect(),
                        value: f64::INFINITY,
                        iterations: 0,
                        evaluations: ev.evaluations,
                        termination: t,
                    });
                }
                Err(t) => return Ok(finish(&mut simplex, 0, ev.evaluations, t)),
            }
        }

        for iter in 0..cfg.max_iterations {
            sort(&mut simplex);

            let f_spread = simplex[n].f - simplex[0].f;
            let x_spread = simplex[1..]
                .iter()
                .map(|v| (&v.x - &simplex[0].x).amax())
                .fold(0.0, f64::max);
            if f_spread.is_finite() && f_spread <= cfg.f_tol && x_spread <= cfg.x_tol {
                return Ok(finish(&mut simplex, iter, ev.evaluations, Termination::Converged));
            }

            let centroid = simplex[..n]
                .iter()
                .fold(DVector::zeros(n), |acc, v| acc + &v.x)
                / n as f64;
            let worst = simplex[n].x.clone();
            let f_worst = simplex[n].f;
            let f_second = simplex[n - 1].f;
            let f_best = simplex[0].f;

            let step = (|| -> Result<(), Termination> {
                let xr = project(&centroid + cfg.alpha * (&centroid - &worst));
                let fr = ev.eval(&xr)?;

                if fr < f_best {
                    let xe = project(&centroid + cfg.gamma * (&xr - &centroid));
                    let fe = ev.eval(&xe)?;
                    simplex[n] = if fe < fr {
                        Vertex { x: xe, f: fe }
                    } else {
                        Vertex { x: xr, f: fr }
                    };
                    return Ok(());
                }
                if fr < f_second {
                    simplex[n] = Vertex { x: xr, f: fr };
                    return Ok(());
                }

                let (xc, threshold) = if fr < f_worst {
                    (project(&centroid + cfg.rho * (&xr - &centroid)), fr)
                } else {
                    (project(&centroid + cfg.rho * (&worst - &centroid)), f_worst)
                };
                let fc = ev.eval(&xc)?;
                if fc < threshold {
                    simplex[n] = Vertex { x: xc, f: fc };
                    return Ok(());
                }

                let best = simplex[0].x.clone();
                for vertex in simplex.iter_mut().skip(1) {
                    let x = project(&best + cfg.sigma * (&vertex.x - &best));
                    vertex.f = ev.eval(&x)?;
                    vertex.x = x;
                }
                Ok(())
            })();

            if let Err(t) = step {
                return Ok(finish(&mut simplex, iter + 1, ev.evaluations, t));
            }
        }

        Ok(finish(
            &mut simplex,
            cfg.max_iterations,
            ev.evaluations,
            Termination::MaxIterations,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn rosenbrock(x: &[f64]) -> f64 {
        (1.0 - x[0]).powi(2) + 100.0 * (x[1] - x[0] * x[0]).powi(2)
    }

    #[test]
    fn interior_minimum() {
        let f = |x: &[f64]| (x[0] - 1.5).powi(2) + 2.0 * (x[1] + 0.5).powi(2);
        let bounds = Bounds::new(&[(-5.0, 5.0), (-5.0, 5.0)]).unwrap();
        let result = NelderMead::default().minimize(&f, &[0.0, 0.0], &bounds).unwrap();

        assert_eq!(result.termination, Termination::Converged);
        assert!((result.x[0] - 1.5).abs() < 1e-4, "{:?}", result.x);
        assert!((result.x[1] + 0.5).abs() < 1e-4, "{:?}", result.x);
        assert!(result.evaluations <= 1000);
    }

    #[test]
    fn rosenbrock_within_budget() {
        let bounds = Bounds::new(&[(-2.0, 2.0), (-1.0, 3.0)]).unwrap();
        let nm = NelderMead::new(NelderMeadConfig {
            max_iterations: 2000,
            max_evaluations: 4000,
            ..Default::default()
        });
        let result = nm.minimize(&rosenbrock, &[-1.2, 1.0], &bounds).unwrap();
        assert!(result.value < 1e-6, "f = {}", result.value);
    }

    #[test]
    fn minimum_on_bound() {
        // Unconstrained minimum at x = 10 lies outside [0, 3].
        let evaluated_outside = Cell::new(false);
        let f = |x: &[f64]| {
            if x[0] < 0.0 || x[0] > 3.0 || x[1] < 0.0 || x[1] > 3.0 {
                evaluated_outside.set(true);
            }
            (x[0] - 10.0).powi(2) + (x[1] - 1.0).powi(2)
        };
        let bounds = Bounds::new(&[(0.0, 3.0), (0.0, 3.0)]).unwrap();
        let result = NelderMead::default().minimize(&f, &[1.0, 1.0], &bounds).unwrap();

        assert!(!evaluated_outside.get());
        assert!((result.x[0] - 3.0).abs() < 1e-6, "{:?}", result.x);
        assert!((result.x[1] - 1.0).abs() < 1e-3, "{:?}", result.x);
    }

    #[test]
    fn evaluation_budget_is_respected() {
        let count = Cell::new(0usize);
        let f = |x: &[f64]| {
            count.set(count.get() + 1);
            rosenbrock(x)
        };
        let bounds = Bounds::new(&[(-2.0, 2.0), (-1.0, 3.0)]).unwrap();
        let nm = NelderMead::new(NelderMeadConfig {
            max_evaluations: 25,
            ..Default::default()
        });
        let result = nm.minimize(&f, &[-1.2, 1.0], &bounds).unwrap();

        assert_eq!(result.termination, Termination::MaxEvaluations);
        assert_eq!(result.evaluations, 25);
        assert_eq!(count.get(), 25);
        assert!(result.value <= rosenbrock(&[-1.2, 1.0]));
    }

    #[test]
    fn cancellation_returns_best_so_far() {
        let count = Cell::new(0usize);
        let f = |x: &[f64]| {
            count.set(count.get() + 1);
            (x[0] - 1.0).powi(2)
        };
        let stop = || count.get() >= 10;
        let bounds = Bounds::new(&[(-5.0, 5.0)]).unwrap();
        let result = NelderMead::default()
            .minimize_with_stop(&f, &[-4.0], &bounds, &stop)
            .unwrap();

        assert_eq!(result.termination, Termination::Cancelled);
        assert_eq!(result.evaluations, 10);
        assert!(result.value < 25.0);
    }

    #[test]
    fn rejects_bad_config() {
        let nm = NelderMead::new(NelderMeadConfig {
            rho: 1.5,
            ..Default::default()
        });
        let bounds = Bounds::new(&[(0.0, 1.0)]).unwrap();
        assert!(matches!(
            nm.minimize(&|x: &[f64]| x[0], &[0.5], &bounds),
            Err(SolverError::InvalidConfig { .. })
        ));
    }
}
