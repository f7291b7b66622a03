//! Projected gradient descent with backtracking line search.

use crate::bounds::Bounds;
use crate::error::{SolverError, SolverResult};
use crate::gradient::finite_difference_gradient;
use crate::minimizer::{Evaluator, MinimizeResult, Minimizer, Termination};
use nalgebra::DVector;
use tracing::debug;

/// Projected gradient configuration.
#[derive(Debug, Clone)]
pub struct ProjectedGradientConfig {
    pub max_iterations: usize,
    pub max_evaluations: usize,
    /// Relative finite difference step
    pub fd_epsilon: f64,
    /// Largest first trial step as a fraction of the narrowest bound width
    pub initial_step: f64,
    /// Line search backtracking factor
    pub line_search_beta: f64,
    /// Maximum line search iterations
    pub max_line_search_iters: usize,
    /// Objective decrease below which the iteration is considered stalled
    pub f_tol: f64,
    /// Step length (max-norm) below which the iteration is considered stalled
    pub x_tol: f64,
}

impl Default for ProjectedGradientConfig {
    fn default() -> Self {
        Self {
            max_iterations: 200,
            max_evaluations: 1000,
            fd_epsilon: 1e-6,
            initial_step: 0.1,
            line_search_beta: 0.5,
            max_line_search_iters: 30,
            f_tol: 1e-10,
            x_tol: 1e-7,
        }
    }
}

/// Steepest descent projected onto the box after every step.
///
/// Suited to smooth objectives. The COP objective has a kink at its zero, so
/// [`NelderMead`](crate::NelderMead) is the default elsewhere.
#[derive(Debug, Clone, Default)]
pub struct ProjectedGradient {
    pub config: ProjectedGradientConfig,
}

impl ProjectedGradient {
    pub fn new(config: ProjectedGradientConfig) -> Self {
        Self { config }
    }
}

impl Minimizer for ProjectedGradient {
    fn name(&self) -> &str {
        "projected-gradient"
    }

    fn minimize_with_stop(
        &self,
        objective: &dyn Fn(&[f64]) -> f64,
        start: &[f64],
        bounds: &Bounds,
        should_stop: &dyn Fn() -> bool,
    ) -> SolverResult<MinimizeResult> {
        let cfg = &self.config;
        if cfg.max_iterations == 0
            || cfg.max_evaluations == 0
            || !(cfg.fd_epsilon > 0.0)
            || !(cfg.initial_step > 0.0)
            || !(cfg.line_search_beta > 0.0 && cfg.line_search_beta < 1.0)
        {
            return Err(SolverError::InvalidConfig {
                what: "projected gradient limits, step and backtracking factor",
            });
        }

        let mut x = bounds.feasible_start(start)?;
        let mut ev = Evaluator::new(objective, should_stop, cfg.max_evaluations);
        let min_width = (0..bounds.dim())
            .map(|i| bounds.width(i))
            .fold(f64::INFINITY, f64::min);

        let done = |x: &DVector<f64>,
                    f: f64,
                    iterations: usize,
                    evaluations: usize,
                    termination: Termination|
         -> SolverResult<MinimizeResult> {
            debug!(%termination, iterations, evaluations, value = f, "projected gradient finished");
            Ok(MinimizeResult {
                x: x.iter().copied().collect(),
                value: f,
                iterations,
                evaluations,
                termination,
            })
        };

        let mut f = match ev.eval(&x) {
            Ok(f) => f,
            Err(t) => return done(&x, f64::INFINITY, 0, ev.evaluations, t),
        };

        for iter in 0..cfg.max_iterations {
            let grad = finite_difference_gradient(&x, f, |p| ev.eval(p), cfg.fd_epsilon, bounds);
            let grad = match grad {
                Ok(g) => g,
                Err(t) => return done(&x, f, iter, ev.evaluations, t),
            };
            let g_max = grad.amax();
            if !g_max.is_finite() || g_max == 0.0 {
                return done(&x, f, iter, ev.evaluations, Termination::Converged);
            }

            // Backtrack until the projected step decreases the objective.
            let mut alpha = cfg.initial_step * min_width / g_max;
            let mut accepted = None;
            for _ in 0..cfg.max_line_search_iters {
                let mut x_new = &x - alpha * &grad;
                bounds.project(&mut x_new);
                let f_new = match ev.eval(&x_new) {
                    Ok(v) => v,
                    Err(t) => return done(&x, f, iter + 1, ev.evaluations, t),
                };
                if f_new < f {
                    accepted = Some((x_new, f_new));
                    break;
                }
                alpha *= cfg.line_search_beta;
            }

            let Some((x_new, f_new)) = accepted else {
                return done(&x, f, iter + 1, ev.evaluations, Termination::Converged);
            };
            let step = (&x_new - &x).amax();
            let decrease = f - f_new;
            x = x_new;
            f = f_new;
            if decrease <= cfg.f_tol || step <= cfg.x_tol {
                return done(&x, f, iter + 1, ev.evaluations, Termination::Converged);
            }
        }

        done(&x, f, cfg.max_iterations, ev.evaluations, Termination::MaxIterations)
    }
}
