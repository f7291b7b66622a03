//! Inverse fit of boundary temperatures against a target COP.
//!
//! The objective compares the cycle's specific work ratio at a fixed guessed
//! efficiency with the reciprocal of the target COP:
//!
//! ```text
//! f(T_evap, T_cond) = | (h2 - h1) / (h1 - h4) - 1 / COP_target |
//! ```
//!
//! Infeasible points (span below the minimum, failed lookups, non-finite
//! values) score a large finite penalty so the minimiser can keep going. This
//! is the only place in the crate where errors are absorbed.

use crate::boundary::{BoundaryConditions, MIN_SPAN_K};
use crate::builder::compression_ends;
use crate::error::{CycleError, CycleResult};
use tracing::info;
use vc_core::units::{TempInterval, Temperature, dk, k};
use vc_fluids::{PropertyProvider, Refrigerant};
use vc_solver::{Bounds, Minimizer, Termination};

/// Fixed isentropic efficiency used inside the objective.
pub const DEFAULT_EFFICIENCY_GUESS: f64 = 0.75;

/// Objective value for infeasible or unevaluable points.
pub const DEFAULT_PENALTY: f64 = 1e6;

/// Residual at or below which a fit counts as converged.
pub const DEFAULT_TOLERANCE: f64 = 1e-3;

/// Search box for the evaporator and condenser saturation temperatures [K].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemperatureBounds {
    pub t_evap: (f64, f64),
    pub t_cond: (f64, f64),
}

impl Default for TemperatureBounds {
    fn default() -> Self {
        Self {
            t_evap: (273.15, 288.15),
            t_cond: (308.15, 328.15),
        }
    }
}

impl TemperatureBounds {
    pub fn contains(&self, t_evap_k: f64, t_cond_k: f64) -> bool {
        (self.t_evap.0..=self.t_evap.1).contains(&t_evap_k)
            && (self.t_cond.0..=self.t_cond.1).contains(&t_cond_k)
    }
}

/// Run-wide settings for one fit.
#[derive(Debug, Clone, PartialEq)]
pub struct FitConfig {
    pub fluid: Refrigerant,
    pub target_cop: f64,
    pub superheat: TempInterval,
    pub subcool: TempInterval,
    /// Start point `(t_evap, t_cond)` [K], clamped into the bounds
    pub initial: (f64, f64),
    pub bounds: TemperatureBounds,
    pub efficiency_guess: f64,
    pub penalty: f64,
    pub min_span_k: f64,
    /// Residual threshold for `FitResult::converged`
    pub tolerance: f64,
}

impl FitConfig {
    /// Defaults: 5 K superheat and subcooling, start at 7 °C / 45 °C.
    pub fn new(fluid: Refrigerant, target_cop: f64) -> Self {
        Self {
            fluid,
            target_cop,
            superheat: dk(5.0),
            subcool: dk(5.0),
            initial: (280.15, 318.15),
            bounds: TemperatureBounds::default(),
            efficiency_guess: DEFAULT_EFFICIENCY_GUESS,
            penalty: DEFAULT_PENALTY,
            min_span_k: MIN_SPAN_K,
            tolerance: DEFAULT_TOLERANCE,
        }
    }

    pub fn validate(&self) -> CycleResult<()> {
        if !self.target_cop.is_finite() || self.target_cop <= 0.0 {
            return Err(CycleError::InvalidArg {
                what: "target COP must be positive and finite",
            });
        }
        if !(self.efficiency_guess > 0.0 && self.efficiency_guess <= 1.0) {
            return Err(CycleError::InvalidArg {
                what: "efficiency guess must lie in (0, 1]",
            });
        }
        if !self.penalty.is_finite() || self.penalty <= 0.0 {
            return Err(CycleError::InvalidArg {
                what: "penalty must be positive and finite",
            });
        }
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(CycleError::InvalidArg {
                what: "tolerance must be positive and finite",
            });
        }
        // Below MIN_SPAN_K the fit could return temperatures the builder rejects.
        if !self.min_span_k.is_finite() || self.min_span_k < MIN_SPAN_K {
            return Err(CycleError::InvalidArg {
                what: "minimum span must be finite and at least 10 K",
            });
        }
        if !(self.superheat.value >= 0.0 && self.subcool.value >= 0.0)
            || !self.superheat.value.is_finite()
            || !self.subcool.value.is_finite()
        {
            return Err(CycleError::InvalidArg {
                what: "superheat and subcooling must be finite and non-negative",
            });
        }
        Ok(())
    }

    fn solver_bounds(&self) -> CycleResult<Bounds> {
        Ok(Bounds::new(&[self.bounds.t_evap, self.bounds.t_cond])?)
    }
}

/// Outcome of a fit.
#[derive(Debug, Clone, PartialEq)]
pub struct FitResult {
    pub t_evap: Temperature,
    pub t_cond: Temperature,
    /// `residual <= tolerance`, independent of how the minimiser stopped
    pub converged: bool,
    pub residual: f64,
    pub iterations: usize,
    pub evaluations: usize,
    pub termination: Termination,
}

/// Objective over `(t_evap, t_cond)` for one provider and configuration.
pub struct FitProblem<'a, P: PropertyProvider + ?Sized> {
    provider: &'a P,
    fluid: Refrigerant,
    target_cop: f64,
    superheat: TempInterval,
    subcool: TempInterval,
    efficiency_guess: f64,
    penalty: f64,
    min_span_k: f64,
}

impl<'a, P: PropertyProvider + ?Sized> FitProblem<'a, P> {
    pub fn new(provider: &'a P, config: &FitConfig) -> Self {
        Self {
            provider,
            fluid: config.fluid,
            target_cop: config.target_cop,
            superheat: config.superheat,
            subcool: config.subcool,
            efficiency_guess: config.efficiency_guess,
            penalty: config.penalty,
            min_span_k: config.min_span_k,
        }
    }

    pub fn penalty(&self) -> f64 {
        self.penalty
    }

    /// COP at the guessed efficiency, with every failure surfaced.
    pub fn fixed_efficiency_cop(&self, t_evap_k: f64, t_cond_k: f64) -> CycleResult<f64> {
        let boundary =
            BoundaryConditions::new(k(t_evap_k), k(t_cond_k), self.superheat, self.subcool, self.fluid);
        let ends = compression_ends(self.provider, &boundary)?;
        let h2 = ends.discharge_enthalpy(self.efficiency_guess);
        let h4 = ends.h3;
        let effect = ends.h1 - h4;
        // No refrigeration effect: reported as NonPhysical, so the objective
        // scores the penalty rather than the finite residual.
        if !(effect > 0.0) {
            return Err(CycleError::NonPhysical {
                what: "refrigeration effect must be positive",
            });
        }
        Ok(effect / (h2 - ends.h1))
    }

    /// Objective value, or the penalty for infeasible points.
    pub fn objective(&self, t_evap_k: f64, t_cond_k: f64) -> f64 {
        let span = t_cond_k - t_evap_k;
        if span.is_nan() || span < self.min_span_k {
            return self.penalty;
        }
        match self.fixed_efficiency_cop(t_evap_k, t_cond_k) {
            Ok(cop) => {
                let r = (1.0 / cop - 1.0 / self.target_cop).abs();
                if r.is_finite() { r } else { self.penalty }
            }
            Err(_) => self.penalty,
        }
    }
}

/// Fit boundary temperatures to `config.target_cop`.
pub fn fit<P: PropertyProvider + ?Sized>(
    provider: &P,
    config: &FitConfig,
    minimizer: &dyn Minimizer,
) -> CycleResult<FitResult> {
    fit_with_stop(provider, config, minimizer, &|| false)
}

/// [`fit`] with a cancellation hook polled between objective evaluations.
///
/// Interior lookup failures never surface here; only invalid configuration
/// does. Non-convergence is reported through `converged` and `residual`.
pub fn fit_with_stop<P: PropertyProvider + ?Sized>(
    provider: &P,
    config: &FitConfig,
    minimizer: &dyn Minimizer,
    should_stop: &dyn Fn() -> bool,
) -> CycleResult<FitResult> {
    config.validate()?;
    let bounds = config.solver_bounds()?;
    let problem = FitProblem::new(provider, config);
    let objective = |x: &[f64]| problem.objective(x[0], x[1]);

    let start = [config.initial.0, config.initial.1];
    let result = minimizer.minimize_with_stop(&objective, &start, &bounds, should_stop)?;

    let residual = result.value;
    let converged = residual <= config.tolerance;
    info!(
        fluid = %config.fluid,
        target_cop = config.target_cop,
        minimizer = minimizer.name(),
        t_evap = result.x[0],
        t_cond = result.x[1],
        residual,
        converged,
        evaluations = result.evaluations,
        termination = %result.termination,
        "fit finished"
    );

    Ok(FitResult {
        t_evap: k(result.x[0]),
        t_cond: k(result.x[1]),
        converged,
        residual,
        iterations: result.iterations,
        evaluations: result.evaluations,
        termination: result.termination,
    })
}
