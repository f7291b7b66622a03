//! Single-cycle evaluation and standalone fits.

use crate::error::{AppError, AppResult};
use crate::report::{CycleReport, FitReport};
use vc_core::units::{dk, k, pa};
use vc_cycle::metrics::CycleMetrics;
use vc_cycle::{
    BoundaryConditions, FitConfig, LegacyCycle, PolynomialEfficiency, TemperatureBounds,
    build_cycle, build_cycle_with_model, fit,
};
use vc_fluids::{PropertyProvider, Refrigerant};
use vc_project::MinimizerDef;
use vc_solver::{Minimizer, NelderMead, ProjectedGradient};

/// Minimiser for a configured method.
pub fn minimizer_for(method: MinimizerDef) -> Box<dyn Minimizer> {
    match method {
        MinimizerDef::NelderMead => Box::new(NelderMead::default()),
        MinimizerDef::Gradient => Box::new(ProjectedGradient::default()),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CycleRequest {
    pub fluid: Refrigerant,
    pub t_evap_k: f64,
    pub t_cond_k: f64,
    pub superheat_k: f64,
    pub subcool_k: f64,
    /// Fixed isentropic efficiency; the default polynomial curve when `None`
    pub eta: Option<f64>,
    /// Report the six-point layout
    pub legacy: bool,
}

pub fn evaluate_cycle<P: PropertyProvider + ?Sized>(
    provider: &P,
    request: &CycleRequest,
) -> AppResult<CycleReport> {
    let boundary = BoundaryConditions::new(
        k(request.t_evap_k),
        k(request.t_cond_k),
        dk(request.superheat_k),
        dk(request.subcool_k),
        request.fluid,
    );
    let (cycle, perf) = match request.eta {
        Some(eta) => (build_cycle(provider, &boundary, eta)?, None),
        None => {
            let (cycle, perf) =
                build_cycle_with_model(provider, &boundary, &PolynomialEfficiency::default())?;
            (cycle, Some(perf))
        }
    };
    let metrics = CycleMetrics::evaluate(&cycle, None)?;
    let report = CycleReport::new(
        &cycle,
        request.t_evap_k,
        request.t_cond_k,
        request.superheat_k,
        request.subcool_k,
        &metrics,
        perf.as_ref(),
    );
    if request.legacy {
        let legacy = LegacyCycle::from_cycle(provider, &cycle)?;
        return Ok(report.with_legacy_points(&legacy));
    }
    Ok(report)
}

/// A cycle described by measured suction and discharge pressures.
#[derive(Debug, Clone, PartialEq)]
pub struct SensorRequest {
    pub fluid: Refrigerant,
    pub suction_pressure_pa: f64,
    pub discharge_pressure_pa: f64,
    pub superheat_k: f64,
    pub subcool_k: f64,
    pub eta: Option<f64>,
    pub legacy: bool,
}

/// Evaluate the cycle implied by sensor pressures.
///
/// Evaporator and condenser temperatures are the dew and bubble points at the
/// two pressures.
pub fn evaluate_sensor_cycle<P: PropertyProvider + ?Sized>(
    provider: &P,
    request: &SensorRequest,
) -> AppResult<CycleReport> {
    let boundary = BoundaryConditions::from_pressures(
        provider,
        pa(request.suction_pressure_pa),
        pa(request.discharge_pressure_pa),
        dk(request.superheat_k),
        dk(request.subcool_k),
        request.fluid,
    )
    .map_err(|e| AppError::ActualCycle {
        cause: e.to_string(),
    })?;
    evaluate_cycle(
        provider,
        &CycleRequest {
            fluid: request.fluid,
            t_evap_k: boundary.t_evap.value,
            t_cond_k: boundary.t_cond.value,
            superheat_k: request.superheat_k,
            subcool_k: request.subcool_k,
            eta: request.eta,
            legacy: request.legacy,
        },
    )
}

#[derive(Debug, Clone, PartialEq)]
pub struct FitRequest {
    pub fluid: Refrigerant,
    pub target_cop: f64,
    pub superheat_k: f64,
    pub subcool_k: f64,
    pub bounds: TemperatureBounds,
    /// Start point; the middle of the bounds when `None`
    pub initial: Option<(f64, f64)>,
    pub method: MinimizerDef,
}

pub fn run_fit<P: PropertyProvider + ?Sized>(
    provider: &P,
    request: &FitRequest,
) -> AppResult<FitReport> {
    let mut config = FitConfig::new(request.fluid, request.target_cop);
    config.superheat = dk(request.superheat_k);
    config.subcool = dk(request.subcool_k);
    config.bounds = request.bounds;
    config.initial = request.initial.unwrap_or((
        0.5 * (request.bounds.t_evap.0 + request.bounds.t_evap.1),
        0.5 * (request.bounds.t_cond.0 + request.bounds.t_cond.1),
    ));
    if !request.bounds.contains(config.initial.0, config.initial.1) {
        return Err(AppError::InvalidInput(format!(
            "start point ({:.2}, {:.2}) K lies outside the bounds",
            config.initial.0, config.initial.1
        )));
    }

    let minimizer = minimizer_for(request.method);
    let result = fit(provider, &config, minimizer.as_ref())?;
    Ok(FitReport::new(minimizer.name(), request.target_cop, &result))
}
