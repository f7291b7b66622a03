//! Design against actual cycle analysis.

use crate::cycle_service::minimizer_for;
use crate::error::{AppError, AppResult};
use crate::report::{AnalysisReport, CycleReport, FitReport};
use std::path::Path;
use tracing::{info, warn};
use vc_core::units::{dk, k, pa, w};
use vc_cycle::metrics::{CycleMetrics, efficiency_loss_pct, mass_flow_for_capacity};
use vc_cycle::{
    BoundaryConditions, CompressorPerformance, EfficiencyModel, FitConfig, RatedPerformance,
    build_cycle_with_model, fit,
};
use vc_fluids::{CoolPropModel, PropertyProvider};
use vc_project::{AnalysisConfig, DesignTemperaturesDef};

fn extrapolation_warning(label: &str, perf: &CompressorPerformance) -> String {
    format!(
        "{label} pressure ratio {:.3} lies outside the compressor model range; efficiency extrapolated",
        perf.pressure_ratio
    )
}

/// Fit the design temperatures to the rated COP, or take them as given.
fn design_temperatures<P: PropertyProvider + ?Sized>(
    provider: &P,
    config: &AnalysisConfig,
    rated: &RatedPerformance,
    warnings: &mut Vec<String>,
) -> AppResult<((f64, f64), Option<FitReport>)> {
    let (initial, bounds) = match &config.design.temperatures {
        DesignTemperaturesDef::Given { t_evap_k, t_cond_k } => {
            return Ok(((*t_evap_k, *t_cond_k), None));
        }
        DesignTemperaturesDef::Fitted { initial, bounds } => (initial, bounds),
    };

    let fit_def = &config.fit;
    let fit_config = FitConfig {
        fluid: config.fluid,
        target_cop: rated.cop(),
        superheat: dk(config.design.superheat_k),
        subcool: dk(config.design.subcool_k),
        initial: (initial.t_evap_k, initial.t_cond_k),
        bounds: (*bounds).into(),
        efficiency_guess: fit_def.efficiency_guess,
        penalty: fit_def.penalty,
        min_span_k: fit_def.min_span_k,
        tolerance: fit_def.tolerance,
    };
    let minimizer = minimizer_for(fit_def.method);
    let result = fit(provider, &fit_config, minimizer.as_ref()).map_err(|e| {
        AppError::DesignCycle {
            cause: e.to_string(),
        }
    })?;

    if !result.converged {
        let err = AppError::FitNotConverged {
            residual: result.residual,
        };
        if fit_def.require_convergence {
            return Err(err);
        }
        warn!(residual = result.residual, "{err}");
        warnings.push(err.to_string());
    }

    let report = FitReport::new(minimizer.name(), fit_config.target_cop, &result);
    Ok(((result.t_evap.value, result.t_cond.value), Some(report)))
}

/// Run the full analysis for one machine.
///
/// The design cycle comes from the rating (fitted or given temperatures) and
/// the actual cycle from the sensor pressures. Both use the configured
/// compressor model.
pub fn run_analysis<P: PropertyProvider + ?Sized>(
    provider: &P,
    config: &AnalysisConfig,
) -> AppResult<AnalysisReport> {
    vc_project::validate_config(config).map_err(|e| AppError::Project(e.to_string()))?;
    let model: Box<dyn EfficiencyModel> = config.compressor.build()?;
    let rating = &config.design.rating;
    let rated = RatedPerformance::new(w(rating.capacity_w), w(rating.power_input_w))?;
    let mut warnings = Vec::new();

    // Design
    let ((t_evap, t_cond), design_fit) =
        design_temperatures(provider, config, &rated, &mut warnings)?;
    let design_boundary = BoundaryConditions::new(
        k(t_evap),
        k(t_cond),
        dk(config.design.superheat_k),
        dk(config.design.subcool_k),
        config.fluid,
    );
    let design_err = |e: vc_cycle::CycleError| AppError::DesignCycle {
        cause: e.to_string(),
    };
    let (design_cycle, design_perf) =
        build_cycle_with_model(provider, &design_boundary, model.as_ref()).map_err(design_err)?;
    let mass_flow = mass_flow_for_capacity(&design_cycle, rated.capacity).map_err(design_err)?;
    let design_metrics =
        CycleMetrics::evaluate(&design_cycle, Some(mass_flow)).map_err(design_err)?;
    if design_perf.extrapolated {
        warnings.push(extrapolation_warning("design", &design_perf));
    }

    // Actual
    let actual_def = &config.actual;
    let actual_err = |e: vc_cycle::CycleError| AppError::ActualCycle {
        cause: e.to_string(),
    };
    let actual_boundary = BoundaryConditions::from_pressures(
        provider,
        pa(actual_def.suction_pressure_pa),
        pa(actual_def.discharge_pressure_pa),
        dk(actual_def.superheat_k),
        dk(actual_def.subcool_k),
        config.fluid,
    )
    .map_err(actual_err)?;
    let (actual_cycle, actual_perf) =
        build_cycle_with_model(provider, &actual_boundary, model.as_ref()).map_err(actual_err)?;
    let actual_metrics = CycleMetrics::evaluate(&actual_cycle, None).map_err(actual_err)?;
    if actual_perf.extrapolated {
        warnings.push(extrapolation_warning("actual", &actual_perf));
    }

    let loss = efficiency_loss_pct(design_metrics.cop, actual_metrics.cop)?;
    info!(
        name = %config.name,
        fluid = %config.fluid,
        model = model.name(),
        design_cop = design_metrics.cop,
        actual_cop = actual_metrics.cop,
        efficiency_loss_pct = loss,
        "analysis finished"
    );

    Ok(AnalysisReport {
        name: config.name.clone(),
        site: config.site.clone(),
        company: config.company.clone(),
        fluid: config.fluid.to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        rated_capacity_w: rating.capacity_w,
        rated_power_input_w: rating.power_input_w,
        rated_cop: rated.cop(),
        design_fit,
        design: CycleReport::new(
            &design_cycle,
            t_evap,
            t_cond,
            config.design.superheat_k,
            config.design.subcool_k,
            &design_metrics,
            Some(&design_perf),
        ),
        actual: CycleReport::new(
            &actual_cycle,
            actual_boundary.t_evap.value,
            actual_boundary.t_cond.value,
            actual_def.superheat_k,
            actual_def.subcool_k,
            &actual_metrics,
            Some(&actual_perf),
        ),
        efficiency_loss_pct: loss,
        warnings,
    })
}

/// Load a configuration file and analyse it against CoolProp.
pub fn run_analysis_file(path: &Path) -> AppResult<AnalysisReport> {
    let config = vc_project::load(path)?;
    run_analysis(&CoolPropModel::new(), &config)
}
