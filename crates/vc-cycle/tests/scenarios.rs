//! End-to-end cycle scenarios against the CoolProp backend.

use proptest::prelude::*;
use vc_core::units::{dk, k, pa, w};
use vc_cycle::metrics::{cop, efficiency_loss_pct};
use vc_cycle::{
    BoundaryConditions, CycleError, FitConfig, FitProblem, LegacyCycle, PolynomialEfficiency,
    RatedPerformance, build_cycle, build_cycle_with_model, fit, pressure_ratio,
};
use vc_fluids::{CoolPropModel, Refrigerant};
use vc_solver::NelderMead;

fn design() -> BoundaryConditions {
    BoundaryConditions::new(k(280.15), k(318.15), dk(5.0), dk(5.0), Refrigerant::R134a)
}

fn oem_cop() -> f64 {
    RatedPerformance::new(w(897_000.0), w(345_500.0)).unwrap().cop()
}

#[test]
fn design_cycle_matches_rating() {
    let model = CoolPropModel::new();
    let (cycle, perf) =
        build_cycle_with_model(&model, &design(), &PolynomialEfficiency::default()).unwrap();

    // PR about 3.1 for R134a at 7/45 °C
    assert!(perf.pressure_ratio > 2.8 && perf.pressure_ratio < 3.4, "{perf:?}");
    assert!(!perf.extrapolated);

    let cop = cop(&cycle).unwrap();
    let reference = oem_cop();
    assert!(
        (cop - reference).abs() <= 0.15 * reference,
        "COP {cop:.3} vs rated {reference:.3}"
    );
}

#[test]
fn sensor_pressures_build_actual_cycle() {
    let model = CoolPropModel::new();
    let boundary = BoundaryConditions::from_pressures(
        &model,
        pa(307_700.0),
        pa(1_244_000.0),
        dk(8.6),
        dk(0.0),
        Refrigerant::R134a,
    )
    .unwrap();
    assert!(boundary.span().value > 10.0);

    let (cycle, perf) =
        build_cycle_with_model(&model, &boundary, &PolynomialEfficiency::default()).unwrap();
    let actual = cop(&cycle).unwrap();
    assert!(actual > 0.0);
    assert!(perf.pressure_ratio > 3.5 && perf.pressure_ratio < 4.5, "{perf:?}");

    // The condenser exit sits on the bubble line with zero subcooling.
    assert!((cycle.condenser_exit.temperature.value - boundary.t_cond.value).abs() < 0.05);

    let loss = efficiency_loss_pct(oem_cop(), actual).unwrap();
    assert!(loss.is_finite());
}

#[test]
fn span_just_below_minimum_is_infeasible() {
    let model = CoolPropModel::new();
    let boundary = BoundaryConditions::new(k(300.0), k(309.999), dk(5.0), dk(5.0), Refrigerant::R134a);
    let err = build_cycle(&model, &boundary, 0.7).unwrap_err();
    assert!(matches!(err, CycleError::InfeasibleBoundaryCondition { .. }));

    let config = FitConfig::new(Refrigerant::R134a, 2.6);
    let problem = FitProblem::new(&model, &config);
    assert_eq!(problem.objective(300.0, 309.999), config.penalty);
}

#[test]
fn throttle_is_isenthalpic_and_build_is_repeatable() {
    let model = CoolPropModel::new();
    let a = build_cycle(&model, &design(), 0.7).unwrap();
    let b = build_cycle(&model, &design(), 0.7).unwrap();
    assert_eq!(a.condenser_exit.enthalpy, a.evaporator_inlet.enthalpy);
    assert_eq!(a, b);
    assert!(a.discharge.temperature.value > a.isentropic_discharge.temperature.value);
}

#[test]
fn legacy_layout_keeps_cop_convention() {
    let model = CoolPropModel::new();
    let cycle = build_cycle(&model, &design(), 0.7).unwrap();
    let legacy = LegacyCycle::from_cycle(&model, &cycle).unwrap();

    let t = legacy.points.map(|p| p.temperature.value);
    assert!((t[LegacyCycle::SATURATED_VAPOR] - 318.15).abs() < 0.1);
    assert!((t[LegacyCycle::SATURATED_LIQUID] - 318.15).abs() < 0.1);
    assert!((legacy.cop().unwrap() - cop(&cycle).unwrap()).abs() < 1e-12);
}

#[test]
fn fit_recovers_reachable_target() {
    let model = CoolPropModel::new();
    let probe = FitConfig::new(Refrigerant::R134a, 2.6);
    let target = FitProblem::new(&model, &probe)
        .fixed_efficiency_cop(278.15, 318.15)
        .unwrap();

    let mut config = FitConfig::new(Refrigerant::R134a, target);
    config.initial = (283.15, 313.15);
    let result = fit(&model, &config, &NelderMead::default()).unwrap();

    assert!(result.converged, "{result:?}");
    assert!(result.residual < 1e-3);
}

#[test]
fn fit_rated_cop_stays_in_bounds() {
    let model = CoolPropModel::new();
    let config = FitConfig::new(Refrigerant::R134a, 2.6);
    let result = fit(&model, &config, &NelderMead::default()).unwrap();

    assert!(config.bounds.contains(result.t_evap.value, result.t_cond.value));
    assert_eq!(result.converged, result.residual <= config.tolerance);
}

#[test]
fn fit_unreachable_target_is_reported() {
    let model = CoolPropModel::new();
    let config = FitConfig::new(Refrigerant::R134a, 1.0);
    let result = fit(&model, &config, &NelderMead::default()).unwrap();
    assert!(!result.converged);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn pressure_ratio_above_one_for_positive_lift(t_evap in 250.0_f64..300.0, lift in 0.5_f64..60.0) {
        let model = CoolPropModel::new();
        let pr = pressure_ratio(&model, k(t_evap), k(t_evap + lift), Refrigerant::R134a).unwrap();
        prop_assert!(pr > 1.0);
    }
}
