//! Smoke tests for the application service layer (CoolProp backend).

use std::path::{Path, PathBuf};
use vc_app::*;
use vc_cycle::TemperatureBounds;
use vc_fluids::{CoolPropModel, Refrigerant};
use vc_project::{DesignTemperaturesDef, MinimizerDef};

fn config_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../../configs")
        .join(name)
}

fn chiller() -> vc_project::AnalysisConfig {
    vc_project::load_yaml(&config_path("r134a_chiller.yaml")).unwrap()
}

#[test]
fn fitted_chiller_analysis() {
    let report = run_analysis_file(&config_path("r134a_chiller.yaml")).unwrap();

    assert_eq!(report.fluid, "R134a");
    assert!((report.rated_cop - 897_000.0 / 345_500.0).abs() < 1e-12);
    let fit = report.design_fit.as_ref().expect("fitted mode reports the fit");
    assert_eq!(fit.converged, fit.residual <= 1e-3);
    assert!(fit.t_evap_k >= 273.15 && fit.t_evap_k <= 288.15);
    assert!(fit.t_cond_k >= 308.15 && fit.t_cond_k <= 328.15);

    assert_eq!(report.design.points.len(), 4);
    assert!(report.design.cop > 0.0 && report.actual.cop > 0.0);
    let q = report.design.capacity_w.unwrap();
    assert!((q - 897_000.0).abs() < 1.0, "design capacity {q}");
    assert!(report.actual.capacity_w.is_none());
    assert!(report.efficiency_loss_pct.is_finite());

    // Sensor-derived saturation temperatures: about 1 °C and 48 °C
    assert!(report.actual.t_evap_k > 272.0 && report.actual.t_evap_k < 277.0);
    assert!(report.actual.t_cond_k > 318.0 && report.actual.t_cond_k < 324.0);
}

#[test]
fn given_temperatures_with_table_model() {
    let report = run_analysis_file(&config_path("r134a_given_table.json")).unwrap();
    assert!(report.design_fit.is_none());
    assert_eq!(report.design.t_evap_k, 280.15);
    assert_eq!(report.company.as_deref(), Some("Service contractor"));
    assert!(!report.design.extrapolated && !report.actual.extrapolated);
    assert!(report.warnings.is_empty(), "{:?}", report.warnings);
}

#[test]
fn unreachable_rating_warns_or_fails() {
    let model = CoolPropModel::new();
    let mut config = chiller();
    config.design.rating.power_input_w = config.design.rating.capacity_w;

    let report = run_analysis(&model, &config).unwrap();
    assert!(!report.design_fit.as_ref().unwrap().converged);
    assert!(report.warnings.iter().any(|w| w
        .starts_with("no boundary temperatures found matching target COP within bounds")));

    config.fit.require_convergence = true;
    let err = run_analysis(&model, &config).unwrap_err();
    assert!(matches!(err, AppError::FitNotConverged { .. }), "{err}");
}

#[test]
fn bad_sensor_pressure_names_actual_cycle() {
    let mut config = chiller();
    config.design.temperatures = DesignTemperaturesDef::Given {
        t_evap_k: 280.15,
        t_cond_k: 318.15,
    };
    config.actual.suction_pressure_pa = 1.0;

    let err = run_analysis(&CoolPropModel::new(), &config).unwrap_err();
    assert!(matches!(err, AppError::ActualCycle { .. }));
    assert!(
        err.to_string()
            .starts_with("cannot evaluate actual cycle from sensor inputs:"),
        "{err}"
    );
}

#[test]
fn report_encodings() {
    let report = run_analysis_file(&config_path("r134a_given_table.json")).unwrap();

    let text = format_report(&report, ReportFormat::Text).unwrap();
    assert!(text.contains("Design cycle"));
    assert!(text.contains("Actual cycle"));
    assert!(text.contains("efficiency loss"));

    let json = format_report(&report, ReportFormat::Json).unwrap();
    let back: AnalysisReport = serde_json::from_str(&json).unwrap();
    assert_eq!(back, report);

    assert!("yml".parse::<ReportFormat>().is_ok());
    assert!("pdf".parse::<ReportFormat>().is_err());
}

#[test]
fn single_cycle_requests() {
    let model = CoolPropModel::new();
    let mut request = CycleRequest {
        fluid: Refrigerant::R134a,
        t_evap_k: 280.15,
        t_cond_k: 318.15,
        superheat_k: 5.0,
        subcool_k: 5.0,
        eta: None,
        legacy: false,
    };
    let curve = evaluate_cycle(&model, &request).unwrap();
    assert!(curve.volumetric_efficiency.is_some());

    request.eta = Some(0.7);
    request.legacy = true;
    let legacy = evaluate_cycle(&model, &request).unwrap();
    assert_eq!(legacy.points.len(), 6);
    assert_eq!(legacy.isentropic_efficiency, 0.7);
    assert!(render_cycle_text(&legacy).contains("COP"));
}

#[test]
fn sensor_pressure_cycle() {
    let model = CoolPropModel::new();
    let request = SensorRequest {
        fluid: Refrigerant::R134a,
        suction_pressure_pa: 307.7e3,
        discharge_pressure_pa: 1244e3,
        superheat_k: 8.6,
        subcool_k: 0.0,
        eta: None,
        legacy: false,
    };
    let report = evaluate_sensor_cycle(&model, &request).unwrap();
    assert!(report.t_evap_k > 272.0 && report.t_evap_k < 277.0);
    assert!((report.points[0].pressure_pa / 307.7e3 - 1.0).abs() < 1e-4);
    assert!(report.pressure_ratio > 3.5 && report.pressure_ratio < 4.5);

    let inverted = SensorRequest {
        discharge_pressure_pa: 200e3,
        ..request
    };
    assert!(matches!(
        evaluate_sensor_cycle(&model, &inverted),
        Err(AppError::ActualCycle { .. })
    ));
}

#[test]
fn standalone_fit() {
    let request = FitRequest {
        fluid: Refrigerant::R134a,
        target_cop: 3.5,
        superheat_k: 5.0,
        subcool_k: 5.0,
        bounds: TemperatureBounds::default(),
        initial: None,
        method: MinimizerDef::NelderMead,
    };
    let report = run_fit(&CoolPropModel::new(), &request).unwrap();
    assert_eq!(report.method, "nelder-mead");
    assert_eq!(report.converged, report.residual <= 1e-3);

    let outside = FitRequest {
        initial: Some((250.0, 318.15)),
        ..request
    };
    assert!(matches!(
        run_fit(&CoolPropModel::new(), &outside),
        Err(AppError::InvalidInput(_))
    ));
}
