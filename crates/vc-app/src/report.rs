//! Serializable report types and the plain-text summary.

use serde::{Deserialize, Serialize};
use std::fmt::Write;
use vc_core::units::constants::kelvin_to_celsius;
use vc_cycle::metrics::CycleMetrics;
use vc_cycle::{CompressorPerformance, Cycle, CyclePoint, FitResult, LegacyCycle};

/// One state point in SI units.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PointReport {
    pub pressure_pa: f64,
    pub temperature_k: f64,
    pub enthalpy_j_per_kg: f64,
    pub entropy_j_per_kg_k: f64,
}

impl From<&CyclePoint> for PointReport {
    fn from(p: &CyclePoint) -> Self {
        Self {
            pressure_pa: p.pressure.value,
            temperature_k: p.temperature.value,
            enthalpy_j_per_kg: p.enthalpy,
            entropy_j_per_kg_k: p.entropy,
        }
    }
}

/// A built cycle with its metrics.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CycleReport {
    pub fluid: String,
    pub t_evap_k: f64,
    pub t_cond_k: f64,
    pub superheat_k: f64,
    pub subcool_k: f64,
    pub pressure_ratio: f64,
    pub isentropic_efficiency: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volumetric_efficiency: Option<f64>,
    #[serde(default)]
    pub extrapolated: bool,
    pub cop: f64,
    pub refrigeration_effect_j_per_kg: f64,
    pub specific_work_j_per_kg: f64,
    pub specific_heat_rejection_j_per_kg: f64,
    /// Path-ordered points: four, or six in the legacy layout
    pub points: Vec<PointReport>,
    pub isentropic_discharge: PointReport,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mass_flow_kg_s: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity_w: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compressor_power_w: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heat_rejection_w: Option<f64>,
}

impl CycleReport {
    pub(crate) fn new(
        cycle: &Cycle,
        t_evap_k: f64,
        t_cond_k: f64,
        superheat_k: f64,
        subcool_k: f64,
        metrics: &CycleMetrics,
        perf: Option<&CompressorPerformance>,
    ) -> Self {
        Self {
            fluid: cycle.fluid.to_string(),
            t_evap_k,
            t_cond_k,
            superheat_k,
            subcool_k,
            pressure_ratio: metrics.pressure_ratio,
            isentropic_efficiency: cycle.isentropic_efficiency,
            volumetric_efficiency: perf.map(|p| p.volumetric),
            extrapolated: perf.is_some_and(|p| p.extrapolated),
            cop: metrics.cop,
            refrigeration_effect_j_per_kg: metrics.refrigeration_effect,
            specific_work_j_per_kg: metrics.specific_work,
            specific_heat_rejection_j_per_kg: metrics.specific_heat_rejection,
            points: cycle.points().iter().map(PointReport::from).collect(),
            isentropic_discharge: (&cycle.isentropic_discharge).into(),
            mass_flow_kg_s: metrics.mass_flow.map(|m| m.value),
            capacity_w: metrics.capacity.map(|q| q.value),
            compressor_power_w: metrics.compressor_power.map(|q| q.value),
            heat_rejection_w: metrics.heat_rejection.map(|q| q.value),
        }
    }

    /// Replace the points with the six-point layout.
    pub(crate) fn with_legacy_points(mut self, legacy: &LegacyCycle) -> Self {
        self.points = legacy.points.iter().map(PointReport::from).collect();
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FitReport {
    pub method: String,
    pub target_cop: f64,
    pub t_evap_k: f64,
    pub t_cond_k: f64,
    pub converged: bool,
    pub residual: f64,
    pub iterations: usize,
    pub evaluations: usize,
    pub termination: String,
}

impl FitReport {
    pub(crate) fn new(method: &str, target_cop: f64, fit: &FitResult) -> Self {
        Self {
            method: method.to_string(),
            target_cop,
            t_evap_k: fit.t_evap.value,
            t_cond_k: fit.t_cond.value,
            converged: fit.converged,
            residual: fit.residual,
            iterations: fit.iterations,
            evaluations: fit.evaluations,
            termination: fit.termination.to_string(),
        }
    }
}

/// Design against actual performance for one machine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisReport {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    pub fluid: String,
    /// RFC 3339
    pub timestamp: String,
    pub rated_capacity_w: f64,
    pub rated_power_input_w: f64,
    pub rated_cop: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub design_fit: Option<FitReport>,
    pub design: CycleReport,
    pub actual: CycleReport,
    /// Actual COP shortfall against the computed design COP [%]
    pub efficiency_loss_pct: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

fn write_cycle(out: &mut String, title: &str, c: &CycleReport) {
    let _ = writeln!(out, "{title}");
    let _ = writeln!(
        out,
        "  T_evap {:>7.2} °C   T_cond {:>7.2} °C   SH {:.1} K   SC {:.1} K",
        kelvin_to_celsius(c.t_evap_k),
        kelvin_to_celsius(c.t_cond_k),
        c.superheat_k,
        c.subcool_k
    );
    let _ = write!(
        out,
        "  PR {:.3}   eta_s {:.3}",
        c.pressure_ratio, c.isentropic_efficiency
    );
    if let Some(v) = c.volumetric_efficiency {
        let _ = write!(out, "   eta_v {v:.3}");
    }
    if c.extrapolated {
        let _ = write!(out, "   (extrapolated)");
    }
    let _ = writeln!(out, "\n  COP {:.3}", c.cop);
    let _ = writeln!(
        out,
        "  {:>3}  {:>12}  {:>9}  {:>12}  {:>14}",
        "#", "P [kPa]", "T [°C]", "h [kJ/kg]", "s [kJ/(kg·K)]"
    );
    for (i, p) in c.points.iter().enumerate() {
        let _ = writeln!(
            out,
            "  {:>3}  {:>12.2}  {:>9.2}  {:>12.3}  {:>14.4}",
            i,
            p.pressure_pa / 1e3,
            kelvin_to_celsius(p.temperature_k),
            p.enthalpy_j_per_kg / 1e3,
            p.entropy_j_per_kg_k / 1e3
        );
    }
    if let (Some(m), Some(q), Some(w)) = (c.mass_flow_kg_s, c.capacity_w, c.compressor_power_w) {
        let _ = writeln!(
            out,
            "  m_dot {m:.3} kg/s   Q_evap {:.1} kW   W_comp {:.1} kW",
            q / 1e3,
            w / 1e3
        );
    }
}

/// Render a single cycle as text.
pub fn render_cycle_text(c: &CycleReport) -> String {
    let mut out = String::new();
    write_cycle(&mut out, &format!("Cycle ({})", c.fluid), c);
    out
}

/// Render an analysis report as a plain-text summary.
pub fn render_text(report: &AnalysisReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Refrigeration cycle analysis: {}", report.name);
    if let Some(company) = &report.company {
        let _ = writeln!(out, "Company: {company}");
    }
    if let Some(site) = &report.site {
        let _ = writeln!(out, "Site: {site}");
    }
    let _ = writeln!(out, "Fluid: {}   Date: {}", report.fluid, report.timestamp);
    let _ = writeln!(
        out,
        "Rated: {:.1} kW cooling / {:.1} kW input (COP {:.3})\n",
        report.rated_capacity_w / 1e3,
        report.rated_power_input_w / 1e3,
        report.rated_cop
    );

    if let Some(fit) = &report.design_fit {
        let _ = writeln!(
            out,
            "Design fit ({}): target COP {:.3}, residual {:.3e}, {} ({} evaluations)\n",
            fit.method,
            fit.target_cop,
            fit.residual,
            if fit.converged { "converged" } else { "NOT converged" },
            fit.evaluations
        );
    }

    write_cycle(&mut out, "Design cycle", &report.design);
    let _ = writeln!(out);
    write_cycle(&mut out, "Actual cycle", &report.actual);
    let _ = writeln!(
        out,
        "\nCOP design {:.2}   COP actual {:.2}   efficiency loss {:.1}%",
        report.design.cop, report.actual.cop, report.efficiency_loss_pct
    );
    for w in &report.warnings {
        let _ = writeln!(out, "warning: {w}");
    }
    out
}
