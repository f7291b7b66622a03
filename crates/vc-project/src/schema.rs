//! Analysis configuration schema.

use serde::{Deserialize, Serialize};
use vc_cycle::fit::{DEFAULT_EFFICIENCY_GUESS, DEFAULT_PENALTY, DEFAULT_TOLERANCE};
use vc_cycle::{
    ConstantEfficiency, CycleResult, DomainPolicy, EfficiencyModel, MIN_SPAN_K,
    PolynomialEfficiency, TabulatedEfficiency, TemperatureBounds,
};
use vc_fluids::Refrigerant;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisConfig {
    pub version: u32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    pub fluid: Refrigerant,
    #[serde(default)]
    pub compressor: CompressorDef,
    pub design: DesignDef,
    pub actual: ActualDef,
    #[serde(default)]
    pub fit: FitDef,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum DomainDef {
    #[default]
    Extrapolate,
    Strict,
}

impl From<DomainDef> for DomainPolicy {
    fn from(d: DomainDef) -> Self {
        match d {
            DomainDef::Extrapolate => DomainPolicy::Extrapolate,
            DomainDef::Strict => DomainPolicy::Strict,
        }
    }
}

/// Compressor efficiency model. Omitted fields take the built-in curve's values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CompressorDef {
    Polynomial {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        coefficients: Option<[f64; 3]>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        clearance: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        polytropic_exponent: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pressure_ratio_range: Option<[f64; 2]>,
        #[serde(default)]
        domain: DomainDef,
    },
    Table {
        pressure_ratios: Vec<f64>,
        isentropic: Vec<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        volumetric: Option<Vec<f64>>,
        #[serde(default)]
        domain: DomainDef,
    },
    Constant {
        isentropic: f64,
    },
}

impl Default for CompressorDef {
    fn default() -> Self {
        CompressorDef::Polynomial {
            coefficients: None,
            clearance: None,
            polytropic_exponent: None,
            pressure_ratio_range: None,
            domain: DomainDef::Extrapolate,
        }
    }
}

impl CompressorDef {
    /// Construct the efficiency model this definition describes.
    pub fn build(&self) -> CycleResult<Box<dyn EfficiencyModel>> {
        Ok(match self {
            CompressorDef::Polynomial {
                coefficients,
                clearance,
                polytropic_exponent,
                pressure_ratio_range,
                domain,
            } => {
                let d = PolynomialEfficiency::default();
                let [lo, hi] = pressure_ratio_range.unwrap_or([d.pr_min, d.pr_max]);
                Box::new(PolynomialEfficiency::new(
                    coefficients.unwrap_or(d.coefficients),
                    clearance.unwrap_or(d.clearance),
                    polytropic_exponent.unwrap_or(d.polytropic_exponent),
                    (lo, hi),
                    (*domain).into(),
                )?)
            }
            CompressorDef::Table {
                pressure_ratios,
                isentropic,
                volumetric,
                domain,
            } => Box::new(TabulatedEfficiency::new(
                pressure_ratios.clone(),
                isentropic.clone(),
                volumetric.clone(),
                (*domain).into(),
            )?),
            CompressorDef::Constant { isentropic } => {
                Box::new(ConstantEfficiency::new(*isentropic)?)
            }
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DesignDef {
    pub rating: RatingDef,
    pub superheat_k: f64,
    pub subcool_k: f64,
    pub temperatures: DesignTemperaturesDef,
}

/// Manufacturer rating point.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RatingDef {
    pub capacity_w: f64,
    pub power_input_w: f64,
}

/// How the design saturation temperatures are obtained.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum DesignTemperaturesDef {
    /// Fit to the rated COP.
    Fitted {
        #[serde(default)]
        initial: TemperaturePairDef,
        #[serde(default)]
        bounds: TemperatureBoundsDef,
    },
    Given {
        t_evap_k: f64,
        t_cond_k: f64,
    },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TemperaturePairDef {
    pub t_evap_k: f64,
    pub t_cond_k: f64,
}

impl Default for TemperaturePairDef {
    fn default() -> Self {
        Self {
            t_evap_k: 280.15,
            t_cond_k: 318.15,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TemperatureBoundsDef {
    pub t_evap_k: [f64; 2],
    pub t_cond_k: [f64; 2],
}

impl Default for TemperatureBoundsDef {
    fn default() -> Self {
        let d = TemperatureBounds::default();
        Self {
            t_evap_k: [d.t_evap.0, d.t_evap.1],
            t_cond_k: [d.t_cond.0, d.t_cond.1],
        }
    }
}

impl From<TemperatureBoundsDef> for TemperatureBounds {
    fn from(b: TemperatureBoundsDef) -> Self {
        TemperatureBounds {
            t_evap: (b.t_evap_k[0], b.t_evap_k[1]),
            t_cond: (b.t_cond_k[0], b.t_cond_k[1]),
        }
    }
}

/// Field measurements for the actual cycle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ActualDef {
    pub suction_pressure_pa: f64,
    pub discharge_pressure_pa: f64,
    pub superheat_k: f64,
    #[serde(default)]
    pub subcool_k: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum MinimizerDef {
    #[default]
    NelderMead,
    Gradient,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FitDef {
    pub efficiency_guess: f64,
    pub tolerance: f64,
    pub penalty: f64,
    pub min_span_k: f64,
    pub require_convergence: bool,
    pub method: MinimizerDef,
}

impl Default for FitDef {
    fn default() -> Self {
        Self {
            efficiency_guess: DEFAULT_EFFICIENCY_GUESS,
            tolerance: DEFAULT_TOLERANCE,
            penalty: DEFAULT_PENALTY,
            min_span_k: MIN_SPAN_K,
            require_convergence: false,
            method: MinimizerDef::NelderMead,
        }
    }
}
