//! Compressor efficiency models.
//!
//! A model maps the compressor pressure ratio to an isentropic efficiency and a
//! volumetric efficiency. Whatever the curve says, the isentropic efficiency
//! handed to the builder lies in `[MIN_EFFICIENCY, 1]` and the volumetric
//! efficiency in `[0, 1]`.

use crate::error::{CycleError, CycleResult};
use tracing::warn;
use vc_core::{clamp, lerp};

/// Floor for isentropic efficiency after clamping.
pub const MIN_EFFICIENCY: f64 = 0.05;

/// What to do with a pressure ratio outside a model's fitted range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DomainPolicy {
    /// Evaluate the curve anyway (degraded accuracy, still clamped).
    #[default]
    Extrapolate,
    /// Fail with [`CycleError::ModelDomain`].
    Strict,
}

/// Compressor efficiencies at one pressure ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompressorPerformance {
    pub pressure_ratio: f64,
    /// Isentropic efficiency in `[MIN_EFFICIENCY, 1]`
    pub isentropic: f64,
    /// Volumetric efficiency in `[0, 1]`
    pub volumetric: f64,
    /// True when the ratio fell outside the fitted domain
    pub extrapolated: bool,
}

/// Pressure ratio → compressor efficiencies. Must be deterministic.
pub trait EfficiencyModel: Send + Sync {
    fn name(&self) -> &str;

    fn evaluate(&self, pressure_ratio: f64) -> CycleResult<CompressorPerformance>;
}

/// Clearance-volume volumetric efficiency `1 + C - C * PR^(1/n)`.
pub fn clearance_volumetric(pressure_ratio: f64, clearance: f64, polytropic_exponent: f64) -> f64 {
    1.0 + clearance - clearance * pressure_ratio.powf(1.0 / polytropic_exponent)
}

/// Shared domain handling: reject nonsense ratios, then apply the policy.
fn check_domain(
    pressure_ratio: f64,
    min: f64,
    max: f64,
    policy: DomainPolicy,
    model: &str,
) -> CycleResult<bool> {
    let outside = pressure_ratio < min || pressure_ratio > max;
    if !pressure_ratio.is_finite() || pressure_ratio <= 0.0 {
        return Err(CycleError::ModelDomain {
            pressure_ratio,
            min,
            max,
        });
    }
    if outside {
        if policy == DomainPolicy::Strict {
            return Err(CycleError::ModelDomain {
                pressure_ratio,
                min,
                max,
            });
        }
        warn!(model, pressure_ratio, min, max, "extrapolating compressor efficiency");
    }
    Ok(outside)
}

fn finish(pressure_ratio: f64, isentropic: f64, volumetric: f64, extrapolated: bool) -> CompressorPerformance {
    CompressorPerformance {
        pressure_ratio,
        isentropic: clamp(isentropic, MIN_EFFICIENCY, 1.0),
        volumetric: clamp(volumetric, 0.0, 1.0),
        extrapolated,
    }
}

/// Quadratic isentropic efficiency curve with a clearance-volume volumetric model.
///
/// Defaults describe an overall (shaft and motor inclusive) efficiency for a
/// screw chiller compressor, about 0.41 at PR 3.1 and falling monotonically
/// over `[1.2, 10]`.
#[derive(Debug, Clone, PartialEq)]
pub struct PolynomialEfficiency {
    /// `c0 + c1 * PR + c2 * PR^2`
    pub coefficients: [f64; 3],
    /// Clearance volume fraction C
    pub clearance: f64,
    /// Polytropic exponent n of the re-expansion
    pub polytropic_exponent: f64,
    pub pr_min: f64,
    pub pr_max: f64,
    pub policy: DomainPolicy,
}

impl Default for PolynomialEfficiency {
    fn default() -> Self {
        Self {
            coefficients: [0.55, -0.05, 0.002],
            clearance: 0.05,
            polytropic_exponent: 1.1,
            pr_min: 1.2,
            pr_max: 10.0,
            policy: DomainPolicy::Extrapolate,
        }
    }
}

impl PolynomialEfficiency {
    pub fn new(
        coefficients: [f64; 3],
        clearance: f64,
        polytropic_exponent: f64,
        (pr_min, pr_max): (f64, f64),
        policy: DomainPolicy,
    ) -> CycleResult<Self> {
        if coefficients.iter().any(|c| !c.is_finite()) {
            return Err(CycleError::InvalidArg {
                what: "efficiency coefficients must be finite",
            });
        }
        if !(0.0..1.0).contains(&clearance) {
            return Err(CycleError::InvalidArg {
                what: "clearance fraction must lie in [0, 1)",
            });
        }
        if !polytropic_exponent.is_finite() || polytropic_exponent <= 0.0 {
            return Err(CycleError::InvalidArg {
                what: "polytropic exponent must be positive",
            });
        }
        if !(pr_min > 0.0 && pr_min < pr_max && pr_max.is_finite()) {
            return Err(CycleError::InvalidArg {
                what: "pressure ratio domain must satisfy 0 < min < max",
            });
        }
        Ok(Self {
            coefficients,
            clearance,
            polytropic_exponent,
            pr_min,
            pr_max,
            policy,
        })
    }

    pub fn with_policy(mut self, policy: DomainPolicy) -> Self {
        self.policy = policy;
        self
    }
}

impl EfficiencyModel for PolynomialEfficiency {
    fn name(&self) -> &str {
        "polynomial"
    }

    fn evaluate(&self, pressure_ratio: f64) -> CycleResult<CompressorPerformance> {
        let extrapolated = check_domain(
            pressure_ratio,
            self.pr_min,
            self.pr_max,
            self.policy,
            self.name(),
        )?;
        let [c0, c1, c2] = self.coefficients;
        let isentropic = c0 + c1 * pressure_ratio + c2 * pressure_ratio * pressure_ratio;
        let volumetric =
            clearance_volumetric(pressure_ratio, self.clearance, self.polytropic_exponent);
        Ok(finish(pressure_ratio, isentropic, volumetric, extrapolated))
    }
}

/// Piecewise-linear interpolation of manufacturer data.
///
/// Outside the table the end segments are extended linearly (or rejected under
/// [`DomainPolicy::Strict`]). Without a volumetric column the clearance model
/// with default parameters supplies the volumetric efficiency.
#[derive(Debug, Clone, PartialEq)]
pub struct TabulatedEfficiency {
    ratios: Vec<f64>,
    isentropic: Vec<f64>,
    volumetric: Option<Vec<f64>>,
    policy: DomainPolicy,
}

impl TabulatedEfficiency {
    pub fn new(
        ratios: Vec<f64>,
        isentropic: Vec<f64>,
        volumetric: Option<Vec<f64>>,
        policy: DomainPolicy,
    ) -> CycleResult<Self> {
        if ratios.len() < 2 {
            return Err(CycleError::InvalidArg {
                what: "efficiency table needs at least two points",
            });
        }
        if isentropic.len() != ratios.len()
            || volumetric.as_ref().is_some_and(|v| v.len() != ratios.len())
        {
            return Err(CycleError::InvalidArg {
                what: "efficiency table columns must have equal length",
            });
        }
        if ratios.iter().chain(&isentropic).any(|v| !v.is_finite())
            || volumetric.iter().flatten().any(|v| !v.is_finite())
        {
            return Err(CycleError::InvalidArg {
                what: "efficiency table values must be finite",
            });
        }
        if ratios[0] <= 0.0 || ratios.windows(2).any(|w| w[1] <= w[0]) {
            return Err(CycleError::InvalidArg {
                what: "table pressure ratios must be positive and strictly increasing",
            });
        }
        Ok(Self {
            ratios,
            isentropic,
            volumetric,
            policy,
        })
    }

    pub fn domain(&self) -> (f64, f64) {
        // Length checked in new().
        (self.ratios[0], self.ratios[self.ratios.len() - 1])
    }

    fn interpolate(&self, values: &[f64], x: f64) -> f64 {
        let n = self.ratios.len();
        // Segment index: first segment whose right end is >= x, clamped to the ends.
        let i = self.ratios[1..n - 1].partition_point(|&r| r < x);
        lerp(
            self.ratios[i],
            values[i],
            self.ratios[i + 1],
            values[i + 1],
            x,
        )
    }
}

impl EfficiencyModel for TabulatedEfficiency {
    fn name(&self) -> &str {
        "table"
    }

    fn evaluate(&self, pressure_ratio: f64) -> CycleResult<CompressorPerformance> {
        let (min, max) = self.domain();
        let extrapolated = check_domain(pressure_ratio, min, max, self.policy, self.name())?;
        let isentropic = self.interpolate(&self.isentropic, pressure_ratio);
        let volumetric = match &self.volumetric {
            Some(v) => self.interpolate(v, pressure_ratio),
            None => {
                let d = PolynomialEfficiency::default();
                clearance_volumetric(pressure_ratio, d.clearance, d.polytropic_exponent)
            }
        };
        Ok(finish(pressure_ratio, isentropic, volumetric, extrapolated))
    }
}

/// Fixed efficiency, independent of pressure ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantEfficiency {
    pub isentropic: f64,
    pub volumetric: f64,
}

impl ConstantEfficiency {
    pub fn new(isentropic: f64) -> CycleResult<Self> {
        if !(isentropic > 0.0 && isentropic <= 1.0) {
            return Err(CycleError::InvalidArg {
                what: "isentropic efficiency must lie in (0, 1]",
            });
        }
        Ok(Self {
            isentropic,
            volumetric: 1.0,
        })
    }
}

impl EfficiencyModel for ConstantEfficiency {
    fn name(&self) -> &str {
        "constant"
    }

    fn evaluate(&self, pressure_ratio: f64) -> CycleResult<CompressorPerformance> {
        check_domain(pressure_ratio, 0.0, f64::MAX, DomainPolicy::Extrapolate, self.name())?;
        Ok(finish(pressure_ratio, self.isentropic, self.volumetric, false))
    }
}
