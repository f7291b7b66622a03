//! Property provider trait, query inputs and validation helpers.

use crate::error::{FluidError, FluidResult};
use crate::refrigerant::Refrigerant;
use std::fmt;
use vc_core::units::{Pressure, Temperature, k, pa};

/// Specific enthalpy [J/kg]
pub type SpecEnthalpy = f64;

/// Specific entropy [J/(kg·K)]
pub type SpecEntropy = f64;

/// Quantities a provider can return or accept.
///
/// The first five are state variables. `CriticalTemperature` and
/// `MinTemperature` are fluid constants, answered by [`PropertyProvider::constant`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyKind {
    Pressure,
    Temperature,
    Quality,
    Enthalpy,
    Entropy,
    CriticalTemperature,
    MinTemperature,
}

impl PropertyKind {
    pub fn symbol(&self) -> &'static str {
        match self {
            PropertyKind::Pressure => "P",
            PropertyKind::Temperature => "T",
            PropertyKind::Quality => "Q",
            PropertyKind::Enthalpy => "H",
            PropertyKind::Entropy => "S",
            PropertyKind::CriticalTemperature => "Tcrit",
            PropertyKind::MinTemperature => "Tmin",
        }
    }

    /// SI unit label.
    pub fn unit(&self) -> &'static str {
        match self {
            PropertyKind::Pressure => "Pa",
            PropertyKind::Temperature
            | PropertyKind::CriticalTemperature
            | PropertyKind::MinTemperature => "K",
            PropertyKind::Quality => "-",
            PropertyKind::Enthalpy => "J/kg",
            PropertyKind::Entropy => "J/(kg·K)",
        }
    }

    /// True for kinds that describe a state (valid as query inputs).
    pub fn is_state_variable(&self) -> bool {
        !matches!(
            self,
            PropertyKind::CriticalTemperature | PropertyKind::MinTemperature
        )
    }
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// One independent state variable with its SI value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropertyInput {
    pub kind: PropertyKind,
    pub value: f64,
}

impl PropertyInput {
    pub fn new(kind: PropertyKind, value: f64) -> Self {
        Self { kind, value }
    }

    pub fn pressure(p: Pressure) -> Self {
        Self::new(PropertyKind::Pressure, p.value)
    }

    pub fn temperature(t: Temperature) -> Self {
        Self::new(PropertyKind::Temperature, t.value)
    }

    pub fn quality(q: f64) -> Self {
        Self::new(PropertyKind::Quality, q)
    }

    pub fn enthalpy(h: SpecEnthalpy) -> Self {
        Self::new(PropertyKind::Enthalpy, h)
    }

    pub fn entropy(s: SpecEntropy) -> Self {
        Self::new(PropertyKind::Entropy, s)
    }
}

impl fmt::Display for PropertyInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={} {}", self.kind.symbol(), self.value, self.kind.unit())
    }
}

/// Source of thermophysical properties for pure refrigerants.
///
/// Implementations must be thread-safe (Send + Sync); the dome sampler queries
/// from several threads at once. All values are SI.
///
/// Only [`query`](Self::query) and [`constant`](Self::constant) are required.
/// The typed helpers are thin wrappers that fix the argument kinds.
pub trait PropertyProvider: Send + Sync {
    /// Get the provider name (for logging).
    fn name(&self) -> &str;

    /// Resolve `output` from two independent state variables.
    ///
    /// Fails with [`FluidError::Lookup`] when the state cannot be resolved and
    /// with `NonPhysical`/`InvalidArg` when the inputs are rejected up front.
    fn query(
        &self,
        output: PropertyKind,
        in1: PropertyInput,
        in2: PropertyInput,
        fluid: Refrigerant,
    ) -> FluidResult<f64>;

    /// Fluid constant such as the critical or minimum temperature.
    fn constant(&self, kind: PropertyKind, fluid: Refrigerant) -> FluidResult<f64>;

    /// Saturation pressure at temperature `t` and quality `q`.
    fn saturation_pressure(&self, t: Temperature, q: f64, fluid: Refrigerant) -> FluidResult<Pressure> {
        let p = self.query(
            PropertyKind::Pressure,
            PropertyInput::temperature(t),
            PropertyInput::quality(q),
            fluid,
        )?;
        validation::pressure_output(p)
    }

    /// Saturation temperature at pressure `p` and quality `q`.
    fn saturation_temperature(
        &self,
        p: Pressure,
        q: f64,
        fluid: Refrigerant,
    ) -> FluidResult<Temperature> {
        let t = self.query(
            PropertyKind::Temperature,
            PropertyInput::pressure(p),
            PropertyInput::quality(q),
            fluid,
        )?;
        validation::temperature_output(t)
    }

    fn enthalpy_pt(&self, p: Pressure, t: Temperature, fluid: Refrigerant) -> FluidResult<SpecEnthalpy> {
        self.query(
            PropertyKind::Enthalpy,
            PropertyInput::pressure(p),
            PropertyInput::temperature(t),
            fluid,
        )
    }

    fn enthalpy_pq(&self, p: Pressure, q: f64, fluid: Refrigerant) -> FluidResult<SpecEnthalpy> {
        self.query(
            PropertyKind::Enthalpy,
            PropertyInput::pressure(p),
            PropertyInput::quality(q),
            fluid,
        )
    }

    fn enthalpy_ps(&self, p: Pressure, s: SpecEntropy, fluid: Refrigerant) -> FluidResult<SpecEnthalpy> {
        self.query(
            PropertyKind::Enthalpy,
            PropertyInput::pressure(p),
            PropertyInput::entropy(s),
            fluid,
        )
    }

    fn entropy_ph(&self, p: Pressure, h: SpecEnthalpy, fluid: Refrigerant) -> FluidResult<SpecEntropy> {
        self.query(
            PropertyKind::Entropy,
            PropertyInput::pressure(p),
            PropertyInput::enthalpy(h),
            fluid,
        )
    }

    fn entropy_pt(&self, p: Pressure, t: Temperature, fluid: Refrigerant) -> FluidResult<SpecEntropy> {
        self.query(
            PropertyKind::Entropy,
            PropertyInput::pressure(p),
            PropertyInput::temperature(t),
            fluid,
        )
    }

    fn temperature_ph(&self, p: Pressure, h: SpecEnthalpy, fluid: Refrigerant) -> FluidResult<Temperature> {
        let t = self.query(
            PropertyKind::Temperature,
            PropertyInput::pressure(p),
            PropertyInput::enthalpy(h),
            fluid,
        )?;
        validation::temperature_output(t)
    }

    fn temperature_ps(&self, p: Pressure, s: SpecEntropy, fluid: Refrigerant) -> FluidResult<Temperature> {
        let t = self.query(
            PropertyKind::Temperature,
            PropertyInput::pressure(p),
            PropertyInput::entropy(s),
            fluid,
        )?;
        validation::temperature_output(t)
    }

    fn critical_temperature(&self, fluid: Refrigerant) -> FluidResult<Temperature> {
        validation::temperature_output(self.constant(PropertyKind::CriticalTemperature, fluid)?)
    }

    /// Lowest temperature the backend's equation of state covers.
    fn min_temperature(&self, fluid: Refrigerant) -> FluidResult<Temperature> {
        validation::temperature_output(self.constant(PropertyKind::MinTemperature, fluid)?)
    }
}

/// Validation helpers shared by providers.
pub mod validation {
    use super::*;

    /// Check one state input against the physical range of its kind.
    ///
    /// Pressures and temperatures must be positive, quality must lie in
    /// [0, 1], and enthalpy and entropy only need to be finite.
    pub fn validate_input(input: PropertyInput) -> FluidResult<()> {
        let v = input.value;
        let (ok, what) = match input.kind {
            PropertyKind::Pressure => (v > 0.0, "pressure must be positive and finite"),
            PropertyKind::Temperature => (v > 0.0, "temperature must be positive and finite"),
            PropertyKind::Quality => ((0.0..=1.0).contains(&v), "quality must lie in [0, 1]"),
            PropertyKind::Enthalpy => (true, "enthalpy must be finite"),
            PropertyKind::Entropy => (true, "entropy must be finite"),
            PropertyKind::CriticalTemperature | PropertyKind::MinTemperature => {
                return Err(FluidError::InvalidArg {
                    what: "fluid constants cannot be used as state inputs",
                });
            }
        };
        if ok && v.is_finite() {
            Ok(())
        } else {
            Err(FluidError::NonPhysical { what })
        }
    }

    /// Validate a full two-input query before it reaches a backend.
    pub fn validate_query(
        output: PropertyKind,
        in1: PropertyInput,
        in2: PropertyInput,
    ) -> FluidResult<()> {
        if !output.is_state_variable() {
            return Err(FluidError::InvalidArg {
                what: "fluid constants must be requested through constant()",
            });
        }
        if in1.kind == in2.kind {
            return Err(FluidError::InvalidArg {
                what: "state inputs must be of different kinds",
            });
        }
        validate_input(in1)?;
        validate_input(in2)
    }

    /// Reject non-finite backend output.
    pub fn validate_output(what: &'static str, value: f64) -> FluidResult<f64> {
        if value.is_finite() {
            Ok(value)
        } else {
            Err(FluidError::NonPhysical { what })
        }
    }

    /// A backend temperature result, checked to be a usable absolute temperature.
    pub(crate) fn temperature_output(t: f64) -> FluidResult<Temperature> {
        validate_input(PropertyInput::new(PropertyKind::Temperature, t))?;
        Ok(k(t))
    }

    pub(crate) fn pressure_output(p: f64) -> FluidResult<Pressure> {
        validate_input(PropertyInput::new(PropertyKind::Pressure, p))?;
        Ok(pa(p))
    }
}
