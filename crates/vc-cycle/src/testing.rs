//! Analytic property doubles for unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use vc_fluids::{FluidError, FluidResult, PropertyInput, PropertyKind, PropertyProvider, Refrigerant};

/// Simple closed-form refrigerant, roughly R134a-shaped.
///
/// Clausius-Clapeyron saturation curve, constant liquid heat capacity,
/// latent heat falling linearly with temperature and an ideal superheated
/// vapour. Exact in its own terms, so tests can check algebra without a
/// CoolProp dependency.
pub struct ToyRefrigerant {
    calls: AtomicUsize,
}

const P0: f64 = 101_325.0;
const T0: f64 = 247.0;
const A: f64 = 11.1;
const T_REF: f64 = 233.15;
const CL: f64 = 1_400.0;
const CP: f64 = 1_000.0;
const L0: f64 = 230_000.0;
const L_SLOPE: f64 = 780.0;

impl ToyRefrigerant {
    pub fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }

    fn p_sat(t: f64) -> f64 {
        P0 * (A * (1.0 - T0 / t)).exp()
    }

    fn t_sat(p: f64) -> f64 {
        T0 / (1.0 - (p / P0).ln() / A)
    }

    fn h_liquid(t: f64) -> f64 {
        CL * (t - T_REF)
    }

    fn s_liquid(t: f64) -> f64 {
        CL * (t / T_REF).ln()
    }

    fn latent(ts: f64) -> f64 {
        L0 - L_SLOPE * (ts - T_REF)
    }

    /// (T, h, s) from pressure and one of enthalpy/entropy/temperature/quality.
    fn state(p: f64, other: PropertyInput) -> FluidResult<(f64, f64, f64)> {
        let ts = Self::t_sat(p);
        let (hl, sl, l) = (Self::h_liquid(ts), Self::s_liquid(ts), Self::latent(ts));
        let (hv, sv) = (hl + l, sl + l / ts);
        let x = other.value;
        let out = match other.kind {
            PropertyKind::Quality => (ts, hl + x * l, sl + x * l / ts),
            PropertyKind::Temperature if x < ts => (x, Self::h_liquid(x), Self::s_liquid(x)),
            PropertyKind::Temperature => (x, hv + CP * (x - ts), sv + CP * (x / ts).ln()),
            PropertyKind::Enthalpy if x < hl => {
                let t = T_REF + x / CL;
                (t, x, Self::s_liquid(t))
            }
            PropertyKind::Enthalpy if x > hv => {
                let t = ts + (x - hv) / CP;
                (t, x, sv + CP * (t / ts).ln())
            }
            PropertyKind::Enthalpy => (ts, x, sl + (x - hl) / ts),
            PropertyKind::Entropy if x < sl => {
                let t = T_REF * (x / CL).exp();
                (t, Self::h_liquid(t), x)
            }
            PropertyKind::Entropy if x > sv => {
                let t = ts * ((x - sv) / CP).exp();
                (t, hv + CP * (t - ts), x)
            }
            PropertyKind::Entropy => (ts, hl + (x - sl) * ts, x),
            _ => return Err(FluidError::NotSupported { what: "toy input pair" }),
        };
        Ok(out)
    }
}

impl PropertyProvider for ToyRefrigerant {
    fn name(&self) -> &str {
        "toy"
    }

    fn query(
        &self,
        output: PropertyKind,
        in1: PropertyInput,
        in2: PropertyInput,
        _fluid: Refrigerant,
    ) -> FluidResult<f64> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        vc_fluids::validation::validate_query(output, in1, in2)?;
        if in1.kind == PropertyKind::Temperature && in2.kind == PropertyKind::Quality {
            return match output {
                PropertyKind::Pressure => Ok(Self::p_sat(in1.value)),
                _ => Self::state(Self::p_sat(in1.value), in2).map(|(t, h, s)| match output {
                    PropertyKind::Temperature => t,
                    PropertyKind::Enthalpy => h,
                    _ => s,
                }),
            };
        }
        if in1.kind != PropertyKind::Pressure {
            return Err(FluidError::NotSupported { what: "toy input pair" });
        }
        let (t, h, s) = Self::state(in1.value, in2)?;
        match output {
            PropertyKind::Pressure => Ok(in1.value),
            PropertyKind::Temperature => Ok(t),
            PropertyKind::Enthalpy => Ok(h),
            PropertyKind::Entropy => Ok(s),
            _ => Err(FluidError::NotSupported { what: "toy output" }),
        }
    }

    fn constant(&self, kind: PropertyKind, _fluid: Refrigerant) -> FluidResult<f64> {
        match kind {
            PropertyKind::CriticalTemperature => Ok(374.0),
            PropertyKind::MinTemperature => Ok(170.0),
            _ => Err(FluidError::InvalidArg { what: "not a constant" }),
        }
    }
}

/// Fails every query with a lookup error naming the state.
pub struct FailingProvider;

impl PropertyProvider for FailingProvider {
    fn name(&self) -> &str {
        "failing"
    }

    fn query(
        &self,
        output: PropertyKind,
        in1: PropertyInput,
        in2: PropertyInput,
        fluid: Refrigerant,
    ) -> FluidResult<f64> {
        Err(FluidError::Lookup {
            output,
            in1,
            in2,
            fluid,
            message: "backend unavailable".into(),
        })
    }

    fn constant(&self, _kind: PropertyKind, _fluid: Refrigerant) -> FluidResult<f64> {
        Err(FluidError::Backend {
            message: "backend unavailable".into(),
        })
    }
}
