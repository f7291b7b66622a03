//! Saturation dome sampling.
//!
//! Samples the bubble (Q=0) and dew (Q=1) curves on an evenly spaced
//! temperature grid between just above the fluid's minimum temperature and just
//! below its critical temperature. Points are independent, so they are
//! evaluated in parallel with rayon.

use crate::error::{FluidError, FluidResult};
use crate::property::{PropertyInput, PropertyKind, PropertyProvider, SpecEnthalpy, SpecEntropy};
use crate::refrigerant::Refrigerant;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;
use vc_core::units::k;

/// Default number of temperatures sampled across the dome.
pub const DEFAULT_DOME_POINTS: usize = 300;

/// Offset above the minimum temperature [K].
const T_MIN_OFFSET_K: f64 = 1.0;

/// Offset below the critical temperature [K].
const T_CRIT_OFFSET_K: f64 = 0.1;

/// One saturated state on either curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SaturationState {
    /// Pressure [Pa]
    pub pressure: f64,
    /// Specific enthalpy [J/kg]
    pub enthalpy: SpecEnthalpy,
    /// Specific entropy [J/(kg·K)]
    pub entropy: SpecEntropy,
}

/// Bubble and dew states at one temperature.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DomePoint {
    /// Saturation temperature [K]
    pub temperature: f64,
    pub bubble: SaturationState,
    pub dew: SaturationState,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaturationDome {
    pub fluid: Refrigerant,
    /// Critical temperature reported by the provider [K]
    pub critical_temperature: f64,
    /// Points ordered by increasing temperature.
    pub points: Vec<DomePoint>,
}

fn saturated<P: PropertyProvider + ?Sized>(
    provider: &P,
    fluid: Refrigerant,
    t: f64,
    q: f64,
) -> FluidResult<SaturationState> {
    let pressure = provider.saturation_pressure(k(t), q, fluid)?;
    let enthalpy = provider.enthalpy_pq(pressure, q, fluid)?;
    let s = provider.query(
        PropertyKind::Entropy,
        PropertyInput::pressure(pressure),
        PropertyInput::quality(q),
        fluid,
    )?;
    Ok(SaturationState {
        pressure: pressure.value,
        enthalpy,
        entropy: s,
    })
}

/// Sample `n` points of the saturation dome of `fluid`.
///
/// The grid spans `[T_min + 1 K, T_crit - 0.1 K]` inclusive. Fails with
/// `InvalidArg` when `n < 2` and with the first lookup error otherwise.
pub fn saturation_dome<P: PropertyProvider + ?Sized>(
    provider: &P,
    fluid: Refrigerant,
    n: usize,
) -> FluidResult<SaturationDome> {
    if n < 2 {
        return Err(FluidError::InvalidArg {
            what: "saturation dome needs at least two points",
        });
    }

    let t_crit = provider.critical_temperature(fluid)?.value;
    let t_lo = provider.min_temperature(fluid)?.value + T_MIN_OFFSET_K;
    let t_hi = t_crit - T_CRIT_OFFSET_K;
    if t_hi <= t_lo {
        return Err(FluidError::OutOfRange {
            what: "critical temperature must exceed minimum temperature",
        });
    }

    let step = (t_hi - t_lo) / (n - 1) as f64;
    let points = (0..n)
        .into_par_iter()
        .map(|i| {
            let t = if i == n - 1 { t_hi } else { t_lo + step * i as f64 };
            Ok(DomePoint {
                temperature: t,
                bubble: saturated(provider, fluid, t, 0.0)?,
                dew: saturated(provider, fluid, t, 1.0)?,
            })
        })
        .collect::<FluidResult<Vec<_>>>()?;

    debug!(%fluid, points = points.len(), t_lo, t_hi, "sampled saturation dome");

    Ok(SaturationDome {
        fluid,
        critical_temperature: t_crit,
        points,
    })
}
