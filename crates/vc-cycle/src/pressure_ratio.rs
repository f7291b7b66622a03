//! Compressor pressure ratio from saturation temperatures.

use crate::error::{CycleError, CycleResult};
use vc_core::units::{Pressure, Temperature};
use vc_fluids::{PropertyProvider, Refrigerant};

/// Evaporator (dew point) and condenser (bubble point) pressures.
///
/// Returns `(p_low, p_high)`. Rejects `t_cond <= t_evap` before any lookup.
pub fn saturation_pressures<P: PropertyProvider + ?Sized>(
    provider: &P,
    t_evap: Temperature,
    t_cond: Temperature,
    fluid: Refrigerant,
) -> CycleResult<(Pressure, Pressure)> {
    if !(t_cond.value > t_evap.value) {
        return Err(CycleError::InfeasibleBoundaryCondition {
            t_evap_k: t_evap.value,
            t_cond_k: t_cond.value,
            min_span_k: 0.0,
        });
    }
    let p_low = provider.saturation_pressure(t_evap, 1.0, fluid)?;
    let p_high = provider.saturation_pressure(t_cond, 0.0, fluid)?;
    Ok((p_low, p_high))
}

/// Condenser over evaporator saturation pressure.
pub fn pressure_ratio<P: PropertyProvider + ?Sized>(
    provider: &P,
    t_evap: Temperature,
    t_cond: Temperature,
    fluid: Refrigerant,
) -> CycleResult<f64> {
    let (p_low, p_high) = saturation_pressures(provider, t_evap, t_cond, fluid)?;
    let ratio = p_high.value / p_low.value;
    if !ratio.is_finite() || ratio <= 0.0 {
        return Err(CycleError::NonPhysical {
            what: "pressure ratio must be positive and finite",
        });
    }
    Ok(ratio)
}
