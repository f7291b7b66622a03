//! Cycle boundary conditions.

use crate::error::{CycleError, CycleResult};
use tracing::debug;
use vc_core::units::{Pressure, TempInterval, Temperature, dk};
use vc_fluids::{PropertyProvider, Refrigerant};

/// Minimum practical condenser-evaporator temperature span [K].
pub const MIN_SPAN_K: f64 = 10.0;

/// Round-off allowance when comparing spans such as 318.15 - 308.15.
const SPAN_ROUNDOFF_K: f64 = 1e-9;

/// Saturation temperatures plus superheat and subcooling for one refrigerant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundaryConditions {
    /// Evaporator saturation (dew point) temperature
    pub t_evap: Temperature,
    /// Condenser saturation (bubble point) temperature
    pub t_cond: Temperature,
    /// Suction superheat above `t_evap`
    pub superheat: TempInterval,
    /// Condenser exit subcooling below `t_cond`
    pub subcool: TempInterval,
    pub fluid: Refrigerant,
}

impl BoundaryConditions {
    /// Create boundary conditions. Use [`validate`](Self::validate) before building.
    pub fn new(
        t_evap: Temperature,
        t_cond: Temperature,
        superheat: TempInterval,
        subcool: TempInterval,
        fluid: Refrigerant,
    ) -> Self {
        Self {
            t_evap,
            t_cond,
            superheat,
            subcool,
            fluid,
        }
    }

    /// Derive saturation temperatures from measured suction and discharge pressures.
    ///
    /// The evaporator temperature is the dew point at suction pressure and the
    /// condenser temperature is the bubble point at discharge pressure.
    pub fn from_pressures<P: PropertyProvider + ?Sized>(
        provider: &P,
        suction: Pressure,
        discharge: Pressure,
        superheat: TempInterval,
        subcool: TempInterval,
        fluid: Refrigerant,
    ) -> CycleResult<Self> {
        if !(discharge.value > suction.value) {
            return Err(CycleError::InvalidArg {
                what: "discharge pressure must exceed suction pressure",
            });
        }
        let t_evap = provider.saturation_temperature(suction, 1.0, fluid)?;
        let t_cond = provider.saturation_temperature(discharge, 0.0, fluid)?;
        debug!(
            %fluid,
            p_suction = suction.value,
            p_discharge = discharge.value,
            t_evap = t_evap.value,
            t_cond = t_cond.value,
            "saturation temperatures from sensor pressures"
        );
        Ok(Self::new(t_evap, t_cond, superheat, subcool, fluid))
    }

    /// Condenser minus evaporator saturation temperature [K].
    pub fn span(&self) -> TempInterval {
        dk(self.t_cond.value - self.t_evap.value)
    }

    /// Check temperatures, superheat, subcooling and the minimum span.
    pub fn validate(&self, min_span_k: f64) -> CycleResult<()> {
        for (value, what) in [
            (self.t_evap.value, "evaporator temperature must be positive and finite"),
            (self.t_cond.value, "condenser temperature must be positive and finite"),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(CycleError::InvalidArg { what });
            }
        }
        if !self.superheat.value.is_finite() || self.superheat.value < 0.0 {
            return Err(CycleError::InvalidArg {
                what: "superheat must be finite and non-negative",
            });
        }
        if !self.subcool.value.is_finite() || self.subcool.value < 0.0 {
            return Err(CycleError::InvalidArg {
                what: "subcooling must be finite and non-negative",
            });
        }
        if self.span().value < min_span_k - SPAN_ROUNDOFF_K {
            return Err(CycleError::InfeasibleBoundaryCondition {
                t_evap_k: self.t_evap.value,
                t_cond_k: self.t_cond.value,
                min_span_k,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FailingProvider, ToyRefrigerant};
    use vc_core::units::{k, pa};

    fn bc(t_evap: f64, t_cond: f64, sh: f64, sc: f64) -> BoundaryConditions {
        BoundaryConditions::new(k(t_evap), k(t_cond), dk(sh), dk(sc), Refrigerant::R134a)
    }

    #[test]
    fn span_at_limit() {
        assert!(bc(298.15, 308.15, 5.0, 5.0).validate(MIN_SPAN_K).is_ok());
        let err = bc(300.0, 309.999, 5.0, 5.0).validate(MIN_SPAN_K).unwrap_err();
        assert!(matches!(
            err,
            CycleError::InfeasibleBoundaryCondition { min_span_k, .. } if min_span_k == 10.0
        ));
    }

    #[test]
    fn inverted_temperatures_are_infeasible() {
        let err = bc(318.15, 280.15, 5.0, 5.0).validate(MIN_SPAN_K).unwrap_err();
        assert!(matches!(err, CycleError::InfeasibleBoundaryCondition { .. }));
    }

    #[test]
    fn negative_superheat_rejected() {
        let err = bc(280.15, 318.15, -1.0, 5.0).validate(MIN_SPAN_K).unwrap_err();
        assert!(matches!(err, CycleError::InvalidArg { .. }));
        let err = bc(280.15, 318.15, 5.0, f64::NAN).validate(MIN_SPAN_K).unwrap_err();
        assert!(matches!(err, CycleError::InvalidArg { .. }));
    }

    #[test]
    fn from_pressures_uses_dew_and_bubble() {
        let toy = ToyRefrigerant::new();
        let b = BoundaryConditions::from_pressures(
            &toy,
            pa(307_700.0),
            pa(1_244_000.0),
            dk(8.6),
            dk(0.0),
            Refrigerant::R134a,
        )
        .unwrap();
        assert!(b.t_evap.value < b.t_cond.value);
        assert!(b.span().value > MIN_SPAN_K);
        assert_eq!(b.superheat.value, 8.6);
    }

    #[test]
    fn from_pressures_rejects_inverted_sensors() {
        let err = BoundaryConditions::from_pressures(
            &ToyRefrigerant::new(),
            pa(1_244_000.0),
            pa(307_700.0),
            dk(8.6),
            dk(0.0),
            Refrigerant::R134a,
        )
        .unwrap_err();
        assert!(matches!(err, CycleError::InvalidArg { .. }));
    }

    #[test]
    fn from_pressures_propagates_lookup() {
        let err = BoundaryConditions::from_pressures(
            &FailingProvider,
            pa(307_700.0),
            pa(1_244_000.0),
            dk(8.6),
            dk(0.0),
            Refrigerant::R134a,
        )
        .unwrap_err();
        assert!(matches!(err, CycleError::PropertyLookup(_)));
    }
}
