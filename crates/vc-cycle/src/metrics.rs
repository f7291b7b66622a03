//! Cycle performance metrics.

use crate::error::{CycleError, CycleResult};
use crate::state::Cycle;
use vc_core::units::{MassRate, Power, kgps, w};

fn compressor_work(cycle: &Cycle) -> CycleResult<f64> {
    let work = cycle.discharge.enthalpy - cycle.suction.enthalpy;
    if !(work > 0.0) || !work.is_finite() {
        return Err(CycleError::NonPhysical {
            what: "compressor work must be positive",
        });
    }
    Ok(work)
}

fn refrigeration_effect(cycle: &Cycle) -> f64 {
    cycle.suction.enthalpy - cycle.evaporator_inlet.enthalpy
}

/// Coefficient of performance, refrigeration effect over compressor work.
pub fn cop(cycle: &Cycle) -> CycleResult<f64> {
    let work = compressor_work(cycle)?;
    Ok(refrigeration_effect(cycle) / work)
}

/// Evaporator duty `m * (h1 - h4)`.
pub fn capacity(cycle: &Cycle, mass_flow: MassRate) -> Power {
    w(mass_flow.value * refrigeration_effect(cycle))
}

/// Shaft power `m * (h2 - h1)`.
pub fn compressor_power(cycle: &Cycle, mass_flow: MassRate) -> Power {
    w(mass_flow.value * (cycle.discharge.enthalpy - cycle.suction.enthalpy))
}

/// Condenser duty `m * (h2 - h3)`.
pub fn heat_rejection(cycle: &Cycle, mass_flow: MassRate) -> Power {
    w(mass_flow.value * (cycle.discharge.enthalpy - cycle.condenser_exit.enthalpy))
}

/// Refrigerant mass flow that delivers `capacity` on this cycle.
pub fn mass_flow_for_capacity(cycle: &Cycle, capacity: Power) -> CycleResult<MassRate> {
    if !capacity.value.is_finite() || capacity.value <= 0.0 {
        return Err(CycleError::InvalidArg {
            what: "capacity must be positive and finite",
        });
    }
    let effect = refrigeration_effect(cycle);
    if !(effect > 0.0) {
        return Err(CycleError::NonPhysical {
            what: "refrigeration effect must be positive",
        });
    }
    Ok(kgps(capacity.value / effect))
}

/// Relative COP shortfall of `actual` against `reference`, in percent.
pub fn efficiency_loss_pct(cop_reference: f64, cop_actual: f64) -> CycleResult<f64> {
    if !cop_reference.is_finite() || !cop_actual.is_finite() {
        return Err(CycleError::InvalidArg {
            what: "COP values must be finite",
        });
    }
    if cop_reference == 0.0 {
        return Err(CycleError::InvalidArg {
            what: "reference COP must be nonzero",
        });
    }
    Ok(100.0 * (cop_reference - cop_actual) / cop_reference)
}

/// Manufacturer rating: cooling capacity and electrical input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatedPerformance {
    pub capacity: Power,
    pub power_input: Power,
}

impl RatedPerformance {
    pub fn new(capacity: Power, power_input: Power) -> CycleResult<Self> {
        for (value, what) in [
            (capacity.value, "rated capacity must be positive and finite"),
            (power_input.value, "rated power input must be positive and finite"),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(CycleError::InvalidArg { what });
            }
        }
        Ok(Self {
            capacity,
            power_input,
        })
    }

    pub fn cop(&self) -> f64 {
        self.capacity.value / self.power_input.value
    }
}

/// Specific (per kg) and, with a mass flow, absolute cycle performance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CycleMetrics {
    /// h1 - h4 [J/kg]
    pub refrigeration_effect: f64,
    /// h2 - h1 [J/kg]
    pub specific_work: f64,
    /// h2 - h3 [J/kg]
    pub specific_heat_rejection: f64,
    pub cop: f64,
    pub pressure_ratio: f64,
    pub mass_flow: Option<MassRate>,
    pub capacity: Option<Power>,
    pub compressor_power: Option<Power>,
    pub heat_rejection: Option<Power>,
}

impl CycleMetrics {
    pub fn evaluate(cycle: &Cycle, mass_flow: Option<MassRate>) -> CycleResult<Self> {
        let specific_work = compressor_work(cycle)?;
        let refrigeration_effect = refrigeration_effect(cycle);
        Ok(Self {
            refrigeration_effect,
            specific_work,
            specific_heat_rejection: cycle.discharge.enthalpy - cycle.condenser_exit.enthalpy,
            cop: refrigeration_effect / specific_work,
            pressure_ratio: cycle.pressure_ratio(),
            mass_flow,
            capacity: mass_flow.map(|m| capacity(cycle, m)),
            compressor_power: mass_flow.map(|m| compressor_power(cycle, m)),
            heat_rejection: mass_flow.map(|m| heat_rejection(cycle, m)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::BoundaryConditions;
    use crate::builder::build_cycle;
    use crate::testing::ToyRefrigerant;
    use proptest::prelude::*;
    use vc_core::units::{dk, k};
    use vc_fluids::Refrigerant;

    fn toy_cycle(eta: f64) -> Cycle {
        let b = BoundaryConditions::new(k(280.15), k(318.15), dk(5.0), dk(5.0), Refrigerant::R134a);
        build_cycle(&ToyRefrigerant::new(), &b, eta).unwrap()
    }

    #[test]
    fn energy_balance() {
        let cycle = toy_cycle(0.6);
        let m = kgps(2.0);
        let q_evap = capacity(&cycle, m).value;
        let w_comp = compressor_power(&cycle, m).value;
        let q_cond = heat_rejection(&cycle, m).value;
        assert!((q_cond - (q_evap + w_comp)).abs() < 1e-6 * q_cond);
        assert!((q_evap / w_comp - cop(&cycle).unwrap()).abs() < 1e-12);
    }

    #[test]
    fn rated_reference_cop() {
        let rated = RatedPerformance::new(w(897_000.0), w(345_500.0)).unwrap();
        assert!((rated.cop() - 2.5962).abs() < 1e-3);
        assert!(RatedPerformance::new(w(0.0), w(345_500.0)).is_err());
        assert!(RatedPerformance::new(w(897_000.0), w(f64::NAN)).is_err());
    }

    #[test]
    fn mass_flow_reproduces_capacity() {
        let cycle = toy_cycle(0.5);
        let m = mass_flow_for_capacity(&cycle, w(897_000.0)).unwrap();
        assert!((capacity(&cycle, m).value - 897_000.0).abs() < 1e-6);
        assert!(mass_flow_for_capacity(&cycle, w(-1.0)).is_err());
    }

    #[test]
    fn cop_rejects_non_positive_work() {
        let mut cycle = toy_cycle(0.7);
        cycle.discharge.enthalpy = cycle.suction.enthalpy - 1.0;
        assert!(matches!(cop(&cycle), Err(CycleError::NonPhysical { .. })));
        assert!(CycleMetrics::evaluate(&cycle, None).is_err());
    }

    #[test]
    fn loss_percentage() {
        assert!((efficiency_loss_pct(2.6, 1.95).unwrap() - 25.0).abs() < 1e-9);
        assert!(efficiency_loss_pct(2.6, 3.0).unwrap() < 0.0);
        assert!(matches!(
            efficiency_loss_pct(0.0, 1.0),
            Err(CycleError::InvalidArg { .. })
        ));
        assert!(efficiency_loss_pct(f64::NAN, 1.0).is_err());
        assert!(efficiency_loss_pct(2.0, f64::INFINITY).is_err());
    }

    #[test]
    fn metrics_bundle() {
        let cycle = toy_cycle(0.6);
        let specific = CycleMetrics::evaluate(&cycle, None).unwrap();
        assert!(specific.capacity.is_none());
        assert_eq!(specific.cop, cop(&cycle).unwrap());

        let full = CycleMetrics::evaluate(&cycle, Some(kgps(1.5))).unwrap();
        let q = full.capacity.unwrap().value;
        assert!((q - 1.5 * specific.refrigeration_effect).abs() < 1e-6);
    }

    proptest! {
        #[test]
        fn no_loss_against_itself(c in prop_oneof![-100.0_f64..-1e-6, 1e-6_f64..100.0]) {
            prop_assert_eq!(efficiency_loss_pct(c, c).unwrap(), 0.0);
        }
    }
}
