//! Four-point cycle construction from boundary conditions.

use crate::boundary::{BoundaryConditions, MIN_SPAN_K};
use crate::efficiency::{CompressorPerformance, EfficiencyModel};
use crate::error::{CycleError, CycleResult};
use crate::pressure_ratio::{pressure_ratio, saturation_pressures};
use crate::state::{Cycle, CyclePoint};
use tracing::debug;
use vc_core::units::{Pressure, k};
use vc_fluids::{PropertyProvider, SpecEnthalpy, SpecEntropy};

/// Superheat or subcooling below this is treated as zero [K].
pub const SATURATION_EPSILON_K: f64 = 1e-6;

/// Compression end states shared by the builder and the fit objective.
#[derive(Debug, Clone, Copy)]
pub(crate) struct CompressionEnds {
    pub p_low: Pressure,
    pub p_high: Pressure,
    /// Suction enthalpy
    pub h1: SpecEnthalpy,
    /// Suction entropy
    pub s1: SpecEntropy,
    /// Isentropic discharge enthalpy
    pub h2s: SpecEnthalpy,
    /// Condenser exit enthalpy
    pub h3: SpecEnthalpy,
}

impl CompressionEnds {
    /// Actual discharge enthalpy for an isentropic efficiency.
    pub fn discharge_enthalpy(&self, eta: f64) -> SpecEnthalpy {
        self.h1 + (self.h2s - self.h1) / eta
    }
}

/// Suction, isentropic discharge and condenser exit enthalpies.
///
/// Exactly on the saturation line a P-T flash may land on either phase, so a
/// zero superheat (subcool) uses the quality form instead.
pub(crate) fn compression_ends<P: PropertyProvider + ?Sized>(
    provider: &P,
    boundary: &BoundaryConditions,
) -> CycleResult<CompressionEnds> {
    let fluid = boundary.fluid;
    let (p_low, p_high) = saturation_pressures(provider, boundary.t_evap, boundary.t_cond, fluid)?;

    let h1 = if boundary.superheat.value < SATURATION_EPSILON_K {
        provider.enthalpy_pq(p_low, 1.0, fluid)?
    } else {
        let t1 = k(boundary.t_evap.value + boundary.superheat.value);
        provider.enthalpy_pt(p_low, t1, fluid)?
    };
    let s1 = provider.entropy_ph(p_low, h1, fluid)?;

    let h3 = if boundary.subcool.value < SATURATION_EPSILON_K {
        provider.enthalpy_pq(p_high, 0.0, fluid)?
    } else {
        let t3 = k(boundary.t_cond.value - boundary.subcool.value);
        provider.enthalpy_pt(p_high, t3, fluid)?
    };

    let h2s = provider.enthalpy_ps(p_high, s1, fluid)?;
    if !(h2s > h1) {
        return Err(CycleError::NonPhysical {
            what: "isentropic discharge enthalpy must exceed suction enthalpy",
        });
    }

    Ok(CompressionEnds {
        p_low,
        p_high,
        h1,
        s1,
        h2s,
        h3,
    })
}

/// Build the cycle for a fixed isentropic efficiency.
///
/// Fails fast on the first error and never returns a partial cycle.
pub fn build_cycle<P: PropertyProvider + ?Sized>(
    provider: &P,
    boundary: &BoundaryConditions,
    eta: f64,
) -> CycleResult<Cycle> {
    boundary.validate(MIN_SPAN_K)?;
    if !(eta > 0.0 && eta <= 1.0) {
        return Err(CycleError::InvalidArg {
            what: "isentropic efficiency must lie in (0, 1]",
        });
    }

    let fluid = boundary.fluid;
    let ends = compression_ends(provider, boundary)?;
    let CompressionEnds {
        p_low,
        p_high,
        h1,
        s1,
        h2s,
        h3,
    } = ends;
    let h2 = ends.discharge_enthalpy(eta);
    let h4 = h3;

    let suction = CyclePoint {
        pressure: p_low,
        enthalpy: h1,
        temperature: provider.temperature_ph(p_low, h1, fluid)?,
        entropy: s1,
    };
    let discharge = CyclePoint {
        pressure: p_high,
        enthalpy: h2,
        temperature: provider.temperature_ph(p_high, h2, fluid)?,
        entropy: provider.entropy_ph(p_high, h2, fluid)?,
    };
    let condenser_exit = CyclePoint {
        pressure: p_high,
        enthalpy: h3,
        temperature: provider.temperature_ph(p_high, h3, fluid)?,
        entropy: provider.entropy_ph(p_high, h3, fluid)?,
    };
    let evaporator_inlet = CyclePoint {
        pressure: p_low,
        enthalpy: h4,
        temperature: provider.temperature_ph(p_low, h4, fluid)?,
        entropy: provider.entropy_ph(p_low, h4, fluid)?,
    };
    let isentropic_discharge = CyclePoint {
        pressure: p_high,
        enthalpy: h2s,
        temperature: provider.temperature_ps(p_high, s1, fluid)?,
        entropy: s1,
    };

    debug!(
        %fluid,
        p_low = p_low.value,
        p_high = p_high.value,
        h1,
        h2,
        h3,
        eta,
        "built cycle"
    );

    Ok(Cycle {
        fluid,
        suction,
        discharge,
        condenser_exit,
        evaporator_inlet,
        isentropic_discharge,
        isentropic_efficiency: eta,
    })
}

/// Pressure ratio, then efficiency model, then cycle.
///
/// Returns the cycle together with the compressor performance it used.
pub fn build_cycle_with_model<P, M>(
    provider: &P,
    boundary: &BoundaryConditions,
    model: &M,
) -> CycleResult<(Cycle, CompressorPerformance)>
where
    P: PropertyProvider + ?Sized,
    M: EfficiencyModel + ?Sized,
{
    boundary.validate(MIN_SPAN_K)?;
    let pr = pressure_ratio(provider, boundary.t_evap, boundary.t_cond, boundary.fluid)?;
    let perf = model.evaluate(pr)?;
    let cycle = build_cycle(provider, boundary, perf.isentropic)?;
    Ok((cycle, perf))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::efficiency::{ConstantEfficiency, PolynomialEfficiency};
    use crate::metrics::cop;
    use crate::testing::{FailingProvider, ToyRefrigerant};
    use vc_core::units::dk;
    use vc_fluids::Refrigerant;

    fn design(sh: f64, sc: f64) -> BoundaryConditions {
        BoundaryConditions::new(k(280.15), k(318.15), dk(sh), dk(sc), Refrigerant::R134a)
    }

    #[test]
    fn ideal_cycle_on_toy_fluid() {
        let toy = ToyRefrigerant::new();
        let cycle = build_cycle(&toy, &design(5.0, 5.0), 1.0).unwrap();

        assert_eq!(cycle.condenser_exit.enthalpy, cycle.evaporator_inlet.enthalpy);
        assert!((cycle.discharge.enthalpy - cycle.isentropic_discharge.enthalpy).abs() < 1e-6);
        assert_eq!(cycle.suction.pressure, cycle.evaporator_inlet.pressure);
        assert_eq!(cycle.discharge.pressure, cycle.condenser_exit.pressure);
        assert!(cycle.p_high().value > cycle.p_low().value);

        assert!((cycle.suction.temperature.value - 285.15).abs() < 1e-6);
        assert!((cycle.condenser_exit.temperature.value - 313.15).abs() < 1e-6);
        let ideal = cop(&cycle).unwrap();
        assert!(ideal > 6.0 && ideal < 7.0, "COP = {ideal}");
    }

    #[test]
    fn efficiency_scales_compressor_work() {
        let toy = ToyRefrigerant::new();
        let b = design(5.0, 5.0);
        let ideal = build_cycle(&toy, &b, 1.0).unwrap();
        let real = build_cycle(&toy, &b, 0.5).unwrap();

        let w_ideal = ideal.discharge.enthalpy - ideal.suction.enthalpy;
        let w_real = real.discharge.enthalpy - real.suction.enthalpy;
        assert!((w_real - 2.0 * w_ideal).abs() < 1e-6);
        assert!(real.discharge.temperature.value > ideal.discharge.temperature.value);
        assert!(real.discharge.entropy > real.suction.entropy);
        assert_eq!(real.isentropic_efficiency, 0.5);
    }

    #[test]
    fn zero_superheat_and_subcool_use_saturation() {
        let toy = ToyRefrigerant::new();
        let cycle = build_cycle(&toy, &design(0.0, 0.0), 0.8).unwrap();
        assert!((cycle.suction.temperature.value - 280.15).abs() < 1e-6);
        assert!((cycle.condenser_exit.temperature.value - 318.15).abs() < 1e-6);
        assert!(cop(&cycle).unwrap() > 0.0);
    }

    #[test]
    fn span_below_minimum_fails_before_lookup() {
        let toy = ToyRefrigerant::new();
        let b = BoundaryConditions::new(k(300.0), k(309.999), dk(5.0), dk(5.0), Refrigerant::R134a);
        let err = build_cycle(&toy, &b, 0.7).unwrap_err();
        assert!(matches!(err, CycleError::InfeasibleBoundaryCondition { .. }));
        assert_eq!(toy.calls(), 0);
    }

    #[test]
    fn invalid_efficiency() {
        let toy = ToyRefrigerant::new();
        for eta in [0.0, -0.2, 1.01, f64::NAN] {
            assert!(matches!(
                build_cycle(&toy, &design(5.0, 5.0), eta),
                Err(CycleError::InvalidArg { .. })
            ));
        }
    }

    #[test]
    fn lookup_failure_is_not_absorbed() {
        let err = build_cycle(&FailingProvider, &design(5.0, 5.0), 0.7).unwrap_err();
        assert!(matches!(err, CycleError::PropertyLookup(_)));
    }

    #[test]
    fn idempotent() {
        let toy = ToyRefrigerant::new();
        let a = build_cycle(&toy, &design(5.0, 5.0), 0.6).unwrap();
        let b = build_cycle(&toy, &design(5.0, 5.0), 0.6).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn model_path_reports_performance() {
        let toy = ToyRefrigerant::new();
        let b = design(5.0, 5.0);
        let (cycle, perf) =
            build_cycle_with_model(&toy, &b, &PolynomialEfficiency::default()).unwrap();
        assert!((perf.pressure_ratio - cycle.pressure_ratio()).abs() < 1e-9);
        assert_eq!(cycle.isentropic_efficiency, perf.isentropic);

        let fixed = ConstantEfficiency::new(0.7).unwrap();
        let (cycle, _) = build_cycle_with_model(&toy, &b, &fixed).unwrap();
        assert_eq!(cycle.isentropic_efficiency, 0.7);
    }
}
