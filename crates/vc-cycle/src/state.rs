//! Cycle state points and layouts.

use crate::error::{CycleError, CycleResult};
use vc_core::units::{Pressure, Temperature};
use vc_fluids::{
    PropertyInput, PropertyKind, PropertyProvider, Refrigerant, SpecEnthalpy, SpecEntropy,
};

/// One thermodynamic state on the cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CyclePoint {
    pub pressure: Pressure,
    pub enthalpy: SpecEnthalpy,
    pub temperature: Temperature,
    pub entropy: SpecEntropy,
}

/// Single-stage vapour-compression cycle in refrigerant path order.
///
/// Suction and evaporator inlet sit on the low pressure level, discharge and
/// condenser exit on the high one. The throttle is isenthalpic, so
/// `condenser_exit.enthalpy == evaporator_inlet.enthalpy` exactly.
#[derive(Debug, Clone, PartialEq)]
pub struct Cycle {
    pub fluid: Refrigerant,
    pub suction: CyclePoint,
    pub discharge: CyclePoint,
    pub condenser_exit: CyclePoint,
    pub evaporator_inlet: CyclePoint,
    /// Constant-entropy discharge at the condenser pressure (off the path)
    pub isentropic_discharge: CyclePoint,
    /// Isentropic efficiency the discharge state was derived with
    pub isentropic_efficiency: f64,
}

impl Cycle {
    pub const SUCTION: usize = 0;
    pub const DISCHARGE: usize = 1;
    pub const CONDENSER_EXIT: usize = 2;
    pub const EVAPORATOR_INLET: usize = 3;

    /// Points in path order: suction, discharge, condenser exit, evaporator inlet.
    pub fn points(&self) -> [CyclePoint; 4] {
        [
            self.suction,
            self.discharge,
            self.condenser_exit,
            self.evaporator_inlet,
        ]
    }

    pub fn point(&self, index: usize) -> Option<CyclePoint> {
        self.points().get(index).copied()
    }

    pub fn p_low(&self) -> Pressure {
        self.suction.pressure
    }

    pub fn p_high(&self) -> Pressure {
        self.discharge.pressure
    }

    pub fn pressure_ratio(&self) -> f64 {
        self.p_high().value / self.p_low().value
    }
}

/// Six-point layout with the saturated states at the condenser pressure.
///
/// | index | state |
/// |-------|-------|
/// | 0 | suction |
/// | 1 | discharge |
/// | 2 | saturated vapour at P_high |
/// | 3 | saturated liquid at P_high |
/// | 4 | condenser exit |
/// | 5 | evaporator inlet |
#[derive(Debug, Clone, PartialEq)]
pub struct LegacyCycle {
    pub points: [CyclePoint; 6],
    pub fluid: Refrigerant,
    pub isentropic_discharge: CyclePoint,
    pub isentropic_efficiency: f64,
}

impl LegacyCycle {
    pub const SUCTION: usize = 0;
    pub const DISCHARGE: usize = 1;
    pub const SATURATED_VAPOR: usize = 2;
    pub const SATURATED_LIQUID: usize = 3;
    pub const CONDENSER_EXIT: usize = 4;
    pub const EVAPORATOR_INLET: usize = 5;

    /// Expand a cycle with the dew and bubble states at its condenser pressure.
    pub fn from_cycle<P: PropertyProvider + ?Sized>(
        provider: &P,
        cycle: &Cycle,
    ) -> CycleResult<Self> {
        let p = cycle.p_high();
        let fluid = cycle.fluid;
        let saturated = |q: f64| -> CycleResult<CyclePoint> {
            let t = provider.saturation_temperature(p, q, fluid)?;
            let h = provider.enthalpy_pq(p, q, fluid)?;
            let s = provider.query(
                PropertyKind::Entropy,
                PropertyInput::pressure(p),
                PropertyInput::quality(q),
                fluid,
            )?;
            Ok(CyclePoint {
                pressure: p,
                enthalpy: h,
                temperature: t,
                entropy: s,
            })
        };
        let vapor = saturated(1.0)?;
        let liquid = saturated(0.0)?;

        Ok(Self {
            points: [
                cycle.suction,
                cycle.discharge,
                vapor,
                liquid,
                cycle.condenser_exit,
                cycle.evaporator_inlet,
            ],
            fluid,
            isentropic_discharge: cycle.isentropic_discharge,
            isentropic_efficiency: cycle.isentropic_efficiency,
        })
    }

    /// Drop the saturated states.
    pub fn to_cycle(&self) -> Cycle {
        Cycle {
            fluid: self.fluid,
            suction: self.points[Self::SUCTION],
            discharge: self.points[Self::DISCHARGE],
            condenser_exit: self.points[Self::CONDENSER_EXIT],
            evaporator_inlet: self.points[Self::EVAPORATOR_INLET],
            isentropic_discharge: self.isentropic_discharge,
            isentropic_efficiency: self.isentropic_efficiency,
        }
    }

    /// `(H[0] - H[5]) / (H[1] - H[0])`.
    pub fn cop(&self) -> CycleResult<f64> {
        let h = self.enthalpies();
        let work = h[Self::DISCHARGE] - h[Self::SUCTION];
        if !(work > 0.0) {
            return Err(CycleError::NonPhysical {
                what: "compressor work must be positive",
            });
        }
        Ok((h[Self::SUCTION] - h[Self::EVAPORATOR_INLET]) / work)
    }

    pub fn enthalpies(&self) -> [f64; 6] {
        self.points.map(|p| p.enthalpy)
    }

    pub fn pressures(&self) -> [f64; 6] {
        self.points.map(|p| p.pressure.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ToyRefrigerant;
    use vc_core::units::{k, pa};

    fn point(p: f64, h: f64, t: f64) -> CyclePoint {
        CyclePoint {
            pressure: pa(p),
            enthalpy: h,
            temperature: k(t),
            entropy: 1000.0,
        }
    }

    fn sample() -> Cycle {
        Cycle {
            fluid: Refrigerant::R134a,
            suction: point(375_000.0, 264_000.0, 285.0),
            discharge: point(1_160_000.0, 320_000.0, 340.0),
            condenser_exit: point(1_160_000.0, 112_000.0, 313.0),
            evaporator_inlet: point(375_000.0, 112_000.0, 280.0),
            isentropic_discharge: point(1_160_000.0, 287_000.0, 325.0),
            isentropic_efficiency: 0.42,
        }
    }

    #[test]
    fn path_order_and_levels() {
        let c = sample();
        let pts = c.points();
        assert_eq!(pts[Cycle::SUCTION], c.suction);
        assert_eq!(pts[Cycle::EVAPORATOR_INLET], c.evaporator_inlet);
        assert_eq!(c.point(4), None);
        assert!((c.pressure_ratio() - 1_160_000.0 / 375_000.0).abs() < 1e-12);
    }

    #[test]
    fn legacy_layout_round_trip() {
        let toy = ToyRefrigerant::new();
        let c = sample();
        let legacy = LegacyCycle::from_cycle(&toy, &c).unwrap();

        let h = legacy.enthalpies();
        assert!(h[LegacyCycle::SATURATED_VAPOR] > h[LegacyCycle::SATURATED_LIQUID]);
        assert!(legacy
            .pressures()
            .iter()
            .skip(1)
            .take(4)
            .all(|&p| p == 1_160_000.0));
        assert_eq!(legacy.to_cycle(), c);
    }

    #[test]
    fn legacy_cop_convention() {
        let legacy = LegacyCycle::from_cycle(&ToyRefrigerant::new(), &sample()).unwrap();
        let cop = legacy.cop().unwrap();
        assert!((cop - (264_000.0 - 112_000.0) / (320_000.0 - 264_000.0)).abs() < 1e-12);
    }

    #[test]
    fn legacy_cop_rejects_zero_work() {
        let mut c = sample();
        c.discharge.enthalpy = c.suction.enthalpy;
        let legacy = LegacyCycle::from_cycle(&ToyRefrigerant::new(), &c).unwrap();
        assert!(matches!(legacy.cop(), Err(CycleError::NonPhysical { .. })));
    }
}
