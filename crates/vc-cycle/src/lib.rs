//! vc-cycle: single-stage vapour-compression cycle model.
//!
//! Provides:
//! - Boundary conditions (saturation temperatures, superheat, subcooling)
//! - Pressure ratio from saturation lookups
//! - Compressor efficiency models (polynomial curve, manufacturer table, constant)
//! - The four-point cycle builder with an isentropic discharge reference
//! - Cycle metrics (COP, capacity, power, efficiency loss)
//! - Inverse fit of boundary temperatures against a target COP
//!
//! Every computation is a pure function of its inputs and a
//! [`PropertyProvider`](vc_fluids::PropertyProvider).
//!
//! # Example
//!
//! ```no_run
//! use vc_cycle::{BoundaryConditions, PolynomialEfficiency, build_cycle_with_model, metrics};
//! use vc_fluids::{CoolPropModel, Refrigerant};
//! use vc_core::units::{dk, k};
//!
//! let model = CoolPropModel::new();
//! let boundary = BoundaryConditions::new(k(280.15), k(318.15), dk(5.0), dk(5.0), Refrigerant::R134a);
//! let (cycle, perf) =
//!     build_cycle_with_model(&model, &boundary, &PolynomialEfficiency::default()).unwrap();
//! println!("eta = {:.3}, COP = {:.3}", perf.isentropic, metrics::cop(&cycle).unwrap());
//! ```

pub mod boundary;
pub mod builder;
pub mod efficiency;
pub mod error;
pub mod fit;
pub mod metrics;
pub mod pressure_ratio;
pub mod state;

#[cfg(test)]
pub(crate) mod testing;

pub use boundary::{BoundaryConditions, MIN_SPAN_K};
pub use builder::{SATURATION_EPSILON_K, build_cycle, build_cycle_with_model};
pub use efficiency::{
    CompressorPerformance, ConstantEfficiency, DomainPolicy, EfficiencyModel, MIN_EFFICIENCY,
    PolynomialEfficiency, TabulatedEfficiency,
};
pub use error::{CycleError, CycleResult};
pub use fit::{FitConfig, FitProblem, FitResult, TemperatureBounds, fit, fit_with_stop};
pub use metrics::{CycleMetrics, RatedPerformance};
pub use pressure_ratio::{pressure_ratio, saturation_pressures};
pub use state::{Cycle, CyclePoint, LegacyCycle};
