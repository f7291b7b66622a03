//! vc-fluids: refrigerant property access for vcflow.
//!
//! Provides:
//! - Refrigerant identifiers (pure fluids only)
//! - `PropertyProvider` trait: two-input property queries in SI units
//! - CoolProp backend for real fluid properties
//! - Saturation dome sampling
//! - Unit-aware parsing of user input
//!
//! # Architecture
//!
//! The `PropertyProvider` trait isolates the cycle model from the property backend.
//! CoolProp (via `rfluids`) is the production backend; tests substitute doubles.
//! Every provider speaks SI: Pa, K, J/kg, J/(kg·K).
//!
//! # Example
//!
//! ```no_run
//! use vc_fluids::{CoolPropModel, PropertyProvider, Refrigerant};
//! use vc_core::units::k;
//!
//! let model = CoolPropModel::new();
//! let p_evap = model
//!     .saturation_pressure(k(280.15), 1.0, Refrigerant::R134a)
//!     .unwrap();
//! println!("Evaporator pressure: {} Pa", p_evap.value);
//! ```

pub mod coolprop;
pub mod dome;
pub mod error;
pub mod property;
pub mod refrigerant;
pub mod units;

// Re-exports for ergonomics
pub use coolprop::CoolPropModel;
pub use dome::{
    DEFAULT_DOME_POINTS, DomePoint, SaturationDome, SaturationState, saturation_dome,
};
pub use error::{FluidError, FluidResult};
pub use property::{
    PropertyInput, PropertyKind, PropertyProvider, SpecEnthalpy, SpecEntropy, validation,
};
pub use refrigerant::Refrigerant;
pub use units::{Quantity, UnitError, parse_quantity};
