//! vc-core: stable foundation for vcflow.
//!
//! Contains:
//! - units (uom SI types + constructors)
//! - numeric (clamping, interpolation)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{VcError, VcResult};
pub use numeric::*;
pub use units::*;
