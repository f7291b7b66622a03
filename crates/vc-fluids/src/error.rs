//! Fluid property errors.

use crate::property::{PropertyInput, PropertyKind};
use crate::refrigerant::Refrigerant;
use thiserror::Error;
use vc_core::VcError;

/// Result type for fluid operations.
pub type FluidResult<T> = Result<T, FluidError>;

/// Errors that can occur during fluid property calculations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FluidError {
    /// The provider could not resolve the requested state.
    #[error("Property lookup failed: {output} from ({in1}, {in2}) for {fluid}: {message}")]
    Lookup {
        output: PropertyKind,
        in1: PropertyInput,
        in2: PropertyInput,
        fluid: Refrigerant,
        message: String,
    },

    /// Non-physical values (negative pressure, quality above one, etc.).
    #[error("Non-physical value for {what}")]
    NonPhysical { what: &'static str },

    /// Value out of valid range.
    #[error("Value out of range for {what}")]
    OutOfRange { what: &'static str },

    /// Invalid argument.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// Operation not supported by the provider.
    #[error("Not supported: {what}")]
    NotSupported { what: &'static str },

    /// Backend error without a specific state attached (fluid constants).
    #[error("Backend error: {message}")]
    Backend { message: String },
}

impl FluidError {
    /// True when the provider failed to resolve a state, as opposed to rejecting input.
    pub fn is_lookup(&self) -> bool {
        matches!(self, FluidError::Lookup { .. } | FluidError::Backend { .. })
    }
}

impl From<FluidError> for VcError {
    fn from(err: FluidError) -> Self {
        match err {
            FluidError::NonPhysical { what } => VcError::Invariant { what },
            FluidError::OutOfRange { what } | FluidError::InvalidArg { what } => {
                VcError::InvalidArg { what }
            }
            FluidError::NotSupported { what } => VcError::InvalidArg { what },
            other => VcError::PropertyLookup {
                message: other.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_error_names_the_state() {
        let err = FluidError::Lookup {
            output: PropertyKind::Enthalpy,
            in1: PropertyInput::new(PropertyKind::Pressure, 307_700.0),
            in2: PropertyInput::new(PropertyKind::Temperature, 280.0),
            fluid: Refrigerant::R134a,
            message: "outside range".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("R134a"), "{msg}");
        assert!(msg.contains("P=307700"), "{msg}");
        assert!(msg.contains("outside range"), "{msg}");
        assert!(err.is_lookup());
    }

    #[test]
    fn error_to_vc_error() {
        let err: VcError = FluidError::NotSupported { what: "mixtures" }.into();
        assert!(matches!(err, VcError::InvalidArg { .. }));

        let err: VcError = FluidError::Backend {
            message: "CoolProp failed".into(),
        }
        .into();
        assert!(matches!(err, VcError::PropertyLookup { .. }));
    }
}
