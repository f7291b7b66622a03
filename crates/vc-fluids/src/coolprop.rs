//! CoolProp-based property provider.

use crate::error::{FluidError, FluidResult};
use crate::property::{PropertyInput, PropertyKind, PropertyProvider, validation};
use crate::refrigerant::Refrigerant;
use rfluids::prelude::*;
use tracing::trace;

/// CoolProp backend for refrigerant properties.
///
/// Thread-safe: rfluids Fluid instances are created per query and never shared.
#[derive(Debug, Default, Clone, Copy)]
pub struct CoolPropModel;

impl CoolPropModel {
    /// Create a new CoolProp model.
    pub fn new() -> Self {
        Self
    }

    fn fluid_input(input: PropertyInput) -> FluidResult<FluidInput> {
        match input.kind {
            PropertyKind::Pressure => Ok(FluidInput::pressure(input.value)),
            PropertyKind::Temperature => Ok(FluidInput::temperature(input.value)),
            PropertyKind::Quality => Ok(FluidInput::quality(input.value)),
            PropertyKind::Enthalpy => Ok(FluidInput::enthalpy(input.value)),
            PropertyKind::Entropy => Ok(FluidInput::entropy(input.value)),
            PropertyKind::CriticalTemperature | PropertyKind::MinTemperature => {
                Err(FluidError::InvalidArg {
                    what: "fluid constants cannot be used as state inputs",
                })
            }
        }
    }
}

impl PropertyProvider for CoolPropModel {
    fn name(&self) -> &str {
        "CoolProp"
    }

    fn query(
        &self,
        output: PropertyKind,
        in1: PropertyInput,
        in2: PropertyInput,
        fluid: Refrigerant,
    ) -> FluidResult<f64> {
        validation::validate_query(output, in1, in2)?;

        let lookup_err = |message: String| FluidError::Lookup {
            output,
            in1,
            in2,
            fluid,
            message,
        };

        let mut state = Fluid::from(fluid.rfluids_pure())
            .in_state(Self::fluid_input(in1)?, Self::fluid_input(in2)?)
            .map_err(|e| lookup_err(e.to_string()))?;

        let value = match output {
            PropertyKind::Pressure => state.pressure(),
            PropertyKind::Temperature => state.temperature(),
            PropertyKind::Quality => state.quality(),
            PropertyKind::Enthalpy => state.enthalpy(),
            PropertyKind::Entropy => state.entropy(),
            PropertyKind::CriticalTemperature | PropertyKind::MinTemperature => {
                return Err(FluidError::InvalidArg {
                    what: "fluid constants must be requested through constant()",
                });
            }
        }
        .map_err(|e| lookup_err(e.to_string()))?;

        trace!(%fluid, coolprop = fluid.coolprop_name(), %output, %in1, %in2, value, "coolprop lookup");
        validation::validate_output("property lookup returned a non-finite value", value)
    }

    fn constant(&self, kind: PropertyKind, fluid: Refrigerant) -> FluidResult<f64> {
        let mut undefined = Fluid::from(fluid.rfluids_pure());
        let value = match kind {
            PropertyKind::CriticalTemperature => undefined.critical_temperature(),
            PropertyKind::MinTemperature => Ok(undefined.min_temperature()),
            _ => {
                return Err(FluidError::InvalidArg {
                    what: "state variables must be requested through query()",
                });
            }
        }
        .map_err(|e| FluidError::Backend {
            message: format!("rfluids error getting {kind} for {fluid}: {e}"),
        })?;

        trace!(%fluid, coolprop = fluid.coolprop_name(), %kind, value, "coolprop constant");
        validation::validate_output("fluid constant is non-finite", value)
    }
}
