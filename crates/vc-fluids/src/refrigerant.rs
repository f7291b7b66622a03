//! Refrigerant identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Pure refrigerants covered by the property backends.
///
/// Blends (R410A, R407C, ...) are deliberately absent: the cycle model assumes
/// a single saturation temperature per pressure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Refrigerant {
    /// 1,1,1,2-Tetrafluoroethane
    R134a,
    /// Difluoromethane
    R32,
    /// Pentafluoroethane
    R125,
    /// 1,1-Difluoroethane
    R152a,
    /// 1,1,1,3,3-Pentafluoropropane
    R245fa,
    /// 2,3,3,3-Tetrafluoropropene
    R1234yf,
    /// Propane
    R290,
    /// Isobutane
    R600a,
    /// Ammonia
    R717,
    /// Carbon dioxide
    R744,
    /// Propylene
    R1270,
}

impl Refrigerant {
    pub const ALL: [Refrigerant; 11] = [
        Refrigerant::R134a,
        Refrigerant::R32,
        Refrigerant::R125,
        Refrigerant::R152a,
        Refrigerant::R245fa,
        Refrigerant::R1234yf,
        Refrigerant::R290,
        Refrigerant::R600a,
        Refrigerant::R717,
        Refrigerant::R744,
        Refrigerant::R1270,
    ];

    /// ASHRAE designation, used as the canonical key.
    pub fn key(&self) -> &'static str {
        match self {
            Refrigerant::R134a => "R134a",
            Refrigerant::R32 => "R32",
            Refrigerant::R125 => "R125",
            Refrigerant::R152a => "R152a",
            Refrigerant::R245fa => "R245fa",
            Refrigerant::R1234yf => "R1234yf",
            Refrigerant::R290 => "R290",
            Refrigerant::R600a => "R600a",
            Refrigerant::R717 => "R717",
            Refrigerant::R744 => "R744",
            Refrigerant::R1270 => "R1270",
        }
    }

    /// CoolProp fluid name for this refrigerant.
    pub fn coolprop_name(&self) -> &'static str {
        match self {
            Refrigerant::R134a => "R134a",
            Refrigerant::R32 => "R32",
            Refrigerant::R125 => "R125",
            Refrigerant::R152a => "R152a",
            Refrigerant::R245fa => "R245fa",
            Refrigerant::R1234yf => "R1234yf",
            Refrigerant::R290 => "n-Propane",
            Refrigerant::R600a => "Isobutane",
            Refrigerant::R717 => "Ammonia",
            Refrigerant::R744 => "CarbonDioxide",
            Refrigerant::R1270 => "Propylene",
        }
    }

    /// Map to rfluids Pure enum (internal use for CoolProp backend).
    pub(crate) fn rfluids_pure(&self) -> rfluids::substance::Pure {
        use rfluids::substance::Pure;
        match self {
            Refrigerant::R134a => Pure::R134a,
            Refrigerant::R32 => Pure::R32,
            Refrigerant::R125 => Pure::R125,
            Refrigerant::R152a => Pure::R152a,
            Refrigerant::R245fa => Pure::R245fa,
            Refrigerant::R1234yf => Pure::R1234yf,
            Refrigerant::R290 => Pure::nPropane,
            Refrigerant::R600a => Pure::Isobutane,
            Refrigerant::R717 => Pure::Ammonia,
            Refrigerant::R744 => Pure::CarbonDioxide,
            Refrigerant::R1270 => Pure::Propylene,
        }
    }
}

impl fmt::Display for Refrigerant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl std::str::FromStr for Refrigerant {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "R134A" | "R-134A" | "HFC-134A" => Ok(Refrigerant::R134a),
            "R32" | "R-32" | "HFC-32" => Ok(Refrigerant::R32),
            "R125" | "R-125" | "HFC-125" => Ok(Refrigerant::R125),
            "R152A" | "R-152A" | "HFC-152A" => Ok(Refrigerant::R152a),
            "R245FA" | "R-245FA" | "HFC-245FA" => Ok(Refrigerant::R245fa),
            "R1234YF" | "R-1234YF" | "HFO-1234YF" => Ok(Refrigerant::R1234yf),
            "R290" | "R-290" | "PROPANE" | "N-PROPANE" | "C3H8" => Ok(Refrigerant::R290),
            "R600A" | "R-600A" | "ISOBUTANE" | "I-BUTANE" => Ok(Refrigerant::R600a),
            "R717" | "R-717" | "AMMONIA" | "NH3" => Ok(Refrigerant::R717),
            "R744" | "R-744" | "CO2" | "CARBONDIOXIDE" | "CARBON DIOXIDE" => Ok(Refrigerant::R744),
            "R1270" | "R-1270" | "PROPYLENE" | "PROPENE" | "C3H6" => Ok(Refrigerant::R1270),
            _ => Err("unknown refrigerant"),
        }
    }
}

impl TryFrom<String> for Refrigerant {
    type Error = &'static str;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Refrigerant> for String {
    fn from(value: Refrigerant) -> Self {
        value.key().to_string()
    }
}
