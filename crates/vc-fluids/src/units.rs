//! Unit-aware parsing of command-line input.
//!
//! Text such as `"7 C"`, `"307.7 kPa"` or `"5 K"` is converted to the SI value
//! the cycle model works in. A bare number is taken as already SI.
//!
//! Temperatures and temperature differences are separate quantities: `"5 C"`
//! is 278.15 K as a temperature but 5 K as a superheat.

use std::fmt;
use thiserror::Error;

const ATM_PA: f64 = 101_325.0;
const PSI_PA: f64 = 6_894.757;

/// What a user-entered value measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantity {
    /// Saturation or state temperature, to K
    Temperature,
    /// Superheat or subcooling, to K
    TemperatureDifference,
    /// Absolute pressure, to Pa
    Pressure,
    /// Capacity or electrical input, to W
    Power,
    /// Efficiency as a fraction; a `%` suffix divides by 100
    Dimensionless,
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Quantity::Temperature => "temperature",
            Quantity::TemperatureDifference => "temperature difference",
            Quantity::Pressure => "absolute pressure",
            Quantity::Power => "power",
            Quantity::Dimensionless => "dimensionless value",
        })
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum UnitError {
    #[error("cannot read a number from '{0}'")]
    Number(String),

    #[error("unknown {quantity} unit '{unit}'")]
    UnknownUnit { unit: String, quantity: Quantity },

    #[error("'{unit}' is ambiguous: {hint}")]
    Ambiguous { unit: String, hint: &'static str },

    #[error("{quantity} {value} is out of range: {reason}")]
    OutOfRange {
        quantity: Quantity,
        value: f64,
        reason: &'static str,
    },
}

/// Parse `raw` as `quantity` and return its SI value.
pub fn parse_quantity(raw: &str, quantity: Quantity) -> Result<f64, UnitError> {
    let raw = raw.trim();
    if quantity == Quantity::Dimensionless {
        return fraction(raw);
    }

    let (value, unit) = split_value_and_unit(raw)?;
    let unit = unit.to_lowercase();
    let si = match quantity {
        Quantity::Temperature => absolute_temperature(value, &unit),
        Quantity::TemperatureDifference => temperature_difference(value, &unit),
        Quantity::Pressure => absolute_pressure(value, &unit)?,
        Quantity::Power => power(value, &unit),
        Quantity::Dimensionless => None,
    }
    .ok_or_else(|| UnitError::UnknownUnit {
        unit: unit.clone(),
        quantity,
    })?;

    check_range(quantity, si)
}

fn absolute_temperature(v: f64, unit: &str) -> Option<f64> {
    Some(match unit {
        "" | "k" | "kelvin" => v,
        "c" | "°c" | "degc" | "celsius" => v + 273.15,
        "f" | "°f" | "degf" | "fahrenheit" => (v + 459.67) * 5.0 / 9.0,
        "r" | "°r" | "rankine" => v * 5.0 / 9.0,
        _ => return None,
    })
}

fn temperature_difference(v: f64, unit: &str) -> Option<f64> {
    Some(match unit {
        "" | "k" | "kelvin" | "c" | "°c" | "degc" | "delta_c" => v,
        "f" | "°f" | "degf" | "r" | "°r" | "delta_f" => v * 5.0 / 9.0,
        _ => return None,
    })
}

fn absolute_pressure(v: f64, unit: &str) -> Result<Option<f64>, UnitError> {
    Ok(Some(match unit {
        "" | "pa" => v,
        "kpa" | "kpaa" => v * 1e3,
        "mpa" => v * 1e6,
        "bar" | "bara" => v * 1e5,
        "barg" => v * 1e5 + ATM_PA,
        "kpag" => v * 1e3 + ATM_PA,
        "atm" => v * ATM_PA,
        "psia" => v * PSI_PA,
        "psig" => v * PSI_PA + ATM_PA,
        "psi" => {
            return Err(UnitError::Ambiguous {
                unit: unit.to_string(),
                hint: "write 'psia' for absolute or 'psig' for gauge pressure",
            });
        }
        _ => return Ok(None),
    }))
}

fn power(v: f64, unit: &str) -> Option<f64> {
    Some(match unit {
        "" | "w" => v,
        "kw" => v * 1e3,
        "mw" => v * 1e6,
        // Refrigeration ton: 12 000 BTU/h
        "tr" | "ton" | "tons" => v * 3_516.853,
        "btu/h" | "btu/hr" => v * 0.293_071,
        "hp" => v * 745.7,
        _ => return None,
    })
}

fn fraction(raw: &str) -> Result<f64, UnitError> {
    let (text, scale) = match raw.strip_suffix('%') {
        Some(percent) => (percent.trim(), 0.01),
        None => (raw, 1.0),
    };
    text.parse::<f64>()
        .map(|v| v * scale)
        .map_err(|_| UnitError::Number(raw.to_string()))
}

fn check_range(quantity: Quantity, si: f64) -> Result<f64, UnitError> {
    let reason = match quantity {
        Quantity::Temperature | Quantity::Pressure if si <= 0.0 => "must be positive",
        Quantity::TemperatureDifference | Quantity::Power if si < 0.0 => "cannot be negative",
        _ => return Ok(si),
    };
    Err(UnitError::OutOfRange {
        quantity,
        value: si,
        reason,
    })
}

/// Split `"45C"` into `(45.0, "C")` and `"307.7 kPa"` into `(307.7, "kPa")`.
///
/// An `e` belongs to the number only when a digit or sign follows it, so
/// `"1.2e5 Pa"` keeps its exponent.
fn split_value_and_unit(input: &str) -> Result<(f64, &str), UnitError> {
    let bytes = input.as_bytes();
    let end = input
        .char_indices()
        .find(|&(i, c)| {
            let exponent = matches!(c, 'e' | 'E')
                && i > 0
                && bytes
                    .get(i + 1)
                    .is_some_and(|b| b.is_ascii_digit() || matches!(b, b'-' | b'+'));
            !(c.is_ascii_digit() || matches!(c, '.' | '-' | '+') || exponent)
        })
        .map_or(input.len(), |(i, _)| i);

    let (number, unit) = input.split_at(end);
    let value = number
        .trim()
        .parse()
        .map_err(|_| UnitError::Number(input.to_string()))?;
    Ok((value, unit.trim()))
}
