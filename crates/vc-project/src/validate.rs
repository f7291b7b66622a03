//! Configuration validation.

use crate::schema::{ActualDef, AnalysisConfig, DesignDef, DesignTemperaturesDef, FitDef};
use vc_cycle::MIN_SPAN_K;

/// Only supported configuration version.
pub const LATEST_VERSION: u32 = 1;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

fn invalid(field: &str, value: impl ToString, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn positive(field: &str, v: f64) -> Result<(), ValidationError> {
    if !v.is_finite() || v <= 0.0 {
        return Err(invalid(field, v, "must be positive and finite"));
    }
    Ok(())
}

fn non_negative(field: &str, v: f64) -> Result<(), ValidationError> {
    if !v.is_finite() || v < 0.0 {
        return Err(invalid(field, v, "must be finite and non-negative"));
    }
    Ok(())
}

fn range(field: &str, [lo, hi]: [f64; 2]) -> Result<(), ValidationError> {
    positive(field, lo)?;
    positive(field, hi)?;
    if lo >= hi {
        return Err(invalid(field, format!("[{lo}, {hi}]"), "lower bound must be below upper bound"));
    }
    Ok(())
}

pub fn validate_config(config: &AnalysisConfig) -> Result<(), ValidationError> {
    if config.version != LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: config.version,
        });
    }
    if config.name.trim().is_empty() {
        return Err(invalid("name", "\"\"", "must not be empty"));
    }
    config
        .compressor
        .build()
        .map_err(|e| invalid("compressor", "model", &e.to_string()))?;
    validate_design(&config.design)?;
    validate_actual(&config.actual)?;
    validate_fit(&config.fit)?;
    Ok(())
}

fn validate_design(design: &DesignDef) -> Result<(), ValidationError> {
    positive("design.rating.capacity_w", design.rating.capacity_w)?;
    positive("design.rating.power_input_w", design.rating.power_input_w)?;
    non_negative("design.superheat_k", design.superheat_k)?;
    non_negative("design.subcool_k", design.subcool_k)?;

    match &design.temperatures {
        DesignTemperaturesDef::Given { t_evap_k, t_cond_k } => {
            positive("design.temperatures.t_evap_k", *t_evap_k)?;
            positive("design.temperatures.t_cond_k", *t_cond_k)?;
            if t_cond_k <= t_evap_k {
                return Err(invalid(
                    "design.temperatures.t_cond_k",
                    t_cond_k,
                    "must exceed t_evap_k",
                ));
            }
        }
        DesignTemperaturesDef::Fitted { initial, bounds } => {
            range("design.temperatures.bounds.t_evap_k", bounds.t_evap_k)?;
            range("design.temperatures.bounds.t_cond_k", bounds.t_cond_k)?;
            let inside = |v: f64, [lo, hi]: [f64; 2]| v >= lo && v <= hi;
            if !inside(initial.t_evap_k, bounds.t_evap_k) {
                return Err(invalid(
                    "design.temperatures.initial.t_evap_k",
                    initial.t_evap_k,
                    "must lie within bounds",
                ));
            }
            if !inside(initial.t_cond_k, bounds.t_cond_k) {
                return Err(invalid(
                    "design.temperatures.initial.t_cond_k",
                    initial.t_cond_k,
                    "must lie within bounds",
                ));
            }
        }
    }
    Ok(())
}

fn validate_actual(actual: &ActualDef) -> Result<(), ValidationError> {
    positive("actual.suction_pressure_pa", actual.suction_pressure_pa)?;
    positive("actual.discharge_pressure_pa", actual.discharge_pressure_pa)?;
    if actual.discharge_pressure_pa <= actual.suction_pressure_pa {
        return Err(invalid(
            "actual.discharge_pressure_pa",
            actual.discharge_pressure_pa,
            "must exceed suction pressure",
        ));
    }
    non_negative("actual.superheat_k", actual.superheat_k)?;
    non_negative("actual.subcool_k", actual.subcool_k)?;
    Ok(())
}

fn validate_fit(fit: &FitDef) -> Result<(), ValidationError> {
    if !(fit.efficiency_guess > 0.0 && fit.efficiency_guess <= 1.0) {
        return Err(invalid("fit.efficiency_guess", fit.efficiency_guess, "must lie in (0, 1]"));
    }
    positive("fit.tolerance", fit.tolerance)?;
    positive("fit.penalty", fit.penalty)?;
    if !fit.min_span_k.is_finite() || fit.min_span_k < MIN_SPAN_K {
        return Err(invalid(
            "fit.min_span_k",
            fit.min_span_k,
            &format!("must be at least the {MIN_SPAN_K} K cycle minimum"),
        ));
    }
    Ok(())
}
