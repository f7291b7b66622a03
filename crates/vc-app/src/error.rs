//! Error types for the vc-app service layer.

/// Application error shared by the CLI and any other front end.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Project(String),

    #[error("cannot evaluate design cycle: {cause}")]
    DesignCycle { cause: String },

    #[error("cannot evaluate actual cycle from sensor inputs: {cause}")]
    ActualCycle { cause: String },

    #[error(
        "no boundary temperatures found matching target COP within bounds (residual {residual:.3e})"
    )]
    FitNotConverged { residual: f64 },

    #[error("Cycle error: {0}")]
    Cycle(String),

    #[error("Property error: {0}")]
    Fluid(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type AppResult<T> = Result<T, AppError>;

impl From<vc_project::ProjectError> for AppError {
    fn from(err: vc_project::ProjectError) -> Self {
        AppError::Project(err.to_string())
    }
}

impl From<vc_cycle::CycleError> for AppError {
    fn from(err: vc_cycle::CycleError) -> Self {
        AppError::Cycle(err.to_string())
    }
}

impl From<vc_fluids::FluidError> for AppError {
    fn from(err: vc_fluids::FluidError) -> Self {
        AppError::Fluid(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_facing_messages() {
        let e = AppError::ActualCycle {
            cause: "Property lookup failed: H(P=1 Pa, T=300 K)".into(),
        };
        assert!(e
            .to_string()
            .starts_with("cannot evaluate actual cycle from sensor inputs: Property lookup"));

        let e = AppError::FitNotConverged { residual: 0.0123 };
        assert_eq!(
            e.to_string(),
            "no boundary temperatures found matching target COP within bounds (residual 1.230e-2)"
        );
    }
}
