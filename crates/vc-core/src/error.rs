use thiserror::Error;

pub type VcResult<T> = Result<T, VcError>;

#[derive(Error, Debug)]
pub enum VcError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Property lookup failed: {message}")]
    PropertyLookup { message: String },

    #[error("Infeasible boundary condition: {message}")]
    Infeasible { message: String },

    #[error("Invariant violated: {what}")]
    Invariant { what: &'static str },
}
