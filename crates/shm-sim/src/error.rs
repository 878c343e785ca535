//! Error types for simulation operations.

use shm_core::CoreError;
use thiserror::Error;

/// Errors encountered during time integration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Non-physical condition: {what}")]
    NonPhysical { what: &'static str },

    #[error("Step size underflow at t={t}: dt={dt} is below the minimum step")]
    StepSizeUnderflow { t: f64, dt: f64 },

    #[error("Step limit of {max_steps} reached at t={t}")]
    StepLimit { max_steps: usize, t: f64 },

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type SimResult<T> = Result<T, SimError>;
