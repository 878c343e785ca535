//! Error types for model construction and evaluation.

use shm_core::CoreError;
use shm_sim::SimError;
use thiserror::Error;

/// Errors that can occur while building or evaluating a model.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("Invalid parameter {what}: {value}")]
    InvalidParameter { what: &'static str, value: f64 },

    #[error("Undefined quantity: {what}")]
    UndefinedQuantity { what: &'static str },

    #[error("Beat period undefined: the two frequencies coincide")]
    DegenerateBeat,

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Simulation error: {0}")]
    Sim(#[from] SimError),
}

pub type ModelResult<T> = Result<T, ModelError>;

impl From<CoreError> for ModelError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::NonFinite { what, value } => ModelError::InvalidParameter { what, value },
            CoreError::InvalidParameter { what, value } => {
                ModelError::InvalidParameter { what, value }
            }
            CoreError::InvalidArg { what } => ModelError::InvalidArg { what },
        }
    }
}
