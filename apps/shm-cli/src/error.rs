//! Error type for the command-line front end.

use shm_core::CoreError;
use shm_models::ModelError;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Failed to read scenario file: {path}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid scenario file: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    #[error("Unsupported scenario version {found} (latest is {latest})")]
    UnsupportedVersion { found: u32, latest: u32 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Model error: {0}")]
    Model(#[from] ModelError),
}

pub type CliResult<T> = Result<T, CliError>;

impl From<CoreError> for CliError {
    fn from(e: CoreError) -> Self {
        CliError::Model(e.into())
    }
}
