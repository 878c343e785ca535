//! shm-cli: scenario files and output rendering for the command-line front end.

pub mod config;
pub mod error;
pub mod output;

pub use config::{LATEST_VERSION, ModelDef, ScenarioFile};
pub use error::{CliError, CliResult};
