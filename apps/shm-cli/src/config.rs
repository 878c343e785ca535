//! YAML scenario files.
//!
//! ```yaml
//! version: 1
//! name: Beats
//! grid: { t_max: 8.0, samples: 1000 }
//! model:
//!   type: superposition
//!   first: { amplitude: 1.0, angular_frequency: 10.0 }
//!   second: { amplitude: 1.0, angular_frequency: 10.5 }
//! ```

use serde::{Deserialize, Serialize};
use shm_core::{TimeGrid, Tolerances};
use shm_models::{
    DampedOscillator, ForcedOscillator, ForcingParameters, HarmonicOscillator, InitialState,
    Oscillation, OscillatorParameters, Pendulum, PendulumParameters, Scenario, Superposition,
};
use shm_sim::{IntegratorType, SimOptions};
use std::path::Path;

use crate::error::{CliError, CliResult};

pub const LATEST_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScenarioFile {
    pub version: u32,
    pub name: String,
    #[serde(default)]
    pub grid: GridDef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solver: Option<SolverDef>,
    pub model: ModelDef,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GridDef {
    pub t_max: f64,
    pub samples: usize,
}

impl Default for GridDef {
    fn default() -> Self {
        Self {
            t_max: 8.0,
            samples: 1000,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "snake_case")]
pub enum IntegratorDef {
    #[default]
    DormandPrince,
    Rk4,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct SolverDef {
    #[serde(default)]
    pub integrator: IntegratorDef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tolerances: Option<Tolerances>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_dt: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_steps: Option<usize>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct OscillationDef {
    pub amplitude: f64,
    pub angular_frequency: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ModelDef {
    Harmonic {
        mass: f64,
        stiffness: f64,
        amplitude: f64,
    },
    Damped {
        mass: f64,
        stiffness: f64,
        damping: f64,
        #[serde(default = "default_position")]
        initial_position: f64,
        #[serde(default)]
        initial_velocity: f64,
    },
    Forced {
        mass: f64,
        stiffness: f64,
        damping: f64,
        force_amplitude: f64,
        forcing_frequency: f64,
    },
    Pendulum {
        length: f64,
        #[serde(default = "default_gravity")]
        gravity: f64,
        initial_angle_deg: f64,
    },
    Superposition {
        first: OscillationDef,
        second: OscillationDef,
    },
}

fn default_position() -> f64 {
    1.0
}

fn default_gravity() -> f64 {
    9.81
}

impl ScenarioFile {
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| CliError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> CliResult<Self> {
        let file: ScenarioFile = serde_yaml::from_str(content)?;
        if file.version == 0 || file.version > LATEST_VERSION {
            return Err(CliError::UnsupportedVersion {
                found: file.version,
                latest: LATEST_VERSION,
            });
        }
        Ok(file)
    }

    pub fn time_grid(&self) -> CliResult<TimeGrid> {
        Ok(TimeGrid::linspace(self.grid.t_max, self.grid.samples)?)
    }

    pub fn sim_options(&self) -> SimOptions {
        let mut opts = SimOptions::default();
        if let Some(solver) = &self.solver {
            opts.integrator = match solver.integrator {
                IntegratorDef::DormandPrince => IntegratorType::DormandPrince54,
                IntegratorDef::Rk4 => IntegratorType::RK4,
            };
            if let Some(tol) = solver.tolerances {
                opts.tol = tol;
            }
            if let Some(dt) = solver.fixed_dt {
                opts.fixed_dt = dt;
            }
            if let Some(max) = solver.max_steps {
                opts.max_steps = max;
            }
        }
        opts
    }

    /// Validate the model section into a runnable scenario.
    pub fn build(&self) -> CliResult<Box<dyn Scenario>> {
        self.model.build()
    }
}

impl ModelDef {
    pub fn build(&self) -> CliResult<Box<dyn Scenario>> {
        let scenario: Box<dyn Scenario> = match *self {
            ModelDef::Harmonic {
                mass,
                stiffness,
                amplitude,
            } => Box::new(HarmonicOscillator::new(mass, stiffness, amplitude)?),
            ModelDef::Damped {
                mass,
                stiffness,
                damping,
                initial_position,
                initial_velocity,
            } => Box::new(DampedOscillator::new(
                OscillatorParameters::new(mass, stiffness, damping)?,
                InitialState::new(initial_position, initial_velocity)?,
            )),
            ModelDef::Forced {
                mass,
                stiffness,
                damping,
                force_amplitude,
                forcing_frequency,
            } => Box::new(ForcedOscillator::new(
                OscillatorParameters::new(mass, stiffness, damping)?,
                ForcingParameters::new(force_amplitude, forcing_frequency)?,
            )),
            ModelDef::Pendulum {
                length,
                gravity,
                initial_angle_deg,
            } => Box::new(Pendulum::new(PendulumParameters::new(
                length,
                gravity,
                initial_angle_deg.to_radians(),
            )?)),
            ModelDef::Superposition { first, second } => Box::new(Superposition::new(
                Oscillation::new(first.amplitude, first.angular_frequency)?,
                Oscillation::new(second.amplitude, second.angular_frequency)?,
            )),
        };
        Ok(scenario)
    }
}
