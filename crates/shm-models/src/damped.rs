//! Free mass-spring-damper.
//!
//! ```text
//! m·ẍ + c·ẋ + k·x = 0
//! ```
//!
//! State `[x, v]`: `ẋ = v`, `v̇ = -(c/m)·v - (k/m)·x`.

use shm_core::TimeGrid;
use shm_sim::{OdeModel, SimOptions, State, Trajectory, run_sim};

use crate::derived::DerivedQuantities;
use crate::error::ModelResult;
use crate::params::{InitialState, OscillatorParameters};
use crate::scenario::{Evaluation, Scenario};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DampedOscillator {
    params: OscillatorParameters,
    initial: InitialState,
}

impl DampedOscillator {
    pub fn new(params: OscillatorParameters, initial: InitialState) -> Self {
        Self { params, initial }
    }

    pub fn params(&self) -> &OscillatorParameters {
        &self.params
    }

    pub fn initial(&self) -> InitialState {
        self.initial
    }

    pub fn derived(&self) -> DerivedQuantities {
        self.params.derived()
    }

    pub fn simulate(&self, grid: &TimeGrid, opts: &SimOptions) -> ModelResult<Trajectory> {
        let record = run_sim::<2, _>(self, grid, opts)?;
        Ok(Trajectory::from_record(&record))
    }

    /// Mechanical energy at every trajectory sample.
    pub fn energy(&self, trajectory: &Trajectory) -> Vec<f64> {
        trajectory
            .samples()
            .map(|s| self.params.energy(s.q, s.qdot))
            .collect()
    }
}

impl OdeModel<2> for DampedOscillator {
    fn initial_state(&self) -> State<2> {
        State::<2>::new(self.initial.position, self.initial.velocity)
    }

    fn rhs(&self, _t: f64, y: &State<2>) -> State<2> {
        let p = &self.params;
        let (x, v) = (y[0], y[1]);
        State::<2>::new(
            v,
            -(p.damping() / p.mass()) * v - (p.stiffness() / p.mass()) * x,
        )
    }
}

impl Scenario for DampedOscillator {
    fn name(&self) -> &'static str {
        "damped"
    }

    fn evaluate(&self, grid: &TimeGrid, opts: &SimOptions) -> ModelResult<Evaluation> {
        let traj = self.simulate(grid, opts)?;
        let derived = self.derived();
        let energy = self.energy(&traj);

        Ok(Evaluation::new(self.name(), traj.t().to_vec())
            .with_series("position", "m", traj.q().to_vec())
            .with_series("velocity", "m/s", traj.qdot().to_vec())
            .with_series("energy", "J", energy)
            .with_quantity("natural_frequency", "rad/s", Some(derived.natural_frequency))
            .with_quantity("period", "s", Some(derived.period))
            .with_quantity("critical_damping", "N·s/m", Some(derived.critical_damping))
            .with_quantity("damping_ratio", "", Some(derived.damping_ratio))
            .with_quantity("damped_frequency", "rad/s", derived.damped_frequency)
            .with_note(derived.regime.description()))
    }
}
