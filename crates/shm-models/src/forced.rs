//! Damped oscillator driven by a sinusoidal force.
//!
//! ```text
//! m·ẍ + c·ẋ + k·x = F0·cos(ω_f·t)
//! ```
//!
//! The system starts at rest at equilibrium; the forcing alone drives the
//! motion. The steady-state amplitude is observed from the simulated
//! trajectory, never computed in closed form.

use shm_core::TimeGrid;
use shm_sim::{OdeModel, SimOptions, State, Trajectory, run_sim};

use crate::derived::ResonanceReport;
use crate::error::ModelResult;
use crate::params::{ForcingParameters, OscillatorParameters};
use crate::scenario::{Evaluation, Scenario};

/// Fraction of the horizon treated as transient when observing amplitude.
pub const TRANSIENT_FRACTION: f64 = 0.5;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ForcedOscillator {
    params: OscillatorParameters,
    forcing: ForcingParameters,
}

impl ForcedOscillator {
    pub fn new(params: OscillatorParameters, forcing: ForcingParameters) -> Self {
        Self { params, forcing }
    }

    pub fn params(&self) -> &OscillatorParameters {
        &self.params
    }

    pub fn forcing(&self) -> &ForcingParameters {
        &self.forcing
    }

    pub fn resonance(&self) -> ResonanceReport {
        ResonanceReport::new(
            self.params.mass(),
            self.params.stiffness(),
            self.forcing.angular_frequency(),
        )
    }

    pub fn simulate(&self, grid: &TimeGrid, opts: &SimOptions) -> ModelResult<Trajectory> {
        let record = run_sim::<2, _>(self, grid, opts)?;
        Ok(Trajectory::from_record(&record))
    }

    /// Peak `|x|` over the final `1 - TRANSIENT_FRACTION` of the trajectory.
    pub fn observed_amplitude(trajectory: &Trajectory) -> Option<f64> {
        let t = trajectory.t();
        let (first, last) = (*t.first()?, *t.last()?);
        trajectory.max_abs_q_after(first + TRANSIENT_FRACTION * (last - first))
    }
}

impl OdeModel<2> for ForcedOscillator {
    fn initial_state(&self) -> State<2> {
        State::<2>::zeros()
    }

    fn rhs(&self, t: f64, y: &State<2>) -> State<2> {
        let p = &self.params;
        let f = &self.forcing;
        let (x, v) = (y[0], y[1]);
        let drive = f.amplitude() / p.mass() * (f.angular_frequency() * t).cos();
        State::<2>::new(
            v,
            -(p.damping() / p.mass()) * v - (p.stiffness() / p.mass()) * x + drive,
        )
    }
}

impl Scenario for ForcedOscillator {
    fn name(&self) -> &'static str {
        "forced"
    }

    fn evaluate(&self, grid: &TimeGrid, opts: &SimOptions) -> ModelResult<Evaluation> {
        let traj = self.simulate(grid, opts)?;
        let report = self.resonance();
        let amplitude = Self::observed_amplitude(&traj);
        let force: Vec<f64> = grid.map(|t| {
            self.forcing.amplitude() * (self.forcing.angular_frequency() * t).cos()
        });

        let eval = Evaluation::new(self.name(), traj.t().to_vec())
            .with_series("position", "m", traj.q().to_vec())
            .with_series("velocity", "m/s", traj.qdot().to_vec())
            .with_series("force", "N", force)
            .with_quantity("natural_frequency", "rad/s", report.natural_frequency)
            .with_quantity("forcing_frequency", "rad/s", Some(report.forcing_frequency))
            .with_quantity("frequency_ratio", "", report.frequency_ratio())
            .with_quantity("observed_amplitude", "m", amplitude);

        Ok(match report.comment() {
            Some(comment) => eval.with_note(comment.description()),
            None => eval,
        })
    }
}
