//! Simple pendulum, nonlinear and small-angle.
//!
//! Nonlinear model, state `[θ, ω]`:
//!
//! ```text
//! θ̇ = ω
//! ω̇ = -(g/L)·sin θ
//! ```
//!
//! Linear reference: `θ(t) = θ0·cos(√(g/L)·t)`. Both share θ0 and the time
//! grid so their divergence at large amplitude can be compared sample by sample.

use serde::Serialize;
use shm_core::TimeGrid;
use shm_sim::{OdeModel, SimOptions, State, Trajectory, run_sim};
use std::f64::consts::PI;

use crate::error::ModelResult;
use crate::params::PendulumParameters;
use crate::scenario::{Evaluation, Scenario};

/// Bob position in the pendulum plane, pivot at the origin, `y` up.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct BobPosition {
    pub x: f64,
    pub y: f64,
}

/// `x = L·sin θ`, `y = -L·cos θ`.
pub fn cartesian(length: f64, theta: f64) -> BobPosition {
    BobPosition {
        x: length * theta.sin(),
        y: -length * theta.cos(),
    }
}

/// Arithmetic-geometric mean of two positive numbers.
fn agm(mut a: f64, mut b: f64) -> f64 {
    for _ in 0..64 {
        if (a - b).abs() <= 1e-15 * a {
            break;
        }
        (a, b) = (0.5 * (a + b), (a * b).sqrt());
    }
    a
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pendulum {
    params: PendulumParameters,
}

/// Nonlinear and linear trajectories on one grid.
#[derive(Clone, Debug, PartialEq)]
pub struct PendulumRun {
    pub nonlinear: Trajectory,
    pub linear: Trajectory,
    /// Small-angle period `2π·√(L/g)` (s)
    pub linear_period: f64,
}

impl PendulumRun {
    /// `max_t |θ_nonlinear - θ_linear|` (rad)
    pub fn max_divergence(&self) -> f64 {
        self.nonlinear
            .q()
            .iter()
            .zip(self.linear.q())
            .fold(0.0_f64, |acc, (a, b)| acc.max((a - b).abs()))
    }

    /// Bob path of the nonlinear pendulum.
    pub fn bob_path(&self, length: f64) -> Vec<BobPosition> {
        self.nonlinear.q().iter().map(|&th| cartesian(length, th)).collect()
    }
}

impl Pendulum {
    pub fn new(params: PendulumParameters) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &PendulumParameters {
        &self.params
    }

    /// `√(g/L)` (rad/s)
    pub fn linear_frequency(&self) -> f64 {
        (self.params.gravity() / self.params.length()).sqrt()
    }

    /// `2π/√(g/L)` (s)
    pub fn linear_period(&self) -> f64 {
        2.0 * PI / self.linear_frequency()
    }

    /// Exact period at amplitude θ0: `2π / (ω_lin · AGM(1, cos(θ0/2)))`.
    pub fn large_amplitude_period(&self) -> f64 {
        let half = 0.5 * self.params.initial_angle();
        self.linear_period() / agm(1.0, half.cos())
    }

    /// Closed-form small-angle trajectory.
    pub fn linear_trajectory(&self, grid: &TimeGrid) -> ModelResult<Trajectory> {
        let w = self.linear_frequency();
        let theta0 = self.params.initial_angle();
        let q = grid.map(|t| theta0 * (w * t).cos());
        let qdot = grid.map(|t| -theta0 * w * (w * t).sin());
        Ok(Trajectory::new(grid.times().to_vec(), q, qdot)?)
    }

    pub fn simulate(&self, grid: &TimeGrid, opts: &SimOptions) -> ModelResult<PendulumRun> {
        let record = run_sim::<2, _>(self, grid, opts)?;
        Ok(PendulumRun {
            nonlinear: Trajectory::from_record(&record),
            linear: self.linear_trajectory(grid)?,
            linear_period: self.linear_period(),
        })
    }
}

impl OdeModel<2> for Pendulum {
    fn initial_state(&self) -> State<2> {
        State::<2>::new(self.params.initial_angle(), 0.0)
    }

    fn rhs(&self, _t: f64, y: &State<2>) -> State<2> {
        let g_over_l = self.params.gravity() / self.params.length();
        State::<2>::new(y[1], -g_over_l * y[0].sin())
    }
}

impl Scenario for Pendulum {
    fn name(&self) -> &'static str {
        "pendulum"
    }

    fn evaluate(&self, grid: &TimeGrid, opts: &SimOptions) -> ModelResult<Evaluation> {
        let run = self.simulate(grid, opts)?;
        let path = run.bob_path(self.params.length());

        Ok(Evaluation::new(self.name(), run.nonlinear.t().to_vec())
            .with_series("theta", "rad", run.nonlinear.q().to_vec())
            .with_series("omega", "rad/s", run.nonlinear.qdot().to_vec())
            .with_series("theta_linear", "rad", run.linear.q().to_vec())
            .with_series("bob_x", "m", path.iter().map(|p| p.x).collect())
            .with_series("bob_y", "m", path.iter().map(|p| p.y).collect())
            .with_quantity("linear_period", "s", Some(run.linear_period))
            .with_quantity("large_amplitude_period", "s", Some(self.large_amplitude_period()))
            .with_quantity("observed_period", "s", run.nonlinear.estimated_period())
            .with_quantity("max_divergence", "rad", Some(run.max_divergence())))
    }
}
