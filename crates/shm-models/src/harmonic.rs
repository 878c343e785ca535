//! Undamped oscillator in closed form: `x(t) = A·cos(ω·t)`, `ω = √(k/m)`.

use serde::Serialize;
use shm_core::{TimeGrid, ensure_finite};
use shm_sim::{SimOptions, Trajectory};

use crate::error::ModelResult;
use crate::params::OscillatorParameters;
use crate::scenario::{Evaluation, Scenario};

/// Kinetic, potential and total energy at one instant (J).
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Energy {
    pub kinetic: f64,
    pub potential: f64,
    pub total: f64,
}

/// Kinematics and energies sampled on a grid.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HarmonicSeries {
    pub t: Vec<f64>,
    pub position: Vec<f64>,
    pub velocity: Vec<f64>,
    pub acceleration: Vec<f64>,
    pub kinetic: Vec<f64>,
    pub potential: Vec<f64>,
    pub total: Vec<f64>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HarmonicOscillator {
    params: OscillatorParameters,
    amplitude: f64,
}

impl HarmonicOscillator {
    pub fn new(mass: f64, stiffness: f64, amplitude: f64) -> ModelResult<Self> {
        Ok(Self {
            params: OscillatorParameters::undamped(mass, stiffness)?,
            amplitude: ensure_finite(amplitude, "amplitude")?,
        })
    }

    pub fn params(&self) -> &OscillatorParameters {
        &self.params
    }

    pub fn amplitude(&self) -> f64 {
        self.amplitude
    }

    /// ω (rad/s)
    pub fn angular_frequency(&self) -> f64 {
        self.params.natural_frequency()
    }

    /// T (s)
    pub fn period(&self) -> f64 {
        self.params.period()
    }

    pub fn position(&self, t: f64) -> f64 {
        self.amplitude * (self.angular_frequency() * t).cos()
    }

    pub fn velocity(&self, t: f64) -> f64 {
        let w = self.angular_frequency();
        -self.amplitude * w * (w * t).sin()
    }

    /// `-ω²·x(t)`
    pub fn acceleration(&self, t: f64) -> f64 {
        let w = self.angular_frequency();
        -w * w * self.position(t)
    }

    pub fn energy_at(&self, t: f64) -> Energy {
        let x = self.position(t);
        let v = self.velocity(t);
        let potential = 0.5 * self.params.stiffness() * x * x;
        let kinetic = 0.5 * self.params.mass() * v * v;
        Energy {
            kinetic,
            potential,
            total: kinetic + potential,
        }
    }

    /// `½·k·A²`, constant over time.
    pub fn total_energy(&self) -> f64 {
        0.5 * self.params.stiffness() * self.amplitude * self.amplitude
    }

    pub fn sample(&self, grid: &TimeGrid) -> HarmonicSeries {
        let energies: Vec<Energy> = grid.times().iter().map(|&t| self.energy_at(t)).collect();
        HarmonicSeries {
            t: grid.times().to_vec(),
            position: grid.map(|t| self.position(t)),
            velocity: grid.map(|t| self.velocity(t)),
            acceleration: grid.map(|t| self.acceleration(t)),
            kinetic: energies.iter().map(|e| e.kinetic).collect(),
            potential: energies.iter().map(|e| e.potential).collect(),
            total: energies.iter().map(|e| e.total).collect(),
        }
    }

    pub fn trajectory(&self, grid: &TimeGrid) -> ModelResult<Trajectory> {
        Ok(Trajectory::new(
            grid.times().to_vec(),
            grid.map(|t| self.position(t)),
            grid.map(|t| self.velocity(t)),
        )?)
    }
}

impl Scenario for HarmonicOscillator {
    fn name(&self) -> &'static str {
        "harmonic"
    }

    fn evaluate(&self, grid: &TimeGrid, _opts: &SimOptions) -> ModelResult<Evaluation> {
        let s = self.sample(grid);
        Ok(Evaluation::new(self.name(), s.t)
            .with_series("position", "m", s.position)
            .with_series("velocity", "m/s", s.velocity)
            .with_series("acceleration", "m/s^2", s.acceleration)
            .with_series("kinetic_energy", "J", s.kinetic)
            .with_series("potential_energy", "J", s.potential)
            .with_series("total_energy", "J", s.total)
            .with_quantity("natural_frequency", "rad/s", Some(self.angular_frequency()))
            .with_quantity("period", "s", Some(self.period()))
            .with_quantity("total_energy", "J", Some(self.total_energy())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_invalid_parameters() {
        assert!(HarmonicOscillator::new(0.0, 10.0, 1.0).is_err());
        assert!(HarmonicOscillator::new(1.0, 10.0, f64::NAN).is_err());
    }

    #[test]
    fn kinematics_at_quarter_period() {
        let osc = HarmonicOscillator::new(1.0, 4.0, 0.5).unwrap();
        let t = osc.period() / 4.0;
        assert!(osc.position(t).abs() < 1e-12);
        assert!((osc.velocity(t) + 0.5 * 2.0).abs() < 1e-12);
        assert!((osc.acceleration(0.0) + 4.0 * 0.5).abs() < 1e-12);
    }

    #[test]
    fn energy_exchanges_between_forms() {
        let osc = HarmonicOscillator::new(2.0, 8.0, 1.0).unwrap();
        let start = osc.energy_at(0.0);
        assert!(start.kinetic.abs() < 1e-12);
        assert!((start.potential - 4.0).abs() < 1e-12);

        let quarter = osc.energy_at(osc.period() / 4.0);
        assert!(quarter.potential.abs() < 1e-12);
        assert!((quarter.kinetic - 4.0).abs() < 1e-9);
    }

    #[test]
    fn series_lengths_match_grid() {
        let grid = TimeGrid::linspace(3.0, 77).unwrap();
        let osc = HarmonicOscillator::new(1.0, 10.0, 1.0).unwrap();
        let s = osc.sample(&grid);
        assert_eq!(s.position.len(), 77);
        assert_eq!(s.total.len(), 77);
        assert_eq!(osc.trajectory(&grid).unwrap().len(), 77);
    }
}
