//! Validated parameter records.
//!
//! Every constructor checks its invariants up front, so the models built from
//! these records never divide by zero or take the root of a negative number.

use shm_core::units::{Accel, Angle, AngularVelocity, Force, Length, si};
use shm_core::{ensure_finite, ensure_non_negative, ensure_positive};
use std::f64::consts::PI;

use crate::derived::{DampingRegime, DerivedQuantities};
use crate::error::{ModelError, ModelResult};

/// Mass-spring-damper parameters: `m > 0`, `k > 0`, `c >= 0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OscillatorParameters {
    mass: f64,
    stiffness: f64,
    damping: f64,
}

impl OscillatorParameters {
    pub fn new(mass: f64, stiffness: f64, damping: f64) -> ModelResult<Self> {
        Ok(Self {
            mass: ensure_positive(mass, "mass")?,
            stiffness: ensure_positive(stiffness, "stiffness")?,
            damping: ensure_non_negative(damping, "damping")?,
        })
    }

    pub fn undamped(mass: f64, stiffness: f64) -> ModelResult<Self> {
        Self::new(mass, stiffness, 0.0)
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn stiffness(&self) -> f64 {
        self.stiffness
    }

    pub fn damping(&self) -> f64 {
        self.damping
    }

    /// `ω_n = √(k/m)` (rad/s)
    pub fn natural_frequency(&self) -> f64 {
        (self.stiffness / self.mass).sqrt()
    }

    /// `T = 2π/ω_n` (s)
    pub fn period(&self) -> f64 {
        2.0 * PI / self.natural_frequency()
    }

    /// `c_crit = 2√(km)` (N·s/m)
    pub fn critical_damping(&self) -> f64 {
        2.0 * (self.stiffness * self.mass).sqrt()
    }

    /// `ζ = c / c_crit`
    pub fn damping_ratio(&self) -> f64 {
        self.damping / self.critical_damping()
    }

    pub fn regime(&self) -> DampingRegime {
        DampingRegime::classify(self.damping, self.critical_damping())
    }

    pub fn derived(&self) -> DerivedQuantities {
        DerivedQuantities::from_params(self)
    }

    /// Mechanical energy `½kx² + ½mv²` (J).
    pub fn energy(&self, position: f64, velocity: f64) -> f64 {
        0.5 * self.stiffness * position * position + 0.5 * self.mass * velocity * velocity
    }
}

/// Sinusoidal external force `F0·cos(ω_f t)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ForcingParameters {
    amplitude: f64,
    angular_frequency: f64,
}

impl ForcingParameters {
    pub fn new(amplitude: f64, angular_frequency: f64) -> ModelResult<Self> {
        Ok(Self {
            amplitude: ensure_finite(amplitude, "forcing amplitude")?,
            angular_frequency: ensure_positive(angular_frequency, "forcing frequency")?,
        })
    }

    pub fn from_quantities(amplitude: Force, angular_frequency: AngularVelocity) -> ModelResult<Self> {
        Self::new(
            si::newtons(amplitude),
            si::radians_per_second(angular_frequency),
        )
    }

    pub fn amplitude(&self) -> f64 {
        self.amplitude
    }

    pub fn angular_frequency(&self) -> f64 {
        self.angular_frequency
    }
}

/// Simple pendulum: `L > 0`, `g > 0`, `|θ0| < π`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PendulumParameters {
    length: f64,
    gravity: f64,
    initial_angle: f64,
}

impl PendulumParameters {
    pub fn new(length: f64, gravity: f64, initial_angle: f64) -> ModelResult<Self> {
        let length = ensure_positive(length, "length")?;
        let gravity = ensure_positive(gravity, "gravity")?;
        let initial_angle = ensure_finite(initial_angle, "initial angle")?;
        if initial_angle.abs() >= PI {
            return Err(ModelError::InvalidParameter {
                what: "initial angle",
                value: initial_angle,
            });
        }
        Ok(Self {
            length,
            gravity,
            initial_angle,
        })
    }

    pub fn from_quantities(length: Length, gravity: Accel, initial_angle: Angle) -> ModelResult<Self> {
        Self::new(
            si::meters(length),
            si::meters_per_second_squared(gravity),
            si::radians(initial_angle),
        )
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn gravity(&self) -> f64 {
        self.gravity
    }

    /// θ0 (rad)
    pub fn initial_angle(&self) -> f64 {
        self.initial_angle
    }
}

/// `[q0, q̇0]` for a second-order model.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InitialState {
    pub position: f64,
    pub velocity: f64,
}

impl InitialState {
    pub fn new(position: f64, velocity: f64) -> ModelResult<Self> {
        Ok(Self {
            position: ensure_finite(position, "initial position")?,
            velocity: ensure_finite(velocity, "initial velocity")?,
        })
    }

    /// Equilibrium with zero velocity.
    pub fn at_rest() -> Self {
        Self::default()
    }
}
