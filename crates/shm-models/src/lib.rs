//! Physical oscillator models.
//!
//! Damped, forced, pendulum and closed-form models with their derived
//! quantities. Every model implements [`Scenario`], so callers can evaluate
//! any of them through one [`Evaluation`] shape.

pub mod damped;
pub mod derived;
pub mod error;
pub mod forced;
pub mod harmonic;
pub mod params;
pub mod pendulum;
pub mod scenario;
pub mod superposition;
pub mod sweep;

pub use damped::DampedOscillator;
pub use derived::{
    DampingRegime, DerivedQuantities, EQUALITY_TOLERANCE, NEAR_RESONANCE_BAND,
    ResonanceComment, ResonanceReport, critical_damping, natural_frequency, period_of,
    require_natural_frequency,
};
pub use error::{ModelError, ModelResult};
pub use forced::{ForcedOscillator, TRANSIENT_FRACTION};
pub use harmonic::{Energy, HarmonicOscillator, HarmonicSeries};
pub use params::{ForcingParameters, InitialState, OscillatorParameters, PendulumParameters};
pub use pendulum::{BobPosition, Pendulum, PendulumRun, cartesian};
pub use scenario::{Evaluation, Quantity, Scenario, Series};
pub use superposition::{
    BEAT_THRESHOLD, BeatAnalysis, Oscillation, Superposition, SuperpositionSeries,
};
pub use sweep::{FrequencySweep, ResponsePoint, SweepSpacing, frequency_response};

pub use shm_core::TimeGrid;
pub use shm_sim::{IntegratorType, SimError, SimOptions, SimStats, Trajectory};
