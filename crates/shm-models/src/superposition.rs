//! Sum of two undamped cosines and the beat it may produce.
//!
//! ```text
//! x(t) = A1·cos(ω1·t) + A2·cos(ω2·t)
//! ```

use serde::Serialize;
use shm_core::{TimeGrid, ensure_finite, ensure_positive, nearly_equal};
use shm_sim::SimOptions;
use std::f64::consts::PI;

use crate::derived::EQUALITY_TOLERANCE;
use crate::error::{ModelError, ModelResult};
use crate::scenario::{Evaluation, Scenario};

/// Frequency difference (rad/s) below which a beat is reported.
pub const BEAT_THRESHOLD: f64 = 2.0;

/// One cosine component `A·cos(ω·t)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Oscillation {
    amplitude: f64,
    angular_frequency: f64,
}

impl Oscillation {
    pub fn new(amplitude: f64, angular_frequency: f64) -> ModelResult<Self> {
        Ok(Self {
            amplitude: ensure_finite(amplitude, "amplitude")?,
            angular_frequency: ensure_positive(angular_frequency, "angular_frequency")?,
        })
    }

    pub fn amplitude(&self) -> f64 {
        self.amplitude
    }

    pub fn angular_frequency(&self) -> f64 {
        self.angular_frequency
    }

    pub fn position(&self, t: f64) -> f64 {
        self.amplitude * (self.angular_frequency * t).cos()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SuperpositionSeries {
    pub t: Vec<f64>,
    pub first: Vec<f64>,
    pub second: Vec<f64>,
    pub total: Vec<f64>,
}

/// Outcome of the beat check.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BeatAnalysis {
    /// `|ω1 − ω2| < BEAT_THRESHOLD`. `period` is `None` when the frequencies
    /// coincide.
    Beat {
        angular_frequency: f64,
        period: Option<f64>,
    },
    NoClearBeat { frequency_difference: f64 },
}

impl BeatAnalysis {
    pub fn analyze(w1: f64, w2: f64) -> Self {
        let diff = (w1 - w2).abs();
        if diff >= BEAT_THRESHOLD {
            return BeatAnalysis::NoClearBeat {
                frequency_difference: diff,
            };
        }
        let period = if nearly_equal(w1, w2, EQUALITY_TOLERANCE) {
            tracing::warn!(w1, w2, "beat period undefined for coincident frequencies");
            None
        } else {
            Some(2.0 * PI / diff)
        };
        BeatAnalysis::Beat {
            angular_frequency: diff,
            period,
        }
    }

    pub fn is_beat(&self) -> bool {
        matches!(self, BeatAnalysis::Beat { .. })
    }

    /// `|ω1 − ω2|` when a beat is reported.
    pub fn beat_frequency(&self) -> Option<f64> {
        match self {
            BeatAnalysis::Beat {
                angular_frequency, ..
            } => Some(*angular_frequency),
            BeatAnalysis::NoClearBeat { .. } => None,
        }
    }

    pub fn beat_period(&self) -> ModelResult<f64> {
        match self {
            BeatAnalysis::Beat {
                period: Some(p), ..
            } => Ok(*p),
            BeatAnalysis::Beat { period: None, .. } => Err(ModelError::DegenerateBeat),
            BeatAnalysis::NoClearBeat { .. } => Err(ModelError::UndefinedQuantity {
                what: "beat_period",
            }),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            BeatAnalysis::Beat {
                angular_frequency,
                period: Some(p),
            } => format!(
                "Beat phenomenon: beat frequency {:.3} rad/s, beat period {:.3} s",
                angular_frequency, p
            ),
            BeatAnalysis::Beat { period: None, .. } => {
                "Frequencies coincide: the sum is a single oscillation and the beat period is undefined"
                    .to_string()
            }
            BeatAnalysis::NoClearBeat { .. } => "No clear beat phenomenon".to_string(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Superposition {
    first: Oscillation,
    second: Oscillation,
}

impl Superposition {
    pub fn new(first: Oscillation, second: Oscillation) -> Self {
        Self { first, second }
    }

    pub fn first(&self) -> &Oscillation {
        &self.first
    }

    pub fn second(&self) -> &Oscillation {
        &self.second
    }

    pub fn position(&self, t: f64) -> f64 {
        self.first.position(t) + self.second.position(t)
    }

    pub fn sample(&self, grid: &TimeGrid) -> SuperpositionSeries {
        let first = grid.map(|t| self.first.position(t));
        let second = grid.map(|t| self.second.position(t));
        let total = first.iter().zip(&second).map(|(a, b)| a + b).collect();
        SuperpositionSeries {
            t: grid.times().to_vec(),
            first,
            second,
            total,
        }
    }

    pub fn beat(&self) -> BeatAnalysis {
        BeatAnalysis::analyze(
            self.first.angular_frequency(),
            self.second.angular_frequency(),
        )
    }
}

impl Scenario for Superposition {
    fn name(&self) -> &'static str {
        "superposition"
    }

    fn evaluate(&self, grid: &TimeGrid, _opts: &SimOptions) -> ModelResult<Evaluation> {
        let s = self.sample(grid);
        let beat = self.beat();
        Ok(Evaluation::new(self.name(), s.t)
            .with_series("x1", "m", s.first)
            .with_series("x2", "m", s.second)
            .with_series("total", "m", s.total)
            .with_quantity("beat_frequency", "rad/s", beat.beat_frequency())
            .with_quantity("beat_period", "s", beat.beat_period().ok())
            .with_note(beat.describe()))
    }
}
