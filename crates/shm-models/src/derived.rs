//! Quantities computed from parameters alone, without integration.
//!
//! Free functions take raw values and return `None` where the quantity is not
//! defined, so callers can show "undefined" instead of propagating `NaN`.

use serde::Serialize;
use shm_core::{Tolerances, nearly_equal};
use std::f64::consts::PI;
use std::fmt;
use tracing::{debug, warn};

use crate::error::{ModelError, ModelResult};
use crate::params::OscillatorParameters;

/// Tolerance for treating two parameters as equal: `c` against `c_crit`, and
/// two superposed frequencies.
pub const EQUALITY_TOLERANCE: Tolerances = Tolerances::DEFAULT;

/// `|ω_f/ω_n - 1|` at or below which forcing counts as near resonance.
pub const NEAR_RESONANCE_BAND: f64 = 0.1;

/// `√(k/m)`, defined only for finite `m > 0` and `k > 0`.
pub fn natural_frequency(mass: f64, stiffness: f64) -> Option<f64> {
    let defined = mass.is_finite() && stiffness.is_finite() && mass > 0.0 && stiffness > 0.0;
    defined.then(|| (stiffness / mass).sqrt())
}

/// Like [`natural_frequency`] but as an error for callers that need the value.
pub fn require_natural_frequency(mass: f64, stiffness: f64) -> ModelResult<f64> {
    natural_frequency(mass, stiffness).ok_or(ModelError::UndefinedQuantity {
        what: "natural frequency",
    })
}

/// `2π/ω` for a finite `ω > 0`.
pub fn period_of(angular_frequency: f64) -> Option<f64> {
    (angular_frequency.is_finite() && angular_frequency > 0.0).then(|| 2.0 * PI / angular_frequency)
}

/// `2√(km)`, defined only for finite `m > 0` and `k > 0`.
pub fn critical_damping(mass: f64, stiffness: f64) -> Option<f64> {
    natural_frequency(mass, stiffness).map(|_| 2.0 * (stiffness * mass).sqrt())
}

/// Qualitative behaviour of a free damped oscillator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum DampingRegime {
    /// `c = 0`: persistent oscillation
    Undamped,
    /// `0 < c < c_crit`: oscillation under a decaying envelope
    Underdamped,
    /// `c = c_crit`: fastest return to equilibrium without oscillating
    CriticallyDamped,
    /// `c > c_crit`: slow return without oscillating
    Overdamped,
}

impl DampingRegime {
    /// Classify a non-negative damping coefficient against `c_crit`.
    ///
    /// `c == 0` is tested exactly; `c` is critical when it matches `c_crit`
    /// within [`EQUALITY_TOLERANCE`].
    pub fn classify(damping: f64, critical: f64) -> Self {
        let regime = if damping == 0.0 {
            Self::Undamped
        } else if nearly_equal(damping, critical, EQUALITY_TOLERANCE) {
            Self::CriticallyDamped
        } else if damping < critical {
            Self::Underdamped
        } else {
            Self::Overdamped
        };
        debug!(damping, critical, ?regime, "classified damping regime");
        regime
    }

    pub fn oscillates(&self) -> bool {
        matches!(self, Self::Undamped | Self::Underdamped)
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Undamped => "undamped: the oscillation persists with constant amplitude",
            Self::Underdamped => {
                "underdamped: the system oscillates with an exponentially decaying envelope"
            }
            Self::CriticallyDamped => {
                "critically damped: fastest return to equilibrium without oscillating"
            }
            Self::Overdamped => "overdamped: slow return to equilibrium without oscillating",
        }
    }
}

impl fmt::Display for DampingRegime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undamped => write!(f, "undamped"),
            Self::Underdamped => write!(f, "underdamped"),
            Self::CriticallyDamped => write!(f, "critically damped"),
            Self::Overdamped => write!(f, "overdamped"),
        }
    }
}

/// Scalar facts about a validated oscillator.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct DerivedQuantities {
    /// ω_n (rad/s)
    pub natural_frequency: f64,
    /// T = 2π/ω_n (s)
    pub period: f64,
    /// c_crit (N·s/m)
    pub critical_damping: f64,
    /// ζ = c/c_crit
    pub damping_ratio: f64,
    pub regime: DampingRegime,
    /// ω_d = ω_n√(1 - ζ²), only while the system still oscillates
    pub damped_frequency: Option<f64>,
}

impl DerivedQuantities {
    pub fn from_params(params: &OscillatorParameters) -> Self {
        let natural_frequency = params.natural_frequency();
        let damping_ratio = params.damping_ratio();
        let regime = params.regime();
        let damped_frequency = regime
            .oscillates()
            .then(|| natural_frequency * (1.0 - damping_ratio * damping_ratio).sqrt());

        Self {
            natural_frequency,
            period: params.period(),
            critical_damping: params.critical_damping(),
            damping_ratio,
            regime,
            damped_frequency,
        }
    }
}

/// Where the forcing frequency sits relative to the natural frequency.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ResonanceComment {
    BelowResonance,
    NearResonance,
    AboveResonance,
}

impl ResonanceComment {
    pub fn description(&self) -> &'static str {
        match self {
            Self::BelowResonance => {
                "forcing below the natural frequency: moderate steady-state amplitude"
            }
            Self::NearResonance => {
                "forcing close to the natural frequency: resonance, large steady-state amplitude"
            }
            Self::AboveResonance => {
                "forcing above the natural frequency: steady-state amplitude falls off"
            }
        }
    }
}

/// Natural and forcing frequencies side by side.
///
/// Built from raw mass/stiffness so it can also describe parameter sets that
/// cannot be simulated; then `natural_frequency` is `None` and no resonance
/// statement is made.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ResonanceReport {
    pub natural_frequency: Option<f64>,
    pub forcing_frequency: f64,
}

impl ResonanceReport {
    pub fn new(mass: f64, stiffness: f64, forcing_frequency: f64) -> Self {
        let natural_frequency = natural_frequency(mass, stiffness);
        if natural_frequency.is_none() {
            warn!(mass, stiffness, "natural frequency undefined; resonance commentary suppressed");
        }
        Self {
            natural_frequency,
            forcing_frequency,
        }
    }

    /// `ω_f / ω_n`
    pub fn frequency_ratio(&self) -> Option<f64> {
        self.natural_frequency.map(|wn| self.forcing_frequency / wn)
    }

    pub fn comment(&self) -> Option<ResonanceComment> {
        let ratio = self.frequency_ratio()?;
        Some(if (ratio - 1.0).abs() <= NEAR_RESONANCE_BAND {
            ResonanceComment::NearResonance
        } else if ratio < 1.0 {
            ResonanceComment::BelowResonance
        } else {
            ResonanceComment::AboveResonance
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn natural_frequency_defined_only_for_positive_inputs() {
        assert!((natural_frequency(1.0, 10.0).unwrap() - 10f64.sqrt()).abs() < 1e-12);
        assert_eq!(natural_frequency(0.0, 10.0), None);
        assert_eq!(natural_frequency(1.0, 0.0), None);
        assert_eq!(natural_frequency(-1.0, 10.0), None);
        assert_eq!(natural_frequency(f64::NAN, 10.0), None);
        assert!(matches!(
            require_natural_frequency(0.0, 10.0),
            Err(ModelError::UndefinedQuantity { .. })
        ));
    }

    #[test]
    fn period_and_critical_damping() {
        assert!((period_of(10f64.sqrt()).unwrap() - 1.9869).abs() < 1e-4);
        assert_eq!(period_of(0.0), None);
        assert!((critical_damping(1.0, 10.0).unwrap() - 6.324555320336759).abs() < 1e-12);
        assert_eq!(critical_damping(0.0, 10.0), None);
    }

    #[test]
    fn critical_damping_boundary() {
        let c_crit = critical_damping(1.0, 10.0).unwrap();
        let delta = 1e-6;
        assert_eq!(
            DampingRegime::classify(c_crit, c_crit),
            DampingRegime::CriticallyDamped
        );
        assert_eq!(
            DampingRegime::classify(c_crit - delta, c_crit),
            DampingRegime::Underdamped
        );
        assert_eq!(
            DampingRegime::classify(c_crit + delta, c_crit),
            DampingRegime::Overdamped
        );
        assert_eq!(DampingRegime::classify(0.0, c_crit), DampingRegime::Undamped);
    }

    #[test]
    fn derived_quantities_for_underdamped() {
        let p = OscillatorParameters::new(1.0, 10.0, 1.0).unwrap();
        let d = p.derived();
        assert_eq!(d.regime, DampingRegime::Underdamped);
        let zeta = 1.0 / (2.0 * 10f64.sqrt());
        assert!((d.damping_ratio - zeta).abs() < 1e-12);
        let wd = d.damped_frequency.unwrap();
        assert!((wd - 10f64.sqrt() * (1.0 - zeta * zeta).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn overdamped_has_no_damped_frequency() {
        let p = OscillatorParameters::new(1.0, 10.0, 20.0).unwrap();
        assert_eq!(p.derived().regime, DampingRegime::Overdamped);
        assert_eq!(p.derived().damped_frequency, None);
    }

    #[test]
    fn resonance_guard() {
        let report = ResonanceReport::new(0.0, 10.0, 3.0);
        assert_eq!(report.natural_frequency, None);
        assert_eq!(report.frequency_ratio(), None);
        assert_eq!(report.comment(), None);
    }

    #[test]
    fn resonance_comments() {
        let wn = 10f64.sqrt();
        assert_eq!(
            ResonanceReport::new(1.0, 10.0, wn).comment(),
            Some(ResonanceComment::NearResonance)
        );
        assert_eq!(
            ResonanceReport::new(1.0, 10.0, 1.0).comment(),
            Some(ResonanceComment::BelowResonance)
        );
        assert_eq!(
            ResonanceReport::new(1.0, 10.0, 10.0).comment(),
            Some(ResonanceComment::AboveResonance)
        );
    }
}
