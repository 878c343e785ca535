//! Forced-response sweep over a range of forcing frequencies.
//!
//! Each point is an independent forced simulation; points are evaluated in
//! parallel and returned in sweep order.

use rayon::prelude::*;
use serde::Serialize;
use shm_core::{TimeGrid, ensure_finite, ensure_positive};
use shm_sim::SimOptions;

use crate::error::{ModelError, ModelResult};
use crate::forced::ForcedOscillator;
use crate::params::{ForcingParameters, OscillatorParameters};

/// Spacing of sweep points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SweepSpacing {
    #[default]
    Linear,
    Logarithmic,
}

/// Forcing frequencies from `start` to `end` inclusive (rad/s).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrequencySweep {
    start: f64,
    end: f64,
    num_points: usize,
    spacing: SweepSpacing,
}

impl FrequencySweep {
    pub fn new(start: f64, end: f64, num_points: usize, spacing: SweepSpacing) -> ModelResult<Self> {
        let start = ensure_positive(start, "sweep start")?;
        let end = ensure_positive(end, "sweep end")?;
        if num_points < 2 {
            return Err(ModelError::InvalidArg {
                what: "sweep needs at least 2 points",
            });
        }
        if start >= end {
            return Err(ModelError::InvalidArg {
                what: "sweep start must be below sweep end",
            });
        }
        Ok(Self {
            start,
            end,
            num_points,
            spacing,
        })
    }

    pub fn num_points(&self) -> usize {
        self.num_points
    }

    pub fn spacing(&self) -> SweepSpacing {
        self.spacing
    }

    pub fn points(&self) -> Vec<f64> {
        let last = (self.num_points - 1) as f64;
        let mut points: Vec<f64> = match self.spacing {
            SweepSpacing::Linear => {
                let delta = (self.end - self.start) / last;
                (0..self.num_points)
                    .map(|i| self.start + i as f64 * delta)
                    .collect()
            }
            SweepSpacing::Logarithmic => {
                let (ls, le) = (self.start.ln(), self.end.ln());
                let delta = (le - ls) / last;
                (0..self.num_points)
                    .map(|i| (ls + i as f64 * delta).exp())
                    .collect()
            }
        };
        // Exact endpoints
        points[0] = self.start;
        points[self.num_points - 1] = self.end;
        points
    }
}

/// Observed steady-state amplitude at one forcing frequency.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResponsePoint {
    pub forcing_frequency: f64,
    pub amplitude: f64,
    /// `ω_f/ω_n`
    pub frequency_ratio: f64,
}

/// Simulate the forced oscillator at every sweep frequency.
pub fn frequency_response(
    params: &OscillatorParameters,
    force_amplitude: f64,
    sweep: &FrequencySweep,
    grid: &TimeGrid,
    opts: &SimOptions,
) -> ModelResult<Vec<ResponsePoint>> {
    let force_amplitude = ensure_finite(force_amplitude, "force amplitude")?;
    let wn = params.natural_frequency();
    let points = sweep.points();
    tracing::debug!(points = points.len(), wn, "starting frequency sweep");

    points
        .par_iter()
        .map(|&wf| -> ModelResult<ResponsePoint> {
            let model = ForcedOscillator::new(*params, ForcingParameters::new(force_amplitude, wf)?);
            let traj = model.simulate(grid, opts)?;
            let amplitude = ForcedOscillator::observed_amplitude(&traj).ok_or(
                ModelError::UndefinedQuantity {
                    what: "observed amplitude",
                },
            )?;
            Ok(ResponsePoint {
                forcing_frequency: wf,
                amplitude,
                frequency_ratio: wf / wn,
            })
        })
        .collect()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn points_are_strictly_increasing(
            start in 0.01_f64..10.0,
            span in 0.1_f64..100.0,
            n in 2_usize..50,
            log in any::<bool>(),
        ) {
            let spacing = if log { SweepSpacing::Logarithmic } else { SweepSpacing::Linear };
            let sweep = FrequencySweep::new(start, start + span, n, spacing).unwrap();
            let p = sweep.points();
            prop_assert_eq!(p.len(), n);
            prop_assert!(p.windows(2).all(|w| w[1] > w[0]));
        }
    }
}
