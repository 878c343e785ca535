//! Sample-time grids shared by every model.
//!
//! A grid is built once per evaluation and read by both the integrator and the
//! closed-form models, so trajectories from different models line up point by
//! point.

use crate::error::{CoreError, CoreResult};
use crate::numeric::{ensure_positive, Real};
use crate::units::{Time, si};

/// Ordered, strictly increasing sample times.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TimeGrid {
    times: Vec<Real>,
}

impl TimeGrid {
    /// Uniform grid `0 = t_0 < ... < t_{n-1} = t_max`.
    pub fn linspace(t_max: Real, num_points: usize) -> CoreResult<Self> {
        ensure_positive(t_max, "t_max")?;
        if num_points < 2 {
            return Err(CoreError::InvalidArg {
                what: "time grid needs at least 2 points",
            });
        }

        let delta = t_max / (num_points - 1) as Real;
        let mut times: Vec<Real> = (0..num_points).map(|i| i as Real * delta).collect();

        // Ensure exact endpoint
        times[num_points - 1] = t_max;
        Ok(Self { times })
    }

    /// Uniform grid from a typed duration.
    pub fn over(duration: Time, num_points: usize) -> CoreResult<Self> {
        Self::linspace(si::seconds(duration), num_points)
    }

    /// Arbitrary strictly increasing sample times starting at `t = 0`.
    pub fn from_samples(times: Vec<Real>) -> CoreResult<Self> {
        if times.len() < 2 {
            return Err(CoreError::InvalidArg {
                what: "time grid needs at least 2 points",
            });
        }
        if let Some(bad) = times.iter().find(|t| !t.is_finite()) {
            return Err(CoreError::NonFinite {
                what: "sample time",
                value: *bad,
            });
        }
        if times[0] != 0.0 {
            return Err(CoreError::InvalidParameter {
                what: "first sample time must be 0",
                value: times[0],
            });
        }
        if times.windows(2).any(|w| w[1] <= w[0]) {
            return Err(CoreError::InvalidArg {
                what: "sample times must be strictly increasing",
            });
        }
        Ok(Self { times })
    }

    pub fn times(&self) -> &[Real] {
        &self.times
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn start(&self) -> Real {
        self.times[0]
    }

    pub fn end(&self) -> Real {
        self.times[self.times.len() - 1]
    }

    /// Spacing of a uniform grid (first interval otherwise).
    pub fn spacing(&self) -> Real {
        self.times[1] - self.times[0]
    }

    /// Evaluate `f` at every sample time.
    pub fn map<F>(&self, f: F) -> Vec<Real>
    where
        F: Fn(Real) -> Real,
    {
        self.times.iter().map(|&t| f(t)).collect()
    }
}
