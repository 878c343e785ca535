//! Sampled `(t, q, q̇)` trajectories and the measurements taken from them.

use serde::Serialize;

use crate::error::{SimError, SimResult};
use crate::sim::SimRecord;

/// One trajectory sample.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Sample {
    pub t: f64,
    pub q: f64,
    pub qdot: f64,
}

/// Local maximum of `q`, refined by a parabola through the neighbouring samples.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Peak {
    /// Index of the sample closest to the maximum
    pub index: usize,
    pub t: f64,
    pub value: f64,
}

/// Generalized coordinate and its rate, aligned with a time grid.
///
/// Immutable once built: every parameter change produces a new trajectory.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Trajectory {
    t: Vec<f64>,
    q: Vec<f64>,
    qdot: Vec<f64>,
}

impl Trajectory {
    pub fn new(t: Vec<f64>, q: Vec<f64>, qdot: Vec<f64>) -> SimResult<Self> {
        if t.len() != q.len() || t.len() != qdot.len() {
            return Err(SimError::InvalidArg {
                what: "trajectory columns must have equal length",
            });
        }
        Ok(Self { t, q, qdot })
    }

    /// Split a two-state record into position and rate columns.
    pub fn from_record(record: &SimRecord<2>) -> Self {
        Self {
            t: record.t.clone(),
            q: record.component(0),
            qdot: record.component(1),
        }
    }

    pub fn t(&self) -> &[f64] {
        &self.t
    }

    pub fn q(&self) -> &[f64] {
        &self.q
    }

    pub fn qdot(&self) -> &[f64] {
        &self.qdot
    }

    pub fn len(&self) -> usize {
        self.t.len()
    }

    pub fn is_empty(&self) -> bool {
        self.t.is_empty()
    }

    pub fn sample(&self, index: usize) -> Option<Sample> {
        Some(Sample {
            t: *self.t.get(index)?,
            q: self.q[index],
            qdot: self.qdot[index],
        })
    }

    pub fn samples(&self) -> impl Iterator<Item = Sample> + '_ {
        (0..self.len()).map(|i| Sample {
            t: self.t[i],
            q: self.q[i],
            qdot: self.qdot[i],
        })
    }

    pub fn max_abs_q(&self) -> f64 {
        self.q.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()))
    }

    /// Largest `|q|` over samples with `t >= t_start`; `None` if there are none.
    pub fn max_abs_q_after(&self, t_start: f64) -> Option<f64> {
        self.t
            .iter()
            .zip(&self.q)
            .filter(|(t, _)| **t >= t_start)
            .map(|(_, q)| q.abs())
            .reduce(f64::max)
    }

    /// Interior local maxima of `q` (the first and last samples are never peaks).
    pub fn peaks(&self) -> Vec<Peak> {
        let mut peaks = Vec::new();
        for i in 1..self.len().saturating_sub(1) {
            let (a, b, c) = (self.q[i - 1], self.q[i], self.q[i + 1]);
            if b > a && b >= c {
                let (t, value) =
                    parabolic_vertex([self.t[i - 1], self.t[i], self.t[i + 1]], [a, b, c]);
                peaks.push(Peak { index: i, t, value });
            }
        }
        peaks
    }

    /// Times at which `q` crosses zero going upward, linearly interpolated.
    pub fn upward_crossings(&self) -> Vec<f64> {
        let mut crossings = Vec::new();
        for i in 0..self.len().saturating_sub(1) {
            let (q0, q1) = (self.q[i], self.q[i + 1]);
            if q0 < 0.0 && q1 >= 0.0 {
                let frac = -q0 / (q1 - q0);
                crossings.push(self.t[i] + frac * (self.t[i + 1] - self.t[i]));
            }
        }
        crossings
    }

    /// Mean spacing of upward zero crossings; needs at least two crossings.
    pub fn estimated_period(&self) -> Option<f64> {
        let crossings = self.upward_crossings();
        if crossings.len() < 2 {
            return None;
        }
        let span = crossings[crossings.len() - 1] - crossings[0];
        Some(span / (crossings.len() - 1) as f64)
    }

    /// `max_i |q_i - other.q_i|` for two trajectories on the same grid.
    pub fn max_abs_difference(&self, other: &Trajectory) -> SimResult<f64> {
        if self.t != other.t {
            return Err(SimError::InvalidArg {
                what: "trajectories must share a time grid",
            });
        }
        Ok(self
            .q
            .iter()
            .zip(&other.q)
            .fold(0.0_f64, |acc, (a, b)| acc.max((a - b).abs())))
    }
}

/// Vertex of the parabola through three points; the middle point if not concave.
fn parabolic_vertex(x: [f64; 3], y: [f64; 3]) -> (f64, f64) {
    let d1 = (y[1] - y[0]) / (x[1] - x[0]);
    let d2 = (y[2] - y[1]) / (x[2] - x[1]);
    let a = (d2 - d1) / (x[2] - x[0]);
    if !(a < 0.0) {
        return (x[1], y[1]);
    }
    let b = d1 - a * (x[0] + x[1]);
    let xv = -b / (2.0 * a);
    let yv = y[0] + d1 * (xv - x[0]) + a * (xv - x[0]) * (xv - x[1]);
    (xv, yv)
}
