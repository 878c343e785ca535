//! Grid-driven simulation runner and result recording.

use serde::Serialize;
use shm_core::{TimeGrid, Tolerances};
use tracing::{debug, trace};

use crate::error::{SimError, SimResult};
use crate::integrator::{DormandPrince54, Integrator, RK4, error_norm};
use crate::model::{OdeModel, State};

/// Integrator selection for simulation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IntegratorType {
    /// Dormand-Prince 5(4) with error control (default).
    #[default]
    DormandPrince54,
    /// Classical RK4 with a fixed maximum sub-step (`SimOptions::fixed_dt`).
    RK4,
}

/// Options for simulation runs.
#[derive(Clone, Debug)]
pub struct SimOptions {
    /// Integrator type (default: Dormand-Prince 5(4))
    pub integrator: IntegratorType,
    /// Absolute/relative error tolerances for the adaptive integrator
    pub tol: Tolerances,
    /// First trial step (seconds); defaults to the first grid interval
    pub initial_dt: Option<f64>,
    /// Smallest step the adaptive integrator may take (seconds)
    pub min_dt: f64,
    /// Largest sub-step for fixed-step RK4 (seconds)
    pub fixed_dt: f64,
    /// Maximum number of attempted steps over the whole run (safety limit)
    pub max_steps: usize,
}

impl Default for SimOptions {
    fn default() -> Self {
        Self {
            integrator: IntegratorType::default(),
            tol: Tolerances {
                abs: 1e-10,
                rel: 1e-8,
            },
            initial_dt: None,
            min_dt: 1e-12,
            fixed_dt: 1e-3,
            max_steps: 1_000_000,
        }
    }
}

impl SimOptions {
    /// Fixed-step RK4 with the given maximum sub-step.
    pub fn rk4(fixed_dt: f64) -> Self {
        Self {
            integrator: IntegratorType::RK4,
            fixed_dt,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> SimResult<()> {
        if !(self.tol.abs > 0.0 && self.tol.rel > 0.0) {
            return Err(SimError::InvalidArg {
                what: "tolerances must be positive",
            });
        }
        if !(self.min_dt > 0.0) {
            return Err(SimError::InvalidArg {
                what: "min_dt must be positive",
            });
        }
        if !(self.fixed_dt > 0.0 && self.fixed_dt.is_finite()) {
            return Err(SimError::InvalidArg {
                what: "fixed_dt must be positive",
            });
        }
        if let Some(dt) = self.initial_dt {
            if !(dt > 0.0 && dt.is_finite()) {
                return Err(SimError::InvalidArg {
                    what: "initial_dt must be positive",
                });
            }
        }
        if self.max_steps == 0 {
            return Err(SimError::InvalidArg {
                what: "max_steps must be positive",
            });
        }
        Ok(())
    }
}

/// Step bookkeeping for one run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SimStats {
    pub accepted_steps: usize,
    pub rejected_steps: usize,
    pub rhs_evals: usize,
}

impl SimStats {
    pub fn attempted_steps(&self) -> usize {
        self.accepted_steps + self.rejected_steps
    }
}

/// Record of simulation results, one state per grid sample.
#[derive(Clone, Debug)]
pub struct SimRecord<const N: usize> {
    /// Time points (seconds)
    pub t: Vec<f64>,
    /// State snapshots
    pub y: Vec<State<N>>,
    pub stats: SimStats,
}

impl<const N: usize> SimRecord<N> {
    /// Values of state component `index` at every sample.
    pub fn component(&self, index: usize) -> Vec<f64> {
        self.y.iter().map(|y| y[index]).collect()
    }
}

const SAFETY: f64 = 0.9;
const MIN_FACTOR: f64 = 0.2;
const MAX_FACTOR: f64 = 5.0;

/// Integrate `model` from its initial state and sample it at every grid time.
///
/// The first record entry is the model's initial state at `grid.start()`.
pub fn run_sim<const N: usize, M: OdeModel<N>>(
    model: &M,
    grid: &TimeGrid,
    opts: &SimOptions,
) -> SimResult<SimRecord<N>> {
    opts.validate()?;

    let y0 = model.initial_state();
    if y0.iter().any(|v| !v.is_finite()) {
        return Err(SimError::NonPhysical {
            what: "initial state must be finite",
        });
    }

    let times = grid.times();
    let mut y = y0;
    let mut ys = Vec::with_capacity(times.len());
    ys.push(y);

    let mut stats = SimStats::default();
    let mut dt = opts.initial_dt.unwrap_or(times[1] - times[0]);

    for window in times.windows(2) {
        let (t0, t1) = (window[0], window[1]);
        y = match opts.integrator {
            IntegratorType::DormandPrince54 => {
                advance_adaptive(model, &DormandPrince54, t0, t1, y, &mut dt, opts, &mut stats)?
            }
            IntegratorType::RK4 => advance_fixed(model, &RK4, t0, t1, y, opts, &mut stats)?,
        };
        ys.push(y);
    }

    debug!(
        integrator = ?opts.integrator,
        samples = times.len(),
        accepted = stats.accepted_steps,
        rejected = stats.rejected_steps,
        rhs_evals = stats.rhs_evals,
        "integration complete"
    );

    Ok(SimRecord {
        t: times.to_vec(),
        y: ys,
        stats,
    })
}

/// Advance from `t0` to `t1` with equal sub-steps no longer than `fixed_dt`.
fn advance_fixed<const N: usize, M: OdeModel<N>, I: Integrator>(
    model: &M,
    integrator: &I,
    t0: f64,
    t1: f64,
    mut y: State<N>,
    opts: &SimOptions,
    stats: &mut SimStats,
) -> SimResult<State<N>> {
    let substeps = ((t1 - t0) / opts.fixed_dt).ceil().max(1.0) as usize;
    let h = (t1 - t0) / substeps as f64;

    for i in 0..substeps {
        if stats.attempted_steps() >= opts.max_steps {
            return Err(SimError::StepLimit {
                max_steps: opts.max_steps,
                t: t0 + i as f64 * h,
            });
        }
        let step = integrator.step(model, t0 + i as f64 * h, &y, h);
        stats.accepted_steps += 1;
        stats.rhs_evals += step.rhs_evals;
        y = step.y;
    }

    if y.iter().any(|v| !v.is_finite()) {
        return Err(SimError::NonPhysical {
            what: "state became non-finite",
        });
    }
    Ok(y)
}

/// Advance from `t0` to `t1` with error-controlled steps, landing exactly on `t1`.
///
/// `dt` carries the proposed step size across grid intervals.
#[allow(clippy::too_many_arguments)]
fn advance_adaptive<const N: usize, M: OdeModel<N>, I: Integrator>(
    model: &M,
    integrator: &I,
    t0: f64,
    t1: f64,
    mut y: State<N>,
    dt: &mut f64,
    opts: &SimOptions,
    stats: &mut SimStats,
) -> SimResult<State<N>> {
    let exponent = -1.0 / (integrator.order() as f64);
    let mut t = t0;

    while t < t1 {
        if stats.attempted_steps() >= opts.max_steps {
            return Err(SimError::StepLimit {
                max_steps: opts.max_steps,
                t,
            });
        }

        let remaining = t1 - t;
        let last = *dt >= remaining;
        let h = if last { remaining } else { *dt };

        let step = integrator.step(model, t, &y, h);
        stats.rhs_evals += step.rhs_evals;

        let err = match &step.error {
            Some(e) => error_norm(&y, &step.y, e, opts.tol.abs, opts.tol.rel),
            None => 0.0,
        };

        if err.is_finite() && err <= 1.0 {
            stats.accepted_steps += 1;
            y = step.y;
            t = if last { t1 } else { t + h };

            let factor = (SAFETY * err.max(1e-16).powf(exponent)).clamp(MIN_FACTOR, MAX_FACTOR);
            // A step shortened to hit the grid says nothing about the proposed size.
            *dt = if last { (*dt).max(h * factor) } else { h * factor };
        } else {
            stats.rejected_steps += 1;
            let factor = if err.is_finite() {
                (SAFETY * err.powf(exponent)).clamp(MIN_FACTOR, 1.0)
            } else {
                MIN_FACTOR
            };
            *dt = h * factor;
            trace!(t, h, err, "step rejected");
        }

        if *dt < opts.min_dt {
            return Err(SimError::StepSizeUnderflow { t, dt: *dt });
        }
    }

    Ok(y)
}
