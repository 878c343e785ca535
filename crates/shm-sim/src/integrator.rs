//! Single-step Runge-Kutta integrators.

use crate::model::{OdeModel, State};

/// Result of one integrator step.
#[derive(Clone, Debug)]
pub struct Step<const N: usize> {
    /// Propagated state at `t + dt`
    pub y: State<N>,
    /// Local error estimate (embedded methods only)
    pub error: Option<State<N>>,
    /// Number of rhs evaluations spent on the step
    pub rhs_evals: usize,
}

/// Trait for explicit one-step integrators.
pub trait Integrator {
    /// Order of the propagated solution.
    fn order(&self) -> usize;

    /// Whether `step` returns an error estimate usable for step control.
    fn is_adaptive(&self) -> bool;

    /// Advance `y` from `t` to `t + dt`.
    fn step<const N: usize, M: OdeModel<N>>(
        &self,
        model: &M,
        t: f64,
        y: &State<N>,
        dt: f64,
    ) -> Step<N>;
}

/// Classical RK4 (Runge-Kutta 4th order) integrator.
#[derive(Clone, Copy, Debug, Default)]
pub struct RK4;

impl Integrator for RK4 {
    fn order(&self) -> usize {
        4
    }

    fn is_adaptive(&self) -> bool {
        false
    }

    fn step<const N: usize, M: OdeModel<N>>(
        &self,
        model: &M,
        t: f64,
        y: &State<N>,
        dt: f64,
    ) -> Step<N> {
        let k1 = model.rhs(t, y);
        let k2 = model.rhs(t + 0.5 * dt, &(y + k1 * (0.5 * dt)));
        let k3 = model.rhs(t + 0.5 * dt, &(y + k2 * (0.5 * dt)));
        let k4 = model.rhs(t + dt, &(y + k3 * dt));

        // Combine: y_new = y + (dt/6) * (k1 + 2*k2 + 2*k3 + k4)
        let k_sum = k1 + k2 * 2.0 + k3 * 2.0 + k4;

        Step {
            y: y + k_sum * (dt / 6.0),
            error: None,
            rhs_evals: 4,
        }
    }
}

/// Dormand-Prince 5(4) embedded Runge-Kutta pair.
///
/// Seven stages, 5th order propagated solution with an embedded 4th order
/// solution for the local error estimate. The FSAL property is not exploited:
/// every step evaluates all seven stages.
#[derive(Clone, Copy, Debug, Default)]
pub struct DormandPrince54;

impl DormandPrince54 {
    const C: [f64; 7] = [0.0, 1.0 / 5.0, 3.0 / 10.0, 4.0 / 5.0, 8.0 / 9.0, 1.0, 1.0];

    #[rustfmt::skip]
    const A: [&'static [f64]; 6] = [
        &[1.0 / 5.0],
        &[3.0 / 40.0, 9.0 / 40.0],
        &[44.0 / 45.0, -56.0 / 15.0, 32.0 / 9.0],
        &[19372.0 / 6561.0, -25360.0 / 2187.0, 64448.0 / 6561.0, -212.0 / 729.0],
        &[9017.0 / 3168.0, -355.0 / 33.0, 46732.0 / 5247.0, 49.0 / 176.0, -5103.0 / 18656.0],
        &[35.0 / 384.0, 0.0, 500.0 / 1113.0, 125.0 / 192.0, -2187.0 / 6784.0, 11.0 / 84.0],
    ];

    /// Difference between 5th and 4th order weights.
    const E: [f64; 7] = [
        71.0 / 57600.0,
        0.0,
        -71.0 / 16695.0,
        71.0 / 1920.0,
        -17253.0 / 339200.0,
        22.0 / 525.0,
        -1.0 / 40.0,
    ];
}

impl Integrator for DormandPrince54 {
    fn order(&self) -> usize {
        5
    }

    fn is_adaptive(&self) -> bool {
        true
    }

    fn step<const N: usize, M: OdeModel<N>>(
        &self,
        model: &M,
        t: f64,
        y: &State<N>,
        dt: f64,
    ) -> Step<N> {
        let mut k = [State::<N>::zeros(); 7];
        k[0] = model.rhs(t, y);

        for stage in 1..7 {
            let mut slope_sum = State::<N>::zeros();
            for (j, &a) in Self::A[stage - 1].iter().enumerate() {
                slope_sum += k[j] * a;
            }
            k[stage] = model.rhs(t + Self::C[stage] * dt, &(y + slope_sum * dt));
        }

        // The last row of A doubles as the 5th order weights: stage 7 was
        // evaluated at the propagated solution.
        let mut increment = State::<N>::zeros();
        for (j, &b) in Self::A[5].iter().enumerate() {
            increment += k[j] * b;
        }

        let mut error = State::<N>::zeros();
        for (j, &e) in Self::E.iter().enumerate() {
            error += k[j] * e;
        }

        Step {
            y: y + increment * dt,
            error: Some(error * dt),
            rhs_evals: 7,
        }
    }
}

/// Scaled max-norm of a local error estimate.
///
/// Each component is divided by `atol + rtol * max(|y_old|, |y_new|)`; a step
/// is acceptable when the result is at most one.
pub fn error_norm<const N: usize>(
    y_old: &State<N>,
    y_new: &State<N>,
    error: &State<N>,
    atol: f64,
    rtol: f64,
) -> f64 {
    let mut norm: f64 = 0.0;
    for i in 0..N {
        let scale = atol + rtol * y_old[i].abs().max(y_new[i].abs());
        norm = norm.max((error[i] / scale).abs());
    }
    norm
}
