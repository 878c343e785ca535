//! Integration tests: adaptive and fixed-step integrators on known systems.

use shm_core::{TimeGrid, Tolerances};
use shm_sim::{IntegratorType, OdeModel, SimOptions, State, Trajectory, run_sim};

/// x'' + 2ζω x' + ω² x = 0 with x(0) = 1, x'(0) = 0.
struct LightlyDamped {
    omega: f64,
    zeta: f64,
}

impl LightlyDamped {
    fn exact(&self, t: f64) -> f64 {
        let wd = self.omega * (1.0 - self.zeta * self.zeta).sqrt();
        let sigma = self.zeta * self.omega;
        (-sigma * t).exp() * ((wd * t).cos() + sigma / wd * (wd * t).sin())
    }
}

impl OdeModel<2> for LightlyDamped {
    fn initial_state(&self) -> State<2> {
        State::<2>::new(1.0, 0.0)
    }

    fn rhs(&self, _t: f64, y: &State<2>) -> State<2> {
        State::<2>::new(
            y[1],
            -2.0 * self.zeta * self.omega * y[1] - self.omega * self.omega * y[0],
        )
    }
}

/// Three uncoupled decays, to exercise N != 2.
struct Decays;

impl OdeModel<3> for Decays {
    fn initial_state(&self) -> State<3> {
        State::<3>::new(1.0, 2.0, 3.0)
    }

    fn rhs(&self, _t: f64, y: &State<3>) -> State<3> {
        State::<3>::new(-y[0], -2.0 * y[1], -3.0 * y[2])
    }
}

#[test]
fn dormand_prince_tracks_exact_damped_solution() {
    let model = LightlyDamped {
        omega: 3.0,
        zeta: 0.05,
    };
    let grid = TimeGrid::linspace(30.0, 1000).unwrap();
    let record = run_sim::<2, _>(&model, &grid, &SimOptions::default()).unwrap();

    for (t, y) in record.t.iter().zip(&record.y) {
        assert!((y[0] - model.exact(*t)).abs() < 1e-6, "t={t}");
    }
}

#[test]
fn rk4_and_dormand_prince_agree() {
    let model = LightlyDamped {
        omega: 2.0,
        zeta: 0.2,
    };
    let grid = TimeGrid::linspace(10.0, 200).unwrap();

    let adaptive = run_sim::<2, _>(&model, &grid, &SimOptions::default()).unwrap();
    let fixed = run_sim::<2, _>(&model, &grid, &SimOptions::rk4(1e-3)).unwrap();

    let a = Trajectory::from_record(&adaptive);
    let b = Trajectory::from_record(&fixed);
    assert!(a.max_abs_difference(&b).unwrap() < 1e-7);
    assert!(fixed.stats.accepted_steps >= 10_000);
}

#[test]
fn coarse_grid_still_meets_tolerance() {
    // Two samples only: the adaptive integrator subdivides internally.
    let model = LightlyDamped {
        omega: 5.0,
        zeta: 0.1,
    };
    let grid = TimeGrid::linspace(8.0, 2).unwrap();
    let record = run_sim::<2, _>(&model, &grid, &SimOptions::default()).unwrap();

    assert_eq!(record.y.len(), 2);
    assert!((record.y[1][0] - model.exact(8.0)).abs() < 1e-6);
    assert!(record.stats.accepted_steps > 10);
}

#[test]
fn three_state_system_on_irregular_grid() {
    let grid = TimeGrid::from_samples(vec![0.0, 0.01, 0.3, 0.31, 2.0]).unwrap();
    let opts = SimOptions {
        tol: Tolerances {
            abs: 1e-12,
            rel: 1e-10,
        },
        ..SimOptions::default()
    };
    let record = run_sim::<3, _>(&Decays, &grid, &opts).unwrap();

    for (t, y) in record.t.iter().zip(&record.y) {
        assert!((y[0] - (-t).exp()).abs() < 1e-8);
        assert!((y[1] - 2.0 * (-2.0 * t).exp()).abs() < 1e-8);
        assert!((y[2] - 3.0 * (-3.0 * t).exp()).abs() < 1e-8);
    }
}

#[test]
fn integrator_choice_is_respected() {
    let opts = SimOptions::rk4(0.125);
    assert_eq!(opts.integrator, IntegratorType::RK4);

    let grid = TimeGrid::linspace(1.0, 3).unwrap();
    let record = run_sim::<3, _>(&Decays, &grid, &opts).unwrap();
    // 0.5 s intervals split into 4 sub-steps of 4 evaluations each
    assert_eq!(record.stats.accepted_steps, 8);
    assert_eq!(record.stats.rhs_evals, 32);
}
