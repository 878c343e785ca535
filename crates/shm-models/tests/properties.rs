//! Physical properties every model must satisfy, checked through the public API.

use shm_models::{
    BeatAnalysis, DampedOscillator, DampingRegime, ForcedOscillator, ForcingParameters,
    HarmonicOscillator, InitialState, ModelError, OscillatorParameters, Oscillation, Pendulum,
    PendulumParameters, ResonanceReport, SimError, SimOptions, Superposition, TimeGrid,
    natural_frequency, period_of,
};

fn damped(c: f64) -> DampedOscillator {
    DampedOscillator::new(
        OscillatorParameters::new(1.0, 10.0, c).unwrap(),
        InitialState::new(1.0, 0.0).unwrap(),
    )
}

#[test]
fn closed_form_energy_is_conserved() {
    let osc = HarmonicOscillator::new(1.5, 20.0, 0.3).unwrap();
    let grid = TimeGrid::linspace(30.0, 2000).unwrap();
    let series = osc.sample(&grid);
    let eps = 1e-9 * 20.0 * 0.3 * 0.3;
    for e in &series.total {
        assert!((e - osc.total_energy()).abs() < eps);
    }
}

#[test]
fn closed_form_period_consistency() {
    let osc = HarmonicOscillator::new(1.0, 10.0, 2.0).unwrap();
    let period = osc.period();
    for i in 0..50 {
        let t = 0.137 * i as f64;
        assert!((osc.position(t + period) - osc.position(t)).abs() < 1e-9);
        assert!((osc.velocity(t + period) - osc.velocity(t)).abs() < 1e-8);
    }
}

#[test]
fn undamped_peaks_keep_constant_envelope() {
    let grid = TimeGrid::linspace(20.0, 1000).unwrap();
    let traj = damped(0.0).simulate(&grid, &SimOptions::default()).unwrap();
    let peaks = traj.peaks();
    assert!(peaks.len() >= 8);
    for p in &peaks {
        assert!((p.value - 1.0).abs() < 1e-4, "peak {} drifted", p.value);
    }
}

#[test]
fn underdamped_peaks_strictly_decrease() {
    let grid = TimeGrid::linspace(20.0, 1000).unwrap();
    let model = damped(0.5);
    assert_eq!(model.derived().regime, DampingRegime::Underdamped);
    let traj = model.simulate(&grid, &SimOptions::default()).unwrap();
    let peaks = traj.peaks();
    assert!(peaks.len() >= 5);
    assert!(peaks.windows(2).all(|w| w[1].value < w[0].value));
}

#[test]
fn damped_energy_never_increases() {
    let grid = TimeGrid::linspace(15.0, 800).unwrap();
    let model = damped(0.8);
    let traj = model.simulate(&grid, &SimOptions::default()).unwrap();
    let energy = model.energy(&traj);
    let slack = 1e-9 * energy[0];
    assert!(energy.windows(2).all(|w| w[1] <= w[0] + slack));
    assert!(energy[energy.len() - 1] < 0.1 * energy[0]);
}

#[test]
fn critical_damping_boundary() {
    let c_crit = 2.0 * 10f64.sqrt();
    let delta = 1e-6;
    let regime = |c: f64| OscillatorParameters::new(1.0, 10.0, c).unwrap().regime();
    assert_eq!(regime(c_crit), DampingRegime::CriticallyDamped);
    assert_eq!(regime(c_crit - delta), DampingRegime::Underdamped);
    assert_eq!(regime(c_crit + delta), DampingRegime::Overdamped);
    assert_eq!(regime(0.0), DampingRegime::Undamped);
}

#[test]
fn adaptive_undamped_matches_closed_form() {
    let grid = TimeGrid::linspace(20.0, 1000).unwrap();
    let traj = damped(0.0).simulate(&grid, &SimOptions::default()).unwrap();
    let exact = HarmonicOscillator::new(1.0, 10.0, 1.0)
        .unwrap()
        .trajectory(&grid)
        .unwrap();
    assert!(traj.max_abs_difference(&exact).unwrap() < 1e-5);
}

fn pendulum(theta0_deg: f64) -> Pendulum {
    Pendulum::new(PendulumParameters::new(1.0, 9.81, theta0_deg.to_radians()).unwrap())
}

#[test]
fn small_angle_pendulum_tracks_linear_model() {
    let grid = TimeGrid::linspace(10.0, 1000).unwrap();
    let run = pendulum(1.0).simulate(&grid, &SimOptions::default()).unwrap();
    assert!(run.max_divergence() < 0.01);
}

#[test]
fn large_angle_pendulum_diverges_with_longer_period() {
    let grid = TimeGrid::linspace(10.0, 1000).unwrap();
    let p = pendulum(90.0);
    let run = p.simulate(&grid, &SimOptions::default()).unwrap();
    assert!(run.max_divergence() > 0.1);

    let observed = run.nonlinear.estimated_period().unwrap();
    assert!(observed > 1.1 * run.linear_period);
    let exact = p.large_amplitude_period();
    assert!((observed - exact).abs() / exact < 0.01);
}

#[test]
fn beat_detection_boundary() {
    let pair = |w1: f64, w2: f64| {
        Superposition::new(
            Oscillation::new(1.0, w1).unwrap(),
            Oscillation::new(1.0, w2).unwrap(),
        )
    };

    let beat = pair(10.0, 10.5).beat();
    assert!((beat.beat_frequency().unwrap() - 0.5).abs() < 1e-12);
    assert!((beat.beat_period().unwrap() - 12.566).abs() < 1e-3);

    let none = pair(10.0, 13.0).beat();
    assert!(matches!(none, BeatAnalysis::NoClearBeat { .. }));

    assert_eq!(
        pair(4.0, 4.0).beat().beat_period(),
        Err(ModelError::DegenerateBeat)
    );
}

#[test]
fn natural_frequency_scenario() {
    let wn = natural_frequency(1.0, 10.0).unwrap();
    assert!((wn - 3.1623).abs() < 1e-4);
    assert!((period_of(wn).unwrap() - 1.9869).abs() < 1e-4);
}

#[test]
fn resonance_guard_for_zero_mass() {
    let report = ResonanceReport::new(0.0, 10.0, 3.0);
    assert_eq!(report.natural_frequency, None);
    assert_eq!(report.frequency_ratio(), None);
    assert_eq!(report.comment(), None);
}

#[test]
fn forced_response_peaks_near_resonance() {
    let params = OscillatorParameters::new(1.0, 10.0, 0.2).unwrap();
    let grid = TimeGrid::linspace(60.0, 3000).unwrap();
    let opts = SimOptions::default();
    let amplitude = |wf: f64| {
        let model = ForcedOscillator::new(params, ForcingParameters::new(1.0, wf).unwrap());
        let traj = model.simulate(&grid, &opts).unwrap();
        ForcedOscillator::observed_amplitude(&traj).unwrap()
    };

    let near = amplitude(10f64.sqrt());
    let off = amplitude(1.0);
    assert!(near > 5.0 * off);

    // Steady state for ω_f = 1: F0/√((k - mω²)² + (cω)²)
    let expected = 1.0 / (9.0f64.powi(2) + 0.2f64.powi(2)).sqrt();
    assert!((off - expected).abs() / expected < 0.1);
}

#[test]
fn step_limit_is_reported_not_panicked() {
    let grid = TimeGrid::linspace(20.0, 10).unwrap();
    let opts = SimOptions {
        max_steps: 3,
        ..SimOptions::default()
    };
    let err = damped(0.1).simulate(&grid, &opts).unwrap_err();
    assert!(matches!(err, ModelError::Sim(SimError::StepLimit { .. })));
}

#[test]
fn rk4_and_adaptive_agree_on_pendulum() {
    let grid = TimeGrid::linspace(5.0, 200).unwrap();
    let p = pendulum(45.0);
    let adaptive = p.simulate(&grid, &SimOptions::default()).unwrap();
    let fixed = p.simulate(&grid, &SimOptions::rk4(1e-3)).unwrap();
    assert!(adaptive.nonlinear.max_abs_difference(&fixed.nonlinear).unwrap() < 1e-6);
}

#[test]
fn irregular_grid_keeps_closed_forms_in_phase() {
    let mut times = vec![0.0, 0.013, 0.05];
    times.extend((1..400).map(|i| 0.05 + 0.025 * i as f64));
    let grid = TimeGrid::from_samples(times).unwrap();

    let run = pendulum(1.0).simulate(&grid, &SimOptions::default()).unwrap();
    assert_eq!(run.nonlinear.q()[0], run.linear.q()[0]);
    assert!(run.max_divergence() < 0.01);

    let traj = damped(0.0).simulate(&grid, &SimOptions::default()).unwrap();
    let exact = HarmonicOscillator::new(1.0, 10.0, 1.0)
        .unwrap()
        .trajectory(&grid)
        .unwrap();
    assert!(traj.max_abs_difference(&exact).unwrap() < 1e-5);
}

#[test]
fn offset_grid_is_rejected() {
    assert!(TimeGrid::from_samples(vec![1.0, 1.02, 1.5]).is_err());
}
