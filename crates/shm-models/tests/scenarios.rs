//! Every model evaluated through the shared `Scenario` interface.

use shm_models::{
    DampedOscillator, ForcedOscillator, ForcingParameters, HarmonicOscillator, InitialState,
    OscillatorParameters, Oscillation, Pendulum, PendulumParameters, Scenario, SimOptions,
    Superposition, TimeGrid,
};

fn all_scenarios() -> Vec<Box<dyn Scenario>> {
    let params = OscillatorParameters::new(1.0, 10.0, 0.5).unwrap();
    vec![
        Box::new(HarmonicOscillator::new(1.0, 10.0, 1.0).unwrap()),
        Box::new(DampedOscillator::new(params, InitialState::new(1.0, 0.0).unwrap())),
        Box::new(ForcedOscillator::new(
            params,
            ForcingParameters::new(1.0, 2.0).unwrap(),
        )),
        Box::new(Pendulum::new(
            PendulumParameters::new(1.0, 9.81, 0.5).unwrap(),
        )),
        Box::new(Superposition::new(
            Oscillation::new(1.0, 10.0).unwrap(),
            Oscillation::new(1.0, 10.5).unwrap(),
        )),
    ]
}

#[test]
fn every_series_is_aligned_with_the_grid() {
    let grid = TimeGrid::linspace(8.0, 400).unwrap();
    let opts = SimOptions::default();
    for scenario in all_scenarios() {
        let eval = scenario.evaluate(&grid, &opts).unwrap();
        assert_eq!(eval.scenario, scenario.name());
        assert_eq!(eval.t, grid.times());
        assert!(!eval.series.is_empty());
        for s in &eval.series {
            assert_eq!(s.values.len(), grid.len(), "{}/{}", eval.scenario, s.name);
            assert!(s.values.iter().all(|v| v.is_finite()));
        }
    }
}

#[test]
fn csv_has_header_and_one_row_per_sample() {
    let grid = TimeGrid::linspace(2.0, 21).unwrap();
    let eval = HarmonicOscillator::new(1.0, 4.0, 1.0)
        .unwrap()
        .evaluate(&grid, &SimOptions::default())
        .unwrap();
    let csv = eval.to_csv();
    let mut lines = csv.lines();
    assert_eq!(
        lines.next(),
        Some("time_s,position,velocity,acceleration,kinetic_energy,potential_energy,total_energy")
    );
    assert_eq!(lines.count(), 21);
}

#[test]
fn scenario_names_are_distinct() {
    let mut names: Vec<&str> = all_scenarios().iter().map(|s| s.name()).collect();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), 5);
}
