//! Load the bundled scenario files and evaluate them end to end.

use shm_cli::{CliError, ModelDef, ScenarioFile};
use std::path::PathBuf;

fn scenario_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("scenarios")
        .join(name)
}

#[test]
fn bundled_scenarios_evaluate() {
    for name in ["beats.yaml", "large_pendulum.yaml", "near_resonance.yaml"] {
        let file = ScenarioFile::load(&scenario_path(name)).unwrap();
        let grid = file.time_grid().unwrap();
        let eval = file
            .build()
            .unwrap()
            .evaluate(&grid, &file.sim_options())
            .unwrap();
        assert_eq!(eval.t.len(), file.grid.samples, "{}", name);
    }
}

#[test]
fn beats_scenario_reports_beat_period() {
    let file = ScenarioFile::load(&scenario_path("beats.yaml")).unwrap();
    assert!(matches!(file.model, ModelDef::Superposition { .. }));
    let eval = file
        .build()
        .unwrap()
        .evaluate(&file.time_grid().unwrap(), &file.sim_options())
        .unwrap();
    let period = eval.quantity("beat_period").unwrap().value.unwrap();
    assert!((period - 12.566).abs() < 1e-3);
}

#[test]
fn yaml_roundtrip() {
    let file = ScenarioFile::load(&scenario_path("large_pendulum.yaml")).unwrap();
    let text = serde_yaml::to_string(&file).unwrap();
    assert_eq!(ScenarioFile::from_yaml(&text).unwrap(), file);
}

#[test]
fn missing_file_names_the_path() {
    let err = ScenarioFile::load(&scenario_path("nope.yaml")).unwrap_err();
    match err {
        CliError::ConfigRead { path, .. } => assert!(path.ends_with("nope.yaml")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn unknown_model_type_is_a_parse_error() {
    let err = ScenarioFile::from_yaml("version: 1\nname: x\nmodel: { type: rotor }\n").unwrap_err();
    assert!(matches!(err, CliError::ConfigParse(_)));
}
