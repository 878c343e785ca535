//! Rendering evaluations for the terminal and for export.

use shm_models::{Evaluation, ResponsePoint};
use std::fmt::Write as _;
use std::path::Path;

use crate::error::CliResult;

/// Human-readable listing of quantities and notes.
pub fn summary(eval: &Evaluation) -> String {
    let mut out = format!("Scenario: {} ({} samples)\n", eval.scenario, eval.t.len());
    for q in &eval.quantities {
        let _ = match q.value {
            Some(v) if q.unit.is_empty() => writeln!(out, "  {} = {:.4}", q.name, v),
            Some(v) => writeln!(out, "  {} = {:.4} {}", q.name, v, q.unit),
            None => writeln!(out, "  {} = undefined", q.name),
        };
    }
    for note in &eval.notes {
        let _ = writeln!(out, "  {}", note);
    }
    out
}

pub fn to_json(eval: &Evaluation) -> CliResult<String> {
    Ok(serde_json::to_string_pretty(eval)?)
}

/// `forcing_frequency_rad_s,amplitude_m,frequency_ratio` with one row per point.
pub fn sweep_csv(points: &[ResponsePoint]) -> String {
    let mut csv = String::from("forcing_frequency_rad_s,amplitude_m,frequency_ratio\n");
    for p in points {
        let _ = writeln!(
            csv,
            "{},{},{}",
            p.forcing_frequency, p.amplitude, p.frequency_ratio
        );
    }
    csv
}

pub fn sweep_json(points: &[ResponsePoint]) -> CliResult<String> {
    Ok(serde_json::to_string_pretty(points)?)
}

/// Write to `path`, or to stdout when no path is given.
pub fn emit(content: &str, path: Option<&Path>) -> CliResult<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)?;
            println!("✓ Wrote {}", path.display());
        }
        None => print!("{}", content),
    }
    Ok(())
}
