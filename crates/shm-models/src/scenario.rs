//! One evaluation shape for every model.
//!
//! Each model implements [`Scenario`]; a presentation layer renders any of them
//! from the resulting [`Evaluation`]: named series over a shared time axis,
//! named scalar quantities, and plain-language notes.

use serde::Serialize;
use shm_core::TimeGrid;
use shm_sim::SimOptions;
use std::fmt::Write;

use crate::error::ModelResult;

/// A model that can be evaluated on a time grid.
pub trait Scenario: Send + Sync {
    /// Short identifier, e.g. `"damped"`.
    fn name(&self) -> &'static str;

    /// Run the model and collect everything a presentation layer shows.
    fn evaluate(&self, grid: &TimeGrid, opts: &SimOptions) -> ModelResult<Evaluation>;
}

/// A named time series aligned with [`Evaluation::t`].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Series {
    pub name: String,
    pub unit: &'static str,
    pub values: Vec<f64>,
}

/// A named scalar; `None` when the quantity is undefined for these inputs.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Quantity {
    pub name: String,
    pub unit: &'static str,
    pub value: Option<f64>,
}

/// Output of one scenario evaluation.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Evaluation {
    pub scenario: String,
    pub t: Vec<f64>,
    pub series: Vec<Series>,
    pub quantities: Vec<Quantity>,
    pub notes: Vec<String>,
}

impl Evaluation {
    pub fn new(scenario: impl Into<String>, t: Vec<f64>) -> Self {
        Self {
            scenario: scenario.into(),
            t,
            series: Vec::new(),
            quantities: Vec::new(),
            notes: Vec::new(),
        }
    }

    pub fn with_series(mut self, name: impl Into<String>, unit: &'static str, values: Vec<f64>) -> Self {
        debug_assert_eq!(values.len(), self.t.len());
        self.series.push(Series {
            name: name.into(),
            unit,
            values,
        });
        self
    }

    pub fn with_quantity(mut self, name: impl Into<String>, unit: &'static str, value: Option<f64>) -> Self {
        self.quantities.push(Quantity {
            name: name.into(),
            unit,
            value,
        });
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn series(&self, name: &str) -> Option<&Series> {
        self.series.iter().find(|s| s.name == name)
    }

    pub fn quantity(&self, name: &str) -> Option<&Quantity> {
        self.quantities.iter().find(|q| q.name == name)
    }

    /// `time_s,<series>...` with one row per sample; a series shorter than
    /// the time axis leaves its cells empty.
    pub fn to_csv(&self) -> String {
        let mut csv = String::from("time_s");
        for s in &self.series {
            csv.push(',');
            csv.push_str(&s.name);
        }
        csv.push('\n');

        for (i, t) in self.t.iter().enumerate() {
            let _ = write!(csv, "{}", t);
            for s in &self.series {
                csv.push(',');
                if let Some(v) = s.values.get(i) {
                    let _ = write!(csv, "{}", v);
                }
            }
            csv.push('\n');
        }
        csv
    }
}
