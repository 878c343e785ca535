//! Time integration for the oscillation models.
//!
//! Provides:
//! - `OdeModel` trait for first-order systems `dy/dt = f(t, y)`
//! - Dormand-Prince 5(4) adaptive integrator (default) and fixed-step RK4
//! - Grid-driven runner that samples the solution at every requested time
//! - `Trajectory` records of `(t, q, q̇)` with peak and crossing helpers

pub mod error;
pub mod integrator;
pub mod model;
pub mod sim;
pub mod trajectory;

// Re-exports for public API
pub use error::{SimError, SimResult};
pub use integrator::{DormandPrince54, Integrator, RK4, Step};
pub use model::{OdeModel, State};
pub use sim::{IntegratorType, SimOptions, SimRecord, SimStats, run_sim};
pub use trajectory::{Peak, Sample, Trajectory};
