//! shm-core: numeric foundation for the oscillation models.
//!
//! Contains:
//! - numeric (Real + tolerances + float helpers)
//! - units (uom SI types + constructors)
//! - grid (uniform and explicit sample-time grids)
//! - error (shared error types)

pub mod error;
pub mod grid;
pub mod numeric;
pub mod units;

pub use error::{CoreError, CoreResult};
pub use grid::TimeGrid;
pub use numeric::*;
