//! OdeModel trait for pluggable dynamic systems.

use nalgebra::SVector;

/// Fixed-length state vector of an `N`-dimensional first-order system.
pub type State<const N: usize> = SVector<f64, N>;

/// Trait for first-order ODE models `dy/dt = f(t, y)`.
///
/// Parameters live on the implementing value, so `rhs` is a pure function of
/// `(t, y)`. Implementations assume their parameters were validated on
/// construction; the integrator never checks for zero mass or similar.
pub trait OdeModel<const N: usize> {
    /// Return the state at the first grid time.
    fn initial_state(&self) -> State<N>;

    /// Compute state derivative dy/dt = f(t, y).
    fn rhs(&self, t: f64, y: &State<N>) -> State<N>;
}
