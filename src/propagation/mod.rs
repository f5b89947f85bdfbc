pub mod propagator;

pub use propagator::{OrbitPropagator, Propagation};
