use nalgebra as na;

/// Point-mass gravitational acceleration, `-mu * r / |r|^3`.
///
/// A zero position yields non-finite components; callers check the norm first.
pub fn gravity_acceleration(position: &na::Vector3<f64>, mu: f64) -> na::Vector3<f64> {
    let r: f64 = position.magnitude();
    let acceleration_magnitude: f64 = -mu / (r * r);
    position.normalize() * acceleration_magnitude
}
