use crate::models::StateVector;
use nalgebra as na;

/// Specific orbital energy (J/kg).
pub fn calculate_energy(state: &StateVector, mu: f64) -> f64 {
    let r = state.position.magnitude();
    let v = state.velocity.magnitude();

    let kinetic = 0.5 * v * v;
    let potential = -mu / r;

    kinetic + potential
}

/// Specific angular momentum (m²/s).
pub fn calculate_angular_momentum(state: &StateVector) -> na::Vector3<f64> {
    state.position.cross(&state.velocity)
}

/// Relative drift of energy and angular momentum magnitude between two states.
pub fn conservation_drift(initial: &StateVector, current: &StateVector, mu: f64) -> (f64, f64) {
    let e0 = calculate_energy(initial, mu);
    let h0 = calculate_angular_momentum(initial);
    let energy_error = (calculate_energy(current, mu) - e0).abs() / e0.abs();
    let momentum_error = (calculate_angular_momentum(current) - h0).magnitude() / h0.magnitude();
    (energy_error, momentum_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{MU_EARTH, R_EARTH};
    use approx::assert_abs_diff_eq;
    use test_case::test_case;

    #[test_case(
        StateVector::new(na::Vector3::new(R_EARTH, 0.0, 0.0), na::Vector3::zeros()),
        -62561850.23;
        "energy at rest on Earth's surface"
    )]
    #[test_case(
        StateVector::new(na::Vector3::new(R_EARTH, 0.0, 0.0), na::Vector3::new(0.0, 0.0, 1000.0)),
        -62061850.23;
        "kinetic term adds half v squared"
    )]
    fn test_energy(state: StateVector, expected_energy: f64) {
        assert_abs_diff_eq!(calculate_energy(&state, MU_EARTH), expected_energy, epsilon = 1.0);
    }

    #[test_case(
        StateVector::new(
            na::Vector3::new(R_EARTH + 100e3, 0.0, 0.0),
            na::Vector3::new(0.0, 7.848e3, 0.0)
        ),
        na::Vector3::new(0.0, 0.0, 5.07868e10);
        "100 km orbit angular momentum"
    )]
    #[test_case(
        StateVector::new(na::Vector3::new(R_EARTH, 0.0, 0.0), na::Vector3::new(1.0e3, 0.0, 0.0)),
        na::Vector3::zeros();
        "radial velocity has no angular momentum"
    )]
    fn test_angular_momentum(state: StateVector, expected_momentum: na::Vector3<f64>) {
        let result = calculate_angular_momentum(&state);
        assert_abs_diff_eq!(result, expected_momentum, epsilon = 1e7);
    }

    #[test]
    fn identical_states_do_not_drift() {
        let state = StateVector::new(
            na::Vector3::new(R_EARTH + 600e3, 0.0, 0.0),
            na::Vector3::new(0.0, 7561.57, 0.0),
        );
        let (energy, momentum) = conservation_drift(&state, &state, MU_EARTH);
        assert_eq!(energy, 0.0);
        assert_eq!(momentum, 0.0);
    }
}
