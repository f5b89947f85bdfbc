use nalgebra as na;

/// Inertial Cartesian state of a point mass: position [m] and velocity [m/s].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateVector {
    pub position: na::Vector3<f64>,
    pub velocity: na::Vector3<f64>,
}

impl StateVector {
    pub fn new(position: na::Vector3<f64>, velocity: na::Vector3<f64>) -> Self {
        StateVector { position, velocity }
    }

    pub fn zero() -> Self {
        StateVector {
            position: na::Vector3::zeros(),
            velocity: na::Vector3::zeros(),
        }
    }

    /// Stacks position then velocity.
    pub fn as_vector(&self) -> na::Vector6<f64> {
        na::Vector6::new(
            self.position.x,
            self.position.y,
            self.position.z,
            self.velocity.x,
            self.velocity.y,
            self.velocity.z,
        )
    }

    pub fn from_vector(vector: &na::Vector6<f64>) -> Self {
        StateVector {
            position: na::Vector3::new(vector[0], vector[1], vector[2]),
            velocity: na::Vector3::new(vector[3], vector[4], vector[5]),
        }
    }

    pub fn is_finite(&self) -> bool {
        self.position.iter().chain(self.velocity.iter()).all(|c| c.is_finite())
    }
}

impl std::ops::Add for StateVector {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        StateVector {
            position: self.position + other.position,
            velocity: self.velocity + other.velocity,
        }
    }
}

impl std::ops::Sub for StateVector {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        StateVector {
            position: self.position - other.position,
            velocity: self.velocity - other.velocity,
        }
    }
}

impl std::ops::Mul<f64> for StateVector {
    type Output = Self;

    fn mul(self, scalar: f64) -> Self {
        StateVector {
            position: self.position * scalar,
            velocity: self.velocity * scalar,
        }
    }
}

/// One propagated state at a requested output time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrajectorySample {
    pub time: f64, // Seconds since the mission epoch
    pub state: StateVector,
}

impl TrajectorySample {
    pub fn position(&self) -> &na::Vector3<f64> {
        &self.state.position
    }

    pub fn velocity(&self) -> &na::Vector3<f64> {
        &self.state.velocity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn vector_layout_is_position_then_velocity() {
        let state = StateVector::new(
            na::Vector3::new(1.0, 2.0, 3.0),
            na::Vector3::new(4.0, 5.0, 6.0),
        );
        let vector = state.as_vector();
        assert_abs_diff_eq!(vector, na::Vector6::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0));
        assert_eq!(StateVector::from_vector(&vector), state);
    }

    #[test]
    fn arithmetic_is_componentwise() {
        let a = StateVector::new(na::Vector3::new(1.0, 0.0, 0.0), na::Vector3::new(0.0, 1.0, 0.0));
        let b = a * 2.0 + a;
        assert_abs_diff_eq!(b.position, na::Vector3::new(3.0, 0.0, 0.0));
        assert_abs_diff_eq!(b.velocity, na::Vector3::new(0.0, 3.0, 0.0));
        assert_eq!(b - a, a * 2.0);
    }

    #[test]
    fn non_finite_components_are_detected() {
        let mut state = StateVector::zero();
        assert!(state.is_finite());
        state.velocity.z = f64::NAN;
        assert!(!state.is_finite());
        state.velocity.z = 0.0;
        state.position.x = f64::INFINITY;
        assert!(!state.is_finite());
    }
}
