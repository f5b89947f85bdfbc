use super::gravity::gravity_acceleration;
use crate::integrators::integration_errors::IntegrationErrors;
use crate::models::StateVector;

pub trait EquationsOfMotion {
    type State;

    fn compute_derivative(&self, time: f64, state: &Self::State)
        -> Result<Self::State, IntegrationErrors>;
}

/// Unperturbed two-body motion about a point mass.
#[derive(Debug, Clone, Copy)]
pub struct TwoBodyDynamics {
    mu: f64,
}

impl TwoBodyDynamics {
    pub fn new(mu: f64) -> Self {
        Self { mu }
    }
}

impl EquationsOfMotion for TwoBodyDynamics {
    type State = StateVector;

    fn compute_derivative(
        &self,
        time: f64,
        state: &StateVector,
    ) -> Result<StateVector, IntegrationErrors> {
        if state.position.magnitude() == 0.0 {
            return Err(IntegrationErrors::DegeneratePosition { time });
        }

        // Position derivative is velocity
        let mut derivative = StateVector::zero();
        derivative.position = state.velocity;
        derivative.velocity = gravity_acceleration(&state.position, self.mu);

        if !derivative.is_finite() {
            return Err(IntegrationErrors::NonFiniteState { time });
        }
        Ok(derivative)
    }
}
