use std::{error::Error, fmt};

#[derive(Debug, Clone, PartialEq)]
pub enum IntegrationErrors {
    /// Position norm was zero when evaluating the equations of motion
    DegeneratePosition { time: f64 },
    NonFiniteState { time: f64 },
    /// Step size fell to the lower bound without meeting the tolerance
    ToleranceNotMet { time: f64, step: f64, error: f64 },
    StepLimitExceeded { time: f64, steps: usize },
    TimeLimitExceeded { time: f64, elapsed_s: f64 },
    InvalidTimeGrid(String),
}

impl IntegrationErrors {
    /// Simulation time at which the failure happened, if any.
    pub fn time(&self) -> Option<f64> {
        match self {
            IntegrationErrors::DegeneratePosition { time }
            | IntegrationErrors::NonFiniteState { time }
            | IntegrationErrors::ToleranceNotMet { time, .. }
            | IntegrationErrors::StepLimitExceeded { time, .. }
            | IntegrationErrors::TimeLimitExceeded { time, .. } => Some(*time),
            IntegrationErrors::InvalidTimeGrid(_) => None,
        }
    }
}

impl fmt::Display for IntegrationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntegrationErrors::DegeneratePosition { time } => {
                write!(f, "zero-norm position at t = {:.3} s", time)
            }
            IntegrationErrors::NonFiniteState { time } => {
                write!(f, "non-finite state at t = {:.3} s", time)
            }
            IntegrationErrors::ToleranceNotMet { time, step, error } => write!(
                f,
                "tolerance not met at t = {:.3} s (step {:e} s, scaled error {:e})",
                time, step, error
            ),
            IntegrationErrors::StepLimitExceeded { time, steps } => {
                write!(f, "step limit of {} exceeded at t = {:.3} s", steps, time)
            }
            IntegrationErrors::TimeLimitExceeded { time, elapsed_s } => write!(
                f,
                "wall-clock limit exceeded after {:.3} s at t = {:.3} s",
                elapsed_s, time
            ),
            IntegrationErrors::InvalidTimeGrid(reason) => {
                write!(f, "invalid time grid: {}", reason)
            }
        }
    }
}

impl Error for IntegrationErrors {}
