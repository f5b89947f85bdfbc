use super::integration_errors::IntegrationErrors;
use super::options::IntegratorOptions;
use crate::models::StateVector;
use crate::physics::dynamics::EquationsOfMotion;
use log::trace;
use nalgebra as na;
use std::time::{Duration, Instant};

const STAGES: usize = 7;
// Order of the embedded error estimate
const ERROR_ORDER: f64 = 4.0;
const SAFETY: f64 = 0.9;
const MIN_FACTOR: f64 = 0.2;
const MAX_FACTOR: f64 = 10.0;

const C_COEFFS: [f64; STAGES - 1] = [0.0, 1.0 / 5.0, 3.0 / 10.0, 4.0 / 5.0, 8.0 / 9.0, 1.0];

// Lower triangle of the Butcher table, row by row.
const A_COEFFS: &[f64] = &[
    1.0 / 5.0,
    3.0 / 40.0,
    9.0 / 40.0,
    44.0 / 45.0,
    -56.0 / 15.0,
    32.0 / 9.0,
    19372.0 / 6561.0,
    -25360.0 / 2187.0,
    64448.0 / 6561.0,
    -212.0 / 729.0,
    9017.0 / 3168.0,
    -355.0 / 33.0,
    46732.0 / 5247.0,
    49.0 / 176.0,
    -5103.0 / 18656.0,
];

const B_COEFFS: [f64; STAGES - 1] = [
    35.0 / 384.0,
    0.0,
    500.0 / 1113.0,
    125.0 / 192.0,
    -2187.0 / 6784.0,
    11.0 / 84.0,
];

// Difference between the fifth and fourth order weights, last entry applies to the FSAL stage.
const E_COEFFS: [f64; STAGES] = [
    -71.0 / 57600.0,
    0.0,
    71.0 / 16695.0,
    -71.0 / 1920.0,
    17253.0 / 339200.0,
    -22.0 / 525.0,
    1.0 / 40.0,
];

/// Counters for one propagation.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct IntegrationDetails {
    pub accepted_steps: usize,
    pub rejected_steps: usize,
    pub evaluations: usize,
    /// Scaled error of the last accepted step
    pub error: f64,
    /// Size of the last accepted step [s]
    pub step: f64,
}

impl IntegrationDetails {
    pub fn total_steps(&self) -> usize {
        self.accepted_steps + self.rejected_steps
    }
}

/// Adaptive Dormand-Prince 5(4) integrator that marches a single state forward in time.
///
/// The instance keeps the current time, state, and the adapted step size between calls to
/// [`DormandPrince::advance_to`], so a trajectory can be sampled at arbitrary increasing times
/// without restarting the step-size control.
pub struct DormandPrince<'a, T: EquationsOfMotion<State = StateVector>> {
    eom: &'a T,
    opts: IntegratorOptions,
    time: f64,
    state: na::Vector6<f64>,
    derivative: na::Vector6<f64>,
    step_size: f64,
    details: IntegrationDetails,
    started: Instant,
}

impl<'a, T: EquationsOfMotion<State = StateVector>> DormandPrince<'a, T> {
    /// Prepares an integration of `initial` from `t0`; `t1` bounds the automatic initial step.
    pub fn new(
        eom: &'a T,
        opts: IntegratorOptions,
        t0: f64,
        t1: f64,
        initial: &StateVector,
    ) -> Result<Self, IntegrationErrors> {
        if !initial.is_finite() {
            return Err(IntegrationErrors::NonFiniteState { time: t0 });
        }
        let mut integrator = DormandPrince {
            eom,
            opts,
            time: t0,
            state: initial.as_vector(),
            derivative: na::Vector6::zeros(),
            step_size: 0.0,
            details: IntegrationDetails::default(),
            started: Instant::now(),
        };
        let state = integrator.state;
        integrator.derivative = integrator.evaluate(t0, &state)?;
        integrator.step_size = match opts.init_step {
            Some(step) => step,
            None => integrator.select_initial_step(t1 - t0)?,
        }
        .min(opts.max_step)
        .max(opts.min_step);
        Ok(integrator)
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn state(&self) -> StateVector {
        StateVector::from_vector(&self.state)
    }

    pub fn details(&self) -> IntegrationDetails {
        self.details
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Integrates until exactly `stop_time` and returns the state there.
    pub fn advance_to(&mut self, stop_time: f64) -> Result<StateVector, IntegrationErrors> {
        if stop_time < self.time {
            return Err(IntegrationErrors::InvalidTimeGrid(format!(
                "cannot integrate backward from {} s to {} s",
                self.time, stop_time
            )));
        }

        while self.time < stop_time {
            self.check_guards()?;

            let remaining = stop_time - self.time;
            let clamped = self.step_size >= remaining;
            let trial = if clamped { remaining } else { self.step_size };

            let (used, proposed) = self.single_step(trial)?;

            if clamped && used == trial {
                // Land exactly on the requested time and keep the unconstrained step for later
                self.time = stop_time;
            } else {
                self.step_size = proposed.min(self.opts.max_step);
            }
        }

        Ok(self.state())
    }

    fn check_guards(&self) -> Result<(), IntegrationErrors> {
        if self.details.total_steps() >= self.opts.max_steps {
            return Err(IntegrationErrors::StepLimitExceeded {
                time: self.time,
                steps: self.opts.max_steps,
            });
        }
        if let Some(limit) = self.opts.max_wall_time {
            let elapsed = self.started.elapsed();
            if elapsed > limit {
                return Err(IntegrationErrors::TimeLimitExceeded {
                    time: self.time,
                    elapsed_s: elapsed.as_secs_f64(),
                });
            }
        }
        Ok(())
    }

    /// Attempts steps starting at `step` until one is accepted.
    ///
    /// Returns the step actually taken and the step proposed for the next call.
    fn single_step(&mut self, step: f64) -> Result<(f64, f64), IntegrationErrors> {
        let mut step = step;
        let mut rejected = false;

        loop {
            let (next_state, next_derivative, error) = self.attempt(step)?;

            if error <= 1.0 {
                let mut factor = if error == 0.0 {
                    MAX_FACTOR
                } else {
                    (SAFETY * error.powf(-1.0 / (ERROR_ORDER + 1.0))).min(MAX_FACTOR)
                };
                if rejected {
                    factor = factor.min(1.0);
                }

                self.time += step;
                self.state = next_state;
                self.derivative = next_derivative;
                self.details.accepted_steps += 1;
                self.details.error = error;
                self.details.step = step;
                trace!("accepted step of {:e} s at t = {} s (error {:e})", step, self.time, error);

                return Ok((step, step * factor));
            }

            self.details.rejected_steps += 1;
            rejected = true;
            step *= (SAFETY * error.powf(-1.0 / (ERROR_ORDER + 1.0))).max(MIN_FACTOR);

            if step < self.opts.min_step {
                return Err(IntegrationErrors::ToleranceNotMet {
                    time: self.time,
                    step,
                    error,
                });
            }
            self.check_guards()?;
        }
    }

    /// One trial step: the fifth order solution, its derivative and the scaled error norm.
    fn attempt(
        &mut self,
        step: f64,
    ) -> Result<(na::Vector6<f64>, na::Vector6<f64>, f64), IntegrationErrors> {
        let mut k = [na::Vector6::<f64>::zeros(); STAGES];
        k[0] = self.derivative;

        let mut a_idx = 0;
        for i in 1..STAGES - 1 {
            let mut wi = na::Vector6::<f64>::zeros();
            for kj in &k[0..i] {
                wi += A_COEFFS[a_idx] * kj;
                a_idx += 1;
            }
            k[i] = self.evaluate(self.time + C_COEFFS[i] * step, &(self.state + step * wi))?;
        }

        let mut increment = na::Vector6::<f64>::zeros();
        for (b_i, k_i) in B_COEFFS.iter().zip(k.iter()) {
            increment += *b_i * k_i;
        }
        let next_state = self.state + step * increment;
        if next_state.iter().any(|c| !c.is_finite()) {
            return Err(IntegrationErrors::NonFiniteState {
                time: self.time + step,
            });
        }

        // First same as last: this evaluation is the derivative for the next step
        k[STAGES - 1] = self.evaluate(self.time + step, &next_state)?;

        let mut error_estimate = na::Vector6::<f64>::zeros();
        for (e_i, k_i) in E_COEFFS.iter().zip(k.iter()) {
            error_estimate += *e_i * k_i;
        }
        error_estimate *= step;

        let scale = self
            .state
            .abs()
            .sup(&next_state.abs())
            .map(|y| self.opts.atol + self.opts.rtol * y);
        let error = rms_norm(&error_estimate.component_div(&scale));
        if !error.is_finite() {
            return Err(IntegrationErrors::NonFiniteState {
                time: self.time + step,
            });
        }

        Ok((next_state, k[STAGES - 1], error))
    }

    /// Initial step heuristic from Hairer, Nørsett and Wanner, "Solving Ordinary Differential
    /// Equations I", section II.4.
    fn select_initial_step(&mut self, span: f64) -> Result<f64, IntegrationErrors> {
        if span <= 0.0 {
            return Ok(self.opts.min_step);
        }
        let scale = self
            .state
            .map(|y| self.opts.atol + self.opts.rtol * y.abs());
        let d0 = rms_norm(&self.state.component_div(&scale));
        let d1 = rms_norm(&self.derivative.component_div(&scale));

        let h0 = if d0 < 1e-5 || d1 < 1e-5 {
            1e-6
        } else {
            0.01 * d0 / d1
        };

        let y1 = self.state + h0 * self.derivative;
        let f1 = self.evaluate(self.time + h0, &y1)?;
        let d2 = rms_norm(&(f1 - self.derivative).component_div(&scale)) / h0;

        let h1 = if d1 <= 1e-15 && d2 <= 1e-15 {
            (h0 * 1e-3).max(1e-6)
        } else {
            (0.01 / d1.max(d2)).powf(1.0 / (ERROR_ORDER + 1.0))
        };

        Ok((100.0 * h0).min(h1).min(span))
    }

    fn evaluate(
        &mut self,
        time: f64,
        state: &na::Vector6<f64>,
    ) -> Result<na::Vector6<f64>, IntegrationErrors> {
        self.details.evaluations += 1;
        let derivative = self
            .eom
            .compute_derivative(time, &StateVector::from_vector(state))?;
        Ok(derivative.as_vector())
    }
}

fn rms_norm(vector: &na::Vector6<f64>) -> f64 {
    vector.norm() / (vector.len() as f64).sqrt()
}
