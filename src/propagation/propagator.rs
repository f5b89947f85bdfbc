use crate::integrators::{DormandPrince, IntegrationDetails, IntegrationErrors, IntegratorOptions};
use crate::models::{StateVector, TrajectorySample};
use crate::physics::dynamics::{EquationsOfMotion, TwoBodyDynamics};
use log::debug;
use std::time::Duration;

/// Result of one propagation over a full span.
#[derive(Debug, Clone)]
pub struct Propagation {
    /// One sample per requested output time, in request order
    pub samples: Vec<TrajectorySample>,
    /// State at the end of the span
    pub final_state: StateVector,
    pub details: IntegrationDetails,
    pub elapsed: Duration,
}

pub struct OrbitPropagator<D: EquationsOfMotion<State = StateVector>> {
    dynamics: D,
    opts: IntegratorOptions,
}

impl OrbitPropagator<TwoBodyDynamics> {
    pub fn two_body(mu: f64, opts: IntegratorOptions) -> Self {
        Self::new(TwoBodyDynamics::new(mu), opts)
    }
}

impl<D: EquationsOfMotion<State = StateVector>> OrbitPropagator<D> {
    pub fn new(dynamics: D, opts: IntegratorOptions) -> Self {
        OrbitPropagator { dynamics, opts }
    }

    /// Integrates `initial` over `span` and samples the trajectory at each of `output_times`.
    ///
    /// The output times must be finite, non-decreasing and inside the span. Integration always
    /// continues to the end of the span, past the last output time.
    pub fn propagate(
        &self,
        initial: &StateVector,
        span: (f64, f64),
        output_times: &[f64],
    ) -> Result<Propagation, IntegrationErrors> {
        validate_time_grid(span, output_times)?;
        let (t0, t1) = span;

        let mut integrator = DormandPrince::new(&self.dynamics, self.opts, t0, t1, initial)?;

        let mut samples = Vec::with_capacity(output_times.len());
        for &time in output_times {
            let state = integrator.advance_to(time)?;
            samples.push(TrajectorySample { time, state });
        }
        let final_state = integrator.advance_to(t1)?;

        let details = integrator.details();
        let elapsed = integrator.elapsed();
        debug!(
            "propagated {} s in {:?}: {} accepted, {} rejected steps, {} evaluations",
            t1 - t0,
            elapsed,
            details.accepted_steps,
            details.rejected_steps,
            details.evaluations
        );

        Ok(Propagation {
            samples,
            final_state,
            details,
            elapsed,
        })
    }
}

fn validate_time_grid(span: (f64, f64), output_times: &[f64]) -> Result<(), IntegrationErrors> {
    let (t0, t1) = span;
    if !(t0.is_finite() && t1.is_finite()) || t1 < t0 {
        return Err(IntegrationErrors::InvalidTimeGrid(format!(
            "span [{}, {}] is not a finite forward interval",
            t0, t1
        )));
    }
    if let Some(time) = output_times
        .iter()
        .find(|t| !t.is_finite() || **t < t0 || **t > t1)
    {
        return Err(IntegrationErrors::InvalidTimeGrid(format!(
            "output time {} lies outside [{}, {}]",
            time, t0, t1
        )));
    }
    if let Some(pair) = output_times.windows(2).find(|pair| pair[1] < pair[0]) {
        return Err(IntegrationErrors::InvalidTimeGrid(format!(
            "output times decrease from {} to {}",
            pair[0], pair[1]
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::mission::linspace;
    use crate::constants::{MU_EARTH, R_EARTH};
    use crate::physics::energy::conservation_drift;
    use crate::physics::orbital::OrbitalMechanics;
    use approx::assert_abs_diff_eq;
    use nalgebra as na;
    use test_case::test_case;

    fn circular_state(a: f64, inclination: f64) -> StateVector {
        let v = OrbitalMechanics::compute_circular_velocity(a, MU_EARTH);
        StateVector::new(
            na::Vector3::new(a, 0.0, 0.0),
            na::Vector3::new(0.0, v * inclination.cos(), v * inclination.sin()),
        )
    }

    #[test]
    fn samples_follow_requested_times() {
        let propagator = OrbitPropagator::two_body(MU_EARTH, IntegratorOptions::default());
        let times = [0.0, 10.0, 10.0, 250.0, 999.5];
        let result = propagator
            .propagate(&circular_state(7.0e6, 0.3), (0.0, 2000.0), &times)
            .unwrap();
        let sampled: Vec<f64> = result.samples.iter().map(|s| s.time).collect();
        assert_eq!(sampled, times);
        assert_eq!(result.samples[1].state, result.samples[2].state);
        assert_eq!(result.samples[0].state, circular_state(7.0e6, 0.3));
    }

    #[test_case(20.0; "low inclination")]
    #[test_case(98.0; "sun-synchronous")]
    #[test_case(63.4; "molniya inclination")]
    fn periodicity_of_circular_orbits(inclination_deg: f64) {
        let a = R_EARTH + 600e3;
        let period = OrbitalMechanics::compute_orbital_period(a, MU_EARTH);
        let initial = circular_state(a, inclination_deg.to_radians());
        let propagator = OrbitPropagator::two_body(MU_EARTH, IntegratorOptions::default());
        let result = propagator.propagate(&initial, (0.0, period), &[period]).unwrap();
        let end = result.samples[0].state;

        assert!((end.position - initial.position).norm() / a < 1e-6);
        assert!((end.velocity - initial.velocity).norm() / initial.velocity.norm() < 1e-6);
    }

    #[test]
    fn long_span_keeps_orbit_circular() {
        let a = R_EARTH + 600e3;
        let period = OrbitalMechanics::compute_orbital_period(a, MU_EARTH);
        let initial = circular_state(a, 98.0_f64.to_radians());
        let times = linspace(0.0, 3.0 * period, 100);
        let propagator = OrbitPropagator::two_body(MU_EARTH, IntegratorOptions::default());
        let result = propagator
            .propagate(&initial, (0.0, 122.0 * period), &times)
            .unwrap();

        for sample in &result.samples {
            assert_abs_diff_eq!(sample.position().norm(), a, epsilon = 10.0);
        }
        let (energy, momentum) = conservation_drift(&initial, &result.final_state, MU_EARTH);
        assert!(energy < 1e-4, "energy drift {}", energy);
        assert!(momentum < 1e-4, "momentum drift {}", momentum);
        assert!(result.details.accepted_steps < 122 * 1000);
    }

    #[test_case((0.0, 100.0), vec![0.0, 50.0, 40.0]; "decreasing times")]
    #[test_case((0.0, 100.0), vec![0.0, 150.0]; "time after span")]
    #[test_case((10.0, 100.0), vec![5.0]; "time before span")]
    #[test_case((0.0, 100.0), vec![f64::NAN]; "nan time")]
    #[test_case((100.0, 0.0), vec![]; "reversed span")]
    fn invalid_grids_are_rejected(span: (f64, f64), times: Vec<f64>) {
        let propagator = OrbitPropagator::two_body(MU_EARTH, IntegratorOptions::default());
        let result = propagator.propagate(&circular_state(7.0e6, 0.0), span, &times);
        assert!(matches!(result, Err(IntegrationErrors::InvalidTimeGrid(_))));
    }

    #[test]
    fn divergence_is_reported_not_masked() {
        let propagator = OrbitPropagator::two_body(
            MU_EARTH,
            IntegratorOptions {
                max_steps: 3,
                ..Default::default()
            },
        );
        let result = propagator.propagate(&circular_state(7.0e6, 0.0), (0.0, 1.0e5), &[0.0, 5.0e4]);
        assert!(matches!(
            result,
            Err(IntegrationErrors::StepLimitExceeded { .. })
        ));
    }
}
