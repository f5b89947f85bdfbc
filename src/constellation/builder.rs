use crate::config::{FailurePolicy, MissionParameters};
use crate::coordinates::trajectory_to_ground_track;
use crate::integrators::IntegrationErrors;
use crate::models::{GroundTrackSeries, SatelliteDescriptor, StateVector};
use crate::physics::dynamics::TwoBodyDynamics;
use crate::physics::energy::conservation_drift;
use crate::physics::orbital::OrbitalMechanics;
use crate::propagation::OrbitPropagator;
use log::{debug, info, warn};
use nalgebra as na;
use rayon::prelude::*;
use std::{error::Error, fmt};

/// Propagation failure of a single constellation member.
#[derive(Debug, Clone, PartialEq)]
pub struct SatelliteFailure {
    pub satellite: SatelliteDescriptor,
    pub error: IntegrationErrors,
}

impl fmt::Display for SatelliteFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (index {}) failed with a numerical error: {}",
            self.satellite.label(),
            self.satellite.index,
            self.error
        )
    }
}

impl Error for SatelliteFailure {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.error)
    }
}

/// Ground tracks of every satellite that propagated successfully, in index order.
#[derive(Debug, Clone, Default)]
pub struct ConstellationTracks {
    pub series: Vec<GroundTrackSeries>,
    /// Satellites left out under [`FailurePolicy::Skip`]
    pub skipped: Vec<SatelliteFailure>,
}

/// Evenly spaced ascending nodes, one orbital plane per satellite.
pub fn satellite_descriptors(count: usize, inclination: f64) -> Vec<SatelliteDescriptor> {
    (0..count)
        .map(|index| SatelliteDescriptor::evenly_spaced(index, count, inclination))
        .collect()
}

/// Circular-orbit state at the ascending node of `satellite`'s plane.
pub fn initial_state(
    satellite: &SatelliteDescriptor,
    semi_major_axis: f64,
    mu: f64,
) -> StateVector {
    let (sin_raan, cos_raan) = satellite.raan.sin_cos();
    let (sin_i, cos_i) = satellite.inclination.sin_cos();
    let speed = OrbitalMechanics::compute_circular_velocity(semi_major_axis, mu);

    StateVector::new(
        na::Vector3::new(semi_major_axis * cos_raan, semi_major_axis * sin_raan, 0.0),
        na::Vector3::new(-sin_raan * cos_i, cos_raan * cos_i, sin_i) * speed,
    )
}

pub struct ConstellationBuilder<'a> {
    params: &'a MissionParameters,
    propagator: OrbitPropagator<TwoBodyDynamics>,
}

impl<'a> ConstellationBuilder<'a> {
    pub fn new(params: &'a MissionParameters) -> Self {
        ConstellationBuilder {
            params,
            propagator: OrbitPropagator::two_body(params.earth.mu, params.integrator),
        }
    }

    pub fn descriptors(&self) -> Vec<SatelliteDescriptor> {
        satellite_descriptors(self.params.satellite_count, self.params.inclination)
    }

    /// Propagates one satellite over the mission span and projects the sampled states.
    pub fn ground_track(
        &self,
        satellite: &SatelliteDescriptor,
    ) -> Result<GroundTrackSeries, SatelliteFailure> {
        let params = self.params;
        let initial = initial_state(satellite, params.semi_major_axis, params.earth.mu);

        let propagation = self
            .propagator
            .propagate(&initial, params.span, &params.output_times)
            .map_err(|error| SatelliteFailure {
                satellite: *satellite,
                error,
            })?;

        let (energy_drift, momentum_drift) =
            conservation_drift(&initial, &propagation.final_state, params.earth.mu);
        debug!(
            "{}: relative energy drift {:e}, angular momentum drift {:e}",
            satellite.label(),
            energy_drift,
            momentum_drift
        );
        let elements = OrbitalMechanics::cartesian_to_keplerian(
            &propagation.final_state.position,
            &propagation.final_state.velocity,
            params.earth.mu,
        );
        debug!(
            "{}: final a = {:.1} m, e = {:e}, i = {:.4}°, raan = {:.4}°",
            satellite.label(),
            elements[0],
            elements[1],
            elements[2].to_degrees(),
            elements[3].to_degrees()
        );
        info!(
            "{} propagated in {:?} ({} steps)",
            satellite.label(),
            propagation.elapsed,
            propagation.details.accepted_steps
        );

        Ok(GroundTrackSeries {
            satellite: *satellite,
            points: trajectory_to_ground_track(&propagation.samples, params.earth.rotation_rate),
        })
    }

    /// Runs every satellite independently; the result is index-aligned with the descriptors.
    pub fn propagate_all(&self) -> Vec<Result<GroundTrackSeries, SatelliteFailure>> {
        let satellites = self.descriptors();
        if self.params.parallel {
            satellites
                .par_iter()
                .map(|satellite| self.ground_track(satellite))
                .collect()
        } else {
            satellites
                .iter()
                .map(|satellite| self.ground_track(satellite))
                .collect()
        }
    }

    /// Builds all ground tracks, applying the configured failure policy.
    ///
    /// Under [`FailurePolicy::Abort`] the lowest-index failure is returned.
    pub fn build(&self) -> Result<ConstellationTracks, SatelliteFailure> {
        let mut tracks = ConstellationTracks::default();

        for result in self.propagate_all() {
            match result {
                Ok(series) => tracks.series.push(series),
                Err(failure) => match self.params.failure_policy {
                    FailurePolicy::Abort => return Err(failure),
                    FailurePolicy::Skip => {
                        warn!("Skipping {}", failure);
                        tracks.skipped.push(failure);
                    }
                },
            }
        }

        Ok(tracks)
    }
}
