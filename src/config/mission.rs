use super::config_errors::ConfigErrors;
use crate::constants::*;
use crate::integrators::IntegratorOptions;
use crate::physics::orbital::OrbitalMechanics;
use hifitime::Epoch;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

/// Physical constants of the central body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EarthModel {
    pub radius: f64,        // m
    pub mu: f64,            // m³/s²
    pub rotation_rate: f64, // rad/s
    /// Second zonal harmonic. Carried for reference, the dynamics are point-mass only.
    pub j2: f64,
}

impl Default for EarthModel {
    fn default() -> Self {
        EarthModel {
            radius: R_EARTH,
            mu: MU_EARTH,
            rotation_rate: EARTH_ANGULAR_VELOCITY,
            j2: EARTH_J2,
        }
    }
}

/// What to do when one satellite cannot be propagated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Stop the run before anything is rendered
    Abort,
    /// Leave the satellite out of the outputs and report it
    Skip,
}

/// User-facing mission description, as read from a scenario file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MissionConfig {
    pub satellite_count: usize,
    pub altitude: f64, // m
    pub inclination_deg: f64,
    pub eccentricity: f64,
    /// Integration span, in orbital periods
    pub span_periods: f64,
    /// Leading part of the span that is sampled for output, in orbital periods
    pub output_periods: f64,
    pub output_samples: usize,
    pub rtol: f64,
    pub atol: f64,
    pub max_steps: usize,
    pub max_wall_time_s: Option<f64>,
    pub parallel: bool,
    pub failure_policy: FailurePolicy,
    pub start_epoch: String,
    pub output_dir: PathBuf,
    pub earth: EarthModel,
}

impl Default for MissionConfig {
    fn default() -> Self {
        MissionConfig {
            satellite_count: SATELLITE_COUNT,
            altitude: ORBIT_ALTITUDE,
            inclination_deg: ORBIT_INCLINATION_DEG,
            eccentricity: 0.0,
            span_periods: SPAN_PERIODS,
            output_periods: OUTPUT_PERIODS,
            output_samples: OUTPUT_SAMPLES,
            rtol: RELATIVE_TOLERANCE,
            atol: ABSOLUTE_TOLERANCE,
            max_steps: 1_000_000,
            max_wall_time_s: None,
            parallel: false,
            failure_policy: FailurePolicy::Abort,
            start_epoch: "2024-03-15T00:00:00 UTC".to_string(),
            output_dir: PathBuf::from("output"),
            earth: EarthModel::default(),
        }
    }
}

impl MissionConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigErrors> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigErrors> {
        let contents = fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Checks every field and derives the parameters used by the propagation pipeline.
    pub fn validate(&self) -> Result<MissionParameters, ConfigErrors> {
        let earth = self.earth;
        if !(earth.radius.is_finite() && earth.radius > 0.0) {
            return Err(ConfigErrors::InvalidEarthModel(format!(
                "radius must be positive, got {} m",
                earth.radius
            )));
        }
        if !(earth.mu.is_finite() && earth.mu > 0.0) {
            return Err(ConfigErrors::InvalidEarthModel(format!(
                "gravitational parameter must be positive, got {}",
                earth.mu
            )));
        }
        if !earth.rotation_rate.is_finite() {
            return Err(ConfigErrors::InvalidEarthModel(format!(
                "rotation rate must be finite, got {} rad/s",
                earth.rotation_rate
            )));
        }

        if self.satellite_count == 0 {
            return Err(ConfigErrors::NoSatellites);
        }
        if !(self.altitude.is_finite() && self.altitude > 0.0) {
            return Err(ConfigErrors::NonPositiveAltitude(self.altitude));
        }
        let semi_major_axis = earth.radius + self.altitude;
        if semi_major_axis <= earth.radius {
            return Err(ConfigErrors::OrbitBelowSurface {
                semi_major_axis,
                radius: earth.radius,
            });
        }
        if !self.inclination_deg.is_finite() || !(0.0..=180.0).contains(&self.inclination_deg) {
            return Err(ConfigErrors::InvalidInclination(self.inclination_deg));
        }
        if self.eccentricity != 0.0 {
            return Err(ConfigErrors::UnsupportedEccentricity(self.eccentricity));
        }

        let periods_valid = self.span_periods.is_finite()
            && self.output_periods.is_finite()
            && self.span_periods > 0.0
            && self.output_periods >= 0.0
            && self.output_periods <= self.span_periods;
        if !periods_valid {
            return Err(ConfigErrors::InvalidPeriods {
                span: self.span_periods,
                output: self.output_periods,
            });
        }
        if self.output_samples == 0 {
            return Err(ConfigErrors::NoOutputSamples);
        }

        let tolerances_valid = self.rtol.is_finite()
            && self.atol.is_finite()
            && self.rtol >= 100.0 * f64::EPSILON
            && self.rtol < 1.0
            && self.atol > 0.0;
        if !tolerances_valid {
            return Err(ConfigErrors::InvalidTolerance {
                rtol: self.rtol,
                atol: self.atol,
            });
        }
        if self.max_steps == 0 {
            return Err(ConfigErrors::NoStepBudget);
        }
        let max_wall_time = match self.max_wall_time_s {
            Some(seconds) if !(seconds.is_finite() && seconds > 0.0) => {
                return Err(ConfigErrors::InvalidWallTime(seconds))
            }
            Some(seconds) => Some(
                Duration::try_from_secs_f64(seconds)
                    .map_err(|_| ConfigErrors::InvalidWallTime(seconds))?,
            ),
            None => None,
        };

        let start_epoch = Epoch::from_str(&self.start_epoch)
            .map_err(|_| ConfigErrors::InvalidEpoch(self.start_epoch.clone()))?;

        let period = OrbitalMechanics::compute_orbital_period(semi_major_axis, earth.mu);
        let span = (0.0, self.span_periods * period);
        let output_times = linspace(0.0, self.output_periods * period, self.output_samples);

        let integrator = IntegratorOptions {
            max_steps: self.max_steps,
            max_wall_time,
            ..IntegratorOptions::with_tolerances(self.rtol, self.atol)
        };

        Ok(MissionParameters {
            earth,
            satellite_count: self.satellite_count,
            semi_major_axis,
            inclination: self.inclination_deg.to_radians(),
            period,
            span_periods: self.span_periods,
            span,
            output_times,
            integrator,
            start_epoch,
            parallel: self.parallel,
            failure_policy: self.failure_policy,
        })
    }
}

/// Validated, immutable parameters of one run.
#[derive(Debug, Clone, PartialEq)]
pub struct MissionParameters {
    pub earth: EarthModel,
    pub satellite_count: usize,
    pub semi_major_axis: f64, // m
    pub inclination: f64,     // rad
    pub period: f64,          // s
    pub span_periods: f64,
    /// Integration span [s], starting at the epoch
    pub span: (f64, f64),
    /// Requested output times [s], non-decreasing and within the span
    pub output_times: Vec<f64>,
    pub integrator: IntegratorOptions,
    pub start_epoch: Epoch,
    pub parallel: bool,
    pub failure_policy: FailurePolicy,
}

/// `count` evenly spaced values from `start` to `end`, both included.
pub fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (count - 1) as f64;
            let mut values: Vec<f64> = (0..count).map(|i| start + i as f64 * step).collect();
            values[count - 1] = end;
            values
        }
    }
}
