use std::{error::Error, fmt, io};

#[derive(Debug)]
pub enum ConfigErrors {
    IoError(io::Error),
    YamlError(serde_yaml::Error),
    InvalidEpoch(String),
    NoSatellites,
    NonPositiveAltitude(f64),
    OrbitBelowSurface { semi_major_axis: f64, radius: f64 },
    InvalidEarthModel(String),
    InvalidInclination(f64),
    UnsupportedEccentricity(f64),
    InvalidPeriods { span: f64, output: f64 },
    NoOutputSamples,
    InvalidTolerance { rtol: f64, atol: f64 },
    NoStepBudget,
    InvalidWallTime(f64),
}

impl fmt::Display for ConfigErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigErrors::IoError(e) => write!(f, "I/O error: {}", e),
            ConfigErrors::YamlError(e) => write!(f, "YAML parsing error: {}", e),
            ConfigErrors::InvalidEpoch(epoch) => write!(f, "Invalid start epoch `{}`", epoch),
            ConfigErrors::NoSatellites => write!(f, "Satellite count must be positive"),
            ConfigErrors::NonPositiveAltitude(h) => {
                write!(f, "Orbit altitude must be positive, got {} m", h)
            }
            ConfigErrors::OrbitBelowSurface {
                semi_major_axis,
                radius,
            } => write!(
                f,
                "Semi-major axis {} m does not clear the planet radius {} m",
                semi_major_axis, radius
            ),
            ConfigErrors::InvalidEarthModel(reason) => write!(f, "Invalid Earth model: {}", reason),
            ConfigErrors::InvalidInclination(i) => write!(f, "Invalid inclination {}°", i),
            ConfigErrors::UnsupportedEccentricity(e) => {
                write!(f, "Only circular orbits are supported, got eccentricity {}", e)
            }
            ConfigErrors::InvalidPeriods { span, output } => write!(
                f,
                "Output window of {} periods must be positive and fit in the {} period span",
                output, span
            ),
            ConfigErrors::NoOutputSamples => write!(f, "At least one output sample is required"),
            ConfigErrors::InvalidTolerance { rtol, atol } => write!(
                f,
                "Invalid integrator tolerances (rtol {:e}, atol {:e})",
                rtol, atol
            ),
            ConfigErrors::NoStepBudget => write!(f, "Integrator step limit must be positive"),
            ConfigErrors::InvalidWallTime(s) => {
                write!(f, "Integrator wall-clock limit must be positive, got {} s", s)
            }
        }
    }
}

impl Error for ConfigErrors {}

impl From<io::Error> for ConfigErrors {
    fn from(err: io::Error) -> Self {
        ConfigErrors::IoError(err)
    }
}

impl From<serde_yaml::Error> for ConfigErrors {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigErrors::YamlError(err)
    }
}
