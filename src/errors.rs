use crate::config::ConfigErrors;
use crate::constellation::SatelliteFailure;
use crate::rendering::RenderErrors;
use std::{error::Error, fmt, io};

/// Any failure that stops a run.
#[derive(Debug)]
pub enum MissionErrors {
    Configuration(ConfigErrors),
    Numerical(SatelliteFailure),
    Output(RenderErrors),
}

impl fmt::Display for MissionErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissionErrors::Configuration(e) => write!(f, "Configuration error: {}", e),
            MissionErrors::Numerical(e) => write!(f, "Propagation error: {}", e),
            MissionErrors::Output(e) => write!(f, "Output error: {}", e),
        }
    }
}

impl Error for MissionErrors {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            MissionErrors::Configuration(e) => Some(e),
            MissionErrors::Numerical(e) => Some(e),
            MissionErrors::Output(e) => Some(e),
        }
    }
}

impl From<ConfigErrors> for MissionErrors {
    fn from(err: ConfigErrors) -> Self {
        MissionErrors::Configuration(err)
    }
}

impl From<SatelliteFailure> for MissionErrors {
    fn from(err: SatelliteFailure) -> Self {
        MissionErrors::Numerical(err)
    }
}

impl From<RenderErrors> for MissionErrors {
    fn from(err: RenderErrors) -> Self {
        MissionErrors::Output(err)
    }
}

impl From<io::Error> for MissionErrors {
    fn from(err: io::Error) -> Self {
        MissionErrors::Output(RenderErrors::IoError(err))
    }
}
