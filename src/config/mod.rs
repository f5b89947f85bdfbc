pub mod config_errors;
pub mod mission;

pub use config_errors::ConfigErrors;
pub use mission::{EarthModel, FailurePolicy, MissionConfig, MissionParameters};
