pub mod ground_track;
pub mod state;

pub use ground_track::{GroundTrackPoint, GroundTrackSeries, SatelliteDescriptor};
pub use state::{StateVector, TrajectorySample};
