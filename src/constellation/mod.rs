pub mod builder;

pub use builder::{
    initial_state, satellite_descriptors, ConstellationBuilder, ConstellationTracks,
    SatelliteFailure,
};
