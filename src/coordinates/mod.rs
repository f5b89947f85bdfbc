pub mod ground_track;

pub use ground_track::{inertial_to_ground_track, trajectory_to_ground_track, wrap_longitude};
