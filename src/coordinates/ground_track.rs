use crate::models::{GroundTrackPoint, TrajectorySample};
use nalgebra as na;

/// Wraps a longitude in degrees into (-180, 180].
///
/// -180 maps to +180 so that every direction has a single representation.
pub fn wrap_longitude(longitude: f64) -> f64 {
    let wrapped = (longitude + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped <= -180.0 {
        wrapped + 360.0
    } else {
        wrapped
    }
}

/// Sub-satellite point of an inertial position at `time` seconds after the epoch.
///
/// The Earth-fixed frame is taken to coincide with the inertial frame at the epoch and to rotate
/// uniformly at `earth_rate` rad/s about the z-axis. Returns (longitude, latitude) in degrees,
/// geocentric latitude.
pub fn inertial_to_ground_track(
    position: &na::Vector3<f64>,
    time: f64,
    earth_rate: f64,
) -> (f64, f64) {
    let (x, y, z) = (position.x, position.y, position.z);

    let right_ascension = y.atan2(x);
    let latitude = z.atan2(x.hypot(y));

    let longitude = wrap_longitude((right_ascension - earth_rate * time).to_degrees());

    (longitude, latitude.to_degrees().clamp(-90.0, 90.0))
}

/// Applies [`inertial_to_ground_track`] to every sample, preserving order.
pub fn trajectory_to_ground_track(
    samples: &[TrajectorySample],
    earth_rate: f64,
) -> Vec<GroundTrackPoint> {
    samples
        .iter()
        .map(|sample| {
            let (longitude, latitude) =
                inertial_to_ground_track(sample.position(), sample.time, earth_rate);
            GroundTrackPoint {
                time: sample.time,
                longitude,
                latitude,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{EARTH_ANGULAR_VELOCITY, PI, R_EARTH};
    use crate::models::StateVector;
    use approx::assert_abs_diff_eq;
    use rand::Rng;
    use test_case::test_case;

    const SIDEREAL_DAY: f64 = 2.0 * PI / EARTH_ANGULAR_VELOCITY;

    #[test_case(0.0, 0.0; "zero")]
    #[test_case(180.0, 180.0; "upper bound kept")]
    #[test_case(-180.0, 180.0; "lower bound maps to upper")]
    #[test_case(-180.0 - 1e-9, 180.0 - 1e-9; "just past lower bound")]
    #[test_case(190.0, -170.0; "over the antimeridian")]
    #[test_case(-540.0, 180.0; "several turns negative")]
    #[test_case(720.5, 0.5; "two full turns")]
    fn longitude_wrap(input: f64, expected: f64) {
        assert_abs_diff_eq!(wrap_longitude(input), expected, epsilon = 1e-9);
    }

    #[test]
    fn wrap_never_returns_lower_bound() {
        assert_eq!(wrap_longitude(-180.0), 180.0);
        assert_eq!(wrap_longitude(180.0), 180.0);
        assert_eq!(wrap_longitude(540.0), 180.0);
    }

    #[test]
    fn epoch_longitude_equals_right_ascension() {
        let position = na::Vector3::new(R_EARTH + 600e3, 0.0, 0.0);
        let (lon, lat) = inertial_to_ground_track(&position, 0.0, EARTH_ANGULAR_VELOCITY);
        assert_eq!(lon, 0.0);
        assert_eq!(lat, 0.0);

        let position = na::Vector3::new(0.0, 7.0e6, 0.0);
        let (lon, _) = inertial_to_ground_track(&position, 0.0, EARTH_ANGULAR_VELOCITY);
        assert_abs_diff_eq!(lon, 90.0, epsilon = 1e-12);
    }

    #[test]
    fn full_rotation_restores_longitude() {
        let position = na::Vector3::new(7.0e6, 0.0, 0.0);
        let (lon, _) = inertial_to_ground_track(&position, SIDEREAL_DAY, EARTH_ANGULAR_VELOCITY);
        // Either side of the seam is the same meridian
        let distance = lon.abs().min(360.0 - lon.abs());
        assert_abs_diff_eq!(distance, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn earth_rotation_drifts_track_westward() {
        let position = na::Vector3::new(7.0e6, 0.0, 0.0);
        let quarter_day = SIDEREAL_DAY / 4.0;
        let (lon, _) = inertial_to_ground_track(&position, quarter_day, EARTH_ANGULAR_VELOCITY);
        assert_abs_diff_eq!(lon, -90.0, epsilon = 1e-9);
    }

    #[test]
    fn sidereal_shift_is_invisible() {
        let mut rng = rand::thread_rng();
        for _ in 0..200 {
            let position = na::Vector3::new(
                rng.gen_range(-1.0e7..1.0e7),
                rng.gen_range(-1.0e7..1.0e7),
                rng.gen_range(-1.0e7..1.0e7),
            );
            let time = rng.gen_range(0.0..1.0e6);
            let (lon_a, lat_a) = inertial_to_ground_track(&position, time, EARTH_ANGULAR_VELOCITY);
            let (lon_b, lat_b) =
                inertial_to_ground_track(&position, time + SIDEREAL_DAY, EARTH_ANGULAR_VELOCITY);
            let difference = (lon_a - lon_b).abs();
            assert!(difference.min(360.0 - difference) < 1e-6, "{} vs {}", lon_a, lon_b);
            assert_eq!(lat_a, lat_b);
        }
    }

    #[test]
    fn outputs_stay_in_range() {
        let mut rng = rand::thread_rng();
        for _ in 0..1000 {
            let scale = 10f64.powi(rng.gen_range(-3..9));
            let position = na::Vector3::new(
                rng.gen_range(-1.0..1.0) * scale,
                rng.gen_range(-1.0..1.0) * scale,
                rng.gen_range(-1.0..1.0) * scale,
            );
            let time = rng.gen_range(0.0..1.0e7);
            let (lon, lat) = inertial_to_ground_track(&position, time, EARTH_ANGULAR_VELOCITY);
            assert!(lon > -180.0 && lon <= 180.0, "longitude {}", lon);
            assert!((-90.0..=90.0).contains(&lat), "latitude {}", lat);
        }
    }

    #[test_case(1.0; "north pole")]
    #[test_case(-1.0; "south pole")]
    fn polar_position_is_finite(sign: f64) {
        let position = na::Vector3::new(0.0, 0.0, sign * 7.0e6);
        let (lon, lat) = inertial_to_ground_track(&position, 1234.5, EARTH_ANGULAR_VELOCITY);
        assert!(lon.is_finite());
        assert!(lon > -180.0 && lon <= 180.0);
        assert_abs_diff_eq!(lat, sign * 90.0, epsilon = 1e-12);
    }

    #[test]
    fn samples_map_one_to_one_in_order() {
        let samples: Vec<TrajectorySample> = (0..5)
            .map(|i| TrajectorySample {
                time: i as f64 * 100.0,
                state: StateVector::new(na::Vector3::new(7.0e6, 0.0, 7.0e6), na::Vector3::zeros()),
            })
            .collect();
        let track = trajectory_to_ground_track(&samples, 0.0);
        assert_eq!(track.len(), 5);
        for (sample, point) in samples.iter().zip(&track) {
            assert_eq!(point.time, sample.time);
            assert_abs_diff_eq!(point.latitude, 45.0, epsilon = 1e-12);
            assert_abs_diff_eq!(point.longitude, 0.0, epsilon = 1e-12);
        }
    }
}
