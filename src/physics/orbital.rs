use crate::constants::TWO_PI;
use nalgebra as na;

pub struct OrbitalMechanics;

impl OrbitalMechanics {
    /// Converts Cartesian state (position and velocity) to Keplerian orbital elements
    /// Returns: [a, e, i, Omega, omega, nu]
    ///   a: semi-major axis [m]
    ///   e: eccentricity [-]
    ///   i: inclination [rad]
    ///   Omega: right ascension of ascending node [rad]
    ///   omega: argument of periapsis [rad]
    ///   nu: true anomaly [rad], argument of latitude for circular orbits
    pub fn cartesian_to_keplerian(
        r: &na::Vector3<f64>,
        v: &na::Vector3<f64>,
        mu: f64,
    ) -> na::Vector6<f64> {
        let mut elements = na::Vector6::zeros();

        // Calculate angular momentum vector
        let h = r.cross(v);
        let h_mag = h.magnitude();

        // Calculate node vector
        let k = na::Vector3::new(0.0, 0.0, 1.0);
        let n = k.cross(&h);
        let n_mag = n.magnitude();

        // Calculate eccentricity vector
        let r_mag = r.magnitude();
        let v_mag = v.magnitude();
        let e_vec = ((v_mag * v_mag - mu / r_mag) * r - r.dot(v) * v) / mu;
        let e = e_vec.magnitude();
        elements[1] = e;

        // Semi-major axis
        let specific_energy = v_mag * v_mag / 2.0 - mu / r_mag;
        elements[0] = -mu / (2.0 * specific_energy);

        // Inclination
        elements[2] = (h.z / h_mag).acos();

        // Right ascension of ascending node
        elements[3] = if n_mag < 1e-11 {
            0.0
        } else {
            let mut raan = n.y.atan2(n.x);
            if raan < 0.0 {
                raan += TWO_PI;
            }
            raan
        };

        // Argument of periapsis
        elements[4] = if e < 1e-9 {
            0.0
        } else if n_mag < 1e-11 {
            let mut omega = e_vec.y.atan2(e_vec.x);
            if omega < 0.0 {
                omega += TWO_PI;
            }
            omega
        } else {
            let mut omega = h.dot(&n.cross(&e_vec)).atan2(n.dot(&e_vec) * h_mag);
            if omega < 0.0 {
                omega += TWO_PI;
            }
            omega
        };

        // True anomaly
        elements[5] = if e < 1e-9 {
            let mut u = if n_mag < 1e-11 {
                r.y.atan2(r.x)
            } else {
                h.dot(&n.cross(r)).atan2(n.dot(r) * h_mag)
            };
            if u < 0.0 {
                u += TWO_PI;
            }
            u
        } else {
            let mut nu = h.dot(&e_vec.cross(r)).atan2(e_vec.dot(r) * h_mag);
            if nu < 0.0 {
                nu += TWO_PI;
            }
            nu
        };

        elements
    }

    pub fn compute_orbital_period(a: f64, mu: f64) -> f64 {
        TWO_PI * (a.powi(3) / mu).sqrt()
    }

    pub fn compute_circular_velocity(r: f64, mu: f64) -> f64 {
        (mu / r).sqrt()
    }

    /// Converts Keplerian orbital elements to Cartesian state vectors
    /// Input elements: [a, e, i, Omega, omega, nu]
    /// Returns: (position, velocity) in ECI frame [m, m/s]
    pub fn keplerian_to_cartesian(
        elements: &na::Vector6<f64>,
        mu: f64,
    ) -> (na::Vector3<f64>, na::Vector3<f64>) {
        let (a, e, i, omega_cap, omega, nu) = (
            elements[0],
            elements[1],
            elements[2],
            elements[3],
            elements[4],
            elements[5],
        );

        // Calculate position and velocity in orbital plane
        let p = a * (1.0 - e * e);
        let r_mag = p / (1.0 + e * nu.cos());

        // Position in orbital plane
        let r_orbital = na::Vector3::new(r_mag * nu.cos(), r_mag * nu.sin(), 0.0);

        // Velocity in orbital plane
        let v_orbital = na::Vector3::new(
            -(mu / p).sqrt() * nu.sin(),
            (mu / p).sqrt() * (e + nu.cos()),
            0.0,
        );

        // Rotation matrices
        let rot_omega = na::Rotation3::from_axis_angle(&na::Vector3::z_axis(), omega);
        let rot_i = na::Rotation3::from_axis_angle(&na::Vector3::x_axis(), i);
        let rot_omega_cap = na::Rotation3::from_axis_angle(&na::Vector3::z_axis(), omega_cap);

        // Transform to ECI frame
        let transform = rot_omega_cap * rot_i * rot_omega;
        let r_eci = transform * r_orbital;
        let v_eci = transform * v_orbital;

        (r_eci, v_eci)
    }
}
