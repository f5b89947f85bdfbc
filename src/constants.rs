// Earth
pub const R_EARTH: f64 = 6_371_302.0; // Mean radius of Earth (m)
pub const MU_EARTH: f64 = 398600.4415e9; // Gravitational parameter (m³/s²)
pub const EARTH_ANGULAR_VELOCITY: f64 = 7.29211e-5; // Earth's rotation rate (rad/s)
pub const EARTH_J2: f64 = 1082.8e-6; // Not applied by the point-mass dynamics

// Reference mission
pub const ORBIT_ALTITUDE: f64 = 600_000.0; // m
pub const ORBIT_INCLINATION_DEG: f64 = 98.0;
pub const SATELLITE_COUNT: usize = 14;
pub const SPAN_PERIODS: f64 = 122.0;
pub const OUTPUT_PERIODS: f64 = 3.0;
pub const OUTPUT_SAMPLES: usize = 1000;

// Integrator
pub const RELATIVE_TOLERANCE: f64 = 1e-8;
pub const ABSOLUTE_TOLERANCE: f64 = 1e-6;

// Math
pub const PI: f64 = std::f64::consts::PI;
pub const TWO_PI: f64 = 2.0 * PI;
