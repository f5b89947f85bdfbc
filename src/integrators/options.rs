use crate::constants::{ABSOLUTE_TOLERANCE, RELATIVE_TOLERANCE};
use std::fmt;
use std::time::Duration;

/// Step-size control and run guards for the adaptive integrator.
///
/// The error of a step is scaled per component by `atol + rtol * max(|y|, |y_new|)` and the step is
/// accepted when the RMS of the scaled error is at most one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IntegratorOptions {
    pub rtol: f64,
    pub atol: f64,
    /// First trial step [s]; chosen from the local dynamics when `None`
    pub init_step: Option<f64>,
    pub min_step: f64,
    pub max_step: f64,
    /// Upper bound on accepted plus rejected steps for a single propagation
    pub max_steps: usize,
    pub max_wall_time: Option<Duration>,
}

impl IntegratorOptions {
    pub fn with_tolerances(rtol: f64, atol: f64) -> Self {
        IntegratorOptions {
            rtol,
            atol,
            ..Default::default()
        }
    }
}

impl Default for IntegratorOptions {
    fn default() -> Self {
        IntegratorOptions {
            rtol: RELATIVE_TOLERANCE,
            atol: ABSOLUTE_TOLERANCE,
            init_step: None,
            min_step: 1e-6,
            max_step: f64::INFINITY,
            max_steps: 1_000_000,
            max_wall_time: None,
        }
    }
}

impl fmt::Display for IntegratorOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rtol: {:e}, atol: {:e}, min_step: {:e} s, max_step: {:e} s, max_steps: {}",
            self.rtol, self.atol, self.min_step, self.max_step, self.max_steps
        )?;
        if let Some(limit) = self.max_wall_time {
            write!(f, ", max_wall_time: {:?}", limit)?;
        }
        Ok(())
    }
}

#[test]
fn test_options() {
    let opts = IntegratorOptions::default();
    assert!((opts.rtol - 1e-8).abs() < f64::EPSILON);
    assert!((opts.atol - 1e-6).abs() < f64::EPSILON);
    assert_eq!(opts.init_step, None);
    assert_eq!(opts.max_steps, 1_000_000);

    let opts = IntegratorOptions {
        max_wall_time: Some(Duration::from_secs(30)),
        ..IntegratorOptions::with_tolerances(1e-9, 1e-3)
    };
    assert!((opts.atol - 1e-3).abs() < f64::EPSILON);
    assert_eq!(opts.min_step, 1e-6);
    assert!(opts.to_string().starts_with("rtol: 1e-9"));
    assert!(opts.to_string().ends_with("max_wall_time: 30s"));
}
