//! Proportional-integral-derivative regulator with a clamped output.
//!
//! Each vehicle axis (pitch, roll, yaw, throttle) owns one [`Pid`]. The
//! timestep is fixed at construction: controllers assume a nominal tick rate
//! rather than sampling the real frame delta, so their tuning is independent
//! of frame-rate jitter.

/// A stateful PID controller producing a bounded correction term.
///
/// The integral accumulates without anti-windup. That is a deliberate
/// simplification of this flight model, not an oversight; the tight output
/// clamp keeps the applied correction bounded regardless.
#[derive(Clone, Debug)]
pub struct Pid {
    /// Proportional gain.
    pub kp: f64,
    /// Integral gain.
    pub ki: f64,
    /// Derivative gain.
    pub kd: f64,
    /// Fixed timestep used for integral/derivative terms.
    pub dt: f64,
    /// Lower output bound.
    pub min: f64,
    /// Upper output bound.
    pub max: f64,
    integral: f64,
    prev_error: f64,
}

impl Pid {
    /// Create a controller with the given gains, fixed timestep, and output
    /// bounds.
    pub fn new(kp: f64, ki: f64, kd: f64, dt: f64, min: f64, max: f64) -> Self {
        Self {
            kp,
            ki,
            kd,
            dt,
            min,
            max,
            integral: 0.0,
            prev_error: 0.0,
        }
    }

    /// Compute the clamped correction for one tick.
    ///
    /// Updates the integral and stored error as side effects; call exactly
    /// once per tick per axis.
    pub fn update(&mut self, setpoint: f64, measured: f64) -> f64 {
        let error = setpoint - measured;
        self.integral += error * self.dt;
        let derivative = (error - self.prev_error) / self.dt;
        self.prev_error = error;
        let output = self.kp * error + self.ki * self.integral + self.kd * derivative;
        output.clamp(self.min, self.max)
    }

    /// Zero the integral and stored error without touching the gains.
    pub fn reset(&mut self) {
        self.integral = 0.0;
        self.prev_error = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_error_settles_to_zero_output() {
        let mut pid = Pid::new(0.1, 0.01, 0.05, 0.5, -0.5, 0.5);
        // With setpoint == measured from the start, every term stays zero.
        for _ in 0..100 {
            assert_eq!(pid.update(1.0, 1.0), 0.0);
        }
    }

    #[test]
    fn test_output_settles_after_error_removed() {
        let mut pid = Pid::new(0.1, 0.0, 0.05, 0.5, -0.5, 0.5);
        // Drive with an error, then remove it; without an integral term the
        // output must return to zero once the derivative transient passes.
        pid.update(1.0, 0.0);
        pid.update(1.0, 1.0);
        assert_eq!(pid.update(1.0, 1.0), 0.0);
    }

    #[test]
    fn test_output_never_exceeds_bounds() {
        let mut pid = Pid::new(2.0, 1.0, 1.0, 0.5, -0.5, 0.5);
        let inputs = [1e6, -1e6, 42.0, 0.0, -3.5, 1e9];
        for &measured in &inputs {
            let out = pid.update(0.0, measured);
            assert!(
                (-0.5..=0.5).contains(&out),
                "output {out} escaped clamp for measured {measured}"
            );
        }
    }

    #[test]
    fn test_proportional_response_sign() {
        let mut pid = Pid::new(0.1, 0.0, 0.0, 0.5, -0.5, 0.5);
        assert!(pid.update(1.0, 0.0) > 0.0);
        pid.reset();
        assert!(pid.update(-1.0, 0.0) < 0.0);
    }

    #[test]
    fn test_integral_accumulates_without_windup_guard() {
        let mut pid = Pid::new(0.0, 1.0, 0.0, 1.0, -100.0, 100.0);
        // Constant error of 1.0 per tick: integral grows linearly.
        assert_eq!(pid.update(1.0, 0.0), 1.0);
        assert_eq!(pid.update(1.0, 0.0), 2.0);
        assert_eq!(pid.update(1.0, 0.0), 3.0);
    }

    #[test]
    fn test_reset_zeroes_state_but_keeps_gains() {
        let mut pid = Pid::new(0.1, 0.5, 0.05, 0.5, -0.5, 0.5);
        pid.update(10.0, 0.0);
        pid.reset();
        assert_eq!(pid.kp, 0.1);
        assert_eq!(pid.ki, 0.5);
        // After reset a zero-error update produces zero output again.
        assert_eq!(pid.update(0.0, 0.0), 0.0);
    }

    #[test]
    fn test_derivative_responds_to_error_change() {
        let mut pid = Pid::new(0.0, 0.0, 1.0, 1.0, -10.0, 10.0);
        assert_eq!(pid.update(1.0, 0.0), 1.0); // error jumped 0 -> 1
        assert_eq!(pid.update(1.0, 0.0), 0.0); // error unchanged
    }
}
