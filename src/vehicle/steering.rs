// Smoothed steering-wheel prop rotation
//
// The prop eases toward `steer_input * max_rotation` by a clamped fraction of
// the remaining gap each step, so it never jumps and never overshoots.

use glam::Quat;

/// Persistent smoothing accumulator for the dashboard steering wheel
#[derive(Debug, Clone, Copy, Default)]
pub struct SteeringWheelSmoother {
    current: f32, // degrees
}

impl SteeringWheelSmoother {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current smoothed angle in degrees
    pub fn angle(&self) -> f32 {
        self.current
    }

    /// Move toward `target` (degrees) and return the new angle
    ///
    /// # Arguments
    /// * `target` - Target angle in degrees
    /// * `dt` - Step duration in seconds
    /// * `speed` - Approach rate per second; `dt * speed` is clamped to [0, 1]
    pub fn update(&mut self, target: f32, dt: f32, speed: f32) -> f32 {
        let t = (dt * speed).clamp(0.0, 1.0);
        self.current += (target - self.current) * t;
        self.current
    }

    /// Local rotation for the prop: spins about Z opposite to the steer sign
    pub fn local_rotation(&self) -> Quat {
        Quat::from_rotation_z((-self.current).to_radians())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 0.02;

    #[test]
    fn test_starts_at_zero() {
        assert_eq!(SteeringWheelSmoother::new().angle(), 0.0);
    }

    #[test]
    fn test_single_step_fraction() {
        let mut s = SteeringWheelSmoother::new();
        // 0.02 * 10 = 0.2 of the gap
        let angle = s.update(400.0, DT, 10.0);
        assert!((angle - 80.0).abs() < 1e-4);
    }

    #[test]
    fn test_converges_monotonically_with_shrinking_steps() {
        let mut s = SteeringWheelSmoother::new();
        let target = -400.0;
        let mut prev = s.angle();
        let mut prev_delta = f32::INFINITY;

        for _ in 0..30 {
            let next = s.update(target, DT, 10.0);
            let delta = (next - prev).abs();

            assert!(next <= prev, "should move toward a negative target");
            assert!(next >= target, "must not overshoot");
            assert!(delta < prev_delta, "steps should shrink");

            prev_delta = delta;
            prev = next;
        }
        assert!((s.angle() - target).abs() < 1.0);
    }

    #[test]
    fn test_large_step_clamps_to_target() {
        let mut s = SteeringWheelSmoother::new();
        // dt * speed = 5.0, clamped to 1.0: lands exactly on target
        assert_eq!(s.update(120.0, 0.5, 10.0), 120.0);
    }

    #[test]
    fn test_zero_speed_holds_value() {
        let mut s = SteeringWheelSmoother::new();
        s.update(100.0, DT, 10.0);
        let held = s.angle();
        assert_eq!(s.update(-400.0, DT, 0.0), held);
    }

    #[test]
    fn test_local_rotation_is_negated_about_z() {
        let mut s = SteeringWheelSmoother::new();
        s.update(90.0, 1.0, 1.0);
        let expected = Quat::from_rotation_z(-90f32.to_radians());
        assert!(s.local_rotation().abs_diff_eq(expected, 1e-6));
    }
}
