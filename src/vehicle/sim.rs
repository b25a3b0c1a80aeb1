// In-process wheel simulation
//
// Stands in for an engine's wheel colliders: spins under motor torque, slows
// under brake torque and rolling resistance, and yaws with the steer angle.
// Wheels stay at their mount points; there is no chassis or suspension.

use glam::{Quat, Vec3};

use super::wheel::{Pose, WheelActuator, WheelPosition, Wheels};
use crate::config::SimConfig;

/// Kinematic wheel with a single spin degree of freedom
#[derive(Debug, Clone)]
pub struct SimWheel {
    mount: Vec3,
    inertia: f32,
    rolling_resistance: f32,

    motor_torque: f32,
    steer_angle: f32, // degrees
    brake_torque: f32,

    spin_rate: f32,  // rad/s
    spin_angle: f32, // rad, wrapped to [0, 2pi)
}

impl SimWheel {
    pub fn new(mount: Vec3, inertia: f32, rolling_resistance: f32) -> Self {
        Self {
            mount,
            inertia,
            rolling_resistance,
            motor_torque: 0.0,
            steer_angle: 0.0,
            brake_torque: 0.0,
            spin_rate: 0.0,
            spin_angle: 0.0,
        }
    }

    /// Build all four wheels around the vehicle origin (Y up, Z forward)
    pub fn axle_set(config: &SimConfig) -> Wheels<SimWheel> {
        let half_track = config.track_width / 2.0;
        let half_base = config.wheelbase / 2.0;

        Wheels::from_fn(|position| {
            let x = match position {
                WheelPosition::FrontLeft | WheelPosition::RearLeft => -half_track,
                WheelPosition::FrontRight | WheelPosition::RearRight => half_track,
            };
            let z = if position.is_front() { half_base } else { -half_base };
            let mount = Vec3::new(x, config.wheel_radius, z);
            SimWheel::new(mount, config.wheel_inertia, config.rolling_resistance)
        })
    }

    pub fn brake_torque(&self) -> f32 {
        self.brake_torque
    }

    /// rad/s about the axle
    pub fn spin_rate(&self) -> f32 {
        self.spin_rate
    }
}

impl WheelActuator for SimWheel {
    fn set_motor_torque(&mut self, torque: f32) {
        self.motor_torque = torque;
    }

    fn set_steer_angle(&mut self, degrees: f32) {
        self.steer_angle = degrees;
    }

    fn set_brake_torque(&mut self, torque: f32) {
        self.brake_torque = torque.max(0.0);
    }

    fn world_pose(&self) -> Pose {
        let steer = Quat::from_rotation_y(self.steer_angle.to_radians());
        let spin = Quat::from_rotation_x(self.spin_angle);
        Pose::new(self.mount, steer * spin)
    }

    fn simulate(&mut self, dt: f32) {
        if dt <= 0.0 {
            return;
        }

        let drive = self.motor_torque - self.rolling_resistance * self.spin_rate;
        self.spin_rate += drive / self.inertia * dt;

        // Brake opposes spin but cannot reverse it
        let brake_dv = self.brake_torque / self.inertia * dt;
        if self.spin_rate.abs() <= brake_dv {
            self.spin_rate = 0.0;
        } else {
            self.spin_rate -= brake_dv.copysign(self.spin_rate);
        }

        self.spin_angle =
            (self.spin_angle + self.spin_rate * dt).rem_euclid(std::f32::consts::TAU);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wheel() -> SimWheel {
        SimWheel::new(Vec3::new(0.8, 0.4, 1.2), 1.5, 0.5)
    }

    #[test]
    fn test_idle_wheel_stays_put() {
        let mut w = wheel();
        w.simulate(0.02);
        assert_eq!(w.spin_rate(), 0.0);
        assert_eq!(w.world_pose(), Pose::new(Vec3::new(0.8, 0.4, 1.2), Quat::IDENTITY));
    }

    #[test]
    fn test_motor_torque_spins_up() {
        let mut w = wheel();
        w.set_motor_torque(300.0);
        for _ in 0..10 {
            w.simulate(0.02);
        }
        assert!(w.spin_rate() > 0.0);

        let mut r = wheel();
        r.set_motor_torque(-300.0);
        r.simulate(0.02);
        assert!(r.spin_rate() < 0.0);
    }

    #[test]
    fn test_brake_stops_without_reversing() {
        let mut w = wheel();
        w.set_motor_torque(300.0);
        for _ in 0..10 {
            w.simulate(0.02);
        }
        w.set_motor_torque(0.0);
        w.set_brake_torque(500.0);
        for _ in 0..200 {
            w.simulate(0.02);
            assert!(w.spin_rate() >= 0.0);
        }
        assert_eq!(w.spin_rate(), 0.0);
    }

    #[test]
    fn test_negative_brake_is_clamped() {
        let mut w = wheel();
        w.set_brake_torque(-10.0);
        assert_eq!(w.brake_torque(), 0.0);
    }

    #[test]
    fn test_steer_yaws_pose() {
        let mut w = wheel();
        w.set_steer_angle(30.0);
        let expected = Quat::from_rotation_y(30f32.to_radians());
        assert!(w.world_pose().rotation.abs_diff_eq(expected, 1e-6));
        assert_eq!(w.world_pose().position, Vec3::new(0.8, 0.4, 1.2));
    }

    #[test]
    fn test_axle_set_layout() {
        let config = SimConfig::default();
        let wheels = SimWheel::axle_set(&config);
        let fl = wheels.front_left.world_pose().position;
        let rr = wheels.rear_right.world_pose().position;
        assert!(fl.x < 0.0 && fl.z > 0.0);
        assert!(rr.x > 0.0 && rr.z < 0.0);
        assert_eq!(fl.y, config.wheel_radius);
        assert!((rr.x - fl.x - config.track_width).abs() < 1e-6);
        assert!((fl.z - rr.z - config.wheelbase).abs() < 1e-6);
    }
}
