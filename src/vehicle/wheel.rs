// Wheel actuator and visual node interfaces
//
// A physics backend implements `WheelActuator`; a renderer (or anything that
// wants wheel transforms) implements `VisualNode`.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// World-space position and orientation of a wheel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Pose {
    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::new(Vec3::ZERO, Quat::IDENTITY)
    }
}

/// One wheel of the physics backend
pub trait WheelActuator {
    /// Drive torque in Nm (negative = reverse)
    fn set_motor_torque(&mut self, torque: f32);

    /// Steer angle in degrees about the vertical axis
    fn set_steer_angle(&mut self, degrees: f32);

    /// Brake torque in Nm, always >= 0
    fn set_brake_torque(&mut self, torque: f32);

    /// Pose after the most recent simulation step
    fn world_pose(&self) -> Pose;

    /// Advance this wheel by `dt` seconds.
    ///
    /// Backends whose host engine steps physics on its own leave this empty.
    fn simulate(&mut self, _dt: f32) {}
}

/// Renderable transform that mirrors a wheel or the steering-wheel prop
pub trait VisualNode {
    fn set_position(&mut self, position: Vec3);
    fn set_rotation(&mut self, rotation: Quat);
    fn set_local_rotation(&mut self, rotation: Quat);
}

/// Plain transform record, published by the runtime for an external renderer
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TransformNode {
    pub position: Vec3,
    pub rotation: Quat,
    pub local_rotation: Quat,
}

impl VisualNode for TransformNode {
    fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    fn set_rotation(&mut self, rotation: Quat) {
        self.rotation = rotation;
    }

    fn set_local_rotation(&mut self, rotation: Quat) {
        self.local_rotation = rotation;
    }
}

/// Wheel slot on the vehicle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WheelPosition {
    FrontLeft,
    FrontRight,
    RearLeft,
    RearRight,
}

impl WheelPosition {
    pub const ALL: [WheelPosition; 4] = [
        WheelPosition::FrontLeft,
        WheelPosition::FrontRight,
        WheelPosition::RearLeft,
        WheelPosition::RearRight,
    ];

    pub fn is_front(self) -> bool {
        matches!(self, WheelPosition::FrontLeft | WheelPosition::FrontRight)
    }
}

/// One value per wheel, in [front_left, front_right, rear_left, rear_right] order
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Wheels<T> {
    pub front_left: T,
    pub front_right: T,
    pub rear_left: T,
    pub rear_right: T,
}

impl<T> Wheels<T> {
    pub fn new(front_left: T, front_right: T, rear_left: T, rear_right: T) -> Self {
        Self {
            front_left,
            front_right,
            rear_left,
            rear_right,
        }
    }

    /// Build by calling `f` for each slot in order
    pub fn from_fn(mut f: impl FnMut(WheelPosition) -> T) -> Self {
        Self::new(
            f(WheelPosition::FrontLeft),
            f(WheelPosition::FrontRight),
            f(WheelPosition::RearLeft),
            f(WheelPosition::RearRight),
        )
    }

    pub fn get(&self, position: WheelPosition) -> &T {
        match position {
            WheelPosition::FrontLeft => &self.front_left,
            WheelPosition::FrontRight => &self.front_right,
            WheelPosition::RearLeft => &self.rear_left,
            WheelPosition::RearRight => &self.rear_right,
        }
    }

    pub fn get_mut(&mut self, position: WheelPosition) -> &mut T {
        match position {
            WheelPosition::FrontLeft => &mut self.front_left,
            WheelPosition::FrontRight => &mut self.front_right,
            WheelPosition::RearLeft => &mut self.rear_left,
            WheelPosition::RearRight => &mut self.rear_right,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (WheelPosition, &T)> {
        WheelPosition::ALL.into_iter().map(move |p| (p, self.get(p)))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        [
            &mut self.front_left,
            &mut self.front_right,
            &mut self.rear_left,
            &mut self.rear_right,
        ]
        .into_iter()
    }

    /// Front pair only
    pub fn front_mut(&mut self) -> [&mut T; 2] {
        [&mut self.front_left, &mut self.front_right]
    }

    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> Wheels<U> {
        Wheels::from_fn(|p| f(self.get(p)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wheels_order() {
        let wheels = Wheels::new(1, 2, 3, 4);
        let order: Vec<i32> = wheels.iter().map(|(_, v)| *v).collect();
        assert_eq!(order, vec![1, 2, 3, 4]);
        assert_eq!(*wheels.get(WheelPosition::RearLeft), 3);
    }

    #[test]
    fn test_front_mut_touches_front_pair_only() {
        let mut wheels = Wheels::new(0, 0, 0, 0);
        for w in wheels.front_mut() {
            *w = 7;
        }
        assert_eq!(wheels, Wheels::new(7, 7, 0, 0));
    }

    #[test]
    fn test_is_front() {
        assert!(WheelPosition::FrontLeft.is_front());
        assert!(WheelPosition::FrontRight.is_front());
        assert!(!WheelPosition::RearLeft.is_front());
        assert!(!WheelPosition::RearRight.is_front());
    }

    #[test]
    fn test_transform_node_setters() {
        let mut node = TransformNode::default();
        node.set_position(Vec3::new(1.0, 2.0, 3.0));
        node.set_rotation(Quat::from_rotation_y(0.5));
        node.set_local_rotation(Quat::from_rotation_z(-0.25));

        assert_eq!(node.position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(node.rotation, Quat::from_rotation_y(0.5));
        assert_eq!(node.local_rotation, Quat::from_rotation_z(-0.25));
    }
}
