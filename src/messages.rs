// Define message types for the runtime

use serde::{Deserialize, Serialize};

use crate::vehicle::{Axis, InputSource, Key, Pose, TransformNode, WheelCommand, Wheels};

// Driver input from teleop/scripts -> runtime
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DriveCommand {
    /// Throttle axis, [-1, 1]
    pub vertical: f32,
    /// Steer axis, [-1, 1]
    pub horizontal: f32,
    #[serde(default)]
    pub keys_held: Vec<Key>,
}

impl DriveCommand {
    pub fn new(vertical: f32, horizontal: f32, keys_held: Vec<Key>) -> Self {
        Self {
            vertical,
            horizontal,
            keys_held,
        }
    }

    /// Axes plus the runtime's brake key when `brake` is set
    pub fn from_axes(vertical: f32, horizontal: f32, brake: bool, brake_key: Key) -> Self {
        let keys_held = if brake { vec![brake_key] } else { vec![] };
        Self::new(vertical, horizontal, keys_held)
    }

    /// Centered axes with only `key` held; used when input goes stale
    pub fn holding(key: Key) -> Self {
        Self::new(0.0, 0.0, vec![key])
    }
}

// Out-of-range or NaN axes from the wire are pinned to [-1, 1] / 0
impl InputSource for DriveCommand {
    fn axis(&self, axis: Axis) -> f32 {
        let value = match axis {
            Axis::Vertical => self.vertical,
            Axis::Horizontal => self.horizontal,
        };
        if value.is_nan() {
            0.0
        } else {
            value.clamp(-1.0, 1.0)
        }
    }

    fn is_key_held(&self, key: Key) -> bool {
        self.keys_held.contains(&key)
    }
}

/// Commanded values and resulting pose for one wheel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WheelState {
    pub command: WheelCommand,
    pub pose: Pose,
}

// Per-step snapshot runtime -> renderer/logging
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RigTelemetry {
    pub wheels: Wheels<WheelState>,
    pub visual_wheels: Wheels<Option<TransformNode>>,
    pub steering_wheel: Option<TransformNode>,
    /// Smoothed prop angle in degrees
    pub steering_wheel_angle: f32,
}

/// Health status published by runtime
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum RuntimeHealth {
    Ok,
    CmdStale,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drive_command_from_json() {
        let cmd: DriveCommand =
            serde_json::from_str(r#"{"vertical":0.5,"horizontal":-1.0,"keys_held":["space"]}"#)
                .unwrap();
        assert_eq!(cmd.axis(Axis::Vertical), 0.5);
        assert_eq!(cmd.axis(Axis::Horizontal), -1.0);
        assert!(cmd.is_key_held(Key::Space));
        assert!(!cmd.is_key_held(Key::Char('b')));
    }

    #[test]
    fn test_keys_default_to_empty() {
        let cmd: DriveCommand =
            serde_json::from_str(r#"{"vertical":1.0,"horizontal":0.0}"#).unwrap();
        assert!(cmd.keys_held.is_empty());
    }

    #[test]
    fn test_axes_are_clamped() {
        let cmd = DriveCommand::new(3.0, f32::NAN, vec![]);
        assert_eq!(cmd.axis(Axis::Vertical), 1.0);
        assert_eq!(cmd.axis(Axis::Horizontal), 0.0);
        let cmd = DriveCommand::new(-7.0, -1.5, vec![]);
        assert_eq!(cmd.axis(Axis::Vertical), -1.0);
        assert_eq!(cmd.axis(Axis::Horizontal), -1.0);
    }

    #[test]
    fn test_from_axes_sends_given_brake_key() {
        let cmd = DriveCommand::from_axes(0.5, 0.0, true, Key::Char('b'));
        assert!(cmd.is_key_held(Key::Char('b')));
        assert!(!cmd.is_key_held(Key::Space));

        let cmd = DriveCommand::from_axes(0.5, 0.0, false, Key::Char('b'));
        assert!(cmd.keys_held.is_empty());
    }

    #[test]
    fn test_holding_is_neutral() {
        let cmd = DriveCommand::holding(Key::Space);
        assert_eq!(cmd.axis(Axis::Vertical), 0.0);
        assert_eq!(cmd.axis(Axis::Horizontal), 0.0);
        assert!(cmd.is_key_held(Key::Space));
    }

    #[test]
    fn test_health_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&RuntimeHealth::CmdStale).unwrap(),
            "\"cmd_stale\""
        );
    }
}
