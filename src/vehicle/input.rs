// Driver input: axis/key queries and keyboard axis emulation

use serde::{Deserialize, Serialize};

/// Continuous input axes, each in [-1, 1]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Throttle (+) / reverse (-)
    Vertical,
    /// Steer right (+) / left (-)
    Horizontal,
}

/// Discrete keys the controller can query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    #[default]
    Space,
    Char(char),
}

impl std::str::FromStr for Key {
    type Err = String;

    /// `space` or a single character
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("space") {
            return Ok(Key::Space);
        }
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(Key::Char(c)),
            _ => Err(format!("unknown key {:?}, expected \"space\" or one character", s)),
        }
    }
}

/// Input sampled once per physics step
pub trait InputSource {
    fn axis(&self, axis: Axis) -> f32;
    fn is_key_held(&self, key: Key) -> bool;
}

/// Digital-to-analog axis, the way engine input managers emulate a stick
/// from two keys.
///
/// Moves toward the held direction at `sensitivity` units/s, falls back to 0
/// at `gravity` units/s when nothing is held, and with `snap` jumps to 0
/// first when the opposite direction is pressed.
#[derive(Debug, Clone, Copy)]
pub struct VirtualAxis {
    pub sensitivity: f32,
    pub gravity: f32,
    pub snap: bool,
    value: f32,
}

impl Default for VirtualAxis {
    fn default() -> Self {
        Self {
            sensitivity: 3.0,
            gravity: 3.0,
            snap: true,
            value: 0.0,
        }
    }
}

impl VirtualAxis {
    pub fn new(sensitivity: f32, gravity: f32, snap: bool) -> Self {
        Self {
            sensitivity,
            gravity,
            snap,
            value: 0.0,
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    /// Advance by `dt` seconds given which of the two keys are held
    pub fn update(&mut self, positive: bool, negative: bool, dt: f32) -> f32 {
        let target = match (positive, negative) {
            (true, false) => 1.0,
            (false, true) => -1.0,
            // both or neither
            _ => 0.0,
        };

        if target == 0.0 {
            self.value = approach(self.value, 0.0, self.gravity * dt);
        } else {
            if self.snap && self.value * target < 0.0 {
                self.value = 0.0;
            }
            self.value = approach(self.value, target, self.sensitivity * dt);
        }
        self.value
    }
}

/// Step `current` toward `target` by at most `max_delta`
fn approach(current: f32, target: f32, max_delta: f32) -> f32 {
    let diff = target - current;
    if diff.abs() <= max_delta {
        target
    } else {
        current + max_delta.copysign(diff)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ramps_up_at_sensitivity() {
        let mut axis = VirtualAxis::default();
        let v = axis.update(true, false, 0.1);
        assert!((v - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_saturates_at_one() {
        let mut axis = VirtualAxis::default();
        for _ in 0..100 {
            axis.update(true, false, 0.02);
        }
        assert_eq!(axis.value(), 1.0);
    }

    #[test]
    fn test_returns_to_zero_with_gravity() {
        let mut axis = VirtualAxis::default();
        for _ in 0..100 {
            axis.update(false, true, 0.02);
        }
        assert_eq!(axis.value(), -1.0);

        let v = axis.update(false, false, 0.1);
        assert!((v + 0.7).abs() < 1e-6);

        for _ in 0..100 {
            axis.update(false, false, 0.02);
        }
        assert_eq!(axis.value(), 0.0);
    }

    #[test]
    fn test_snap_on_reversal() {
        let mut axis = VirtualAxis::default();
        for _ in 0..100 {
            axis.update(true, false, 0.02);
        }
        let v = axis.update(false, true, 0.1);
        // Snapped to 0 first, then one sensitivity step negative
        assert!((v + 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_no_snap_crosses_gradually() {
        let mut axis = VirtualAxis::new(3.0, 3.0, false);
        for _ in 0..100 {
            axis.update(true, false, 0.02);
        }
        let v = axis.update(false, true, 0.1);
        assert!((v - 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_both_keys_cancel() {
        let mut axis = VirtualAxis::default();
        assert_eq!(axis.update(true, true, 0.1), 0.0);
    }

    #[test]
    fn test_key_from_str() {
        assert_eq!("space".parse::<Key>(), Ok(Key::Space));
        assert_eq!("SPACE".parse::<Key>(), Ok(Key::Space));
        assert_eq!("b".parse::<Key>(), Ok(Key::Char('b')));
        assert!("".parse::<Key>().is_err());
        assert!("bb".parse::<Key>().is_err());
    }

    #[test]
    fn test_key_serde() {
        let json = serde_json::to_string(&Key::Space).unwrap();
        assert_eq!(json, "\"space\"");
        let key: Key = serde_json::from_str("{\"char\":\"b\"}").unwrap();
        assert_eq!(key, Key::Char('b'));
    }
}
