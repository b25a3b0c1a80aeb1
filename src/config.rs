// Loop rate, timeouts, topics, vehicle tuning
use std::path::Path;
use std::time::Duration;

use glam::{EulerRot, Quat};
use serde::{Deserialize, Serialize};

use crate::vehicle::input::Key;

// Runtime loop frequency
pub const LOOP_HZ: u64 = 50;

// Command timeout for watchdog
pub const CMD_TIMEOUT: Duration = Duration::from_millis(250);

// Zenoh topics
pub const TOPIC_CMD_DRIVE: &str = "jeep/cmd/drive"; // driver input
pub const TOPIC_RT_RIG: &str = "jeep/rt/rig"; // wheel commands, poses, visuals
pub const TOPIC_HEALTH: &str = "jeep/state/health"; // health status

/// Errors raised while loading or validating configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Drivetrain, steering and brake limits
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrivingStats {
    /// Nm at full throttle
    pub max_motor_torque: f32,
    /// Degrees at full steer, front wheels only
    pub max_steering_angle: f32,
    /// Nm applied to every wheel while braking
    pub brake_torque: f32,
}

impl Default for DrivingStats {
    fn default() -> Self {
        Self {
            max_motor_torque: 300.0,
            max_steering_angle: 30.0,
            brake_torque: 500.0,
        }
    }
}

/// Dashboard steering-wheel prop
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SteeringWheelConfig {
    /// Prop rotation in degrees at full steer
    pub max_rotation: f32,
    /// Smoothing rate; 5 to 15 looks natural
    pub rotation_speed: f32,
}

impl Default for SteeringWheelConfig {
    fn default() -> Self {
        Self {
            max_rotation: 400.0,
            rotation_speed: 10.0,
        }
    }
}

/// Fixed rotation that lines a wheel mesh up with its physics wheel.
///
/// Euler degrees composed Z, then X, then Y. Depends on how the asset was
/// authored and has to be re-measured per model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualOffset {
    pub x_deg: f32,
    pub y_deg: f32,
    pub z_deg: f32,
}

impl Default for VisualOffset {
    fn default() -> Self {
        Self {
            x_deg: 1.0,
            y_deg: 0.0,
            z_deg: 180.0,
        }
    }
}

impl VisualOffset {
    pub fn identity() -> Self {
        Self {
            x_deg: 0.0,
            y_deg: 0.0,
            z_deg: 0.0,
        }
    }

    pub fn to_quat(&self) -> Quat {
        Quat::from_euler(
            EulerRot::YXZ,
            self.y_deg.to_radians(),
            self.x_deg.to_radians(),
            self.z_deg.to_radians(),
        )
    }
}

/// Built-in wheel simulation used when no external physics engine is attached
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// meters
    pub wheel_radius: f32,
    /// kg*m^2 about the axle
    pub wheel_inertia: f32,
    /// Nm per rad/s
    pub rolling_resistance: f32,
    /// meters, left to right wheel centers
    pub track_width: f32,
    /// meters, front to rear axle
    pub wheelbase: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            wheel_radius: 0.4,
            wheel_inertia: 1.5,
            rolling_resistance: 0.5,
            track_width: 1.6,
            wheelbase: 2.4,
        }
    }
}

/// Everything the controller needs besides its bindings
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VehicleConfig {
    pub driving: DrivingStats,
    pub steering_wheel: SteeringWheelConfig,
    pub brake_key: Key,
    pub wheel_offset: VisualOffset,
}

/// Top-level runtime configuration, loadable from JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub loop_hz: u64,
    pub cmd_timeout_ms: u64,
    pub vehicle: VehicleConfig,
    pub sim: SimConfig,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            loop_hz: LOOP_HZ,
            cmd_timeout_ms: CMD_TIMEOUT.as_millis() as u64,
            vehicle: VehicleConfig::default(),
            sim: SimConfig::default(),
        }
    }
}

impl RuntimeConfig {
    /// Read a JSON config file; missing fields keep their defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let config: RuntimeConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn cmd_timeout(&self) -> Duration {
        Duration::from_millis(self.cmd_timeout_ms)
    }

    /// Loop timer period
    pub fn step_period(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.loop_hz as f64)
    }

    /// Fixed step length in seconds, same value the loop timer runs at
    pub fn step_dt(&self) -> f32 {
        self.step_period().as_secs_f32()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.loop_hz == 0 || self.loop_hz > 1000 {
            return Err(ConfigError::Invalid {
                field: "loop_hz",
                reason: format!("{} not in 1..=1000", self.loop_hz),
            });
        }

        let driving = &self.vehicle.driving;
        let wheel = &self.vehicle.steering_wheel;
        let offset = &self.vehicle.wheel_offset;
        non_negative("driving.max_motor_torque", driving.max_motor_torque)?;
        non_negative("driving.max_steering_angle", driving.max_steering_angle)?;
        non_negative("driving.brake_torque", driving.brake_torque)?;
        finite("steering_wheel.max_rotation", wheel.max_rotation)?;
        non_negative("steering_wheel.rotation_speed", wheel.rotation_speed)?;
        finite("wheel_offset.x_deg", offset.x_deg)?;
        finite("wheel_offset.y_deg", offset.y_deg)?;
        finite("wheel_offset.z_deg", offset.z_deg)?;

        positive("sim.wheel_radius", self.sim.wheel_radius)?;
        positive("sim.wheel_inertia", self.sim.wheel_inertia)?;
        non_negative("sim.rolling_resistance", self.sim.rolling_resistance)?;
        non_negative("sim.track_width", self.sim.track_width)?;
        non_negative("sim.wheelbase", self.sim.wheelbase)?;
        Ok(())
    }
}

fn finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("{} is not finite", value),
        })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value < 0.0 {
        return Err(ConfigError::Invalid {
            field,
            reason: format!("{} is negative", value),
        });
    }
    Ok(())
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value <= 0.0 {
        return Err(ConfigError::Invalid {
            field,
            reason: format!("{} must be > 0", value),
        });
    }
    Ok(())
}
