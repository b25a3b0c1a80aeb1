// Per-step drive controller
//
// Maps driver input to wheel commands, steps the wheel backend, then mirrors
// the resulting wheel poses onto visual nodes and eases the steering-wheel
// prop toward the steer input.

use glam::Quat;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::input::{Axis, InputSource};
use super::steering::SteeringWheelSmoother;
use super::wheel::{Pose, VisualNode, WheelActuator, WheelPosition, Wheels};
use crate::config::VehicleConfig;

/// Values sent to one wheel during the last step
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WheelCommand {
    pub motor_torque: f32,
    pub steer_angle: f32, // degrees
    pub brake_torque: f32,
}

/// Visual bindings; every slot is optional and skipped when empty
pub struct VisualRig<N> {
    pub wheels: Wheels<Option<N>>,
    pub steering_wheel: Option<N>,
}

impl<N> VisualRig<N> {
    pub fn new(wheels: Wheels<Option<N>>, steering_wheel: Option<N>) -> Self {
        Self {
            wheels,
            steering_wheel,
        }
    }

    /// No visual bindings at all
    pub fn empty() -> Self {
        Self::new(Wheels::new(None, None, None, None), None)
    }
}

/// Four-wheel drive controller with front-axle steering
pub struct JeepController<W, N> {
    config: VehicleConfig,
    wheel_offset: Quat,
    axles: Wheels<W>,
    visuals: VisualRig<N>,
    commands: Wheels<WheelCommand>,
    steering_wheel: SteeringWheelSmoother,
}

impl<W: WheelActuator, N: VisualNode> JeepController<W, N> {
    /// Bind actuators and visuals; visuals are synced to the current poses
    pub fn new(config: VehicleConfig, axles: Wheels<W>, visuals: VisualRig<N>) -> Self {
        let mut controller = Self {
            wheel_offset: config.wheel_offset.to_quat(),
            config,
            axles,
            visuals,
            commands: Wheels::default(),
            steering_wheel: SteeringWheelSmoother::new(),
        };
        controller.sync_wheel_poses();
        controller
    }

    /// Run one fixed physics step
    ///
    /// Order: motor, steering, brake, simulate, pose sync.
    pub fn step(&mut self, dt: f32, input: &impl InputSource) {
        self.handle_motor(input);
        self.handle_steering(dt, input);
        self.handle_braking(input);

        for wheel in self.axles.iter_mut() {
            wheel.simulate(dt);
        }

        self.sync_wheel_poses();

        debug!(
            "Step: motor={:.1} steer={:.1} brake={:.1} wheel={:.1}",
            self.commands.front_left.motor_torque,
            self.commands.front_left.steer_angle,
            self.commands.front_left.brake_torque,
            self.steering_wheel.angle()
        );
    }

    fn handle_motor(&mut self, input: &impl InputSource) {
        let torque = input.axis(Axis::Vertical) * self.config.driving.max_motor_torque;

        for (wheel, cmd) in self.axles.iter_mut().zip(self.commands.iter_mut()) {
            wheel.set_motor_torque(torque);
            cmd.motor_torque = torque;
        }
    }

    fn handle_steering(&mut self, dt: f32, input: &impl InputSource) {
        let steer_input = input.axis(Axis::Horizontal);
        let steer_angle = steer_input * self.config.driving.max_steering_angle;

        // Front axle only; rear wheels keep whatever they had
        for wheel in self.axles.front_mut() {
            wheel.set_steer_angle(steer_angle);
        }
        for cmd in self.commands.front_mut() {
            cmd.steer_angle = steer_angle;
        }

        if let Some(prop) = self.visuals.steering_wheel.as_mut() {
            let wheel_config = &self.config.steering_wheel;
            let target = steer_input * wheel_config.max_rotation;
            self.steering_wheel.update(target, dt, wheel_config.rotation_speed);
            prop.set_local_rotation(self.steering_wheel.local_rotation());
        }
    }

    fn handle_braking(&mut self, input: &impl InputSource) {
        if input.is_key_held(self.config.brake_key) {
            let brake = self.config.driving.brake_torque;
            for (wheel, cmd) in self.axles.iter_mut().zip(self.commands.iter_mut()) {
                wheel.set_brake_torque(brake);
                wheel.set_motor_torque(0.0);
                cmd.brake_torque = brake;
                cmd.motor_torque = 0.0;
            }
        } else {
            for (wheel, cmd) in self.axles.iter_mut().zip(self.commands.iter_mut()) {
                wheel.set_brake_torque(0.0);
                cmd.brake_torque = 0.0;
            }
        }
    }

    /// Copy each actuator's pose onto its visual node, offset applied
    pub fn sync_wheel_poses(&mut self) {
        let offset = self.wheel_offset;
        let axles = &self.axles;

        for position in WheelPosition::ALL {
            if let Some(node) = self.visuals.wheels.get_mut(position) {
                let pose = axles.get(position).world_pose();
                node.set_position(pose.position);
                node.set_rotation(pose.rotation * offset);
            }
        }
    }

    pub fn config(&self) -> &VehicleConfig {
        &self.config
    }

    /// Commands sent during the last step
    pub fn commands(&self) -> &Wheels<WheelCommand> {
        &self.commands
    }

    /// Current actuator poses
    pub fn wheel_poses(&self) -> Wheels<Pose> {
        self.axles.map(|w| w.world_pose())
    }

    pub fn axles(&self) -> &Wheels<W> {
        &self.axles
    }

    pub fn visuals(&self) -> &VisualRig<N> {
        &self.visuals
    }

    /// Smoothed steering-wheel prop angle in degrees
    pub fn steering_wheel_angle(&self) -> f32 {
        self.steering_wheel.angle()
    }
}
