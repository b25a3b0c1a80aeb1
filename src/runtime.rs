// Fixed-rate drive loop with watchdog
// If the teleop client stops sending input, the jeep is held on the brake with
// centered axes until fresh commands arrive.

use std::time::{Duration, Instant};
use tokio::time::interval;
use tracing::{debug, info, warn};

use crate::config::{RuntimeConfig, TOPIC_CMD_DRIVE, TOPIC_HEALTH, TOPIC_RT_RIG};
use crate::messages::{DriveCommand, RigTelemetry, RuntimeHealth, WheelState};
use crate::vehicle::{JeepController, SimWheel, TransformNode, VisualRig, Wheels};

pub struct Runtime {
    controller: JeepController<SimWheel, TransformNode>,
    latest_cmd: Option<DriveCommand>,
    cmd_received_at: Instant,
    cmd_timeout: Duration,
    health: RuntimeHealth,
}

impl Runtime {
    pub fn new(config: &RuntimeConfig) -> Self {
        let axles = SimWheel::axle_set(&config.sim);
        let visuals = VisualRig::new(
            Wheels::from_fn(|_| Some(TransformNode::default())),
            Some(TransformNode::default()),
        );

        Self {
            controller: JeepController::new(config.vehicle, axles, visuals),
            latest_cmd: None,
            cmd_received_at: Instant::now(),
            cmd_timeout: config.cmd_timeout(),
            health: RuntimeHealth::CmdStale, // Start stale until first cmd
        }
    }

    /// Process incoming command
    pub fn on_command(&mut self, cmd: DriveCommand) {
        debug!("Received command: {:?}", &cmd);
        self.latest_cmd = Some(cmd);
        self.cmd_received_at = Instant::now();
    }

    /// Input for this step, after the watchdog has had its say
    pub fn current_input(&mut self) -> DriveCommand {
        let cmd_age = self.cmd_received_at.elapsed();
        let brake_key = self.controller.config().brake_key;

        match self.latest_cmd {
            Some(ref cmd) if cmd_age <= self.cmd_timeout => {
                if self.health != RuntimeHealth::Ok {
                    info!("Receiving drive commands");
                }
                self.health = RuntimeHealth::Ok;
                cmd.clone()
            }
            Some(_) => {
                if self.health != RuntimeHealth::CmdStale {
                    warn!("Command stale ({:?} old), holding brake", cmd_age);
                }
                self.health = RuntimeHealth::CmdStale;
                DriveCommand::holding(brake_key)
            }
            None => {
                // No command ever received
                self.health = RuntimeHealth::CmdStale;
                DriveCommand::holding(brake_key)
            }
        }
    }

    /// Step the controller once and snapshot the rig
    pub fn tick(&mut self, dt: f32) -> RigTelemetry {
        let input = self.current_input();
        self.controller.step(dt, &input);
        self.telemetry()
    }

    pub fn telemetry(&self) -> RigTelemetry {
        let commands = self.controller.commands();
        let poses = self.controller.wheel_poses();
        let visuals = self.controller.visuals();

        RigTelemetry {
            wheels: Wheels::from_fn(|p| WheelState {
                command: *commands.get(p),
                pose: *poses.get(p),
            }),
            visual_wheels: visuals.wheels,
            steering_wheel: visuals.steering_wheel,
            steering_wheel_angle: self.controller.steering_wheel_angle(),
        }
    }

    pub fn health(&self) -> RuntimeHealth {
        self.health
    }
}

pub async fn run(config: RuntimeConfig) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    info!("Opening Zenoh session...");
    let session = zenoh::open(zenoh::Config::default()).await?;

    info!("Setting up publishers and subscribers...");
    let subscriber = session.declare_subscriber(TOPIC_CMD_DRIVE).await?;
    let pub_rig = session.declare_publisher(TOPIC_RT_RIG).await?;
    let pub_health = session.declare_publisher(TOPIC_HEALTH).await?;

    let mut runtime = Runtime::new(&config);
    let mut tick = interval(config.step_period());
    let dt = config.step_dt();

    info!(
        "Runtime started: {}Hz loop, {}ms watchdog timeout",
        config.loop_hz, config.cmd_timeout_ms
    );
    info!(
        "Driving stats: {:.0}Nm motor, {:.0}deg steer, {:.0}Nm brake on {:?}",
        config.vehicle.driving.max_motor_torque,
        config.vehicle.driving.max_steering_angle,
        config.vehicle.driving.brake_torque,
        config.vehicle.brake_key
    );
    info!("Subscribed to: {}", TOPIC_CMD_DRIVE);
    info!("Publishing to: {}, {}", TOPIC_RT_RIG, TOPIC_HEALTH);

    loop {
        tick.tick().await;

        // 1. Drain all pending commands (non-blocking), keep latest
        while let Ok(Some(sample)) = subscriber.try_recv() {
            let payload = sample.payload().to_bytes();
            match serde_json::from_slice::<DriveCommand>(&payload) {
                Ok(cmd) => {
                    runtime.on_command(cmd);
                }
                Err(e) => {
                    warn!("Failed to parse command: {}", e);
                }
            }
        }

        // 2. Step the controller (includes watchdog logic)
        let telemetry = runtime.tick(dt);

        // 3. Publish rig state
        let telemetry_json = serde_json::to_string(&telemetry)?;
        pub_rig.put(telemetry_json).await?;

        // 4. Publish health
        let health_json = serde_json::to_string(&runtime.health())?;
        pub_health.put(health_json).await?;
    }
}
