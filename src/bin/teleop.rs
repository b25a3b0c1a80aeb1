// Keyboard teleop: W/S throttle, A/D steer, Space brake, Q quit
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode},
};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::info;

use jeep_zenoh_runtime::config::{RuntimeConfig, TOPIC_CMD_DRIVE};
use jeep_zenoh_runtime::messages::DriveCommand;
use jeep_zenoh_runtime::vehicle::{Key, VirtualAxis};

const PUBLISH_PERIOD: Duration = Duration::from_millis(20);
// Terminals report presses and repeats, not releases
const KEY_HOLD: Duration = Duration::from_millis(100);

/// Last time each control key was seen
#[derive(Default)]
struct HeldKeys {
    forward: Option<Instant>,
    back: Option<Instant>,
    left: Option<Instant>,
    right: Option<Instant>,
    brake: Option<Instant>,
}

fn held(at: Option<Instant>) -> bool {
    at.is_some_and(|t| t.elapsed() <= KEY_HOLD)
}

/// Keyboard teleop for the jeep runtime
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Runtime JSON config; its brake key is sent when braking
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Brake key the runtime listens for ("space" or one character)
    #[arg(long)]
    brake_key: Option<Key>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let args = Args::parse();
    let config = match args.config {
        Some(path) => RuntimeConfig::load(path)?,
        None => RuntimeConfig::default(),
    };
    let brake_key = args.brake_key.unwrap_or(config.vehicle.brake_key);

    info!("Opening Zenoh session...");
    let session = zenoh::open(zenoh::Config::default()).await?;
    let publisher = session.declare_publisher(TOPIC_CMD_DRIVE).await?;

    info!("Controls: W/S=throttle, A/D=steer, Space=brake, Q=quit");
    info!("Braking sends {:?}", brake_key);

    enable_raw_mode()?;
    let result = run_teleop(&publisher, brake_key).await;
    disable_raw_mode()?;

    result
}

async fn run_teleop(
    publisher: &zenoh::pubsub::Publisher<'_>,
    brake_key: Key,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut keys = HeldKeys::default();
    let mut vertical = VirtualAxis::default();
    let mut horizontal = VirtualAxis::default();
    let mut last_update = Instant::now();

    loop {
        if event::poll(PUBLISH_PERIOD)? {
            if let Event::Key(KeyEvent { code, kind, .. }) = event::read()? {
                let pressed = kind == KeyEventKind::Press || kind == KeyEventKind::Repeat;
                let now = Some(Instant::now());

                match code {
                    KeyCode::Char('w') if pressed => keys.forward = now,
                    KeyCode::Char('s') if pressed => keys.back = now,
                    KeyCode::Char('a') if pressed => keys.left = now,
                    KeyCode::Char('d') if pressed => keys.right = now,
                    KeyCode::Char(' ') if pressed => keys.brake = now,
                    KeyCode::Char(c) if pressed && brake_key == Key::Char(c) => keys.brake = now,

                    // Quit
                    KeyCode::Char('q') | KeyCode::Esc if pressed => break,

                    _ => {}
                }
            }
        }

        // Publish at ~50Hz regardless of key traffic
        if last_update.elapsed() < PUBLISH_PERIOD {
            continue;
        }
        let dt = last_update.elapsed().as_secs_f32();
        last_update = Instant::now();

        vertical.update(held(keys.forward), held(keys.back), dt);
        horizontal.update(held(keys.right), held(keys.left), dt);

        let cmd = DriveCommand::from_axes(
            vertical.value(),
            horizontal.value(),
            held(keys.brake),
            brake_key,
        );
        publisher.put(serde_json::to_string(&cmd)?).await?;
    }

    Ok(())
}
