use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use jeep_zenoh_runtime::config::RuntimeConfig;

/// Fixed-rate jeep drive runtime
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// JSON config file; defaults are used for anything it leaves out
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the loop rate in Hz
    #[arg(long)]
    loop_hz: Option<u64>,
}

#[tokio::main]
async fn main() {
    // Setup logging (set RUST_LOG=info or debug)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init(); // installs the subscriber globally

    let args = Args::parse();

    let mut config = match args.config {
        Some(path) => match RuntimeConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Config error ({}): {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => RuntimeConfig::default(),
    };

    if let Some(hz) = args.loop_hz {
        config.loop_hz = hz;
        if let Err(e) = config.validate() {
            eprintln!("Config error: {}", e);
            std::process::exit(1);
        }
    }

    if let Err(e) = jeep_zenoh_runtime::runtime::run(config).await {
        eprintln!("Runtime error: {}", e);
        std::process::exit(1);
    }
}
