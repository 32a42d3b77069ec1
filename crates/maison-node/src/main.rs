//! Maison registry replay binary.
//!
//! # Usage
//!
//! ```bash
//! # Replay a script file
//! maison-node --admin ST1ADMIN calls.txt
//!
//! # Replay from stdin with a pinned height
//! maison-node --genesis-height 1234 --block-interval-ms 0 < calls.txt
//! ```

use std::{io::Read, path::PathBuf, time::Duration};

use clap::Parser;
use maison_node::{Node, NodeConfig};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Maison registry replay node
#[derive(Parser, Debug)]
#[command(name = "maison-node")]
#[command(about = "Replay a script of Maison registry calls")]
#[command(version)]
struct Args {
    /// Script to replay (reads stdin when omitted)
    script: Option<PathBuf>,

    /// Initial admin identity
    #[arg(short, long, default_value = "ST1ADMIN")]
    admin: String,

    /// Height at startup
    #[arg(long, default_value = "0")]
    genesis_height: u64,

    /// Milliseconds per block (0 pins the height at genesis)
    #[arg(long, default_value = "600000")]
    block_interval_ms: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let source = match &args.script {
        Some(path) => {
            tracing::info!("Reading script from {}", path.display());
            std::fs::read_to_string(path)?
        },
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        },
    };

    let config = NodeConfig {
        admin: args.admin,
        genesis_height: args.genesis_height,
        block_interval: Duration::from_millis(args.block_interval_ms),
    };

    tracing::info!("Maison node starting with admin {}", config.admin);

    let mut node = Node::new(&config)?;
    let stdout = std::io::stdout();
    let summary = node.replay(&source, &mut stdout.lock())?;

    if summary.failures > 0 {
        tracing::warn!("{} of {} calls returned an error outcome", summary.failures, summary.calls);
    }

    Ok(())
}
