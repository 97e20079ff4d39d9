// SPDX-License-Identifier: MIT OR Apache-2.0
//! KeyForge CLI - batch keyframe editing over sequence documents.
//!
//! Each subcommand loads a `.ron` sequence document, applies one of the
//! batch sweeps from `keyforge_sequencer`, reports the outcome, and saves
//! the document back (unless `--dry-run`).

mod commands;

use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn main() {
    let cli = commands::Cli::parse();

    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive("keyforge_tools=info".parse().unwrap())
        .add_directive("keyforge_sequencer=info".parse().unwrap());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::debug!("KeyForge v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = commands::run(cli) {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}
