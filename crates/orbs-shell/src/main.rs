//! Orbs application shell, served over WebSocket.

use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod app;
mod config;
mod menu;
mod protocol;
mod server;
mod session;

use config::ShellConfig;
use server::ServerState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ShellConfig::from_env()?;

    info!("Starting Orbs shell (leap rule {:?})...", config.leap_rule);

    let state = Arc::new(ServerState::new(config.board_config()));

    server::run_server(config.addr, state).await
}
