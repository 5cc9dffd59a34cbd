//! Realtime presence relay.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin plaza-server
//! cargo run --bin plaza-server -- --host 0.0.0.0 --port 3001
//! PORT=8080 CORS_ORIGIN=http://localhost:5173 cargo run --bin plaza-server
//! ```

use std::sync::Arc;

use clap::Parser;
use plaza_server::{
    config::ServerConfig,
    ui::{AppState, Server},
};
use plaza_shared::{logger::setup_logger, time::SystemClock};

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let config = ServerConfig::parse();
    tracing::debug!("Starting with {:?}", config);

    // Initialize dependencies in order:
    // 1. Repository, MessagePusher and UseCases
    // 2. Server
    let state = AppState::in_memory(&config, Arc::new(SystemClock));
    let server = Server::new(state, config.cors_origin.clone());

    if let Err(e) = server.run(config.host, config.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
