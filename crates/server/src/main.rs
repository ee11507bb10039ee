//! `compute-server` — binary entry point.
//!
//! Startup sequence:
//! 1. Load and validate [`Config`] from environment variables.
//! 2. Initialise structured JSON logging.
//! 3. Probe the AES key source once so misconfiguration is visible at boot.
//! 4. Build the Axum router and start the HTTP server.

mod compute;
mod config;
mod protocol;
mod server;
mod telemetry;

use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};

use config::Config;
use envelope::{EnvKeySource, KeySource};
use server::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // -----------------------------------------------------------------------
    // 1. Configuration
    // -----------------------------------------------------------------------
    let cfg = Config::from_env().map_err(|e| {
        // Telemetry is not yet up; write to stderr directly.
        eprintln!("ERROR: configuration invalid: {e}");
        e
    })?;

    // -----------------------------------------------------------------------
    // 2. Telemetry
    // -----------------------------------------------------------------------
    telemetry::init(&cfg.log_level)?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        listen_port = cfg.listen_port,
        "compute-server starting"
    );

    // -----------------------------------------------------------------------
    // 3. Key source probe
    // -----------------------------------------------------------------------
    // The key is re-resolved on every request; this one-off probe only makes
    // a bad deployment fail loudly at boot instead of on first traffic.
    let key_source = EnvKeySource::new(cfg.aes_key_var.clone());
    if let Err(e) = key_source.resolve() {
        warn!(error = %e, "AES key did not resolve at startup; /compute will fail until it does");
    }

    // -----------------------------------------------------------------------
    // 4. HTTP server
    // -----------------------------------------------------------------------
    let state = AppState::new(Arc::new(key_source));
    let router = server::router::build(state);

    let addr: std::net::SocketAddr = ([0, 0, 0, 0], cfg.listen_port).into();
    info!(addr = %addr, "listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
