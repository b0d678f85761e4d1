//! Portal Server - Entry Point
//!
//! Session-authenticated web portal with file-backed signups and an
//! action log.

use log::{error, info};

use portal_server::{Server, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // env_logger picks up RUST_LOG
    env_logger::init();

    let config = ServerConfig::load().map_err(|e| {
        error!("Invalid configuration: {}", e);
        e
    })?;

    info!("Launching portal server...");

    let server = Server::new(config).await?;
    server.start().await
}
