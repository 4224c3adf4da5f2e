//! Deafen Server
//!
//! Serves the Discord mute control API until `/kill` or Ctrl+C.

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use deafen_server::{
    config::AppConfig,
    control::MuteController,
    notify::send_startup_notification,
    server::{handlers::ENDPOINTS, WebServer},
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load().context("Failed to load configuration")?;

    tracing::info!(
        "Using {} with patterns {:?}",
        config.audio.tool,
        config.audio.app_patterns
    );

    let controller = MuteController::from_config(&config.audio);
    let server = WebServer::new(config.server.clone(), controller);

    println!("Starting Discord Audio Controller Web Server...");
    println!("Available endpoints:");
    for (path, method, description) in ENDPOINTS {
        println!("  {:<5} {:<8} - {}", method, path, description);
    }
    println!();

    send_startup_notification(&config.notify);

    tracing::info!("Web API available at http://{}", config.server.listen_address());
    server.run().await.context("Web server failed")?;

    Ok(())
}
