//! Development server for house editor UI work
//!
//! Runs the in-memory mock of the house service, seeded with the sample
//! houses, so the ui can be served against it without a real backend.
//!
//! Usage: cargo run -p dev-server

use anyhow::Result;
use test_helpers::{
    mock, seeded_state,
    service::{self, Config},
    telemetry,
};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file if available
    let _ = dotenvy::dotenv();

    let subscriber = telemetry::get_subscriber("info".into());
    telemetry::init_subscriber(subscriber)?;

    info!("🚀 Starting house editor development server");

    let token = std::env::var("DEV_SERVER_TOKEN")
        .unwrap_or_else(|_| "dev-token".into());
    let mut config = Config::from_env()?;
    let state = seeded_state(&token);
    let server = service::build(&mut config, state)?;
    tokio::spawn(async move {
        if let Err(e) = server.await {
            telemetry::log_error(e);
        }
    });

    let address = format!("http://{}:{}", config.ip, config.port);
    info!("✅ Mock house service running on {address}");
    info!("🎯 Development server ready!");
    info!("   UI:  cd ui && BACKEND_URL={address} trunk serve");
    info!("   Sign in by setting localStorage.token = \"{token}\"");
    info!("");
    mock::print_summary();
    info!("");
    info!("👋 Press Ctrl+C to shutdown");

    tokio::signal::ctrl_c().await?;
    info!("🛑 Shutting down development server");
    Ok(())
}
