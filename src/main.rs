//! XFPad Server Entry Point
//!
//! Binds the configured TCP port and serves forever. Exits non-zero only
//! on an unrecoverable listener error; individual client failures never
//! reach this level.

use xfpad::backend::server::{self, ServerConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file if present
    dotenv::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&env_filter))
        .init();

    let config = ServerConfig::from_args(std::env::args().skip(1));
    tracing::info!("[Startup] starting server on port {}", config.port);

    server::run(config).await?;
    Ok(())
}
