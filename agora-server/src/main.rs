//! Agora Server Main Entry Point
//!
//! Boots the social content backend: loads environment configuration,
//! initializes tracing, wires the engagement ledger and repositories, and
//! serves the HTTP API.
use agora_server::server;
use agora_server::{Config, Dependencies, StartupError};
use dotenv::dotenv;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Initialize tracing/logging.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("agora_server=info,agora_ledger=info,agora_repository=info")
    });

    tracing_subscriber::fmt().with_env_filter(filter).with_target(true).compact().init();
}

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    dotenv().ok();
    init_tracing();

    info!(version = env!("CARGO_PKG_VERSION"), "starting agora server");

    let config = Config::from_env();
    let dependencies = match Dependencies::new(&config).await {
        Ok(deps) => deps,
        Err(e) => {
            error!(error = %e, "failed to initialize dependencies");
            return Err(e);
        }
    };

    let app = server::create_app(dependencies.state);
    server::run_server(app, config.server_addr).await?;
    Ok(())
}
