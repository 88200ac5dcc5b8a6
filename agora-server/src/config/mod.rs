//! Configuration module for the agora server.
//! Defines application-wide settings read from the environment and the
//! dependency wiring that turns them into a running application state.
mod dependencies;

pub use dependencies::Dependencies;

use std::net::SocketAddr;
use std::time::Duration;

/// Default bind address for the HTTP server.
const DEFAULT_SERVER_ADDR: &str = "0.0.0.0:8080";

/// Default timeout for a single vote transaction, in milliseconds.
const DEFAULT_VOTE_TX_TIMEOUT_MS: u64 = 5_000;

/// Default bound on vote conflict retries.
const DEFAULT_VOTE_RETRY_ATTEMPTS: u32 = 3;

/// Application settings resolved from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub server_addr: SocketAddr,
    pub vote_retry_attempts: u32,
    pub vote_tx_timeout: Duration,
}

impl Config {
    /// Reads settings from the environment, applying documented defaults.
    /// `DATABASE_URL` is required.
    pub fn from_env() -> Self {
        let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        Self {
            database_url,
            server_addr: parse_addr(std::env::var("SERVER_ADDR").ok()),
            vote_retry_attempts: parse_or(
                std::env::var("VOTE_RETRY_ATTEMPTS").ok(),
                DEFAULT_VOTE_RETRY_ATTEMPTS,
            ),
            vote_tx_timeout: Duration::from_millis(parse_or(
                std::env::var("VOTE_TX_TIMEOUT_MS").ok(),
                DEFAULT_VOTE_TX_TIMEOUT_MS,
            )),
        }
    }
}

fn parse_addr(value: Option<String>) -> SocketAddr {
    value
        .as_deref()
        .unwrap_or(DEFAULT_SERVER_ADDR)
        .parse()
        .expect("SERVER_ADDR must be a valid socket address")
}

fn parse_or<T: std::str::FromStr>(value: Option<String>, default: T) -> T {
    value.and_then(|v| v.parse().ok()).unwrap_or(default)
}
