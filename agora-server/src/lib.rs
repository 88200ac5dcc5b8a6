//! # Agora Server
//! HTTP boundary of the agora backend: route wiring, request binding,
//! bearer-token authentication, and the dependency injection that connects
//! the handlers to the engagement ledger and the repositories.
pub mod auth;
pub mod config;
pub mod errors;
pub mod server;

pub use config::{Config, Dependencies};
pub use errors::{ApiError, StartupError};
