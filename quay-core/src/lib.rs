//! Quay Core - errors, configuration and logging for the Quay API client.
//!
//! This crate provides the shared foundation used by `quay-api`:
//! - Client configuration (base URL, token, timeouts) with TOML persistence
//! - The `QuayError` taxonomy returned by every transport call
//! - Structured logging with tracing
//! - Platform directories and common constants

pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod platform;

// Re-export commonly used items at the crate root
pub use config::{AppConfig, ClientConfig, LoggingConfig};
pub use error::{ApiErrorBody, QuayError, QuayResult, TransportKind};
pub use logging::init_logging;
