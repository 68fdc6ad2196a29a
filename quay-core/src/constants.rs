//! Client-wide constants.

/// Client name, used in the User-Agent and on-disk paths.
pub const APP_NAME: &str = "quay";

/// Crate version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Production API root.
pub const DEFAULT_BASE_URL: &str = "https://quay.io/api/v1";

/// Ceiling for a whole call, connection setup through the last body byte.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Bound on TCP connect plus TLS handshake.
pub const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 10_000;

/// Idle connections kept per host.
pub const POOL_MAX_IDLE_PER_HOST: usize = 8;

/// Seconds an idle pooled connection is kept.
pub const POOL_IDLE_TIMEOUT_SECS: u64 = 90;

/// Bytes of raw body kept in a decode error.
pub const DECODE_SNIPPET_LEN: usize = 512;

/// Environment variables that override the config file.
pub mod env {
    pub const TOKEN: &str = "QUAY_TOKEN";
    pub const BASE_URL: &str = "QUAY_API_URL";
}

/// User-Agent header value.
pub fn user_agent() -> String {
    format!("{APP_NAME}-api/{APP_VERSION}")
}
