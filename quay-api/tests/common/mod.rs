//! Shared test utilities for integration tests.

use quay_api::Client;
use quay_core::config::ClientConfig;
use serde::Deserialize;
use wiremock::MockServer;

pub const TOKEN: &str = "test-token";

/// Start a mock server standing in for the Quay API.
pub async fn start_server() -> MockServer {
    MockServer::start().await
}

/// Client pointed at `<server>/api/v1`.
pub fn client_for(server: &MockServer) -> Client {
    let config = ClientConfig::with_token(TOKEN).base_url(format!("{}/api/v1", server.uri()));
    Client::from_config(&config).expect("failed to build test client")
}

/// Minimal result shape used across tests.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Named {
    pub name: String,
}
