//! Quay API - authenticated HTTP transport for the Quay.io REST API.
//!
//! This crate provides the request/response core that per-resource
//! bindings are built on: a bearer-token [`Client`], the [`Request`]
//! descriptor, and the four verb primitives with their status-code policy.
//!
//! ```no_run
//! # async fn demo() -> quay_api::QuayResult<()> {
//! use quay_api::{Client, JsonObject, Request};
//!
//! let client = Client::new("my-token")?;
//! let url = client.url("/repository/my-org/my-repo");
//! let repo: JsonObject = client.get(Request::get(url)).await?;
//! # let _ = repo;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod request;
pub mod response;

// Re-export key types
pub use client::Client;
pub use request::Request;
pub use response::Verb;

pub use quay_core::error::{ApiErrorBody, QuayError, QuayResult, TransportKind};
pub use reqwest::Method;

/// Open-ended JSON object for loosely-typed payloads (notification config,
/// metadata maps). Values are `serde_json::Value`.
pub type JsonObject = serde_json::Map<String, serde_json::Value>;
