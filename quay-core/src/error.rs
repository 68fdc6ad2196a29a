//! Error types shared by the Quay client crates.
//!
//! Every failure the transport can produce is a variant of `QuayError`.
//! Variants carry the raw status, body, or underlying cause so callers can
//! decide whether to retry, report, or abort.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Convenience type alias for Results using QuayError.
pub type QuayResult<T> = Result<T, QuayError>;

/// Boxed underlying cause of a transport failure.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Coarse classification of a network-level failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    /// DNS resolution, TCP connect, or TLS handshake failed.
    Connect,
    /// The session or per-request deadline elapsed.
    Timeout,
    /// Anything else (broken stream, protocol error, redirect loop).
    Other,
}

impl std::fmt::Display for TransportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TransportKind::Connect => "connection failed",
            TransportKind::Timeout => "request timed out",
            TransportKind::Other => "transport failure",
        };
        f.write_str(s)
    }
}

/// Unified error type for the Quay client.
#[derive(Error, Debug)]
pub enum QuayError {
    // -- Construction --
    /// Invalid construction input or unusable configuration.
    #[error("configuration error: {0}")]
    Configuration(String),

    // -- Network --
    /// No response was obtained from the server.
    #[error("{kind}: {source}")]
    Transport {
        kind: TransportKind,
        #[source]
        source: BoxError,
    },

    /// The server answered with a status the verb does not accept.
    #[error("unexpected status code: {status}, response: {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body text.
        body: String,
    },

    // -- JSON --
    /// The response status was accepted but the body had the wrong shape.
    #[error("failed to decode response: {source} (body: {snippet})")]
    Decode {
        #[source]
        source: serde_json::Error,
        /// Leading fragment of the raw body.
        snippet: String,
    },

    /// A request body could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // -- Local IO --
    /// File system operation failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<toml::de::Error> for QuayError {
    fn from(e: toml::de::Error) -> Self {
        QuayError::Configuration(e.to_string())
    }
}

impl QuayError {
    /// Wrap a network-level failure.
    pub fn transport(kind: TransportKind, source: impl Into<BoxError>) -> Self {
        QuayError::Transport {
            kind,
            source: source.into(),
        }
    }

    /// HTTP status carried by an `Api` error.
    pub fn status(&self) -> Option<u16> {
        match self {
            QuayError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether a caller could reasonably retry the same call.
    ///
    /// Network failures and 5xx responses qualify. The transport itself
    /// never acts on this.
    pub fn is_retryable(&self) -> bool {
        match self {
            QuayError::Transport { .. } => true,
            QuayError::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Whether this is a timeout on the way to a response.
    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            QuayError::Transport {
                kind: TransportKind::Timeout,
                ..
            }
        )
    }

    /// Parse the body of an `Api` error as a Quay error document.
    ///
    /// Returns `None` for other variants or when the body is not JSON.
    pub fn api_error_body(&self) -> Option<ApiErrorBody> {
        match self {
            QuayError::Api { body, .. } => serde_json::from_str(body).ok(),
            _ => None,
        }
    }
}

/// Error document returned by the Quay API on rejected requests.
///
/// Quay is not consistent about which fields it fills in, so all of them
/// are optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

impl ApiErrorBody {
    /// Most specific human-readable message present.
    pub fn message(&self) -> Option<&str> {
        self.detail
            .as_deref()
            .or(self.error_message.as_deref())
            .or(self.error.as_deref())
            .or(self.title.as_deref())
    }
}
