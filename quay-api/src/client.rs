//! Authenticated HTTP client for the Quay REST API.
//!
//! Every call sends the bearer token and a JSON content type, reads the
//! response body to the end, and checks the status against the verb's
//! accepted set before decoding. Nothing is retried; failures come back as
//! `QuayError` for the caller to act on.

use std::time::Duration;

use bytes::Bytes;
use reqwest::header::{HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use quay_core::config::ClientConfig;
use quay_core::constants;
use quay_core::error::{QuayError, QuayResult, TransportKind};

use crate::request::Request;
use crate::response::{api_error, decode_json, Verb};

const JSON: &str = "application/json";

/// Session for talking to one Quay API root with one bearer token.
///
/// Cheap to clone; clones share the connection pool. Token and base URL are
/// fixed at construction.
#[derive(Clone)]
pub struct Client {
    inner: reqwest::Client,
    /// API root without a trailing slash.
    base_url: Url,
    /// Precomputed `Bearer <token>` header, marked sensitive.
    authorization: HeaderValue,
    timeout: Duration,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url.as_str())
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Client for the production API with default timeouts.
    pub fn new(token: &str) -> QuayResult<Self> {
        Self::from_config(&ClientConfig::with_token(token))
    }

    /// Client from explicit configuration.
    pub fn from_config(config: &ClientConfig) -> QuayResult<Self> {
        if !config.is_configured() {
            return Err(QuayError::Configuration("bearer token is required".into()));
        }
        if config.timeout_ms == 0 || config.connect_timeout_ms == 0 {
            return Err(QuayError::Configuration(
                "timeout_ms and connect_timeout_ms must be non-zero".into(),
            ));
        }
        let token = config.token.trim();

        let mut authorization = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|_| {
            QuayError::Configuration("bearer token contains invalid header characters".into())
        })?;
        authorization.set_sensitive(true);

        let base_url = parse_base_url(&config.base_url)?;

        let timeout = config.timeout();
        let inner = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(config.connect_timeout())
            .pool_max_idle_per_host(constants::POOL_MAX_IDLE_PER_HOST)
            .pool_idle_timeout(Duration::from_secs(constants::POOL_IDLE_TIMEOUT_SECS))
            .user_agent(constants::user_agent())
            .build()
            .map_err(|e| QuayError::Configuration(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            inner,
            base_url,
            authorization,
            timeout,
        })
    }

    /// The API root this client targets.
    pub fn base_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    /// Client-wide timeout applied to every call without an override.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Absolute URL for an API path, e.g. `url("/repository/ns/name")`.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url(), path.trim_start_matches('/'))
    }

    /// Absolute URL for an API path with form-encoded query parameters appended.
    pub fn url_with_query<I, K, V>(&self, path: &str, params: I) -> QuayResult<String>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut url = Url::parse(&self.url(path))
            .map_err(|e| QuayError::Configuration(format!("invalid API path {path:?}: {e}")))?;
        {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in params {
                pairs.append_pair(key.as_ref(), value.as_ref());
            }
        }
        Ok(url.into())
    }

    // --- Verb primitives ---

    /// GET, accepting 200, decoding the body into `T`.
    pub async fn get<T: DeserializeOwned>(&self, request: Request) -> QuayResult<T> {
        let (_, body) = self.execute(Verb::Get, request).await?;
        decode_json(&body)
    }

    /// POST, accepting 200/201, decoding the body into `T`.
    pub async fn post<T: DeserializeOwned>(&self, request: Request) -> QuayResult<T> {
        let (_, body) = self.execute(Verb::Post, request).await?;
        decode_json(&body)
    }

    /// POST, accepting 200/201, discarding whatever the server returns.
    pub async fn post_no_content(&self, request: Request) -> QuayResult<()> {
        self.execute(Verb::Post, request).await?;
        Ok(())
    }

    /// PUT, accepting 200/201/204.
    ///
    /// Returns `None` for a 204; otherwise decodes the body into `T`.
    pub async fn put<T: DeserializeOwned>(&self, request: Request) -> QuayResult<Option<T>> {
        let (status, body) = self.execute(Verb::Put, request).await?;
        if Verb::Put.has_payload(status.as_u16()) {
            decode_json(&body).map(Some)
        } else {
            Ok(None)
        }
    }

    /// PUT, accepting 200/201/204, discarding the body.
    pub async fn put_no_content(&self, request: Request) -> QuayResult<()> {
        self.execute(Verb::Put, request).await?;
        Ok(())
    }

    /// DELETE, accepting 200/204. The body is never decoded.
    pub async fn delete(&self, request: Request) -> QuayResult<()> {
        self.execute(Verb::Delete, request).await?;
        Ok(())
    }

    /// One authenticated round-trip.
    ///
    /// The body is read in full before the status check, so the connection
    /// is released cleanly on success and failure alike.
    async fn execute(&self, verb: Verb, request: Request) -> QuayResult<(StatusCode, Bytes)> {
        let Request {
            method,
            url,
            body,
            timeout,
        } = request;

        let mut builder = self
            .inner
            .request(method.clone(), &url)
            .header(AUTHORIZATION, self.authorization.clone())
            .header(CONTENT_TYPE, JSON)
            .header(ACCEPT, JSON);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(body) = body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(classify_error)?;
        let status = response.status();
        let path = response.url().path().to_string();
        let body = response.bytes().await.map_err(classify_error)?;

        debug!(
            verb = %verb,
            %method,
            path = %path,
            status = status.as_u16(),
            bytes = body.len(),
            "quay request"
        );

        if !verb.accepts(status.as_u16()) {
            return Err(api_error(status.as_u16(), &body));
        }
        Ok((status, body))
    }
}

/// Parse and validate the configured API root.
fn parse_base_url(raw: &str) -> QuayResult<Url> {
    let sanitized = ClientConfig::sanitize_base_url(raw);
    let url = Url::parse(&sanitized)
        .map_err(|e| QuayError::Configuration(format!("invalid base URL {sanitized:?}: {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(QuayError::Configuration(format!(
            "unsupported base URL scheme {other:?}"
        ))),
    }
}

/// Classify a reqwest error into a QuayError variant.
fn classify_error(e: reqwest::Error) -> QuayError {
    if e.is_builder() {
        QuayError::Configuration(format!("invalid request: {e}"))
    } else if e.is_timeout() {
        QuayError::transport(TransportKind::Timeout, e)
    } else if e.is_connect() {
        QuayError::transport(TransportKind::Connect, e)
    } else {
        QuayError::transport(TransportKind::Other, e)
    }
}
