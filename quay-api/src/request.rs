//! Outgoing request descriptors.

use std::time::Duration;

use reqwest::Method;
use serde::Serialize;

use quay_core::error::QuayResult;

/// One outgoing API call, built fresh and consumed by a single verb call.
///
/// The URL must be absolute and already carry any query string; see
/// [`Client::url_with_query`](crate::Client::url_with_query).
#[derive(Debug, Clone)]
pub struct Request {
    pub(crate) method: Method,
    pub(crate) url: String,
    pub(crate) body: Option<Vec<u8>>,
    pub(crate) timeout: Option<Duration>,
}

impl Request {
    /// Bodyless request.
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            body: None,
            timeout: None,
        }
    }

    /// Request carrying `body` serialized as JSON.
    ///
    /// A body that serializes to JSON `null` (e.g. `None`) is not sent.
    /// Fails with `QuayError::Serialization` if `body` cannot be represented
    /// as JSON (e.g. a map with non-string keys).
    pub fn with_json<B>(method: Method, url: impl Into<String>, body: &B) -> QuayResult<Self>
    where
        B: Serialize + ?Sized,
    {
        let bytes = serde_json::to_vec(body)?;
        Ok(Self {
            body: (bytes != b"null").then_some(bytes),
            ..Self::new(method, url)
        })
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::GET, url)
    }

    pub fn delete(url: impl Into<String>) -> Self {
        Self::new(Method::DELETE, url)
    }

    pub fn post<B: Serialize + ?Sized>(url: impl Into<String>, body: &B) -> QuayResult<Self> {
        Self::with_json(Method::POST, url, body)
    }

    pub fn put<B: Serialize + ?Sized>(url: impl Into<String>, body: &B) -> QuayResult<Self> {
        Self::with_json(Method::PUT, url, body)
    }

    /// Per-call deadline overriding the client-wide timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Serialized JSON body, if any.
    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quay_core::QuayError;
    use serde::ser::Error as _;
    use std::collections::BTreeMap;

    struct Unserializable;

    impl Serialize for Unserializable {
        fn serialize<S: serde::Serializer>(&self, _: S) -> Result<S::Ok, S::Error> {
            Err(S::Error::custom("refusing to serialize"))
        }
    }

    #[test]
    fn test_bodyless_request() {
        let req = Request::get("https://quay.io/api/v1/discovery");
        assert_eq!(req.method(), &Method::GET);
        assert_eq!(req.url(), "https://quay.io/api/v1/discovery");
        assert!(req.body().is_none());
        assert!(req.timeout.is_none());
    }

    #[test]
    fn test_json_body_serialized() {
        let mut body = BTreeMap::new();
        body.insert("repository", "demo");
        body.insert("visibility", "private");
        let req = Request::post("https://quay.io/api/v1/repository", &body).unwrap();
        assert_eq!(req.method(), &Method::POST);
        let value: serde_json::Value = serde_json::from_slice(req.body().unwrap()).unwrap();
        assert_eq!(value["repository"], "demo");
        assert_eq!(value["visibility"], "private");
    }

    #[test]
    fn test_serialization_failure_is_error() {
        let err = Request::put("https://quay.io/api/v1/x", &Unserializable).unwrap_err();
        assert!(matches!(err, QuayError::Serialization(_)));
    }

    #[test]
    fn test_non_string_map_keys_rejected() {
        let mut body = BTreeMap::new();
        body.insert(vec![1u8], 1);
        let err = Request::post("https://quay.io/api/v1/x", &body).unwrap_err();
        assert!(matches!(err, QuayError::Serialization(_)));
    }

    #[test]
    fn test_null_body_not_sent() {
        let req = Request::post("https://quay.io/api/v1/x", &None::<()>).unwrap();
        assert_eq!(req.method(), &Method::POST);
        assert!(req.body().is_none());

        let req = Request::put("https://quay.io/api/v1/x", &Some("null")).unwrap();
        assert_eq!(req.body(), Some(&b"\"null\""[..]));
    }

    #[test]
    fn test_timeout_override() {
        let req = Request::delete("https://quay.io/api/v1/x").timeout(Duration::from_secs(2));
        assert_eq!(req.timeout, Some(Duration::from_secs(2)));
    }
}
