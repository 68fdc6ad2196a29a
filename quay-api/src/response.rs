//! Status-code acceptance and response body decoding.
//!
//! Each verb accepts a fixed set of success codes:
//!
//! | verb   | accepted      | decoded when            |
//! |--------|---------------|-------------------------|
//! | GET    | 200           | always                  |
//! | POST   | 200, 201      | a result is requested   |
//! | PUT    | 200, 201, 204 | requested and not 204   |
//! | DELETE | 200, 204      | never                   |

use serde::de::DeserializeOwned;

use quay_core::constants::DECODE_SNIPPET_LEN;
use quay_core::error::{QuayError, QuayResult};

/// The four transport primitives and their status policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Get,
    Post,
    Put,
    Delete,
}

impl Verb {
    /// Status codes this verb treats as success.
    pub fn accepted_statuses(self) -> &'static [u16] {
        match self {
            Verb::Get => &[200],
            Verb::Post => &[200, 201],
            Verb::Put => &[200, 201, 204],
            Verb::Delete => &[200, 204],
        }
    }

    pub fn accepts(self, status: u16) -> bool {
        self.accepted_statuses().contains(&status)
    }

    /// Whether an accepted response with `status` has a body worth decoding.
    pub fn has_payload(self, status: u16) -> bool {
        match self {
            Verb::Get | Verb::Post => true,
            Verb::Put => status != 204,
            Verb::Delete => false,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Verb::Get => "GET",
            Verb::Post => "POST",
            Verb::Put => "PUT",
            Verb::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for Verb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Build the `Api` error for a rejected response.
pub(crate) fn api_error(status: u16, body: &[u8]) -> QuayError {
    QuayError::Api {
        status,
        body: String::from_utf8_lossy(body).into_owned(),
    }
}

/// Decode a JSON body, keeping a prefix of it on failure.
pub(crate) fn decode_json<T: DeserializeOwned>(body: &[u8]) -> QuayResult<T> {
    serde_json::from_slice(body).map_err(|source| QuayError::Decode {
        source,
        snippet: snippet(body),
    })
}

fn snippet(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    if text.len() <= DECODE_SNIPPET_LEN {
        return text.into_owned();
    }
    let mut end = DECODE_SNIPPET_LEN;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &text[..end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Named {
        name: String,
    }

    #[test]
    fn test_status_policy() {
        assert!(Verb::Get.accepts(200));
        assert!(!Verb::Get.accepts(201));
        assert!(!Verb::Get.accepts(204));

        assert!(Verb::Post.accepts(201));
        assert!(!Verb::Post.accepts(204));

        assert!(Verb::Put.accepts(204));
        assert!(!Verb::Put.accepts(202));

        assert!(Verb::Delete.accepts(204));
        assert!(!Verb::Delete.accepts(201));
        assert!(!Verb::Delete.accepts(404));
    }

    #[test]
    fn test_payload_policy() {
        assert!(Verb::Put.has_payload(200));
        assert!(!Verb::Put.has_payload(204));
        assert!(!Verb::Delete.has_payload(200));
        assert!(Verb::Get.has_payload(200));
    }

    #[test]
    fn test_decode_json() {
        let named: Named = decode_json(br#"{"name":"x","extra":true}"#).unwrap();
        assert_eq!(named.name, "x");
    }

    #[test]
    fn test_decode_failure_keeps_snippet() {
        let err = decode_json::<Named>(b"<html>maintenance</html>").unwrap_err();
        match err {
            QuayError::Decode { snippet, .. } => assert_eq!(snippet, "<html>maintenance</html>"),
            other => panic!("expected decode error, got {other:?}"),
        }
    }

    #[test]
    fn test_snippet_truncates_on_char_boundary() {
        let body = "é".repeat(DECODE_SNIPPET_LEN);
        let s = snippet(body.as_bytes());
        assert!(s.ends_with("..."));
        assert!(s.len() <= DECODE_SNIPPET_LEN + 3);
    }

    #[test]
    fn test_api_error_lossy_body() {
        let err = api_error(500, &[0xff, b'o', b'k']);
        assert_eq!(err.status(), Some(500));
        assert!(err.to_string().contains("ok"));
    }
}
