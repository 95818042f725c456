//! Transport-layer collaborator interface
//!
//! The HTTP client layer is outside this crate; what crosses the boundary is
//! [`HttpFailure`], a snapshot of a failed exchange with everything the error
//! pipeline needs to normalize it. [`Connectivity`] is the process-wide
//! online flag the normalizer consults before blaming a remote service.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use serde_json::Value;

use crate::error::SourceError;

/// Snapshot of a failed HTTP exchange.
#[derive(Debug, Default)]
pub struct HttpFailure {
    /// Transport-level message, e.g. the client error's display text.
    pub message: String,
    /// HTTP status, when a response arrived at all.
    pub status: Option<u16>,
    /// Response body, when one arrived and parsed as JSON.
    pub body: Option<Value>,
    /// Request path (without the base URL).
    pub endpoint: Option<String>,
    /// Configured base URL of the client that issued the request.
    pub base_url: Option<String>,
    pub method: Option<String>,
    /// Configured request timeout.
    pub timeout: Option<Duration>,
    /// True when the request was aborted or timed out before completing.
    pub aborted: bool,
    source: Option<SourceError>,
}

impl HttpFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into(), ..Self::default() }
    }

    /// Lossy capture from the real transport error type. The response body
    /// is gone by the time `reqwest::Error` exists, so callers that still
    /// hold it should attach it with [`HttpFailure::with_body`].
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        let status = err.status().map(|s| s.as_u16());
        let (base_url, endpoint) = match err.url() {
            Some(url) => (
                Some(format!("{}://{}", url.scheme(), url.host_str().unwrap_or(""))),
                Some(url.path().to_string()),
            ),
            None => (None, None),
        };
        let aborted = err.is_timeout();
        let message = err.to_string();
        Self {
            message,
            status,
            body: None,
            endpoint,
            base_url,
            method: None,
            timeout: None,
            aborted,
            source: Some(SourceError::capture(err)),
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn aborted(mut self) -> Self {
        self.aborted = true;
        self
    }

    /// Base URL and endpoint joined, for provider signature matching.
    pub fn full_url(&self) -> String {
        format!(
            "{}{}",
            self.base_url.as_deref().unwrap_or(""),
            self.endpoint.as_deref().unwrap_or("")
        )
    }

    /// The causing transport error, or a summary of the message when the
    /// failure was assembled by hand.
    pub fn into_source(self) -> Option<SourceError> {
        if self.source.is_some() {
            return self.source;
        }
        if self.message.is_empty() {
            None
        } else {
            Some(SourceError::summary("HttpFailure", self.message))
        }
    }
}

static ONLINE: AtomicBool = AtomicBool::new(true);

/// Process-wide connectivity flag, the stand-in for `navigator.onLine`.
/// Defaults to online; the transport layer flips it when it notices the
/// link going up or down.
pub struct Connectivity;

impl Connectivity {
    pub fn is_online() -> bool {
        ONLINE.load(Ordering::Relaxed)
    }

    pub fn set_online(online: bool) {
        ONLINE.store(online, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn full_url_joins_base_and_endpoint() {
        let failure = HttpFailure::new("boom")
            .with_base_url("https://api.themoviedb.org/3")
            .with_endpoint("/movie/popular");
        assert_eq!(failure.full_url(), "https://api.themoviedb.org/3/movie/popular");
    }

    #[test]
    fn hand_built_failure_summarizes_its_message_as_source() {
        let failure = HttpFailure::new("request failed with status 500").with_status(500);
        let source = failure.into_source().expect("source");
        assert_eq!(source.type_name(), "HttpFailure");
        assert_eq!(source.message(), "request failed with status 500");
    }

    #[test]
    fn empty_failure_has_no_source() {
        let failure = HttpFailure::new("").with_body(json!({}));
        assert!(failure.into_source().is_none());
    }
}
