//! Central conversion of raw failures into the taxonomy
//!
//! `normalize` is the single funnel: whatever a caller caught (an already
//! typed error, a failed HTTP exchange, a plain runtime error, a panic
//! payload, a bare string) comes out as exactly one [`AppError`]. It never
//! panics and it does no reporting; the handlers in [`boundary`] own the
//! report side effect.
//!
//! [`boundary`]: crate::error::boundary

use std::any::Any;
use std::time::Duration;

use crate::error::external::{openai, tmdb};
use crate::error::{AppError, ErrorCode, ProviderFailure, SourceError};
use crate::http::{Connectivity, HttpFailure};

const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// A raw caught value on its way into the pipeline.
#[derive(Debug)]
pub enum RawFailure {
    /// Already normalized; passes through untouched.
    Normalized(AppError),
    /// A failed HTTP exchange from the transport layer.
    Http(HttpFailure),
    /// A generic runtime error with no HTTP shape.
    Runtime(SourceError),
    /// A bare string used as an error.
    Text(String),
    /// Anything else: null-ish values, opaque panic payloads, plain objects.
    Opaque,
}

impl RawFailure {
    /// Capture a concrete runtime error, keeping it lossless for
    /// diagnostics.
    pub fn from_error<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Runtime(SourceError::capture(err))
    }

    /// Downcast a panic payload. Panics carry `&str` or `String` almost
    /// always; anything else is opaque.
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        if let Some(text) = payload.downcast_ref::<&str>() {
            return Self::Text((*text).to_string());
        }
        match payload.downcast::<String>() {
            Ok(text) => Self::Text(*text),
            Err(_) => Self::Opaque,
        }
    }
}

impl From<AppError> for RawFailure {
    fn from(err: AppError) -> Self {
        Self::Normalized(err)
    }
}

impl From<HttpFailure> for RawFailure {
    fn from(failure: HttpFailure) -> Self {
        Self::Http(failure)
    }
}

impl From<reqwest::Error> for RawFailure {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(HttpFailure::from_reqwest(err))
    }
}

impl From<Box<dyn std::error::Error + Send + Sync>> for RawFailure {
    fn from(err: Box<dyn std::error::Error + Send + Sync>) -> Self {
        Self::Runtime(SourceError::from_boxed(err))
    }
}

impl From<SourceError> for RawFailure {
    fn from(source: SourceError) -> Self {
        Self::Runtime(source)
    }
}

impl From<String> for RawFailure {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for RawFailure {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

/// Convert any caught value into exactly one [`AppError`].
///
/// Checked in order, first match wins: already-normalized errors pass
/// through by identity; a reported-offline environment short-circuits to a
/// network error (any transport failure while offline is a connectivity
/// problem, not the remote service's); HTTP-shaped failures go through
/// timeout detection, provider adapters, then the generic status map;
/// generic runtime errors are sniffed for network/timeout phrasing;
/// everything else becomes an unknown error.
pub fn normalize(candidate: impl Into<RawFailure>) -> AppError {
    match candidate.into() {
        RawFailure::Normalized(err) => err,
        _ if !Connectivity::is_online() => AppError::network_offline(),
        RawFailure::Http(failure) => normalize_http(failure),
        RawFailure::Runtime(source) => normalize_runtime(source),
        RawFailure::Text(text) => AppError::unknown(text, None),
        RawFailure::Opaque => AppError::unknown("Unknown error occurred", None),
    }
}

fn normalize_http(failure: HttpFailure) -> AppError {
    if failure.aborted {
        let endpoint = failure.endpoint.clone().unwrap_or_else(|| "unknown".to_string());
        let timeout = failure.timeout.unwrap_or(DEFAULT_HTTP_TIMEOUT);
        return AppError::network_timeout(endpoint, timeout);
    }

    let base_url = failure.base_url.clone().unwrap_or_default();
    let endpoint = failure.endpoint.clone().unwrap_or_default();

    if tmdb::is_tmdb_endpoint(&base_url, &endpoint) {
        if let Some(body) = failure.body.as_ref().and_then(tmdb::parse) {
            let code = tmdb::map_code(body.status_code);
            let message = if body.status_message.is_empty() {
                "TMDB API error".to_string()
            } else {
                body.status_message.clone()
            };
            let parts = ProviderFailure {
                status: failure.status,
                endpoint: failure.endpoint.clone(),
                method: failure.method.clone(),
                service_code: body.status_code.to_string(),
                service_message: body.status_message,
            };
            return AppError::api_tmdb(message, code, parts, failure.into_source());
        }
    }

    if openai::is_openai_endpoint(&base_url, &endpoint) {
        if let Some(body) = failure.body.as_ref().and_then(openai::parse) {
            let kind = openai::detect_error_kind(failure.status.unwrap_or(500), &body.error.message);
            let code = openai::map_kind(kind);
            let message = if body.error.message.is_empty() {
                "OpenAI API error".to_string()
            } else {
                body.error.message.clone()
            };
            let parts = ProviderFailure {
                status: failure.status,
                endpoint: failure.endpoint.clone(),
                method: failure.method.clone(),
                service_code: body.error.code.clone().unwrap_or_else(|| kind.as_str().to_string()),
                service_message: body.error.message,
            };
            return AppError::api_openai(message, code, parts, failure.into_source());
        }
    }

    // malformed or absent provider payloads fall through to the status map
    AppError::api_from_http(failure)
}

fn normalize_runtime(source: SourceError) -> AppError {
    let message = source.message();
    let lowered = message.to_lowercase();

    if lowered.contains("network") || lowered.contains("fetch") {
        return AppError::network(message, ErrorCode::NETWORK_ERROR, None, Some(source));
    }
    if lowered.contains("timeout") {
        return AppError::network(message, ErrorCode::NETWORK_TIMEOUT, None, Some(source));
    }
    AppError::unknown(message, Some(source))
}
