//! Coarse error classification for tagging and observability
//!
//! `classify` collapses the taxonomy into four kinds used as crash-report
//! tags and UI content keys. The concrete variant wins for network and API
//! errors (some codes are logically shared across bands for rate-limiting
//! concerns); everything else goes through the code override table and then
//! band membership.

use std::collections::HashMap;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::error::codes::{ErrorBand, ErrorCode};
use crate::error::{AppError, ErrorDetails};
use crate::logging::LogLevel;

/// Four-way classification of an error, stable across repeated calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    ClientError,
    ApiError,
    NetworkError,
    UnknownError,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::ClientError => "ClientError",
            Self::ApiError => "ApiError",
            Self::NetworkError => "NetworkError",
            Self::UnknownError => "UnknownError",
        };
        write!(f, "{name}")
    }
}

/// Per-code overrides consulted before band membership. Rate-limit codes in
/// particular always classify as API errors regardless of numeric
/// neighborhood.
fn kind_override(code: ErrorCode) -> Option<ErrorKind> {
    let kind = match code {
        ErrorCode::NETWORK_ERROR
        | ErrorCode::NETWORK_OFFLINE
        | ErrorCode::NETWORK_TIMEOUT
        | ErrorCode::NETWORK_CONNECTION_REFUSED
        | ErrorCode::NETWORK_DNS_ERROR => ErrorKind::NetworkError,

        ErrorCode::API_RATE_LIMIT => ErrorKind::ApiError,

        ErrorCode::API_ERROR
        | ErrorCode::API_INVALID_RESPONSE
        | ErrorCode::API_BAD_REQUEST
        | ErrorCode::API_UNAUTHORIZED
        | ErrorCode::API_FORBIDDEN
        | ErrorCode::API_NOT_FOUND
        | ErrorCode::API_SERVER_ERROR
        | ErrorCode::API_TIMEOUT => ErrorKind::ApiError,

        ErrorCode::API_TMDB_ERROR
        | ErrorCode::API_TMDB_INVALID_KEY
        | ErrorCode::API_TMDB_NOT_FOUND
        | ErrorCode::API_TMDB_RATE_LIMIT
        | ErrorCode::API_TMDB_BAD_REQUEST
        | ErrorCode::API_TMDB_UNAUTHORIZED
        | ErrorCode::API_TMDB_FORBIDDEN
        | ErrorCode::API_TMDB_SERVER_ERROR
        | ErrorCode::API_TMDB_TIMEOUT => ErrorKind::ApiError,

        ErrorCode::API_OPENAI_ERROR
        | ErrorCode::API_OPENAI_RATE_LIMIT
        | ErrorCode::API_OPENAI_INVALID_KEY
        | ErrorCode::API_OPENAI_AUTH_ERROR
        | ErrorCode::API_OPENAI_PERMISSION_ERROR
        | ErrorCode::API_OPENAI_QUOTA_EXCEEDED
        | ErrorCode::API_OPENAI_SERVER_ERROR
        | ErrorCode::API_OPENAI_TIMEOUT
        | ErrorCode::API_OPENAI_PARSE_ERROR => ErrorKind::ApiError,

        ErrorCode::RENDER_ERROR
        | ErrorCode::COMPONENT_MOUNT_ERROR
        | ErrorCode::COMPONENT_UPDATE_ERROR
        | ErrorCode::COMPONENT_UNMOUNT_ERROR
        | ErrorCode::HOOK_ERROR
        | ErrorCode::SUSPENSE_ERROR
        | ErrorCode::LAZY_LOAD_ERROR => ErrorKind::ClientError,

        _ => return None,
    };
    Some(kind)
}

/// Classify a taxonomy instance. Pure, total, deterministic.
pub fn classify(error: &AppError) -> ErrorKind {
    match error.details() {
        ErrorDetails::Network { .. } => ErrorKind::NetworkError,
        ErrorDetails::Api { .. } => ErrorKind::ApiError,
        _ => classify_code(error.code()),
    }
}

/// Classify by code alone: the override table first, band membership as the
/// fallback, unknown when no band matches. This is the path callers outside
/// the taxonomy use for bare codes.
pub fn classify_code(code: ErrorCode) -> ErrorKind {
    if let Some(kind) = kind_override(code) {
        return kind;
    }
    match code.band() {
        ErrorBand::Client => ErrorKind::ClientError,
        ErrorBand::GenericApi | ErrorBand::Tmdb | ErrorBand::OpenAi | ErrorBand::OtherApi => {
            ErrorKind::ApiError
        }
        ErrorBand::Network => ErrorKind::NetworkError,
        ErrorBand::Unknown | ErrorBand::Custom => ErrorKind::UnknownError,
    }
}

/// Log level used when an error of this kind is written to the logs.
/// Unknown failures log loudest: their failure mode is, by definition,
/// unknown.
pub fn log_level(kind: ErrorKind) -> LogLevel {
    match kind {
        ErrorKind::ClientError => LogLevel::Error,
        ErrorKind::ApiError => LogLevel::Error,
        ErrorKind::NetworkError => LogLevel::Warn,
        ErrorKind::UnknownError => LogLevel::Fatal,
    }
}

/// Optional request context folded into the observability tag set.
#[derive(Debug, Clone, Default)]
pub struct TagContext<'a> {
    pub service: Option<&'a str>,
    pub endpoint: Option<&'a str>,
    pub status: Option<u16>,
}

/// Tag set attached to crash reports and structured logs for a classified
/// error.
pub fn observability_tags(kind: ErrorKind, context: Option<&TagContext>) -> HashMap<String, String> {
    let mut tags = HashMap::new();
    tags.insert("errorKind".to_string(), kind.to_string());
    tags.insert("logLevel".to_string(), log_level(kind).to_string());
    if let Some(context) = context {
        if let Some(service) = context.service {
            tags.insert("service".to_string(), service.to_string());
        }
        if let Some(endpoint) = context.endpoint {
            tags.insert("endpoint".to_string(), endpoint.to_string());
        }
        if let Some(status) = context.status {
            tags.insert("statusCode".to_string(), status.to_string());
        }
    }
    tags
}
