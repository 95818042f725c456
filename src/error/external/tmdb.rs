//! TMDB error envelope adapter
//!
//! TMDB reports domain failures as `{ status_code, status_message,
//! success: false }` with its own status-code vocabulary. Everything here is
//! pure: recognize the envelope, map the provider code onto the 2100 band.

use serde::Deserialize;
use serde_json::Value;

use crate::error::codes::ErrorCode;

/// TMDB's own status codes, as documented for their v3 API.
pub mod status {
    pub const SUCCESS: u16 = 1;
    pub const INVALID_SERVICE: u16 = 2;
    pub const AUTHENTICATION_FAILED: u16 = 3;
    pub const INVALID_FORMAT: u16 = 4;
    pub const INVALID_PARAMETERS: u16 = 5;
    pub const INVALID_ID: u16 = 6;
    pub const INVALID_API_KEY: u16 = 7;
    pub const DUPLICATE_ENTRY: u16 = 8;
    pub const SERVICE_OFFLINE: u16 = 9;
    pub const SUSPENDED_API_KEY: u16 = 10;
    pub const INTERNAL_ERROR: u16 = 11;
    pub const AUTH_FAILED: u16 = 14;
    pub const FAILED: u16 = 15;
    pub const VALIDATION_FAILED: u16 = 18;
    pub const INVALID_ACCEPT_HEADER: u16 = 19;
    pub const INVALID_DATE_RANGE: u16 = 20;
    pub const ENTRY_NOT_FOUND: u16 = 21;
    pub const INVALID_PAGE: u16 = 22;
    pub const INVALID_DATE: u16 = 23;
    pub const BACKEND_TIMEOUT: u16 = 24;
    pub const REQUEST_COUNT_EXCEEDED: u16 = 25;
    pub const INVALID_TIMEZONE: u16 = 29;
    pub const INVALID_REQUEST_TOKEN: u16 = 30;
    pub const TOKEN_NOT_APPROVED: u16 = 31;
    pub const INVALID_SESSION_ID: u16 = 32;
    pub const RESOURCE_NOT_FOUND: u16 = 34;
    pub const RESOURCE_PRIVATE: u16 = 35;
}

/// The TMDB error envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbErrorBody {
    pub status_code: u16,
    pub status_message: String,
    pub success: bool,
}

/// Structural guard for the TMDB envelope. A payload missing any required
/// field is not a TMDB error, whatever endpoint it came from.
pub fn is_tmdb_error(payload: &Value) -> bool {
    let Some(object) = payload.as_object() else {
        return false;
    };
    object.get("status_code").is_some_and(Value::is_number)
        && object.get("status_message").is_some_and(Value::is_string)
        && matches!(object.get("success"), Some(Value::Bool(false)))
}

/// Parse the envelope after the guard has accepted it.
pub fn parse(payload: &Value) -> Option<TmdbErrorBody> {
    if !is_tmdb_error(payload) {
        return None;
    }
    serde_json::from_value(payload.clone()).ok()
}

/// Map a TMDB status code onto the 2100 band. Total: unrecognized provider
/// codes land on the band's generic code, never on UNKNOWN.
pub fn map_code(tmdb_code: u16) -> ErrorCode {
    use status::*;
    match tmdb_code {
        INVALID_API_KEY | SUSPENDED_API_KEY | AUTHENTICATION_FAILED => {
            ErrorCode::API_TMDB_UNAUTHORIZED
        }
        AUTH_FAILED | RESOURCE_PRIVATE => ErrorCode::API_TMDB_FORBIDDEN,
        ENTRY_NOT_FOUND | RESOURCE_NOT_FOUND => ErrorCode::API_TMDB_NOT_FOUND,
        REQUEST_COUNT_EXCEEDED => ErrorCode::API_TMDB_RATE_LIMIT,
        BACKEND_TIMEOUT => ErrorCode::API_TMDB_TIMEOUT,
        INVALID_FORMAT | INVALID_PARAMETERS | INVALID_ID | VALIDATION_FAILED | INVALID_PAGE
        | INVALID_DATE => ErrorCode::API_TMDB_BAD_REQUEST,
        INTERNAL_ERROR | SERVICE_OFFLINE | FAILED => ErrorCode::API_TMDB_SERVER_ERROR,
        _ => ErrorCode::API_TMDB_ERROR,
    }
}

/// Does this request belong to TMDB?
pub fn is_tmdb_endpoint(base_url: &str, endpoint: &str) -> bool {
    let full = format!("{base_url}{endpoint}");
    full.contains("themoviedb.org") || base_url.contains("themoviedb.org") || endpoint.contains("tmdb")
}
