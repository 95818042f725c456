//! OpenAI error envelope adapter
//!
//! OpenAI wraps failures as `{ error: { message, type, code? } }` and leaves
//! the interesting distinctions (rate limit vs quota, overloaded vs slow
//! down) to the HTTP status plus message phrasing, so detection runs on
//! status code and known message substrings before mapping.

use serde::Deserialize;
use serde_json::Value;

use crate::error::codes::ErrorCode;

/// Failure classes OpenAI distinguishes across 401/403/429/500/503.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenAiErrorKind {
    InvalidAuthentication,
    IncorrectApiKey,
    NotOrganizationMember,
    IpNotAuthorized,
    UnsupportedCountry,
    RateLimitReached,
    QuotaExceeded,
    ServerError,
    EngineOverloaded,
    SlowDown,
    Unknown,
}

impl OpenAiErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InvalidAuthentication => "invalid_authentication",
            Self::IncorrectApiKey => "incorrect_api_key",
            Self::NotOrganizationMember => "not_organization_member",
            Self::IpNotAuthorized => "ip_not_authorized",
            Self::UnsupportedCountry => "unsupported_country",
            Self::RateLimitReached => "rate_limit_reached",
            Self::QuotaExceeded => "quota_exceeded",
            Self::ServerError => "server_error",
            Self::EngineOverloaded => "engine_overloaded",
            Self::SlowDown => "slow_down",
            Self::Unknown => "unknown",
        }
    }
}

/// The OpenAI error envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiErrorBody {
    pub error: OpenAiErrorDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiErrorDetail {
    pub message: String,
    #[serde(rename = "type")]
    pub error_type: String,
    pub code: Option<String>,
}

/// Structural guard for the OpenAI envelope: a nested `error` object with a
/// string message and a string type. Reject anything missing either field.
pub fn is_openai_error(payload: &Value) -> bool {
    let Some(error) = payload.as_object().and_then(|o| o.get("error")).and_then(Value::as_object)
    else {
        return false;
    };
    error.get("message").is_some_and(Value::is_string)
        && error.get("type").is_some_and(Value::is_string)
}

/// Parse the envelope after the guard has accepted it.
pub fn parse(payload: &Value) -> Option<OpenAiErrorBody> {
    if !is_openai_error(payload) {
        return None;
    }
    serde_json::from_value(payload.clone()).ok()
}

/// Detect the failure class from status code and message phrasing. Substring
/// checks are case-sensitive against the exact phrases OpenAI uses;
/// unmatched combinations fall back to the status-keyed default.
pub fn detect_error_kind(status: u16, message: &str) -> OpenAiErrorKind {
    match status {
        401 => {
            if message.contains("Incorrect API key") {
                OpenAiErrorKind::IncorrectApiKey
            } else if message.contains("not a member") {
                OpenAiErrorKind::NotOrganizationMember
            } else {
                OpenAiErrorKind::InvalidAuthentication
            }
        }
        403 => OpenAiErrorKind::UnsupportedCountry,
        429 => {
            if message.contains("quota") {
                OpenAiErrorKind::QuotaExceeded
            } else {
                OpenAiErrorKind::RateLimitReached
            }
        }
        500 => OpenAiErrorKind::ServerError,
        503 => {
            if message.contains("overloaded") {
                OpenAiErrorKind::EngineOverloaded
            } else {
                OpenAiErrorKind::SlowDown
            }
        }
        _ => OpenAiErrorKind::Unknown,
    }
}

/// Map a detected failure class onto the 2200 band. Total: unknown classes
/// land on the band's generic code, never on UNKNOWN.
pub fn map_kind(kind: OpenAiErrorKind) -> ErrorCode {
    match kind {
        OpenAiErrorKind::IncorrectApiKey => ErrorCode::API_OPENAI_INVALID_KEY,
        OpenAiErrorKind::InvalidAuthentication
        | OpenAiErrorKind::NotOrganizationMember
        | OpenAiErrorKind::IpNotAuthorized => ErrorCode::API_OPENAI_AUTH_ERROR,
        OpenAiErrorKind::UnsupportedCountry => ErrorCode::API_OPENAI_PERMISSION_ERROR,
        OpenAiErrorKind::RateLimitReached | OpenAiErrorKind::SlowDown => {
            ErrorCode::API_OPENAI_RATE_LIMIT
        }
        OpenAiErrorKind::QuotaExceeded => ErrorCode::API_OPENAI_QUOTA_EXCEEDED,
        OpenAiErrorKind::ServerError | OpenAiErrorKind::EngineOverloaded => {
            ErrorCode::API_OPENAI_SERVER_ERROR
        }
        OpenAiErrorKind::Unknown => ErrorCode::API_OPENAI_ERROR,
    }
}

/// Does this request belong to OpenAI?
pub fn is_openai_endpoint(base_url: &str, endpoint: &str) -> bool {
    let full = format!("{base_url}{endpoint}");
    full.contains("openai.com") || base_url.contains("openai.com") || endpoint.contains("api.openai")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn guard_accepts_the_full_envelope() {
        let payload = json!({
            "error": {
                "message": "You exceeded your current quota",
                "type": "insufficient_quota",
                "code": "insufficient_quota",
            }
        });
        assert!(is_openai_error(&payload));
        let body = parse(&payload).expect("parse");
        assert_eq!(body.error.error_type, "insufficient_quota");
        assert_eq!(body.error.code.as_deref(), Some("insufficient_quota"));
    }

    #[test]
    fn guard_rejects_partial_envelopes() {
        assert!(!is_openai_error(&json!({ "error": { "message": "oops" } })));
        assert!(!is_openai_error(&json!({ "error": { "type": "server_error" } })));
        assert!(!is_openai_error(&json!({ "message": "oops", "type": "server_error" })));
        assert!(!is_openai_error(&json!({ "error": "oops" })));
        assert!(!is_openai_error(&Value::Null));
    }

    #[test]
    fn detection_uses_status_and_phrasing() {
        assert_eq!(
            detect_error_kind(401, "Incorrect API key provided"),
            OpenAiErrorKind::IncorrectApiKey
        );
        assert_eq!(
            detect_error_kind(401, "You are not a member of an organization"),
            OpenAiErrorKind::NotOrganizationMember
        );
        assert_eq!(detect_error_kind(401, "bad token"), OpenAiErrorKind::InvalidAuthentication);
        assert_eq!(detect_error_kind(403, "anything"), OpenAiErrorKind::UnsupportedCountry);
        assert_eq!(
            detect_error_kind(429, "You exceeded your current quota"),
            OpenAiErrorKind::QuotaExceeded
        );
        assert_eq!(detect_error_kind(429, "Rate limit reached"), OpenAiErrorKind::RateLimitReached);
        assert_eq!(detect_error_kind(500, "boom"), OpenAiErrorKind::ServerError);
        assert_eq!(
            detect_error_kind(503, "The engine is currently overloaded"),
            OpenAiErrorKind::EngineOverloaded
        );
        assert_eq!(detect_error_kind(503, "please slow down"), OpenAiErrorKind::SlowDown);
        assert_eq!(detect_error_kind(418, "teapot"), OpenAiErrorKind::Unknown);
    }

    #[test]
    fn detection_substrings_are_case_sensitive() {
        // "Quota" with a capital Q is not the phrase OpenAI sends
        assert_eq!(
            detect_error_kind(429, "Quota problems"),
            OpenAiErrorKind::RateLimitReached
        );
        assert_eq!(detect_error_kind(503, "OVERLOADED"), OpenAiErrorKind::SlowDown);
    }

    #[test]
    fn mapping_is_total_over_the_band() {
        let kinds = [
            OpenAiErrorKind::InvalidAuthentication,
            OpenAiErrorKind::IncorrectApiKey,
            OpenAiErrorKind::NotOrganizationMember,
            OpenAiErrorKind::IpNotAuthorized,
            OpenAiErrorKind::UnsupportedCountry,
            OpenAiErrorKind::RateLimitReached,
            OpenAiErrorKind::QuotaExceeded,
            OpenAiErrorKind::ServerError,
            OpenAiErrorKind::EngineOverloaded,
            OpenAiErrorKind::SlowDown,
            OpenAiErrorKind::Unknown,
        ];
        for kind in kinds {
            let code = map_kind(kind);
            assert_eq!(
                code.band(),
                ErrorCode::API_OPENAI_ERROR.band(),
                "{} mapped outside the OpenAI band",
                kind.as_str()
            );
        }
    }

    #[test]
    fn endpoint_signature() {
        assert!(is_openai_endpoint("https://api.openai.com/v1", "/chat/completions"));
        assert!(is_openai_endpoint("", "/api.openai/v1/chat"));
        assert!(!is_openai_endpoint("https://api.themoviedb.org/3", "/movie/popular"));
    }
}
