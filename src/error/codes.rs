//! Error code registry and severity table
//!
//! Every failure the pipeline can produce is identified by a stable numeric
//! code. Codes are partitioned into contiguous bands so that a code alone is
//! enough to recover its coarse category when no richer information survives.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

use crate::error::Severity;

/// Stable numeric identifier for a specific failure case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ErrorCode(pub u32);

impl Display for ErrorCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl ErrorCode {
    // 1000-1999: rendering / component errors
    pub const RENDER_ERROR: Self = Self(1000);
    pub const COMPONENT_MOUNT_ERROR: Self = Self(1001);
    pub const COMPONENT_UPDATE_ERROR: Self = Self(1002);
    pub const COMPONENT_UNMOUNT_ERROR: Self = Self(1003);
    pub const HOOK_ERROR: Self = Self(1004);
    pub const SUSPENSE_ERROR: Self = Self(1005);
    pub const LAZY_LOAD_ERROR: Self = Self(1006);

    // 2000-2099: API response errors (provider-agnostic)
    pub const API_ERROR: Self = Self(2000);
    pub const API_INVALID_RESPONSE: Self = Self(2001);
    pub const API_UNAUTHORIZED: Self = Self(2002);
    pub const API_FORBIDDEN: Self = Self(2003);
    pub const API_NOT_FOUND: Self = Self(2004);
    pub const API_SERVER_ERROR: Self = Self(2005);
    pub const API_RATE_LIMIT: Self = Self(2006);
    pub const API_TIMEOUT: Self = Self(2007);
    pub const API_BAD_REQUEST: Self = Self(2008);

    // 2100-2199: TMDB API errors
    pub const API_TMDB_ERROR: Self = Self(2100);
    pub const API_TMDB_INVALID_KEY: Self = Self(2101);
    pub const API_TMDB_NOT_FOUND: Self = Self(2102);
    pub const API_TMDB_RATE_LIMIT: Self = Self(2103);
    pub const API_TMDB_BAD_REQUEST: Self = Self(2104);
    pub const API_TMDB_UNAUTHORIZED: Self = Self(2105);
    pub const API_TMDB_FORBIDDEN: Self = Self(2106);
    pub const API_TMDB_SERVER_ERROR: Self = Self(2107);
    pub const API_TMDB_TIMEOUT: Self = Self(2108);

    // 2200-2299: OpenAI API errors
    pub const API_OPENAI_ERROR: Self = Self(2200);
    pub const API_OPENAI_RATE_LIMIT: Self = Self(2201);
    pub const API_OPENAI_INVALID_KEY: Self = Self(2202);
    pub const API_OPENAI_AUTH_ERROR: Self = Self(2203);
    pub const API_OPENAI_PERMISSION_ERROR: Self = Self(2204);
    pub const API_OPENAI_QUOTA_EXCEEDED: Self = Self(2205);
    pub const API_OPENAI_SERVER_ERROR: Self = Self(2206);
    pub const API_OPENAI_TIMEOUT: Self = Self(2207);
    pub const API_OPENAI_PARSE_ERROR: Self = Self(2208);

    // 3000-3999: network errors
    pub const NETWORK_ERROR: Self = Self(3000);
    pub const NETWORK_OFFLINE: Self = Self(3001);
    pub const NETWORK_TIMEOUT: Self = Self(3002);
    pub const NETWORK_CONNECTION_REFUSED: Self = Self(3003);
    pub const NETWORK_DNS_ERROR: Self = Self(3004);

    // 9000+: unclassifiable errors
    pub const UNKNOWN_ERROR: Self = Self(9000);

    /// Band membership for this code.
    pub fn band(self) -> ErrorBand {
        match self.0 {
            1000..=1999 => ErrorBand::Client,
            2000..=2099 => ErrorBand::GenericApi,
            2100..=2199 => ErrorBand::Tmdb,
            2200..=2299 => ErrorBand::OpenAi,
            2300..=2999 => ErrorBand::OtherApi,
            3000..=3999 => ErrorBand::Network,
            9000.. => ErrorBand::Unknown,
            _ => ErrorBand::Custom,
        }
    }

    /// Category tag derived from the band, used for observability tags.
    pub fn category_name(self) -> &'static str {
        match self.band() {
            ErrorBand::Client => "RENDER",
            ErrorBand::GenericApi => "API",
            ErrorBand::Tmdb => "API_TMDB",
            ErrorBand::OpenAi => "API_OPENAI",
            ErrorBand::OtherApi => "API_OTHER",
            ErrorBand::Network => "NETWORK",
            ErrorBand::Unknown => "UNKNOWN",
            ErrorBand::Custom => "CUSTOM",
        }
    }
}

/// Contiguous code band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorBand {
    /// 1000-1999, UI and component lifecycle failures
    Client,
    /// 2000-2099, transport-level HTTP failures
    GenericApi,
    /// 2100-2199, TMDB domain errors
    Tmdb,
    /// 2200-2299, OpenAI domain errors
    OpenAi,
    /// 2300-2999, reserved for further providers
    OtherApi,
    /// 3000-3999, connectivity failures
    Network,
    /// 9000+, unclassifiable
    Unknown,
    /// Anything outside the defined bands
    Custom,
}

/// Every code defined in the registry. New codes must be added here and to
/// the severity table together; the registry tests enforce it.
pub const REGISTRY: &[ErrorCode] = &[
    ErrorCode::RENDER_ERROR,
    ErrorCode::COMPONENT_MOUNT_ERROR,
    ErrorCode::COMPONENT_UPDATE_ERROR,
    ErrorCode::COMPONENT_UNMOUNT_ERROR,
    ErrorCode::HOOK_ERROR,
    ErrorCode::SUSPENSE_ERROR,
    ErrorCode::LAZY_LOAD_ERROR,
    ErrorCode::API_ERROR,
    ErrorCode::API_INVALID_RESPONSE,
    ErrorCode::API_UNAUTHORIZED,
    ErrorCode::API_FORBIDDEN,
    ErrorCode::API_NOT_FOUND,
    ErrorCode::API_SERVER_ERROR,
    ErrorCode::API_RATE_LIMIT,
    ErrorCode::API_TIMEOUT,
    ErrorCode::API_BAD_REQUEST,
    ErrorCode::API_TMDB_ERROR,
    ErrorCode::API_TMDB_INVALID_KEY,
    ErrorCode::API_TMDB_NOT_FOUND,
    ErrorCode::API_TMDB_RATE_LIMIT,
    ErrorCode::API_TMDB_BAD_REQUEST,
    ErrorCode::API_TMDB_UNAUTHORIZED,
    ErrorCode::API_TMDB_FORBIDDEN,
    ErrorCode::API_TMDB_SERVER_ERROR,
    ErrorCode::API_TMDB_TIMEOUT,
    ErrorCode::API_OPENAI_ERROR,
    ErrorCode::API_OPENAI_RATE_LIMIT,
    ErrorCode::API_OPENAI_INVALID_KEY,
    ErrorCode::API_OPENAI_AUTH_ERROR,
    ErrorCode::API_OPENAI_PERMISSION_ERROR,
    ErrorCode::API_OPENAI_QUOTA_EXCEEDED,
    ErrorCode::API_OPENAI_SERVER_ERROR,
    ErrorCode::API_OPENAI_TIMEOUT,
    ErrorCode::API_OPENAI_PARSE_ERROR,
    ErrorCode::NETWORK_ERROR,
    ErrorCode::NETWORK_OFFLINE,
    ErrorCode::NETWORK_TIMEOUT,
    ErrorCode::NETWORK_CONNECTION_REFUSED,
    ErrorCode::NETWORK_DNS_ERROR,
    ErrorCode::UNKNOWN_ERROR,
];

/// Default severity for a registered code. `None` for codes outside the
/// registry: a missing entry for a registered code is a registry defect, not
/// something to paper over at the call site.
pub fn default_severity(code: ErrorCode) -> Option<Severity> {
    let severity = match code {
        ErrorCode::RENDER_ERROR => Severity::Error,
        ErrorCode::COMPONENT_MOUNT_ERROR => Severity::Error,
        ErrorCode::COMPONENT_UPDATE_ERROR => Severity::Error,
        ErrorCode::COMPONENT_UNMOUNT_ERROR => Severity::Warning,
        ErrorCode::HOOK_ERROR => Severity::Error,
        ErrorCode::SUSPENSE_ERROR => Severity::Warning,
        ErrorCode::LAZY_LOAD_ERROR => Severity::Error,

        ErrorCode::API_ERROR => Severity::Error,
        ErrorCode::API_INVALID_RESPONSE => Severity::Error,
        ErrorCode::API_UNAUTHORIZED => Severity::Warning,
        ErrorCode::API_FORBIDDEN => Severity::Warning,
        ErrorCode::API_NOT_FOUND => Severity::Info,
        ErrorCode::API_SERVER_ERROR => Severity::Error,
        ErrorCode::API_RATE_LIMIT => Severity::Warning,
        ErrorCode::API_TIMEOUT => Severity::Warning,
        ErrorCode::API_BAD_REQUEST => Severity::Warning,

        ErrorCode::API_TMDB_ERROR => Severity::Error,
        ErrorCode::API_TMDB_INVALID_KEY => Severity::Error,
        ErrorCode::API_TMDB_NOT_FOUND => Severity::Info,
        ErrorCode::API_TMDB_RATE_LIMIT => Severity::Warning,
        ErrorCode::API_TMDB_BAD_REQUEST => Severity::Warning,
        ErrorCode::API_TMDB_UNAUTHORIZED => Severity::Warning,
        ErrorCode::API_TMDB_FORBIDDEN => Severity::Warning,
        ErrorCode::API_TMDB_SERVER_ERROR => Severity::Error,
        ErrorCode::API_TMDB_TIMEOUT => Severity::Warning,

        ErrorCode::API_OPENAI_ERROR => Severity::Error,
        ErrorCode::API_OPENAI_RATE_LIMIT => Severity::Warning,
        ErrorCode::API_OPENAI_INVALID_KEY => Severity::Error,
        ErrorCode::API_OPENAI_AUTH_ERROR => Severity::Warning,
        ErrorCode::API_OPENAI_PERMISSION_ERROR => Severity::Warning,
        ErrorCode::API_OPENAI_QUOTA_EXCEEDED => Severity::Warning,
        ErrorCode::API_OPENAI_SERVER_ERROR => Severity::Error,
        ErrorCode::API_OPENAI_TIMEOUT => Severity::Warning,
        ErrorCode::API_OPENAI_PARSE_ERROR => Severity::Error,

        ErrorCode::NETWORK_ERROR => Severity::Error,
        ErrorCode::NETWORK_OFFLINE => Severity::Warning,
        ErrorCode::NETWORK_TIMEOUT => Severity::Warning,
        ErrorCode::NETWORK_CONNECTION_REFUSED => Severity::Error,
        ErrorCode::NETWORK_DNS_ERROR => Severity::Error,

        ErrorCode::UNKNOWN_ERROR => Severity::Error,

        _ => return None,
    };
    Some(severity)
}

/// Severity used at construction time. Codes minted outside the registry
/// fall back to `Error`, matching the most conservative useful default.
pub fn severity_or_default(code: ErrorCode) -> Severity {
    default_severity(code).unwrap_or(Severity::Error)
}
