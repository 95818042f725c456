//! Error taxonomy for the application
//!
//! Every failure that reaches the UI, the logs, or the crash-reporting sink
//! is first converted into exactly one [`AppError`]. The taxonomy is a closed
//! sum: a common payload (message, code, severity, metadata, original cause)
//! plus kind-specific details for the four kinds the application
//! distinguishes (client, API, network, unknown). Instances are immutable
//! once reported; enrichment before reporting goes through the consuming
//! `with_*` builders.

use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::panic::Location;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;

use crate::http::{Connectivity, HttpFailure};
use crate::logging::correlation;

pub mod boundary;
pub mod classify;
pub mod codes;
pub mod external;
pub mod normalize;
pub mod reporter;
pub mod server;
pub mod ui;

pub use codes::{ErrorBand, ErrorCode};

/// Reporting priority of an error, fixed per code at construction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
    Fatal,
}

impl Display for Severity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Fatal => "fatal",
        };
        write!(f, "{name}")
    }
}

/// Context captured alongside every error.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorMetadata {
    /// Creation instant, always set.
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Set only when the error was raised through a UI boundary.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component_stack: Option<String>,
    /// Where to send the user after the error, if anywhere.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_to: Option<String>,
    /// Correlation ID linking this error to surrounding log entries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<String>,
    /// file:line of the construction site.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_location: Option<String>,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub additional: HashMap<String, Value>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_server_side: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub api_route: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub server_action: bool,
}

impl ErrorMetadata {
    pub fn new() -> Self {
        Self {
            timestamp: Utc::now(),
            user_agent: None,
            url: None,
            component_stack: None,
            redirect_to: None,
            correlation_id: correlation::get_correlation_id(),
            source_location: None,
            additional: HashMap::new(),
            is_server_side: false,
            api_route: false,
            server_action: false,
        }
    }

    pub fn with_source_location(mut self, file: &str, line: u32) -> Self {
        self.source_location = Some(format!("{file}:{line}"));
        self
    }

    pub fn with_additional(mut self, key: impl Into<String>, value: Value) -> Self {
        self.additional.insert(key.into(), value);
        self
    }
}

impl Default for ErrorMetadata {
    fn default() -> Self {
        Self::new()
    }
}

/// Identity of the affected user, forwarded to the crash-reporting sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

impl UserInfo {
    pub fn with_id(id: impl Into<String>) -> Self {
        Self { id: Some(id.into()), email: None, username: None }
    }
}

/// Reporting hints attached at construction or at the report call site:
/// tags, extra key-values, user identity, and a level override.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReportContext {
    pub tags: HashMap<String, String>,
    pub extra: HashMap<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<Severity>,
}

impl ReportContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    pub fn with_user(mut self, user: UserInfo) -> Self {
        self.user = Some(user);
        self
    }

    pub fn with_level(mut self, level: Severity) -> Self {
        self.level = Some(level);
        self
    }
}

/// The original causing error, held for diagnostics only.
///
/// In-process the cause is kept lossless; once an error crosses a
/// serialization boundary only a name/message summary survives.
#[derive(Debug)]
pub enum SourceError {
    Captured {
        type_name: &'static str,
        inner: Box<dyn std::error::Error + Send + Sync>,
    },
    Summary {
        type_name: String,
        message: String,
    },
}

impl SourceError {
    pub fn capture<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Captured { type_name: std::any::type_name::<E>(), inner: Box::new(err) }
    }

    pub fn from_boxed(err: Box<dyn std::error::Error + Send + Sync>) -> Self {
        Self::Captured { type_name: "Error", inner: err }
    }

    pub fn summary(type_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Summary { type_name: type_name.into(), message: message.into() }
    }

    pub fn message(&self) -> String {
        match self {
            Self::Captured { inner, .. } => inner.to_string(),
            Self::Summary { message, .. } => message.clone(),
        }
    }

    pub fn type_name(&self) -> &str {
        match self {
            Self::Captured { type_name, .. } => type_name,
            Self::Summary { type_name, .. } => type_name,
        }
    }

    fn to_json(&self) -> Value {
        json!({ "name": self.type_name(), "message": self.message() })
    }
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Captured { inner, .. } => write!(f, "{inner}"),
            Self::Summary { message, .. } => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for SourceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Captured { inner, .. } => Some(inner.as_ref()),
            Self::Summary { .. } => None,
        }
    }
}

/// Domain-level error details reported by an external provider.
#[derive(Debug, Clone, Serialize)]
pub struct ServiceError {
    /// Provider name, "TMDB" or "OpenAI".
    pub service: &'static str,
    pub code: String,
    pub message: String,
}

/// Kind-specific payload of an [`AppError`].
#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ErrorDetails {
    Client {
        #[serde(skip_serializing_if = "Option::is_none")]
        component_name: Option<String>,
    },
    Api {
        #[serde(skip_serializing_if = "Option::is_none")]
        status: Option<u16>,
        #[serde(skip_serializing_if = "Option::is_none")]
        endpoint: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        method: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        response_body: Option<Value>,
        #[serde(skip_serializing_if = "Option::is_none")]
        service: Option<ServiceError>,
    },
    Network {
        #[serde(skip_serializing_if = "Option::is_none")]
        url: Option<String>,
        /// Connectivity flag sampled at construction.
        #[serde(skip_serializing_if = "Option::is_none")]
        online: Option<bool>,
    },
    Unknown,
}

impl ErrorDetails {
    /// Name matching the error's kind, used in serialized output.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Client { .. } => "ClientError",
            Self::Api { .. } => "ApiError",
            Self::Network { .. } => "NetworkError",
            Self::Unknown => "UnknownError",
        }
    }
}

/// Provider-specific pieces of a failed API exchange, used by the
/// TMDB/OpenAI constructors.
#[derive(Debug, Clone, Default)]
pub struct ProviderFailure {
    pub status: Option<u16>,
    pub endpoint: Option<String>,
    pub method: Option<String>,
    pub service_code: String,
    pub service_message: String,
}

/// The one error type everything in the application converges on.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct AppError {
    message: String,
    code: ErrorCode,
    severity: Severity,
    metadata: ErrorMetadata,
    #[source]
    original: Option<SourceError>,
    report_hints: Option<ReportContext>,
    details: ErrorDetails,
}

pub type Result<T, E = AppError> = core::result::Result<T, E>;

impl AppError {
    #[track_caller]
    fn build(
        message: impl Into<String>,
        code: ErrorCode,
        details: ErrorDetails,
        original: Option<SourceError>,
        report_hints: Option<ReportContext>,
    ) -> Self {
        let location = Location::caller();
        Self {
            message: message.into(),
            code,
            severity: codes::severity_or_default(code),
            metadata: ErrorMetadata::new().with_source_location(location.file(), location.line()),
            original,
            report_hints,
            details,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn metadata(&self) -> &ErrorMetadata {
        &self.metadata
    }

    pub fn original(&self) -> Option<&SourceError> {
        self.original.as_ref()
    }

    pub fn details(&self) -> &ErrorDetails {
        &self.details
    }

    pub fn kind_name(&self) -> &'static str {
        self.details.kind_name()
    }

    // --- client errors ---------------------------------------------------

    #[track_caller]
    pub fn client(
        message: impl Into<String>,
        code: ErrorCode,
        component_name: Option<String>,
        original: Option<SourceError>,
    ) -> Self {
        let hints = ReportContext::new()
            .with_tag("componentName", component_name.as_deref().unwrap_or("unknown"));
        Self::build(
            message,
            code,
            ErrorDetails::Client { component_name },
            original,
            Some(hints),
        )
    }

    #[track_caller]
    pub fn component_mount(component_name: impl Into<String>, original: SourceError) -> Self {
        let component_name = component_name.into();
        Self::client(
            format!("Component mount failed: {component_name}"),
            ErrorCode::COMPONENT_MOUNT_ERROR,
            Some(component_name),
            Some(original),
        )
    }

    #[track_caller]
    pub fn hook(
        hook_name: impl Into<String>,
        component_name: Option<String>,
        original: SourceError,
    ) -> Self {
        let hook_name = hook_name.into();
        let message = match &component_name {
            Some(component) => format!("Hook error in {hook_name} ({component})"),
            None => format!("Hook error in {hook_name}"),
        };
        Self::client(message, ErrorCode::HOOK_ERROR, component_name, Some(original))
            .with_additional("hookName", Value::String(hook_name))
    }

    #[track_caller]
    pub fn lazy_load(module_name: impl Into<String>, original: SourceError) -> Self {
        let module_name = module_name.into();
        Self::client(
            format!("Failed to lazy load module: {module_name}"),
            ErrorCode::LAZY_LOAD_ERROR,
            None,
            Some(original),
        )
        .with_additional("moduleName", Value::String(module_name))
    }

    // --- API errors ------------------------------------------------------

    #[track_caller]
    pub fn api(
        message: impl Into<String>,
        code: ErrorCode,
        status: Option<u16>,
        endpoint: Option<String>,
        method: Option<String>,
        response_body: Option<Value>,
        original: Option<SourceError>,
    ) -> Self {
        let hints = ReportContext::new()
            .with_tag(
                "statusCode",
                status.map_or_else(|| "unknown".to_string(), |s| s.to_string()),
            )
            .with_tag("endpoint", endpoint.as_deref().unwrap_or("unknown"))
            .with_tag("method", method.as_deref().unwrap_or("unknown"));
        Self::build(
            message,
            code,
            ErrorDetails::Api { status, endpoint, method, response_body, service: None },
            original,
            Some(hints),
        )
    }

    /// Generic transport failure, coded from the HTTP status.
    #[track_caller]
    pub fn api_from_http(failure: HttpFailure) -> Self {
        let code = match (failure.status, failure.aborted) {
            (Some(400), _) => ErrorCode::API_BAD_REQUEST,
            (Some(401), _) => ErrorCode::API_UNAUTHORIZED,
            (Some(403), _) => ErrorCode::API_FORBIDDEN,
            (Some(404), _) => ErrorCode::API_NOT_FOUND,
            (Some(429), _) => ErrorCode::API_RATE_LIMIT,
            (Some(status), _) if status >= 500 => ErrorCode::API_SERVER_ERROR,
            (None, true) => ErrorCode::API_TIMEOUT,
            _ => ErrorCode::API_ERROR,
        };
        let message = if failure.message.is_empty() {
            "API request failed".to_string()
        } else {
            failure.message.clone()
        };
        Self::api(
            message,
            code,
            failure.status,
            failure.endpoint.clone(),
            failure.method.as_deref().map(str::to_uppercase),
            failure.body.clone(),
            failure.into_source(),
        )
    }

    /// The endpoint answered, but not with anything the caller can use.
    #[track_caller]
    pub fn api_invalid_response(
        endpoint: impl Into<String>,
        reason: impl Into<String>,
        response_body: Option<Value>,
    ) -> Self {
        let endpoint = endpoint.into();
        let reason = reason.into();
        Self::api(
            format!("Invalid API response from {endpoint}: {reason}"),
            ErrorCode::API_INVALID_RESPONSE,
            None,
            Some(endpoint),
            None,
            response_body,
            None,
        )
        .with_additional("reason", Value::String(reason))
    }

    /// TMDB domain failure, code already mapped into the 2100 band.
    #[track_caller]
    pub fn api_tmdb(
        message: impl Into<String>,
        code: ErrorCode,
        parts: ProviderFailure,
        original: Option<SourceError>,
    ) -> Self {
        Self::provider_error("TMDB", message, code, ErrorCode::API_TMDB_ERROR, parts, original)
    }

    /// OpenAI domain failure, code already mapped into the 2200 band.
    #[track_caller]
    pub fn api_openai(
        message: impl Into<String>,
        code: ErrorCode,
        parts: ProviderFailure,
        original: Option<SourceError>,
    ) -> Self {
        Self::provider_error("OpenAI", message, code, ErrorCode::API_OPENAI_ERROR, parts, original)
    }

    #[track_caller]
    fn provider_error(
        service: &'static str,
        message: impl Into<String>,
        code: ErrorCode,
        fallback: ErrorCode,
        parts: ProviderFailure,
        original: Option<SourceError>,
    ) -> Self {
        let code = if code.band() == fallback.band() { code } else { fallback };
        let hints = ReportContext::new()
            .with_tag("service", service)
            .with_tag(
                "statusCode",
                parts.status.map_or_else(|| "unknown".to_string(), |s| s.to_string()),
            )
            .with_tag("endpoint", parts.endpoint.as_deref().unwrap_or("unknown"));
        Self::build(
            message,
            code,
            ErrorDetails::Api {
                status: parts.status,
                endpoint: parts.endpoint,
                method: parts.method,
                response_body: None,
                service: Some(ServiceError {
                    service,
                    code: parts.service_code,
                    message: parts.service_message,
                }),
            },
            original,
            Some(hints),
        )
    }

    // --- network errors --------------------------------------------------

    #[track_caller]
    pub fn network(
        message: impl Into<String>,
        code: ErrorCode,
        url: Option<String>,
        original: Option<SourceError>,
    ) -> Self {
        Self::build(
            message,
            code,
            ErrorDetails::Network { url, online: Some(Connectivity::is_online()) },
            original,
            None,
        )
    }

    #[track_caller]
    pub fn network_offline() -> Self {
        Self::network("Network is offline", ErrorCode::NETWORK_OFFLINE, None, None)
    }

    #[track_caller]
    pub fn network_timeout(url: impl Into<String>, timeout: Duration) -> Self {
        Self::network(
            format!("Network timeout after {}ms", timeout.as_millis()),
            ErrorCode::NETWORK_TIMEOUT,
            Some(url.into()),
            None,
        )
        .with_additional("timeout", json!(timeout.as_millis() as u64))
    }

    #[track_caller]
    pub fn network_connection_refused(url: impl Into<String>, original: SourceError) -> Self {
        let url = url.into();
        Self::network(
            format!("Connection refused to {url}"),
            ErrorCode::NETWORK_CONNECTION_REFUSED,
            Some(url),
            Some(original),
        )
    }

    // --- unknown errors --------------------------------------------------

    #[track_caller]
    pub fn unknown(message: impl Into<String>, original: Option<SourceError>) -> Self {
        let hints = ReportContext::new()
            .with_tag("errorType", "unknown")
            .with_tag("hasOriginalError", if original.is_some() { "yes" } else { "no" });
        Self::build(message, ErrorCode::UNKNOWN_ERROR, ErrorDetails::Unknown, original, Some(hints))
    }

    // --- enrichment ------------------------------------------------------
    //
    // These consume the draft and return a new value; nothing mutates an
    // error that has already been handed to the reporter.

    pub fn with_component_stack(mut self, stack: impl Into<String>) -> Self {
        self.metadata.component_stack = Some(stack.into());
        self
    }

    pub fn with_redirect(mut self, target: impl Into<String>) -> Self {
        self.metadata.redirect_to = Some(target.into());
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.metadata.url = Some(url.into());
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.metadata.user_agent = Some(user_agent.into());
        self
    }

    pub fn with_additional(mut self, key: impl Into<String>, value: Value) -> Self {
        self.metadata.additional.insert(key.into(), value);
        self
    }

    pub fn with_server_side(mut self) -> Self {
        self.metadata.is_server_side = true;
        self
    }

    pub fn with_api_route(mut self) -> Self {
        self.metadata.is_server_side = true;
        self.metadata.api_route = true;
        self
    }

    pub fn with_server_action(mut self) -> Self {
        self.metadata.is_server_side = true;
        self.metadata.server_action = true;
        self
    }

    /// Merge extra reporting hints into the instance context. Existing
    /// instance entries win on collision.
    pub fn with_report_context(mut self, context: ReportContext) -> Self {
        let merged = match self.report_hints.take() {
            Some(existing) => {
                let mut base = context;
                base.tags.extend(existing.tags);
                base.extra.extend(existing.extra);
                ReportContext {
                    tags: base.tags,
                    extra: base.extra,
                    user: existing.user.or(base.user),
                    level: existing.level.or(base.level),
                }
            }
            None => context,
        };
        self.report_hints = Some(merged);
        self
    }

    // --- outputs ---------------------------------------------------------

    /// User-facing message for this error. Always non-empty and safe to
    /// render directly; never exposes the raw technical message for
    /// unclassifiable failures.
    pub fn user_message(&self) -> String {
        let text = match &self.details {
            ErrorDetails::Client { .. } => client_message(self.code),
            ErrorDetails::Api { .. } => api_message(self.code),
            ErrorDetails::Network { .. } => network_message(self.code),
            ErrorDetails::Unknown => {
                "An unexpected problem occurred. Refresh the page and try again."
            }
        };
        text.to_string()
    }

    /// Reporting context for the crash sink: intrinsic tags (code, band
    /// category) merged with the instance hints. Instance hints win on
    /// collision.
    pub fn report_context(&self) -> ReportContext {
        let mut tags = HashMap::new();
        tags.insert("errorCode".to_string(), self.code.to_string());
        tags.insert("errorCategory".to_string(), self.code.category_name().to_string());

        let mut extra = HashMap::new();
        if let Ok(Value::Object(fields)) = serde_json::to_value(&self.metadata) {
            extra.extend(fields);
        }

        let mut context = ReportContext { tags, extra, user: None, level: Some(self.severity) };
        if let Some(hints) = &self.report_hints {
            context.tags.extend(hints.tags.clone());
            context.extra.extend(hints.extra.clone());
            context.user = hints.user.clone();
            if let Some(level) = hints.level {
                context.level = Some(level);
            }
        }
        context
    }

    /// Stable serialization for logs.
    pub fn to_json(&self) -> Value {
        json!({
            "name": self.kind_name(),
            "message": &self.message,
            "code": self.code,
            "severity": self.severity,
            "sourceLocation": &self.metadata.source_location,
            "metadata": &self.metadata,
            "details": &self.details,
            "originalError": self.original.as_ref().map(SourceError::to_json),
        })
    }
}

fn client_message(code: ErrorCode) -> &'static str {
    match code {
        ErrorCode::COMPONENT_MOUNT_ERROR => "Something went wrong while loading this section.",
        ErrorCode::COMPONENT_UPDATE_ERROR => "Something went wrong while updating this section.",
        ErrorCode::HOOK_ERROR => "Something went wrong while processing data.",
        ErrorCode::LAZY_LOAD_ERROR => "Failed to load the page. Please refresh.",
        _ => "Something went wrong in the app.",
    }
}

fn api_message(code: ErrorCode) -> &'static str {
    match code {
        ErrorCode::API_UNAUTHORIZED => "Authentication required. Please sign in again.",
        ErrorCode::API_FORBIDDEN => "You don't have permission to access this.",
        ErrorCode::API_NOT_FOUND => "The requested data could not be found.",
        ErrorCode::API_RATE_LIMIT => "Too many requests. Please try again shortly.",
        ErrorCode::API_TIMEOUT => "The server took too long to respond. Please try again.",
        ErrorCode::API_SERVER_ERROR => "The server ran into a problem. Please try again shortly.",
        ErrorCode::API_BAD_REQUEST => "The request was invalid.",
        ErrorCode::API_INVALID_RESPONSE => "Received an unexpected response from the server.",

        ErrorCode::API_TMDB_ERROR => "Something went wrong while talking to the movie service.",
        ErrorCode::API_TMDB_INVALID_KEY => {
            "The movie service API key is invalid. Check the configuration."
        }
        ErrorCode::API_TMDB_NOT_FOUND => "The requested movie could not be found.",
        ErrorCode::API_TMDB_RATE_LIMIT => "Too many movie requests. Please try again shortly.",
        ErrorCode::API_TMDB_BAD_REQUEST => "The movie service rejected the request.",
        ErrorCode::API_TMDB_UNAUTHORIZED => "The movie service requires authentication.",
        ErrorCode::API_TMDB_FORBIDDEN => "Access to the movie service was denied.",
        ErrorCode::API_TMDB_SERVER_ERROR => "The movie service is having problems.",
        ErrorCode::API_TMDB_TIMEOUT => "The movie service took too long to respond.",

        ErrorCode::API_OPENAI_ERROR => "Something went wrong with the AI service request.",
        ErrorCode::API_OPENAI_RATE_LIMIT => "Too many AI requests. Please try again shortly.",
        ErrorCode::API_OPENAI_INVALID_KEY => {
            "The AI service API key is invalid. Check the configuration."
        }
        ErrorCode::API_OPENAI_AUTH_ERROR => "AI service authentication failed.",
        ErrorCode::API_OPENAI_PERMISSION_ERROR => {
            "The AI service is not available for this account."
        }
        ErrorCode::API_OPENAI_QUOTA_EXCEEDED => {
            "The AI usage limit has been reached. Add credits to continue."
        }
        ErrorCode::API_OPENAI_SERVER_ERROR => "The AI service is having problems.",
        ErrorCode::API_OPENAI_TIMEOUT => "The AI service took too long to respond.",
        ErrorCode::API_OPENAI_PARSE_ERROR => "The AI response could not be processed.",

        _ => "Something went wrong with the request.",
    }
}

fn network_message(code: ErrorCode) -> &'static str {
    match code {
        ErrorCode::NETWORK_OFFLINE => "You appear to be offline. Check your connection.",
        ErrorCode::NETWORK_TIMEOUT => "The network connection timed out.",
        ErrorCode::NETWORK_CONNECTION_REFUSED => "Could not connect to the server.",
        ErrorCode::NETWORK_DNS_ERROR => "DNS lookup failed.",
        _ => "A network problem occurred.",
    }
}
