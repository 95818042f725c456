//! Server-side error handling
//!
//! Server contexts cannot render a boundary fallback; instead they decide
//! between propagating (the framework turns a returned error into its own
//! failure page), responding with a JSON envelope (API routes), or
//! redirecting. Every path still goes through normalize-then-report exactly
//! once, with server-context tags attached.

use serde::Serialize;

use crate::error::boundary::ErrorPipeline;
use crate::error::classify::{ErrorKind, classify, observability_tags};
use crate::error::normalize::{RawFailure, normalize};
use crate::error::{AppError, ErrorCode, ReportContext};

/// How a server caller should proceed after an error was handled.
#[derive(Debug)]
pub enum ServerDisposition {
    /// Hand the error to the framework (the throw-after-handling path).
    Propagate(AppError),
    /// Render the platform's not-found page.
    NotFound,
    /// Redirect to the given location.
    Redirect(String),
    /// Error was handled; the caller continues with a degraded result.
    Recovered(AppError),
}

/// Options for [`handle_server_error`].
#[derive(Debug, Clone)]
pub struct ServerErrorOptions {
    /// Turn the error into a not-found disposition.
    pub not_found: bool,
    /// Redirect here instead of propagating.
    pub redirect_to: Option<String>,
    /// Propagate to the framework (default). When false the normalized
    /// error is returned for local recovery.
    pub propagate: bool,
}

impl Default for ServerErrorOptions {
    fn default() -> Self {
        Self { not_found: false, redirect_to: None, propagate: true }
    }
}

/// JSON envelope returned by API routes for a handled error.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponseBody {
    pub error: ErrorResponseDetail,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponseDetail {
    pub message: String,
    pub code: ErrorCode,
    pub kind: ErrorKind,
}

fn server_tags(error: &AppError, handler: &str) -> ReportContext {
    let kind = classify(error);
    let mut context = ReportContext::new()
        .with_tag("serverSide", "true")
        .with_tag("errorHandler", handler);
    context.tags.extend(observability_tags(kind, None));
    context
}

/// Handle an error caught in a server component: normalize, stamp the
/// server context, report once, then derive what the caller should do.
pub fn handle_server_error(
    pipeline: &ErrorPipeline,
    candidate: impl Into<RawFailure>,
    options: &ServerErrorOptions,
) -> ServerDisposition {
    let error = normalize(candidate).with_server_side();

    tracing::error!(
        code = %error.code(),
        kind = %classify(&error),
        "server error: {error}"
    );
    pipeline.report_with(&error, &server_tags(&error, "server"));

    if options.not_found {
        return ServerDisposition::NotFound;
    }
    if let Some(target) = &options.redirect_to {
        return ServerDisposition::Redirect(target.clone());
    }
    if options.propagate {
        ServerDisposition::Propagate(error)
    } else {
        ServerDisposition::Recovered(error)
    }
}

/// Handle an error caught in an API route and build the response envelope
/// for the client.
pub fn error_response(
    pipeline: &ErrorPipeline,
    candidate: impl Into<RawFailure>,
    status: u16,
) -> ErrorResponseBody {
    let error = normalize(candidate).with_api_route();
    let kind = classify(&error);

    tracing::error!(
        code = %error.code(),
        kind = %kind,
        status,
        "API route error: {error}"
    );
    let context = server_tags(&error, "api-route")
        .with_tag("apiRoute", "true")
        .with_tag("statusCode", status.to_string());
    pipeline.report_with(&error, &context);

    ErrorResponseBody {
        error: ErrorResponseDetail {
            message: error.message().to_string(),
            code: error.code(),
            kind,
        },
    }
}

/// Handle an error caught in a server action. The normalized error comes
/// back for the caller to propagate; the framework needs a thrown value to
/// trigger its own failure page.
pub fn handle_server_action_error(
    pipeline: &ErrorPipeline,
    candidate: impl Into<RawFailure>,
) -> AppError {
    let error = normalize(candidate).with_server_action();

    tracing::error!(code = %error.code(), "server action error: {error}");
    pipeline.report_with(
        &error,
        &server_tags(&error, "server-action").with_tag("serverAction", "true"),
    );
    error
}
