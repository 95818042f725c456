//! Fallback content for error UI
//!
//! The UI picks an icon/title/description/action quadruple per error kind
//! and pairs it with the error's own user message. Callers can override any
//! field.

use crate::error::AppError;
use crate::error::classify::{ErrorKind, classify};

/// Everything a fallback view needs to render one error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContent {
    pub icon: String,
    pub title: String,
    pub description: String,
    pub message: String,
    pub action_label: String,
}

/// Field-wise overrides applied on top of the per-kind defaults.
#[derive(Debug, Clone, Default)]
pub struct ErrorContentOverrides {
    pub icon: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub message: Option<String>,
    pub action_label: Option<String>,
}

/// The per-kind quadruple, without the message (that comes from the error
/// itself).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindContent {
    pub icon: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub action_label: &'static str,
}

/// Default content for an error kind.
pub fn kind_content(kind: ErrorKind) -> KindContent {
    match kind {
        ErrorKind::ClientError => KindContent {
            icon: "🐛",
            title: "Client error",
            description: "Please refresh the page.",
            action_label: "Refresh",
        },
        ErrorKind::ApiError => KindContent {
            icon: "🔧",
            title: "API error",
            description: "The API server ran into a problem. Please try again shortly.",
            action_label: "Try again",
        },
        ErrorKind::NetworkError => KindContent {
            icon: "📡",
            title: "Network error",
            description: "Check your internet connection.",
            action_label: "Try again",
        },
        ErrorKind::UnknownError => KindContent {
            icon: "❓",
            title: "Unknown error",
            description: "An unexpected problem occurred. Refresh the page or contact support.",
            action_label: "Refresh",
        },
    }
}

/// Resolve the full content for one error: classify, pick the kind's
/// defaults, take the error's user message, then apply overrides.
pub fn error_content(error: &AppError, overrides: Option<&ErrorContentOverrides>) -> ErrorContent {
    let base = kind_content(classify(error));
    let user_message = error.user_message();

    let pick = |field: Option<&String>, default: String| -> String {
        field.cloned().unwrap_or(default)
    };
    let overrides = overrides.cloned().unwrap_or_default();

    ErrorContent {
        icon: pick(overrides.icon.as_ref(), base.icon.to_string()),
        title: pick(overrides.title.as_ref(), base.title.to_string()),
        description: pick(overrides.description.as_ref(), base.description.to_string()),
        message: pick(overrides.message.as_ref(), user_message),
        action_label: pick(overrides.action_label.as_ref(), base.action_label.to_string()),
    }
}
