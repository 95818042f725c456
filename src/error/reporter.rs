//! Error reporting: local console channel plus remote crash sinks
//!
//! Reporting is a fan-out with one hard rule: it never throws. The console
//! channel is synchronous and always runs in non-production builds; remote
//! sinks are fire-and-forget behind [`CrashSink`], and a sink's own failure
//! is logged to the fallback channel and swallowed, never re-thrown and never
//! re-reported.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::error::classify::{ErrorKind, classify};
use crate::error::{AppError, ErrorCode, ReportContext, Severity, UserInfo};
use crate::logging::LogLevel;

const MAX_BREADCRUMBS: usize = 50;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// One step of what the user was doing before the error, attached to every
/// report.
#[derive(Debug, Clone, Serialize)]
pub struct Breadcrumb {
    pub timestamp: DateTime<Utc>,
    pub category: String,
    pub message: String,
    pub level: LogLevel,
}

/// The normalized envelope delivered to every crash sink.
#[derive(Debug, Clone, Serialize)]
pub struct CrashReport {
    pub report_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub kind: ErrorKind,
    pub code: ErrorCode,
    pub level: Severity,
    pub message: String,
    pub user_message: String,
    pub tags: HashMap<String, String>,
    pub extra: HashMap<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserInfo>,
    pub breadcrumbs: Vec<Breadcrumb>,
}

/// Remote crash-reporting capability. The pipeline has no compile-time
/// dependency on a specific vendor SDK; anything that can swallow a
/// [`CrashReport`] can be plugged in.
#[async_trait]
pub trait CrashSink: Send + Sync {
    fn name(&self) -> &str;

    async fn deliver(&self, report: &CrashReport) -> Result<(), String>;
}

/// Sink that ships report envelopes to a Sentry-compatible ingest endpoint.
pub struct SentrySink {
    endpoint: Option<String>,
    environment: String,
    client: reqwest::Client,
}

impl SentrySink {
    pub fn new(dsn: Option<String>, environment: impl Into<String>) -> Self {
        Self { endpoint: dsn, environment: environment.into(), client: reqwest::Client::new() }
    }
}

#[async_trait]
impl CrashSink for SentrySink {
    fn name(&self) -> &str {
        "sentry"
    }

    async fn deliver(&self, report: &CrashReport) -> Result<(), String> {
        let Some(endpoint) = self.endpoint.as_deref() else {
            return Err("sentry DSN not configured".to_string());
        };
        let envelope = serde_json::json!({
            "environment": self.environment,
            "report": report,
        });
        let response = self
            .client
            .post(endpoint)
            .json(&envelope)
            .send()
            .await
            .map_err(|err| err.to_string())?;
        response.error_for_status().map(|_| ()).map_err(|err| err.to_string())
    }
}

/// In-memory sink for tests and local development.
#[derive(Default)]
pub struct MemorySink {
    delivered: Mutex<Vec<CrashReport>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn delivered(&self) -> Vec<CrashReport> {
        lock(&self.delivered).clone()
    }
}

#[async_trait]
impl CrashSink for MemorySink {
    fn name(&self) -> &str {
        "memory"
    }

    async fn deliver(&self, report: &CrashReport) -> Result<(), String> {
        lock(&self.delivered).push(report.clone());
        Ok(())
    }
}

/// Occurrence bookkeeping for one error pattern (kind + message).
#[derive(Debug, Clone, Serialize)]
pub struct ErrorAggregation {
    pub kind: ErrorKind,
    pub first_occurrence: DateTime<Utc>,
    pub last_occurrence: DateTime<Utc>,
    pub count: usize,
}

/// The reporting fan-out. One instance per process is the normal setup (see
/// [`init_default_reporter`]); construction is cheap enough for tests to
/// build their own.
pub struct Reporter {
    console_enabled: bool,
    max_recent: usize,
    sinks: Mutex<Vec<Arc<dyn CrashSink>>>,
    recent: Mutex<VecDeque<CrashReport>>,
    breadcrumbs: Mutex<VecDeque<Breadcrumb>>,
    aggregation: Mutex<HashMap<String, ErrorAggregation>>,
    user: Mutex<Option<UserInfo>>,
}

impl Reporter {
    pub fn new(max_recent: usize, console_enabled: bool) -> Self {
        Self {
            console_enabled,
            max_recent,
            sinks: Mutex::new(Vec::new()),
            recent: Mutex::new(VecDeque::with_capacity(max_recent)),
            breadcrumbs: Mutex::new(VecDeque::with_capacity(MAX_BREADCRUMBS)),
            aggregation: Mutex::new(HashMap::new()),
            user: Mutex::new(None),
        }
    }

    pub fn add_sink(&self, sink: Arc<dyn CrashSink>) {
        lock(&self.sinks).push(sink);
    }

    /// Identity attached to subsequent reports that carry no user of their
    /// own.
    pub fn set_user(&self, user: Option<UserInfo>) {
        *lock(&self.user) = user;
    }

    pub fn add_breadcrumb(
        &self,
        category: impl Into<String>,
        message: impl Into<String>,
        level: LogLevel,
    ) {
        let mut trail = lock(&self.breadcrumbs);
        if trail.len() >= MAX_BREADCRUMBS {
            trail.pop_front();
        }
        trail.push_back(Breadcrumb {
            timestamp: Utc::now(),
            category: category.into(),
            message: message.into(),
            level,
        });
    }

    /// Report an error: console entry, recent/aggregation bookkeeping, then
    /// fire-and-forget delivery to every sink. Returns immediately; never
    /// panics.
    pub fn report(&self, error: &AppError) {
        self.report_with(error, None);
    }

    /// [`Reporter::report`] with ad hoc call-site context. The error's own
    /// context wins over the call-site context on key collision.
    pub fn report_with(&self, error: &AppError, context: Option<&ReportContext>) {
        let report = self.build_report(error, context);
        self.log_console(error, &report);

        {
            let mut recent = lock(&self.recent);
            if recent.len() >= self.max_recent {
                recent.pop_front();
            }
            recent.push_back(report.clone());
        }
        self.update_aggregation(&report);
        self.dispatch(report);
    }

    pub fn recent_reports(&self) -> Vec<CrashReport> {
        lock(&self.recent).iter().cloned().collect()
    }

    pub fn aggregation(&self) -> HashMap<String, ErrorAggregation> {
        lock(&self.aggregation).clone()
    }

    fn build_report(&self, error: &AppError, call_site: Option<&ReportContext>) -> CrashReport {
        let kind = classify(error);
        let instance = error.report_context();

        let mut tags = HashMap::new();
        tags.insert("errorKind".to_string(), kind.to_string());
        tags.insert("errorCode".to_string(), error.code().to_string());
        let mut extra = HashMap::new();
        let mut user = lock(&self.user).clone();

        if let Some(call_site) = call_site {
            tags.extend(call_site.tags.clone());
            extra.extend(call_site.extra.clone());
            if let Some(call_user) = &call_site.user {
                user = Some(call_user.clone());
            }
        }
        // instance context last: it wins on collision
        tags.extend(instance.tags);
        extra.extend(instance.extra);
        if let Some(instance_user) = instance.user {
            user = Some(instance_user);
        }

        CrashReport {
            report_id: Uuid::new_v4(),
            created_at: Utc::now(),
            kind,
            code: error.code(),
            level: instance.level.unwrap_or_else(|| error.severity()),
            message: error.message().to_string(),
            user_message: error.user_message(),
            tags,
            extra,
            user,
            breadcrumbs: lock(&self.breadcrumbs).iter().cloned().collect(),
        }
    }

    fn log_console(&self, error: &AppError, report: &CrashReport) {
        if !self.console_enabled {
            return;
        }
        tracing::error!(
            code = %error.code(),
            name = error.kind_name(),
            severity = %error.severity(),
            kind = %report.kind,
            source_location = error.metadata().source_location.as_deref().unwrap_or("unknown"),
            metadata = %serde_json::to_string(error.metadata()).unwrap_or_default(),
            original = %error
                .original()
                .map_or_else(|| "none".to_string(), |source| source.message()),
            "{error}"
        );
    }

    fn update_aggregation(&self, report: &CrashReport) {
        let key = format!("{}:{}", report.kind, report.message);
        let mut aggregation = lock(&self.aggregation);
        match aggregation.get_mut(&key) {
            Some(entry) => {
                entry.count += 1;
                entry.last_occurrence = report.created_at;
            }
            None => {
                aggregation.insert(
                    key,
                    ErrorAggregation {
                        kind: report.kind,
                        first_occurrence: report.created_at,
                        last_occurrence: report.created_at,
                        count: 1,
                    },
                );
            }
        }
    }

    fn dispatch(&self, report: CrashReport) {
        let sinks: Vec<Arc<dyn CrashSink>> = lock(&self.sinks).clone();
        if sinks.is_empty() {
            return;
        }
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                // one task per sink: a sink that hangs or panics cannot
                // starve the others, and its failure is logged and
                // swallowed and never re-reported, or one bad sink would
                // feed the pipeline forever
                let report = Arc::new(report);
                for sink in sinks {
                    let report = Arc::clone(&report);
                    handle.spawn(async move {
                        if let Err(message) = sink.deliver(&report).await {
                            tracing::warn!(
                                sink = sink.name(),
                                error = %message,
                                "crash sink delivery failed"
                            );
                        }
                    });
                }
            }
            Err(_) => {
                tracing::warn!("no async runtime available; crash report kept locally only");
            }
        }
    }
}

static DEFAULT_REPORTER: OnceLock<Arc<Reporter>> = OnceLock::new();

/// Install the process-wide default reporter. Returns false if one is
/// already installed (the first one wins).
pub fn init_default_reporter(reporter: Arc<Reporter>) -> bool {
    DEFAULT_REPORTER.set(reporter).is_ok()
}

pub fn default_reporter() -> Option<Arc<Reporter>> {
    DEFAULT_REPORTER.get().cloned()
}

/// Report through the default reporter; falls back to a bare log line when
/// none is installed yet.
pub fn report_error(error: &AppError) {
    match default_reporter() {
        Some(reporter) => reporter.report(error),
        None => {
            tracing::error!(code = %error.code(), "unreported error (no reporter installed): {error}");
        }
    }
}
