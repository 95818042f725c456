//! Boundary integration: component boundaries and process-wide hooks
//!
//! Two entry points feed otherwise-uncaught failures into the pipeline. An
//! [`ErrorBoundary`] guards one subtree of the UI: it catches whatever a
//! child operation throws, enriches it with the component stack, reports it
//! once, and holds it until `reset`. An [`ErrorPipeline`] owns the
//! process-wide state: the panic hook (installed at most once per process)
//! and supervision of spawned tasks.

use std::panic::{AssertUnwindSafe, PanicHookInfo, catch_unwind};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::error::normalize::{RawFailure, normalize};
use crate::error::reporter::{Reporter, report_error};
use crate::error::ui::{ErrorContent, error_content};
use crate::error::{AppError, ErrorCode, ReportContext};

const REDIRECT_DELAY: Duration = Duration::from_secs(2);

type PanicHook = Box<dyn Fn(&PanicHookInfo<'_>) + Send + Sync + 'static>;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Navigation capability used for post-error redirects, injected so the
/// boundary has no dependency on any particular routing layer.
pub trait Navigate: Send + Sync {
    fn navigate(&self, target: &str);
}

/// The pipeline context: which reporter to use and whether the process-wide
/// hooks are installed. Clone freely; clones share state.
#[derive(Clone)]
pub struct ErrorPipeline {
    inner: Arc<PipelineInner>,
}

struct PipelineInner {
    reporter: Option<Arc<Reporter>>,
    installed: AtomicBool,
    previous_hook: Mutex<Option<PanicHook>>,
}

impl ErrorPipeline {
    /// Pipeline reporting through the process default reporter.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(PipelineInner {
                reporter: None,
                installed: AtomicBool::new(false),
                previous_hook: Mutex::new(None),
            }),
        }
    }

    /// Pipeline bound to a specific reporter.
    pub fn with_reporter(reporter: Arc<Reporter>) -> Self {
        Self {
            inner: Arc::new(PipelineInner {
                reporter: Some(reporter),
                installed: AtomicBool::new(false),
                previous_hook: Mutex::new(None),
            }),
        }
    }

    pub(crate) fn report(&self, error: &AppError) {
        match &self.inner.reporter {
            Some(reporter) => reporter.report(error),
            None => report_error(error),
        }
    }

    pub(crate) fn report_with(&self, error: &AppError, context: &ReportContext) {
        match &self.inner.reporter {
            Some(reporter) => reporter.report_with(error, Some(context)),
            None => {
                if let Some(reporter) = crate::error::reporter::default_reporter() {
                    reporter.report_with(error, Some(context));
                } else {
                    report_error(error);
                }
            }
        }
    }

    /// Normalize and report a caught value, exactly once. The shared entry
    /// point for everything that intercepts failures.
    pub fn handle_error(&self, candidate: impl Into<RawFailure>) -> AppError {
        let error = normalize(candidate);
        self.report(&error);
        error
    }

    /// Boundary variant of [`ErrorPipeline::handle_error`]: plain runtime
    /// failures caught during rendering become client errors, and the
    /// component stack is attached before the single report goes out.
    pub fn handle_boundary_error(
        &self,
        candidate: impl Into<RawFailure>,
        component_stack: &str,
    ) -> AppError {
        let error = match candidate.into() {
            RawFailure::Normalized(error) => error,
            RawFailure::Runtime(source) => AppError::client(
                source.message(),
                ErrorCode::RENDER_ERROR,
                None,
                Some(source),
            ),
            RawFailure::Text(text) => {
                AppError::client(text, ErrorCode::RENDER_ERROR, None, None)
            }
            other => normalize(other),
        };
        let error = error.with_component_stack(component_stack);
        self.report(&error);
        error
    }

    /// Install the process-wide panic hook. Idempotent: the first call
    /// installs, later calls are no-ops and return false, so a double
    /// installation can never double-report.
    pub fn install(&self) -> bool {
        if self.inner.installed.swap(true, Ordering::SeqCst) {
            return false;
        }
        let previous = std::panic::take_hook();
        *lock(&self.inner.previous_hook) = Some(previous);

        let pipeline = self.clone();
        std::panic::set_hook(Box::new(move |info| {
            pipeline.on_panic(info);
            if let Some(previous) = lock(&pipeline.inner.previous_hook).as_ref() {
                previous(info);
            }
        }));
        true
    }

    /// Remove the hook installed by [`ErrorPipeline::install`] and restore
    /// the previous one. Returns false when nothing was installed.
    pub fn uninstall(&self) -> bool {
        if !self.inner.installed.swap(false, Ordering::SeqCst) {
            return false;
        }
        match lock(&self.inner.previous_hook).take() {
            Some(previous) => std::panic::set_hook(previous),
            None => {
                let _ = std::panic::take_hook();
            }
        }
        true
    }

    pub fn is_installed(&self) -> bool {
        self.inner.installed.load(Ordering::SeqCst)
    }

    fn on_panic(&self, info: &PanicHookInfo<'_>) {
        let payload = info.payload();
        let message = if let Some(text) = payload.downcast_ref::<&str>() {
            (*text).to_string()
        } else if let Some(text) = payload.downcast_ref::<String>() {
            text.clone()
        } else {
            return self.handle_opaque_panic();
        };
        self.handle_error(RawFailure::Text(message));
    }

    fn handle_opaque_panic(&self) {
        self.handle_error(RawFailure::Opaque);
    }

    /// Supervise a spawned task: its `Err` outcome is normalized and
    /// reported through this pipeline, the async analog of an
    /// unhandled-rejection listener.
    pub fn watch<F, T, E>(&self, future: F) -> tokio::task::JoinHandle<Option<T>>
    where
        F: std::future::Future<Output = Result<T, E>> + Send + 'static,
        T: Send + 'static,
        E: Into<RawFailure> + Send + 'static,
    {
        let pipeline = self.clone();
        tokio::spawn(async move {
            match future.await {
                Ok(value) => Some(value),
                Err(err) => {
                    pipeline.handle_error(err);
                    None
                }
            }
        })
    }
}

impl Default for ErrorPipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Boundary state: either the subtree is healthy or it holds the error that
/// took it down. There is no terminal state; the boundary cycles between
/// the two for the life of the process.
#[derive(Debug)]
pub enum BoundaryState {
    Clear,
    Caught(AppError),
}

/// Guards one subtree of the UI. A failure in a child operation run through
/// [`ErrorBoundary::run`] is normalized, annotated with this boundary's
/// component stack, reported once, and held until [`ErrorBoundary::reset`].
pub struct ErrorBoundary {
    name: String,
    pipeline: ErrorPipeline,
    state: BoundaryState,
    on_reset: Option<Box<dyn Fn() + Send + Sync>>,
    fallback: Option<Box<dyn Fn(&AppError) -> ErrorContent + Send + Sync>>,
    navigator: Option<Arc<dyn Navigate>>,
    auto_redirect: bool,
}

impl ErrorBoundary {
    pub fn new(name: impl Into<String>, pipeline: ErrorPipeline) -> Self {
        Self {
            name: name.into(),
            pipeline,
            state: BoundaryState::Clear,
            on_reset: None,
            fallback: None,
            navigator: None,
            auto_redirect: false,
        }
    }

    /// Hook invoked on every reset, before the state transition.
    pub fn on_reset(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_reset = Some(Box::new(hook));
        self
    }

    /// Caller-supplied fallback renderer, replacing the default content.
    pub fn with_fallback(
        mut self,
        fallback: impl Fn(&AppError) -> ErrorContent + Send + Sync + 'static,
    ) -> Self {
        self.fallback = Some(Box::new(fallback));
        self
    }

    pub fn with_navigator(mut self, navigator: Arc<dyn Navigate>) -> Self {
        self.navigator = Some(navigator);
        self
    }

    pub fn with_auto_redirect(mut self, enabled: bool) -> Self {
        self.auto_redirect = enabled;
        self
    }

    /// Run a child operation under this boundary. While the boundary holds
    /// an error the child is not run at all, mirroring a subtree that
    /// renders its fallback instead of its children.
    pub fn run<T, E, F>(&mut self, child: F) -> Option<T>
    where
        F: FnOnce() -> Result<T, E>,
        E: Into<RawFailure>,
    {
        if matches!(self.state, BoundaryState::Caught(_)) {
            return None;
        }
        match catch_unwind(AssertUnwindSafe(child)) {
            Ok(Ok(value)) => Some(value),
            Ok(Err(err)) => {
                self.capture(err.into());
                None
            }
            Err(payload) => {
                self.capture(RawFailure::from_panic(payload));
                None
            }
        }
    }

    /// Normalize, annotate, report, store, in that order, so the reported
    /// snapshot already carries the component stack.
    fn capture(&mut self, raw: RawFailure) {
        let stack = format!("in <{}>", self.name);
        let error = self.pipeline.handle_boundary_error(raw, &stack);
        self.schedule_redirect(&error);
        self.state = BoundaryState::Caught(error);
    }

    fn schedule_redirect(&self, error: &AppError) {
        if !self.auto_redirect {
            return;
        }
        let Some(target) = error.metadata().redirect_to.clone() else {
            return;
        };
        let Some(navigator) = self.navigator.clone() else {
            return;
        };
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    tokio::time::sleep(REDIRECT_DELAY).await;
                    navigator.navigate(&target);
                });
            }
            Err(_) => {
                tracing::warn!(target = %target, "no async runtime; skipping error redirect");
            }
        }
    }

    pub fn state(&self) -> &BoundaryState {
        &self.state
    }

    pub fn error(&self) -> Option<&AppError> {
        match &self.state {
            BoundaryState::Caught(error) => Some(error),
            BoundaryState::Clear => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.state, BoundaryState::Caught(_))
    }

    /// Content to render while failed: the caller-supplied fallback when
    /// present, otherwise the default per-kind content with the error's own
    /// user message and a single retry action.
    pub fn fallback_content(&self) -> Option<ErrorContent> {
        let error = self.error()?;
        Some(match &self.fallback {
            Some(render) => render(error),
            None => error_content(error, None),
        })
    }

    /// Return to the healthy state, invoking the reset hook first.
    pub fn reset(&mut self) {
        if let Some(hook) = &self.on_reset {
            hook();
        }
        self.state = BoundaryState::Clear;
    }
}
