//! reelview: error pipeline for the Reelview movie discovery app
//!
//! One path for every failure: normalize the raw caught value into the
//! taxonomy, classify it for tagging, report it to the console channel and
//! the crash sinks, and hand consumers a user-safe message. See the module
//! docs under [`error`] for the individual stages.

use std::sync::Arc;

pub mod config;
pub mod error;
pub mod http;
pub mod logging;

#[cfg(test)]
mod tests;

pub use config::PipelineConfig;
pub use error::boundary::{ErrorBoundary, ErrorPipeline, Navigate};
pub use error::classify::{ErrorKind, classify, classify_code};
pub use error::normalize::{RawFailure, normalize};
pub use error::reporter::{CrashSink, Reporter, SentrySink};
pub use error::{AppError, ErrorCode, Result, Severity};
pub use http::{Connectivity, HttpFailure};

/// Wire the pipeline from configuration: reporter with the console gate and
/// (when a DSN is configured) the Sentry sink, installed as the process
/// default. The returned pipeline is ready for `install()`.
pub fn init_pipeline(config: &PipelineConfig) -> ErrorPipeline {
    let reporter = Arc::new(Reporter::new(config.max_recent_reports, config.console_enabled));
    if config.sentry_dsn.is_some() {
        reporter.add_sink(Arc::new(SentrySink::new(
            config.sentry_dsn.clone(),
            config.environment.clone(),
        )));
    }
    if !error::reporter::init_default_reporter(Arc::clone(&reporter)) {
        tracing::warn!("a default reporter is already installed; keeping the existing one");
    }
    ErrorPipeline::with_reporter(reporter)
}

/// One-call startup: logging subscriber, env config, default reporter, and
/// the pipeline value for installing the process hooks.
pub fn init() -> ErrorPipeline {
    logging::init();
    init_pipeline(&PipelineConfig::from_env())
}
