//! Environment-driven configuration
//!
//! Configuration comes from the process environment (with `.env` support in
//! development). Nothing here is hot-reloaded; the pipeline reads its
//! config once at startup.

use url::Url;

/// Settings for wiring up the error pipeline.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Deployment environment name, e.g. "development" or "production".
    pub environment: String,
    /// Sentry ingest endpoint; absent disables the remote sink.
    pub sentry_dsn: Option<String>,
    /// How many recent crash reports to keep in memory.
    pub max_recent_reports: usize,
    /// Whether the console channel is active.
    pub console_enabled: bool,
}

impl PipelineConfig {
    /// Read configuration from the environment. `APP_ENV` picks the
    /// environment (defaulting by build profile), `SENTRY_DSN` enables the
    /// remote sink, `ERROR_REPORT_BUFFER` sizes the recent-report ring, and
    /// `ERROR_CONSOLE_LOG` overrides the console gate.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let environment = std::env::var("APP_ENV").unwrap_or_else(|_| {
            if cfg!(debug_assertions) { "development" } else { "production" }.to_string()
        });

        let sentry_dsn = std::env::var("SENTRY_DSN").ok().and_then(|dsn| {
            match Url::parse(&dsn) {
                Ok(_) => Some(dsn),
                Err(err) => {
                    tracing::warn!(error = %err, "ignoring malformed SENTRY_DSN");
                    None
                }
            }
        });

        let max_recent_reports = std::env::var("ERROR_REPORT_BUFFER")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(50);

        let console_enabled = std::env::var("ERROR_CONSOLE_LOG")
            .ok()
            .map(|value| value == "1" || value.eq_ignore_ascii_case("true"))
            .unwrap_or(environment != "production");

        Self { environment, sentry_dsn, max_recent_reports, console_enabled }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            sentry_dsn: None,
            max_recent_reports: 50,
            console_enabled: true,
        }
    }
}
