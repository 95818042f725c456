//! Tests for the reporting fan-out

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;

    use crate::error::reporter::{
        CrashReport, CrashSink, MemorySink, Reporter, init_default_reporter,
    };
    use crate::error::{AppError, ErrorCode, ReportContext, Severity, UserInfo};
    use crate::logging::LogLevel;

    struct FailingSink;

    #[async_trait]
    impl CrashSink for FailingSink {
        fn name(&self) -> &str {
            "failing"
        }

        async fn deliver(&self, _report: &CrashReport) -> Result<(), String> {
            Err("remote exploded".to_string())
        }
    }

    struct PanickingSink;

    #[async_trait]
    impl CrashSink for PanickingSink {
        fn name(&self) -> &str {
            "panicking"
        }

        async fn deliver(&self, _report: &CrashReport) -> Result<(), String> {
            panic!("sink blew up mid-delivery");
        }
    }

    async fn wait_for_delivery(sink: &MemorySink, count: usize) {
        for _ in 0..100 {
            if sink.delivered().len() >= count {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("sink never received {count} report(s)");
    }

    #[tokio::test]
    async fn report_survives_a_failing_sink() {
        let memory = Arc::new(MemorySink::new());
        let reporter = Reporter::new(10, true);
        reporter.add_sink(Arc::new(FailingSink));
        reporter.add_sink(Arc::clone(&memory) as Arc<dyn CrashSink>);

        // must return normally despite the failing sink
        reporter.report(&AppError::unknown("boom", None));

        // the local channel recorded it synchronously
        assert_eq!(reporter.recent_reports().len(), 1);
        // and the healthy sink still got its copy
        wait_for_delivery(&memory, 1).await;
    }

    #[tokio::test]
    async fn report_survives_a_panicking_sink() {
        let _hook = crate::tests::panic_hook_guard();
        let memory = Arc::new(MemorySink::new());
        let reporter = Reporter::new(10, false);
        reporter.add_sink(Arc::new(PanickingSink));
        reporter.add_sink(Arc::clone(&memory) as Arc<dyn CrashSink>);

        reporter.report(&AppError::unknown("boom", None));

        assert_eq!(reporter.recent_reports().len(), 1);
        wait_for_delivery(&memory, 1).await;
    }

    #[tokio::test]
    async fn reports_carry_kind_and_code_tags() {
        let memory = Arc::new(MemorySink::new());
        let reporter = Reporter::new(10, false);
        reporter.add_sink(Arc::clone(&memory) as Arc<dyn CrashSink>);

        let err = AppError::api(
            "not found",
            ErrorCode::API_NOT_FOUND,
            Some(404),
            Some("/movie/1".into()),
            Some("GET".into()),
            None,
            None,
        );
        reporter.report(&err);
        wait_for_delivery(&memory, 1).await;

        let report = &memory.delivered()[0];
        assert_eq!(report.tags.get("errorKind").map(String::as_str), Some("ApiError"));
        assert_eq!(report.tags.get("errorCode").map(String::as_str), Some("2004"));
        assert_eq!(report.tags.get("statusCode").map(String::as_str), Some("404"));
        assert_eq!(report.level, Severity::Info);
        assert_eq!(report.user_message, err.user_message());
    }

    #[tokio::test]
    async fn instance_context_wins_over_call_site_context() {
        let memory = Arc::new(MemorySink::new());
        let reporter = Reporter::new(10, false);
        reporter.add_sink(Arc::clone(&memory) as Arc<dyn CrashSink>);

        let err = AppError::unknown("boom", None)
            .with_report_context(ReportContext::new().with_tag("feature", "detail-page"));
        let call_site = ReportContext::new()
            .with_tag("feature", "ad-hoc")
            .with_tag("caller", "query-layer");
        reporter.report_with(&err, Some(&call_site));
        wait_for_delivery(&memory, 1).await;

        let report = &memory.delivered()[0];
        assert_eq!(report.tags.get("feature").map(String::as_str), Some("detail-page"));
        // non-colliding call-site tags survive
        assert_eq!(report.tags.get("caller").map(String::as_str), Some("query-layer"));
    }

    #[tokio::test]
    async fn user_identity_precedence() {
        let memory = Arc::new(MemorySink::new());
        let reporter = Reporter::new(10, false);
        reporter.add_sink(Arc::clone(&memory) as Arc<dyn CrashSink>);
        reporter.set_user(Some(UserInfo::with_id("ambient")));

        // ambient user applies when nothing closer is present
        reporter.report(&AppError::unknown("boom", None));
        // call-site user overrides the ambient one
        let call_site = ReportContext::new().with_user(UserInfo::with_id("call-site"));
        reporter.report_with(&AppError::unknown("boom again", None), Some(&call_site));
        wait_for_delivery(&memory, 2).await;

        let delivered = memory.delivered();
        assert_eq!(delivered[0].user.as_ref().and_then(|u| u.id.as_deref()), Some("ambient"));
        assert_eq!(delivered[1].user.as_ref().and_then(|u| u.id.as_deref()), Some("call-site"));
    }

    #[tokio::test]
    async fn breadcrumbs_ride_along() {
        let memory = Arc::new(MemorySink::new());
        let reporter = Reporter::new(10, false);
        reporter.add_sink(Arc::clone(&memory) as Arc<dyn CrashSink>);

        reporter.add_breadcrumb("navigation", "opened /movie/603", LogLevel::Info);
        reporter.add_breadcrumb("query", "fetching recommendations", LogLevel::Debug);
        reporter.report(&AppError::unknown("boom", None));
        wait_for_delivery(&memory, 1).await;

        let report = &memory.delivered()[0];
        assert_eq!(report.breadcrumbs.len(), 2);
        assert_eq!(report.breadcrumbs[0].category, "navigation");
        assert_eq!(report.breadcrumbs[1].message, "fetching recommendations");
    }

    #[test]
    fn aggregation_counts_repeated_patterns() {
        let reporter = Reporter::new(10, false);
        reporter.report(&AppError::unknown("flaky widget", None));
        reporter.report(&AppError::unknown("flaky widget", None));
        reporter.report(&AppError::unknown("different widget", None));

        let aggregation = reporter.aggregation();
        assert_eq!(aggregation.len(), 2);
        let entry = aggregation
            .get("UnknownError:flaky widget")
            .expect("aggregated entry");
        assert_eq!(entry.count, 2);
        assert!(entry.last_occurrence >= entry.first_occurrence);
    }

    #[test]
    fn recent_reports_are_bounded() {
        let reporter = Reporter::new(3, false);
        for n in 0..5 {
            reporter.report(&AppError::unknown(format!("error {n}"), None));
        }
        let recent = reporter.recent_reports();
        assert_eq!(recent.len(), 3);
        assert_eq!(recent[0].message, "error 2");
        assert_eq!(recent[2].message, "error 4");
    }

    #[test]
    fn report_without_a_runtime_keeps_the_local_record() {
        let memory = Arc::new(MemorySink::new());
        let reporter = Reporter::new(10, false);
        reporter.add_sink(Arc::clone(&memory) as Arc<dyn CrashSink>);

        // no tokio runtime here: remote dispatch is skipped, nothing panics
        reporter.report(&AppError::unknown("boom", None));
        assert_eq!(reporter.recent_reports().len(), 1);
        assert!(memory.delivered().is_empty());
    }

    #[test]
    fn default_reporter_installs_once() {
        let first = init_default_reporter(Arc::new(Reporter::new(5, false)));
        let second = init_default_reporter(Arc::new(Reporter::new(5, false)));
        assert!(first);
        assert!(!second);
    }
}
