//! Tests for the normalization funnel

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;

    use crate::error::normalize::{RawFailure, normalize};
    use crate::error::{AppError, ErrorCode, ErrorDetails};
    use crate::http::{Connectivity, HttpFailure};
    use crate::tests::connectivity_guard;

    #[test]
    fn normalization_is_idempotent() {
        let _net = connectivity_guard();
        let err = AppError::unknown("already typed", None);
        let stamp = err.metadata().timestamp;
        let location = err.metadata().source_location.clone();

        let normalized = normalize(err);
        // identity: same construction instant and site, no re-wrapping
        assert_eq!(normalized.metadata().timestamp, stamp);
        assert_eq!(normalized.metadata().source_location, location);
        assert_eq!(normalized.code(), ErrorCode::UNKNOWN_ERROR);
        assert!(normalized.original().is_none());
    }

    #[test]
    fn normalization_is_total() {
        let _net = connectivity_guard();
        let candidates = vec![
            RawFailure::Text(String::new()),
            RawFailure::Text("plain string error".to_string()),
            RawFailure::Opaque,
            RawFailure::Runtime(crate::error::SourceError::summary("io", "nothing matched")),
            RawFailure::Http(HttpFailure::new("")),
            RawFailure::Normalized(AppError::network_offline()),
        ];
        for candidate in candidates {
            // must neither panic nor produce anything outside the taxonomy
            let err = normalize(candidate);
            assert!(!err.user_message().is_empty());
        }
    }

    #[test]
    fn plain_string_becomes_unknown_with_that_message() {
        let _net = connectivity_guard();
        let err = normalize("something odd happened");
        assert_eq!(err.code(), ErrorCode::UNKNOWN_ERROR);
        assert_eq!(err.message(), "something odd happened");
    }

    #[test]
    fn opaque_candidates_get_the_fixed_message() {
        let _net = connectivity_guard();
        let err = normalize(RawFailure::Opaque);
        assert_eq!(err.code(), ErrorCode::UNKNOWN_ERROR);
        assert_eq!(err.message(), "Unknown error occurred");
    }

    #[test]
    fn http_404_without_provider_signature_maps_to_generic_not_found() {
        let _net = connectivity_guard();
        let failure = HttpFailure::new("Request failed with status code 404")
            .with_status(404)
            .with_base_url("https://example.com/api")
            .with_endpoint("/movies/1")
            .with_method("get");
        let err = normalize(failure);
        assert_eq!(err.code(), ErrorCode::API_NOT_FOUND);
        assert!(err.user_message().contains("found"));
        match err.details() {
            ErrorDetails::Api { status, endpoint, method, .. } => {
                assert_eq!(*status, Some(404));
                assert_eq!(endpoint.as_deref(), Some("/movies/1"));
                assert_eq!(method.as_deref(), Some("GET"));
            }
            other => panic!("expected api details, got {other:?}"),
        }
    }

    #[test]
    fn http_status_map_covers_the_interesting_statuses() {
        let _net = connectivity_guard();
        let cases = [
            (400, ErrorCode::API_BAD_REQUEST),
            (401, ErrorCode::API_UNAUTHORIZED),
            (403, ErrorCode::API_FORBIDDEN),
            (404, ErrorCode::API_NOT_FOUND),
            (429, ErrorCode::API_RATE_LIMIT),
            (500, ErrorCode::API_SERVER_ERROR),
            (503, ErrorCode::API_SERVER_ERROR),
            (418, ErrorCode::API_ERROR),
        ];
        for (status, expected) in cases {
            let err = normalize(HttpFailure::new("failed").with_status(status));
            assert_eq!(err.code(), expected, "status {status}");
        }
    }

    #[test]
    fn aborted_request_becomes_a_network_timeout_with_url_and_duration() {
        let _net = connectivity_guard();
        let failure = HttpFailure::new("timeout of 5000ms exceeded")
            .with_endpoint("/movie/popular")
            .with_timeout(Duration::from_secs(5))
            .aborted();
        let err = normalize(failure);
        assert_eq!(err.code(), ErrorCode::NETWORK_TIMEOUT);
        assert_eq!(err.metadata().additional.get("timeout"), Some(&json!(5000)));
        match err.details() {
            ErrorDetails::Network { url, .. } => {
                assert_eq!(url.as_deref(), Some("/movie/popular"));
            }
            other => panic!("expected network details, got {other:?}"),
        }
    }

    #[test]
    fn tmdb_payload_from_tmdb_endpoint_maps_through_the_adapter() {
        let _net = connectivity_guard();
        let failure = HttpFailure::new("Request failed with status code 404")
            .with_status(404)
            .with_base_url("https://api.themoviedb.org/3")
            .with_endpoint("/movie/999999")
            .with_body(json!({
                "status_code": 34,
                "status_message": "Resource not found",
                "success": false,
            }));
        let err = normalize(failure);
        assert_eq!(err.code(), ErrorCode::API_TMDB_NOT_FOUND);
        assert_eq!(err.message(), "Resource not found");
        match err.details() {
            ErrorDetails::Api { service: Some(service), .. } => {
                assert_eq!(service.service, "TMDB");
                assert_eq!(service.code, "34");
                assert_eq!(service.message, "Resource not found");
            }
            other => panic!("expected provider details, got {other:?}"),
        }
    }

    #[test]
    fn malformed_tmdb_payload_falls_through_to_the_status_map() {
        let _net = connectivity_guard();
        // right endpoint, but the envelope is missing `success`
        let failure = HttpFailure::new("Request failed with status code 404")
            .with_status(404)
            .with_base_url("https://api.themoviedb.org/3")
            .with_endpoint("/movie/999999")
            .with_body(json!({
                "status_code": 34,
                "status_message": "Resource not found",
            }));
        let err = normalize(failure);
        assert_eq!(err.code(), ErrorCode::API_NOT_FOUND);
        match err.details() {
            ErrorDetails::Api { service, .. } => assert!(service.is_none()),
            other => panic!("expected api details, got {other:?}"),
        }
    }

    #[test]
    fn openai_quota_message_maps_to_quota_exceeded_not_rate_limit() {
        let _net = connectivity_guard();
        let failure = HttpFailure::new("Request failed with status code 429")
            .with_status(429)
            .with_base_url("https://api.openai.com/v1")
            .with_endpoint("/chat/completions")
            .with_body(json!({
                "error": {
                    "message": "You exceeded your current quota",
                    "type": "insufficient_quota",
                }
            }));
        let err = normalize(failure);
        assert_eq!(err.code(), ErrorCode::API_OPENAI_QUOTA_EXCEEDED);
        match err.details() {
            ErrorDetails::Api { service: Some(service), .. } => {
                assert_eq!(service.service, "OpenAI");
                // no provider code in the payload: the detected class stands in
                assert_eq!(service.code, "quota_exceeded");
            }
            other => panic!("expected provider details, got {other:?}"),
        }
    }

    #[test]
    fn openai_rate_limit_without_quota_phrasing_stays_rate_limit() {
        let _net = connectivity_guard();
        let failure = HttpFailure::new("Request failed with status code 429")
            .with_status(429)
            .with_base_url("https://api.openai.com/v1")
            .with_endpoint("/chat/completions")
            .with_body(json!({
                "error": {
                    "message": "Rate limit reached for requests",
                    "type": "rate_limit_error",
                }
            }));
        let err = normalize(failure);
        assert_eq!(err.code(), ErrorCode::API_OPENAI_RATE_LIMIT);
    }

    #[test]
    fn offline_wins_over_everything_else() {
        let _net = connectivity_guard();
        Connectivity::set_online(false);
        // a fully-formed HTTP failure still resolves to offline
        let failure = HttpFailure::new("Request failed with status code 500")
            .with_status(500)
            .with_base_url("https://api.themoviedb.org/3")
            .with_endpoint("/movie/popular");
        let err = normalize(failure);
        Connectivity::set_online(true);
        assert_eq!(err.code(), ErrorCode::NETWORK_OFFLINE);
    }

    #[test]
    fn offline_does_not_rewrap_already_normalized_errors() {
        let _net = connectivity_guard();
        Connectivity::set_online(false);
        let err = normalize(AppError::unknown("typed before offline", None));
        Connectivity::set_online(true);
        assert_eq!(err.code(), ErrorCode::UNKNOWN_ERROR);
    }

    #[test]
    fn runtime_errors_are_sniffed_for_network_phrasing() {
        let _net = connectivity_guard();
        let err = normalize(RawFailure::from_error(std::io::Error::other("Failed to fetch")));
        assert_eq!(err.code(), ErrorCode::NETWORK_ERROR);
        assert!(err.original().is_some());

        let err = normalize(RawFailure::from_error(std::io::Error::other(
            "connection Timeout while reading",
        )));
        assert_eq!(err.code(), ErrorCode::NETWORK_TIMEOUT);

        let err = normalize(RawFailure::from_error(std::io::Error::other("permission denied")));
        assert_eq!(err.code(), ErrorCode::UNKNOWN_ERROR);
        assert_eq!(err.original().map(|s| s.message()), Some("permission denied".to_string()));
    }

    #[test]
    fn reqwest_errors_enter_through_the_http_shape() {
        let _net = connectivity_guard();
        let client = reqwest::Client::new();
        let request_error = client.get("notaurl").build().expect_err("invalid url");
        let err = normalize(request_error);
        assert_eq!(err.code(), ErrorCode::API_ERROR);
        assert!(err.original().is_some());
    }
}
