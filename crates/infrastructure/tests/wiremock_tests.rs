//! Integration tests for the classifier adapter and the batch pipeline using WireMock
//!
//! The classification service is mocked over HTTP so the full path
//! adapter -> analysis service -> batch pipeline runs without a model server.

use std::sync::Arc;

use ai_classifier::ClassifierConfig;
use application::{
    ApplicationError,
    ports::ClassifierPort,
    services::{AnalysisService, BatchPipeline},
};
use domain::{BatchInput, BatchReport, BatchStatus, Classification, FailureKind, Report};
use infrastructure::{HttpClassifierAdapter, RetryConfig};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_string_contains, method, path},
};

// =============================================================================
// Test Helpers
// =============================================================================

fn fast_retry(max_retries: u32) -> RetryConfig {
    RetryConfig {
        initial_delay_ms: 1,
        max_delay_ms: 5,
        multiplier: 2.0,
        max_retries,
        jitter_factor: 0.0,
    }
}

fn adapter_for(server: &MockServer, max_retries: u32) -> HttpClassifierAdapter {
    let config = ClassifierConfig {
        timeout_ms: 2000,
        ..ClassifierConfig::with_base_url(server.uri())
    };
    HttpClassifierAdapter::new(config, fast_retry(max_retries)).expect("Failed to create adapter")
}

fn spam_response() -> serde_json::Value {
    serde_json::json!({
        "predicted_class": 1,
        "probabilities": [0.2, 0.8]
    })
}

async fn mount_default_spam(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/predict"))
        .respond_with(ResponseTemplate::new(200).set_body_json(spam_response()))
        .with_priority(10)
        .mount(server)
        .await;
}

// =============================================================================
// Adapter Tests
// =============================================================================

mod adapter_tests {
    use super::*;

    #[tokio::test]
    async fn classify_success() {
        let mock_server = MockServer::start().await;
        mount_default_spam(&mock_server).await;

        let verdict = adapter_for(&mock_server, 0).classify("hello").await.unwrap();
        assert_eq!(verdict.predicted, Classification::Spam);
    }

    #[tokio::test]
    async fn retries_transient_server_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/predict"))
            .respond_with(ResponseTemplate::new(503))
            .up_to_n_times(1)
            .with_priority(1)
            .expect(1)
            .mount(&mock_server)
            .await;
        mount_default_spam(&mock_server).await;

        let verdict = adapter_for(&mock_server, 2).classify("hello").await.unwrap();
        assert_eq!(verdict.predicted, Classification::Spam);
    }

    #[tokio::test]
    async fn does_not_retry_rejection() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/predict"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_json(serde_json::json!({"error": "Empty text input"})),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let err = adapter_for(&mock_server, 3).classify(" ").await.unwrap_err();
        assert!(matches!(err, ApplicationError::ClassifierRejected(_)));
    }

    #[tokio::test]
    async fn exhausted_retries_report_unavailable() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/predict"))
            .respond_with(ResponseTemplate::new(500))
            .expect(3)
            .mount(&mock_server)
            .await;

        let err = adapter_for(&mock_server, 2).classify("x").await.unwrap_err();
        assert!(matches!(err, ApplicationError::ClassifierUnavailable(_)));
    }

    #[tokio::test]
    async fn health_reflects_server() {
        let mock_server = MockServer::start().await;
        mount_default_spam(&mock_server).await;
        assert!(adapter_for(&mock_server, 0).is_healthy().await);
    }
}

// =============================================================================
// End-to-end Batch Tests
// =============================================================================

mod batch_tests {
    use super::*;

    fn service_for(server: &MockServer) -> Arc<AnalysisService> {
        Arc::new(AnalysisService::new(Arc::new(adapter_for(server, 0))))
    }

    #[tokio::test]
    async fn batch_isolates_failing_item() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/predict"))
            .and(body_string_contains("third"))
            .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
                "error": "Prediction failed",
                "details": "boom"
            })))
            .with_priority(1)
            .mount(&mock_server)
            .await;
        mount_default_spam(&mock_server).await;

        let input = BatchInput::from_json(
            r#"{"emails": [
                {"subject": "one", "body": "first\nSPF: pass\nDKIM: pass\nDMARC: reject"},
                {"subject": "two", "body": "second"},
                {"subject": "three", "body": "third"},
                {"subject": "four", "body": "fourth"},
                {"body": "fifth", "sender": "x@example.com"}
            ]}"#,
        )
        .unwrap();

        let mut job = BatchPipeline::new(service_for(&mock_server))
            .start(input.emails)
            .unwrap();
        let mut progress = job.take_progress_receiver().unwrap();
        let result = job.run().await;

        let indices: Vec<_> = result.items.iter().map(|e| e.index).collect();
        assert_eq!(indices, vec![0, 1, 3, 4]);
        assert_eq!(result.failures[0].kind, FailureKind::ClassifierUnavailable);
        assert!(result.failures[0].message.contains("boom"));
        assert_eq!(result.status(), BatchStatus::PartiallyFailed);

        assert!(result.items[0].decision.overridden());
        assert_eq!(
            result.items[1].decision.classification(),
            Classification::Spam
        );

        let mut last = None;
        let mut count = 0;
        while let Ok(event) = progress.try_recv() {
            count += 1;
            last = Some(event);
        }
        assert_eq!(count, 6);
        assert!(last.unwrap().is_complete());

        let report = BatchReport::project(&result);
        assert_eq!(report.rows.len(), 4);
        assert_eq!(report.summary.failed, 1);
        assert_eq!(report.summary.overridden, 1);
        assert_eq!(report.rows[3].subject, "N/A");
        assert_eq!(report.rows[3].sender, "x@example.com");
    }

    #[tokio::test]
    async fn unreachable_classifier_fails_every_item() {
        let config = ClassifierConfig::with_base_url("http://127.0.0.1:1");
        let adapter = HttpClassifierAdapter::new(config, RetryConfig::disabled()).unwrap();
        let service = Arc::new(AnalysisService::new(Arc::new(adapter)));

        let input = BatchInput::from_json(r#"{"emails": [{"body": "a"}, {"body": "b"}]}"#).unwrap();
        let result = BatchPipeline::new(service)
            .start(input.emails)
            .unwrap()
            .run()
            .await;

        assert!(result.items.is_empty());
        assert_eq!(result.status(), BatchStatus::Failed);
    }

    #[tokio::test]
    async fn single_report_from_live_adapter() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/predict"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "predicted_class": 1,
                "probabilities": [0.25, 0.75],
                "blacklist_weight": 0.4
            })))
            .mount(&mock_server)
            .await;

        let analyzed = service_for(&mock_server)
            .analyze("SPF: fail\nWin money now")
            .await
            .unwrap();
        let report = Report::project(&analyzed);

        assert_eq!(report.final_classification, "Spam");
        assert_eq!(report.spam_probability, "75.00%");
        assert_eq!(report.blacklist_weight, "0.40");
        assert_eq!(report.subject, "N/A");
        assert_eq!(report.sha256.len(), 64);
    }
}
