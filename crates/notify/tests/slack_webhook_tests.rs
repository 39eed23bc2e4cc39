//! Integration tests for Slack webhook delivery.
//!
//! A wiremock server stands in for the webhook so the real HTTP path is
//! exercised: payload shape, status reporting and transport failures.

use billing_notify::{ChannelError, DeliveryOutcome, Notifier};
use reqwest::StatusCode;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, header, method, path};
use tracing_test::traced_test;
use wiremock::{Mock, MockServer, ResponseTemplate};

const MESSAGE: &str = "this month's total billing is 42.50 USD\naccount id: 123456789012";

fn webhook(server: &MockServer) -> Url {
    Url::parse(&format!("{}/services/T000/B000/XXXX", server.uri())).unwrap()
}

/// Test that the message is posted once as `{"text": ...}` JSON.
#[tokio::test]
#[traced_test]
async fn test_posts_text_payload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/services/T000/B000/XXXX"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({ "text": MESSAGE })))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = Notifier::slack(webhook(&server)).post(MESSAGE).await;

    assert!(outcome.is_delivered());
    assert_eq!(outcome.status(), Some(StatusCode::OK));
    assert_eq!(outcome.to_string(), "slack: 200 OK");
    assert!(logs_contain("Notification delivered"));
    assert!(logs_contain("status=200"));
}

/// Test that an error status is still a delivery with its status reported.
#[tokio::test]
#[traced_test]
async fn test_error_status_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no_service"))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = Notifier::slack(webhook(&server)).post(MESSAGE).await;

    assert!(matches!(
        outcome,
        DeliveryOutcome::Delivered {
            channel: "slack",
            ..
        }
    ));
    assert_eq!(outcome.status(), Some(StatusCode::NOT_FOUND));
    assert!(logs_contain("Notification answered with error status"));
    assert!(logs_contain("status=404"));
    logs_assert(|lines: &[&str]| {
        match lines.iter().filter(|line| line.contains("WARN")).count() {
            1 => Ok(()),
            n => Err(format!("expected one warning, got {n}")),
        }
    });
}

/// Test that a refused connection becomes a failed outcome instead of an error.
#[tokio::test]
#[traced_test]
async fn test_transport_failure_is_swallowed() {
    // Reserve a port, then release it so nothing is listening there.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let url = Url::parse(&format!("http://{addr}/hook")).unwrap();
    let outcome = Notifier::slack(url).post(MESSAGE).await;

    match outcome {
        DeliveryOutcome::Failed { channel, error } => {
            assert_eq!(channel, "slack");
            let ChannelError::Http(inner) = error;
            assert!(inner.is_connect() || inner.is_request());
        }
        other => panic!("expected a failed outcome, got {other:?}"),
    }
    assert!(logs_contain("Failed to send notification"));
}
