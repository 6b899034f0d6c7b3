use std::time::Duration;

use llm_service::{OllamaClient, OllamaConfig, OllamaError};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> OllamaClient {
    let cfg = OllamaConfig {
        base_url: server.uri(),
        generate_timeout: Duration::from_secs(5),
        probe_timeout: Duration::from_secs(2),
    };
    OllamaClient::new(cfg).expect("client should build against mock server")
}

#[tokio::test]
async fn list_models_returns_installed_tags() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tags"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "models": [
                { "name": "llama3.2:latest", "size": 2019393792u64 },
                { "name": "mistral:7b" }
            ]
        })))
        .mount(&server)
        .await;

    let models = client_for(&server).list_models().await.unwrap();
    assert_eq!(models.len(), 2);
    assert_eq!(models[0].name, "llama3.2:latest");
    assert_eq!(models[0].size, Some(2019393792));
    assert_eq!(models[1].name, "mistral:7b");
}

#[tokio::test]
async fn list_models_treats_missing_field_as_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tags"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&server)
        .await;

    let models = client_for(&server).list_models().await.unwrap();
    assert!(models.is_empty());
}

#[tokio::test]
async fn generate_sends_non_streaming_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .and(body_partial_json(serde_json::json!({
            "model": "llama3.2:latest",
            "prompt": "Hello",
            "stream": false
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "response": "Hi there!",
            "done": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    let text = client_for(&server)
        .generate("llama3.2:latest", "Hello")
        .await
        .unwrap();
    assert_eq!(text, "Hi there!");
}

#[tokio::test]
async fn generate_surfaces_upstream_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(500).set_body_string("model blew up"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .generate("llama3.2:latest", "Hello")
        .await
        .unwrap_err();
    match err {
        OllamaError::HttpStatus {
            status, snippet, ..
        } => {
            assert_eq!(status.as_u16(), 500);
            assert!(snippet.contains("model blew up"));
        }
        other => panic!("expected HttpStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn generate_times_out_when_deadline_exceeded() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "response": "late" }))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let cfg = OllamaConfig {
        base_url: server.uri(),
        generate_timeout: Duration::from_millis(200),
        probe_timeout: Duration::from_secs(2),
    };
    let client = OllamaClient::new(cfg).unwrap();

    let err = client.generate("llama3.2:latest", "Hello").await.unwrap_err();
    assert!(err.is_timeout(), "expected Timeout, got {err:?}");
}

#[tokio::test]
async fn probe_distinguishes_up_from_down() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tags"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"models": []})))
        .mount(&server)
        .await;
    assert!(client_for(&server).probe().await.is_ok());

    // A server that answers with an error status is not healthy.
    let broken = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tags"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&broken)
        .await;
    assert!(client_for(&broken).probe().await.is_err());
}

#[test]
fn new_rejects_invalid_endpoint() {
    let cfg = OllamaConfig {
        base_url: "not-a-url".into(),
        ..OllamaConfig::default()
    };
    assert!(matches!(
        OllamaClient::new(cfg),
        Err(OllamaError::InvalidEndpoint(_))
    ));
}
