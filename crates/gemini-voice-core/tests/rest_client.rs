#![allow(clippy::tests_outside_test_module, reason = "integration tests live in tests/ dir")]
#![allow(clippy::expect_used, reason = "panics are the assertion mechanism in integration tests")]

use std::sync::Arc;
use std::time::Duration;

use gemini_voice_core::pipeline::build_request;
use gemini_voice_core::{BatchDriver, GeminiRestClient, GenerationClient, ItemParameters, StaticCredentials};
use gemini_voice_types::{ApiConfig, InputItem, ItemDefaults};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> ApiConfig {
    ApiConfig { base_url: server.uri(), api_version: "v1beta".to_string(), timeout_secs: 30 }
}

fn audio_body() -> serde_json::Value {
    serde_json::json!({
        "candidates": [{
            "content": {
                "parts": [
                    {"text": "Hello from mock!"},
                    {"inlineData": {"mimeType": "audio/mpeg", "data": "SUQzBAAAAAAA"}}
                ],
                "role": "model"
            },
            "finishReason": "STOP"
        }],
        "usageMetadata": {"promptTokenCount": 4, "candidatesTokenCount": 9, "totalTokenCount": 13}
    })
}

#[tokio::test]
async fn test_generate_content_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-test:generateContent"))
        .and(header("x-goog-api-key", "AIza-test"))
        .and(body_partial_json(serde_json::json!({
            "contents": [{"role": "user", "parts": [{"text": "Hi"}]}],
            "tools": [{"googleSearchRetrieval": {}}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(audio_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = GeminiRestClient::new(&config_for(&server)).expect("client builds");
    let request = build_request("Hi", "gemini-test", None, true).expect("valid request");

    let body = client
        .generate_content("AIza-test", "gemini-test", &request)
        .await
        .expect("200 should be Ok");

    assert_eq!(body["candidates"][0]["finishReason"], "STOP");
}

#[tokio::test]
async fn test_response_envelope_is_unwrapped() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-test:generateContent"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"response": audio_body()})),
        )
        .mount(&server)
        .await;

    let client = GeminiRestClient::new(&config_for(&server)).expect("client builds");
    let request = build_request("Hi", "models/gemini-test", None, false).expect("valid request");

    let body = client
        .generate_content("AIza-test", "models/gemini-test", &request)
        .await
        .expect("200 should be Ok");

    assert!(body.get("response").is_none());
    assert!(body.get("candidates").is_some());
}

#[tokio::test]
async fn test_error_status_maps_to_provider_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_json(serde_json::json!({
            "error": {"code": 429, "message": "Resource exhausted", "status": "RESOURCE_EXHAUSTED"}
        })))
        .mount(&server)
        .await;

    let client = GeminiRestClient::new(&config_for(&server)).expect("client builds");
    let request = build_request("Hi", "gemini-test", None, false).expect("valid request");

    let err = client
        .generate_content("AIza-test", "gemini-test", &request)
        .await
        .expect_err("429 should be Err");

    assert_eq!(err.status, Some(429));
    assert_eq!(err.message, "Resource exhausted");
    assert!(err.body.as_deref().unwrap_or_default().contains("RESOURCE_EXHAUSTED"));
}

#[tokio::test]
async fn test_empty_error_body_uses_status_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = GeminiRestClient::new(&config_for(&server)).expect("client builds");
    let request = build_request("Hi", "gemini-test", None, false).expect("valid request");

    let err = client
        .generate_content("AIza-test", "gemini-test", &request)
        .await
        .expect_err("503 should be Err");

    assert_eq!(err.status, Some(503));
    assert_eq!(err.message, "HTTP 503");
}

#[tokio::test]
async fn test_timeout_is_provider_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(audio_body())
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let http_client = reqwest::Client::builder()
        .timeout(Duration::from_millis(200))
        .build()
        .expect("client builds");
    let client = GeminiRestClient::with_client(http_client, &config_for(&server));
    let request = build_request("Hi", "gemini-test", None, false).expect("valid request");

    let err = client
        .generate_content("AIza-test", "gemini-test", &request)
        .await
        .expect_err("timeout should be Err");

    assert!(err.status.is_none());
    assert!(err.message.contains("timed out"), "unexpected message: {}", err.message);
}

#[tokio::test]
async fn test_driver_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-1.5-flash-preview-native-audio-dialog:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(audio_body()))
        .expect(2)
        .mount(&server)
        .await;

    let client = GeminiRestClient::new(&config_for(&server)).expect("client builds");
    let items = vec![
        InputItem::from_value(serde_json::json!({"prompt": "one"})),
        InputItem::from_value(serde_json::json!({"prompt": "two"})),
    ];
    let parameters = ItemParameters::new(items, ItemDefaults::default());

    let outputs = BatchDriver::new(Arc::new(client), Arc::new(StaticCredentials::new("AIza-test")))
        .run(&parameters)
        .await
        .expect("batch succeeds");

    assert_eq!(outputs.len(), 2);
    for record in &outputs {
        assert_eq!(record.json["aiTextResponse"], "Hello from mock!");
        let audio = record.audio().expect("audio attached");
        assert_eq!(audio.file_name, "ai_response.mp3");
        assert_eq!(audio.file_size, 9);
    }
}
