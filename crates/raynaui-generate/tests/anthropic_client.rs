use raynaui_core::GenerationOptions;
use raynaui_generate::{
    AnthropicClient, CompletionClient, CompletionRequest, EngineConfig, GenerateError,
    GenerationEngine, build_prompts,
};
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> EngineConfig {
    EngineConfig {
        base_url: server.uri(),
        ..EngineConfig::default()
    }
    .with_api_key("sk-test")
}

#[tokio::test]
async fn posts_messages_request_with_auth_headers() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .and(header("x-api-key", "sk-test"))
        .and(header("anthropic-version", "2023-06-01"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "msg_1",
            "type": "message",
            "role": "assistant",
            "content": [{"type": "text", "text": "{\"name\":\"Badge\",\"description\":\"b\"}"}],
            "stop_reason": "end_turn"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let engine = GenerationEngine::new(config_for(&server)).expect("engine");
    let result = engine
        .generate_component("a badge", &GenerationOptions::DEFAULT)
        .await;

    assert_eq!(result.component().map(|c| c.name.as_str()), Some("Badge"));

    let received = server.received_requests().await.expect("recorded requests");
    let body: serde_json::Value = serde_json::from_slice(&received[0].body).expect("json body");
    assert_eq!(body["model"], "claude-3-5-sonnet-20241022");
    assert_eq!(body["max_tokens"], 4000);
    assert_eq!(body["messages"][0]["role"], "user");
    assert!(body["system"].as_str().unwrap_or_default().contains("RaynaUI"));
}

#[tokio::test]
async fn api_errors_carry_status_and_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "type": "error",
            "error": {"type": "authentication_error", "message": "invalid x-api-key"}
        })))
        .mount(&server)
        .await;

    let config = config_for(&server);
    let client = AnthropicClient::from_config(&config).expect("client");
    let request = CompletionRequest::new(
        &config,
        build_prompts("anything", &GenerationOptions::DEFAULT),
    );

    match client.complete(&request).await {
        Err(GenerateError::Api { status, message }) => {
            assert_eq!(status, 401);
            assert_eq!(message, "invalid x-api-key");
        }
        other => panic!("expected api error, got {other:?}"),
    }
}

#[tokio::test]
async fn api_failure_becomes_failed_result() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(529).set_body_string("overloaded"))
        .mount(&server)
        .await;

    let engine = GenerationEngine::new(config_for(&server)).expect("engine");
    let result = engine
        .generate_component("anything", &GenerationOptions::DEFAULT)
        .await;

    let error = result.error().expect("failure");
    assert!(error.contains("529"));
    assert!(error.contains("overloaded"));
}
