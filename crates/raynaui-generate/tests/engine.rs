use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use raynaui_core::{GenerationOptions, GenerationResult};
use raynaui_generate::{
    CompletionClient, CompletionRequest, CompletionResponse, ContentBlock, EngineConfig,
    GenerateError, GenerationEngine,
};

/// Replays canned replies in order and records every request it sees.
struct ScriptedClient {
    replies: Mutex<VecDeque<CompletionResponse>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedClient {
    fn new(replies: Vec<CompletionResponse>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
        })
    }

    fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().expect("lock").clone()
    }
}

#[async_trait]
impl CompletionClient for ScriptedClient {
    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, GenerateError> {
        self.requests.lock().expect("lock").push(request.clone());
        self.replies
            .lock()
            .expect("lock")
            .pop_front()
            .ok_or_else(|| GenerateError::UnexpectedContent("script exhausted".to_string()))
    }
}

fn text(reply: &str) -> CompletionResponse {
    CompletionResponse {
        content: vec![ContentBlock::Text {
            text: reply.to_string(),
        }],
        stop_reason: Some("end_turn".to_string()),
    }
}

fn engine(client: Arc<ScriptedClient>) -> GenerationEngine {
    GenerationEngine::with_client(EngineConfig::default().with_api_key("test-key"), client)
}

#[tokio::test]
async fn successful_reply_becomes_bundle() {
    let client = ScriptedClient::new(vec![text(
        "Sure!\n```json\n{\"name\":\"TestButton\",\"description\":\"A button\",\"variants\":[{\"name\":\"variant\",\"values\":[\"default\",\"secondary\"]}],\"dependencies\":[\"class-variance-authority\"]}\n```",
    )]);
    let engine = engine(client.clone());

    let result = engine
        .generate_component("a button", &GenerationOptions::DEFAULT)
        .await;

    let component = result.component().expect("generated");
    assert_eq!(component.name, "TestButton");
    assert_eq!(component.registry_dependencies, vec!["utils".to_string()]);
    assert_eq!(component.files[0].path, "components/ui/testbutton.tsx");
    assert!(component.files[0].content.contains("\"secondary-classes\""));
    assert_eq!(component.files.len(), 3);

    let requests = client.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].temperature, 0.7);
    assert_eq!(requests[0].max_tokens, 4000);
    assert!(requests[0].messages[0].content.contains("a button"));
}

#[tokio::test]
async fn reply_without_json_fails_with_no_files() {
    let client = ScriptedClient::new(vec![text("I cannot help with that.")]);
    let result = engine(client)
        .generate_component("anything", &GenerationOptions::DEFAULT)
        .await;

    assert!(!result.is_success());
    assert!(result.files().is_none());
    let error = result.error().expect("error message");
    assert!(error.contains("failed to parse AI response"));
}

#[tokio::test]
async fn non_text_reply_is_reported() {
    let client = ScriptedClient::new(vec![CompletionResponse {
        content: vec![ContentBlock::Other],
        stop_reason: None,
    }]);
    let result = engine(client)
        .generate_component("anything", &GenerationOptions::DEFAULT)
        .await;

    let error = result.error().expect("error message");
    assert!(error.contains("unexpected response type"));
}

#[tokio::test]
async fn batch_preserves_order_and_isolates_failures() {
    let client = ScriptedClient::new(vec![
        text("{\"name\":\"Alpha\",\"description\":\"a\"}"),
        text("no json here"),
        text("{\"name\":\"Gamma\",\"description\":\"g\"}"),
    ]);
    let engine = engine(client.clone());

    let results = engine
        .generate_multiple_components(&["first", "second", "third"], &GenerationOptions::DEFAULT)
        .await;

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].component().map(|c| c.name.as_str()), Some("Alpha"));
    assert!(matches!(results[1], GenerationResult::Failed { .. }));
    assert_eq!(results[2].component().map(|c| c.name.as_str()), Some("Gamma"));

    let seen: Vec<String> = client
        .requests()
        .iter()
        .map(|request| request.messages[0].content.clone())
        .collect();
    assert!(seen[0].contains("first"));
    assert!(seen[1].contains("second"));
    assert!(seen[2].contains("third"));
}

#[tokio::test]
async fn empty_batch_makes_no_calls() {
    let client = ScriptedClient::new(Vec::new());
    let results = engine(client.clone())
        .generate_multiple_components::<&str>(&[], &GenerationOptions::DEFAULT)
        .await;
    assert!(results.is_empty());
    assert!(client.requests().is_empty());
}
