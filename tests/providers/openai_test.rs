//! OpenAI-compatible provider wire format and HTTP tests.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use talentscout::providers::openai::{build_request, parse_response, OpenAiCompatProvider};
use talentscout::providers::{CompletionRequest, LlmProvider, Message, ProviderError};

fn interview_request() -> CompletionRequest {
    CompletionRequest {
        messages: vec![
            Message::system("You are TalentScout."),
            Message::user("Hi, I'm Ana."),
            Message::assistant("Welcome, Ana!"),
        ],
        temperature: Some(0.7),
        max_tokens: Some(1024),
    }
}

fn completion_body(content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "model": "llama3.1",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 42, "completion_tokens": 9, "total_tokens": 51}
    })
}

fn provider(base_url: &str, api_key: Option<&str>) -> OpenAiCompatProvider {
    OpenAiCompatProvider::new(
        base_url,
        "llama3.1",
        api_key.map(str::to_owned),
        Some(Duration::from_secs(5)),
    )
    .expect("client should build")
}

#[test]
fn build_request_maps_roles_and_sampling() {
    let req = build_request("mistral", &interview_request());
    assert_eq!(req.model, "mistral");
    assert_eq!(req.temperature, Some(0.7));
    assert_eq!(req.max_tokens, Some(1024));
    assert!(!req.stream);

    let roles: Vec<_> = req.messages.iter().map(|m| m.role.as_str()).collect();
    assert_eq!(roles, ["system", "user", "assistant"]);
    assert_eq!(req.messages[1].content, "Hi, I'm Ana.");
}

#[test]
fn parse_response_reads_first_choice_and_usage() {
    let body = completion_body("What's your email?").to_string();
    let resp = parse_response(&body).expect("should parse");
    assert_eq!(resp.content, "What's your email?");
    assert_eq!(resp.model, "llama3.1");
    assert_eq!(resp.usage.input_tokens, 42);
    assert_eq!(resp.usage.output_tokens, 9);
}

#[test]
fn parse_response_tolerates_missing_content_and_usage() {
    let body = json!({
        "choices": [{"message": {"role": "assistant", "content": null}}]
    })
    .to_string();
    let resp = parse_response(&body).expect("should parse");
    assert_eq!(resp.content, "");
    assert_eq!(resp.usage.input_tokens, 0);
}

#[test]
fn parse_response_rejects_empty_choices() {
    let err = parse_response(r#"{"choices": []}"#).expect_err("should fail");
    assert!(matches!(err, ProviderError::Parse(_)));

    let err = parse_response("not json").expect_err("should fail");
    assert!(matches!(err, ProviderError::Parse(_)));
}

#[test]
fn trailing_slash_is_trimmed_from_base_url() {
    let provider = provider("http://localhost:11434/v1/", None);
    assert_eq!(provider.base_url, "http://localhost:11434/v1");
    assert_eq!(provider.model_id(), "llama3.1");
}

#[tokio::test]
async fn complete_posts_chat_completions() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_partial_json(json!({
            "model": "llama3.1",
            "max_tokens": 1024,
            "stream": false
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("Hello!")))
        .expect(1)
        .mount(&server)
        .await;

    let provider = provider(&format!("{}/v1", server.uri()), None);
    let resp = provider
        .complete(interview_request())
        .await
        .expect("completion should succeed");
    assert_eq!(resp.content, "Hello!");

    let received = server
        .received_requests()
        .await
        .expect("request recording is on");
    assert_eq!(received.len(), 1);
    assert!(received[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn api_key_is_sent_as_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("ok")))
        .expect(1)
        .mount(&server)
        .await;

    let provider = provider(&format!("{}/v1", server.uri()), Some("test-key"));
    provider
        .complete(interview_request())
        .await
        .expect("authorized completion should succeed");
}

#[tokio::test]
async fn error_status_becomes_http_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("model   llama3.1 not loaded"))
        .mount(&server)
        .await;

    let provider = provider(&format!("{}/v1", server.uri()), None);
    let err = provider
        .complete(interview_request())
        .await
        .expect_err("500 should fail");
    match err {
        ProviderError::HttpStatus { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "model llama3.1 not loaded");
        }
        other => panic!("expected HttpStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn slow_backend_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(completion_body("late"))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let provider = OpenAiCompatProvider::new(
        &format!("{}/v1", server.uri()),
        "llama3.1",
        None,
        Some(Duration::from_millis(100)),
    )
    .expect("client should build");
    let err = provider
        .complete(interview_request())
        .await
        .expect_err("request should time out");
    assert!(matches!(err, ProviderError::Request(_)));
}

#[tokio::test]
async fn availability_probe_checks_models_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/models"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .mount(&server)
        .await;

    let up = provider(&format!("{}/v1", server.uri()), None);
    assert!(up.is_available().await);

    let wrong_prefix = provider(&format!("{}/api", server.uri()), None);
    assert!(!wrong_prefix.is_available().await);
}
