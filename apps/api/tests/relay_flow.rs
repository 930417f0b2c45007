//! End-to-end: shell → HTTP relay → mock completion API.

use std::sync::Arc;
use std::time::Duration;

use jdopt_api::llm_client::LlmClient;
use jdopt_api::optimize::prompts::build_optimize_prompt;
use jdopt_api::routes::build_app;
use jdopt_api::shell::relay::HttpRelayClient;
use jdopt_api::shell::store::MemoryStore;
use jdopt_api::shell::usage::QuotaExhausted;
use jdopt_api::shell::{Shell, ShellError, SubmitOutcome};
use jdopt_api::state::AppState;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const UPSTREAM_PATH: &str = "/openai/v1/chat/completions";

/// Serves the relay on an ephemeral port backed by `upstream`; returns its base URL.
async fn spawn_relay(upstream: &MockServer) -> String {
    let llm = LlmClient::new(
        format!("{}{UPSTREAM_PATH}", upstream.uri()),
        Some("test-key".to_string()),
        Duration::from_secs(5),
    )
    .expect("Failed to build LLM client");
    let app = build_app(AppState { llm: Arc::new(llm) });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let addr = listener.local_addr().expect("No local addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    format!("http://{addr}")
}

fn completion(text: &str) -> serde_json::Value {
    json!({
        "choices": [{"index": 0, "message": {"role": "assistant", "content": text}}],
        "usage": {"prompt_tokens": 100, "completion_tokens": 50}
    })
}

#[tokio::test]
async fn test_free_quota_flow_end_to_end() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(UPSTREAM_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("Join our team!")))
        .expect(2)
        .mount(&upstream)
        .await;

    let relay = HttpRelayClient::new(&spawn_relay(&upstream).await);
    let mut shell = Shell::new(MemoryStore::new());
    let jd = "Senior Engineer\n- 10+ years required\n- PhD preferred";
    shell.set_input(jd);

    assert_eq!(shell.submit(&relay).await, SubmitOutcome::Optimized);
    assert_eq!(shell.output(), "Join our team!");
    assert_eq!(shell.submit(&relay).await, SubmitOutcome::Optimized);
    assert_eq!(
        shell.submit(&relay).await,
        SubmitOutcome::Rejected(ShellError::QuotaExhausted(QuotaExhausted::FreeUsed))
    );

    let requests = upstream.received_requests().await.expect("recording on");
    assert_eq!(requests.len(), 2);
    let body: serde_json::Value =
        serde_json::from_slice(&requests[0].body).expect("upstream body is JSON");
    assert_eq!(body["messages"][0]["role"], "user");
    assert_eq!(body["messages"][0]["content"], build_optimize_prompt(jd));
}

#[tokio::test]
async fn test_upstream_failure_keeps_previous_output() {
    let upstream = MockServer::start().await;
    let relay = HttpRelayClient::new(&spawn_relay(&upstream).await);
    let mut shell = Shell::new(MemoryStore::new());
    shell.set_input("Warehouse associate");

    {
        let _ok = Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion("First rewrite")))
            .mount_as_scoped(&upstream)
            .await;
        assert_eq!(shell.submit(&relay).await, SubmitOutcome::Optimized);
    }

    {
        let _limited = Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_json(json!({
                "error": {"message": "Rate limit reached for model", "type": "tokens"}
            })))
            .mount_as_scoped(&upstream)
            .await;
        assert_eq!(shell.submit(&relay).await, SubmitOutcome::Failed);
    }

    assert_eq!(shell.output(), "First rewrite");
    assert_eq!(shell.error(), Some("Error: Rate limit reached for model"));
    assert_eq!(shell.usage().free_used, 1);
}

#[tokio::test]
async fn test_relay_rejects_bad_requests_over_http() {
    let upstream = MockServer::start().await;
    let base = spawn_relay(&upstream).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{base}/api/optimize"))
        .json(&json!({"somethingElse": "x"}))
        .send()
        .await
        .expect("request failed");
    assert_eq!(response.status().as_u16(), 400);

    let response = client
        .get(format!("{base}/api/optimize"))
        .send()
        .await
        .expect("request failed");
    assert_eq!(response.status().as_u16(), 405);
    let body: serde_json::Value = response.json().await.expect("JSON body");
    assert_eq!(body["error"], "Method not allowed");

    assert!(upstream
        .received_requests()
        .await
        .expect("recording on")
        .is_empty());
}
