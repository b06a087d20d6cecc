use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Extension;
use futures_util::stream;
use metrics_exporter_prometheus::PrometheusBuilder;
use serde_json::{json, Value};
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use talent_ai::domain::ChatMessage;
use talent_ai::gemini::{ChunkStream, GenerationError, GenerativeModel};
use talent_ai::mock::MockDirectory;
use talent_ai_api::infra::AppState;
use talent_ai_api::routes::talent_routes;
use tower::ServiceExt;

struct ScriptedModel {
    reply: String,
}

#[async_trait]
impl GenerativeModel for ScriptedModel {
    async fn generate(&self, _prompt: &str, _json_mode: bool) -> Result<String, GenerationError> {
        Ok(self.reply.clone())
    }

    async fn stream_chat(
        &self,
        _history: &[ChatMessage],
    ) -> Result<ChunkStream, GenerationError> {
        let chunks: Vec<Result<String, GenerationError>> = self
            .reply
            .split_inclusive(' ')
            .map(|piece| Ok(piece.to_string()))
            .collect();
        Ok(Box::pin(stream::iter(chunks)))
    }
}

fn build_router(model: Option<Arc<dyn GenerativeModel>>) -> axum::Router {
    let recorder = PrometheusBuilder::new().build_recorder();
    let state = AppState {
        readiness: Arc::new(AtomicBool::new(true)),
        metrics: Arc::new(recorder.handle()),
        model,
        organization: "Caramel".to_string(),
        directory: Arc::new(Mutex::new(MockDirectory::seeded(11))),
    };
    talent_routes().layer(Extension(state))
}

async fn json_body(response: axum::response::Response) -> Value {
    let body = to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("body");
    serde_json::from_slice(&body).expect("json")
}

#[tokio::test]
async fn health_reports_ok() {
    let router = build_router(None);
    let response = router
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = json_body(response).await;
    assert_eq!(payload.get("status"), Some(&json!("ok")));
}

#[tokio::test]
async fn directory_uses_default_counts() {
    let router = build_router(None);
    let response = router
        .oneshot(
            Request::builder()
                .uri("/api/v1/directory")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = json_body(response).await;
    assert_eq!(payload["employees"].as_array().map(Vec::len), Some(50));
    assert_eq!(payload["roles"].as_array().map(Vec::len), Some(10));
    assert_eq!(payload["programs"].as_array().map(Vec::len), Some(8));

    let first = &payload["employees"][0];
    assert!(first.get("potentialScore").is_some(), "camelCase wire names");
    assert!(first.get("developmentPlan").is_some());
}

#[tokio::test]
async fn directory_honors_query_overrides() {
    let router = build_router(None);
    let response = router
        .oneshot(
            Request::builder()
                .uri("/api/v1/directory?employees=3&roles=1&programs=2")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = json_body(response).await;
    assert_eq!(payload["employees"].as_array().map(Vec::len), Some(3));
    assert_eq!(payload["roles"].as_array().map(Vec::len), Some(1));
    assert_eq!(payload["programs"].as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn succession_candidates_work_without_a_model() {
    let router = build_router(None);
    let mut directory = MockDirectory::seeded(4);
    let employees = directory.employees(20);
    let role = directory.roles(1).remove(0);

    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/succession/candidates")
                .header("content-type", "application/json")
                .body(Body::from(
                    serde_json::to_vec(&json!({ "role": role, "employees": employees }))
                        .expect("serialize request"),
                ))
                .expect("request"),
        )
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = json_body(response).await;
    let candidates = payload["candidates"].as_array().expect("candidates array");
    assert!(candidates.len() <= 5);
}

#[tokio::test]
async fn ai_routes_answer_unavailable_without_credential() {
    let router = build_router(None);
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/chat")
                .header("content-type", "application/json")
                .body(Body::from(
                    serde_json::to_vec(&json!({ "message": "hello" })).expect("serialize request"),
                ))
                .expect("request"),
        )
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let payload = json_body(response).await;
    assert!(payload.get("error").is_some());
}

#[tokio::test]
async fn chat_returns_the_full_transcript() {
    let router = build_router(Some(Arc::new(ScriptedModel {
        reply: "Succession coverage looks healthy.".to_string(),
    })));

    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/chat")
                .header("content-type", "application/json")
                .body(Body::from(
                    serde_json::to_vec(&json!({
                        "message": "how are our succession plans?",
                        "history": [
                            {
                                "id": "m1",
                                "sender": "user",
                                "text": "hi",
                                "timestamp": "2025-06-02T09:00:00Z"
                            },
                            {
                                "id": "m2",
                                "sender": "bot",
                                "text": "hello",
                                "timestamp": "2025-06-02T09:00:05Z"
                            }
                        ]
                    }))
                    .expect("serialize request"),
                ))
                .expect("request"),
        )
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = json_body(response).await;
    let transcript = payload["transcript"].as_array().expect("transcript array");
    assert_eq!(transcript.len(), 4);
    assert_eq!(transcript[3]["sender"], json!("bot"));
    assert_eq!(
        transcript[3]["text"],
        json!("Succession coverage looks healthy.")
    );
}

#[tokio::test]
async fn metrics_endpoint_renders_prometheus_text() {
    let router = build_router(None);
    let response = router
        .oneshot(
            Request::builder()
                .uri("/metrics")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("text/plain"));
}
