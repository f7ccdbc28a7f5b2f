#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tower::ServiceExt;

use inquister::error::{InquisterError, Result};
use inquister::fallback::ExternalFallback;
use inquister::handlers::{AppState, router};
use inquister::models::{AskResponse, GenerateRequest, GenerateResponse};
use inquister::profile::Profile;
use inquister::service::ReplyService;
use inquister::transport::Transport;

pub const ASK_PATH: &str = "/api/ask";
pub const EMAIL: &str = "abdul@example.com";

pub enum Outcome {
    Text(&'static str),
    NetworkError,
    Empty,
    Slow(Duration),
}

/// Transport stand-in that counts calls and answers with a fixed outcome
pub struct StubTransport {
    outcome: Outcome,
    calls: AtomicUsize,
}

impl StubTransport {
    pub fn new(outcome: Outcome) -> Arc<Self> {
        Arc::new(Self {
            outcome,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for StubTransport {
    async fn generate(&self, _api_key: &str, _req: &GenerateRequest) -> Result<GenerateResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.outcome {
            Outcome::Text(text) => Ok(GenerateResponse::from_text(*text)),
            Outcome::NetworkError => Err(InquisterError::Network(
                "error sending request: connection refused".to_string(),
            )),
            Outcome::Empty => Ok(GenerateResponse::default()),
            Outcome::Slow(delay) => {
                tokio::time::sleep(*delay).await;
                Ok(GenerateResponse::from_text("too late"))
            }
        }
    }
}

pub fn profile() -> Profile {
    let mut profile = Profile::builtin().expect("built-in profile");
    profile.contact.email = Some(EMAIL.to_string());
    profile
}

pub fn app_with_timeout(
    api_key: Option<&str>,
    transport: Arc<StubTransport>,
    timeout: Duration,
) -> Router {
    let fallback = ExternalFallback::new(transport, "Inquister".to_string(), timeout);
    let service = ReplyService::new(Arc::new(profile()), api_key.map(str::to_string), fallback);
    router(AppState::new(service), ASK_PATH)
}

pub fn app(api_key: Option<&str>, transport: Arc<StubTransport>) -> Router {
    app_with_timeout(api_key, transport, Duration::from_secs(5))
}

pub async fn post_raw(app: Router, body: impl Into<Body>) -> (StatusCode, AskResponse) {
    let req = Request::builder()
        .method("POST")
        .uri(ASK_PATH)
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap();
    let resp = app.oneshot(req).await.expect("request");
    let status = resp.status();
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("read body");
    let parsed: AskResponse = serde_json::from_slice(&body).expect("parse JSON reply");
    (status, parsed)
}

pub async fn ask(app: Router, message: &str) -> (StatusCode, AskResponse) {
    post_raw(app, serde_json::json!({ "message": message }).to_string()).await
}
