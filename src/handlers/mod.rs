/// HTTP surface for Inquister
pub mod ask;

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use std::any::Any;
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

use crate::error::SERVER_ERROR_REPLY;
use crate::models::AskResponse;
use crate::service::ReplyService;

pub use ask::ask;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ReplyService>,
}

impl AppState {
    pub fn new(service: ReplyService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

/// Build the application router: the ask endpoint at `ask_path` plus `/health`.
pub fn router(state: AppState, ask_path: &str) -> Router {
    let router = Router::new()
        .route(ask_path, post(ask))
        .route("/health", get(health))
        .with_state(state);
    with_layers(router)
}

fn with_layers(router: Router) -> Router {
    router
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
}

async fn health() -> &'static str {
    "ok"
}

fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!("Handler panicked: {}", detail);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(AskResponse::new(SERVER_ERROR_REPLY)),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    async fn boom() -> &'static str {
        panic!("exploded")
    }

    #[tokio::test]
    async fn panics_become_generic_500_replies() {
        let app = with_layers(Router::new().route("/boom", get(boom)));

        let resp = app
            .oneshot(Request::builder().uri("/boom").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let parsed: AskResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(parsed.response, SERVER_ERROR_REPLY);
    }
}
