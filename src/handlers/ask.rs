use axum::{Json, body::Bytes, extract::State};
use serde::Deserialize;

use super::AppState;
use crate::error::{InquisterError, Result};
use crate::models::{AskRequest, AskResponse};

/// `POST /api/ask`: resolve one message into a reply.
///
/// Always answers 200 with `{"response": ...}`, soft errors included. Only a
/// body that is not JSON at all yields a 500.
pub async fn ask(State(state): State<AppState>, body: Bytes) -> Result<Json<AskResponse>> {
    let request = parse_request(&body)?;
    let resolution = state.service.resolve(&request.message).await;
    Ok(Json(AskResponse::new(resolution.into_reply())))
}

/// Invalid JSON is an error; valid JSON of the wrong shape is an empty message.
fn parse_request(body: &[u8]) -> Result<AskRequest> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(AskRequest::default());
    }
    let value: serde_json::Value = serde_json::from_slice(body).map_err(|e| {
        InquisterError::Internal(format!("Request body is not valid JSON: {e}"))
    })?;
    // serde reads a JSON array as a struct in field order; only objects carry `message`
    match value {
        serde_json::Value::Object(_) => Ok(AskRequest::deserialize(value).unwrap_or_default()),
        _ => Ok(AskRequest::default()),
    }
}
