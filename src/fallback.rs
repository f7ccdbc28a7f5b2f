use std::sync::Arc;
use std::time::Duration;

use crate::error::{InquisterError, Result};
use crate::models::{Content, GenerateRequest, Part};
use crate::transport::Transport;

/// Reply when Gemini answers without any usable text, or the call fails.
pub const NO_RESPONSE_REPLY: &str = "❌ Koi response nahi mila";
/// Reply when Gemini does not answer within the configured timeout.
pub const SERVICE_UNAVAILABLE_REPLY: &str =
    "❌ Service abhi available nahi hai, thori der baad try karein";

fn system_prompt(name: &str) -> String {
    format!(
        r#"Tum ek smart aur friendly AI ho jiska naam "{name}" hai.
Tum hamesha Urdu Roman me baat karte ho (English mix allowed).
Tumhara style natural, polite, aur thoda modern ho.
Kisi bhi sawal ka jawab concise, friendly aur tameez se do.
Kabhi unnecessarily lambi biography ya achievements mat do.
Agar user specific skills/achievements maange, tab medium detail me batao.
Agar user kisi specific shakhsi ya contact ke baare me poochy to concise reply do.
Kabhi ye mat kehna ke tum ek language model ho."#
    )
}

/// Asks Gemini for anything the local profile cannot answer.
pub struct ExternalFallback {
    tx: Arc<dyn Transport>,
    assistant_name: String,
    timeout: Duration,
}

impl ExternalFallback {
    pub fn new(tx: Arc<dyn Transport>, assistant_name: String, timeout: Duration) -> Self {
        Self {
            tx,
            assistant_name,
            timeout,
        }
    }

    /// System instruction first, then the user turn, as ordered parts of one content.
    pub fn build_request(&self, message: &str) -> GenerateRequest {
        GenerateRequest {
            contents: vec![Content {
                role: None,
                parts: vec![
                    Part::text(system_prompt(&self.assistant_name)),
                    Part::text(format!("User: {message}\n{}:", self.assistant_name)),
                ],
            }],
        }
    }

    pub async fn ask(&self, api_key: &str, message: &str) -> Result<String> {
        let request = self.build_request(message);
        let response = tokio::time::timeout(self.timeout, self.tx.generate(api_key, &request))
            .await
            .map_err(|_| InquisterError::Timeout {
                seconds: self.timeout.as_secs(),
            })??;

        response
            .first_text()
            .map(str::to_string)
            .ok_or(InquisterError::EmptyResponse)
    }

    /// Like [`ask`](Self::ask), but every failure becomes reply text.
    pub async fn reply(&self, api_key: &str, message: &str) -> String {
        match self.ask(api_key, message).await {
            Ok(text) => text,
            Err(e) if e.is_timeout() => {
                tracing::warn!("Gemini call timed out: {}", e);
                SERVICE_UNAVAILABLE_REPLY.to_string()
            }
            Err(InquisterError::EmptyResponse) => {
                tracing::warn!("Gemini returned no candidate text");
                NO_RESPONSE_REPLY.to_string()
            }
            Err(e) => {
                tracing::error!("Gemini call failed: {}", e);
                NO_RESPONSE_REPLY.to_string()
            }
        }
    }
}
