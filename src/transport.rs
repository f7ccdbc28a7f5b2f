use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::config::GeminiConfig;
use crate::error::{InquisterError, Result};
use crate::models::{GenerateRequest, GenerateResponse};

#[cfg(test)]
use mockall::automock;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    async fn generate(&self, api_key: &str, req: &GenerateRequest) -> Result<GenerateResponse>;
}

/// Single-shot HTTP transport for the Gemini `generateContent` endpoint.
pub struct GeminiTransport {
    client: Client,
    url: String,
    timeout: Duration,
}

impl GeminiTransport {
    pub fn new(cfg: &GeminiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(cfg.timeout())
            .build()
            .map_err(|e| InquisterError::Config(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            url: cfg.endpoint(),
            timeout: cfg.timeout(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl Transport for GeminiTransport {
    async fn generate(&self, api_key: &str, req: &GenerateRequest) -> Result<GenerateResponse> {
        let response = self
            .client
            .post(&self.url)
            .header("x-goog-api-key", api_key)
            .header("Content-Type", "application/json")
            .json(req)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    InquisterError::Timeout {
                        seconds: self.timeout.as_secs(),
                    }
                } else {
                    InquisterError::Network(format!("Failed to send request to Gemini API: {e}"))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(InquisterError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        response.json().await.map_err(|e| {
            if e.is_timeout() {
                InquisterError::Timeout {
                    seconds: self.timeout.as_secs(),
                }
            } else {
                InquisterError::Decode(format!("Failed to parse Gemini API response: {e}"))
            }
        })
    }
}
