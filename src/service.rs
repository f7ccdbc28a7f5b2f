use std::sync::Arc;

use crate::config::Config;
use crate::error::Result;
use crate::fallback::ExternalFallback;
use crate::profile::Profile;
use crate::synth::ProfileSynth;
use crate::transport::{GeminiTransport, Transport};

/// Reply when a non-profile question arrives and no Gemini key is configured.
pub const KEY_NOT_FOUND_REPLY: &str = "❌ Gemini API key not found";

/// Terminal state of one resolved message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Composed from the profile without any network call
    Local(String),
    /// Gemini's answer, or a soft error if the call failed
    External(String),
    /// Credential missing; nothing was sent
    ConfigError(String),
}

impl Resolution {
    pub fn reply(&self) -> &str {
        match self {
            Resolution::Local(s) | Resolution::External(s) | Resolution::ConfigError(s) => s,
        }
    }

    pub fn into_reply(self) -> String {
        match self {
            Resolution::Local(s) | Resolution::External(s) | Resolution::ConfigError(s) => s,
        }
    }

    pub fn route(&self) -> &'static str {
        match self {
            Resolution::Local(_) => "local",
            Resolution::External(_) => "external",
            Resolution::ConfigError(_) => "config_error",
        }
    }
}

/// Routes each message to the profile synthesizer or the external fallback.
///
/// Holds no per-request state; safe to share behind an `Arc`.
pub struct ReplyService {
    synth: ProfileSynth,
    api_key: Option<String>,
    fallback: ExternalFallback,
}

impl ReplyService {
    pub fn new(profile: Arc<Profile>, api_key: Option<String>, fallback: ExternalFallback) -> Self {
        Self {
            synth: ProfileSynth::new(profile),
            api_key,
            fallback,
        }
    }

    /// Wire up the production service from config and an already loaded profile.
    pub fn from_config(cfg: &Config, profile: Arc<Profile>) -> Result<Self> {
        let transport = Arc::new(GeminiTransport::new(&cfg.gemini)?);
        let fallback = ExternalFallback::new(
            transport as Arc<dyn Transport>,
            cfg.assistant.name.clone(),
            cfg.gemini.timeout(),
        );
        Ok(Self::new(profile, cfg.gemini.api_key.clone(), fallback))
    }

    pub fn synth(&self) -> &ProfileSynth {
        &self.synth
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    pub async fn resolve(&self, message: &str) -> Resolution {
        let resolution = if let Some(reply) = self.synth.reply(message) {
            Resolution::Local(reply)
        } else {
            match self.api_key.as_deref() {
                None => {
                    tracing::warn!("GEMINI_API_KEY missing; cannot forward message");
                    Resolution::ConfigError(KEY_NOT_FOUND_REPLY.to_string())
                }
                Some(key) => Resolution::External(self.fallback.reply(key, message).await),
            }
        };
        tracing::info!(route = resolution.route(), "Resolved message");
        resolution
    }
}
