use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure for Inquister
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub gemini: GeminiConfig,
    pub assistant: AssistantConfig,
    pub client: ClientConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
    pub ask_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeminiConfig {
    /// Credential for the Gemini API; absent means the external fallback is disabled
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    pub name: String,
    /// JSON profile file; the built-in profile is used when unset
    pub profile_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub endpoint: String,
    pub transcript_path: PathBuf,
    pub export_path: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:3000".to_string(),
            ask_path: "/api/ask".to_string(),
        }
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gemini-2.0-flash".to_string(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            timeout_seconds: 20,
        }
    }
}

impl GeminiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            name: "Inquister".to_string(),
            profile_path: None,
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:3000/api/ask".to_string(),
            transcript_path: PathBuf::from("chat_history.json"),
            export_path: PathBuf::from("chat.txt"),
        }
    }
}

impl Config {
    /// Load configuration from file with environment variable overrides.
    /// Never fails: unreadable or invalid files fall back to defaults.
    pub fn load() -> Self {
        match dotenvy::dotenv() {
            Ok(path) => tracing::info!("Loaded .env from: {}", path.display()),
            Err(_) => tracing::debug!("No .env file found - continuing with env vars only"),
        }

        let config_path =
            env::var("INQUISTER_CONFIG_PATH").unwrap_or_else(|_| "config.yaml".to_string());

        let config = Self::load_from(Path::new(&config_path), |key| env::var(key).ok());

        if let Err(e) = config.validate() {
            tracing::warn!("Config validation warnings: {} - continuing anyway", e);
        }

        config
    }

    /// File, then overrides from `lookup`, then normalization.
    pub fn load_from<F>(path: &Path, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::from_file(path);
        config.apply_env_overrides(lookup);
        config.normalize();
        config
    }

    /// Replace values that would break requests at runtime with their defaults.
    pub fn normalize(&mut self) {
        // A zero reqwest timeout makes every upstream call fail immediately
        if self.gemini.timeout_seconds == 0 {
            let default = GeminiConfig::default().timeout_seconds;
            tracing::warn!("gemini.timeout_seconds is 0; using {}s instead", default);
            self.gemini.timeout_seconds = default;
        }
    }

    fn from_file(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!("Config file not found at {} - using defaults", path.display());
            return Self::default();
        }
        match fs::read_to_string(path) {
            Ok(contents) => match serde_yaml::from_str::<Config>(&contents) {
                Ok(config) => {
                    tracing::info!("Loaded configuration from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::error!(
                        "Failed to parse config file {}: {} - using defaults",
                        path.display(),
                        e
                    );
                    Self::default()
                }
            },
            Err(e) => {
                tracing::error!(
                    "Failed to read config file {}: {} - using defaults",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Apply overrides from `lookup`, normally the process environment.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        // Server overrides
        if let Some(bind) = lookup("INQUISTER_BIND") {
            self.server.bind = bind;
        }
        if let Some(path) = lookup("INQUISTER_ASK_PATH") {
            self.server.ask_path = path;
        }

        // Gemini overrides; an empty key counts as missing
        if let Some(api_key) = lookup("GEMINI_API_KEY") {
            let api_key = api_key.trim().to_string();
            self.gemini.api_key = (!api_key.is_empty()).then_some(api_key);
        }
        if let Some(model) = lookup("GEMINI_MODEL") {
            self.gemini.model = model;
        }
        if let Some(base_url) = lookup("GEMINI_BASE_URL") {
            self.gemini.base_url = base_url;
        }
        if let Some(timeout) = lookup("GEMINI_TIMEOUT_SECONDS") {
            match timeout.parse::<u64>() {
                Ok(secs) if secs > 0 => self.gemini.timeout_seconds = secs,
                _ => tracing::warn!("Ignoring invalid GEMINI_TIMEOUT_SECONDS: {}", timeout),
            }
        }

        // Assistant overrides
        if let Some(name) = lookup("INQUISTER_NAME") {
            self.assistant.name = name;
        }
        if let Some(path) = lookup("INQUISTER_PROFILE_PATH") {
            self.assistant.profile_path = Some(PathBuf::from(path));
        }

        // Client overrides
        if let Some(url) = lookup("INQUISTER_URL") {
            self.client.endpoint = url;
        }
        if let Some(path) = lookup("INQUISTER_TRANSCRIPT") {
            self.client.transcript_path = PathBuf::from(path);
        }
        if let Some(path) = lookup("INQUISTER_EXPORT") {
            self.client.export_path = PathBuf::from(path);
        }
    }

    /// Validate configuration, returning a description of every problem found.
    pub fn validate(&self) -> Result<(), String> {
        let mut problems = Vec::new();

        if self.server.bind.parse::<std::net::SocketAddr>().is_err() {
            problems.push(format!("server.bind '{}' is not host:port", self.server.bind));
        }
        if !self.server.ask_path.starts_with('/') {
            problems.push(format!(
                "server.ask_path '{}' must start with '/'",
                self.server.ask_path
            ));
        }
        if self.gemini.timeout_seconds == 0 {
            problems.push("gemini.timeout_seconds must be greater than 0".to_string());
        }
        if self.gemini.api_key.is_none() {
            problems.push(
                "GEMINI_API_KEY not set; only profile questions will be answered".to_string(),
            );
        }
        if self.assistant.name.trim().is_empty() {
            problems.push("assistant.name must not be empty".to_string());
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(problems.join("; "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_point_at_gemini_flash() {
        let cfg = Config::default();
        assert_eq!(cfg.server.ask_path, "/api/ask");
        assert_eq!(
            cfg.gemini.endpoint(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent"
        );
        assert!(cfg.gemini.api_key.is_none());
    }

    #[test]
    fn env_overrides_apply() {
        let mut cfg = Config::default();
        cfg.apply_env_overrides(lookup_from(&[
            ("GEMINI_API_KEY", "secret"),
            ("GEMINI_MODEL", "gemini-pro"),
            ("GEMINI_BASE_URL", "http://localhost:9999/v1/"),
            ("GEMINI_TIMEOUT_SECONDS", "5"),
            ("INQUISTER_BIND", "0.0.0.0:8080"),
            ("INQUISTER_NAME", "Sage"),
        ]));
        assert_eq!(cfg.gemini.api_key.as_deref(), Some("secret"));
        assert_eq!(
            cfg.gemini.endpoint(),
            "http://localhost:9999/v1/models/gemini-pro:generateContent"
        );
        assert_eq!(cfg.gemini.timeout(), Duration::from_secs(5));
        assert_eq!(cfg.server.bind, "0.0.0.0:8080");
        assert_eq!(cfg.assistant.name, "Sage");
    }

    #[test]
    fn blank_api_key_is_treated_as_absent() {
        let mut cfg = Config::default();
        cfg.apply_env_overrides(lookup_from(&[("GEMINI_API_KEY", "  ")]));
        assert!(cfg.gemini.api_key.is_none());
    }

    #[test]
    fn invalid_timeout_is_ignored() {
        let mut cfg = Config::default();
        cfg.apply_env_overrides(lookup_from(&[("GEMINI_TIMEOUT_SECONDS", "soon")]));
        assert_eq!(cfg.gemini.timeout_seconds, 20);
    }

    #[test]
    fn zero_timeout_falls_back_to_default() {
        let mut cfg = Config::default();
        cfg.apply_env_overrides(lookup_from(&[("GEMINI_TIMEOUT_SECONDS", "0")]));
        assert_eq!(cfg.gemini.timeout_seconds, 20);

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "gemini:\n  timeout_seconds: 0").unwrap();
        let cfg = Config::load_from(file.path(), lookup_from(&[]));
        assert_eq!(cfg.gemini.timeout(), Duration::from_secs(20));
        assert!(cfg.validate().unwrap_err().contains("GEMINI_API_KEY"));
        assert!(!cfg.validate().unwrap_err().contains("timeout_seconds"));

        let cfg = Config::load_from(file.path(), lookup_from(&[("GEMINI_TIMEOUT_SECONDS", "4")]));
        assert_eq!(cfg.gemini.timeout_seconds, 4);
    }

    #[test]
    fn yaml_file_fills_missing_fields_with_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let yaml = "server:\n  bind: \"127.0.0.1:4000\"\ngemini:\n  timeout_seconds: 7";
        writeln!(file, "{yaml}").unwrap();

        let cfg = Config::from_file(file.path());
        assert_eq!(cfg.server.bind, "127.0.0.1:4000");
        assert_eq!(cfg.server.ask_path, "/api/ask");
        assert_eq!(cfg.gemini.timeout_seconds, 7);
        assert_eq!(cfg.gemini.model, "gemini-2.0-flash");
    }

    #[test]
    fn unparsable_yaml_falls_back_to_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "server: [this is: not valid").unwrap();
        let cfg = Config::from_file(file.path());
        assert_eq!(cfg.server.bind, "127.0.0.1:3000");
    }

    #[test]
    fn validate_reports_problems() {
        let mut cfg = Config::default();
        cfg.server.bind = "nowhere".to_string();
        cfg.gemini.timeout_seconds = 0;
        let err = cfg.validate().unwrap_err();
        assert!(err.contains("server.bind"));
        assert!(err.contains("timeout_seconds"));

        cfg.apply_env_overrides(lookup_from(&[
            ("GEMINI_API_KEY", "k"),
            ("INQUISTER_BIND", "127.0.0.1:1"),
            ("GEMINI_TIMEOUT_SECONDS", "3"),
        ]));
        assert!(cfg.validate().is_ok());
    }
}
