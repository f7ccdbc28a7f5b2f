use reqwest::Client;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{InquisterError, Result};
use crate::models::{AskRequest, AskResponse};
use crate::transcript::{Entry, Transcript, TranscriptStore};

/// HTTP client for the ask endpoint
pub struct ChatClient {
    http: Client,
    endpoint: String,
}

impl ChatClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| InquisterError::Config(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
        })
    }

    /// Send one message. Error statuses still carry a reply body, which is returned as-is.
    pub async fn ask(&self, message: &str) -> Result<String> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(&AskRequest::new(message))
            .send()
            .await?;
        let status = response.status();
        let body: AskResponse = response.json().await?;
        if !status.is_success() {
            tracing::warn!("Server answered {} for message", status);
        }
        Ok(body.response)
    }
}

/// Hook fired after every successful reply
pub trait ReplyNotifier: Send + Sync {
    fn notify(&self);
}

/// Rings the terminal bell.
pub struct TerminalBell;

impl ReplyNotifier for TerminalBell {
    fn notify(&self) {
        let mut stdout = std::io::stdout();
        // A failed bell is not worth interrupting the chat for.
        let _ = stdout.write_all(b"\x07").and_then(|_| stdout.flush());
    }
}

pub struct Silent;

impl ReplyNotifier for Silent {
    fn notify(&self) {}
}

/// A line of user input at the chat prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Message(String),
    Clear,
    Export(Option<PathBuf>),
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Self {
        match line.trim() {
            ":quit" | ":q" => Command::Quit,
            ":clear" => Command::Clear,
            ":export" => Command::Export(None),
            trimmed => match trimmed.split_once(char::is_whitespace) {
                Some((":export", path)) => Command::Export(Some(PathBuf::from(path.trim()))),
                _ => Command::Message(line.to_string()),
            },
        }
    }
}

/// What the prompt loop does after a command ran
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Show on stdout and prompt again
    Print(String),
    /// Show on stderr and prompt again
    Warn(String),
    /// Nothing to show
    Idle,
    Quit,
}

/// Conversation state on the client side: transcript, persistence and notification.
pub struct ChatSession {
    client: ChatClient,
    store: Box<dyn TranscriptStore>,
    notifier: Box<dyn ReplyNotifier>,
    assistant_name: String,
    transcript: Transcript,
}

impl ChatSession {
    /// Restore the saved transcript, or start a new one with the welcome message.
    pub fn open(
        client: ChatClient,
        store: Box<dyn TranscriptStore>,
        notifier: Box<dyn ReplyNotifier>,
        assistant_name: &str,
    ) -> Result<Self> {
        let transcript = match store.load()? {
            Some(saved) => {
                tracing::info!("Restored transcript with {} entries", saved.entries().len());
                saved
            }
            None => Transcript::with_welcome(assistant_name),
        };
        Ok(Self {
            client,
            store,
            notifier,
            assistant_name: assistant_name.to_string(),
            transcript,
        })
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Send `input` and record the outcome. Blank input is ignored.
    ///
    /// Returns the entry added for the reply (a bot or error entry).
    pub async fn send(&mut self, input: &str) -> Result<Option<&Entry>> {
        if input.trim().is_empty() {
            return Ok(None);
        }

        self.transcript.push_user(input);
        self.store.save(&self.transcript)?;

        match self.client.ask(input).await {
            Ok(reply) => {
                self.transcript.push_bot(&self.assistant_name, &reply);
                self.notifier.notify();
            }
            Err(e) => {
                tracing::warn!("Ask request failed: {}", e);
                self.transcript.push_error(&e.to_string());
            }
        }
        self.store.save(&self.transcript)?;
        Ok(self.transcript.last())
    }

    pub fn clear(&mut self) -> Result<()> {
        self.transcript.clear();
        self.store.clear()
    }

    pub fn export(&self, path: &Path) -> Result<()> {
        self.transcript.export_to(path)
    }

    /// Run one prompt command. Failures are reported in the returned step so
    /// the loop keeps going.
    pub async fn run(&mut self, command: Command, default_export: &Path) -> Step {
        match command {
            Command::Quit => Step::Quit,
            Command::Clear => match self.clear() {
                Ok(()) => Step::Print("🧹 Chat cleared".to_string()),
                Err(e) => {
                    tracing::error!("Clearing transcript failed: {}", e);
                    Step::Warn(format!("Failed to clear transcript: {e}"))
                }
            },
            Command::Export(path) => {
                let path = path.unwrap_or_else(|| default_export.to_path_buf());
                match self.export(&path) {
                    Ok(()) => Step::Print(format!("💾 Exported to {}", path.display())),
                    Err(e) => {
                        tracing::error!("Export to {} failed: {}", path.display(), e);
                        Step::Warn(format!("Failed to export to {}: {e}", path.display()))
                    }
                }
            }
            Command::Message(text) => match self.send(&text).await {
                Ok(Some(entry)) => Step::Print(format!("{}\n", entry.text)),
                Ok(None) => Step::Idle,
                Err(e) => Step::Warn(format!("Failed to save transcript: {e}")),
            },
        }
    }
}
