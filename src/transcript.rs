use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
    Error,
}

/// One line of the conversation, stored with its display prefix
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub sender: Sender,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    entries: Vec<Entry>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh transcript that opens with the assistant's greeting.
    pub fn with_welcome(assistant_name: &str) -> Self {
        let mut transcript = Self::new();
        transcript.push_bot(
            assistant_name,
            &format!(
                "Hi there! I'm {assistant_name}, your smart AI companion. Ask me anything, and I'll try to help you with quick and clear answers! 😊"
            ),
        );
        transcript
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn last(&self) -> Option<&Entry> {
        self.entries.last()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn push_user(&mut self, text: &str) {
        self.push(Sender::User, format!("🧑‍💻 You: {text}"));
    }

    pub fn push_bot(&mut self, assistant_name: &str, text: &str) {
        self.push(Sender::Bot, format!("🤖 {assistant_name}: {text}"));
    }

    pub fn push_error(&mut self, text: &str) {
        self.push(Sender::Error, format!("❌ Error: {text}"));
    }

    fn push(&mut self, sender: Sender, text: String) {
        self.entries.push(Entry { sender, text });
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Plain-text export: entry texts separated by a blank line.
    pub fn export_text(&self) -> String {
        self.entries
            .iter()
            .map(|e| e.text.as_str())
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    pub fn export_to(&self, path: &Path) -> Result<()> {
        ensure_parent(path)?;
        fs::write(path, self.export_text())?;
        tracing::info!("Exported transcript to {}", path.display());
        Ok(())
    }
}

/// Persistence for a transcript between runs
pub trait TranscriptStore: Send + Sync {
    /// `None` when nothing has been saved yet.
    fn load(&self) -> Result<Option<Transcript>>;
    fn save(&self, transcript: &Transcript) -> Result<()>;
    fn clear(&self) -> Result<()>;
}

/// Keeps the transcript as JSON in a single file.
pub struct FileTranscriptStore {
    path: PathBuf,
}

impl FileTranscriptStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TranscriptStore for FileTranscriptStore {
    fn load(&self) -> Result<Option<Transcript>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&self.path)?;
        match serde_json::from_str(&contents) {
            Ok(transcript) => Ok(Some(transcript)),
            Err(e) => {
                tracing::warn!(
                    "Ignoring unreadable transcript {}: {}",
                    self.path.display(),
                    e
                );
                Ok(None)
            }
        }
    }

    fn save(&self, transcript: &Transcript) -> Result<()> {
        ensure_parent(&self.path)?;
        fs::write(&self.path, serde_json::to_string_pretty(transcript)?)?;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
