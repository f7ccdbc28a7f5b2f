use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{InquisterError, Result};

const BUILTIN_PROFILE: &str = include_str!("../data/profile.json");

/// Static record of the one person the assistant knows about.
///
/// Loaded once at startup and shared read-only behind an `Arc`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub achievements: Vec<String>,
    #[serde(default)]
    pub contact: Contact,
    /// Sentence used when no email is on record
    pub short_contact_reply: String,
    /// Name variants that mark a message as being about this person
    #[serde(default)]
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(default)]
    pub email: Option<String>,
}

impl Profile {
    /// Load the profile from `path`, or the built-in one when no path is configured.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let profile = match path {
            Some(path) => {
                let contents = fs::read_to_string(path).map_err(|e| {
                    InquisterError::Profile(format!(
                        "Failed to read profile {}: {e}",
                        path.display()
                    ))
                })?;
                let profile = Self::from_json(&contents)?;
                tracing::info!("Loaded profile '{}' from {}", profile.name, path.display());
                profile
            }
            None => {
                let profile = Self::builtin()?;
                tracing::info!("Using built-in profile '{}'", profile.name);
                profile
            }
        };
        profile.validate()?;
        Ok(profile)
    }

    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_PROFILE)
    }

    pub fn from_json(contents: &str) -> Result<Self> {
        serde_json::from_str(contents)
            .map_err(|e| InquisterError::Profile(format!("Invalid profile JSON: {e}")))
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(InquisterError::Profile("name must not be empty".to_string()));
        }
        if self.title.trim().is_empty() {
            return Err(InquisterError::Profile("title must not be empty".to_string()));
        }
        if self.short_contact_reply.trim().is_empty() {
            return Err(InquisterError::Profile(
                "short_contact_reply must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Configured email, ignoring blank entries.
    pub fn email(&self) -> Option<&str> {
        self.contact
            .email
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
    }
}
