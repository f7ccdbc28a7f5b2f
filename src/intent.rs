use std::fmt;

/// Sub-intent of a message that is about the profiled person
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileIntent {
    Contact,
    Creator,
    Skills,
    General,
}

impl fmt::Display for ProfileIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ProfileIntent::Contact => "contact",
            ProfileIntent::Creator => "creator",
            ProfileIntent::Skills => "skills",
            ProfileIntent::General => "general",
        };
        f.write_str(s)
    }
}

/// Phrases that mark a message as profile-related, in addition to the profile's own keywords
const TRIGGER_PHRASES: &[&str] = &[
    "who made you",
    "who created you",
    "tumhain kis ne banaya",
    "kis ne banaya",
    "who built you",
    "how to contact",
    "contact details",
    "creator",
    "developer",
    "skills",
    "achievements",
];

/// Sub-intents in priority order. First match wins.
const SUB_INTENTS: &[(ProfileIntent, &[&str])] = &[
    (
        ProfileIntent::Contact,
        &["contact", "email", "how to contact", "contact details"],
    ),
    (
        ProfileIntent::Creator,
        &[
            "who made you",
            "who created you",
            "tumhain kis ne banaya",
            "kis ne banaya",
            "who built you",
            "creator",
        ],
    ),
    (ProfileIntent::Skills, &["skills", "achievements"]),
];

/// Substring-based classifier for profile questions.
///
/// Matching is case-insensitive containment with no word boundaries,
/// so "developers" still matches "developer".
#[derive(Debug, Clone)]
pub struct KeywordClassifier {
    triggers: Vec<String>,
}

impl KeywordClassifier {
    pub fn new<I, S>(profile_keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut triggers: Vec<String> = Vec::new();
        let keywords = profile_keywords
            .into_iter()
            .map(|k| k.as_ref().trim().to_lowercase())
            .chain(TRIGGER_PHRASES.iter().map(|p| p.to_string()));
        for k in keywords {
            if !k.is_empty() && !triggers.contains(&k) {
                triggers.push(k);
            }
        }
        Self { triggers }
    }

    pub fn triggers(&self) -> &[String] {
        &self.triggers
    }

    pub fn is_profile_question(&self, text: &str) -> bool {
        if text.is_empty() {
            return false;
        }
        let t = text.to_lowercase();
        self.triggers.iter().any(|k| t.contains(k.as_str()))
    }

    /// `None` when the text is not about the profile, otherwise its sub-intent.
    pub fn classify(&self, text: &str) -> Option<ProfileIntent> {
        if !self.is_profile_question(text) {
            return None;
        }
        let t = text.to_lowercase();
        let intent = SUB_INTENTS
            .iter()
            .find(|(_, phrases)| phrases.iter().any(|p| t.contains(p)))
            .map(|(intent, _)| *intent)
            .unwrap_or(ProfileIntent::General);
        tracing::debug!("Classified message as profile intent '{}'", intent);
        Some(intent)
    }
}
