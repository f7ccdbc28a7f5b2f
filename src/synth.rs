use std::sync::Arc;

use crate::intent::{KeywordClassifier, ProfileIntent};
use crate::profile::Profile;

/// Composes replies about the profile from static data only.
#[derive(Debug, Clone)]
pub struct ProfileSynth {
    profile: Arc<Profile>,
    classifier: KeywordClassifier,
}

impl ProfileSynth {
    pub fn new(profile: Arc<Profile>) -> Self {
        let classifier = KeywordClassifier::new(&profile.keywords);
        Self {
            profile,
            classifier,
        }
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    /// Email when present, otherwise the profile's fallback contact sentence.
    pub fn contact_line(&self) -> String {
        match self.profile.email() {
            Some(email) => email.to_string(),
            None => self.profile.short_contact_reply.clone(),
        }
    }

    fn invitation(&self) -> String {
        format!(
            "Agar aap unse contact karna chahte hain to {}.",
            self.contact_line()
        )
    }

    pub fn compose(&self, intent: ProfileIntent) -> String {
        let p = &self.profile;
        match intent {
            ProfileIntent::Contact => self.contact_line(),
            ProfileIntent::Creator => format!(
                "Mujhe {} ne banaya, jo aik {} hain. {}",
                p.name,
                p.title,
                self.invitation()
            ),
            ProfileIntent::Skills => format!(
                "{} ke kuch important skills: {}. Unki achievements me shamil hain: {}. {}",
                p.name,
                p.skills.join(", "),
                p.achievements.join("; "),
                self.invitation()
            ),
            ProfileIntent::General => {
                format!("{} aik {} hain. {}", p.name, p.title, self.invitation())
            }
        }
    }

    /// Classify and compose in one step; `None` when the text is not about the profile.
    pub fn reply(&self, text: &str) -> Option<String> {
        self.classifier.classify(text).map(|intent| self.compose(intent))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::Contact;

    fn profile(email: Option<&str>) -> Profile {
        Profile {
            name: "Sheikh Abdul Ahad".to_string(),
            title: "web developer".to_string(),
            summary: "Builds things".to_string(),
            skills: vec!["Rust".to_string(), "Next.js".to_string(), "SQL".to_string()],
            achievements: vec!["Shipped A".to_string(), "Won B".to_string()],
            contact: Contact {
                email: email.map(str::to_string),
            },
            short_contact_reply: "Aap unse LinkedIn par contact kar sakte hain".to_string(),
            keywords: vec!["abdul ahad".to_string()],
        }
    }

    fn synth(email: Option<&str>) -> ProfileSynth {
        ProfileSynth::new(Arc::new(profile(email)))
    }

    #[test]
    fn contact_reply_is_exactly_the_email() {
        let s = synth(Some("abdul@example.com"));
        assert_eq!(s.reply("contact details").unwrap(), "abdul@example.com");
        assert_eq!(s.reply("What is the EMAIL of Abdul Ahad?").unwrap(), "abdul@example.com");
    }

    #[test]
    fn contact_reply_falls_back_to_sentence() {
        let s = synth(None);
        assert_eq!(
            s.reply("how to contact him").unwrap(),
            "Aap unse LinkedIn par contact kar sakte hain"
        );
    }

    #[test]
    fn creator_reply_names_person_and_invites_contact() {
        let s = synth(Some("abdul@example.com"));
        let reply = s.reply("who made you").unwrap();
        assert!(reply.contains("Sheikh Abdul Ahad"));
        assert!(reply.contains("web developer"));
        assert!(reply.ends_with("Agar aap unse contact karna chahte hain to abdul@example.com."));
    }

    #[test]
    fn skills_reply_keeps_list_order_and_separators() {
        let s = synth(None);
        let reply = s.reply("what are his skills?").unwrap();
        assert!(reply.contains("Rust, Next.js, SQL"));
        assert!(reply.contains("Shipped A; Won B"));
        assert!(reply.ends_with(
            "Agar aap unse contact karna chahte hain to Aap unse LinkedIn par contact kar sakte hain."
        ));
    }

    #[test]
    fn general_reply_for_profile_mentions() {
        let s = synth(None);
        let reply = s.reply("tell me about abdul ahad").unwrap();
        assert!(reply.starts_with("Sheikh Abdul Ahad aik web developer hain."));
    }

    #[test]
    fn non_profile_text_has_no_local_reply() {
        assert_eq!(synth(None).reply("what's the weather today"), None);
        assert_eq!(synth(None).reply(""), None);
    }

    #[test]
    fn compose_is_deterministic_and_never_empty() {
        let s = synth(Some("abdul@example.com"));
        for intent in [
            ProfileIntent::Contact,
            ProfileIntent::Creator,
            ProfileIntent::Skills,
            ProfileIntent::General,
        ] {
            let first = s.compose(intent);
            assert!(!first.is_empty());
            assert_eq!(first, s.compose(intent));
        }
    }
}
