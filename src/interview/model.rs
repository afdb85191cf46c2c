//! Candidate profile and conversation data models.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One field of the candidate profile.
///
/// The interview asks for these in a fixed order; the profile cursor is an
/// index into [`PROFILE_FIELDS`], so the array order is load-bearing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileField {
    Name,
    PhoneNumber,
    EmailAddress,
    Location,
    Role,
    ExperienceYears,
    TechStack,
}

/// The profile questions, in interview order.
pub const PROFILE_FIELDS: [ProfileField; 7] = [
    ProfileField::Name,
    ProfileField::PhoneNumber,
    ProfileField::EmailAddress,
    ProfileField::Location,
    ProfileField::Role,
    ProfileField::ExperienceYears,
    ProfileField::TechStack,
];

impl ProfileField {
    /// Stable key, matching the database column name.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::PhoneNumber => "phone_number",
            Self::EmailAddress => "email_address",
            Self::Location => "location",
            Self::Role => "role",
            Self::ExperienceYears => "experience_years",
            Self::TechStack => "tech_stack",
        }
    }

    /// The phrase the responder is asked to work into its next question.
    pub fn prompt_label(&self) -> &'static str {
        match self {
            Self::Name => "your full name",
            Self::PhoneNumber => "your 10-digit phone number",
            Self::EmailAddress => "your email address",
            Self::Location => "your current location",
            Self::Role => "the role you are applying for",
            Self::ExperienceYears => "your years of experience",
            Self::TechStack => "your main programming expertise",
        }
    }
}

impl std::fmt::Display for ProfileField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// A completed candidate profile, ready to persist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub name: String,
    pub phone_number: String,
    pub email_address: String,
    pub location: String,
    pub role: String,
    pub experience_years: u32,
    pub tech_stack: String,
}

impl CandidateProfile {
    /// Build a complete profile from the per-field answers collected during
    /// the profile phase.
    ///
    /// Returns `None` if any field is missing or `experience_years` does not
    /// parse — both mean the caller advanced the phase without validating.
    pub fn from_answers(answers: &HashMap<ProfileField, String>) -> Option<Self> {
        let get = |field: ProfileField| answers.get(&field).cloned();
        Some(Self {
            name: get(ProfileField::Name)?,
            phone_number: get(ProfileField::PhoneNumber)?,
            email_address: get(ProfileField::EmailAddress)?,
            location: get(ProfileField::Location)?,
            role: get(ProfileField::Role)?,
            experience_years: get(ProfileField::ExperienceYears)?.trim().parse().ok()?,
            tech_stack: get(ProfileField::TechStack)?,
        })
    }
}

/// Who produced a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnRole {
    Assistant,
    User,
}

impl std::fmt::Display for TurnRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Assistant => write!(f, "assistant"),
            Self::User => write!(f, "user"),
        }
    }
}

/// One turn of the conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: TurnRole,
    pub content: String,
}

/// Append-only conversation history.
///
/// Doubles as the display record and as the verbatim context handed to the
/// responder. Turns are never mutated or reordered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    turns: Vec<ConversationTurn>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.turns.push(ConversationTurn {
            role: TurnRole::Assistant,
            content: content.into(),
        });
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.turns.push(ConversationTurn {
            role: TurnRole::User,
            content: content.into(),
        });
    }

    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// The turn contents joined with newlines — the context string the
    /// responder prompt embeds. Role tags are deliberately omitted.
    pub fn history_text(&self) -> String {
        self.turns
            .iter()
            .map(|t| t.content.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A persisted profile row.
#[derive(Debug, Clone)]
pub struct StoredProfile {
    pub id: Uuid,
    pub profile: CandidateProfile,
    pub created_at: DateTime<Utc>,
}

/// A persisted technical-response row.
#[derive(Debug, Clone)]
pub struct StoredTechnicalResponse {
    pub id: Uuid,
    pub interview_id: Uuid,
    pub question: String,
    pub answer: String,
    pub ordinal: u32,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_order_is_positional() {
        let keys: Vec<&str> = PROFILE_FIELDS.iter().map(|f| f.key()).collect();
        assert_eq!(
            keys,
            [
                "name",
                "phone_number",
                "email_address",
                "location",
                "role",
                "experience_years",
                "tech_stack"
            ]
        );
    }

    #[test]
    fn prompt_labels_are_nonempty_and_distinct() {
        let labels: Vec<&str> = PROFILE_FIELDS.iter().map(|f| f.prompt_label()).collect();
        for label in &labels {
            assert!(!label.is_empty());
        }
        let mut deduped = labels.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(deduped.len(), labels.len());
    }

    fn full_answers() -> HashMap<ProfileField, String> {
        let values = [
            "Jane Doe",
            "5551234567",
            "jane@example.com",
            "Remote",
            "Backend Engineer",
            "4",
            "Go",
        ];
        PROFILE_FIELDS
            .iter()
            .zip(values)
            .map(|(f, v)| (*f, v.to_string()))
            .collect()
    }

    #[test]
    fn profile_from_complete_answers() {
        let profile = CandidateProfile::from_answers(&full_answers()).unwrap();
        assert_eq!(profile.name, "Jane Doe");
        assert_eq!(profile.phone_number, "5551234567");
        assert_eq!(profile.email_address, "jane@example.com");
        assert_eq!(profile.location, "Remote");
        assert_eq!(profile.role, "Backend Engineer");
        assert_eq!(profile.experience_years, 4);
        assert_eq!(profile.tech_stack, "Go");
    }

    #[test]
    fn profile_from_answers_missing_field() {
        let mut answers = full_answers();
        answers.remove(&ProfileField::Location);
        assert!(CandidateProfile::from_answers(&answers).is_none());
    }

    #[test]
    fn profile_from_answers_bad_experience() {
        let mut answers = full_answers();
        answers.insert(ProfileField::ExperienceYears, "several".to_string());
        assert!(CandidateProfile::from_answers(&answers).is_none());
    }

    #[test]
    fn transcript_is_append_only_and_ordered() {
        let mut transcript = Transcript::new();
        transcript.push_assistant("Hello!");
        transcript.push_user("Hi.");
        transcript.push_assistant("Your name?");

        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript.turns()[0].role, TurnRole::Assistant);
        assert_eq!(transcript.turns()[1].role, TurnRole::User);
        assert_eq!(transcript.history_text(), "Hello!\nHi.\nYour name?");
    }

    #[test]
    fn turn_role_serde() {
        assert_eq!(serde_json::to_string(&TurnRole::User).unwrap(), "\"user\"");
        assert_eq!(
            serde_json::to_string(&TurnRole::Assistant).unwrap(),
            "\"assistant\""
        );
    }
}
