//! Interview state machine — phase and per-session progress.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::model::{ProfileField, Transcript, PROFILE_FIELDS};
use super::prompts::GREETING;

/// The phases of an interview.
///
/// Progresses Profile → Technical → Done; Profile may jump straight to Done
/// when no technical questions could be generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterviewPhase {
    Profile,
    Technical,
    Done,
}

impl InterviewPhase {
    /// Check if a transition from `self` to `target` is valid.
    pub fn can_transition_to(&self, target: InterviewPhase) -> bool {
        use InterviewPhase::*;
        matches!(
            (self, target),
            (Profile, Technical) | (Profile, Done) | (Technical, Done)
        )
    }

    /// Whether this phase is terminal (the interview is over).
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done)
    }
}

impl Default for InterviewPhase {
    fn default() -> Self {
        Self::Profile
    }
}

impl std::fmt::Display for InterviewPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Profile => "profile",
            Self::Technical => "technical",
            Self::Done => "done",
        };
        write!(f, "{s}")
    }
}

/// All mutable state for one interview. Not persisted; the engine mutates it
/// in response to validated input, and an explicit restart discards it.
#[derive(Debug, Clone)]
pub struct InterviewSession {
    pub phase: InterviewPhase,
    /// Index into [`PROFILE_FIELDS`] for the question currently awaiting an
    /// answer.
    pub profile_cursor: usize,
    /// Index into `questions` for the technical question currently awaiting
    /// an answer.
    pub technical_cursor: usize,
    /// Profile answers collected so far.
    pub answers: HashMap<ProfileField, String>,
    /// Generated technical questions; empty until the profile phase completes.
    pub questions: Vec<String>,
    /// Identifier of the persisted profile row; set once, at profile
    /// completion.
    pub profile_id: Option<Uuid>,
    pub transcript: Transcript,
}

impl InterviewSession {
    /// A fresh session: profile phase, cursors at zero, transcript seeded
    /// with the greeting.
    pub fn new() -> Self {
        let mut transcript = Transcript::new();
        transcript.push_assistant(GREETING);
        Self {
            phase: InterviewPhase::Profile,
            profile_cursor: 0,
            technical_cursor: 0,
            answers: HashMap::new(),
            questions: Vec::new(),
            profile_id: None,
            transcript,
        }
    }

    /// Discard all progress and start over. Already-persisted records are
    /// left alone.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// The profile field currently awaiting an answer, if still in the
    /// profile phase.
    pub fn current_field(&self) -> Option<ProfileField> {
        if self.phase != InterviewPhase::Profile {
            return None;
        }
        PROFILE_FIELDS.get(self.profile_cursor).copied()
    }

    /// Move to `target`, checking the transition is legal.
    pub fn transition_to(&mut self, target: InterviewPhase) -> Result<InterviewPhase, String> {
        if !self.phase.can_transition_to(target) {
            return Err(format!("Cannot transition from {} to {}", self.phase, target));
        }
        self.phase = target;
        Ok(target)
    }
}

impl Default for InterviewSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_transitions() {
        use InterviewPhase::*;
        for (from, to) in [(Profile, Technical), (Profile, Done), (Technical, Done)] {
            assert!(from.can_transition_to(to), "{from} should transition to {to}");
        }
    }

    #[test]
    fn invalid_transitions() {
        use InterviewPhase::*;
        // Backward
        assert!(!Technical.can_transition_to(Profile));
        assert!(!Done.can_transition_to(Profile));
        assert!(!Done.can_transition_to(Technical));
        // Self-transition
        assert!(!Profile.can_transition_to(Profile));
        assert!(!Technical.can_transition_to(Technical));
        assert!(!Done.can_transition_to(Done));
    }

    #[test]
    fn is_terminal() {
        assert!(InterviewPhase::Done.is_terminal());
        assert!(!InterviewPhase::Profile.is_terminal());
        assert!(!InterviewPhase::Technical.is_terminal());
    }

    #[test]
    fn display_matches_serde() {
        for phase in [
            InterviewPhase::Profile,
            InterviewPhase::Technical,
            InterviewPhase::Done,
        ] {
            let json = serde_json::to_string(&phase).unwrap();
            assert_eq!(json, format!("\"{phase}\""));
        }
    }

    #[test]
    fn new_session_starts_with_greeting() {
        let session = InterviewSession::new();
        assert_eq!(session.phase, InterviewPhase::Profile);
        assert_eq!(session.profile_cursor, 0);
        assert_eq!(session.technical_cursor, 0);
        assert!(session.answers.is_empty());
        assert!(session.questions.is_empty());
        assert!(session.profile_id.is_none());
        assert_eq!(session.transcript.len(), 1);
        assert_eq!(session.transcript.turns()[0].content, GREETING);
    }

    #[test]
    fn current_field_follows_cursor() {
        let mut session = InterviewSession::new();
        assert_eq!(session.current_field(), Some(ProfileField::Name));
        session.profile_cursor = 2;
        assert_eq!(session.current_field(), Some(ProfileField::EmailAddress));
        session.phase = InterviewPhase::Technical;
        assert_eq!(session.current_field(), None);
    }

    #[test]
    fn reset_clears_progress() {
        let mut session = InterviewSession::new();
        session.answers.insert(ProfileField::Name, "Jane".to_string());
        session.profile_cursor = 3;
        session.questions = vec!["Q1".to_string()];
        session.phase = InterviewPhase::Technical;
        session.profile_id = Some(Uuid::new_v4());
        session.transcript.push_user("Jane");

        session.reset();

        assert_eq!(session.phase, InterviewPhase::Profile);
        assert_eq!(session.profile_cursor, 0);
        assert!(session.answers.is_empty());
        assert!(session.questions.is_empty());
        assert!(session.profile_id.is_none());
        assert_eq!(session.transcript.len(), 1);
    }

    #[test]
    fn transition_rejects_illegal_moves() {
        let mut session = InterviewSession::new();
        assert!(session.transition_to(InterviewPhase::Technical).is_ok());
        assert!(session.transition_to(InterviewPhase::Profile).is_err());
        assert!(session.transition_to(InterviewPhase::Done).is_ok());
        assert!(session.transition_to(InterviewPhase::Done).is_err());
    }
}
