//! InterviewEngine — drives validation, persistence, and response generation
//! for every inbound candidate message.
//!
//! Per-turn ordering is fixed: validate → persist → pick the next prompt →
//! generate the reply. Session mutations that depend on a fallible call are
//! committed only after that call succeeds, so a failed turn leaves the
//! session resumable and the next input retries the same step.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::error::{Error, Result, ValidationError};
use crate::llm::LlmProvider;
use crate::store::InterviewStore;

use super::generator::QuestionGenerator;
use super::model::{CandidateProfile, ProfileField, PROFILE_FIELDS};
use super::prompts::CLOSING_MESSAGE;
use super::responder::Responder;
use super::state::{InterviewPhase, InterviewSession};
use super::validate::validate_field;

/// What a processed turn produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// An assistant reply was appended to the transcript.
    Reply(String),
    /// The input failed validation; nothing advanced and no assistant turn
    /// was appended.
    Rejected(ValidationError),
    /// The interview finished this turn; the closing message was appended.
    Closed(String),
    /// The interview was already over; the input was a no-op.
    Ignored,
}

/// Coordinates the interview flow: phase tracking, validation, persistence,
/// question generation, and responses.
pub struct InterviewEngine {
    store: Arc<dyn InterviewStore>,
    generator: QuestionGenerator,
    responder: Responder,
}

impl InterviewEngine {
    pub fn new(
        store: Arc<dyn InterviewStore>,
        llm: Arc<dyn LlmProvider>,
        question_count: usize,
    ) -> Self {
        Self {
            store,
            generator: QuestionGenerator::new(Arc::clone(&llm), question_count),
            responder: Responder::new(llm),
        }
    }

    /// Process one inbound candidate message.
    pub async fn handle_input(
        &self,
        session: &mut InterviewSession,
        input: &str,
    ) -> Result<TurnOutcome> {
        match session.phase {
            InterviewPhase::Done => {
                debug!("Input after interview end ignored");
                Ok(TurnOutcome::Ignored)
            }
            InterviewPhase::Profile => {
                session.transcript.push_user(input);
                self.profile_turn(session, input).await
            }
            InterviewPhase::Technical => {
                session.transcript.push_user(input);
                self.technical_turn(session, input).await
            }
        }
    }

    /// One turn of the profile phase.
    async fn profile_turn(
        &self,
        session: &mut InterviewSession,
        input: &str,
    ) -> Result<TurnOutcome> {
        let Some(field) = session.current_field() else {
            warn!(cursor = session.profile_cursor, "Profile cursor out of range");
            return Ok(TurnOutcome::Ignored);
        };

        if let Err(e) = validate_field(field, input) {
            debug!(field = %field, "Rejected profile input");
            return Ok(TurnOutcome::Rejected(e));
        }

        let next_index = session.profile_cursor + 1;
        if next_index == PROFILE_FIELDS.len() {
            return self.complete_profile(session, field, input).await;
        }

        // Mid-phase: the next prompt is the label of the following field. The
        // answer and cursor are committed only once the responder succeeds,
        // so a failed turn is retried by resubmitting.
        let next_prompt = PROFILE_FIELDS[next_index].prompt_label();
        let reply = self
            .responder
            .respond(&session.transcript, next_prompt)
            .await?;

        session.answers.insert(field, input.to_string());
        session.profile_cursor = next_index;
        session.transcript.push_assistant(reply.clone());
        Ok(TurnOutcome::Reply(reply))
    }

    /// The final profile answer: persist the profile, generate the technical
    /// questions, and move to the technical phase (or straight to done when
    /// generation yields nothing).
    async fn complete_profile(
        &self,
        session: &mut InterviewSession,
        field: ProfileField,
        input: &str,
    ) -> Result<TurnOutcome> {
        let mut answers = session.answers.clone();
        answers.insert(field, input.to_string());

        let profile = CandidateProfile::from_answers(&answers)
            .ok_or(Error::Validation(ValidationError::InvalidExperienceYears))?;

        // Persist before anything else mutates the session; a storage
        // failure leaves the cursor in place so the next input retries.
        let profile_id = self.store.save_profile(&profile).await?;
        session.answers = answers;
        session.profile_cursor += 1;
        session.profile_id = Some(profile_id);
        info!(interview_id = %profile_id, role = %profile.role, "Candidate profile persisted");

        let questions = match self
            .generator
            .generate(&profile.role, &profile.tech_stack)
            .await
        {
            Ok(questions) => questions,
            Err(e) => {
                warn!(error = %e, "Question generation failed; closing interview");
                Vec::new()
            }
        };

        if questions.is_empty() {
            return Ok(self.close(session));
        }

        session.questions = questions;
        if let Err(e) = session.transition_to(InterviewPhase::Technical) {
            warn!("Failed to enter technical phase: {e}");
        }

        let first_question = session.questions[0].clone();
        let reply = self.respond_or_fallback(session, &first_question).await;
        session.transcript.push_assistant(reply.clone());
        Ok(TurnOutcome::Reply(reply))
    }

    /// One turn of the technical phase.
    async fn technical_turn(
        &self,
        session: &mut InterviewSession,
        input: &str,
    ) -> Result<TurnOutcome> {
        let Some(question) = session.questions.get(session.technical_cursor).cloned() else {
            warn!(cursor = session.technical_cursor, "Technical cursor out of range");
            return Ok(TurnOutcome::Ignored);
        };
        let Some(profile_id) = session.profile_id else {
            warn!("Technical phase without a persisted profile");
            return Ok(TurnOutcome::Ignored);
        };

        // Technical answers are free text; no validation. Persist first,
        // advance only on success.
        let ordinal = (session.technical_cursor + 1) as u32;
        self.store
            .save_technical_response(profile_id, &question, input, ordinal)
            .await?;
        session.technical_cursor += 1;
        debug!(interview_id = %profile_id, ordinal, "Technical response persisted");

        if session.technical_cursor == session.questions.len() {
            return Ok(self.close(session));
        }

        let next_question = session.questions[session.technical_cursor].clone();
        let reply = self.respond_or_fallback(session, &next_question).await;
        session.transcript.push_assistant(reply.clone());
        Ok(TurnOutcome::Reply(reply))
    }

    /// End the interview with the fixed closing message. No responder call.
    fn close(&self, session: &mut InterviewSession) -> TurnOutcome {
        if let Err(e) = session.transition_to(InterviewPhase::Done) {
            warn!("Failed to close interview: {e}");
        }
        session.transcript.push_assistant(CLOSING_MESSAGE);
        info!("Interview complete");
        TurnOutcome::Closed(CLOSING_MESSAGE.to_string())
    }

    /// Phrase `question` through the responder. Used after a durable insert
    /// has already advanced the session: a responder failure at that point
    /// must not unwind state, so the question is asked verbatim instead.
    async fn respond_or_fallback(&self, session: &InterviewSession, question: &str) -> String {
        match self.responder.respond(&session.transcript, question).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(error = %e, "Responder unavailable; asking the question verbatim");
                question.to_string()
            }
        }
    }
}

// Tests for the engine live in tests/interview_flow.rs — they exercise the
// full flow against an in-memory store and a scripted provider.
