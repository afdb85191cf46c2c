//! Responder — phrases the next question as an in-character assistant turn.

use std::sync::Arc;

use crate::error::LlmError;
use crate::llm::{ChatMessage, CompletionRequest, LlmProvider};

use super::model::Transcript;
use super::prompts::responder_system_prompt;

/// Wraps the acknowledge-and-ask call to the model.
pub struct Responder {
    llm: Arc<dyn LlmProvider>,
}

impl Responder {
    pub fn new(llm: Arc<dyn LlmProvider>) -> Self {
        Self { llm }
    }

    /// Produce the assistant's next utterance: a brief acknowledgment of the
    /// conversation so far followed by exactly `next_question`.
    ///
    /// The full transcript goes in as context (contents only, in order) and
    /// the returned text is used verbatim.
    pub async fn respond(
        &self,
        transcript: &Transcript,
        next_question: &str,
    ) -> Result<String, LlmError> {
        let messages = vec![
            ChatMessage::system(responder_system_prompt(next_question)),
            ChatMessage::user(transcript.history_text()),
        ];
        let request = CompletionRequest::new(messages).with_max_tokens(512);

        let response = self.llm.complete(request).await?;
        Ok(response.content)
    }
}
