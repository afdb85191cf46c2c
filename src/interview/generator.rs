//! Question generator — one LLM call per completed profile.

use std::sync::Arc;

use crate::error::LlmError;
use crate::llm::{ChatMessage, CompletionRequest, LlmProvider};

use super::prompts::{parse_question_list, question_list_prompt};

/// Wraps the question-generation call to the model.
pub struct QuestionGenerator {
    llm: Arc<dyn LlmProvider>,
    count: usize,
}

impl QuestionGenerator {
    pub fn new(llm: Arc<dyn LlmProvider>, count: usize) -> Self {
        Self { llm, count }
    }

    /// Ask the model for technical questions tailored to `role` and
    /// `tech_stack`.
    ///
    /// The model is instructed to produce exactly `count` questions but is
    /// not trusted to: whatever non-empty list parses out is returned, and
    /// the caller treats it as the full technical phase. An empty or failed
    /// generation is an error.
    pub async fn generate(&self, role: &str, tech_stack: &str) -> Result<Vec<String>, LlmError> {
        let messages = vec![ChatMessage::system(question_list_prompt(
            role,
            tech_stack,
            self.count,
        ))];
        let request = CompletionRequest::new(messages)
            .with_max_tokens(512)
            .with_temperature(0.7);

        let response = self.llm.complete(request).await?;
        let questions = parse_question_list(&response.content);
        if questions.is_empty() {
            return Err(LlmError::EmptyResponse {
                model: self.llm.model_name().to_string(),
            });
        }

        tracing::debug!(requested = self.count, returned = questions.len(), "Generated technical questions");
        Ok(questions)
    }
}
