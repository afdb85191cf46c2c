//! Prompt templates and response parsing for the interview flow.

/// Opening assistant turn for every new session.
pub const GREETING: &str = "Hello! I'm Theodore. May I have your full name, please?";

/// Fixed final assistant turn once all technical questions are answered (or
/// none could be generated).
pub const CLOSING_MESSAGE: &str = "Thank you. This concludes the interview.";

/// Instruction for the question-generation call.
///
/// The model is told to return only the questions, one per line; the output
/// is parsed with [`parse_question_list`] and whatever count comes back is
/// treated as the whole technical phase.
pub fn question_list_prompt(role: &str, tech_stack: &str, count: usize) -> String {
    format!(
        "Generate exactly {count} basic technical interview questions\n\
         for a candidate applying for the role of {role}\n\
         with experience in {tech_stack}.\n\
         Return ONLY the questions, each on a new line."
    )
}

/// System prompt for the responder call. The conversation history goes in as
/// the user message.
pub fn responder_system_prompt(question: &str) -> String {
    format!(
        "You are Theodore, a professional interviewer.\n\
         Acknowledge briefly, then ask ONLY this question:\n\
         {question}"
    )
}

/// Split a raw generation result into individual questions: one per line,
/// trimmed, empty lines discarded.
pub fn parse_question_list(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}
