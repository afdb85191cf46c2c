//! Interview flow — state machine, validation, prompts, and models.

pub mod engine;
pub mod generator;
pub mod model;
pub mod prompts;
pub mod responder;
pub mod state;
pub mod validate;

pub use engine::{InterviewEngine, TurnOutcome};
pub use state::{InterviewPhase, InterviewSession};
