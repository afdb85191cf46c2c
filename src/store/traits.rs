//! `InterviewStore` trait — async interface for interview persistence.
//!
//! Records are only ever appended; nothing in the interview flow updates a
//! row in place.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::DatabaseError;
use crate::interview::model::{CandidateProfile, StoredProfile, StoredTechnicalResponse};

/// Backend-agnostic store for candidate profiles and technical responses.
#[async_trait]
pub trait InterviewStore: Send + Sync {
    /// Run all pending schema migrations.
    async fn run_migrations(&self) -> Result<(), DatabaseError>;

    /// Insert one complete candidate profile. Returns the assigned id.
    async fn save_profile(&self, profile: &CandidateProfile) -> Result<Uuid, DatabaseError>;

    /// Insert one technical response tied to a persisted profile.
    async fn save_technical_response(
        &self,
        interview_id: Uuid,
        question: &str,
        answer: &str,
        ordinal: u32,
    ) -> Result<(), DatabaseError>;

    /// Fetch a persisted profile by id.
    async fn get_profile(&self, id: Uuid) -> Result<Option<StoredProfile>, DatabaseError>;

    /// All technical responses for an interview, ordered by ordinal.
    async fn list_technical_responses(
        &self,
        interview_id: Uuid,
    ) -> Result<Vec<StoredTechnicalResponse>, DatabaseError>;

    /// Total number of persisted profiles.
    async fn count_profiles(&self) -> Result<u64, DatabaseError>;
}
