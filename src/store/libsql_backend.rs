//! libSQL backend — async `InterviewStore` implementation.
//!
//! Supports local file and in-memory databases.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use libsql::{params, Connection, Database as LibSqlDatabase};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::DatabaseError;
use crate::interview::model::{CandidateProfile, StoredProfile, StoredTechnicalResponse};
use crate::store::migrations;
use crate::store::traits::InterviewStore;

/// libSQL store backend.
///
/// Stores a single connection that is reused for all operations.
/// `libsql::Connection` is `Send + Sync` and safe for concurrent async use.
pub struct LibSqlBackend {
    #[allow(dead_code)]
    db: Arc<LibSqlDatabase>,
    conn: Connection,
}

impl LibSqlBackend {
    /// Open (or create) a local database file and run migrations.
    pub async fn new_local(path: &Path) -> Result<Self, DatabaseError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                DatabaseError::Pool(format!("Failed to create database directory: {e}"))
            })?;
        }

        let db = libsql::Builder::new_local(path)
            .build()
            .await
            .map_err(|e| DatabaseError::Pool(format!("Failed to open libSQL database: {e}")))?;

        let conn = db
            .connect()
            .map_err(|e| DatabaseError::Pool(format!("Failed to create connection: {e}")))?;

        let backend = Self {
            db: Arc::new(db),
            conn,
        };
        backend.run_migrations().await?;
        info!(path = %path.display(), "Database opened");
        Ok(backend)
    }

    /// Create an in-memory database (for tests).
    pub async fn new_memory() -> Result<Self, DatabaseError> {
        let db = libsql::Builder::new_local(":memory:")
            .build()
            .await
            .map_err(|e| {
                DatabaseError::Pool(format!("Failed to create in-memory database: {e}"))
            })?;

        let conn = db
            .connect()
            .map_err(|e| DatabaseError::Pool(format!("Failed to create connection: {e}")))?;

        let backend = Self {
            db: Arc::new(db),
            conn,
        };
        backend.run_migrations().await?;
        Ok(backend)
    }

    fn conn(&self) -> &Connection {
        &self.conn
    }
}

// ── Helper functions ────────────────────────────────────────────────

/// Parse an RFC 3339 or SQLite datetime string into DateTime<Utc>.
fn parse_datetime(s: &str) -> DateTime<Utc> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return dt.with_timezone(&Utc);
    }
    if let Ok(ndt) = chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f") {
        return ndt.and_utc();
    }
    if let Ok(ndt) = chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return ndt.and_utc();
    }
    DateTime::<Utc>::MIN_UTC
}

fn parse_uuid(s: &str) -> Uuid {
    Uuid::parse_str(s).unwrap_or_else(|_| Uuid::nil())
}

/// Map a libsql Row to a StoredProfile.
///
/// Column order matches PROFILE_COLUMNS.
fn row_to_profile(row: &libsql::Row) -> Result<StoredProfile, libsql::Error> {
    let id_str: String = row.get(0)?;
    let experience_years: i64 = row.get(6)?;
    let created_str: String = row.get(8)?;

    Ok(StoredProfile {
        id: parse_uuid(&id_str),
        profile: CandidateProfile {
            name: row.get(1)?,
            phone_number: row.get(2)?,
            email_address: row.get(3)?,
            location: row.get(4)?,
            role: row.get(5)?,
            experience_years: experience_years.max(0) as u32,
            tech_stack: row.get(7)?,
        },
        created_at: parse_datetime(&created_str),
    })
}

/// Map a libsql Row to a StoredTechnicalResponse.
///
/// Column order matches RESPONSE_COLUMNS.
fn row_to_response(row: &libsql::Row) -> Result<StoredTechnicalResponse, libsql::Error> {
    let id_str: String = row.get(0)?;
    let interview_str: String = row.get(1)?;
    let ordinal: i64 = row.get(4)?;
    let created_str: String = row.get(5)?;

    Ok(StoredTechnicalResponse {
        id: parse_uuid(&id_str),
        interview_id: parse_uuid(&interview_str),
        question: row.get(2)?,
        answer: row.get(3)?,
        ordinal: ordinal.max(0) as u32,
        created_at: parse_datetime(&created_str),
    })
}

// ── Trait implementation ────────────────────────────────────────────

const PROFILE_COLUMNS: &str =
    "id, name, phone_number, email_address, location, role, experience_years, tech_stack, created_at";

const RESPONSE_COLUMNS: &str = "id, interview_id, question, answer, ordinal, created_at";

#[async_trait]
impl InterviewStore for LibSqlBackend {
    async fn run_migrations(&self) -> Result<(), DatabaseError> {
        migrations::run_migrations(self.conn()).await
    }

    async fn save_profile(&self, profile: &CandidateProfile) -> Result<Uuid, DatabaseError> {
        let conn = self.conn();
        let id = Uuid::new_v4();
        let now = Utc::now().to_rfc3339();

        conn.execute(
            "INSERT INTO interviews (id, name, phone_number, email_address, location, role, experience_years, tech_stack, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                id.to_string(),
                profile.name.clone(),
                profile.phone_number.clone(),
                profile.email_address.clone(),
                profile.location.clone(),
                profile.role.clone(),
                profile.experience_years as i64,
                profile.tech_stack.clone(),
                now,
            ],
        )
        .await
        .map_err(|e| DatabaseError::Query(format!("save_profile: {e}")))?;

        debug!(interview_id = %id, "Profile row inserted");
        Ok(id)
    }

    async fn save_technical_response(
        &self,
        interview_id: Uuid,
        question: &str,
        answer: &str,
        ordinal: u32,
    ) -> Result<(), DatabaseError> {
        let conn = self.conn();
        let id = Uuid::new_v4();
        let now = Utc::now().to_rfc3339();

        conn.execute(
            "INSERT INTO technical_responses (id, interview_id, question, answer, ordinal, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                id.to_string(),
                interview_id.to_string(),
                question,
                answer,
                ordinal as i64,
                now,
            ],
        )
        .await
        .map_err(|e| DatabaseError::Query(format!("save_technical_response: {e}")))?;

        debug!(interview_id = %interview_id, ordinal, "Technical response row inserted");
        Ok(())
    }

    async fn get_profile(&self, id: Uuid) -> Result<Option<StoredProfile>, DatabaseError> {
        let conn = self.conn();
        let mut rows = conn
            .query(
                &format!("SELECT {PROFILE_COLUMNS} FROM interviews WHERE id = ?1"),
                params![id.to_string()],
            )
            .await
            .map_err(|e| DatabaseError::Query(format!("get_profile: {e}")))?;

        match rows.next().await {
            Ok(Some(row)) => {
                let profile = row_to_profile(&row)
                    .map_err(|e| DatabaseError::Query(format!("get_profile row parse: {e}")))?;
                Ok(Some(profile))
            }
            Ok(None) => Ok(None),
            Err(e) => Err(DatabaseError::Query(format!("get_profile: {e}"))),
        }
    }

    async fn list_technical_responses(
        &self,
        interview_id: Uuid,
    ) -> Result<Vec<StoredTechnicalResponse>, DatabaseError> {
        let conn = self.conn();
        let mut rows = conn
            .query(
                &format!(
                    "SELECT {RESPONSE_COLUMNS} FROM technical_responses WHERE interview_id = ?1 ORDER BY ordinal ASC"
                ),
                params![interview_id.to_string()],
            )
            .await
            .map_err(|e| DatabaseError::Query(format!("list_technical_responses: {e}")))?;

        let mut responses = Vec::new();
        while let Ok(Some(row)) = rows.next().await {
            match row_to_response(&row) {
                Ok(response) => responses.push(response),
                Err(e) => {
                    tracing::warn!("Skipping technical response row: {e}");
                }
            }
        }
        Ok(responses)
    }

    async fn count_profiles(&self) -> Result<u64, DatabaseError> {
        let conn = self.conn();
        let mut rows = conn
            .query("SELECT COUNT(*) FROM interviews", ())
            .await
            .map_err(|e| DatabaseError::Query(format!("count_profiles: {e}")))?;

        match rows.next().await {
            Ok(Some(row)) => {
                let count: i64 = row
                    .get(0)
                    .map_err(|e| DatabaseError::Query(format!("count_profiles: {e}")))?;
                Ok(count.max(0) as u64)
            }
            Ok(None) => Ok(0),
            Err(e) => Err(DatabaseError::Query(format!("count_profiles: {e}"))),
        }
    }
}
