//! Application entity model and DTOs.

use appvet_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An application row from the `applications` table.
///
/// `status` and `project_type` are stored as SCREAMING_SNAKE_CASE text;
/// the valid values live in `appvet_core::{status, project_type}`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Application {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub technical_desc: String,
    pub project_type: String,
    pub duration_days: i32,
    pub cost: f64,
    pub document_link: Option<String>,
    pub status: String,
    pub risk_score: i32,
    pub review_note: Option<String>,
    pub submitter_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a new application.
///
/// Status is not settable here: every application starts PENDING. The risk
/// score is computed by the caller before insert.
#[derive(Debug, Clone)]
pub struct CreateApplication {
    pub title: String,
    pub description: String,
    pub technical_desc: String,
    pub project_type: String,
    pub duration_days: i32,
    pub cost: f64,
    pub document_link: Option<String>,
    pub risk_score: i32,
    pub submitter_id: DbId,
}

/// DTO for editing content fields. All fields optional; `status`,
/// `review_note`, and `risk_score` are deliberately absent (they change
/// only through the transition and recompute operations).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateApplicationFields {
    pub title: Option<String>,
    pub description: Option<String>,
    pub technical_desc: Option<String>,
    pub project_type: Option<String>,
    pub duration_days: Option<i32>,
    pub cost: Option<f64>,
    pub document_link: Option<String>,
}

/// Filter parameters for listing applications.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApplicationFilter {
    /// Restrict to applications submitted by this user (set for non-admins).
    pub submitter_id: Option<DbId>,
    pub status: Option<String>,
    pub project_type: Option<String>,
    pub min_score: Option<i32>,
    pub max_score: Option<i32>,
    /// Case-insensitive substring over title, description, technical_desc.
    pub search: Option<String>,
}

/// Result of a status transition: the updated row plus the values the row
/// held immediately before the update, read under the same row lock.
#[derive(Debug, Clone, FromRow)]
pub struct TransitionOutcome {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub technical_desc: String,
    pub project_type: String,
    pub duration_days: i32,
    pub cost: f64,
    pub document_link: Option<String>,
    pub status: String,
    pub risk_score: i32,
    pub review_note: Option<String>,
    pub submitter_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    /// Status before this transition committed.
    pub prev_status: String,
    /// Review note before this transition committed.
    pub prev_review_note: Option<String>,
}

impl TransitionOutcome {
    /// The updated application row, without the prior-value columns.
    pub fn into_application(self) -> Application {
        Application {
            id: self.id,
            title: self.title,
            description: self.description,
            technical_desc: self.technical_desc,
            project_type: self.project_type,
            duration_days: self.duration_days,
            cost: self.cost,
            document_link: self.document_link,
            status: self.status,
            risk_score: self.risk_score,
            review_note: self.review_note,
            submitter_id: self.submitter_id,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
