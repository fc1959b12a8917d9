//! Handlers for the review workflow: status transitions and bulk decisions.
//!
//! Transitions are admin-only. Every committed transition appends a
//! STATUS_CHANGED entry recording the status the row actually held at commit
//! time (read under the same row lock as the update), and a separate
//! REVIEW_NOTE_ADDED entry when the note changed.

use appvet_core::audit::actions;
use appvet_core::error::CoreError;
use appvet_core::status::validate_transition;
use appvet_core::types::DbId;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use appvet_db::models::application::{Application, TransitionOutcome};
use appvet_db::models::audit::CreateAuditEntry;
use appvet_db::repositories::ApplicationRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::{append_audit_best_effort, audit_value};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Body for PUT /applications/{id}/status.
#[derive(Debug, Deserialize)]
pub struct TransitionRequest {
    /// Target status: APPROVED or REJECTED.
    pub status: String,
    /// Optional review note; replaces the stored note when present.
    pub note: Option<String>,
}

/// Body for POST /applications/bulk-status.
#[derive(Debug, Deserialize)]
pub struct BulkStatusRequest {
    pub ids: Vec<DbId>,
    pub status: String,
    pub note: Option<String>,
}

/// One failed item in a bulk decision.
#[derive(Debug, Serialize)]
pub struct BulkFailure {
    pub id: DbId,
    pub error: String,
}

/// Outcome of a bulk decision: partial success is expected and reported.
#[derive(Debug, Serialize)]
pub struct BulkStatusResult {
    pub updated: usize,
    pub failed: Vec<BulkFailure>,
}

// ---------------------------------------------------------------------------
// Single transition
// ---------------------------------------------------------------------------

/// PUT /applications/{id}/status
///
/// Approve or reject an application. Admin only.
pub async fn transition(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<TransitionRequest>,
) -> AppResult<impl IntoResponse> {
    let application =
        apply_transition(&state, admin.user_id, id, &input.status, input.note.as_deref()).await?;

    tracing::info!(
        user_id = admin.user_id,
        application_id = id,
        status = %application.status,
        "Application status changed"
    );

    Ok(Json(DataResponse { data: application }))
}

// ---------------------------------------------------------------------------
// Bulk transitions
// ---------------------------------------------------------------------------

/// POST /applications/bulk-status
///
/// Apply one decision to many applications. Admin only. Items succeed or
/// fail independently; the response reports the success count and the
/// per-item failures.
pub async fn bulk_transition(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<BulkStatusRequest>,
) -> AppResult<impl IntoResponse> {
    if input.ids.is_empty() {
        return Err(AppError::BadRequest("No application ids provided".into()));
    }

    let mut updated = 0usize;
    let mut failed: Vec<BulkFailure> = Vec::new();

    for &id in &input.ids {
        match apply_transition(&state, admin.user_id, id, &input.status, input.note.as_deref())
            .await
        {
            Ok(_) => updated += 1,
            Err(err) => failed.push(BulkFailure {
                id,
                error: err.to_string(),
            }),
        }
    }

    tracing::info!(
        user_id = admin.user_id,
        requested = input.ids.len(),
        updated,
        failed = failed.len(),
        status = %input.status,
        "Bulk status change applied"
    );

    Ok(Json(DataResponse {
        data: BulkStatusResult { updated, failed },
    }))
}

// ---------------------------------------------------------------------------
// Shared transition logic
// ---------------------------------------------------------------------------

/// Validate and commit one status transition, then mirror it into the
/// audit trail.
async fn apply_transition(
    state: &AppState,
    actor_id: DbId,
    id: DbId,
    target_status: &str,
    note: Option<&str>,
) -> AppResult<Application> {
    let existing = ApplicationRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Application",
            id,
        }))?;

    validate_transition(&existing.status, target_status).map_err(AppError::Core)?;

    let outcome = ApplicationRepo::transition_status(&state.pool, id, target_status, note)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Application",
            id,
        }))?;

    record_transition(state, actor_id, &outcome).await;

    Ok(outcome.into_application())
}

/// Append the audit entries implied by a committed transition.
///
/// Old values come from the outcome's prior columns, not the pre-check
/// read, so a concurrent transition that committed in between is still
/// recorded faithfully.
async fn record_transition(state: &AppState, actor_id: DbId, outcome: &TransitionOutcome) {
    append_audit_best_effort(
        &state.pool,
        CreateAuditEntry::field_change(
            outcome.id,
            actor_id,
            actions::STATUS_CHANGED,
            "status",
            Some(outcome.prev_status.clone()),
            Some(outcome.status.clone()),
        ),
    )
    .await;

    if outcome.review_note != outcome.prev_review_note {
        append_audit_best_effort(
            &state.pool,
            CreateAuditEntry::field_change(
                outcome.id,
                actor_id,
                actions::REVIEW_NOTE_ADDED,
                "review_note",
                Some(audit_value(outcome.prev_review_note.as_deref())),
                Some(audit_value(outcome.review_note.as_deref())),
            ),
        )
        .await;
    }
}
