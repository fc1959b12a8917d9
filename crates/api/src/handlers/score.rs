//! Handlers for risk analysis and explicit score recomputation.

use appvet_core::audit::{actions, FIELD_RISK_SCORE};
use appvet_core::error::CoreError;
use appvet_core::project_type::ProjectType;
use appvet_core::risk::{
    compute_complexity, compute_risk_score, risk_level, RiskFactors, RiskLevelInfo,
};
use appvet_core::types::DbId;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use appvet_db::models::application::Application;
use appvet_db::models::audit::CreateAuditEntry;
use appvet_db::repositories::ApplicationRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::application::find_owned;
use crate::handlers::append_audit_best_effort;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// Breakdown of a risk computation for an application.
#[derive(Debug, Serialize)]
pub struct RiskAnalysis {
    pub current_score: i32,
    pub level: RiskLevelInfo,
    pub factors: RiskFactors,
}

/// Response payload for a recomputation.
#[derive(Debug, Serialize)]
pub struct RecomputeResult {
    pub application: Application,
    pub old_score: i32,
    pub new_score: i32,
    pub level: RiskLevelInfo,
    pub factors: RiskFactors,
}

/// Derive the current risk factors from a stored application.
fn factors_of(application: &Application) -> RiskFactors {
    RiskFactors {
        cost: application.cost,
        duration_days: application.duration_days,
        project_type: ProjectType::parse(&application.project_type)
            .unwrap_or(ProjectType::Other),
        technical_complexity: compute_complexity(&application.technical_desc),
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /applications/{id}/risk
///
/// Current stored score, its level, and the factor breakdown as the inputs
/// stand today. Owner or admin only.
pub async fn get_risk(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let application = find_owned(&state, &auth, id).await?;

    let analysis = RiskAnalysis {
        current_score: application.risk_score,
        level: risk_level(application.risk_score),
        factors: factors_of(&application),
    };

    Ok(Json(DataResponse { data: analysis }))
}

/// POST /applications/{id}/risk/recompute
///
/// Recompute the risk score from the application's current fields and store
/// it. Owner or admin only. The change is recorded as an UPDATED entry on
/// `risk_score` with the old and new values; historical entries are never
/// altered.
pub async fn recompute(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let existing = find_owned(&state, &auth, id).await?;

    let factors = factors_of(&existing);
    let new_score = compute_risk_score(&factors);
    let old_score = existing.risk_score;

    let application = ApplicationRepo::update_risk_score(&state.pool, id, new_score)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Application",
            id,
        }))?;

    append_audit_best_effort(
        &state.pool,
        CreateAuditEntry::field_change(
            id,
            auth.user_id,
            actions::UPDATED,
            FIELD_RISK_SCORE,
            Some(old_score.to_string()),
            Some(new_score.to_string()),
        ),
    )
    .await;

    tracing::info!(
        user_id = auth.user_id,
        application_id = id,
        old_score,
        new_score,
        "Risk score recomputed"
    );

    Ok(Json(DataResponse {
        data: RecomputeResult {
            application,
            old_score,
            new_score,
            level: risk_level(new_score),
            factors,
        },
    }))
}
