//! Handlers for application submission, listing, editing, and deletion.

use appvet_core::audit::actions;
use appvet_core::error::CoreError;
use appvet_core::permissions::{ensure_field_editable, ensure_owner_or_admin};
use appvet_core::risk::{compute_complexity, compute_risk_score, risk_level, RiskFactors, RiskLevelInfo};
use appvet_core::status::validate_status;
use appvet_core::types::DbId;
use appvet_core::validation::{validate_submission, SubmissionInput};
use appvet_core::project_type::ProjectType;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use appvet_db::models::application::{
    Application, ApplicationFilter, CreateApplication, UpdateApplicationFields,
};
use appvet_db::models::audit::CreateAuditEntry;
use appvet_db::repositories::{ApplicationRepo, AuditLogRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::{append_audit_best_effort, audit_value};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Body for POST /applications.
#[derive(Debug, Deserialize)]
pub struct CreateApplicationRequest {
    pub title: String,
    pub description: String,
    pub technical_desc: String,
    pub project_type: String,
    pub duration_days: i32,
    pub cost: f64,
    pub document_link: Option<String>,
}

/// Query parameters for GET /applications.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub status: Option<String>,
    pub project_type: Option<String>,
    pub min_score: Option<i32>,
    pub max_score: Option<i32>,
    pub search: Option<String>,
}

/// Response payload for list queries.
#[derive(Debug, Serialize)]
pub struct ApplicationList {
    pub items: Vec<Application>,
    pub total: usize,
}

/// Response payload for the detail view.
#[derive(Debug, Serialize)]
pub struct ApplicationDetail {
    #[serde(flatten)]
    pub application: Application,
    pub risk_level: RiskLevelInfo,
    pub audit_entry_count: i64,
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

/// POST /applications
///
/// Submit a new application. The caller becomes the owner; status is forced
/// to PENDING and the risk score is computed from the submitted fields.
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateApplicationRequest>,
) -> AppResult<impl IntoResponse> {
    let submission = SubmissionInput {
        title: &input.title,
        description: &input.description,
        technical_desc: &input.technical_desc,
        project_type: &input.project_type,
        duration_days: input.duration_days,
        cost: input.cost,
        document_link: input.document_link.as_deref(),
    };
    let project_type = validate_submission(&submission).map_err(AppError::Core)?;

    let technical_complexity = compute_complexity(input.technical_desc.trim());
    let risk_score = compute_risk_score(&RiskFactors {
        cost: input.cost,
        duration_days: input.duration_days,
        project_type,
        technical_complexity,
    });

    let create = CreateApplication {
        title: input.title.trim().to_string(),
        description: input.description.trim().to_string(),
        technical_desc: input.technical_desc.trim().to_string(),
        project_type: project_type.as_str().to_string(),
        duration_days: input.duration_days,
        cost: input.cost,
        document_link: input.document_link.map(|l| l.trim().to_string()),
        risk_score,
        submitter_id: auth.user_id,
    };

    let application = ApplicationRepo::create(&state.pool, &create).await?;

    append_audit_best_effort(
        &state.pool,
        CreateAuditEntry::bare(application.id, auth.user_id, actions::CREATED),
    )
    .await;

    tracing::info!(
        user_id = auth.user_id,
        application_id = application.id,
        risk_score = application.risk_score,
        "Application submitted"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: application })))
}

// ---------------------------------------------------------------------------
// List / detail
// ---------------------------------------------------------------------------

/// GET /applications
///
/// List applications with optional filters. Non-admin callers only see
/// their own submissions.
pub async fn list(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<impl IntoResponse> {
    if let Some(ref status) = params.status {
        validate_status(status).map_err(AppError::Core)?;
    }
    if let Some(ref project_type) = params.project_type {
        ProjectType::parse(project_type).map_err(AppError::Core)?;
    }

    let filter = ApplicationFilter {
        submitter_id: (!auth.actor().is_admin()).then_some(auth.user_id),
        status: params.status,
        project_type: params.project_type,
        min_score: params.min_score,
        max_score: params.max_score,
        search: params.search,
    };

    let items = ApplicationRepo::list(&state.pool, &filter).await?;
    let total = items.len();

    Ok(Json(DataResponse {
        data: ApplicationList { items, total },
    }))
}

/// GET /applications/{id}
///
/// Fetch one application with its risk level. Owner or admin only.
pub async fn get_by_id(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let application = find_owned(&state, &auth, id).await?;

    let audit_entry_count =
        AuditLogRepo::count_for_application(&state.pool, application.id).await?;
    let risk_level = risk_level(application.risk_score);

    Ok(Json(DataResponse {
        data: ApplicationDetail {
            application,
            risk_level,
            audit_entry_count,
        },
    }))
}

// ---------------------------------------------------------------------------
// Edit content fields
// ---------------------------------------------------------------------------

/// PUT /applications/{id}
///
/// Edit content fields. Owner or admin only; `status` and `review_note` are
/// rejected here by the permission table and change only through the review
/// transition. Each changed field is mirrored into the audit trail.
pub async fn update_fields(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateApplicationFields>,
) -> AppResult<impl IntoResponse> {
    let existing = find_owned(&state, &auth, id).await?;
    let is_admin = auth.actor().is_admin();

    if !any_field_provided(&input) {
        return Err(AppError::BadRequest("No valid fields to update".into()));
    }

    // Authorization and validation both run before any write. A provided
    // field equal to the stored value is a no-op: applied, not audited.
    let changes = collect_field_changes(&existing, &input, is_admin)?;

    let updated = ApplicationRepo::update_fields(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Application",
            id,
        }))?;

    for (field, old_value, new_value) in &changes {
        append_audit_best_effort(
            &state.pool,
            CreateAuditEntry::field_change(
                id,
                auth.user_id,
                actions::UPDATED,
                field,
                Some(old_value.clone()),
                Some(new_value.clone()),
            ),
        )
        .await;
    }

    tracing::info!(
        user_id = auth.user_id,
        application_id = id,
        changed_fields = changes.len(),
        "Application fields updated"
    );

    Ok(Json(DataResponse { data: updated }))
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

/// DELETE /applications/{id}
///
/// Permanently remove an application. Owner or admin only. The audit trail
/// cascades with the row.
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let application = find_owned(&state, &auth, id).await?;

    ApplicationRepo::delete(&state.pool, application.id).await?;

    tracing::info!(
        user_id = auth.user_id,
        application_id = id,
        "Application deleted"
    );

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Fetch an application and require the caller to be its owner or an admin.
pub(crate) async fn find_owned(
    state: &AppState,
    auth: &AuthUser,
    id: DbId,
) -> AppResult<Application> {
    let application = ApplicationRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Application",
            id,
        }))?;

    ensure_owner_or_admin(&auth.actor(), application.submitter_id).map_err(AppError::Core)?;

    Ok(application)
}

/// Whether the edit request names at least one field.
fn any_field_provided(input: &UpdateApplicationFields) -> bool {
    input.title.is_some()
        || input.description.is_some()
        || input.technical_desc.is_some()
        || input.project_type.is_some()
        || input.duration_days.is_some()
        || input.cost.is_some()
        || input.document_link.is_some()
}

/// Diff the requested edit against the current row.
///
/// Returns `(field, old, new)` for every field that would actually change,
/// validating each new value and checking it against the permission table.
fn collect_field_changes(
    existing: &Application,
    input: &UpdateApplicationFields,
    is_admin: bool,
) -> Result<Vec<(&'static str, String, String)>, AppError> {
    use appvet_core::validation;

    let mut changes: Vec<(&'static str, String, String)> = Vec::new();

    if let Some(ref title) = input.title {
        ensure_field_editable("title", is_admin).map_err(AppError::Core)?;
        if title.trim().is_empty() {
            return Err(AppError::Core(CoreError::Validation(
                "Project title is required".into(),
            )));
        }
        if title != &existing.title {
            changes.push(("title", existing.title.clone(), title.clone()));
        }
    }

    if let Some(ref description) = input.description {
        ensure_field_editable("description", is_admin).map_err(AppError::Core)?;
        if description.trim().len() < validation::MIN_DESCRIPTION_LENGTH {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Description must be at least {} characters",
                validation::MIN_DESCRIPTION_LENGTH
            ))));
        }
        if description != &existing.description {
            changes.push(("description", existing.description.clone(), description.clone()));
        }
    }

    if let Some(ref technical_desc) = input.technical_desc {
        ensure_field_editable("technical_desc", is_admin).map_err(AppError::Core)?;
        if technical_desc.trim().len() < validation::MIN_TECHNICAL_DESC_LENGTH {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Technical description must be at least {} characters",
                validation::MIN_TECHNICAL_DESC_LENGTH
            ))));
        }
        if technical_desc != &existing.technical_desc {
            changes.push((
                "technical_desc",
                existing.technical_desc.clone(),
                technical_desc.clone(),
            ));
        }
    }

    if let Some(ref project_type) = input.project_type {
        ensure_field_editable("project_type", is_admin).map_err(AppError::Core)?;
        ProjectType::parse(project_type).map_err(AppError::Core)?;
        if project_type != &existing.project_type {
            changes.push((
                "project_type",
                existing.project_type.clone(),
                project_type.clone(),
            ));
        }
    }

    if let Some(duration_days) = input.duration_days {
        ensure_field_editable("duration_days", is_admin).map_err(AppError::Core)?;
        validation::validate_duration(duration_days).map_err(AppError::Core)?;
        if duration_days != existing.duration_days {
            changes.push((
                "duration_days",
                existing.duration_days.to_string(),
                duration_days.to_string(),
            ));
        }
    }

    if let Some(cost) = input.cost {
        ensure_field_editable("cost", is_admin).map_err(AppError::Core)?;
        validation::validate_cost(cost).map_err(AppError::Core)?;
        if cost != existing.cost {
            changes.push(("cost", existing.cost.to_string(), cost.to_string()));
        }
    }

    if let Some(ref document_link) = input.document_link {
        ensure_field_editable("document_link", is_admin).map_err(AppError::Core)?;
        validation::validate_document_link(document_link).map_err(AppError::Core)?;
        // An empty string clears the link.
        let new_value = (!document_link.trim().is_empty()).then(|| document_link.clone());
        if new_value.as_deref() != existing.document_link.as_deref() {
            changes.push((
                "document_link",
                audit_value(existing.document_link.as_deref()),
                audit_value(new_value.as_deref()),
            ));
        }
    }

    Ok(changes)
}
