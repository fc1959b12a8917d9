//! Handlers for reading an application's audit trail.

use appvet_core::types::DbId;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use appvet_db::models::audit::AuditLogEntry;
use appvet_db::repositories::AuditLogRepo;

use crate::error::AppResult;
use crate::handlers::application::find_owned;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Response payload for the audit trail listing.
#[derive(Debug, Serialize)]
pub struct AuditTrail {
    pub items: Vec<AuditLogEntry>,
    pub total: usize,
}

/// GET /applications/{id}/audit
///
/// All audit entries for an application, newest first. Owner or admin only.
pub async fn list_for_application(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let application = find_owned(&state, &auth, id).await?;

    let items = AuditLogRepo::list_for_application(&state.pool, application.id).await?;
    let total = items.len();

    Ok(Json(DataResponse {
        data: AuditTrail { items, total },
    }))
}
