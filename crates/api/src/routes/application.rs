//! Route definitions for the `/applications` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{application, audit, review, score};
use crate::state::AppState;

/// Routes mounted at `/applications`.
///
/// ```text
/// GET    /                        -> list
/// POST   /                        -> create
/// GET    /{id}                    -> get_by_id
/// PUT    /{id}                    -> update_fields
/// DELETE /{id}                    -> delete
///
/// PUT    /{id}/status             -> transition           (admin only)
/// POST   /bulk-status             -> bulk_transition      (admin only)
///
/// GET    /{id}/risk               -> get_risk
/// POST   /{id}/risk/recompute     -> recompute
///
/// GET    /{id}/audit              -> list_for_application
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(application::list).post(application::create))
        .route(
            "/{id}",
            get(application::get_by_id)
                .put(application::update_fields)
                .delete(application::delete),
        )
        .route("/{id}/status", put(review::transition))
        .route("/bulk-status", post(review::bulk_transition))
        .route("/{id}/risk", get(score::get_risk))
        .route("/{id}/risk/recompute", post(score::recompute))
        .route("/{id}/audit", get(audit::list_for_application))
}
