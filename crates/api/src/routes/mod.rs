//! Route tree assembly.

pub mod application;
pub mod auth;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                           register (public)
/// /auth/login                              login (public)
///
/// /applications                            list, create
/// /applications/{id}                       get, edit fields, delete
/// /applications/{id}/status                transition (admin only)
/// /applications/bulk-status                bulk transition (admin only)
/// /applications/{id}/risk                  risk analysis
/// /applications/{id}/risk/recompute        recompute score
/// /applications/{id}/audit                 audit trail
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/applications", application::router())
}
