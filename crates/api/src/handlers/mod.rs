//! Request handlers.
//!
//! Each submodule provides async handler functions for one resource.
//! Handlers run the capability check first, then the repository write, then
//! mirror the change into the audit trail. Authorization and validation
//! failures return before any persistence, so they never leave a partial
//! write or a stray audit entry.

use appvet_db::models::audit::CreateAuditEntry;
use appvet_db::repositories::AuditLogRepo;
use appvet_db::DbPool;

pub mod application;
pub mod audit;
pub mod auth;
pub mod review;
pub mod score;

/// Append an audit entry for an already-committed mutation.
///
/// Append failures are surfaced as warnings, not errors: the primary change
/// has committed and is not rolled back. This is a known consistency gap
/// accepted by design (see DESIGN.md).
pub(crate) async fn append_audit_best_effort(pool: &DbPool, entry: CreateAuditEntry) {
    if let Err(err) = AuditLogRepo::append(pool, &entry).await {
        tracing::warn!(
            application_id = entry.application_id,
            actor_id = entry.actor_id,
            action = %entry.action,
            error = %err,
            "Failed to append audit entry for committed change"
        );
    }
}

/// Render an optional value the way audit entries store it.
///
/// `None` is recorded as the literal string `None` so a cleared value is
/// distinguishable from an empty one in the trail.
pub(crate) fn audit_value(value: Option<&str>) -> String {
    value.unwrap_or("None").to_string()
}
