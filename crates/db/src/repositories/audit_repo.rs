//! Repository for the `audit_log_entries` table.
//!
//! Append and list only. Entries are immutable: this module intentionally
//! has no update or delete method, and none may be added.

use appvet_core::types::DbId;
use sqlx::PgPool;

use crate::models::audit::{AuditLogEntry, CreateAuditEntry};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "\
    id, application_id, actor_id, action, field_name, old_value, \
    new_value, created_at";

/// Provides append and query operations for the audit trail.
pub struct AuditLogRepo;

impl AuditLogRepo {
    /// Append one entry. Id and timestamp are server-assigned.
    pub async fn append(
        pool: &PgPool,
        entry: &CreateAuditEntry,
    ) -> Result<AuditLogEntry, sqlx::Error> {
        let query = format!(
            "INSERT INTO audit_log_entries
                (application_id, actor_id, action, field_name, old_value, new_value)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AuditLogEntry>(&query)
            .bind(entry.application_id)
            .bind(entry.actor_id)
            .bind(&entry.action)
            .bind(&entry.field_name)
            .bind(&entry.old_value)
            .bind(&entry.new_value)
            .fetch_one(pool)
            .await
    }

    /// All entries for an application, newest first (display order).
    pub async fn list_for_application(
        pool: &PgPool,
        application_id: DbId,
    ) -> Result<Vec<AuditLogEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM audit_log_entries
             WHERE application_id = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, AuditLogEntry>(&query)
            .bind(application_id)
            .fetch_all(pool)
            .await
    }

    /// All entries for an application in chronological order (replay order).
    pub async fn list_chronological(
        pool: &PgPool,
        application_id: DbId,
    ) -> Result<Vec<AuditLogEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM audit_log_entries
             WHERE application_id = $1
             ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, AuditLogEntry>(&query)
            .bind(application_id)
            .fetch_all(pool)
            .await
    }

    /// Number of entries recorded for an application.
    pub async fn count_for_application(
        pool: &PgPool,
        application_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*)::BIGINT FROM audit_log_entries WHERE application_id = $1",
        )
        .bind(application_id)
        .fetch_one(pool)
        .await
    }
}
