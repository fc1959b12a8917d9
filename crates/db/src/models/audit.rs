//! Audit trail entity model and DTO.
//!
//! Entries are immutable once created: there is no update DTO and no
//! `updated_at` column. The repository exposes append and list only.

use appvet_core::audit::RecordedChange;
use appvet_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A single audit log entry. Immutable once created.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AuditLogEntry {
    pub id: DbId,
    pub application_id: DbId,
    pub actor_id: DbId,
    pub action: String,
    pub field_name: Option<String>,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
    pub created_at: Timestamp,
}

impl AuditLogEntry {
    /// Project this entry into the fields the replay fold consumes.
    pub fn as_recorded_change(&self) -> RecordedChange {
        RecordedChange {
            action: self.action.clone(),
            field_name: self.field_name.clone(),
            new_value: self.new_value.clone(),
        }
    }
}

/// DTO for appending a new audit log entry. Id and timestamp are
/// server-assigned on insert.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAuditEntry {
    pub application_id: DbId,
    pub actor_id: DbId,
    pub action: String,
    pub field_name: Option<String>,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
}

impl CreateAuditEntry {
    /// An entry with no field/value payload (e.g. CREATED).
    pub fn bare(application_id: DbId, actor_id: DbId, action: &str) -> Self {
        Self {
            application_id,
            actor_id,
            action: action.to_string(),
            field_name: None,
            old_value: None,
            new_value: None,
        }
    }

    /// An entry recording one field changing from `old` to `new`.
    pub fn field_change(
        application_id: DbId,
        actor_id: DbId,
        action: &str,
        field_name: &str,
        old_value: Option<String>,
        new_value: Option<String>,
    ) -> Self {
        Self {
            application_id,
            actor_id,
            action: action.to_string(),
            field_name: Some(field_name.to_string()),
            old_value,
            new_value,
        }
    }
}
