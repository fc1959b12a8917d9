//! Centralized capability checks and the field permission table.
//!
//! Every mutating operation goes through one of these checks before touching
//! the record store, so authorization failures never leave a partial write or
//! a stray audit entry. The field table statically enumerates what each role
//! may edit; `status` and `review_note` are absent on purpose — they change
//! only through the review transition operation.

use crate::error::CoreError;
use crate::roles::ROLE_ADMIN;
use crate::types::DbId;

/// The authenticated caller, as supplied by the auth layer.
#[derive(Debug, Clone)]
pub struct Actor {
    pub id: DbId,
    pub role: String,
}

impl Actor {
    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }
}

/// Require the administrator capability.
pub fn ensure_admin(actor: &Actor) -> Result<(), CoreError> {
    if actor.is_admin() {
        Ok(())
    } else {
        Err(CoreError::Forbidden("Admin role required".into()))
    }
}

/// Require that the caller owns the entity, or is an administrator.
pub fn ensure_owner_or_admin(actor: &Actor, owner_id: DbId) -> Result<(), CoreError> {
    if actor.is_admin() || actor.id == owner_id {
        Ok(())
    } else {
        Err(CoreError::Forbidden(
            "You can only access your own applications".into(),
        ))
    }
}

// ---------------------------------------------------------------------------
// Field permission table
// ---------------------------------------------------------------------------

/// Edit permission for a single application field.
#[derive(Debug, Clone, Copy)]
pub struct FieldPermission {
    pub field: &'static str,
    pub owner_can_edit: bool,
    pub admin_can_edit: bool,
}

/// The content fields of an application and who may edit them directly.
///
/// `status` and `review_note` are intentionally not listed: they are
/// mutated exclusively by the review transition operation.
pub const FIELD_PERMISSIONS: &[FieldPermission] = &[
    FieldPermission { field: "title", owner_can_edit: true, admin_can_edit: true },
    FieldPermission { field: "description", owner_can_edit: true, admin_can_edit: true },
    FieldPermission { field: "technical_desc", owner_can_edit: true, admin_can_edit: true },
    FieldPermission { field: "project_type", owner_can_edit: true, admin_can_edit: true },
    FieldPermission { field: "duration_days", owner_can_edit: true, admin_can_edit: true },
    FieldPermission { field: "cost", owner_can_edit: true, admin_can_edit: true },
    FieldPermission { field: "document_link", owner_can_edit: true, admin_can_edit: true },
];

/// Whether `field` may be edited directly by the given capability.
pub fn can_edit_field(field: &str, is_admin: bool) -> bool {
    FIELD_PERMISSIONS
        .iter()
        .find(|p| p.field == field)
        .map(|p| if is_admin { p.admin_can_edit } else { p.owner_can_edit })
        .unwrap_or(false)
}

/// Reject an edit naming a field outside the caller's allow-list.
pub fn ensure_field_editable(field: &str, is_admin: bool) -> Result<(), CoreError> {
    if can_edit_field(field, is_admin) {
        Ok(())
    } else {
        Err(CoreError::Forbidden(format!(
            "Field '{field}' cannot be edited directly"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roles::{ROLE_ADMIN, ROLE_USER};
    use assert_matches::assert_matches;

    fn admin() -> Actor {
        Actor { id: 1, role: ROLE_ADMIN.to_string() }
    }

    fn user(id: DbId) -> Actor {
        Actor { id, role: ROLE_USER.to_string() }
    }

    #[test]
    fn ensure_admin_accepts_admin() {
        assert!(ensure_admin(&admin()).is_ok());
    }

    #[test]
    fn ensure_admin_rejects_user() {
        assert_matches!(ensure_admin(&user(2)), Err(CoreError::Forbidden(_)));
    }

    #[test]
    fn owner_check_accepts_owner_and_admin() {
        assert!(ensure_owner_or_admin(&user(7), 7).is_ok());
        assert!(ensure_owner_or_admin(&admin(), 7).is_ok());
    }

    #[test]
    fn owner_check_rejects_other_users() {
        assert_matches!(
            ensure_owner_or_admin(&user(8), 7),
            Err(CoreError::Forbidden(_))
        );
    }

    #[test]
    fn content_fields_are_editable_by_both_roles() {
        for p in FIELD_PERMISSIONS {
            assert!(can_edit_field(p.field, false), "{}", p.field);
            assert!(can_edit_field(p.field, true), "{}", p.field);
        }
    }

    #[test]
    fn status_and_review_note_are_never_directly_editable() {
        assert!(!can_edit_field("status", false));
        assert!(!can_edit_field("status", true));
        assert!(!can_edit_field("review_note", false));
        assert!(!can_edit_field("review_note", true));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(!can_edit_field("risk_score", false));
        assert_matches!(
            ensure_field_editable("submitter_id", true),
            Err(CoreError::Forbidden(_))
        );
    }
}
