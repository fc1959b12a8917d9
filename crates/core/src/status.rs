//! Application status constants and the review state machine.
//!
//! Statuses are stored as SCREAMING_SNAKE_CASE text. PENDING is the only
//! initial state; reviewers may move an application between APPROVED and
//! REJECTED in either direction, but nothing returns to PENDING short of
//! re-creating the application.

use crate::error::CoreError;

/// Awaiting review. Initial state of every application.
pub const STATUS_PENDING: &str = "PENDING";

/// Approved by an administrator.
pub const STATUS_APPROVED: &str = "APPROVED";

/// Rejected by an administrator.
pub const STATUS_REJECTED: &str = "REJECTED";

/// All valid status values.
pub const VALID_STATUSES: &[&str] = &[STATUS_PENDING, STATUS_APPROVED, STATUS_REJECTED];

/// Review statuses a transition may target. PENDING is deliberately absent.
pub const DECISION_STATUSES: &[&str] = &[STATUS_APPROVED, STATUS_REJECTED];

/// Validate that a status string is one of the accepted values.
pub fn validate_status(status: &str) -> Result<(), CoreError> {
    if VALID_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid status '{status}'. Must be one of: {}",
            VALID_STATUSES.join(", ")
        )))
    }
}

/// Validate a requested status transition.
///
/// Allowed: PENDING -> APPROVED/REJECTED, and APPROVED <-> REJECTED
/// (decisions are reversible). Targeting PENDING or re-targeting the
/// current status is rejected.
pub fn validate_transition(current: &str, target: &str) -> Result<(), CoreError> {
    if !DECISION_STATUSES.contains(&target) {
        return Err(CoreError::Validation(format!(
            "Invalid target status '{target}'. Must be one of: {}",
            DECISION_STATUSES.join(", ")
        )));
    }

    if current == target {
        return Err(CoreError::Conflict(format!(
            "Application is already {target}"
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn all_stored_statuses_accepted() {
        assert!(validate_status(STATUS_PENDING).is_ok());
        assert!(validate_status(STATUS_APPROVED).is_ok());
        assert!(validate_status(STATUS_REJECTED).is_ok());
    }

    #[test]
    fn unknown_status_rejected() {
        let err = validate_status("ARCHIVED").unwrap_err();
        assert_matches!(err, CoreError::Validation(_));
    }

    #[test]
    fn pending_can_be_approved_or_rejected() {
        assert!(validate_transition(STATUS_PENDING, STATUS_APPROVED).is_ok());
        assert!(validate_transition(STATUS_PENDING, STATUS_REJECTED).is_ok());
    }

    #[test]
    fn decisions_are_reversible() {
        assert!(validate_transition(STATUS_APPROVED, STATUS_REJECTED).is_ok());
        assert!(validate_transition(STATUS_REJECTED, STATUS_APPROVED).is_ok());
    }

    #[test]
    fn nothing_transitions_back_to_pending() {
        assert_matches!(
            validate_transition(STATUS_APPROVED, STATUS_PENDING),
            Err(CoreError::Validation(_))
        );
        assert_matches!(
            validate_transition(STATUS_REJECTED, STATUS_PENDING),
            Err(CoreError::Validation(_))
        );
        // Even from PENDING itself, PENDING is not a transition target.
        assert_matches!(
            validate_transition(STATUS_PENDING, STATUS_PENDING),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn same_status_transition_conflicts() {
        assert_matches!(
            validate_transition(STATUS_APPROVED, STATUS_APPROVED),
            Err(CoreError::Conflict(_))
        );
    }

    #[test]
    fn unknown_target_rejected() {
        assert_matches!(
            validate_transition(STATUS_PENDING, "ON_HOLD"),
            Err(CoreError::Validation(_))
        );
    }
}
