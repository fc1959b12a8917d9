//! Audit trail actions and history replay.
//!
//! This module lives in `core` (zero internal deps) so the DB and API layers
//! share the same action vocabulary, and so the replay fold can be tested as
//! a pure function. Entries themselves are persisted by `appvet-db` and are
//! append-only: no update or delete path exists anywhere in the workspace.

use crate::status::STATUS_PENDING;

// ---------------------------------------------------------------------------
// Action constants
// ---------------------------------------------------------------------------

/// Known action values for audit log entries.
pub mod actions {
    /// Application was submitted.
    pub const CREATED: &str = "CREATED";
    /// Status moved between PENDING/APPROVED/REJECTED.
    pub const STATUS_CHANGED: &str = "STATUS_CHANGED";
    /// A reviewer attached or replaced the review note.
    pub const REVIEW_NOTE_ADDED: &str = "REVIEW_NOTE_ADDED";
    /// A content field (or the risk score) changed value.
    pub const UPDATED: &str = "UPDATED";
}

/// All valid action values.
pub const VALID_ACTIONS: &[&str] = &[
    actions::CREATED,
    actions::STATUS_CHANGED,
    actions::REVIEW_NOTE_ADDED,
    actions::UPDATED,
];

/// Field name used on UPDATED entries written by score recomputation.
pub const FIELD_RISK_SCORE: &str = "risk_score";

// ---------------------------------------------------------------------------
// History replay
// ---------------------------------------------------------------------------

/// The fields of one audit entry that the replay fold consumes.
///
/// `appvet-db`'s `AuditLogEntry` rows convert losslessly into this; tests
/// construct it directly.
#[derive(Debug, Clone)]
pub struct RecordedChange {
    pub action: String,
    pub field_name: Option<String>,
    pub new_value: Option<String>,
}

/// Application state derivable from the audit trail alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayedState {
    pub status: String,
    pub review_note: Option<String>,
    pub risk_score: Option<i32>,
}

/// Fold an application's audit entries (in chronological order) into the
/// state they imply.
///
/// CREATED resets to the initial PENDING state; STATUS_CHANGED and
/// REVIEW_NOTE_ADDED apply their `new_value`; UPDATED entries on
/// `risk_score` track the score. UPDATED entries on content fields do not
/// affect the replayed state. The result must match the application row —
/// this is the ledger's completeness guarantee.
pub fn replay<'a, I>(entries: I) -> ReplayedState
where
    I: IntoIterator<Item = &'a RecordedChange>,
{
    let mut state = ReplayedState {
        status: STATUS_PENDING.to_string(),
        review_note: None,
        risk_score: None,
    };

    for entry in entries {
        match entry.action.as_str() {
            actions::CREATED => {
                state.status = STATUS_PENDING.to_string();
                state.review_note = None;
            }
            actions::STATUS_CHANGED => {
                if let Some(new_status) = &entry.new_value {
                    state.status = new_status.clone();
                }
            }
            actions::REVIEW_NOTE_ADDED => {
                state.review_note = entry.new_value.clone();
            }
            actions::UPDATED => {
                if entry.field_name.as_deref() == Some(FIELD_RISK_SCORE) {
                    state.risk_score = entry
                        .new_value
                        .as_deref()
                        .and_then(|v| v.parse::<i32>().ok());
                }
            }
            // Unknown actions are ignored rather than failing the replay.
            _ => {}
        }
    }

    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::{STATUS_APPROVED, STATUS_REJECTED};

    fn change(action: &str, field: Option<&str>, new_value: Option<&str>) -> RecordedChange {
        RecordedChange {
            action: action.to_string(),
            field_name: field.map(str::to_string),
            new_value: new_value.map(str::to_string),
        }
    }

    #[test]
    fn empty_history_replays_to_pending() {
        let state = replay(&[]);
        assert_eq!(state.status, STATUS_PENDING);
        assert_eq!(state.review_note, None);
    }

    #[test]
    fn created_entry_replays_to_pending() {
        let history = [change(actions::CREATED, None, None)];
        assert_eq!(replay(&history).status, STATUS_PENDING);
    }

    #[test]
    fn status_changes_apply_in_order() {
        let history = [
            change(actions::CREATED, None, None),
            change(actions::STATUS_CHANGED, Some("status"), Some(STATUS_APPROVED)),
            change(actions::STATUS_CHANGED, Some("status"), Some(STATUS_REJECTED)),
        ];
        assert_eq!(replay(&history).status, STATUS_REJECTED);
    }

    #[test]
    fn review_note_entries_replace_the_note() {
        let history = [
            change(actions::CREATED, None, None),
            change(actions::STATUS_CHANGED, Some("status"), Some(STATUS_APPROVED)),
            change(actions::REVIEW_NOTE_ADDED, Some("review_note"), Some("solid plan")),
            change(actions::REVIEW_NOTE_ADDED, Some("review_note"), Some("revisit budget")),
        ];
        let state = replay(&history);
        assert_eq!(state.status, STATUS_APPROVED);
        assert_eq!(state.review_note.as_deref(), Some("revisit budget"));
    }

    #[test]
    fn content_updates_do_not_disturb_status() {
        let history = [
            change(actions::CREATED, None, None),
            change(actions::UPDATED, Some("title"), Some("New title")),
            change(actions::UPDATED, Some("cost"), Some("12000")),
        ];
        let state = replay(&history);
        assert_eq!(state.status, STATUS_PENDING);
        assert_eq!(state.risk_score, None);
    }

    #[test]
    fn risk_score_updates_are_tracked() {
        let history = [
            change(actions::CREATED, None, None),
            change(actions::UPDATED, Some(FIELD_RISK_SCORE), Some("18")),
            change(actions::UPDATED, Some(FIELD_RISK_SCORE), Some("45")),
        ];
        assert_eq!(replay(&history).risk_score, Some(45));
    }

    #[test]
    fn unknown_actions_are_ignored() {
        let history = [
            change(actions::CREATED, None, None),
            change("EXPORTED", None, None),
        ];
        assert_eq!(replay(&history).status, STATUS_PENDING);
    }

    #[test]
    fn action_vocabulary_is_closed() {
        assert_eq!(VALID_ACTIONS.len(), 4);
        assert!(VALID_ACTIONS.contains(&"CREATED"));
        assert!(VALID_ACTIONS.contains(&"STATUS_CHANGED"));
        assert!(VALID_ACTIONS.contains(&"REVIEW_NOTE_ADDED"));
        assert!(VALID_ACTIONS.contains(&"UPDATED"));
    }
}
