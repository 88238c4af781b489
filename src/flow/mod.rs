//! Navigation decisions driven by item status.
//!
//! The screens themselves only render; the decision of where to go next
//! after each status observation lives here so it can be matched
//! exhaustively and tested without a terminal.

use std::time::Duration;

use crate::app::{ReadstashError, Result};
use crate::domain::ItemStatus;
use crate::session::SessionContext;

/// The screens a user can be on, mirroring the journey from saving a link
/// through reading and reflecting on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Save,
    Processing,
    Preview,
    Reading,
    TodaysReads,
    Library,
    Reflection,
}

/// What the navigation layer should do after observing a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavDecision {
    /// Stay on the processing screen and keep polling.
    Stay,
    /// Open the preview once the delay elapses (the delay lets the
    /// completed checklist render before the screen changes).
    Preview { after: Duration },
    /// Stop polling and show the failure affordance; no auto-navigation.
    Halt,
}

/// The decision table for the processing flow. `Read` items were already
/// `Ready` once, so they skip the completion delay.
pub fn decide(status: ItemStatus, ready_delay: Duration) -> NavDecision {
    match status {
        ItemStatus::Created | ItemStatus::Processing => NavDecision::Stay,
        ItemStatus::Ready => NavDecision::Preview { after: ready_delay },
        ItemStatus::Read => NavDecision::Preview {
            after: Duration::ZERO,
        },
        ItemStatus::Failed => NavDecision::Halt,
    }
}

/// Message shown when no item can be resolved from any source.
pub const MISSING_ITEM_MESSAGE: &str =
    "We couldn't find the article you're looking for. Please save a link first.";

/// An explicit id always wins and is written back to the session; without
/// one the session binding is the fallback. Callers must not start any
/// network activity when this fails.
pub fn resolve_item_id(explicit: Option<&str>, session: &SessionContext) -> Result<String> {
    if let Some(id) = explicit {
        session.remember_id(id);
        return Ok(id.to_string());
    }

    session
        .get()
        .map(|active| active.id)
        .ok_or(ReadstashError::UnresolvableItem)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(1200);

    #[test]
    fn test_non_terminal_statuses_stay() {
        assert_eq!(decide(ItemStatus::Created, DELAY), NavDecision::Stay);
        assert_eq!(decide(ItemStatus::Processing, DELAY), NavDecision::Stay);
    }

    #[test]
    fn test_ready_previews_after_delay() {
        assert_eq!(
            decide(ItemStatus::Ready, DELAY),
            NavDecision::Preview { after: DELAY }
        );
    }

    #[test]
    fn test_read_previews_immediately() {
        assert_eq!(
            decide(ItemStatus::Read, DELAY),
            NavDecision::Preview {
                after: Duration::ZERO
            }
        );
    }

    #[test]
    fn test_failed_halts() {
        assert_eq!(decide(ItemStatus::Failed, DELAY), NavDecision::Halt);
    }

    #[test]
    fn test_explicit_id_wins_and_is_remembered() {
        let session = SessionContext::new();
        session.set("old".into(), None, None);

        let id = resolve_item_id(Some("new"), &session).unwrap();
        assert_eq!(id, "new");
        assert_eq!(session.get().unwrap().id, "new");
    }

    #[test]
    fn test_session_fallback() {
        let session = SessionContext::new();
        session.set("stored".into(), None, Some(ItemStatus::Processing));

        let id = resolve_item_id(None, &session).unwrap();
        assert_eq!(id, "stored");
    }

    #[test]
    fn test_unresolvable_without_any_source() {
        let session = SessionContext::new();
        assert!(matches!(
            resolve_item_id(None, &session),
            Err(ReadstashError::UnresolvableItem)
        ));
    }
}
