//! Session-scoped "which item am I working on" context.
//!
//! A typed replacement for the ambient browser-storage keys the flow needs:
//! the active item's id plus its last-known url and status. The binding is
//! process-local, last-writer-wins, and read by whichever screen comes next
//! in the sequence. Two concurrent processes get independent sessions, so
//! there is nothing to race on here.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::domain::ItemStatus;

/// Pointer to the item currently in focus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveItem {
    pub id: String,
    /// The originally submitted link, when this session saved it.
    pub url: Option<String>,
    /// Last status observed by a fetch or the polling task.
    pub status: Option<ItemStatus>,
}

#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    active: Arc<Mutex<Option<ActiveItem>>>,
    user_synced: Arc<AtomicBool>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Option<ActiveItem>> {
        // The lock is only ever held for a field copy, never across an await.
        self.active.lock().expect("active-item lock poisoned")
    }

    /// Overwrite the binding unconditionally. Last writer wins.
    pub fn set(&self, id: String, url: Option<String>, status: Option<ItemStatus>) {
        *self.lock() = Some(ActiveItem { id, url, status });
    }

    /// Record an id that arrived from the outside (a CLI argument or a list
    /// selection). A new id invalidates the remembered url and status.
    pub fn remember_id(&self, id: &str) {
        let mut guard = self.lock();
        match guard.as_ref() {
            Some(active) if active.id == id => {}
            _ => {
                *guard = Some(ActiveItem {
                    id: id.to_string(),
                    url: None,
                    status: None,
                });
            }
        }
    }

    /// Refresh the cached status after a successful fetch. Ignored when the
    /// binding has moved on to a different item in the meantime.
    pub fn update_status(&self, id: &str, status: ItemStatus) {
        let mut guard = self.lock();
        if let Some(active) = guard.as_mut() {
            if active.id == id {
                active.status = Some(status);
            }
        }
    }

    pub fn get(&self) -> Option<ActiveItem> {
        self.lock().clone()
    }

    pub fn user_synced(&self) -> bool {
        self.user_synced.load(Ordering::Relaxed)
    }

    pub fn mark_user_synced(&self) {
        self.user_synced.store(true, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_session_reads_absent() {
        let session = SessionContext::new();
        assert!(session.get().is_none());
    }

    #[test]
    fn test_last_writer_wins() {
        let session = SessionContext::new();
        session.set("a".into(), Some("https://a".into()), Some(ItemStatus::Created));
        session.set("b".into(), None, Some(ItemStatus::Processing));

        let active = session.get().unwrap();
        assert_eq!(active.id, "b");
        assert_eq!(active.url, None);
        assert_eq!(active.status, Some(ItemStatus::Processing));
    }

    #[test]
    fn test_remember_id_keeps_context_for_same_item() {
        let session = SessionContext::new();
        session.set("a".into(), Some("https://a".into()), Some(ItemStatus::Ready));
        session.remember_id("a");

        let active = session.get().unwrap();
        assert_eq!(active.url.as_deref(), Some("https://a"));
        assert_eq!(active.status, Some(ItemStatus::Ready));
    }

    #[test]
    fn test_remember_id_resets_context_for_new_item() {
        let session = SessionContext::new();
        session.set("a".into(), Some("https://a".into()), Some(ItemStatus::Ready));
        session.remember_id("b");

        let active = session.get().unwrap();
        assert_eq!(active.id, "b");
        assert!(active.url.is_none());
        assert!(active.status.is_none());
    }

    #[test]
    fn test_update_status_only_touches_matching_item() {
        let session = SessionContext::new();
        session.set("a".into(), None, Some(ItemStatus::Processing));
        session.update_status("other", ItemStatus::Ready);
        assert_eq!(session.get().unwrap().status, Some(ItemStatus::Processing));

        session.update_status("a", ItemStatus::Ready);
        assert_eq!(session.get().unwrap().status, Some(ItemStatus::Ready));
    }

    #[test]
    fn test_clones_share_state() {
        let session = SessionContext::new();
        let clone = session.clone();
        clone.set("a".into(), None, None);
        assert_eq!(session.get().unwrap().id, "a");

        clone.mark_user_synced();
        assert!(session.user_synced());
    }
}
