//! Pending confirmations for destructive actions.
//!
//! A destructive request records a [`PendingAction`] on the store and hands
//! back the prompt to show. The caller then confirms or cancels.

use noveltrack_core::{NovelId, Result};
use tracing::debug;
use crate::store::NovelStore;

/// A destructive action awaiting confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingAction {
    /// Delete one novel
    DeleteNovel(NovelId),
    /// Drop every notification
    ClearNotifications,
}

/// Prompt for a pending action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    /// Dialog title
    pub title: String,
    /// Dialog body
    pub message: String,
    /// What confirming will do
    pub action: PendingAction,
}

impl NovelStore {
    /// Ask to delete a novel. Fails if the novel does not exist.
    pub fn request_delete(&mut self, id: NovelId) -> Result<Confirmation> {
        let title = self.novel(id)?.title.clone();
        let action = PendingAction::DeleteNovel(id);
        self.pending = Some(action);
        debug!(?action, "confirmation requested");
        Ok(Confirmation {
            title: "Delete Novel".to_string(),
            message: format!(
                "Are you sure you want to delete \"{}\"? This action cannot be undone.",
                title
            ),
            action,
        })
    }

    /// Ask to clear all notifications.
    pub fn request_clear_notifications(&mut self) -> Confirmation {
        let action = PendingAction::ClearNotifications;
        self.pending = Some(action);
        debug!(?action, "confirmation requested");
        Confirmation {
            title: "Clear Notifications".to_string(),
            message: "Are you sure you want to clear all notifications?".to_string(),
            action,
        }
    }

    /// The action awaiting confirmation, if any.
    pub fn pending_action(&self) -> Option<PendingAction> {
        self.pending
    }

    /// Run the pending action and clear it.
    ///
    /// Returns the action that ran, or `None` if nothing was pending. The
    /// pending slot is cleared even when the action fails.
    pub fn confirm_pending(&mut self) -> Result<Option<PendingAction>> {
        let Some(action) = self.pending.take() else {
            return Ok(None);
        };
        match action {
            PendingAction::DeleteNovel(id) => {
                self.delete_novel(id)?;
            }
            PendingAction::ClearNotifications => {
                self.clear_all_notifications();
            }
        }
        Ok(Some(action))
    }

    /// Drop the pending action without running it.
    pub fn cancel_pending(&mut self) -> Option<PendingAction> {
        let dropped = self.pending.take();
        if let Some(action) = dropped {
            debug!(?action, "confirmation cancelled");
        }
        dropped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use noveltrack_core::{NewNovel, TrackerError};

    fn store_with_one() -> (NovelStore, NovelId) {
        let mut store = NovelStore::new();
        let id = store
            .add_novel(NewNovel {
                title: "Overgeared".into(),
                url: "https://example.com/overgeared".into(),
                current_chapter: 2156,
                user_progress: 1400,
                milestone_increment: 50,
            })
            .unwrap()
            .id;
        (store, id)
    }

    #[test]
    fn test_delete_needs_confirmation() {
        let (mut store, id) = store_with_one();
        let prompt = store.request_delete(id).unwrap();
        assert_eq!(prompt.title, "Delete Novel");
        assert_eq!(
            prompt.message,
            "Are you sure you want to delete \"Overgeared\"? This action cannot be undone."
        );
        assert_eq!(store.novels().len(), 1);

        assert_eq!(store.confirm_pending().unwrap(), Some(PendingAction::DeleteNovel(id)));
        assert!(store.novels().is_empty());
        assert_eq!(store.pending_action(), None);
    }

    #[test]
    fn test_cancel_keeps_state() {
        let (mut store, id) = store_with_one();
        store.request_delete(id).unwrap();
        assert_eq!(store.cancel_pending(), Some(PendingAction::DeleteNovel(id)));
        assert_eq!(store.confirm_pending().unwrap(), None);
        assert_eq!(store.novels().len(), 1);
    }

    #[test]
    fn test_request_delete_unknown() {
        let (mut store, _) = store_with_one();
        let err = store.request_delete(NovelId::new(7)).unwrap_err();
        assert!(matches!(err, TrackerError::NotFound(_)));
        assert_eq!(store.pending_action(), None);
    }

    #[test]
    fn test_clear_notifications_flow() {
        let (mut store, _) = store_with_one();
        let prompt = store.request_clear_notifications();
        assert_eq!(prompt.action, PendingAction::ClearNotifications);
        assert_eq!(store.notifications().len(), 1);
        store.confirm_pending().unwrap();
        assert!(store.notifications().is_empty());
    }

    #[test]
    fn test_newer_request_replaces_older() {
        let (mut store, id) = store_with_one();
        store.request_delete(id).unwrap();
        store.request_clear_notifications();
        store.confirm_pending().unwrap();
        assert_eq!(store.novels().len(), 1);
        assert!(store.notifications().is_empty());
    }

    #[test]
    fn test_pending_delete_of_vanished_novel_fails_and_clears() {
        let (mut store, id) = store_with_one();
        store.request_delete(id).unwrap();
        store.delete_novel(id).unwrap();
        assert!(matches!(store.confirm_pending(), Err(TrackerError::NotFound(_))));
        assert_eq!(store.pending_action(), None);
    }
}
