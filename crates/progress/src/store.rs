//! The novel progress store.
//!
//! Owns novels, notifications and settings, and enforces the milestone rule:
//! a progress update that crosses the current target from below emits one
//! milestone notification and advances the target by exactly one increment.

use noveltrack_core::{
    input, IdAllocator, NewNovel, Notification, NotificationId, NotificationKind, Novel, NovelId,
    NovelStatus, Result, Settings, Snapshot, SnapshotPatch, TrackerError,
};
use tracing::{debug, info};
use crate::confirm::PendingAction;
use crate::filter::StatusFilter;
use crate::stats::Stats;

/// Authoritative in-memory tracker state.
#[derive(Debug, Clone, Default)]
pub struct NovelStore {
    novels: Vec<Novel>,
    notifications: Vec<Notification>,
    settings: Settings,
    ids: IdAllocator,
    pub(crate) pending: Option<PendingAction>,
}

/// What an import actually changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportReport {
    /// Number of novels now held, if the list was replaced
    pub novels: Option<usize>,
    /// Number of settings fields overwritten
    pub settings_fields: usize,
    /// Number of notifications now held, if the list was replaced
    pub notifications: Option<usize>,
}

impl ImportReport {
    /// Whether nothing was applied.
    pub fn is_empty(&self) -> bool {
        self.novels.is_none() && self.settings_fields == 0 && self.notifications.is_none()
    }
}

impl NovelStore {
    /// Create an empty store with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore a store from a strictly decoded snapshot.
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        Self::from_parts(snapshot.novels, snapshot.notifications, snapshot.settings)
    }

    /// Build a store from already-validated parts.
    pub(crate) fn from_parts(
        novels: Vec<Novel>,
        notifications: Vec<Notification>,
        settings: Settings,
    ) -> Self {
        let mut store = Self {
            novels,
            notifications,
            settings,
            ..Self::default()
        };
        store.observe_existing_ids();
        store
    }

    // === Accessors ===

    /// All novels in collection order.
    pub fn novels(&self) -> &[Novel] {
        &self.novels
    }

    /// Look up a novel.
    pub fn novel(&self, id: NovelId) -> Result<&Novel> {
        self.novels
            .iter()
            .find(|n| n.id == id)
            .ok_or_else(|| TrackerError::not_found(format!("novel {}", id)))
    }

    /// Notifications, newest first.
    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// Current settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Count of unread notifications.
    pub fn unread_notifications(&self) -> usize {
        self.notifications.iter().filter(|n| !n.read).count()
    }

    // === Novel operations ===

    /// Add a novel. Its first target is `user_progress + milestone_increment`.
    pub fn add_novel(&mut self, input: NewNovel) -> Result<&Novel> {
        let input = input.validated()?;
        let novel_id = self.ids.next_novel()?;
        let note_id = self.ids.next_notification()?;
        let novel = Novel::new(novel_id, input);
        info!(id = %novel.id, title = %novel.title, target = novel.milestone_target, "novel added");

        let message = format!("Added new novel: {}", novel.title);
        self.novels.push(novel);
        self.notify(note_id, NotificationKind::Update, message);

        let idx = self.novels.len() - 1;
        Ok(&self.novels[idx])
    }

    /// Record new reading progress and the latest upstream chapter.
    ///
    /// The crossing check uses the progress captured before the update, and at
    /// most one increment is applied per call however far the jump goes.
    pub fn update_progress(
        &mut self,
        id: NovelId,
        new_progress: u32,
        new_current_chapter: u32,
    ) -> Result<&Novel> {
        let idx = self.index_of(id)?;
        let previous = self.novels[idx].user_progress;
        let note_id = if self.novels[idx].crosses_milestone(previous, new_progress) {
            Some(self.ids.next_notification()?)
        } else {
            None
        };

        let novel = &mut self.novels[idx];
        novel.user_progress = new_progress;
        novel.current_chapter = new_current_chapter;
        novel.last_checked = chrono::Utc::now();
        debug!(id = %id, previous, new_progress, new_current_chapter, "progress updated");

        if let Some(note_id) = note_id {
            let reached = novel.milestone_target;
            novel.milestone_target = novel.milestone_target.saturating_add(novel.milestone_increment);
            info!(id = %id, reached, next = novel.milestone_target, "milestone reached");

            let message = format!(
                "Milestone reached for {}! You've read {} chapters.",
                novel.title, new_progress
            );
            self.notify(note_id, NotificationKind::Milestone, message);
        }

        Ok(&self.novels[idx])
    }

    /// Change the milestone step and restart the target from current progress.
    pub fn update_milestone_increment(&mut self, id: NovelId, new_increment: u32) -> Result<&Novel> {
        if new_increment == 0 {
            return Err(TrackerError::validation("milestone increment must be positive"));
        }
        let idx = self.index_of(id)?;
        let novel = &mut self.novels[idx];
        novel.milestone_increment = new_increment;
        novel.milestone_target = novel.user_progress.saturating_add(new_increment);
        debug!(id = %id, increment = new_increment, target = novel.milestone_target, "milestone reset");
        Ok(&self.novels[idx])
    }

    /// Mark a novel active or completed.
    pub fn set_status(&mut self, id: NovelId, status: NovelStatus) -> Result<&Novel> {
        let idx = self.index_of(id)?;
        self.novels[idx].status = status;
        debug!(id = %id, status = %status, "status changed");
        Ok(&self.novels[idx])
    }

    /// Remove a novel and return it.
    pub fn delete_novel(&mut self, id: NovelId) -> Result<Novel> {
        let idx = self.index_of(id)?;
        let note_id = self.ids.next_notification()?;
        let novel = self.novels.remove(idx);
        info!(id = %id, title = %novel.title, "novel deleted");
        self.notify(note_id, NotificationKind::Update, format!("Deleted novel: {}", novel.title));
        Ok(novel)
    }

    // === Settings ===

    /// Replace settings wholesale. The check time must be `HH:MM`.
    pub fn save_settings(&mut self, mut settings: Settings) -> Result<()> {
        settings.daily_check_time = input::parse_check_time(&settings.daily_check_time)?;
        let note_id = self.ids.next_notification()?;
        self.settings = settings;
        info!("settings saved");
        self.notify(note_id, NotificationKind::Update, "Settings saved successfully");
        Ok(())
    }

    // === Queries ===

    /// Dashboard statistics.
    pub fn compute_stats(&self) -> Stats {
        Stats::compute(&self.novels, &self.notifications)
    }

    /// Novels whose title contains `search` (case-insensitive) and that pass
    /// `filter`, in collection order.
    pub fn filter_novels(&self, search: &str, filter: StatusFilter) -> Vec<&Novel> {
        let needle = search.to_lowercase();
        let matched: Vec<&Novel> = self
            .novels
            .iter()
            .filter(|n| n.title_matches(&needle) && filter.matches(n))
            .collect();
        debug!(search, filter = %filter, matched = matched.len(), "novels filtered");
        matched
    }

    // === Notifications ===

    /// Flag every notification as read. Returns how many changed.
    pub fn mark_all_notifications_read(&mut self) -> usize {
        let mut changed = 0;
        for n in self.notifications.iter_mut().filter(|n| !n.read) {
            n.read = true;
            changed += 1;
        }
        changed
    }

    /// Drop every notification. Returns how many were removed.
    pub fn clear_all_notifications(&mut self) -> usize {
        let removed = self.notifications.len();
        self.notifications.clear();
        info!(removed, "notifications cleared");
        removed
    }

    // === Snapshot ===

    /// Capture the full state for export.
    pub fn export_snapshot(&self) -> Snapshot {
        Snapshot {
            novels: self.novels.clone(),
            settings: self.settings.clone(),
            notifications: self.notifications.clone(),
            export_date: chrono::Utc::now(),
        }
    }

    /// Apply an import payload.
    ///
    /// The payload is fully decoded before anything is assigned, so a
    /// [`TrackerError::Format`] failure leaves the store untouched. Sections
    /// that are absent or malformed are skipped.
    pub fn import_snapshot(&mut self, bytes: &[u8]) -> Result<ImportReport> {
        let patch = SnapshotPatch::parse(bytes)?;
        let mut report = ImportReport::default();

        if let Some(novels) = patch.novels {
            report.novels = Some(novels.len());
            self.novels = novels;
        }
        report.settings_fields = patch.settings.apply_to(&mut self.settings);
        if let Some(notifications) = patch.notifications {
            report.notifications = Some(notifications.len());
            self.notifications = notifications;
        }
        self.observe_existing_ids();

        info!(
            novels = ?report.novels,
            settings_fields = report.settings_fields,
            notifications = ?report.notifications,
            "snapshot imported"
        );
        Ok(report)
    }

    // === Internals ===

    fn index_of(&self, id: NovelId) -> Result<usize> {
        self.novels
            .iter()
            .position(|n| n.id == id)
            .ok_or_else(|| TrackerError::not_found(format!("novel {}", id)))
    }

    fn notify(&mut self, id: NotificationId, kind: NotificationKind, message: impl Into<String>) {
        let notification = Notification::new(id, kind, message);
        self.notifications.insert(0, notification);
    }

    fn observe_existing_ids(&mut self) {
        let max_novel = self.novels.iter().map(|n| n.id.get()).max().unwrap_or(0);
        let max_note = self.notifications.iter().map(|n| n.id.get()).max().unwrap_or(0);
        self.ids.observe(max_novel.max(max_note));
    }
}
