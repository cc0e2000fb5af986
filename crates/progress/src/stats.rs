//! Dashboard statistics.

use noveltrack_core::{Notification, NotificationKind, Novel};
use serde::Serialize;

/// Aggregate counters shown on the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    /// Novels tracked
    pub total_novels: usize,
    /// Sum of reading progress over all novels
    pub total_chapters_read: u64,
    /// Milestone notifications on record
    pub milestones_achieved: usize,
    /// Novels whose milestone chapter is out but unread
    pub pending_milestones: usize,
}

impl Stats {
    /// Compute stats from the store collections.
    pub fn compute(novels: &[Novel], notifications: &[Notification]) -> Self {
        Self {
            total_novels: novels.len(),
            total_chapters_read: novels.iter().map(|n| u64::from(n.user_progress)).sum(),
            milestones_achieved: notifications
                .iter()
                .filter(|n| n.kind == NotificationKind::Milestone)
                .count(),
            pending_milestones: novels.iter().filter(|n| n.milestone_ready()).count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use noveltrack_core::{NewNovel, NotificationId, NovelId};

    fn novel(id: u64, latest: u32, progress: u32, target: u32) -> Novel {
        let mut n = Novel::new(
            NovelId::new(id),
            NewNovel {
                title: format!("Novel {id}"),
                url: "https://example.com".into(),
                current_chapter: latest,
                user_progress: progress,
                milestone_increment: 10,
            },
        );
        n.milestone_target = target;
        n
    }

    #[test]
    fn test_empty() {
        assert_eq!(Stats::compute(&[], &[]), Stats::default());
    }

    #[test]
    fn test_counts() {
        let novels = vec![
            novel(1, 2156, 1400, 1450),
            novel(2, 270, 245, 270),
            novel(3, 100, 20, 150),
            novel(4, 100, 120, 150),
        ];
        let notes = vec![
            Notification::new(NotificationId::new(1), NotificationKind::Milestone, "m"),
            Notification::new(NotificationId::new(2), NotificationKind::Update, "u"),
        ];
        let stats = Stats::compute(&novels, &notes);
        assert_eq!(stats.total_novels, 4);
        assert_eq!(stats.total_chapters_read, 1400 + 245 + 20 + 120);
        assert_eq!(stats.milestones_achieved, 1);
        // Chapter 150 is not out yet for novels 3 and 4.
        assert_eq!(stats.pending_milestones, 2);
    }

    #[test]
    fn test_unpublished_milestone_never_pending() {
        for progress in [0, 99, 100, 149, 150, 200] {
            let stats = Stats::compute(&[novel(1, 100, progress, 150)], &[]);
            assert_eq!(stats.pending_milestones, 0, "progress {progress}");
        }
    }

    #[test]
    fn test_chapter_sum_does_not_overflow() {
        let novels = vec![novel(1, u32::MAX, u32::MAX, u32::MAX), novel(2, u32::MAX, u32::MAX, u32::MAX)];
        assert_eq!(Stats::compute(&novels, &[]).total_chapters_read, 2 * u64::from(u32::MAX));
    }
}
