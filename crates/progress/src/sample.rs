//! Sample data for first runs and demos.

use chrono::{TimeZone, Utc};
use noveltrack_core::{
    Notification, NotificationId, NotificationKind, Novel, NovelId, NovelStatus, Settings, Time,
};
use crate::store::NovelStore;

fn at(y: i32, m: u32, d: u32, h: u32) -> Time {
    Utc.with_ymd_and_hms(y, m, d, h, 0, 0).single().unwrap_or_else(Utc::now)
}

#[allow(clippy::too_many_arguments)]
fn novel(
    id: u64,
    title: &str,
    slug: &str,
    current_chapter: u32,
    user_progress: u32,
    milestone_increment: u32,
    milestone_target: u32,
    status: NovelStatus,
) -> Novel {
    Novel {
        id: NovelId::new(id),
        title: title.to_string(),
        url: format!("https://example.com/{}", slug),
        current_chapter,
        user_progress,
        milestone_increment,
        milestone_target,
        status,
        last_checked: at(2025, 8, 10, 6),
    }
}

impl NovelStore {
    /// A store seeded with three novels, sample settings and two notifications.
    pub fn with_sample_data() -> Self {
        let novels = vec![
            novel(1, "Overgeared", "overgeared", 2156, 1400, 50, 1450, NovelStatus::Active),
            novel(2, "Solo Leveling", "solo-leveling", 270, 245, 25, 270, NovelStatus::Completed),
            novel(3, "The Beginning After The End", "tbate", 478, 380, 30, 410, NovelStatus::Active),
        ];

        let notifications = vec![
            Notification {
                id: NotificationId::new(1),
                message: "Milestone reached for Solo Leveling! Chapter 270 available.".to_string(),
                timestamp: at(2025, 8, 9, 8),
                kind: NotificationKind::Milestone,
                read: false,
            },
            Notification {
                id: NotificationId::new(2),
                message: "New chapters available for Overgeared (5 new chapters)".to_string(),
                timestamp: at(2025, 8, 8, 8),
                kind: NotificationKind::Update,
                read: false,
            },
        ];

        let settings = Settings {
            email: "user@gmail.com".to_string(),
            ..Settings::default()
        };

        Self::from_parts(novels, notifications, settings)
    }
}
