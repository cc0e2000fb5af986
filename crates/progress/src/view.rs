//! View models derived from store state.
//!
//! Pure functions: any renderer can consume these without touching the store.

use noveltrack_core::{Notification, Novel, NovelId, Result, Time};
use serde::Serialize;
use crate::filter::StatusFilter;
use crate::stats::Stats;
use crate::store::NovelStore;

/// One card in the dashboard grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NovelCard {
    /// Novel identifier
    pub id: NovelId,
    /// Novel title
    pub title: String,
    /// Latest chapter
    pub current_chapter: u32,
    /// Chapters read
    pub user_progress: u32,
    /// Next milestone
    pub milestone_target: u32,
    /// Read share of the latest chapter
    pub progress_percent: f64,
    /// Marker position, capped at 100
    pub milestone_percent: f64,
    /// Milestone chapter out but unread
    pub milestone_ready: bool,
    /// "Milestone Ready" or the status label
    pub badge: String,
}

impl From<&Novel> for NovelCard {
    fn from(novel: &Novel) -> Self {
        let milestone_ready = novel.milestone_ready();
        Self {
            id: novel.id,
            title: novel.title.clone(),
            current_chapter: novel.current_chapter,
            user_progress: novel.user_progress,
            milestone_target: novel.milestone_target,
            progress_percent: novel.progress_percent(),
            milestone_percent: novel.milestone_percent(),
            milestone_ready,
            badge: if milestone_ready {
                "Milestone Ready".to_string()
            } else {
                novel.status.as_str().to_string()
            },
        }
    }
}

/// Detail view for one novel.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NovelDetail {
    /// Card fields
    #[serde(flatten)]
    pub card: NovelCard,
    /// Publication URL
    pub url: String,
    /// Milestone step
    pub milestone_increment: u32,
    /// Last progress update
    pub last_checked: Time,
}

/// One row in the notifications view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationItem {
    /// `milestone` or `update`
    pub kind: &'static str,
    /// Notification text
    pub message: String,
    /// When it was created
    pub timestamp: Time,
    /// Not yet seen
    pub unread: bool,
}

impl From<&Notification> for NotificationItem {
    fn from(n: &Notification) -> Self {
        Self {
            kind: n.kind.as_str(),
            message: n.message.clone(),
            timestamp: n.timestamp,
            unread: !n.read,
        }
    }
}

/// Everything the dashboard shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    /// Counters
    pub stats: Stats,
    /// Filtered novel cards
    pub cards: Vec<NovelCard>,
}

/// Cards for the novels passing `search` and `filter`.
pub fn novel_cards(store: &NovelStore, search: &str, filter: StatusFilter) -> Vec<NovelCard> {
    store
        .filter_novels(search, filter)
        .into_iter()
        .map(NovelCard::from)
        .collect()
}

/// Detail view for `id`.
pub fn novel_detail(store: &NovelStore, id: NovelId) -> Result<NovelDetail> {
    let novel = store.novel(id)?;
    Ok(NovelDetail {
        card: NovelCard::from(novel),
        url: novel.url.clone(),
        milestone_increment: novel.milestone_increment,
        last_checked: novel.last_checked,
    })
}

/// Notification rows, newest first.
pub fn notification_items(store: &NovelStore) -> Vec<NotificationItem> {
    store.notifications().iter().map(NotificationItem::from).collect()
}

/// Stats plus filtered cards.
pub fn dashboard(store: &NovelStore, search: &str, filter: StatusFilter) -> Dashboard {
    Dashboard {
        stats: store.compute_stats(),
        cards: novel_cards(store, search, filter),
    }
}
