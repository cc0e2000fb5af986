//! Novel model - one tracked work and its milestone state.

use serde::{Deserialize, Serialize};
use crate::error::{Result, TrackerError};
use crate::id::NovelId;
use crate::Time;

/// A novel the user is following.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Novel {
    /// Unique identifier
    pub id: NovelId,

    /// Novel title
    pub title: String,

    /// Where the novel is published
    pub url: String,

    /// Latest chapter known to exist upstream
    pub current_chapter: u32,

    /// Chapter the user has read up to
    pub user_progress: u32,

    /// Step size for advancing the milestone
    pub milestone_increment: u32,

    /// Next chapter-count goal
    pub milestone_target: u32,

    /// Reading status
    pub status: NovelStatus,

    /// Last progress update
    pub last_checked: Time,
}

impl Novel {
    /// Build a fresh active novel from validated input.
    pub fn new(id: NovelId, input: NewNovel) -> Self {
        Self {
            id,
            title: input.title,
            url: input.url,
            current_chapter: input.current_chapter,
            user_progress: input.user_progress,
            milestone_increment: input.milestone_increment,
            milestone_target: input.user_progress.saturating_add(input.milestone_increment),
            status: NovelStatus::Active,
            last_checked: chrono::Utc::now(),
        }
    }

    /// Whether moving from `previous` to `next` progress crosses the current
    /// target from below.
    pub fn crosses_milestone(&self, previous: u32, next: u32) -> bool {
        next >= self.milestone_target && previous < self.milestone_target
    }

    /// The milestone chapter is published but the user has not read it yet.
    ///
    /// Deliberately a different predicate from [`Novel::crosses_milestone`].
    pub fn milestone_ready(&self) -> bool {
        self.current_chapter >= self.milestone_target && self.user_progress < self.milestone_target
    }

    /// Read progress as a percentage of the latest chapter.
    pub fn progress_percent(&self) -> f64 {
        percent_of(self.user_progress, self.current_chapter)
    }

    /// Position of the milestone marker, capped at 100.
    pub fn milestone_percent(&self) -> f64 {
        percent_of(self.milestone_target, self.current_chapter).min(100.0)
    }

    /// Case-insensitive substring match on the title.
    pub fn title_matches(&self, needle_lower: &str) -> bool {
        needle_lower.is_empty() || self.title.to_lowercase().contains(needle_lower)
    }
}

fn percent_of(part: u32, whole: u32) -> f64 {
    if whole == 0 {
        0.0
    } else {
        f64::from(part) / f64::from(whole) * 100.0
    }
}

/// Novel reading status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NovelStatus {
    /// Still reading
    Active,
    /// Finished
    Completed,
}

impl NovelStatus {
    /// Lowercase label used in views and on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            NovelStatus::Active => "active",
            NovelStatus::Completed => "completed",
        }
    }
}

impl std::fmt::Display for NovelStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for NovelStatus {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "active" => Ok(NovelStatus::Active),
            "completed" => Ok(NovelStatus::Completed),
            other => Err(TrackerError::validation(format!("unknown status '{}'", other))),
        }
    }
}

/// Input for adding a novel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNovel {
    /// Novel title
    pub title: String,
    /// Where the novel is published
    pub url: String,
    /// Latest chapter known to exist
    pub current_chapter: u32,
    /// Chapter the user has read
    pub user_progress: u32,
    /// Milestone step, must be positive
    pub milestone_increment: u32,
}

impl NewNovel {
    /// Trim text fields and reject empty ones or a zero increment.
    pub fn validated(mut self) -> Result<Self> {
        self.title = self.title.trim().to_string();
        self.url = self.url.trim().to_string();
        if self.title.is_empty() {
            return Err(TrackerError::validation("title is required"));
        }
        if self.url.is_empty() {
            return Err(TrackerError::validation("url is required"));
        }
        if self.milestone_increment == 0 {
            return Err(TrackerError::validation("milestone increment must be positive"));
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(progress: u32, target: u32, latest: u32) -> Novel {
        let mut novel = Novel::new(
            NovelId::new(1),
            NewNovel {
                title: "Solo Leveling".to_string(),
                url: "https://example.com/solo-leveling".to_string(),
                current_chapter: latest,
                user_progress: progress,
                milestone_increment: 25,
            },
        );
        novel.milestone_target = target;
        novel
    }

    #[test]
    fn test_new_sets_target_and_status() {
        let novel = sample(240, 265, 280);
        assert_eq!(novel.status, NovelStatus::Active);
        let fresh = Novel::new(
            NovelId::new(2),
            NewNovel {
                title: "x".into(),
                url: "y".into(),
                current_chapter: 10,
                user_progress: 4,
                milestone_increment: 3,
            },
        );
        assert_eq!(fresh.milestone_target, 7);
    }

    #[test]
    fn test_crossing_is_strict_from_below() {
        let novel = sample(240, 270, 280);
        assert!(novel.crosses_milestone(240, 270));
        assert!(novel.crosses_milestone(269, 500));
        assert!(!novel.crosses_milestone(270, 271));
        assert!(!novel.crosses_milestone(240, 269));
    }

    #[test]
    fn test_milestone_ready_needs_published_chapter() {
        assert!(sample(245, 270, 270).milestone_ready());
        assert!(!sample(245, 270, 269).milestone_ready());
        assert!(!sample(270, 270, 300).milestone_ready());
        assert!(!sample(0, 150, 100).milestone_ready());
        assert!(!sample(200, 150, 100).milestone_ready());
    }

    #[test]
    fn test_percentages() {
        let novel = sample(50, 300, 200);
        assert!((novel.progress_percent() - 25.0).abs() < f64::EPSILON);
        assert!((novel.milestone_percent() - 100.0).abs() < f64::EPSILON);
        assert_eq!(sample(5, 10, 0).progress_percent(), 0.0);
    }

    #[test]
    fn test_status_parse_and_wire_format() {
        assert_eq!("Completed".parse::<NovelStatus>().unwrap(), NovelStatus::Completed);
        assert!("paused".parse::<NovelStatus>().is_err());
        assert_eq!(serde_json::to_string(&NovelStatus::Active).unwrap(), "\"active\"");
    }

    #[test]
    fn test_wire_field_names_are_camel_case() {
        let json = serde_json::to_value(sample(1, 2, 3)).unwrap();
        for key in ["currentChapter", "userProgress", "milestoneIncrement", "milestoneTarget", "lastChecked"] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
    }

    #[test]
    fn test_new_novel_validation() {
        let base = NewNovel {
            title: "  Overgeared ".into(),
            url: "https://example.com/overgeared".into(),
            current_chapter: 0,
            user_progress: 0,
            milestone_increment: 50,
        };
        assert_eq!(base.clone().validated().unwrap().title, "Overgeared");
        assert!(NewNovel { title: "   ".into(), ..base.clone() }.validated().is_err());
        assert!(NewNovel { url: String::new(), ..base.clone() }.validated().is_err());
        assert!(NewNovel { milestone_increment: 0, ..base }.validated().is_err());
    }
}
