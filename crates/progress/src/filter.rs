//! Status filter for the novel list.

use noveltrack_core::{Novel, NovelStatus, TrackerError};

/// Which novels the dashboard shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StatusFilter {
    /// No status restriction
    #[default]
    All,
    /// Only novels with this status
    Status(NovelStatus),
    /// Novels whose milestone chapter is out but unread
    MilestoneReached,
}

impl StatusFilter {
    /// Whether `novel` passes the filter.
    pub fn matches(&self, novel: &Novel) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Status(status) => novel.status == *status,
            StatusFilter::MilestoneReached => novel.milestone_ready(),
        }
    }

    /// Wire label, as accepted by `FromStr`.
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Status(status) => status.as_str(),
            StatusFilter::MilestoneReached => "milestone-reached",
        }
    }
}

impl std::fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for StatusFilter {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" | "" => Ok(StatusFilter::All),
            "milestone-reached" => Ok(StatusFilter::MilestoneReached),
            other => other.parse().map(StatusFilter::Status),
        }
    }
}
