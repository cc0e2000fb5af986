//! Unique identifiers for tracker entities.

use serde::{Deserialize, Serialize};
use crate::error::TrackerError;

/// Unique identifier for a Novel
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NovelId(u64);

impl NovelId {
    /// Wrap a raw id value
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw id value
    pub fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for NovelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for NovelId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}

/// Unique identifier for a Notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NotificationId(u64);

impl NotificationId {
    /// Wrap a raw id value
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw id value
    pub fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for NotificationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Issues ids that are unique and strictly increasing within one store.
///
/// Ids are millisecond timestamps when the clock is ahead of the last issued
/// value, so they stay compatible with exported data that used wall-clock ids.
#[derive(Debug, Clone, Default)]
pub struct IdAllocator {
    last: u64,
}

impl IdAllocator {
    /// Create an allocator that has issued nothing yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the next raw id. Fails once `u64::MAX` has been issued or observed.
    pub fn next_raw(&mut self) -> crate::Result<u64> {
        let next = self
            .last
            .checked_add(1)
            .ok_or_else(|| TrackerError::validation("id space exhausted"))?;
        let now = u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or(0);
        self.last = next.max(now);
        Ok(self.last)
    }

    /// Issue a fresh novel id.
    pub fn next_novel(&mut self) -> crate::Result<NovelId> {
        self.next_raw().map(NovelId)
    }

    /// Issue a fresh notification id.
    pub fn next_notification(&mut self) -> crate::Result<NotificationId> {
        self.next_raw().map(NotificationId)
    }

    /// Make sure future ids are issued above `raw`.
    pub fn observe(&mut self, raw: u64) {
        if raw > self.last {
            tracing::debug!(from = self.last, to = raw, "id allocator bumped");
            self.last = raw;
        }
    }

    /// Last issued or observed id.
    pub fn last(&self) -> u64 {
        self.last
    }
}
