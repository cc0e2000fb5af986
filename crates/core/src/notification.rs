//! Notification model - log entries produced by store mutations.

use serde::{Deserialize, Serialize};
use crate::id::NotificationId;
use crate::Time;

/// A notification shown in the notifications view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Unique identifier
    pub id: NotificationId,

    /// Human-readable text
    pub message: String,

    /// When it was created
    pub timestamp: Time,

    /// What produced it
    #[serde(rename = "type")]
    pub kind: NotificationKind,

    /// Whether the user has seen it
    pub read: bool,
}

impl Notification {
    /// Create an unread notification stamped now.
    pub fn new(id: NotificationId, kind: NotificationKind, message: impl Into<String>) -> Self {
        Self {
            id,
            message: message.into(),
            timestamp: chrono::Utc::now(),
            kind,
            read: false,
        }
    }
}

/// Notification kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    /// A milestone target was crossed
    Milestone,
    /// Any other change to the collection or settings
    Update,
}

impl NotificationKind {
    /// Lowercase label.
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Milestone => "milestone",
            NotificationKind::Update => "update",
        }
    }
}
