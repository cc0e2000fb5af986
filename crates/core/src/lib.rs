//! noveltrack core data models.
//!
//! This crate defines the records the tracker stores and exchanges:
//! novels, notifications, settings and the snapshot document.

#![warn(missing_docs)]

// Core identities
mod id;
mod error;

// Records
mod novel;
mod notification;
mod settings;
mod snapshot;

// Raw input handling
pub mod input;

// Re-exports
pub use id::{IdAllocator, NotificationId, NovelId};
pub use error::{Result, TrackerError};
pub use novel::{NewNovel, Novel, NovelStatus};
pub use notification::{Notification, NotificationKind};
pub use settings::{Settings, SettingsPatch};
pub use snapshot::{Snapshot, SnapshotPatch};

/// Timestamp type
pub type Time = chrono::DateTime<chrono::Utc>;
