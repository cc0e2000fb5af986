//! Novel progress tracking.
//!
//! The novel store, the milestone rule, dashboard statistics, filtering,
//! pending confirmations and view models.

#![warn(missing_docs)]

pub mod store;
pub mod filter;
pub mod stats;
pub mod confirm;
pub mod view;
mod sample;

pub use store::{NovelStore, ImportReport};
pub use filter::StatusFilter;
pub use stats::Stats;
pub use confirm::{PendingAction, Confirmation};
pub use view::{Dashboard, NotificationItem, NovelCard, NovelDetail};
