//! Storage abstraction and implementations for noveltrack.
//!
//! This crate provides a trait-based snapshot storage interface with a
//! JSON file reference implementation.

#![warn(missing_docs)]

pub mod trait_;
pub mod json_storage;

pub use trait_::{SnapshotStorage, StorageError, Result};
pub use json_storage::{JsonFileStorage, DEFAULT_EXPORT_FILE};
