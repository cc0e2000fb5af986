//! Error type shared by the tracker crates.

/// Result type for tracker operations.
pub type Result<T> = std::result::Result<T, TrackerError>;

/// Errors reported by store operations.
///
/// None of these are fatal: the store is left exactly as it was before the
/// failing call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TrackerError {
    /// Malformed or missing input to a mutation
    #[error("Validation error: {0}")]
    Validation(String),

    /// Referenced item is not in the collection
    #[error("Not found: {0}")]
    NotFound(String),

    /// Import payload is not structured snapshot data
    #[error("Invalid file format: {0}")]
    Format(String),
}

impl TrackerError {
    /// Shorthand for a validation failure.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Shorthand for a missing item.
    pub fn not_found(what: impl std::fmt::Display) -> Self {
        Self::NotFound(what.to_string())
    }
}

impl From<serde_json::Error> for TrackerError {
    fn from(e: serde_json::Error) -> Self {
        Self::Format(e.to_string())
    }
}
