//! Parsing of raw user input into the typed values the store accepts.

use chrono::NaiveTime;
use crate::error::{Result, TrackerError};

/// Parse a non-negative chapter number.
pub fn parse_chapter(raw: &str) -> Result<u32> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(TrackerError::validation("chapter number is required"));
    }
    raw.parse::<u32>()
        .map_err(|_| TrackerError::validation(format!("'{}' is not a valid chapter number", raw)))
}

/// Parse a positive milestone increment.
pub fn parse_increment(raw: &str) -> Result<u32> {
    match parse_chapter(raw)? {
        0 => Err(TrackerError::validation("milestone increment must be positive")),
        n => Ok(n),
    }
}

/// Parse and normalize an `HH:MM` check time.
pub fn parse_check_time(raw: &str) -> Result<String> {
    let time = NaiveTime::parse_from_str(raw.trim(), "%H:%M")
        .map_err(|_| TrackerError::validation(format!("'{}' is not a valid HH:MM time", raw.trim())))?;
    Ok(time.format("%H:%M").to_string())
}
