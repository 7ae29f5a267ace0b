use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

// ============================================================================
// Audit Entry - textual record format
// ============================================================================
//
//   [<timestamp>] Order <order_id>: <action>
//
// The log stores the rendered string. Parsing is only needed for pruning,
// where a malformed timestamp means "keep the entry".
//
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEntry {
    pub timestamp: String,
    pub order_id: String,
    pub action: String,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AuditParseError {
    #[error("Entry has no bracketed timestamp: {0}")]
    MissingTimestamp(String),

    #[error("Entry is not an order record: {0}")]
    MalformedEntry(String),

    #[error("Unparseable timestamp: {0}")]
    InvalidTimestamp(String),
}

impl AuditEntry {
    pub fn new(
        timestamp: impl Into<String>,
        order_id: impl Into<String>,
        action: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: timestamp.into(),
            order_id: order_id.into(),
            action: action.into(),
        }
    }
}

impl fmt::Display for AuditEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] Order {}: {}", self.timestamp, self.order_id, self.action)
    }
}

impl FromStr for AuditEntry {
    type Err = AuditParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (timestamp, rest) = split_timestamp(s)?;
        let (order_id, action) = rest
            .strip_prefix(" Order ")
            .and_then(|rest| rest.split_once(": "))
            .ok_or_else(|| AuditParseError::MalformedEntry(s.to_string()))?;

        Ok(Self::new(timestamp, order_id, action))
    }
}

fn split_timestamp(entry: &str) -> Result<(&str, &str), AuditParseError> {
    entry
        .strip_prefix('[')
        .and_then(|rest| rest.split_once(']'))
        .ok_or_else(|| AuditParseError::MissingTimestamp(entry.to_string()))
}

/// Parse the bracketed timestamp at the start of `entry`.
///
/// A value carrying only a calendar date is read as midnight of that day.
pub fn parse_timestamp(entry: &str, format: &str) -> Result<NaiveDateTime, AuditParseError> {
    let (raw, _) = split_timestamp(entry)?;

    NaiveDateTime::parse_from_str(raw, format)
        .or_else(|_| NaiveDate::parse_from_str(raw, format).map(|date| date.and_time(NaiveTime::MIN)))
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d").map(|date| date.and_time(NaiveTime::MIN)))
        .map_err(|_| AuditParseError::InvalidTimestamp(raw.to_string()))
}

/// Retention rule used when pruning.
///
/// Returns `true` only when the timestamp parses and is strictly before
/// `cutoff`. Anything unparseable is kept.
pub fn is_entry_older_than(entry: &str, cutoff: NaiveDateTime, format: &str) -> bool {
    match parse_timestamp(entry, format) {
        Ok(timestamp) => timestamp < cutoff,
        Err(err) => {
            tracing::debug!(error = %err, "Retaining audit entry with unparseable timestamp");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_TIMESTAMP_FORMAT;

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, DEFAULT_TIMESTAMP_FORMAT).unwrap()
    }

    #[test]
    fn test_entry_renders_bit_exact() {
        let entry = AuditEntry::new("2025-02-01T12:00:00", "123", "UPDATED");
        assert_eq!(entry.to_string(), "[2025-02-01T12:00:00] Order 123: UPDATED");
    }

    #[test]
    fn test_entry_parses_back() {
        let entry: AuditEntry = "[2025-02-01T12:00:00] Order order-1: UPDATED_FAILED"
            .parse()
            .unwrap();

        assert_eq!(entry.timestamp, "2025-02-01T12:00:00");
        assert_eq!(entry.order_id, "order-1");
        assert_eq!(entry.action, "UPDATED_FAILED");
    }

    #[test]
    fn test_malformed_entries() {
        assert!(matches!(
            "no brackets".parse::<AuditEntry>(),
            Err(AuditParseError::MissingTimestamp(_))
        ));
        assert!(matches!(
            "[2025-02-01T12:00:00] Customer 1: X".parse::<AuditEntry>(),
            Err(AuditParseError::MalformedEntry(_))
        ));
    }

    #[test]
    fn test_older_entry_is_detected() {
        let entry = "[2025-02-01T12:00:00] Order 1: UPDATED";

        assert!(is_entry_older_than(entry, at("2025-02-01T12:00:01"), DEFAULT_TIMESTAMP_FORMAT));
        assert!(!is_entry_older_than(entry, at("2025-02-01T12:00:00"), DEFAULT_TIMESTAMP_FORMAT));
        assert!(!is_entry_older_than(entry, at("2025-01-31T00:00:00"), DEFAULT_TIMESTAMP_FORMAT));
    }

    #[test]
    fn test_date_only_timestamp_reads_as_midnight() {
        let parsed = parse_timestamp("[2025-02-01] Order 1: UPDATED", DEFAULT_TIMESTAMP_FORMAT).unwrap();
        assert_eq!(parsed, at("2025-02-01T00:00:00"));
    }

    #[test]
    fn test_unparseable_timestamp_is_retained() {
        let cutoff = at("2999-01-01T00:00:00");

        assert!(!is_entry_older_than("[yesterday] Order 1: UPDATED", cutoff, DEFAULT_TIMESTAMP_FORMAT));
        assert!(!is_entry_older_than("Order 1: UPDATED", cutoff, DEFAULT_TIMESTAMP_FORMAT));
        assert!(!is_entry_older_than("", cutoff, DEFAULT_TIMESTAMP_FORMAT));
    }
}
