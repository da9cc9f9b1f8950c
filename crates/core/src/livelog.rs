//! Capped live-update log.
//!
//! Presentation-only state: each detected progress delta appends one
//! timestamped entry. The log keeps the newest [`LIVE_LOG_CAP`] entries
//! in reverse-chronological order and silently evicts the oldest beyond
//! the cap. It never affects counter or result correctness.

use std::collections::VecDeque;

use chrono::Utc;
use serde::Serialize;

/// Maximum number of retained entries.
pub const LIVE_LOG_CAP: usize = 20;

/// Severity class of a live-update entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogSeverity {
    Info,
    Success,
    Warning,
    Error,
}

impl LogSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl std::fmt::Display for LogSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One live-update line.
#[derive(Debug, Clone, Serialize)]
pub struct LiveLogEntry {
    /// Monotonic id, unique within the session.
    pub id: u64,
    pub message: String,
    pub severity: LogSeverity,
    /// Wall-clock time of day (`HH:MM:SS`).
    pub timestamp: String,
}

/// Bounded, newest-first sequence of live-update entries.
#[derive(Debug, Default)]
pub struct LiveLog {
    entries: VecDeque<LiveLogEntry>,
    next_id: u64,
}

impl LiveLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry, evicting the oldest past the cap.
    pub fn push(&mut self, message: impl Into<String>, severity: LogSeverity) {
        let entry = LiveLogEntry {
            id: self.next_id,
            message: message.into(),
            severity,
            timestamp: Utc::now().format("%H:%M:%S").to_string(),
        };
        self.next_id += 1;
        self.entries.push_front(entry);
        self.entries.truncate(LIVE_LOG_CAP);
    }

    /// Entries, newest first.
    pub fn entries(&self) -> impl Iterator<Item = &LiveLogEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_are_newest_first() {
        let mut log = LiveLog::new();
        log.push("first", LogSeverity::Info);
        log.push("second", LogSeverity::Success);

        let messages: Vec<_> = log.entries().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["second", "first"]);
    }

    #[test]
    fn ids_are_monotonic() {
        let mut log = LiveLog::new();
        for i in 0..5 {
            log.push(format!("m{i}"), LogSeverity::Info);
        }
        let ids: Vec<_> = log.entries().map(|e| e.id).collect();
        assert_eq!(ids, vec![4, 3, 2, 1, 0]);
    }

    #[test]
    fn cap_evicts_oldest_entries() {
        let mut log = LiveLog::new();
        for i in 0..25 {
            log.push(format!("m{i}"), LogSeverity::Info);
        }

        assert_eq!(log.len(), LIVE_LOG_CAP);
        // Exactly entries 5..=24, newest first.
        let messages: Vec<_> = log.entries().map(|e| e.message.as_str()).collect();
        assert_eq!(messages.first(), Some(&"m24"));
        assert_eq!(messages.last(), Some(&"m5"));
    }

    #[test]
    fn clear_empties_the_log() {
        let mut log = LiveLog::new();
        log.push("m", LogSeverity::Error);
        log.clear();
        assert!(log.is_empty());
    }
}
