//! In-memory activity history
//!
//! Records the outcome of every load and command so failures are visible on
//! the History view and in the log file without interrupting the operator.

use chrono::{DateTime, Utc};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

/// Kind of recorded activity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityKind {
    Loaded,
    LoadFailed,
    Command,
    CommandFailed,
}

impl ActivityKind {
    /// Icon for TUI display
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Loaded => "↻",
            Self::LoadFailed => "✗",
            Self::Command => "▶",
            Self::CommandFailed => "!",
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::LoadFailed | Self::CommandFailed)
    }
}

/// One history line
#[derive(Debug, Clone)]
pub struct ActivityEntry {
    pub timestamp: DateTime<Utc>,
    pub kind: ActivityKind,
    /// Slice or command the entry is about
    pub source: String,
    pub message: String,
}

impl ActivityEntry {
    pub fn formatted_time(&self) -> String {
        self.timestamp.format("%H:%M:%S").to_string()
    }
}

#[derive(Debug)]
struct HistoryInner {
    entries: VecDeque<ActivityEntry>,
    generation: u64,
}

/// Bounded ring of activity entries, shared by all contexts
#[derive(Debug, Clone)]
pub struct ActivityHistory {
    inner: Arc<Mutex<HistoryInner>>,
    limit: usize,
}

impl ActivityHistory {
    pub fn new(limit: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(HistoryInner {
                entries: VecDeque::with_capacity(limit.min(256)),
                generation: 0,
            })),
            limit: limit.max(1),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HistoryInner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn record(&self, kind: ActivityKind, source: impl Into<String>, message: impl Into<String>) {
        let mut inner = self.lock();
        if inner.entries.len() >= self.limit {
            inner.entries.pop_back();
        }
        inner.entries.push_front(ActivityEntry {
            timestamp: Utc::now(),
            kind,
            source: source.into(),
            message: message.into(),
        });
        inner.generation += 1;
    }

    /// Entries, newest first
    pub fn entries(&self) -> Vec<ActivityEntry> {
        self.lock().entries.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn generation(&self) -> u64 {
        self.lock().generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newest_first_and_bounded() {
        let history = ActivityHistory::new(3);
        for i in 0..5 {
            history.record(ActivityKind::Loaded, "health", format!("load {}", i));
        }
        let entries = history.entries();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].message, "load 4");
        assert_eq!(entries[2].message, "load 2");
    }

    #[test]
    fn test_failure_kinds() {
        assert!(ActivityKind::LoadFailed.is_failure());
        assert!(ActivityKind::CommandFailed.is_failure());
        assert!(!ActivityKind::Command.is_failure());
    }
}
