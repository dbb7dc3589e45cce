//! Bounded event history, newest entry first

use std::collections::VecDeque;

/// Default number of history lines a colony keeps
pub const DEFAULT_MAX_HISTORY: usize = 10;

/// The player's feedback channel: every outcome and failure lands here
#[derive(Debug, Clone, PartialEq)]
pub struct EventLog {
    entries: VecDeque<String>,
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLog {
    pub fn new() -> Self {
        Self {
            entries: VecDeque::with_capacity(DEFAULT_MAX_HISTORY),
        }
    }

    /// Build a log from entries already ordered newest-first
    pub fn from_entries(entries: impl IntoIterator<Item = String>, max_history: usize) -> Self {
        let mut entries: VecDeque<String> = entries.into_iter().collect();
        entries.truncate(max_history);
        Self { entries }
    }

    /// Insert at the front and evict from the tail beyond `max_history`
    pub fn push(&mut self, message: impl Into<String>, max_history: usize) {
        self.entries.push_front(message.into());
        self.entries.truncate(max_history);
    }

    /// Most recent entry
    pub fn latest(&self) -> Option<&str> {
        self.entries.front().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(String::as_str)
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.entries.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
