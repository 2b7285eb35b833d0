use hearth_domain::LogEntry;
use std::collections::VecDeque;

/// Newest-first, length-bounded craving/event log. Entries are only ever prepended or
/// cleared all at once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventLog<I> {
    entries: VecDeque<LogEntry<I>>,
    capacity: usize,
}

impl<I> EventLog<I> {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self { entries: VecDeque::new(), capacity: capacity.max(1) }
    }

    /// Rebuilds a log from stored entries (newest first), dropping any beyond `capacity`.
    #[must_use]
    pub fn from_entries(entries: Vec<LogEntry<I>>, capacity: usize) -> Self {
        let mut log = Self { entries: entries.into(), capacity: capacity.max(1) };
        log.entries.truncate(log.capacity);
        log
    }

    /// Prepends `entry`, evicting the oldest entries past capacity.
    pub fn push(&mut self, entry: LogEntry<I>) -> &LogEntry<I> {
        self.entries.push_front(entry);
        self.entries.truncate(self.capacity);
        &self.entries[0]
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Newest first.
    pub fn iter(&self) -> impl Iterator<Item = &LogEntry<I>> {
        self.entries.iter()
    }

    /// The `n` most recent entries, newest first.
    pub fn recent(&self, n: usize) -> impl Iterator<Item = &LogEntry<I>> {
        self.entries.iter().take(n)
    }

    pub(crate) fn to_vec(&self) -> Vec<&LogEntry<I>> {
        self.entries.iter().collect()
    }
}
