use std::collections::VecDeque;

/// Bounded FIFO of recently used values. Pushing past capacity evicts the
/// oldest entry.
#[derive(Debug, Clone)]
pub struct RecentSet<T> {
    entries: VecDeque<T>,
    capacity: usize,
}

impl<T: PartialEq> RecentSet<T> {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Record `value` as most recent. An existing equal entry is moved to
    /// the back rather than duplicated.
    pub fn push(&mut self, value: T) {
        if let Some(pos) = self.entries.iter().position(|v| *v == value) {
            self.entries.remove(pos);
        }
        if self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(value);
    }

    pub fn contains(&self, value: &T) -> bool {
        self.entries.contains(value)
    }

    pub fn oldest(&self) -> Option<&T> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Entries oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
