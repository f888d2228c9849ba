//! Bounded most-recent-first list.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// A list that keeps only the `capacity` most recent entries.
///
/// New entries are prepended; once the list is full the oldest entry (at the
/// back) is evicted. Used for invoice history and the activity log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentList<T> {
    capacity: usize,
    entries: VecDeque<T>,
}

impl<T> RecentList<T> {
    /// Create an empty list. A zero capacity is treated as one.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            entries: VecDeque::with_capacity(capacity),
        }
    }

    /// Prepend an entry, evicting the oldest one when full.
    ///
    /// Returns the evicted entry, if any.
    pub fn push_front(&mut self, entry: T) -> Option<T> {
        let evicted = if self.entries.len() == self.capacity {
            self.entries.pop_back()
        } else {
            None
        };
        self.entries.push_front(entry);
        evicted
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Most recent entry.
    pub fn latest(&self) -> Option<&T> {
        self.entries.front()
    }

    /// Iterate most-recent-first.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
    }
}

impl<'a, T> IntoIterator for &'a RecentList<T> {
    type Item = &'a T;
    type IntoIter = std::collections::vec_deque::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
