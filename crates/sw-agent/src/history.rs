//! Bounded, time-ordered record of an agent's recent emotional labels.

use std::collections::VecDeque;

use sw_core::Millis;
use sw_intent::EmotionalState;

/// Ring buffer of `(label, timestamp)` entries, oldest first.
///
/// Pushing onto a full buffer evicts the oldest entry.  Entries are expected
/// in non-decreasing timestamp order; the contagion engine appends the
/// committed label of every agent it evaluates, once per pass, so a change
/// falls out of the window after `capacity` further evaluations.
#[derive(Clone, Debug, PartialEq)]
pub struct EmotionalHistory {
    entries:  VecDeque<(EmotionalState, Millis)>,
    capacity: usize,
}

impl EmotionalHistory {
    /// An empty history holding at most `capacity` entries (minimum 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append `label` observed at `at`, evicting the oldest entry when full.
    pub fn push(&mut self, label: EmotionalState, at: Millis) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back((label, at));
    }

    /// Most recent label, if any.
    pub fn latest(&self) -> Option<EmotionalState> {
        self.entries.back().map(|&(label, _)| label)
    }

    /// Timestamp of the newest entry whose label differs from the entry
    /// before it, i.e. when the agent last changed its mind.
    ///
    /// `None` if the retained window shows no change.
    pub fn last_change_at(&self) -> Option<Millis> {
        let n = self.entries.len();
        (1..n)
            .rev()
            .find(|&i| self.entries[i].0 != self.entries[i - 1].0)
            .map(|i| self.entries[i].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(EmotionalState, Millis)> {
        self.entries.iter()
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

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
