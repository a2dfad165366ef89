//! FIFO buffer between "candidate submitted text" and "pipeline processed text".

use std::collections::VecDeque;

/// Ordered queue of trimmed submissions awaiting the drain loop.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputQueue {
    pending: VecDeque<String>,
}

impl InputQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `text` after trimming it again.
    ///
    /// Returns `false` and leaves the queue untouched when nothing remains
    /// after trimming.
    pub fn enqueue(&mut self, text: &str) -> bool {
        let cleaned = text.trim();
        if cleaned.is_empty() {
            return false;
        }
        self.pending.push_back(cleaned.to_owned());
        true
    }

    /// Remove and return the oldest entry.
    pub fn dequeue(&mut self) -> Option<String> {
        self.pending.pop_front()
    }

    /// Whether any entry is waiting.
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Number of waiting entries.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Discard every waiting entry.
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
