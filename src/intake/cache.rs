//! Per-session memo of model replies keyed by recent context.
//!
//! The key is a SHA-256 digest of only the last few messages, so two
//! histories that differ earlier but share the same recent tail map to the
//! same entry. That is a hit-rate heuristic: a stale reply can be returned for
//! a different conversation that happens to end the same way.

use std::collections::{HashMap, VecDeque};

use sha2::{Digest, Sha256};

use crate::providers::Message;

/// Default number of cached replies per session.
pub const DEFAULT_CAPACITY: usize = 50;

/// Default number of trailing messages that feed the key.
pub const DEFAULT_CONTEXT_MESSAGES: usize = 5;

/// Digest of the trailing `window` messages of `history` (the whole history
/// when it is no longer than the window).
pub fn context_key(history: &[Message], window: usize) -> String {
    let start = history.len().saturating_sub(window);
    let tail = history.get(start..).unwrap_or_default();

    let mut hasher = Sha256::new();
    match serde_json::to_vec(tail) {
        Ok(bytes) => hasher.update(&bytes),
        // Message serialization cannot fail; fall back to the debug form.
        Err(_) => hasher.update(format!("{tail:?}").as_bytes()),
    }
    hex::encode(hasher.finalize())
}

/// Bounded map from context digest to reply, evicting in insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseCache {
    entries: HashMap<String, String>,
    order: VecDeque<String>,
    capacity: usize,
    context_messages: usize,
}

impl ResponseCache {
    /// Create an empty cache holding at most `capacity` replies, keyed on the
    /// last `context_messages` messages.
    pub fn new(capacity: usize, context_messages: usize) -> Self {
        Self {
            entries: HashMap::new(),
            order: VecDeque::new(),
            capacity: capacity.max(1),
            context_messages: context_messages.max(1),
        }
    }

    /// Key for `history` under this cache's context window.
    pub fn key_for(&self, history: &[Message]) -> String {
        context_key(history, self.context_messages)
    }

    /// Look up a cached reply.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Store `value` under `key`.
    ///
    /// When the cache is full, exactly one entry (the earliest inserted) is
    /// evicted first. Overwriting an existing key keeps its original
    /// insertion position and evicts nothing.
    pub fn put(&mut self, key: String, value: String) {
        if let Some(existing) = self.entries.get_mut(&key) {
            *existing = value;
            return;
        }

        if self.entries.len() >= self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.entries.remove(&oldest);
                tracing::debug!(evicted = %oldest, "response cache full, evicted oldest entry");
            }
        }

        self.order.push_back(key.clone());
        self.entries.insert(key, value);
    }

    /// Number of cached replies.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of cached replies.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of trailing messages that feed the key.
    pub fn context_messages(&self) -> usize {
        self.context_messages
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY, DEFAULT_CONTEXT_MESSAGES)
    }
}
