//! Session-scoped mutable record of one interview.
//!
//! [`SessionState`] is an owned value handed by `&mut` to every pipeline
//! call; there is no global session. It owns the model-facing history, the
//! display history, milestone progress, the input queue and the reply cache.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::providers::{Message, Role};

use super::cache::{ResponseCache, DEFAULT_CAPACITY, DEFAULT_CONTEXT_MESSAGES};
use super::progress::ProgressMap;
use super::prompts::SYSTEM_INSTRUCTION;
use super::queue::InputQueue;

/// Lifecycle of an interview.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionPhase {
    /// No greeting delivered yet.
    #[default]
    NotInitialized,
    /// Greeting delivered; accepting turns.
    Active,
    /// Interview finished. Only a reset leaves this phase.
    Ended,
}

impl SessionPhase {
    /// Check if a transition from `self` to `target` is valid.
    ///
    /// Resets are not transitions; they rebuild the state.
    pub fn can_transition_to(&self, target: SessionPhase) -> bool {
        use SessionPhase::*;
        matches!(
            (self, target),
            (NotInitialized, Active) | (NotInitialized, Ended) | (Active, Ended)
        )
    }

    /// Whether this phase is terminal.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Ended)
    }
}

impl std::fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::NotInitialized => "not_initialized",
            Self::Active => "active",
            Self::Ended => "ended",
        };
        write!(f, "{s}")
    }
}

/// Speaker of a display entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayRole {
    /// The candidate.
    User,
    /// The assistant.
    Assistant,
}

/// A line of the transcript shown to the candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayMessage {
    /// Who said it.
    pub role: DisplayRole,
    /// Text as displayed (metadata stripped for assistant turns).
    pub content: String,
}

/// Counters for the status view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionStats {
    /// Candidate messages shown.
    pub turns: usize,
    /// Assistant replies in the model-facing history, greeting included.
    pub replies: usize,
    /// Milestones marked done.
    pub milestones_completed: usize,
    /// Replies held in the cache.
    pub cached_replies: usize,
}

/// Aggregate root of one interview session.
#[derive(Debug, Clone)]
pub struct SessionState {
    session_id: Uuid,
    started_at: DateTime<Utc>,
    history: Vec<Message>,
    display: Vec<DisplayMessage>,
    /// Milestone flags merged from reply metadata.
    pub progress: ProgressMap,
    /// Submissions waiting for the drain loop.
    pub queue: InputQueue,
    /// Reply memo for this session only.
    pub cache: ResponseCache,
    phase: SessionPhase,
    processing: bool,
}

impl SessionState {
    /// Fresh session with the default cache bounds.
    pub fn new() -> Self {
        Self::with_cache(DEFAULT_CAPACITY, DEFAULT_CONTEXT_MESSAGES)
    }

    /// Fresh session with explicit cache bounds.
    pub fn with_cache(capacity: usize, context_messages: usize) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            started_at: Utc::now(),
            history: vec![Message::system(SYSTEM_INSTRUCTION)],
            display: Vec::new(),
            progress: ProgressMap::new(),
            queue: InputQueue::new(),
            cache: ResponseCache::new(capacity, context_messages),
            phase: SessionPhase::NotInitialized,
            processing: false,
        }
    }

    /// Identifier used in logs and the status view.
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// When this session (or its last reset) started.
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Model-facing history, system seed first. Holds raw candidate text.
    pub fn history(&self) -> &[Message] {
        &self.history
    }

    /// Transcript shown to the candidate.
    pub fn display(&self) -> &[DisplayMessage] {
        &self.display
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Whether the greeting has been delivered.
    pub fn is_initialized(&self) -> bool {
        self.phase != SessionPhase::NotInitialized
    }

    /// Whether the interview is over.
    pub fn is_ended(&self) -> bool {
        self.phase.is_terminal()
    }

    /// Whether a drain loop is in flight.
    pub fn is_processing(&self) -> bool {
        self.processing
    }

    /// Counters for the status view.
    pub fn stats(&self) -> SessionStats {
        SessionStats {
            turns: self
                .display
                .iter()
                .filter(|m| m.role == DisplayRole::User)
                .count(),
            replies: self
                .history
                .iter()
                .filter(|m| m.role == Role::Assistant)
                .count(),
            milestones_completed: self.progress.completed(),
            cached_replies: self.cache.len(),
        }
    }

    /// Append a candidate turn: `model_text` to history, `display_text` to
    /// the transcript. They differ only for synthetic substitutions such as
    /// the exit instruction.
    pub fn push_user_turn(&mut self, model_text: &str, display_text: &str) {
        self.history.push(Message::user(model_text));
        self.display.push(DisplayMessage {
            role: DisplayRole::User,
            content: display_text.to_owned(),
        });
    }

    /// Append an assistant turn: the raw reply to history, the parsed text
    /// to the transcript.
    pub fn push_assistant_turn(&mut self, raw_reply: &str, display_text: &str) {
        self.history.push(Message::assistant(raw_reply));
        self.display.push(DisplayMessage {
            role: DisplayRole::Assistant,
            content: display_text.to_owned(),
        });
    }

    /// Append a control instruction in the user slot with no display
    /// counterpart (the greeting instruction).
    pub fn push_instruction(&mut self, instruction: &str) {
        self.history.push(Message::user(instruction));
    }

    /// Move to `target` if the lifecycle allows it. Returns whether it moved.
    pub fn transition(&mut self, target: SessionPhase) -> bool {
        if !self.phase.can_transition_to(target) {
            tracing::warn!(from = %self.phase, to = %target, "rejected session transition");
            return false;
        }
        self.phase = target;
        true
    }

    /// Mark a drain loop as started or finished.
    pub fn set_processing(&mut self, processing: bool) {
        self.processing = processing;
    }

    /// Return to a fresh, uninitialized session keeping the cache bounds.
    pub fn reset(&mut self) {
        let capacity = self.cache.capacity();
        let context = self.cache.context_messages();
        *self = Self::with_cache(capacity, context);
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
