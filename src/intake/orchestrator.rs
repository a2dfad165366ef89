//! Turn orchestrator: the control loop for one candidate submission.
//!
//! ```text
//! raw text -> validate -> queue -> drain:
//!     exit phrase?  -> exit instruction -> farewell reply -> Ended
//!     otherwise     -> sanitize history -> cache or backend -> parse -> merge progress
//! ```
//!
//! Items are drained strictly one at a time; a backend failure clears the
//! queue and aborts the turn but leaves the session usable.

use std::sync::Arc;

use tracing::{info, instrument, warn};

use super::gateway::{CompletionGateway, GatewayError};
use super::progress::Milestone;
use super::prompts::{is_exit_intent, EXIT_INSTRUCTION, GREETING_INSTRUCTION};
use super::reply::{MarkerReplyParser, ReplyParser};
use super::sanitizer::sanitize_history;
use super::state::{SessionPhase, SessionState};
use super::validator::{validate_input_within, InputError, MAX_INPUT_CHARS};
use crate::providers::Message;

/// Why a turn did not complete.
#[derive(Debug, thiserror::Error)]
pub enum TurnError {
    /// The submission was rejected before queueing.
    #[error(transparent)]
    Input(#[from] InputError),
    /// The backend call failed; the queue has been cleared.
    #[error(transparent)]
    Backend(#[from] GatewayError),
    /// The interview is over; only a reset accepts input again.
    #[error("the interview has ended")]
    Ended,
    /// A previous submission is still being processed.
    #[error("still processing the previous message")]
    Busy,
    /// The greeting has not been delivered yet.
    #[error("the interview has not started yet")]
    NotInitialized,
}

/// An assistant reply produced during a turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssistantReply {
    /// Text shown to the candidate.
    pub display_text: String,
    /// Milestones whose flag changed because of this reply.
    pub progress_changed: Vec<Milestone>,
}

/// Result of a completed drain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TurnOutcome {
    /// Replies in the order they were produced.
    pub replies: Vec<AssistantReply>,
    /// Whether the turn ended the interview.
    pub ended: bool,
}

/// Drives greeting, turns and lifecycle commands against a [`SessionState`].
#[derive(Clone)]
pub struct TurnOrchestrator {
    gateway: CompletionGateway,
    parser: Arc<dyn ReplyParser>,
    use_cache: bool,
    max_input_chars: usize,
}

impl std::fmt::Debug for TurnOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TurnOrchestrator")
            .field("gateway", &self.gateway)
            .field("use_cache", &self.use_cache)
            .field("max_input_chars", &self.max_input_chars)
            .finish_non_exhaustive()
    }
}

impl TurnOrchestrator {
    /// Orchestrator with the marker reply parser, caching on and the default
    /// input limit.
    pub fn new(gateway: CompletionGateway) -> Self {
        Self {
            gateway,
            parser: Arc::new(MarkerReplyParser),
            use_cache: true,
            max_input_chars: MAX_INPUT_CHARS,
        }
    }

    /// Swap the reply parser.
    #[must_use]
    pub fn with_parser(mut self, parser: Arc<dyn ReplyParser>) -> Self {
        self.parser = parser;
        self
    }

    /// Enable or disable the response cache for turns.
    #[must_use]
    pub fn with_cache(mut self, use_cache: bool) -> Self {
        self.use_cache = use_cache;
        self
    }

    /// Override the input character limit.
    #[must_use]
    pub fn with_max_input_chars(mut self, max_input_chars: usize) -> Self {
        self.max_input_chars = max_input_chars;
        self
    }

    /// Deliver the greeting if the session has not started.
    ///
    /// The greeting instruction and reply are committed together only on
    /// success, so a failed attempt can simply be retried.
    ///
    /// # Errors
    ///
    /// Returns [`TurnError::Backend`] if the backend call fails; the session
    /// stays uninitialized.
    #[instrument(skip_all, fields(session_id = %state.session_id()))]
    pub async fn initialize(&self, state: &mut SessionState) -> Result<(), TurnError> {
        if state.is_initialized() {
            return Ok(());
        }

        let mut request = sanitize_history(state.history());
        request.push(Message::user(GREETING_INSTRUCTION));

        let raw_reply = self
            .gateway
            .complete(&mut state.cache, &request, false)
            .await?;
        let parsed = self.parser.parse(&raw_reply);

        state.push_instruction(GREETING_INSTRUCTION);
        state.push_assistant_turn(&raw_reply, &parsed.display_text);
        if let Some(metadata) = parsed.metadata.as_ref() {
            state.progress.merge(metadata);
        }
        state.transition(SessionPhase::Active);

        info!(model = self.gateway.model(), "interview started");
        Ok(())
    }

    /// Validate, queue and drain one candidate submission.
    ///
    /// # Errors
    ///
    /// - [`TurnError::Ended`], [`TurnError::NotInitialized`] or
    ///   [`TurnError::Busy`] when the session cannot take input.
    /// - [`TurnError::Input`] when validation fails; nothing is queued.
    /// - [`TurnError::Backend`] when a backend call fails mid-drain. Replies
    ///   produced before the failure stay in the session.
    #[instrument(skip_all, fields(session_id = %state.session_id()))]
    pub async fn submit(
        &self,
        state: &mut SessionState,
        raw: &str,
    ) -> Result<TurnOutcome, TurnError> {
        match state.phase() {
            SessionPhase::Ended => return Err(TurnError::Ended),
            SessionPhase::NotInitialized => return Err(TurnError::NotInitialized),
            SessionPhase::Active => {}
        }
        if state.is_processing() {
            return Err(TurnError::Busy);
        }

        let cleaned = validate_input_within(raw, self.max_input_chars)?;
        state.queue.enqueue(&cleaned);

        state.set_processing(true);
        let result = self.drain(state).await;
        state.set_processing(false);
        result
    }

    async fn drain(&self, state: &mut SessionState) -> Result<TurnOutcome, TurnError> {
        let mut outcome = TurnOutcome::default();

        while let Some(input) = state.queue.dequeue() {
            info!(
                chars = input.chars().count(),
                queued = state.queue.len(),
                "processing submission"
            );

            if is_exit_intent(&input) {
                state.push_user_turn(EXIT_INSTRUCTION, &input);
                state.transition(SessionPhase::Ended);
                state.queue.clear();
                outcome.ended = true;
                info!("candidate ended the interview");

                let reply = self.respond(state).await.inspect_err(|e| {
                    warn!(error = %e, "farewell reply failed; interview ended anyway");
                })?;
                outcome.replies.push(reply);
                break;
            }

            state.push_user_turn(&input, &input);
            match self.respond(state).await {
                Ok(reply) => outcome.replies.push(reply),
                Err(e) => {
                    warn!(error = %e, dropped = state.queue.len(), "turn aborted");
                    state.queue.clear();
                    return Err(e);
                }
            }
        }

        Ok(outcome)
    }

    async fn respond(&self, state: &mut SessionState) -> Result<AssistantReply, TurnError> {
        let sanitized = sanitize_history(state.history());
        let raw_reply = self
            .gateway
            .complete(&mut state.cache, &sanitized, self.use_cache)
            .await?;
        let parsed = self.parser.parse(&raw_reply);

        state.push_assistant_turn(&raw_reply, &parsed.display_text);
        let progress_changed = match parsed.metadata.as_ref() {
            Some(metadata) => state.progress.merge(metadata),
            None => Vec::new(),
        };

        Ok(AssistantReply {
            display_text: parsed.display_text,
            progress_changed,
        })
    }
}

/// End the interview on an external command and drop pending input.
///
/// Returns `false` when it had already ended.
pub fn end_interview(state: &mut SessionState) -> bool {
    if state.is_ended() {
        return false;
    }
    state.queue.clear();
    let moved = state.transition(SessionPhase::Ended);
    info!(session_id = %state.session_id(), "interview ended by command");
    moved
}

/// Start over: fresh history, progress, queue and cache.
pub fn reset_session(state: &mut SessionState) {
    let previous = state.session_id();
    state.reset();
    info!(%previous, session_id = %state.session_id(), "session reset");
}

/// Discard everything the session holds and return a fresh one.
///
/// Takes the state by value so the old record is dropped here.
pub fn delete_session_data(state: SessionState) -> SessionState {
    let previous = state.session_id();
    let fresh = SessionState::with_cache(state.cache.capacity(), state.cache.context_messages());
    drop(state);
    info!(%previous, "session data deleted");
    fresh
}
