//! Conversation-turn pipeline for the candidate interview.
//!
//! Leaf to root:
//! - [`validator`] rejects empty or oversized input
//! - [`queue`] buffers validated submissions for sequential draining
//! - [`sanitizer`] masks emails and long digit runs before text leaves the process
//! - [`cache`] memoizes replies by a digest of recent context
//! - [`gateway`] is the only caller of the model backend
//! - [`reply`] splits replies into display text and progress metadata
//! - [`progress`] and [`state`] hold the session record
//! - [`orchestrator`] runs one turn end to end

pub mod cache;
pub mod gateway;
pub mod orchestrator;
pub mod progress;
pub mod prompts;
pub mod queue;
pub mod reply;
pub mod sanitizer;
pub mod state;
pub mod validator;

pub use gateway::{CompletionGateway, GatewayError};
pub use orchestrator::{
    delete_session_data, end_interview, reset_session, AssistantReply, TurnError,
    TurnOrchestrator, TurnOutcome,
};
pub use progress::{Milestone, ProgressMap};
pub use reply::{parse_reply, MarkerReplyParser, ParsedReply, ReplyParser};
pub use state::{DisplayMessage, DisplayRole, SessionPhase, SessionState};
