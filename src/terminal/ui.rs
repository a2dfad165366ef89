//! Plain-text rendering of the transcript, progress and status.

use std::path::Path;

use crate::intake::{DisplayMessage, DisplayRole, Milestone, ProgressMap, SessionState, TurnError};

/// Glyph shown when no banner file is available.
pub const FALLBACK_BANNER: &str = "🎯";

/// Shown instead of the prompt once the interview is over.
pub const ENDED_NOTICE: &str =
    "The interview has ended. Type /reset to start a new session.";

/// Progress rows as shown to the candidate. `experience` is reported with
/// location and has no row of its own.
pub const PROGRESS_ITEMS: [(&str, Milestone); 6] = [
    ("Basic Info", Milestone::Name),
    ("Contact Details", Milestone::Contact),
    ("Location & Exp", Milestone::Location),
    ("Desired Role", Milestone::Position),
    ("Tech Stack", Milestone::TechStack),
    ("Tech Questions", Milestone::Questions),
];

/// Read the decorative banner once. Missing or unreadable files fall back to
/// [`FALLBACK_BANNER`].
pub fn load_banner(path: Option<&Path>) -> String {
    let Some(path) = path else {
        return FALLBACK_BANNER.to_owned();
    };
    match std::fs::read_to_string(path) {
        Ok(text) if !text.trim().is_empty() => text.trim_end().to_owned(),
        Ok(_) => FALLBACK_BANNER.to_owned(),
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "banner not loaded");
            FALLBACK_BANNER.to_owned()
        }
    }
}

/// Title block printed at startup.
pub fn format_header(banner: &str) -> String {
    format!("{banner}\nTalentScout AI\nYour intelligent hiring assistant for tech recruitment\n")
}

/// One transcript line.
pub fn format_message(message: &DisplayMessage) -> String {
    match message.role {
        DisplayRole::Assistant => format!("🤖 {}", message.content),
        DisplayRole::User => format!("👤 {}", message.content),
    }
}

/// Status badge text.
pub fn status_badge(state: &SessionState) -> &'static str {
    if state.is_ended() {
        "🔴 Interview Ended"
    } else {
        "🟢 Interview Active"
    }
}

/// Interview progress checklist.
pub fn format_progress(progress: &ProgressMap) -> String {
    let mut lines = vec!["Interview Progress".to_owned()];
    for (label, milestone) in PROGRESS_ITEMS {
        let icon = if progress.is_done(milestone) {
            "✅"
        } else {
            "⏳"
        };
        lines.push(format!("  {icon} {label}"));
    }
    lines.join("\n")
}

/// Session status block.
pub fn format_status(state: &SessionState, model: &str, base_url: &str) -> String {
    let stats = state.stats();
    format!(
        "{badge}\n\
         Session: {id}\n\
         Started: {started}\n\
         Model: {model} @ {base_url}\n\
         Messages sent: {turns}\n\
         Replies received: {replies}\n\
         Milestones: {done}/{total}\n\
         Cached replies: {cached}",
        badge = status_badge(state),
        id = state.session_id(),
        started = state.started_at().format("%Y-%m-%d %H:%M:%S UTC"),
        turns = stats.turns,
        replies = stats.replies,
        done = stats.milestones_completed,
        total = Milestone::ALL.len(),
        cached = stats.cached_replies,
    )
}

/// How candidate data is handled.
pub fn privacy_notice() -> &'static str {
    "Privacy\n\
     • Your answers are used only to conduct this interview.\n\
     • Nothing is kept after the session ends.\n\
     • You can erase everything instantly with /delete.\n\
     • Text is sent to the selected AI model provider with emails and phone numbers masked."
}

/// Message for a turn that did not complete.
pub fn format_turn_error(error: &TurnError) -> String {
    match error {
        TurnError::Input(e) => format!("⚠️ {e}"),
        TurnError::Backend(e) => format!("❌ Error getting response: {e}"),
        TurnError::Ended => ENDED_NOTICE.to_owned(),
        TurnError::Busy => "⏳ Still working on your previous message.".to_owned(),
        TurnError::NotInitialized => {
            "❌ The interview has not started yet. Check the connection and try again.".to_owned()
        }
    }
}

/// Message for a failed greeting.
pub fn format_connection_error(error: &TurnError) -> String {
    format!("❌ Connection error: {error}. Please check your API settings.")
}
