//! PII masking chokepoint for text leaving the process.
//!
//! Only candidate-authored (`user`) content is masked. The stored history is
//! never rewritten: [`sanitize_history`] returns a masked copy for the
//! backend and leaves the original untouched.

use std::sync::LazyLock;

use regex::Regex;

use crate::providers::{Message, Role};

/// Replacement token for email addresses.
pub const EMAIL_MARKER: &str = "[EMAIL]";

/// Replacement token for runs of ten or more digits (phone numbers, IDs).
pub const PHONE_MARKER: &str = "[PHONE]";

static MASKER: LazyLock<PiiMasker> = LazyLock::new(PiiMasker::new);

/// Masks email-shaped substrings and long digit runs.
#[derive(Debug, Clone)]
pub struct PiiMasker {
    patterns: Vec<(Regex, &'static str)>,
}

impl PiiMasker {
    /// Create a masker with the default email and digit-run patterns.
    pub fn new() -> Self {
        let patterns = [
            (r"\b[\w.\-]+@[\w.\-]+\.\w+\b", EMAIL_MARKER),
            (r"[0-9]{10,}", PHONE_MARKER),
        ];

        Self {
            patterns: patterns
                .iter()
                .filter_map(|(pattern, marker)| Regex::new(pattern).ok().map(|re| (re, *marker)))
                .collect(),
        }
    }

    /// Replace every match with its marker. Emails are masked first so the
    /// digits inside an address collapse into a single email marker.
    pub fn mask(&self, text: &str) -> String {
        let mut masked = text.to_owned();
        for (pattern, marker) in &self.patterns {
            masked = pattern.replace_all(&masked, *marker).into_owned();
        }
        masked
    }
}

impl Default for PiiMasker {
    fn default() -> Self {
        Self::new()
    }
}

/// Mask PII in `text` with the shared default masker.
pub fn mask_pii(text: &str) -> String {
    MASKER.mask(text)
}

/// Copy `history`, masking `user` messages. System and assistant content
/// pass through unchanged.
pub fn sanitize_history(history: &[Message]) -> Vec<Message> {
    history
        .iter()
        .map(|msg| match msg.role {
            Role::User => Message {
                role: Role::User,
                content: mask_pii(&msg.content),
            },
            Role::System | Role::Assistant => msg.clone(),
        })
        .collect()
}
