//! Splits raw model replies into display text and in-band progress metadata.
//!
//! The model is asked to finish each reply with a line such as
//!
//! ```text
//! METADATA: {"name": true, "contact": false, ...}
//! ```
//!
//! Everything from the marker onward is hidden from the candidate. The
//! orchestrator only sees the [`ReplyParser`] trait, so this textual format
//! can be replaced by a structured-output mode without touching it.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

/// Marker token that introduces the metadata block.
pub const METADATA_MARKER: &str = "METADATA:";

/// Decoded metadata object.
pub type Metadata = Map<String, Value>;

static METADATA_BLOCK: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?s)METADATA:\s*(\{.*\})").ok());

/// A model reply split for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedReply {
    /// Text shown to the candidate.
    pub display_text: String,
    /// Decoded metadata, absent when missing or malformed.
    pub metadata: Option<Metadata>,
}

/// Turns a raw reply into a [`ParsedReply`]. Implementations never fail.
pub trait ReplyParser: Send + Sync {
    /// Split `raw_reply` into display text and optional metadata.
    fn parse(&self, raw_reply: &str) -> ParsedReply;
}

/// Parser for the `METADATA: {...}` trailer.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkerReplyParser;

impl ReplyParser for MarkerReplyParser {
    fn parse(&self, raw_reply: &str) -> ParsedReply {
        parse_reply(raw_reply)
    }
}

/// Parse a reply with the `METADATA:` marker format.
///
/// - No marker followed by a braces block: the reply is returned unchanged.
/// - Marker found: display text is everything before it, trimmed. The block
///   is decoded as a JSON object; a decode failure yields no metadata.
pub fn parse_reply(raw_reply: &str) -> ParsedReply {
    let Some(captures) = METADATA_BLOCK
        .as_ref()
        .and_then(|re| re.captures(raw_reply))
    else {
        return ParsedReply {
            display_text: raw_reply.to_owned(),
            metadata: None,
        };
    };

    let (start, block) = match (captures.get(0), captures.get(1)) {
        (Some(whole), Some(block)) => (whole.start(), block.as_str().trim()),
        _ => {
            return ParsedReply {
                display_text: raw_reply.to_owned(),
                metadata: None,
            }
        }
    };

    let metadata = match serde_json::from_str::<Metadata>(block) {
        Ok(map) => Some(map),
        Err(e) => {
            tracing::debug!(error = %e, "reply metadata block did not decode");
            None
        }
    };

    let display_text = raw_reply.get(..start).unwrap_or_default().trim().to_owned();

    ParsedReply {
        display_text,
        metadata,
    }
}
