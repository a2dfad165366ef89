//! TalentScout, a conversational hiring-intake assistant.
//!
//! Drives a scripted screening interview with a candidate, relays turns to an
//! OpenAI-compatible model backend, masks PII before anything leaves the
//! process and tracks interview progress from metadata the model appends to
//! its replies.
//!
//! See `DESIGN.md` for the module map.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod intake;
pub mod logging;
pub mod providers;
pub mod terminal;
