//! Line-oriented terminal front end for the interview.
//!
//! Renders the display history, progress and status, and maps slash
//! commands onto the session lifecycle operations.

pub mod commands;
pub mod input;
pub mod ui;

pub use commands::{parse_input, Command, InputLine};
pub use input::read_input_line;
