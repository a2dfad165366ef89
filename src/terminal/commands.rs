//! Slash command parsing and help text.

/// Commands the candidate can type instead of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Start a fresh interview.
    Reset,
    /// End the interview now.
    End,
    /// Erase everything the session holds.
    Delete,
    /// Show milestone progress.
    Progress,
    /// Show session status.
    Status,
    /// Show the privacy notice.
    Privacy,
    /// Show available commands.
    Help,
    /// Leave the program.
    Quit,
}

/// A classified line of terminal input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputLine {
    /// A recognised slash command.
    Command(Command),
    /// Something starting with `/` that is not a command.
    Unknown(String),
    /// Text for the interview.
    Chat(String),
}

/// Classify one line of input. Commands are case-insensitive and ignore
/// surrounding whitespace; chat text is passed through untrimmed so the
/// validator sees exactly what was typed.
pub fn parse_input(line: &str) -> InputLine {
    let trimmed = line.trim();
    let Some(name) = trimmed.strip_prefix('/') else {
        return InputLine::Chat(line.to_owned());
    };

    let command = match name.to_lowercase().as_str() {
        "reset" => Command::Reset,
        "end" => Command::End,
        "delete" => Command::Delete,
        "progress" => Command::Progress,
        "status" => Command::Status,
        "privacy" => Command::Privacy,
        "help" => Command::Help,
        "quit" => Command::Quit,
        _ => return InputLine::Unknown(trimmed.to_owned()),
    };
    InputLine::Command(command)
}

/// List all available commands.
pub fn handle_help() -> String {
    [
        "Available commands:",
        "",
        "/progress - interview progress",
        "/status - session status",
        "/privacy - how your data is handled",
        "/reset - start a new interview",
        "/end - end the interview now",
        "/delete - delete all data from this session",
        "/quit - leave TalentScout",
        "/help - show this message",
        "",
        "Type bye, exit or done to finish the interview.",
    ]
    .join("\n")
}
