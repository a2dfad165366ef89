//! Candidate input validation.

/// Longest accepted submission, in characters after trimming.
pub const MAX_INPUT_CHARS: usize = 5000;

/// Why a submission was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    /// Nothing left after trimming.
    #[error("Please enter a message.")]
    Empty,
    /// Trimmed text exceeds the limit.
    #[error("Message too long. Please keep it under {max} characters.")]
    TooLong {
        /// Trimmed length in characters.
        length: usize,
        /// Configured limit.
        max: usize,
    },
}

/// Validate raw input against [`MAX_INPUT_CHARS`] and return it trimmed.
///
/// # Errors
///
/// Returns [`InputError::Empty`] or [`InputError::TooLong`].
pub fn validate_input(raw: &str) -> Result<String, InputError> {
    validate_input_within(raw, MAX_INPUT_CHARS)
}

/// Validate raw input against an explicit character limit.
///
/// # Errors
///
/// Returns [`InputError::Empty`] or [`InputError::TooLong`].
pub fn validate_input_within(raw: &str, max_chars: usize) -> Result<String, InputError> {
    let cleaned = raw.trim();
    if cleaned.is_empty() {
        return Err(InputError::Empty);
    }

    let length = cleaned.chars().count();
    if length > max_chars {
        return Err(InputError::TooLong {
            length,
            max: max_chars,
        });
    }

    Ok(cleaned.to_owned())
}
