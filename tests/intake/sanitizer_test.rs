//! PII masking tests.

use talentscout::intake::sanitizer::{mask_pii, sanitize_history, EMAIL_MARKER, PHONE_MARKER};
use talentscout::providers::Message;

#[test]
fn masks_email_addresses() {
    assert_eq!(
        mask_pii("You can reach me at jane.doe@example.com today"),
        "You can reach me at [EMAIL] today"
    );
}

#[test]
fn masks_every_occurrence() {
    let masked = mask_pii("a@b.io, c.d@e-f.org and 5551234567 or 07700900123");
    assert_eq!(masked.matches(EMAIL_MARKER).count(), 2);
    assert_eq!(masked.matches(PHONE_MARKER).count(), 2);
    assert!(!masked.contains('@'));
}

#[test]
fn long_digit_run_becomes_a_single_marker() {
    assert_eq!(mask_pii("call 5551234567"), "call [PHONE]");
    assert_eq!(mask_pii("call 5551234567890123"), "call [PHONE]");
}

#[test]
fn digit_run_glued_to_letters_is_masked() {
    assert_eq!(mask_pii("id A1234567890B"), "id A[PHONE]B");
}

#[test]
fn digits_inside_an_email_collapse_into_the_email_marker() {
    assert_eq!(mask_pii("x1234567890@mail.com"), "[EMAIL]");
    assert_eq!(mask_pii("x1234567890@mail.com").matches(PHONE_MARKER).count(), 0);
}

#[test]
fn short_digit_runs_are_untouched() {
    assert_eq!(mask_pii("5 years, 123456789"), "5 years, 123456789");
    assert_eq!(mask_pii("+1 555 123 4567"), "+1 555 123 4567");
}

#[test]
fn masking_is_idempotent() {
    for text in [
        "mail me: x@y.com or 1234567890",
        "id A1234567890B",
        "x1234567890@mail.com",
    ] {
        let once = mask_pii(text);
        assert_eq!(mask_pii(&once), once, "{text}");
    }
}

#[test]
fn text_without_pii_is_unchanged() {
    let text = "I work with Rust, Go and PostgreSQL in Berlin.";
    assert_eq!(mask_pii(text), text);
}

#[test]
fn history_copy_masks_only_candidate_messages() {
    let history = vec![
        Message::system("Contact hr@talentscout.example for help"),
        Message::user("I'm sam@example.com, phone 4155550100"),
        Message::assistant("Thanks, I noted sam@example.com"),
    ];

    let sanitized = sanitize_history(&history);

    assert_eq!(sanitized.len(), 3);
    assert_eq!(sanitized[0], history[0]);
    assert_eq!(sanitized[1].content, "I'm [EMAIL], phone [PHONE]");
    assert_eq!(sanitized[2], history[2]);
    // The stored history keeps the raw text.
    assert_eq!(history[1].content, "I'm sam@example.com, phone 4155550100");
}
