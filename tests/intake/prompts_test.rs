//! Exit-intent detection tests.

use talentscout::intake::prompts::{is_exit_intent, EXIT_PHRASES, SYSTEM_INSTRUCTION};

#[test]
fn detects_phrases_regardless_of_case_and_padding() {
    assert!(is_exit_intent("bye"));
    assert!(is_exit_intent("  Bye \n"));
    assert!(is_exit_intent("GOODBYE"));
    assert!(is_exit_intent("That's all"));
}

#[test]
fn every_listed_phrase_is_an_exit() {
    for phrase in EXIT_PHRASES {
        assert!(is_exit_intent(phrase), "{phrase}");
    }
}

#[test]
fn phrase_must_be_the_whole_message() {
    assert!(!is_exit_intent("goodbye, see you"));
    assert!(!is_exit_intent("I'm done with Java, now Rust"));
    assert!(!is_exit_intent("weekend"));
}

#[test]
fn system_instruction_asks_for_every_metadata_key() {
    for key in [
        "name",
        "contact",
        "location",
        "experience",
        "position",
        "tech_stack",
        "questions",
    ] {
        assert!(
            SYSTEM_INSTRUCTION.contains(&format!("\"{key}\": false")),
            "{key}"
        );
    }
    assert!(SYSTEM_INSTRUCTION.contains("METADATA:"));
}
