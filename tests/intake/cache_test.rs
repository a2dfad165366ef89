//! Response cache tests.

use talentscout::intake::cache::{context_key, ResponseCache};
use talentscout::providers::Message;

fn conversation(prefix: &str, len: usize) -> Vec<Message> {
    (0..len)
        .map(|i| {
            if i % 2 == 0 {
                Message::user(format!("{prefix} question {i}"))
            } else {
                Message::assistant(format!("answer {i}"))
            }
        })
        .collect()
}

#[test]
fn evicts_first_inserted_when_full() {
    let mut cache = ResponseCache::new(50, 5);
    for i in 0..51 {
        cache.put(format!("key-{i}"), format!("reply-{i}"));
    }

    assert_eq!(cache.len(), 50);
    assert_eq!(cache.get("key-0"), None);
    assert_eq!(cache.get("key-1"), Some("reply-1"));
    assert_eq!(cache.get("key-50"), Some("reply-50"));
}

#[test]
fn overwriting_keeps_insertion_position() {
    let mut cache = ResponseCache::new(2, 5);
    cache.put("a".to_owned(), "1".to_owned());
    cache.put("b".to_owned(), "2".to_owned());
    cache.put("a".to_owned(), "updated".to_owned());
    cache.put("c".to_owned(), "3".to_owned());

    assert_eq!(cache.len(), 2);
    assert_eq!(cache.get("a"), None);
    assert_eq!(cache.get("b"), Some("2"));
    assert_eq!(cache.get("c"), Some("3"));
}

#[test]
fn key_depends_only_on_recent_tail() {
    let mut first = vec![Message::system("seed"), Message::user("I am Alex")];
    let mut second = vec![Message::system("seed"), Message::user("I am Jordan")];
    let shared = conversation("shared", 5);
    first.extend(shared.clone());
    second.extend(shared);

    assert_eq!(context_key(&first, 5), context_key(&second, 5));
    assert_ne!(context_key(&first, 6), context_key(&second, 6));
}

#[test]
fn short_history_is_keyed_whole() {
    let history = conversation("short", 3);
    assert_eq!(context_key(&history, 5), context_key(&history, 3));
    assert_ne!(
        context_key(&history, 5),
        context_key(&history[1..], 5),
        "dropping a message must change the key"
    );
}

#[test]
fn key_is_stable_hex_digest() {
    let history = conversation("stable", 4);
    let key = context_key(&history, 5);
    assert_eq!(key, context_key(&history, 5));
    assert_eq!(key.len(), 64);
    assert!(key.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn zero_bounds_are_clamped() {
    let cache = ResponseCache::new(0, 0);
    assert_eq!(cache.capacity(), 1);
    assert_eq!(cache.context_messages(), 1);
}
