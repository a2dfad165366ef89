//! Milestone progress tests.

use serde_json::{json, Map, Value};
use talentscout::intake::{Milestone, ProgressMap};

fn metadata(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected an object, got {other}"),
    }
}

#[test]
fn starts_with_every_milestone_pending() {
    let progress = ProgressMap::new();
    assert_eq!(progress.iter().count(), 7);
    assert_eq!(progress.completed(), 0);
}

#[test]
fn merge_sets_only_reported_keys() {
    let mut progress = ProgressMap::new();
    let changed = progress.merge(&metadata(json!({"tech_stack": true})));

    assert_eq!(changed, vec![Milestone::TechStack]);
    for milestone in Milestone::ALL {
        assert_eq!(
            progress.is_done(milestone),
            milestone == Milestone::TechStack,
            "{milestone}"
        );
    }
}

#[test]
fn unknown_keys_and_non_boolean_values_are_ignored() {
    let mut progress = ProgressMap::new();
    let changed = progress.merge(&metadata(json!({
        "salary": true,
        "name": "yes",
        "contact": 1,
        "location": true
    })));

    assert_eq!(changed, vec![Milestone::Location]);
    assert!(!progress.is_done(Milestone::Name));
    assert!(!progress.is_done(Milestone::Contact));
    assert_eq!(progress.completed(), 1);
}

#[test]
fn later_reports_can_regress_a_milestone() {
    let mut progress = ProgressMap::new();
    progress.merge(&metadata(json!({"name": true, "contact": true})));
    let changed = progress.merge(&metadata(json!({"name": false, "contact": true})));

    assert_eq!(changed, vec![Milestone::Name]);
    assert!(!progress.is_done(Milestone::Name));
    assert!(progress.is_done(Milestone::Contact));
}
