//! `acidctl inspect` specs

use crate::prelude::*;

#[test]
fn inspect_summarizes_logs() {
    let store = Store::with_events(4);
    store.checkpoint(3);

    store
        .acidctl()
        .args(&["inspect"])
        .passes()
        .stdout_has("4 records, sequences 1..4")
        .stdout_has("checkpoint   #1 cutoff 3")
        .stdout_has("replay       1 events");
}

#[test]
fn inspect_empty_store() {
    let store = Store::empty();

    store
        .acidctl()
        .args(&["inspect"])
        .passes()
        .stdout_has("events       empty")
        .stdout_has("checkpoint   none")
        .stdout_has("replay       0 events");
}

#[test]
fn inspect_json_output() {
    let store = Store::with_events(2);

    let run = store
        .acidctl()
        .args(&["inspect", "--format", "json"])
        .passes();

    let json: serde_json::Value = serde_json::from_str(&run.stdout()).unwrap();
    assert_eq!(json["logs"][0]["log"], "events");
    assert_eq!(json["logs"][0]["records"], 2);
    assert!(json["checkpoint"].is_null());
}
