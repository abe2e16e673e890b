//! `acidctl dump` specs

use crate::prelude::*;

#[test]
fn dump_prints_one_json_line_per_record() {
    let store = Store::with_events(3);

    let run = store.acidctl().args(&["dump"]).passes();

    let lines: Vec<serde_json::Value> = run
        .stdout()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0]["sequence"], 1);
    assert_eq!(lines[0]["tag"], "add");
    assert_eq!(lines[0]["payload"], 1);
}

#[test]
fn dump_from_sequence() {
    let store = Store::with_events(5);

    let run = store.acidctl().args(&["dump", "--from", "5"]).passes();

    assert_eq!(run.stdout().lines().count(), 1);
    assert!(run.stdout().contains(r#""sequence":5"#));
}

#[test]
fn dump_checkpoints_log() {
    let store = Store::with_events(1);
    store.checkpoint(1);

    store
        .acidctl()
        .args(&["dump", "--log", "checkpoints"])
        .passes()
        .stdout_has(r#""tag":"checkpoint""#)
        .stdout_has(r#""cutoff":1"#);
}

#[test]
fn dump_empty_log_prints_nothing() {
    let store = Store::empty();
    store.acidctl().args(&["dump"]).passes().stdout_eq("");
}
