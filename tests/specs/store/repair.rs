//! `acidctl repair` specs

use crate::prelude::*;

#[test]
fn repair_reports_bytes_removed() {
    let store = Store::with_events(2);
    store.append_raw("events", "garbage\n");
    store.append_raw("events", "junk\n");

    store
        .acidctl()
        .args(&["repair"])
        .passes()
        .stdout_has("events: removed 13 bytes")
        .stdout_has("checkpoints: removed 0 bytes");

    store.acidctl().args(&["verify"]).passes();
}

#[test]
fn repair_on_clean_store_changes_nothing() {
    let store = Store::with_events(2);
    let before = std::fs::read(store.log("events")).unwrap();

    store
        .acidctl()
        .args(&["repair"])
        .passes()
        .stdout_has("events: removed 0 bytes");

    assert_eq!(std::fs::read(store.log("events")).unwrap(), before);
}
