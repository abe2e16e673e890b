//! `acidctl verify` specs

use crate::prelude::*;

#[test]
fn verify_passes_on_clean_store() {
    let store = Store::with_events(3);
    store.checkpoint(3);

    store
        .acidctl()
        .args(&["verify"])
        .passes()
        .stdout_eq("events: ok, 3 records\ncheckpoints: ok, 1 records\n");
}

#[test]
fn verify_fails_naming_corrupt_line() {
    let store = Store::with_events(2);
    store.append_raw("events", "garbage\n");
    store.append_raw("events", "more garbage\n");

    store
        .acidctl()
        .args(&["verify"])
        .fails()
        .code(1)
        .stdout_has("events: corrupted at line 3")
        .stdout_has("acidctl repair");
}

#[test]
fn verify_flags_torn_tail() {
    let store = Store::with_events(2);
    store.append_raw("checkpoints", r#"{"sequence":1,"#);

    store
        .acidctl()
        .args(&["verify"])
        .fails()
        .code(1)
        .stdout_has("checkpoints: corrupted at line 1")
        .stdout_has("torn final record");
}
