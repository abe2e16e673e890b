//! Error reporting specs

use crate::prelude::*;

#[test]
fn missing_directory_is_reported() {
    let store = Store::empty();
    let missing = store.path().join("absent");
    store
        .acidctl()
        .args(&["inspect", missing.to_str().unwrap()])
        .bare()
        .fails()
        .stderr_has("state directory not found");
}

#[test]
fn unknown_command_fails() {
    let store = Store::empty();
    store
        .acidctl()
        .args(&["explode"])
        .fails()
        .stderr_has("unrecognized subcommand");
}

#[test]
fn unknown_log_name_is_rejected() {
    let store = Store::empty();
    store
        .acidctl()
        .args(&["dump", "--log", "audit"])
        .fails()
        .stderr_has("invalid value");
}
