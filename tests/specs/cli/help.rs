//! Help and version specs

use crate::prelude::*;

#[test]
fn help_lists_every_command() {
    let store = Store::empty();
    let run = store.acidctl().args(&["--help"]).bare().passes();
    for command in ["inspect", "dump", "verify", "repair"] {
        assert!(run.stdout().contains(command), "missing {}", command);
    }
}

#[test]
fn version_is_printed() {
    let store = Store::empty();
    store
        .acidctl()
        .args(&["--version"])
        .bare()
        .passes()
        .stdout_has("acidctl");
}

#[test]
fn dump_help_documents_log_choice() {
    let store = Store::empty();
    store
        .acidctl()
        .args(&["dump", "--help"])
        .bare()
        .passes()
        .stdout_has("events")
        .stdout_has("checkpoints");
}
