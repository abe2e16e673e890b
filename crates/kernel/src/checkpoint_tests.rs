// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::codec::{decode, encode, Payload};
use serde::de::IgnoredAny;

#[test]
fn new_record_uses_current_version() {
    let record = CheckpointRecord::new(12, vec![1, 2, 3]);
    assert_eq!(record.version, CheckpointRecord::<()>::CURRENT_VERSION);
    assert!(record.is_current_version());
    assert_eq!(record.cutoff, 12);
}

#[test]
fn raw_snapshot_decodes_as_typed_state() {
    // The orchestrator writes the snapshot pre-encoded and reads it back typed.
    let snapshot: Payload = encode(&vec!["a", "b"]).unwrap();
    let payload = encode(&CheckpointRecord::new(3, snapshot)).unwrap();

    let record: CheckpointRecord<Vec<String>> = decode(payload.get()).unwrap();

    assert_eq!(record.cutoff, 3);
    assert_eq!(record.state, vec!["a", "b"]);
}

#[test]
fn header_decodes_without_knowing_state_type() {
    let payload = encode(&CheckpointRecord::new(9, serde_json::json!({"deep": [1, 2]}))).unwrap();

    let header: CheckpointRecord<IgnoredAny> = decode(payload.get()).unwrap();

    assert_eq!(header.cutoff, 9);
}

#[test]
fn foreign_version_is_detected() {
    let mut record = CheckpointRecord::new(1, ());
    record.version = 99;
    assert!(!record.is_current_version());
}
