// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::test_support::{append_raw, store_with};

#[test]
fn summarizes_both_logs_and_checkpoint() {
    let (_dir, store) = store_with(5, Some(3));

    let inspection = inspect(&store).unwrap();

    let events = &inspection.logs[0];
    assert_eq!(events.log, "events");
    assert_eq!(events.records, 5);
    assert_eq!(events.first_sequence, Some(1));
    assert_eq!(events.last_sequence, Some(5));
    assert!(events.corruption.is_none());

    let checkpoint = inspection.checkpoint.unwrap();
    assert_eq!(checkpoint.sequence, 1);
    assert_eq!(checkpoint.cutoff, 3);
    assert_eq!(inspection.replay_events, 2);
}

#[test]
fn empty_store_has_no_checkpoint_and_replays_nothing() {
    let (_dir, store) = store_with(0, None);

    let inspection = inspect(&store).unwrap();

    assert!(inspection.checkpoint.is_none());
    assert_eq!(inspection.replay_events, 0);
    let text = inspection.to_string();
    assert!(text.contains("events       empty"));
    assert!(text.contains("checkpoint   none"));
}

#[test]
fn missing_log_is_reported() {
    let (dir, store) = store_with(2, None);
    std::fs::remove_file(dir.path().join("checkpoints.jsonl")).unwrap();

    let inspection = inspect(&store).unwrap();

    assert!(!inspection.logs[1].present);
    assert!(inspection.to_string().contains("checkpoints  missing"));
}

#[test]
fn corruption_is_shown_with_line() {
    let (dir, store) = store_with(2, None);
    append_raw(&dir.path().join("events.jsonl"), "garbage\n");

    let inspection = inspect(&store).unwrap();

    let corruption = inspection.logs[0].corruption.as_deref().unwrap();
    assert!(corruption.starts_with("line 3:"), "got {}", corruption);
    assert_eq!(inspection.logs[0].records, 2);
}

#[test]
fn json_output_serializes_summary() {
    let (_dir, store) = store_with(1, Some(1));

    let inspection = inspect(&store).unwrap();
    let json = serde_json::to_value(&inspection).unwrap();

    assert_eq!(json["logs"][0]["records"], 1);
    assert_eq!(json["checkpoint"]["cutoff"], 1);
}
