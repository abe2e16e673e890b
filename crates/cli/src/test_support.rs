// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Builders for state directories used by command tests

use crate::store::StoreDir;
use acid_kernel::CheckpointRecord;
use acid_log::{FileLog, FileLogOptions, Journal, CHECKPOINTS_LOG, EVENTS_LOG};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use tempfile::TempDir;

/// A state directory with `events` update records and, optionally, one
/// checkpoint covering the first `cutoff` of them
pub fn store_with(events: u64, cutoff: Option<u64>) -> (TempDir, StoreDir) {
    let dir = TempDir::new().unwrap();

    let log = FileLog::open(dir.path(), EVENTS_LOG, FileLogOptions::default()).unwrap();
    for n in 1..=events {
        let payload = acid_kernel::encode(&n).unwrap();
        log.append("add", payload).unwrap().wait().unwrap();
    }
    log.close().unwrap();

    let log = FileLog::open(dir.path(), CHECKPOINTS_LOG, FileLogOptions::default()).unwrap();
    if let Some(cutoff) = cutoff {
        let state = serde_json::json!({ "value": cutoff });
        let payload = acid_kernel::encode(&CheckpointRecord::new(cutoff, state)).unwrap();
        log.append(CheckpointRecord::<()>::TAG, payload)
            .unwrap()
            .wait()
            .unwrap();
    }
    log.close().unwrap();

    let store = StoreDir::open(dir.path()).unwrap();
    (dir, store)
}

pub fn append_raw(path: &Path, text: &str) {
    let mut file = OpenOptions::new().append(true).open(path).unwrap();
    file.write_all(text.as_bytes()).unwrap();
}
