// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory journal for tests and non-durable state
//!
//! Clones share the same records, so a test can keep a handle to inject
//! failures or inspect what was written. [`MemoryLog::reopen`] gives a fresh
//! open handle over the same records, standing in for a process restart.

use crate::error::{LogError, LogReadError};
use crate::journal::{CompactionResult, Journal, Records};
use crate::record::Record;
use crate::ticket::Ticket;
use serde_json::value::RawValue;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Default)]
struct Shared {
    records: Vec<Record>,
    next_sequence: u64,
    // Configurable failure mode
    fail_appends: bool,
    failed: bool,
}

/// Journal that keeps records in memory
#[derive(Clone)]
pub struct MemoryLog {
    name: Arc<str>,
    shared: Arc<Mutex<Shared>>,
    closed: Arc<AtomicBool>,
}

impl MemoryLog {
    pub fn new(name: &str) -> Self {
        Self {
            name: Arc::from(name),
            shared: Arc::new(Mutex::new(Shared {
                next_sequence: 1,
                ..Shared::default()
            })),
            closed: Arc::new(AtomicBool::new(false)),
        }
    }

    /// A new open handle over the same records
    pub fn reopen(&self) -> Self {
        let next_sequence = {
            let shared = self.shared();
            shared.records.last().map(|r| r.sequence + 1).unwrap_or(1)
        };
        self.shared().next_sequence = next_sequence;
        Self {
            name: Arc::clone(&self.name),
            shared: Arc::clone(&self.shared),
            closed: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Make every following append fail as if the disk rejected it
    pub fn fail_appends(&self, fail: bool) {
        let mut shared = self.shared();
        shared.fail_appends = fail;
        if !fail {
            shared.failed = false;
        }
    }

    /// Snapshot of the records written so far
    pub fn records(&self) -> Vec<Record> {
        self.shared().records.clone()
    }

    fn shared(&self) -> MutexGuard<'_, Shared> {
        self.shared.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn check_open(&self) -> Result<(), LogError> {
        if self.closed.load(Ordering::SeqCst) {
            Err(LogError::Closed)
        } else {
            Ok(())
        }
    }
}

impl Journal for MemoryLog {
    fn name(&self) -> &str {
        &self.name
    }

    fn append(&self, tag: &str, payload: Box<RawValue>) -> Result<Ticket, LogError> {
        self.check_open()?;
        let mut shared = self.shared();
        if shared.failed {
            return Err(LogError::Failed);
        }

        let sequence = shared.next_sequence;
        shared.next_sequence += 1;

        if shared.fail_appends {
            shared.failed = true;
            let cause = std::io::Error::other("injected write failure");
            return Ok(Ticket::ready(Err(LogError::WriteFailed(Arc::new(cause)))));
        }

        shared.records.push(Record::new(sequence, tag, payload));
        Ok(Ticket::ready(Ok(sequence)))
    }

    fn barrier(&self) -> Result<Ticket, LogError> {
        self.check_open()?;
        let shared = self.shared();
        if shared.failed {
            return Ok(Ticket::ready(Err(LogError::Failed)));
        }
        Ok(Ticket::ready(Ok(shared.next_sequence - 1)))
    }

    fn current_sequence(&self) -> u64 {
        self.shared().next_sequence - 1
    }

    fn newest(&self) -> Result<Option<Record>, LogError> {
        self.check_open()?;
        Ok(self.shared().records.last().cloned())
    }

    fn read_from(&self, sequence: u64) -> Result<Records, LogError> {
        self.check_open()?;
        let records: Vec<Result<Record, LogReadError>> = self
            .shared()
            .records
            .iter()
            .filter(|r| r.sequence >= sequence)
            .cloned()
            .map(Ok)
            .collect();
        Ok(Box::new(records.into_iter()))
    }

    fn advance_to(&self, sequence: u64) -> Result<(), LogError> {
        self.check_open()?;
        let mut shared = self.shared();
        shared.next_sequence = shared.next_sequence.max(sequence + 1);
        Ok(())
    }

    fn compact_before(&self, sequence: u64) -> Result<CompactionResult, LogError> {
        self.check_open()?;
        let mut shared = self.shared();
        let before = shared.records.len();
        shared.records.retain(|r| r.sequence >= sequence);
        Ok(CompactionResult {
            entries_removed: before - shared.records.len(),
            entries_kept: shared.records.len(),
            bytes_reclaimed: 0,
        })
    }

    fn close(&self) -> Result<(), LogError> {
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
