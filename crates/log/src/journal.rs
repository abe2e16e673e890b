// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Journal trait: the durable log interface consumed by the orchestrator

use crate::error::{LogError, LogReadError};
use crate::record::Record;
use crate::ticket::Ticket;
use serde_json::value::RawValue;

/// Lazy, ascending sequence of records
pub type Records = Box<dyn Iterator<Item = Result<Record, LogReadError>> + Send>;

/// Result of a compaction operation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompactionResult {
    /// Number of records removed
    pub entries_removed: usize,
    /// Number of records kept
    pub entries_kept: usize,
    /// Bytes reclaimed from disk
    pub bytes_reclaimed: u64,
}

/// An ordered, append-only sequence of tagged records
pub trait Journal: Send + Sync {
    /// Name of the log (e.g. "events")
    fn name(&self) -> &str;

    /// Enqueue a record; the ticket resolves once it is durable.
    ///
    /// Records are made durable in the order they are enqueued.
    fn append(&self, tag: &str, payload: Box<RawValue>) -> Result<Ticket, LogError>;

    /// A ticket that resolves once every record enqueued so far is durable
    fn barrier(&self) -> Result<Ticket, LogError>;

    /// Sequence number of the last enqueued record, 0 when empty
    fn current_sequence(&self) -> u64;

    /// Newest record written to the log, if any.
    ///
    /// On a live log this may be a record whose ticket has not resolved yet;
    /// it is durable only once that ticket has.
    fn newest(&self) -> Result<Option<Record>, LogError>;

    /// Records with sequence numbers at or after `sequence`, ascending
    fn read_from(&self, sequence: u64) -> Result<Records, LogError>;

    /// Continue numbering after `sequence` even if the log holds less
    fn advance_to(&self, sequence: u64) -> Result<(), LogError>;

    /// Drop records before `sequence`
    fn compact_before(&self, sequence: u64) -> Result<CompactionResult, LogError>;

    /// Flush outstanding writes and release the log.
    ///
    /// Every later call fails with [`LogError::Closed`].
    fn close(&self) -> Result<(), LogError>;
}
