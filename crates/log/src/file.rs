// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! File-backed journal with a background group-commit writer
//!
//! Appends are assigned their sequence number and handed to a dedicated
//! writer thread under one lock, so sequence order, channel order, and file
//! order always agree. The writer drains every pending command, writes the
//! batch, and issues a single fsync before resolving the batch's tickets.

use crate::error::LogError;
use crate::journal::{CompactionResult, Journal, Records};
use crate::reader::LogReader;
use crate::record::Record;
use crate::ticket::{Completion, Ticket};
use crate::writer::LogWriter;
use serde::Deserialize;
use serde_json::value::RawValue;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Name of the log holding update records
pub const EVENTS_LOG: &str = "events";
/// Name of the log holding checkpoint records
pub const CHECKPOINTS_LOG: &str = "checkpoints";
/// Lock file guarding a state directory against a second opener
pub const LOCK_FILE: &str = "open.lock";

/// Options for a file-backed log
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FileLogOptions {
    /// How long the writer waits for more appends before syncing a batch
    #[serde(default, with = "humantime_serde")]
    pub group_commit_window: Duration,
}

enum Command {
    Append {
        record: Record,
        done: Completion,
    },
    Barrier {
        sequence: u64,
        done: Completion,
    },
    Compact {
        keep_from: u64,
        done: Sender<Result<CompactionResult, LogError>>,
    },
    Advance {
        sequence: u64,
    },
}

struct Tail {
    next_sequence: u64,
    /// None once the log is closed
    tx: Option<Sender<Command>>,
}

/// Durable log stored as `<dir>/<name>.jsonl`
pub struct FileLog {
    name: String,
    path: PathBuf,
    tail: Mutex<Tail>,
    worker: Mutex<Option<JoinHandle<()>>>,
    failed: Arc<AtomicBool>,
}

impl FileLog {
    /// Open or create the log `name` inside `dir`
    pub fn open(dir: &Path, name: &str, options: FileLogOptions) -> Result<Self, LogError> {
        let path = Self::path_in(dir, name);
        let writer = LogWriter::open(&path)?;
        let next_sequence = writer.sequence();

        let (tx, rx) = mpsc::channel();
        let failed = Arc::new(AtomicBool::new(false));
        let worker = {
            let failed = Arc::clone(&failed);
            let window = options.group_commit_window;
            thread::Builder::new()
                .name(format!("acid-log-{}", name))
                .spawn(move || run_writer(writer, rx, window, failed))?
        };

        tracing::debug!(
            log = name,
            path = %path.display(),
            next_sequence,
            "log opened"
        );

        Ok(Self {
            name: name.to_string(),
            path,
            tail: Mutex::new(Tail {
                next_sequence,
                tx: Some(tx),
            }),
            worker: Mutex::new(Some(worker)),
            failed,
        })
    }

    /// Path of the log `name` inside `dir`
    pub fn path_in(dir: &Path, name: &str) -> PathBuf {
        dir.join(format!("{}.jsonl", name))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether a write has failed; a failed log accepts no further writes
    pub fn has_failed(&self) -> bool {
        self.failed.load(Ordering::SeqCst)
    }

    fn tail(&self) -> std::sync::MutexGuard<'_, Tail> {
        self.tail.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn send(tail: &Tail, command: Command) -> Result<(), LogError> {
        let tx = tail.tx.as_ref().ok_or(LogError::Closed)?;
        tx.send(command).map_err(|_| LogError::WriterGone)
    }
}

impl Journal for FileLog {
    fn name(&self) -> &str {
        &self.name
    }

    fn append(&self, tag: &str, payload: Box<RawValue>) -> Result<Ticket, LogError> {
        if self.has_failed() {
            return Err(LogError::Failed);
        }

        let mut tail = self.tail();
        let sequence = tail.next_sequence;
        let record = Record::new(sequence, tag, payload);
        let (done, ticket) = Ticket::channel();
        Self::send(&tail, Command::Append { record, done })?;
        tail.next_sequence += 1;

        tracing::trace!(log = %self.name, sequence, tag, "record enqueued");
        Ok(ticket)
    }

    fn barrier(&self) -> Result<Ticket, LogError> {
        let tail = self.tail();
        let (done, ticket) = Ticket::channel();
        Self::send(
            &tail,
            Command::Barrier {
                sequence: tail.next_sequence - 1,
                done,
            },
        )?;
        Ok(ticket)
    }

    fn current_sequence(&self) -> u64 {
        self.tail().next_sequence - 1
    }

    fn newest(&self) -> Result<Option<Record>, LogError> {
        if self.tail().tx.is_none() {
            return Err(LogError::Closed);
        }
        Ok(LogReader::open_or_empty(&self.path).newest()?)
    }

    fn read_from(&self, sequence: u64) -> Result<Records, LogError> {
        if self.tail().tx.is_none() {
            return Err(LogError::Closed);
        }
        let iter = LogReader::open_or_empty(&self.path).records_from(sequence)?;
        Ok(Box::new(iter))
    }

    fn advance_to(&self, sequence: u64) -> Result<(), LogError> {
        let mut tail = self.tail();
        Self::send(&tail, Command::Advance { sequence })?;
        tail.next_sequence = tail.next_sequence.max(sequence + 1);
        Ok(())
    }

    fn compact_before(&self, sequence: u64) -> Result<CompactionResult, LogError> {
        // A plain channel, so compaction may be requested from async code too.
        let (done, rx) = mpsc::channel();
        Self::send(
            &self.tail(),
            Command::Compact {
                keep_from: sequence,
                done,
            },
        )?;
        rx.recv().unwrap_or(Err(LogError::WriterGone))
    }

    fn close(&self) -> Result<(), LogError> {
        // Dropping the sender lets the writer drain its queue and exit.
        let tx = self.tail().tx.take();
        if tx.is_none() {
            return Ok(());
        }
        drop(tx);

        let worker = self.worker.lock().unwrap_or_else(|e| e.into_inner()).take();
        if let Some(worker) = worker {
            worker.join().map_err(|_| LogError::WriterGone)?;
        }
        tracing::debug!(log = %self.name, "log closed");
        Ok(())
    }
}

impl Drop for FileLog {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            tracing::warn!(log = %self.name, error = %e, "failed to close log");
        }
    }
}

fn run_writer(
    mut writer: LogWriter,
    rx: Receiver<Command>,
    window: Duration,
    failed: Arc<AtomicBool>,
) {
    while let Ok(first) = rx.recv() {
        let mut batch = vec![first];
        if !window.is_zero() {
            let deadline = Instant::now() + window;
            loop {
                let remaining = deadline.saturating_duration_since(Instant::now());
                match rx.recv_timeout(remaining) {
                    Ok(command) => batch.push(command),
                    Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => {
                        break
                    }
                }
            }
        }
        batch.extend(rx.try_iter());
        write_batch(&mut writer, batch, &failed);
    }
}

/// Write a batch of commands, resolving tickets only after the batch is synced
fn write_batch(writer: &mut LogWriter, batch: Vec<Command>, failed: &AtomicBool) {
    let mut pending: Vec<(u64, Completion)> = Vec::new();
    let mut dirty = false;

    for command in batch {
        if failed.load(Ordering::SeqCst) {
            reject(command);
            continue;
        }

        match command {
            Command::Append { record, done } => {
                let sequence = record.sequence;
                match writer.write_record(&record) {
                    Ok(()) => {
                        dirty = true;
                        pending.push((sequence, done));
                    }
                    Err(e) => {
                        pending.push((sequence, done));
                        fail(writer, e, &mut pending, failed);
                    }
                }
            }
            Command::Barrier { sequence, done } => pending.push((sequence, done)),
            Command::Advance { sequence } => writer.advance_to(sequence),
            Command::Compact { keep_from, done } => {
                if !flush(writer, &mut dirty, &mut pending, failed) {
                    let _ = done.send(Err(LogError::Failed));
                    continue;
                }
                let result = writer.compact(keep_from);
                if let Ok(r) = &result {
                    tracing::info!(
                        path = %writer.path().display(),
                        entries_removed = r.entries_removed,
                        entries_kept = r.entries_kept,
                        bytes_reclaimed = r.bytes_reclaimed,
                        "log compacted"
                    );
                }
                let _ = done.send(result);
            }
        }
    }

    if !failed.load(Ordering::SeqCst) {
        flush(writer, &mut dirty, &mut pending, failed);
    }
}

/// Sync outstanding writes and resolve pending tickets; false if the sync failed
fn flush(
    writer: &mut LogWriter,
    dirty: &mut bool,
    pending: &mut Vec<(u64, Completion)>,
    failed: &AtomicBool,
) -> bool {
    if *dirty {
        if let Err(e) = writer.sync() {
            fail(writer, e, pending, failed);
            return false;
        }
        *dirty = false;
    }
    for (sequence, done) in pending.drain(..) {
        let _ = done.send(Ok(sequence));
    }
    true
}

/// Mark the log failed and fail every unconfirmed ticket with the cause
fn fail(
    writer: &LogWriter,
    error: LogError,
    pending: &mut Vec<(u64, Completion)>,
    failed: &AtomicBool,
) {
    failed.store(true, Ordering::SeqCst);
    tracing::error!(
        path = %writer.path().display(),
        error = %error,
        unconfirmed = pending.len(),
        "log write failed"
    );
    let cause = match error {
        LogError::Io(e) => Arc::new(e),
        other => Arc::new(std::io::Error::other(other.to_string())),
    };
    for (_, done) in pending.drain(..) {
        let _ = done.send(Err(LogError::WriteFailed(Arc::clone(&cause))));
    }
}

fn reject(command: Command) {
    match command {
        Command::Append { done, .. } | Command::Barrier { done, .. } => {
            let _ = done.send(Err(LogError::Failed));
        }
        Command::Compact { done, .. } => {
            let _ = done.send(Err(LogError::Failed));
        }
        Command::Advance { .. } => {}
    }
}

#[cfg(test)]
#[path = "file_tests.rs"]
mod tests;
