// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The `AcidState` handle: commit, checkpoint and recovery protocols

use crate::config::AcidConfig;
use crate::error::{AcidError, RecoveryError};
use crate::pending::{durability_failure, Pending};
use crate::recovery;
use acid_kernel::{
    codec, Acidic, CheckpointRecord, EventKind, Guarded, Payload, Query, Registry, Update,
};
use acid_log::{CompactionResult, FileLog, FileLogOptions, Journal, LogError, MemoryLog, Ticket};
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

pub use acid_log::{CHECKPOINTS_LOG, EVENTS_LOG, LOCK_FILE};

/// Records dropped by [`AcidState::compact`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Compaction {
    pub events: CompactionResult,
    pub checkpoints: CompactionResult,
}

/// Newest checkpoint whose record is known to be durable
#[derive(Debug, Clone, Copy)]
struct DurableCheckpoint {
    /// Sequence of the record in the checkpoints log
    sequence: u64,
    cutoff: u64,
}

/// A state value with ACID updates, backed by an events log and a
/// checkpoints log.
///
/// Updates run one at a time against the in-memory state and are released
/// to the caller only once their record is durable. Queries run
/// concurrently and never touch the logs. After [`close`](Self::close)
/// every operation fails with [`AcidError::Closed`].
pub struct AcidState<S: Acidic> {
    container: Guarded<S>,
    registry: Registry<S>,
    events: Box<dyn Journal>,
    checkpoints: Box<dyn Journal>,
    config: AcidConfig,
    directory: Option<PathBuf>,
    // NOTE(lifetime): Held to keep the directory locked; released on close
    lock_file: Mutex<Option<File>>,
    broken: Arc<AtomicBool>,
    closed: AtomicBool,
    updates_since_checkpoint: AtomicU64,
    // Held across a whole checkpoint or compaction, so checkpoint records
    // land in cutoff order and compaction trusts only a confirmed one.
    checkpointing: tokio::sync::Mutex<Option<DurableCheckpoint>>,
}

impl<S: Acidic> AcidState<S> {
    /// Open the store in `dir`, creating it if needed
    pub fn open(initial: S, dir: impl AsRef<Path>) -> Result<Self, AcidError> {
        Self::open_with(initial, dir, AcidConfig::default())
    }

    /// Open the store in `<root>/<S::name()>` under the default root
    pub fn open_default(initial: S) -> Result<Self, AcidError> {
        let config = AcidConfig::default();
        let dir = config.directory_for(&S::name());
        Self::open_with(initial, dir, config)
    }

    pub fn open_with(initial: S, dir: impl AsRef<Path>, config: AcidConfig) -> Result<Self, AcidError> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;

        // Lock first, so a second opener never reads a log being written.
        let lock_file = lock_directory(dir)?;

        let options = FileLogOptions {
            group_commit_window: config.group_commit_window,
        };
        let checkpoints = open_log(dir, CHECKPOINTS_LOG, &options)?;
        let events = open_log(dir, EVENTS_LOG, &options)?;

        let mut acid =
            Self::open_with_journals(initial, Box::new(events), Box::new(checkpoints), config)?;
        acid.directory = Some(dir.to_path_buf());
        acid.lock_file = Mutex::new(Some(lock_file));
        Ok(acid)
    }

    /// Open a store whose logs live only in memory
    pub fn open_memory(initial: S) -> Result<Self, AcidError> {
        Self::open_with_journals(
            initial,
            Box::new(MemoryLog::new(EVENTS_LOG)),
            Box::new(MemoryLog::new(CHECKPOINTS_LOG)),
            AcidConfig::default(),
        )
    }

    /// Open over already-opened logs, recovering state from them
    pub fn open_with_journals(
        initial: S,
        events: Box<dyn Journal>,
        checkpoints: Box<dyn Journal>,
        config: AcidConfig,
    ) -> Result<Self, AcidError> {
        let registry = Registry::build(S::events())?;
        let recovered =
            recovery::recover(initial, &registry, events.as_ref(), checkpoints.as_ref())?;

        info!(
            state = %S::name(),
            cutoff = recovered.cutoff,
            replayed = recovered.replayed,
            sequence = events.current_sequence(),
            "state recovered"
        );

        Ok(Self {
            container: Guarded::new(recovered.state),
            registry,
            events,
            checkpoints,
            config,
            directory: None,
            lock_file: Mutex::new(None),
            broken: Arc::new(AtomicBool::new(false)),
            closed: AtomicBool::new(false),
            updates_since_checkpoint: AtomicU64::new(recovered.replayed),
            checkpointing: tokio::sync::Mutex::new(recovered.checkpoint.map(|sequence| {
                DurableCheckpoint {
                    sequence,
                    cutoff: recovered.cutoff,
                }
            })),
        })
    }

    /// Apply an update and wait until it is durable
    pub fn update<M: Update<S>>(&self, op: M) -> Result<M::Output, AcidError> {
        let output = self.schedule_update(op)?.wait()?;
        if let Err(e) = self.maybe_checkpoint() {
            warn!(error = %e, "automatic checkpoint failed");
        }
        Ok(output)
    }

    /// Apply an update and wait asynchronously until it is durable
    pub async fn update_async<M: Update<S>>(&self, op: M) -> Result<M::Output, AcidError> {
        let output = self.schedule_update(op)?.durable().await?;
        if self.checkpoint_due() {
            if let Err(e) = self.create_checkpoint_async().await {
                warn!(error = %e, "automatic checkpoint failed");
            }
        }
        Ok(output)
    }

    /// Apply an update and enqueue its record without waiting for it.
    ///
    /// The mutation and the enqueue happen inside one exclusive region, so
    /// the order of records in the events log is the order in which updates
    /// were applied.
    pub fn schedule_update<M: Update<S>>(&self, op: M) -> Result<Pending<M::Output>, AcidError> {
        self.check_writable()?;
        self.registry.expect::<M>(EventKind::Update)?;
        let payload = codec::encode(&op)?;

        let (output, appended) = self.container.run_exclusive(|state| {
            let output = op.update(state);
            (output, self.events.append(M::TAG, payload))
        })?;
        let ticket = appended.map_err(|e| durability_failure(&self.broken, e))?;

        self.updates_since_checkpoint.fetch_add(1, Ordering::SeqCst);
        debug!(tag = M::TAG, "update applied");
        Ok(Pending::new(output, ticket, Arc::clone(&self.broken)))
    }

    /// Run a query against a consistent view of the state
    pub fn query<M: Query<S>>(&self, op: M) -> Result<M::Output, AcidError> {
        self.check_open()?;
        self.registry.expect::<M>(EventKind::Query)?;
        Ok(self.container.run_shared(|state| op.query(state))?)
    }

    /// Write a checkpoint of the current state, returning its cutoff.
    ///
    /// Blocks until the checkpoint is durable, which is never before the
    /// events it covers are durable. Checkpoints are taken one at a time.
    ///
    /// # Panics
    ///
    /// Panics when called from within an asynchronous execution context;
    /// use [`create_checkpoint_async`](Self::create_checkpoint_async) there.
    pub fn create_checkpoint(&self) -> Result<u64, AcidError> {
        let mut durable = self.checkpointing.blocking_lock();
        let (cutoff, payload, barrier) = self.begin_checkpoint()?;
        barrier.wait().map_err(|e| self.durability_failure(e))?;
        let sequence = self
            .append_checkpoint(payload)?
            .wait()
            .map_err(|e| self.durability_failure(e))?;
        *durable = Some(DurableCheckpoint { sequence, cutoff });

        info!(state = %S::name(), cutoff, checkpoint = sequence, "checkpoint written");
        if self.config.compact_on_checkpoint {
            self.compact_through(*durable)?;
        }
        Ok(cutoff)
    }

    pub async fn create_checkpoint_async(&self) -> Result<u64, AcidError> {
        let mut durable = self.checkpointing.lock().await;
        let (cutoff, payload, barrier) = self.begin_checkpoint()?;
        barrier
            .durable()
            .await
            .map_err(|e| self.durability_failure(e))?;
        let sequence = self
            .append_checkpoint(payload)?
            .durable()
            .await
            .map_err(|e| self.durability_failure(e))?;
        *durable = Some(DurableCheckpoint { sequence, cutoff });

        info!(state = %S::name(), cutoff, checkpoint = sequence, "checkpoint written");
        if self.config.compact_on_checkpoint {
            self.compact_through(*durable)?;
        }
        Ok(cutoff)
    }

    /// Write a checkpoint if `checkpoint_interval` updates have happened
    /// since the last one
    pub fn maybe_checkpoint(&self) -> Result<Option<u64>, AcidError> {
        if !self.checkpoint_due() {
            return Ok(None);
        }
        self.create_checkpoint().map(Some)
    }

    /// Drop log records made redundant by the newest durable checkpoint.
    ///
    /// Only a checkpoint this handle loaded at recovery or saw confirmed
    /// durable counts; a record still waiting for its fsync is ignored.
    pub fn compact(&self) -> Result<Compaction, AcidError> {
        self.check_writable()?;
        let durable = self.checkpointing.blocking_lock();
        self.compact_through(*durable)
    }

    /// [`compact`](Self::compact) for async callers.
    ///
    /// The rewrite itself still blocks the calling thread.
    pub async fn compact_async(&self) -> Result<Compaction, AcidError> {
        self.check_writable()?;
        let durable = self.checkpointing.lock().await;
        self.compact_through(*durable)
    }

    /// Close both logs and release the directory.
    ///
    /// Updates already admitted finish first. Closing twice is a no-op.
    pub fn close(&self) -> Result<(), AcidError> {
        if self.closed.swap(true, Ordering::SeqCst) {
            return Ok(());
        }

        // Taking the write lock waits for in-flight updates to enqueue.
        self.container.close();
        let events = self.events.close();
        let checkpoints = self.checkpoints.close();
        drop(
            self.lock_file
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .take(),
        );

        events?;
        checkpoints?;
        info!(state = %S::name(), "state closed");
        Ok(())
    }

    /// Write a final checkpoint, then close
    pub fn close_with_checkpoint(&self) -> Result<(), AcidError> {
        self.create_checkpoint()?;
        self.close()
    }

    /// Whether a durability failure has made the handle refuse writes
    pub fn is_broken(&self) -> bool {
        self.broken.load(Ordering::SeqCst)
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Directory holding the logs; `None` for in-memory stores
    pub fn directory(&self) -> Option<&Path> {
        self.directory.as_deref()
    }

    /// Sequence of the last update record
    pub fn sequence(&self) -> u64 {
        self.events.current_sequence()
    }

    fn check_open(&self) -> Result<(), AcidError> {
        if self.is_closed() {
            return Err(AcidError::Closed);
        }
        Ok(())
    }

    fn check_writable(&self) -> Result<(), AcidError> {
        self.check_open()?;
        if self.is_broken() {
            return Err(AcidError::Broken);
        }
        Ok(())
    }

    fn durability_failure(&self, error: LogError) -> AcidError {
        durability_failure(&self.broken, error)
    }

    fn checkpoint_due(&self) -> bool {
        match self.config.checkpoint_interval {
            Some(interval) if interval > 0 => {
                self.updates_since_checkpoint.load(Ordering::SeqCst) >= interval
            }
            _ => false,
        }
    }

    /// Snapshot the state and its cutoff atomically with respect to updates.
    ///
    /// Also returns a barrier on the events log that resolves once every
    /// update up to the cutoff is durable.
    fn begin_checkpoint(&self) -> Result<(u64, Payload, Ticket), AcidError> {
        self.check_writable()?;
        let (cutoff, encoded, barrier) = self.container.run_exclusive(|state| {
            let cutoff = self.events.current_sequence();
            let encoded = codec::encode(&CheckpointRecord::new(cutoff, &*state));
            let barrier = self.events.barrier();
            self.updates_since_checkpoint.store(0, Ordering::SeqCst);
            (cutoff, encoded, barrier)
        })?;
        let barrier = barrier.map_err(|e| self.durability_failure(e))?;
        Ok((cutoff, encoded?, barrier))
    }

    fn append_checkpoint(&self, payload: Payload) -> Result<Ticket, AcidError> {
        self.checkpoints
            .append(CheckpointRecord::<S>::TAG, payload)
            .map_err(|e| self.durability_failure(e))
    }

    fn compact_through(
        &self,
        checkpoint: Option<DurableCheckpoint>,
    ) -> Result<Compaction, AcidError> {
        let Some(DurableCheckpoint { sequence, cutoff }) = checkpoint else {
            return Ok(Compaction::default());
        };

        let events = self.events.compact_before(cutoff + 1)?;
        let checkpoints = self.checkpoints.compact_before(sequence)?;
        info!(
            state = %S::name(),
            cutoff,
            events_removed = events.entries_removed,
            checkpoints_removed = checkpoints.entries_removed,
            "logs compacted"
        );
        Ok(Compaction {
            events,
            checkpoints,
        })
    }
}

impl<S: Acidic> Drop for AcidState<S> {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            warn!(state = %S::name(), error = %e, "failed to close state");
        }
    }
}

fn lock_directory(dir: &Path) -> Result<File, AcidError> {
    let mut lock_file = OpenOptions::new()
        .create(true)
        .truncate(false)
        .write(true)
        .open(dir.join(LOCK_FILE))?;
    lock_file
        .try_lock_exclusive()
        .map_err(|_| AcidError::Locked(dir.to_path_buf()))?;

    // Record the owner's PID for operators
    lock_file.set_len(0)?;
    writeln!(lock_file, "{}", std::process::id())?;
    Ok(lock_file)
}

fn open_log(dir: &Path, name: &str, options: &FileLogOptions) -> Result<FileLog, AcidError> {
    FileLog::open(dir, name, options.clone()).map_err(|e| match e {
        LogError::Corrupted { .. } => RecoveryError::Log {
            log: name.to_string(),
            source: e,
        }
        .into(),
        other => AcidError::Log(other),
    })
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
