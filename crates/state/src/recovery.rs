// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Rebuilding state from the newest checkpoint and the events after it

use crate::error::{AcidError, RecoveryError};
use acid_kernel::{codec, Acidic, CheckpointRecord, Registry};
use acid_log::{Journal, Record};
use serde::de::IgnoredAny;

/// Result of replaying the logs into an initial state
pub(crate) struct Recovered<S> {
    pub state: S,
    /// Events-log sequence the loaded checkpoint covers, 0 without one
    pub cutoff: u64,
    /// Checkpoints-log sequence of the loaded checkpoint
    pub checkpoint: Option<u64>,
    /// Events applied on top of the checkpoint
    pub replayed: u64,
}

pub(crate) fn recover<S: Acidic>(
    initial: S,
    registry: &Registry<S>,
    events: &dyn Journal,
    checkpoints: &dyn Journal,
) -> Result<Recovered<S>, AcidError> {
    let (mut state, cutoff, checkpoint) = match checkpoints.newest()? {
        Some(record) => {
            let checkpoint = load_checkpoint::<S>(&record)?;
            tracing::debug!(
                checkpoint = record.sequence,
                cutoff = checkpoint.cutoff,
                taken_at = %checkpoint.taken_at,
                "loaded checkpoint"
            );
            (checkpoint.state, checkpoint.cutoff, Some(record.sequence))
        }
        None => (initial, 0, None),
    };

    // New updates must never reuse a sequence the checkpoint already covers,
    // even when compaction has left the events log shorter than the cutoff.
    events.advance_to(cutoff)?;

    let mut replayed = 0;
    for record in events.read_from(cutoff + 1)? {
        let record = record.map_err(|source| RecoveryError::Read {
            log: events.name().to_string(),
            source,
        })?;
        registry
            .replay(&record.tag, record.payload(), &mut state)
            .map_err(|source| RecoveryError::Replay {
                sequence: record.sequence,
                source,
            })?;
        replayed += 1;
    }

    Ok(Recovered {
        state,
        cutoff,
        checkpoint,
        replayed,
    })
}

fn checkpoint_header(record: &Record) -> Result<CheckpointRecord<IgnoredAny>, RecoveryError> {
    if record.tag != CheckpointRecord::<IgnoredAny>::TAG {
        return Err(RecoveryError::CheckpointTag {
            sequence: record.sequence,
            tag: record.tag.clone(),
        });
    }
    let header: CheckpointRecord<IgnoredAny> =
        codec::decode(record.payload()).map_err(|source| RecoveryError::Checkpoint {
            sequence: record.sequence,
            source,
        })?;
    if !header.is_current_version() {
        return Err(RecoveryError::CheckpointVersion {
            sequence: record.sequence,
            version: header.version,
        });
    }
    Ok(header)
}

fn load_checkpoint<S: Acidic>(record: &Record) -> Result<CheckpointRecord<S>, RecoveryError> {
    checkpoint_header(record)?;
    codec::decode(record.payload()).map_err(|source| RecoveryError::Checkpoint {
        sequence: record.sequence,
        source,
    })
}
