// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Checkpoint envelope stored in the checkpoints log

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A full-state snapshot paired with the events-log position it reflects.
///
/// `cutoff` is the sequence number of the last events-log record already
/// applied to `state`. Recovery replays records strictly after it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckpointRecord<S> {
    pub version: u32,
    pub cutoff: u64,
    pub taken_at: DateTime<Utc>,
    pub state: S,
}

impl<S> CheckpointRecord<S> {
    /// Tag of checkpoint records in the checkpoints log
    pub const TAG: &'static str = "checkpoint";

    /// Current version of the checkpoint format
    pub const CURRENT_VERSION: u32 = 1;

    pub fn new(cutoff: u64, state: S) -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            cutoff,
            taken_at: Utc::now(),
            state,
        }
    }

    pub fn is_current_version(&self) -> bool {
        self.version == Self::CURRENT_VERSION
    }
}

#[cfg(test)]
#[path = "checkpoint_tests.rs"]
mod tests;
