// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Errors surfaced by `AcidState`

use crate::config::ConfigError;
use acid_kernel::{CodecError, ContainerError, RegistryError, ReplayError, UsageError};
use acid_log::{LogError, LogReadError};
use std::path::PathBuf;
use thiserror::Error;

/// Reasons the stored state cannot be reconstructed.
///
/// Recovery never guesses: any of these makes `open` fail.
#[derive(Debug, Error)]
pub enum RecoveryError {
    #[error("{log} log is corrupted: {source}")]
    Log {
        log: String,
        #[source]
        source: LogError,
    },
    #[error("{log} log record is unreadable: {source}")]
    Read {
        log: String,
        #[source]
        source: LogReadError,
    },
    #[error("checkpoint {sequence} has unexpected tag `{tag}`")]
    CheckpointTag { sequence: u64, tag: String },
    #[error("checkpoint {sequence} has unsupported version {version}")]
    CheckpointVersion { sequence: u64, version: u32 },
    #[error("checkpoint {sequence} cannot be decoded: {source}")]
    Checkpoint {
        sequence: u64,
        #[source]
        source: CodecError,
    },
    #[error("event {sequence} cannot be replayed: {source}")]
    Replay {
        sequence: u64,
        #[source]
        source: ReplayError,
    },
}

/// Errors from [`AcidState`](crate::AcidState) operations
#[derive(Debug, Error)]
pub enum AcidError {
    #[error("usage error: {0}")]
    Usage(#[from] UsageError),
    #[error("recovery failed: {0}")]
    Recovery(#[from] RecoveryError),
    #[error("write could not be made durable: {0}")]
    Durability(#[source] LogError),
    #[error("handle refuses writes after an earlier durability failure")]
    Broken,
    #[error("handle is closed")]
    Closed,
    #[error("state container is poisoned by a panicking handler")]
    Poisoned,
    #[error("{0} is locked by another process")]
    Locked(PathBuf),
    #[error("invalid event list: {0}")]
    Registry(#[from] RegistryError),
    #[error("encode error: {0}")]
    Codec(#[from] CodecError),
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("log error: {0}")]
    Log(#[from] LogError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ContainerError> for AcidError {
    fn from(e: ContainerError) -> Self {
        match e {
            ContainerError::Closed => AcidError::Closed,
            ContainerError::Poisoned => AcidError::Poisoned,
        }
    }
}
