// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Log error types

use std::io;
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur when reading records
#[derive(Debug, Error)]
pub enum LogReadError {
    #[error("corrupted record at line {line}: {reason}")]
    Corrupted { line: u64, reason: String },
    #[error("checksum mismatch at line {line}")]
    ChecksumMismatch { line: u64 },
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Errors from log operations
#[derive(Debug, Error)]
pub enum LogError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("log read error: {0}")]
    Read(#[from] LogReadError),
    #[error("corrupted record at line {line} is followed by further records: {reason}")]
    Corrupted { line: u64, reason: String },
    /// A write could not be made durable; shared by every record in the batch
    #[error("write failed: {0}")]
    WriteFailed(Arc<io::Error>),
    #[error("log has failed and no longer accepts writes")]
    Failed,
    #[error("log is closed")]
    Closed,
    #[error("log writer stopped before confirming the write")]
    WriterGone,
}
