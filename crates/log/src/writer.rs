// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Log writer for durable append operations
//!
//! The writer owns the log file. Opening it validates the existing
//! contents: a torn final record is truncated away, while corruption in the
//! middle of the file refuses to open.

use crate::error::LogError;
use crate::journal::CompactionResult;
use crate::reader::LogReader;
use crate::record::Record;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Log writer for durable append operations
pub struct LogWriter {
    path: PathBuf,
    file: File,
    next_sequence: u64,
}

impl LogWriter {
    /// Open or create a log file
    ///
    /// If the file exists, scans it to find the next sequence number.
    pub fn open(path: &Path) -> Result<Self, LogError> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let validation = LogReader::open_or_empty(path).validate()?;
        if let Some(corruption) = &validation.corruption {
            if !corruption.at_tail {
                return Err(LogError::Corrupted {
                    line: corruption.line,
                    reason: corruption.reason.clone(),
                });
            }
            tracing::warn!(
                path = %path.display(),
                line = corruption.line,
                reason = %corruption.reason,
                valid_len = validation.valid_len,
                "truncating torn record at end of log"
            );
            truncate_file(path, validation.valid_len)?;
        }

        let next_sequence = validation.last_valid_sequence.map(|s| s + 1).unwrap_or(1);

        // Open file for appending
        let file = OpenOptions::new().create(true).append(true).open(path)?;

        Ok(Self {
            path: path.to_path_buf(),
            file,
            next_sequence,
        })
    }

    /// Write a record that already carries its sequence number, without syncing.
    ///
    /// Group commit batches these and calls [`sync`](Self::sync) once.
    pub fn write_record(&mut self, record: &Record) -> Result<(), LogError> {
        let mut line = record.to_line()?;
        line.push('\n');

        // One write per record so a crash leaves at most one torn line
        self.file.write_all(line.as_bytes())?;

        self.next_sequence = self.next_sequence.max(record.sequence + 1);
        Ok(())
    }

    /// Force sync to disk
    pub fn sync(&mut self) -> Result<(), LogError> {
        self.file.sync_all()?;
        Ok(())
    }

    /// Rewrite the file keeping only records at or after `keep_from`.
    ///
    /// Sequence numbers are preserved. The rewrite goes to a temporary file
    /// that atomically replaces the log.
    pub fn compact(&mut self, keep_from: u64) -> Result<CompactionResult, LogError> {
        self.sync()?;
        let old_size = fs::metadata(&self.path).map(|m| m.len()).unwrap_or(0);

        let mut kept = Vec::new();
        let mut entries_removed = 0;
        for record in LogReader::open_or_empty(&self.path).records()? {
            let record = record?;
            if record.sequence >= keep_from {
                kept.push(record);
            } else {
                entries_removed += 1;
            }
        }

        if entries_removed == 0 {
            return Ok(CompactionResult {
                entries_removed: 0,
                entries_kept: kept.len(),
                bytes_reclaimed: 0,
            });
        }

        let temp_path = self.path.with_extension("jsonl.compact.tmp");
        {
            let mut file = File::create(&temp_path)?;
            for record in &kept {
                let mut line = record.to_line()?;
                line.push('\n');
                file.write_all(line.as_bytes())?;
            }
            file.sync_all()?;
        }

        // Atomic replace (rename is atomic on POSIX)
        fs::rename(&temp_path, &self.path)?;
        if let Some(parent) = self.path.parent() {
            File::open(parent)?.sync_all()?;
        }
        self.file = OpenOptions::new().append(true).open(&self.path)?;

        let new_size = fs::metadata(&self.path).map(|m| m.len()).unwrap_or(0);

        Ok(CompactionResult {
            entries_removed,
            entries_kept: kept.len(),
            bytes_reclaimed: old_size.saturating_sub(new_size),
        })
    }

    /// Move the next sequence number past `sequence`
    pub fn advance_to(&mut self, sequence: u64) {
        self.next_sequence = self.next_sequence.max(sequence + 1);
    }

    /// Next sequence number to be assigned
    pub fn sequence(&self) -> u64 {
        self.next_sequence
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Truncate a log at the first corruption point.
///
/// This is an explicit operator action for corruption that opening refuses
/// to repair on its own. Returns the number of bytes removed.
pub fn repair(path: &Path) -> Result<u64, LogError> {
    if !path.exists() {
        return Ok(0);
    }

    let validation = LogReader::open_or_empty(path).validate()?;
    let Some(corruption) = validation.corruption else {
        return Ok(0);
    };

    let old_size = fs::metadata(path)?.len();
    tracing::warn!(
        path = %path.display(),
        line = corruption.line,
        reason = %corruption.reason,
        "repairing log"
    );
    truncate_file(path, validation.valid_len)?;
    Ok(old_size.saturating_sub(validation.valid_len))
}

fn truncate_file(path: &Path, len: u64) -> Result<(), LogError> {
    let file = OpenOptions::new().write(true).open(path)?;
    file.set_len(len)?;
    file.sync_all()?;
    tracing::info!(path = %path.display(), len, "log truncated at corruption point");
    Ok(())
}

#[cfg(test)]
#[path = "writer_tests.rs"]
mod tests;
