// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Log reader for iterating and validating records
//!
//! The reader provides iteration over records with corruption detection.
//! Invalid records (unterminated line, parse error, checksum mismatch, or a
//! sequence that does not increase) signal the truncation point.

use crate::error::LogReadError;
use crate::record::Record;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Log reader for iterating over records
pub struct LogReader {
    path: PathBuf,
}

impl LogReader {
    /// Open a log file for reading
    pub fn open(path: &Path) -> Result<Self, LogReadError> {
        if !path.exists() {
            return Err(LogReadError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("log file not found: {}", path.display()),
            )));
        }

        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    /// Create a reader that treats a missing file as an empty log
    pub fn open_or_empty(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    /// Iterate over all records
    pub fn records(&self) -> Result<RecordIter, LogReadError> {
        RecordIter::new(&self.path, 0)
    }

    /// Iterate over records with sequence numbers at or after `sequence`
    pub fn records_from(&self, sequence: u64) -> Result<RecordIter, LogReadError> {
        RecordIter::new(&self.path, sequence)
    }

    /// Get the last valid sequence number
    pub fn last_sequence(&self) -> Result<Option<u64>, LogReadError> {
        Ok(self.validate()?.last_valid_sequence)
    }

    /// Get the newest valid record
    pub fn newest(&self) -> Result<Option<Record>, LogReadError> {
        let mut newest = None;
        for record in self.records()? {
            match record {
                Ok(record) => newest = Some(record),
                Err(_) => break,
            }
        }
        Ok(newest)
    }

    /// Count the number of valid records
    pub fn count(&self) -> Result<u64, LogReadError> {
        Ok(self.validate()?.valid_records)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Validate a log file and report the extent of its valid prefix
    pub fn validate(&self) -> Result<LogValidation, LogReadError> {
        let mut valid_records = 0u64;
        let mut last_valid_sequence = None;
        let mut valid_len = 0u64;
        let mut corruption = None;
        let mut iter = self.records()?;

        while let Some(result) = iter.next() {
            match result {
                Ok(record) => {
                    valid_records += 1;
                    last_valid_sequence = Some(record.sequence);
                    valid_len = iter.last_valid_position();
                }
                Err(e) => {
                    let (line, reason) = match e {
                        LogReadError::Corrupted { line, reason } => (line, reason),
                        LogReadError::ChecksumMismatch { line } => {
                            (line, "checksum mismatch".to_string())
                        }
                        LogReadError::Io(e) => (iter.line_number(), format!("IO error: {}", e)),
                    };
                    valid_len = iter.last_valid_position();
                    // Anything after the bad line means this was not a torn append.
                    let at_tail = iter.next().is_none();
                    corruption = Some(LogCorruption {
                        line,
                        reason,
                        at_tail,
                    });
                    break;
                }
            }
        }

        Ok(LogValidation {
            valid_records,
            last_valid_sequence,
            valid_len,
            corruption,
        })
    }
}

/// Iterator over records with position tracking
pub struct RecordIter {
    reader: Option<BufReader<File>>,
    line_number: u64,
    skip_until_sequence: u64,
    last_sequence: Option<u64>,
    /// Position after the last successfully read and validated record
    last_valid_position: u64,
    /// Current position before reading next record
    current_position: u64,
}

impl RecordIter {
    fn new(path: &Path, skip_until_sequence: u64) -> Result<Self, LogReadError> {
        let reader = match File::open(path) {
            Ok(file) => Some(BufReader::new(file)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            reader,
            line_number: 0,
            skip_until_sequence,
            last_sequence: None,
            last_valid_position: 0,
            current_position: 0,
        })
    }

    /// Byte position after the last successfully read valid record
    pub fn last_valid_position(&self) -> u64 {
        self.last_valid_position
    }

    pub fn line_number(&self) -> u64 {
        self.line_number
    }

    fn corrupted(&self, reason: impl Into<String>) -> Option<Result<Record, LogReadError>> {
        Some(Err(LogReadError::Corrupted {
            line: self.line_number,
            reason: reason.into(),
        }))
    }
}

impl Iterator for RecordIter {
    type Item = Result<Record, LogReadError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let reader = self.reader.as_mut()?;
            let mut line = String::new();
            let bytes_read = match reader.read_line(&mut line) {
                Ok(0) => return None,
                Ok(n) => n as u64,
                Err(e) => return Some(Err(LogReadError::Io(e))),
            };
            self.line_number += 1;
            self.current_position += bytes_read;

            // Every record is written together with its newline
            if !line.ends_with('\n') {
                return self.corrupted("unterminated record");
            }

            let trimmed = line.trim();
            if trimmed.is_empty() {
                if self.last_valid_position + bytes_read == self.current_position {
                    self.last_valid_position = self.current_position;
                }
                continue;
            }

            let record = match Record::from_line(trimmed) {
                Ok(r) => r,
                Err(e) => return self.corrupted(e.to_string()),
            };

            if !record.verify() {
                return Some(Err(LogReadError::ChecksumMismatch {
                    line: self.line_number,
                }));
            }

            if let Some(last) = self.last_sequence {
                if record.sequence <= last {
                    return self.corrupted(format!(
                        "sequence {} does not follow {}",
                        record.sequence, last
                    ));
                }
            }

            self.last_sequence = Some(record.sequence);
            self.last_valid_position = self.current_position;

            // Skip if before requested sequence (but still track valid position)
            if record.sequence < self.skip_until_sequence {
                continue;
            }

            return Some(Ok(record));
        }
    }
}

/// Validation result for a log file
#[derive(Debug)]
pub struct LogValidation {
    pub valid_records: u64,
    pub last_valid_sequence: Option<u64>,
    /// Byte length of the valid prefix
    pub valid_len: u64,
    pub corruption: Option<LogCorruption>,
}

/// Information about corruption found in a log file
#[derive(Debug)]
pub struct LogCorruption {
    pub line: u64,
    pub reason: String,
    /// True when nothing follows the corrupt line, as after a torn append
    pub at_tail: bool,
}

#[cfg(test)]
#[path = "reader_tests.rs"]
mod tests;
