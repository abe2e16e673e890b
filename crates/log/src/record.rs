// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Log record structure with checksum verification
//!
//! Each record contains a sequence number, timestamp, type tag, raw JSON
//! payload, and a CRC32 checksum over the tag and payload text.

use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use std::time::{SystemTime, UNIX_EPOCH};

/// A single record in a log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    /// Monotonically increasing sequence number, starting at 1
    pub sequence: u64,
    /// Microseconds since Unix epoch
    pub timestamp_micros: u64,
    /// Type tag of the payload
    pub tag: String,
    /// Encoded payload, stored verbatim
    pub payload: Box<RawValue>,
    /// CRC32 checksum of tag and payload
    pub checksum: u32,
}

impl Record {
    /// Create a new record with computed checksum
    pub fn new(sequence: u64, tag: &str, payload: Box<RawValue>) -> Self {
        let timestamp_micros = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_micros() as u64)
            .unwrap_or(0);
        Self::new_with_timestamp(sequence, timestamp_micros, tag, payload)
    }

    /// Create a new record with a specific timestamp (for testing)
    pub fn new_with_timestamp(
        sequence: u64,
        timestamp_micros: u64,
        tag: &str,
        payload: Box<RawValue>,
    ) -> Self {
        let checksum = Self::calculate_checksum(tag, &payload);
        Self {
            sequence,
            timestamp_micros,
            tag: tag.to_string(),
            payload,
            checksum,
        }
    }

    fn calculate_checksum(tag: &str, payload: &RawValue) -> u32 {
        let mut hasher = crc32fast::Hasher::new();
        hasher.update(tag.as_bytes());
        hasher.update(&[0]);
        hasher.update(payload.get().as_bytes());
        hasher.finalize()
    }

    /// Verify the checksum matches the tag and payload
    pub fn verify(&self) -> bool {
        self.checksum == Self::calculate_checksum(&self.tag, &self.payload)
    }

    /// Payload text as written
    pub fn payload(&self) -> &str {
        self.payload.get()
    }

    /// Serialize to one line of JSON, without the trailing newline
    pub fn to_line(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parse from a single line of JSON
    pub fn from_line(line: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(line)
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.sequence == other.sequence
            && self.timestamp_micros == other.timestamp_micros
            && self.tag == other.tag
            && self.payload.get() == other.payload.get()
            && self.checksum == other.checksum
    }
}

impl Eq for Record {}

#[cfg(test)]
#[path = "record_tests.rs"]
mod tests;
