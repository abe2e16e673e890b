// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! JSON codec for operations and state snapshots
//!
//! Encoded values are kept as raw JSON text so the log can carry them
//! verbatim and checksum exactly the bytes it wrote.

use crate::error::CodecError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::value::RawValue;

/// Encoded form of an operation or a state snapshot
pub type Payload = Box<RawValue>;

/// Encode a value into a raw JSON payload
pub fn encode<T: Serialize + ?Sized>(value: &T) -> Result<Payload, CodecError> {
    Ok(serde_json::value::to_raw_value(value)?)
}

/// Decode a value from payload text
pub fn decode<T: DeserializeOwned>(payload: &str) -> Result<T, CodecError> {
    Ok(serde_json::from_str(payload)?)
}
