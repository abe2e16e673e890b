// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! acid-log: durable, append-only record logs
//!
//! Each log is a JSONL file of checksummed records carrying a sequence
//! number, a type tag, and a raw JSON payload.
//!
//! ## Architecture
//!
//! ```text
//! append(tag, payload) → FileLog (assigns sequence) → writer thread
//!                                                        ↓ batch + fsync
//!                          Ticket ← durability confirmed ←
//!
//! LogReader → RecordIter → recovery / inspection
//! ```
//!
//! ## Durability Guarantees
//!
//! - A ticket resolves only after its record has been fsync'd
//! - Checksums detect corruption from bit flips
//! - A torn final record (crash during append) is truncated on open
//! - Corruption followed by further records refuses to open

pub mod error;
pub mod file;
pub mod journal;
pub mod memory;
pub mod reader;
pub mod record;
pub mod ticket;
pub mod writer;

pub use error::{LogError, LogReadError};
pub use file::{FileLog, FileLogOptions, CHECKPOINTS_LOG, EVENTS_LOG, LOCK_FILE};
pub use journal::{CompactionResult, Journal, Records};
pub use memory::MemoryLog;
pub use reader::{LogCorruption, LogReader, LogValidation, RecordIter};
pub use record::Record;
pub use ticket::Ticket;
pub use writer::{repair, LogWriter};
