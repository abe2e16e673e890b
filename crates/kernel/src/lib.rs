// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! acid-kernel: building blocks for ACID in-memory state
//!
//! This crate provides:
//! - The event algebra: `Update` and `Query` operations over a state type
//! - The dispatch registry built once from a state's declared event list
//! - The guarded state container (single writer, concurrent readers)
//! - The JSON codec and the checkpoint envelope written to the checkpoints log

pub mod checkpoint;
pub mod codec;
pub mod error;
pub mod event;
pub mod guarded;
pub mod registry;

pub use checkpoint::CheckpointRecord;
pub use codec::{decode, encode, Payload};
pub use error::{CodecError, ContainerError, RegistryError, ReplayError, UsageError};
pub use event::{short_type_name, Acidic, Event, EventKind, Method, Query, ReplayFn, Update};
pub use guarded::Guarded;
pub use registry::Registry;
