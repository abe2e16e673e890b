// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! acid-state: ACID persistence for in-memory values
//!
//! An [`AcidState`] owns a state value, an events log of every update
//! applied to it, and a checkpoints log of full-state snapshots. Opening
//! a directory loads the newest checkpoint and replays the events written
//! after it.
//!
//! ## Commit protocol
//!
//! ```text
//! update(op) → exclusive lock → apply op → enqueue record → unlock
//!                                                  ↓
//!                      caller released ← record durable
//!
//! checkpoint → exclusive lock → cutoff + snapshot + events barrier → unlock
//!                  → barrier durable → append checkpoint → durable
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use acid_state::{AcidState, Acidic, Event, Method, Query, Update};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Counter(i64);
//!
//! #[derive(Serialize, Deserialize)]
//! struct Add(i64);
//!
//! impl Method for Add {
//!     type Output = i64;
//!     const TAG: &'static str = "add";
//! }
//!
//! impl Update<Counter> for Add {
//!     fn update(&self, state: &mut Counter) -> i64 {
//!         state.0 += self.0;
//!         state.0
//!     }
//! }
//!
//! #[derive(Serialize, Deserialize)]
//! struct Get;
//!
//! impl Method for Get {
//!     type Output = i64;
//!     const TAG: &'static str = "get";
//! }
//!
//! impl Query<Counter> for Get {
//!     fn query(&self, state: &Counter) -> i64 {
//!         state.0
//!     }
//! }
//!
//! impl Acidic for Counter {
//!     fn events() -> Vec<Event<Self>> {
//!         vec![Event::update::<Add>(), Event::query::<Get>()]
//!     }
//! }
//!
//! # fn main() -> Result<(), acid_state::AcidError> {
//! let counter = AcidState::open(Counter(0), "state/Counter")?;
//! counter.update(Add(5))?;
//! assert_eq!(counter.query(Get)?, 5);
//! counter.close()?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
mod pending;
mod recovery;
pub mod state;

pub use config::{AcidConfig, ConfigError};
pub use error::{AcidError, RecoveryError};
pub use pending::Pending;
pub use state::{AcidState, Compaction, CHECKPOINTS_LOG, EVENTS_LOG, LOCK_FILE};

pub use acid_kernel::{Acidic, CheckpointRecord, Event, EventKind, Method, Query, Update, UsageError};
