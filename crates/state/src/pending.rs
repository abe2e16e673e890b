// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Updates applied in memory whose log record is still being written

use crate::error::AcidError;
use acid_log::{LogError, Ticket};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// The result of an update, released once its record is durable.
///
/// The state has already changed when a `Pending` is handed out; the caller
/// must not treat the output as committed until [`Pending::wait`] or
/// [`Pending::durable`] returns `Ok`.
#[must_use = "an update is not durable until its Pending is resolved"]
pub struct Pending<T> {
    output: T,
    ticket: Ticket,
    broken: Arc<AtomicBool>,
}

impl<T> Pending<T> {
    pub(crate) fn new(output: T, ticket: Ticket, broken: Arc<AtomicBool>) -> Self {
        Self {
            output,
            ticket,
            broken,
        }
    }

    /// Block until the update is durable
    pub fn wait(self) -> Result<T, AcidError> {
        let Pending {
            output,
            ticket,
            broken,
        } = self;
        match ticket.wait() {
            Ok(_) => Ok(output),
            Err(e) => Err(durability_failure(&broken, e)),
        }
    }

    /// Wait asynchronously until the update is durable
    pub async fn durable(self) -> Result<T, AcidError> {
        let Pending {
            output,
            ticket,
            broken,
        } = self;
        match ticket.durable().await {
            Ok(_) => Ok(output),
            Err(e) => Err(durability_failure(&broken, e)),
        }
    }
}

/// Convert a log failure into an `AcidError`, marking the handle broken.
///
/// Memory may already hold changes the log never received, so once this
/// happens the handle refuses further writes.
pub(crate) fn durability_failure(broken: &AtomicBool, error: LogError) -> AcidError {
    if matches!(error, LogError::Closed) {
        return AcidError::Closed;
    }
    if !broken.swap(true, Ordering::SeqCst) {
        tracing::warn!(error = %error, "durability failure, refusing further writes");
    }
    AcidError::Durability(error)
}
