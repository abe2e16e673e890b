// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Durability tickets
//!
//! A ticket is handed out when a record is accepted by a log and resolves
//! once the record is durable (or the write has failed).

use crate::error::LogError;
use tokio::sync::oneshot;

pub(crate) type Completion = oneshot::Sender<Result<u64, LogError>>;

/// Pending confirmation that a record is durable
#[derive(Debug)]
pub struct Ticket {
    rx: oneshot::Receiver<Result<u64, LogError>>,
}

impl Ticket {
    pub(crate) fn channel() -> (Completion, Ticket) {
        let (tx, rx) = oneshot::channel();
        (tx, Ticket { rx })
    }

    /// A ticket that has already resolved
    pub fn ready(result: Result<u64, LogError>) -> Self {
        let (tx, ticket) = Self::channel();
        // The receiver is alive in `ticket`, so the send cannot fail.
        let _ = tx.send(result);
        ticket
    }

    /// Block the current thread until the record is durable.
    ///
    /// Returns the record's sequence number.
    ///
    /// # Panics
    ///
    /// Panics when called from within an asynchronous execution context;
    /// use [`Ticket::durable`] there.
    pub fn wait(self) -> Result<u64, LogError> {
        self.rx.blocking_recv().unwrap_or(Err(LogError::WriterGone))
    }

    /// Wait asynchronously until the record is durable
    pub async fn durable(self) -> Result<u64, LogError> {
        self.rx.await.unwrap_or(Err(LogError::WriterGone))
    }
}
