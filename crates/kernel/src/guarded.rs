// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Guarded state container
//!
//! Owns the authoritative state value behind a single reader-writer lock.
//! Writers run exclusively; readers may run concurrently but never observe
//! a state that a writer is still changing.

use crate::error::ContainerError;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Exclusive owner of an in-memory state value
pub struct Guarded<S> {
    slot: RwLock<Option<S>>,
}

impl<S> Guarded<S> {
    pub fn new(state: S) -> Self {
        Self {
            slot: RwLock::new(Some(state)),
        }
    }

    /// Run `f` with exclusive, mutable access to the state
    pub fn run_exclusive<R>(&self, f: impl FnOnce(&mut S) -> R) -> Result<R, ContainerError> {
        let mut slot = self.write()?;
        let state = slot.as_mut().ok_or(ContainerError::Closed)?;
        Ok(f(state))
    }

    /// Run `f` with shared, read-only access to the state
    pub fn run_shared<R>(&self, f: impl FnOnce(&S) -> R) -> Result<R, ContainerError> {
        let slot = self.read()?;
        let state = slot.as_ref().ok_or(ContainerError::Closed)?;
        Ok(f(state))
    }

    /// Replace the held state, returning the previous value
    pub fn replace(&self, state: S) -> Result<S, ContainerError> {
        let mut slot = self.write()?;
        let current = slot.as_mut().ok_or(ContainerError::Closed)?;
        Ok(std::mem::replace(current, state))
    }

    /// Take the state out; every later call fails with `Closed`
    pub fn close(&self) -> Option<S> {
        // A poisoned container is still closed; the value it held is discarded.
        match self.slot.write() {
            Ok(mut slot) => slot.take(),
            Err(poisoned) => {
                poisoned.into_inner().take();
                None
            }
        }
    }

    pub fn is_closed(&self) -> bool {
        match self.slot.read() {
            Ok(slot) => slot.is_none(),
            Err(poisoned) => poisoned.into_inner().is_none(),
        }
    }

    // A panic inside a handler may leave the state half-applied, so a
    // poisoned lock is never handed out again.
    fn write(&self) -> Result<RwLockWriteGuard<'_, Option<S>>, ContainerError> {
        self.slot.write().map_err(|_| ContainerError::Poisoned)
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Option<S>>, ContainerError> {
        self.slot.read().map_err(|_| ContainerError::Poisoned)
    }
}

#[cfg(test)]
#[path = "guarded_tests.rs"]
mod tests;
