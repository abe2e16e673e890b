// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Dispatch registry keyed by operation tag
//!
//! Built once from a state's declared event list and never mutated again.

use crate::error::{RegistryError, ReplayError, UsageError};
use crate::event::{Event, EventKind, Method, ReplayFn};
use std::any::TypeId;
use std::collections::HashMap;

struct Handler<S> {
    kind: EventKind,
    method: TypeId,
    replay: ReplayFn<S>,
}

/// Immutable mapping from operation tag to its registered handler
pub struct Registry<S> {
    handlers: HashMap<&'static str, Handler<S>>,
}

impl<S> Registry<S> {
    /// Build a registry from a declared event list
    pub fn build(events: impl IntoIterator<Item = Event<S>>) -> Result<Self, RegistryError> {
        let mut handlers = HashMap::new();
        for event in events {
            let tag = event.tag();
            let handler = Handler {
                kind: event.kind(),
                method: event.method(),
                replay: event.replay_fn(),
            };
            if handlers.insert(tag, handler).is_some() {
                return Err(RegistryError::DuplicateTag(tag.to_string()));
            }
        }
        Ok(Self { handlers })
    }

    /// Check that `M` itself is registered as an operation of the given kind.
    ///
    /// A type that merely shares the tag of a registered operation is
    /// unregistered: its records would replay through the other type.
    pub fn expect<M: Method>(&self, kind: EventKind) -> Result<(), UsageError> {
        let (tag, method) = (M::TAG, TypeId::of::<M>());
        match self.handlers.get(tag) {
            Some(handler) if handler.method != method => Err(UsageError::Unregistered {
                tag: tag.to_string(),
                kind,
            }),
            Some(handler) if handler.kind == kind => Ok(()),
            Some(handler) => Err(UsageError::WrongKind {
                tag: tag.to_string(),
                registered: handler.kind,
                requested: kind,
            }),
            None => Err(UsageError::Unregistered {
                tag: tag.to_string(),
                kind,
            }),
        }
    }

    /// Decode a logged payload by its tag and apply it to the state
    pub fn replay(&self, tag: &str, payload: &str, state: &mut S) -> Result<(), ReplayError> {
        let handler = self
            .handlers
            .get(tag)
            .ok_or_else(|| ReplayError::Unregistered(tag.to_string()))?;
        (handler.replay)(payload, state).map_err(|source| ReplayError::Decode {
            tag: tag.to_string(),
            source,
        })
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
