// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event algebra: updates and queries over a state type
//!
//! Every operation type is a [`Method`] with a stable tag. An operation is
//! either an [`Update`] (read-write access to the state) or a [`Query`]
//! (read-only access). A state type declares the full list of operations it
//! serves through [`Acidic::events`]; that list is the only input used to
//! build the dispatch registry.

use crate::codec;
use crate::error::CodecError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::any::TypeId;
use std::fmt;

/// A serializable operation with a stable type tag
pub trait Method: Serialize + DeserializeOwned + Send + 'static {
    /// Value handed back to the caller
    type Output: Send + 'static;

    /// Tag used for dispatch and for the on-log encoding.
    ///
    /// Must never change once records carrying it have been written.
    const TAG: &'static str;
}

/// An operation that mutates the state
pub trait Update<S>: Method {
    fn update(&self, state: &mut S) -> Self::Output;
}

/// An operation that only reads the state
pub trait Query<S>: Method {
    fn query(&self, state: &S) -> Self::Output;
}

/// Whether an operation mutates the state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Update,
    Query,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKind::Update => write!(f, "update"),
            EventKind::Query => write!(f, "query"),
        }
    }
}

/// Type-erased handler that decodes a logged payload and applies it
pub type ReplayFn<S> = fn(&str, &mut S) -> Result<(), CodecError>;

/// One entry of a state's declared event list
///
/// `method` identifies the declared operation type, so a different type
/// reusing the same tag is never mistaken for it.
pub enum Event<S> {
    Update {
        tag: &'static str,
        method: TypeId,
        replay: ReplayFn<S>,
    },
    Query {
        tag: &'static str,
        method: TypeId,
        replay: ReplayFn<S>,
    },
}

impl<S: 'static> Event<S> {
    /// Declare `M` as an update over `S`
    pub fn update<M: Update<S>>() -> Self {
        Event::Update {
            tag: M::TAG,
            method: TypeId::of::<M>(),
            replay: replay_update::<S, M>,
        }
    }

    /// Declare `M` as a query over `S`
    pub fn query<M: Query<S>>() -> Self {
        Event::Query {
            tag: M::TAG,
            method: TypeId::of::<M>(),
            replay: replay_query::<S, M>,
        }
    }
}

impl<S> Event<S> {
    pub fn tag(&self) -> &'static str {
        match self {
            Event::Update { tag, .. } | Event::Query { tag, .. } => *tag,
        }
    }

    pub fn kind(&self) -> EventKind {
        match self {
            Event::Update { .. } => EventKind::Update,
            Event::Query { .. } => EventKind::Query,
        }
    }

    /// Type of the declared operation
    pub fn method(&self) -> TypeId {
        match self {
            Event::Update { method, .. } | Event::Query { method, .. } => *method,
        }
    }

    pub(crate) fn replay_fn(&self) -> ReplayFn<S> {
        match self {
            Event::Update { replay, .. } | Event::Query { replay, .. } => *replay,
        }
    }
}

impl<S> fmt::Debug for Event<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("kind", &self.kind())
            .field("tag", &self.tag())
            .finish()
    }
}

fn replay_update<S, M: Update<S>>(payload: &str, state: &mut S) -> Result<(), CodecError> {
    let op: M = codec::decode(payload)?;
    let _ = op.update(state);
    Ok(())
}

// Queries share the update shape; the state is left untouched.
fn replay_query<S, M: Query<S>>(payload: &str, state: &mut S) -> Result<(), CodecError> {
    let op: M = codec::decode(payload)?;
    let _ = op.query(state);
    Ok(())
}

/// A state type that can be made durable
pub trait Acidic: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// The complete list of operations this state serves
    fn events() -> Vec<Event<Self>>;

    /// Stable identity of the state type, used to derive its default directory
    fn name() -> String {
        short_type_name::<Self>()
    }
}

/// Last path segment of a type name, without generic arguments
pub fn short_type_name<T: ?Sized>() -> String {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base).to_string()
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
