// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types shared by the kernel modules

use crate::event::EventKind;
use thiserror::Error;

/// Errors from encoding or decoding values
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// An operation was issued that the registry cannot serve.
///
/// This is a programming mistake (the operation type is missing from the
/// state's declared event list), not a data problem.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UsageError {
    #[error("no handler registered for {kind} `{tag}`")]
    Unregistered { tag: String, kind: EventKind },
    #[error("`{tag}` is registered as {registered}, not {requested}")]
    WrongKind {
        tag: String,
        registered: EventKind,
        requested: EventKind,
    },
}

/// Errors from building a registry
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("duplicate event tag `{0}`")]
    DuplicateTag(String),
}

/// Errors from replaying a logged operation
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("no handler registered for logged tag `{0}`")]
    Unregistered(String),
    #[error("failed to decode `{tag}`: {source}")]
    Decode {
        tag: String,
        #[source]
        source: CodecError,
    },
}

/// Errors from the guarded state container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ContainerError {
    #[error("state container is closed")]
    Closed,
    #[error("state container is poisoned by a panicking handler")]
    Poisoned,
}
