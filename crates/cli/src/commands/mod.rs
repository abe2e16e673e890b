// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod dump;
pub mod inspect;
pub mod repair;
pub mod verify;
