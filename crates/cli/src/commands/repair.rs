// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `acidctl repair`: truncate logs at their first corruption point

use crate::store::{LogKind, StoreDir};
use anyhow::Context;
use clap::Args;
use std::path::PathBuf;

#[derive(Args)]
pub struct RepairArgs {
    /// State directory
    pub dir: PathBuf,
}

pub fn handle(args: RepairArgs) -> anyhow::Result<()> {
    let store = StoreDir::open(&args.dir)?;
    for (kind, removed) in repair(&store)? {
        println!("{}: removed {} bytes", kind.name(), removed);
    }
    Ok(())
}

/// Repair both logs while holding the directory lock
pub fn repair(store: &StoreDir) -> anyhow::Result<Vec<(LogKind, u64)>> {
    let _lock = store.lock()?;
    LogKind::ALL
        .into_iter()
        .map(|kind| -> anyhow::Result<(LogKind, u64)> {
            let path = store.log_path(kind);
            let removed = acid_log::repair(&path)
                .with_context(|| format!("failed to repair {}", path.display()))?;
            Ok((kind, removed))
        })
        .collect()
}
