// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Locating the logs inside a state directory

use acid_log::{FileLog, CHECKPOINTS_LOG, EVENTS_LOG, LOCK_FILE};
use anyhow::{bail, Context};
use clap::ValueEnum;
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

/// One of the two logs of a state directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogKind {
    Events,
    Checkpoints,
}

impl LogKind {
    pub const ALL: [LogKind; 2] = [LogKind::Events, LogKind::Checkpoints];

    pub fn name(self) -> &'static str {
        match self {
            LogKind::Events => EVENTS_LOG,
            LogKind::Checkpoints => CHECKPOINTS_LOG,
        }
    }
}

/// A state directory on disk
#[derive(Debug, Clone)]
pub struct StoreDir {
    root: PathBuf,
}

impl StoreDir {
    pub fn open(root: &Path) -> anyhow::Result<Self> {
        if !root.is_dir() {
            bail!("state directory not found: {}", root.display());
        }
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn log_path(&self, kind: LogKind) -> PathBuf {
        FileLog::path_in(&self.root, kind.name())
    }

    /// Take the directory's lock so no process has the store open.
    ///
    /// The lock is held until the returned file is dropped.
    pub fn lock(&self) -> anyhow::Result<File> {
        let path = self.root.join(LOCK_FILE);
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&path)
            .with_context(|| format!("failed to open {}", path.display()))?;
        if file.try_lock_exclusive().is_err() {
            bail!(
                "{} is open in another process; close it first",
                self.root.display()
            );
        }
        Ok(file)
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
