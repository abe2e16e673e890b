// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `acidctl verify`: check both logs for corruption

use super::inspect::newest_checkpoint;
use crate::store::{LogKind, StoreDir};
use acid_log::LogReader;
use clap::Args;
use std::fmt;
use std::path::PathBuf;

#[derive(Args)]
pub struct VerifyArgs {
    /// State directory
    pub dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogStatus {
    Missing,
    Valid {
        records: u64,
    },
    Corrupted {
        line: u64,
        reason: String,
        at_tail: bool,
    },
}

impl LogStatus {
    pub fn is_corrupted(&self) -> bool {
        matches!(self, LogStatus::Corrupted { .. })
    }
}

impl fmt::Display for LogStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogStatus::Missing => write!(f, "missing"),
            LogStatus::Valid { records } => write!(f, "ok, {} records", records),
            LogStatus::Corrupted {
                line,
                reason,
                at_tail,
            } => {
                write!(f, "corrupted at line {}: {}", line, reason)?;
                if *at_tail {
                    write!(f, " (torn final record, discarded on next open)")
                } else {
                    write!(f, " (run `acidctl repair` to truncate)")
                }
            }
        }
    }
}

/// Print a report; false when any log is corrupted
pub fn handle(args: VerifyArgs) -> anyhow::Result<bool> {
    let store = StoreDir::open(&args.dir)?;
    let mut healthy = true;

    for kind in LogKind::ALL {
        let status = verify_log(&store, kind)?;
        healthy &= !status.is_corrupted();
        println!("{}: {}", kind.name(), status);
    }

    if let Err(e) = newest_checkpoint(&store) {
        healthy = false;
        println!("checkpoint: {:#}", e);
    }
    Ok(healthy)
}

pub fn verify_log(store: &StoreDir, kind: LogKind) -> anyhow::Result<LogStatus> {
    let path = store.log_path(kind);
    if !path.exists() {
        return Ok(LogStatus::Missing);
    }

    let validation = LogReader::open(&path)?.validate()?;
    Ok(match validation.corruption {
        Some(c) => LogStatus::Corrupted {
            line: c.line,
            reason: c.reason,
            at_tail: c.at_tail,
        },
        None => LogStatus::Valid {
            records: validation.valid_records,
        },
    })
}

#[cfg(test)]
#[path = "verify_tests.rs"]
mod tests;
