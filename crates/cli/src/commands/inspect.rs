// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `acidctl inspect`: summarize a state directory

use crate::output::{self, OutputFormat};
use crate::store::{LogKind, StoreDir};
use acid_kernel::CheckpointRecord;
use acid_log::LogReader;
use anyhow::Context;
use clap::Args;
use serde::de::IgnoredAny;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

#[derive(Args)]
pub struct InspectArgs {
    /// State directory
    pub dir: PathBuf,
    /// Output format
    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

#[derive(Debug, Serialize)]
pub struct LogSummary {
    pub log: &'static str,
    pub present: bool,
    pub records: u64,
    pub first_sequence: Option<u64>,
    pub last_sequence: Option<u64>,
    pub bytes: u64,
    pub corruption: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CheckpointSummary {
    pub sequence: u64,
    pub cutoff: u64,
    pub taken_at: String,
}

#[derive(Debug, Serialize)]
pub struct Inspection {
    pub directory: PathBuf,
    pub logs: Vec<LogSummary>,
    pub checkpoint: Option<CheckpointSummary>,
    /// Events a reopen would replay on top of the checkpoint
    pub replay_events: u64,
}

impl fmt::Display for LogSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<12} ", self.log)?;
        if !self.present {
            return write!(f, "missing");
        }
        match (self.first_sequence, self.last_sequence) {
            (Some(first), Some(last)) => write!(
                f,
                "{} records, sequences {}..{}, {} bytes",
                self.records, first, last, self.bytes
            )?,
            _ => write!(f, "empty")?,
        }
        if let Some(corruption) = &self.corruption {
            write!(f, " (corrupted at {})", corruption)?;
        }
        Ok(())
    }
}

impl fmt::Display for Inspection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "directory    {}", self.directory.display())?;
        for log in &self.logs {
            writeln!(f, "{}", log)?;
        }
        match &self.checkpoint {
            Some(c) => writeln!(
                f,
                "checkpoint   #{} cutoff {} taken {}",
                c.sequence, c.cutoff, c.taken_at
            )?,
            None => writeln!(f, "checkpoint   none")?,
        }
        writeln!(f, "replay       {} events", self.replay_events)
    }
}

pub fn handle(args: InspectArgs) -> anyhow::Result<()> {
    let store = StoreDir::open(&args.dir)?;
    let inspection = inspect(&store)?;
    output::print(&inspection, args.format)
}

pub fn inspect(store: &StoreDir) -> anyhow::Result<Inspection> {
    let logs = LogKind::ALL
        .into_iter()
        .map(|kind| summarize(store, kind))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let checkpoint = newest_checkpoint(store)?;
    let after = checkpoint.as_ref().map(|c| c.cutoff + 1).unwrap_or(0);
    let replay_events = LogReader::open_or_empty(&store.log_path(LogKind::Events))
        .records_from(after)?
        .take_while(|r| r.is_ok())
        .count() as u64;

    Ok(Inspection {
        directory: store.root().to_path_buf(),
        logs,
        checkpoint,
        replay_events,
    })
}

fn summarize(store: &StoreDir, kind: LogKind) -> anyhow::Result<LogSummary> {
    let path = store.log_path(kind);
    if !path.exists() {
        return Ok(LogSummary {
            log: kind.name(),
            present: false,
            records: 0,
            first_sequence: None,
            last_sequence: None,
            bytes: 0,
            corruption: None,
        });
    }

    let reader = LogReader::open(&path)?;
    let validation = reader
        .validate()
        .with_context(|| format!("failed to read {}", path.display()))?;
    let first_sequence = reader
        .records()?
        .next()
        .and_then(|r| r.ok())
        .map(|r| r.sequence);

    Ok(LogSummary {
        log: kind.name(),
        present: true,
        records: validation.valid_records,
        first_sequence,
        last_sequence: validation.last_valid_sequence,
        bytes: std::fs::metadata(&path)?.len(),
        corruption: validation
            .corruption
            .map(|c| format!("line {}: {}", c.line, c.reason)),
    })
}

/// Header of the newest checkpoint, without decoding its state
pub fn newest_checkpoint(store: &StoreDir) -> anyhow::Result<Option<CheckpointSummary>> {
    let reader = LogReader::open_or_empty(&store.log_path(LogKind::Checkpoints));
    let Some(record) = reader.newest()? else {
        return Ok(None);
    };
    let header: CheckpointRecord<IgnoredAny> = acid_kernel::decode(record.payload())
        .with_context(|| format!("checkpoint {} is unreadable", record.sequence))?;
    Ok(Some(CheckpointSummary {
        sequence: record.sequence,
        cutoff: header.cutoff,
        taken_at: header.taken_at.to_rfc3339(),
    }))
}

#[cfg(test)]
#[path = "inspect_tests.rs"]
mod tests;
