// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `acidctl dump`: print records as JSON lines

use crate::store::{LogKind, StoreDir};
use acid_log::LogReader;
use anyhow::Context;
use clap::Args;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Args)]
pub struct DumpArgs {
    /// State directory
    pub dir: PathBuf,
    /// Which log to print
    #[arg(long, value_enum, default_value_t = LogKind::Events)]
    pub log: LogKind,
    /// First sequence number to print
    #[arg(long, default_value_t = 0)]
    pub from: u64,
}

pub fn handle(args: DumpArgs) -> anyhow::Result<()> {
    let store = StoreDir::open(&args.dir)?;
    let mut out = io::stdout().lock();
    dump(&store, args.log, args.from, &mut out)?;
    Ok(())
}

/// Write records of `log` from sequence `from` onward; returns how many
pub fn dump(store: &StoreDir, log: LogKind, from: u64, out: &mut impl Write) -> anyhow::Result<u64> {
    let path = store.log_path(log);
    let reader = LogReader::open(&path)?;

    let mut written = 0;
    for record in reader.records_from(from)? {
        let record = record.with_context(|| format!("failed to read {}", path.display()))?;
        writeln!(out, "{}", serde_json::to_string(&record)?)?;
        written += 1;
    }
    Ok(written)
}

#[cfg(test)]
#[path = "dump_tests.rs"]
mod tests;
