//! Shared helpers for CLI specs

#![allow(dead_code)]

use acid_kernel::CheckpointRecord;
use acid_log::{FileLog, FileLogOptions, Journal};
use assert_cmd::Command;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary state directory
pub struct Store {
    dir: TempDir,
}

impl Store {
    /// A directory with empty events and checkpoints logs
    pub fn empty() -> Self {
        let store = Self {
            dir: TempDir::new().unwrap(),
        };
        store.open_log("events").close().unwrap();
        store.open_log("checkpoints").close().unwrap();
        store
    }

    /// A directory holding `n` counter increments
    pub fn with_events(n: u64) -> Self {
        let store = Self::empty();
        store.add_events(n);
        store
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn log(&self, name: &str) -> PathBuf {
        FileLog::path_in(self.dir.path(), name)
    }

    fn open_log(&self, name: &str) -> FileLog {
        FileLog::open(self.dir.path(), name, FileLogOptions::default()).unwrap()
    }

    pub fn add_events(&self, n: u64) {
        let log = self.open_log("events");
        for _ in 0..n {
            log.append("add", acid_kernel::encode(&1).unwrap())
                .unwrap()
                .wait()
                .unwrap();
        }
        log.close().unwrap();
    }

    pub fn checkpoint(&self, cutoff: u64) {
        let log = self.open_log("checkpoints");
        let record = CheckpointRecord::new(cutoff, serde_json::json!({ "value": cutoff }));
        log.append(
            CheckpointRecord::<()>::TAG,
            acid_kernel::encode(&record).unwrap(),
        )
        .unwrap()
        .wait()
        .unwrap();
        log.close().unwrap();
    }

    /// Append raw text to a log, bypassing the writer
    pub fn append_raw(&self, name: &str, text: &str) {
        let mut file = OpenOptions::new()
            .append(true)
            .open(self.log(name))
            .unwrap();
        file.write_all(text.as_bytes()).unwrap();
    }

    pub fn acidctl(&self) -> CliBuilder {
        CliBuilder::new(self.dir.path().to_path_buf())
    }
}

/// `acidctl` invocation whose last argument is the store directory
pub struct CliBuilder {
    dir: PathBuf,
    args: Vec<String>,
    with_dir: bool,
}

impl CliBuilder {
    fn new(dir: PathBuf) -> Self {
        Self {
            dir,
            args: Vec::new(),
            with_dir: true,
        }
    }

    pub fn args(mut self, args: &[&str]) -> Self {
        self.args.extend(args.iter().map(|s| s.to_string()));
        self
    }

    /// Do not pass the store directory
    pub fn bare(mut self) -> Self {
        self.with_dir = false;
        self
    }

    fn run(self) -> std::process::Output {
        let mut cmd = Command::cargo_bin("acidctl").unwrap();
        // The subcommand comes first, then the directory, then options
        let mut args = self.args.into_iter();
        if let Some(first) = args.next() {
            cmd.arg(first);
        }
        if self.with_dir {
            cmd.arg(&self.dir);
        }
        cmd.args(args);
        cmd.env_remove("RUST_LOG");
        cmd.output().unwrap()
    }

    pub fn passes(self) -> RunAssert {
        let output = self.run();
        assert!(
            output.status.success(),
            "expected success, got {:?}\nstderr: {}",
            output.status.code(),
            String::from_utf8_lossy(&output.stderr)
        );
        RunAssert::new(output)
    }

    pub fn fails(self) -> RunAssert {
        let output = self.run();
        assert!(
            !output.status.success(),
            "expected failure\nstdout: {}",
            String::from_utf8_lossy(&output.stdout)
        );
        RunAssert::new(output)
    }
}

pub struct RunAssert {
    output: std::process::Output,
}

impl RunAssert {
    fn new(output: std::process::Output) -> Self {
        Self { output }
    }

    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    pub fn code(self, expected: i32) -> Self {
        assert_eq!(self.output.status.code(), Some(expected));
        self
    }

    pub fn stdout_has(self, expected: &str) -> Self {
        let stdout = self.stdout();
        assert!(
            stdout.contains(expected),
            "stdout does not contain {:?}:\n{}",
            expected,
            stdout
        );
        self
    }

    pub fn stdout_lacks(self, unexpected: &str) -> Self {
        let stdout = self.stdout();
        assert!(
            !stdout.contains(unexpected),
            "stdout contains {:?}:\n{}",
            unexpected,
            stdout
        );
        self
    }

    pub fn stdout_eq(self, expected: &str) -> Self {
        similar_asserts::assert_eq!(self.stdout(), expected);
        self
    }

    pub fn stderr_has(self, expected: &str) -> Self {
        let stderr = self.stderr();
        assert!(
            predicates::str::contains(expected).eval(&stderr),
            "stderr does not contain {:?}:\n{}",
            expected,
            stderr
        );
        self
    }
}

pub use predicates::Predicate;
