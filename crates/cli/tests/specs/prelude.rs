//! Shared helpers for CLI specs

#![allow(dead_code)]

use assert_cmd::Command;
use std::path::Path;
use tempfile::TempDir;

/// Path of the `mx` binary built for this test run
pub const MX_BIN: &str = env!("CARGO_BIN_EXE_mx");

/// Scratch directory the CLI runs in
pub struct Project {
    dir: TempDir,
}

impl Project {
    pub fn empty() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file relative to the project root
    pub fn file(&self, rel: &str, contents: &str) {
        let path = self.dir.path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, contents).unwrap();
    }

    pub fn mx(&self) -> CliRun {
        let mut cmd = Command::new(MX_BIN);
        cmd.current_dir(self.dir.path()).env_remove("RUST_LOG");
        CliRun { cmd }
    }
}

/// `mx` outside any project
pub fn mx() -> CliRun {
    let mut cmd = Command::new(MX_BIN);
    cmd.env_remove("RUST_LOG");
    CliRun { cmd }
}

pub struct CliRun {
    cmd: Command,
}

impl CliRun {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.cmd.env(key, value);
        self
    }

    /// Run and require a zero exit status
    pub fn passes(mut self) -> CliOutput {
        let output = self.cmd.output().unwrap();
        let out = CliOutput::from(output);
        assert!(
            out.success,
            "expected success\nstdout:\n{}\nstderr:\n{}",
            out.stdout, out.stderr
        );
        out
    }

    /// Run and require a non-zero exit status
    pub fn fails(mut self) -> CliOutput {
        let output = self.cmd.output().unwrap();
        let out = CliOutput::from(output);
        assert!(
            !out.success,
            "expected failure\nstdout:\n{}\nstderr:\n{}",
            out.stdout, out.stderr
        );
        out
    }
}

pub struct CliOutput {
    success: bool,
    stdout: String,
    stderr: String,
}

impl From<std::process::Output> for CliOutput {
    fn from(output: std::process::Output) -> Self {
        Self {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

impl CliOutput {
    pub fn stdout(&self) -> String {
        self.stdout.clone()
    }

    pub fn stdout_eq(self, expected: &str) -> Self {
        similar_asserts::assert_eq!(self.stdout, expected);
        self
    }

    pub fn stdout_has(self, needle: &str) -> Self {
        assert!(
            self.stdout.contains(needle),
            "stdout missing {:?}:\n{}",
            needle,
            self.stdout
        );
        self
    }

    pub fn stderr_has(self, needle: &str) -> Self {
        assert!(
            self.stderr.contains(needle),
            "stderr missing {:?}:\n{}",
            needle,
            self.stderr
        );
        self
    }

    pub fn stderr_empty(self) -> Self {
        assert!(self.stderr.is_empty(), "unexpected stderr:\n{}", self.stderr);
        self
    }
}

pub const THREE_PROCESS_CONFIG: &str = r#"
processes = [1, 2, 3]
rounds = 2
hold = "1ms"
request_timeout = "10s"
"#;
