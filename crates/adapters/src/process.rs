// SPDX-License-Identifier: MIT
// Copyright (c) 2026 EDA Task Runner Contributors

//! Process Runner (spec.md §4 component 2, §6).
//!
//! Launches a shell command, returns an opaque handle exposing a pid,
//! first-stdout-line access (for LSF job-id extraction), full
//! stdout/stderr/exit-code capture, and tree-kill.

use async_trait::async_trait;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, BufReader, Lines};
use tokio::process::{Child, ChildStderr, ChildStdout, Command};

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("failed to spawn process: {0}")]
    Spawn(String),
    #[error("io error communicating with process: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to kill process tree for pid {pid}: {reason}")]
    Kill { pid: u32, reason: String },
}

/// Captured result of a terminated process.
#[derive(Debug, Clone)]
pub struct ProcessOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

/// An in-flight or just-spawned process.
///
/// `communicate` consumes the handle — once stdio has been drained and the
/// exit code observed, there is nothing left to do with it.
#[async_trait]
pub trait ProcessHandle: Send {
    fn pid(&self) -> Option<u32>;

    /// Read the next line of stdout without waiting for the process to
    /// exit. Used by the Run Executor to extract the LSF job-id from a
    /// `bsub -I` submission's first line of output (spec §4.2 step 6).
    async fn read_first_stdout_line(&mut self) -> Result<Option<String>, ProcessError>;

    /// Wait for the process to terminate, returning everything captured.
    async fn communicate(self: Box<Self>) -> Result<ProcessOutput, ProcessError>;
}

/// Spawns shell commands and kills process trees.
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    /// Spawn `command` via a shell, in `cwd` if given, with `env` added on
    /// top of (not replacing) the runner's own environment.
    async fn spawn(
        &self,
        command: &str,
        cwd: Option<&Path>,
        env: &[(String, String)],
    ) -> Result<Box<dyn ProcessHandle>, ProcessError>;

    /// Kill the process group rooted at `pid`.
    async fn kill_tree(&self, pid: u32) -> Result<(), ProcessError>;
}

/// `ProcessRunner` backed by `tokio::process`.
///
/// Each spawned child gets its own process group (`process_group(0)`) so
/// `kill_tree` can signal the whole tree via `killpg` rather than just the
/// immediate child — matching the original tool's `kill_pid_tree` intent.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioProcessRunner;

impl TokioProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProcessRunner for TokioProcessRunner {
    async fn spawn(
        &self,
        command: &str,
        cwd: Option<&Path>,
        env: &[(String, String)],
    ) -> Result<Box<dyn ProcessHandle>, ProcessError> {
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg(command);
        if let Some(dir) = cwd {
            cmd.current_dir(dir);
        }
        // Isolated identity env: added on top of the inherited environment,
        // never written into this process's own environment table (spec §5,
        // Design Notes §9 — the original mutates globals, we must not).
        for (key, value) in env {
            cmd.env(key, value);
        }
        cmd.stdin(std::process::Stdio::null());
        cmd.stdout(std::process::Stdio::piped());
        cmd.stderr(std::process::Stdio::piped());
        #[cfg(unix)]
        {
            cmd.process_group(0);
        }

        let mut child = cmd.spawn().map_err(|e| ProcessError::Spawn(e.to_string()))?;
        let pid = child.id();

        let stdout = child.stdout.take().ok_or_else(|| {
            ProcessError::Spawn("child stdout was not piped".to_string())
        })?;
        let stderr = child.stderr.take().ok_or_else(|| {
            ProcessError::Spawn("child stderr was not piped".to_string())
        })?;

        let stderr_task = tokio::spawn(async move { read_to_string(stderr).await });

        Ok(Box::new(TokioProcessHandle {
            child,
            pid,
            stdout_lines: BufReader::new(stdout).lines(),
            stderr_task: Some(stderr_task),
        }))
    }

    async fn kill_tree(&self, pid: u32) -> Result<(), ProcessError> {
        #[cfg(unix)]
        {
            use nix::sys::signal::{killpg, Signal};
            use nix::unistd::Pid;

            let pgid = Pid::from_raw(pid as i32);
            // Best-effort: the group may already be gone if the process
            // exited naturally between the caller's check and this call.
            let _ = killpg(pgid, Signal::SIGTERM);
            tokio::time::sleep(Duration::from_millis(200)).await;
            let _ = killpg(pgid, Signal::SIGKILL);
            Ok(())
        }
        #[cfg(not(unix))]
        {
            Err(ProcessError::Kill { pid, reason: "tree-kill is only implemented on unix".into() })
        }
    }
}

async fn read_to_string(stderr: ChildStderr) -> String {
    use tokio::io::AsyncReadExt;
    let mut reader = BufReader::new(stderr);
    let mut buf = String::new();
    let _ = reader.read_to_string(&mut buf).await;
    buf
}

struct TokioProcessHandle {
    child: Child,
    pid: Option<u32>,
    stdout_lines: Lines<BufReader<ChildStdout>>,
    stderr_task: Option<tokio::task::JoinHandle<String>>,
}

#[async_trait]
impl ProcessHandle for TokioProcessHandle {
    fn pid(&self) -> Option<u32> {
        self.pid
    }

    async fn read_first_stdout_line(&mut self) -> Result<Option<String>, ProcessError> {
        Ok(self.stdout_lines.next_line().await?)
    }

    async fn communicate(mut self: Box<Self>) -> Result<ProcessOutput, ProcessError> {
        let mut stdout = String::new();
        while let Some(line) = self.stdout_lines.next_line().await? {
            stdout.push_str(&line);
            stdout.push('\n');
        }
        let status = self.child.wait().await?;
        let stderr = match self.stderr_task.take() {
            Some(task) => task.await.unwrap_or_default(),
            None => String::new(),
        };
        Ok(ProcessOutput { stdout, stderr, exit_code: status.code().unwrap_or(-1) })
    }
}

#[cfg(test)]
#[path = "process_tests.rs"]
mod tests;
