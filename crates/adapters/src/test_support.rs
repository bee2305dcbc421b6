// SPDX-License-Identifier: MIT
// Copyright (c) 2026 EDA Task Runner Contributors

//! Scripted fakes for `ProcessRunner` and `BatchAdapter`, used by the
//! engine crate's own tests so they never touch a real shell or LSF.

use crate::batch::{BatchAdapter, BatchError, JobState};
use crate::process::{ProcessError, ProcessHandle, ProcessOutput, ProcessRunner};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::path::Path;
use std::sync::Mutex;

/// One scripted process result: the lines it will yield from
/// `read_first_stdout_line`/`communicate`, plus its final exit code.
#[derive(Debug, Clone, Default)]
pub struct ScriptedProcess {
    pub stdout_lines: Vec<String>,
    pub stderr: String,
    pub exit_code: i32,
    pub pid: Option<u32>,
}

impl ScriptedProcess {
    pub fn success(stdout_lines: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            stdout_lines: stdout_lines.into_iter().map(Into::into).collect(),
            exit_code: 0,
            pid: Some(1),
            ..Default::default()
        }
    }

    pub fn failure(exit_code: i32) -> Self {
        Self { exit_code, pid: Some(1), ..Default::default() }
    }
}

/// Records every spawn/kill invocation and replays a scripted queue of
/// process results in call order.
#[derive(Default)]
pub struct FakeProcessRunner {
    scripted: Mutex<VecDeque<ScriptedProcess>>,
    pub spawned_commands: Mutex<Vec<String>>,
    pub killed_pids: Mutex<Vec<u32>>,
}

impl FakeProcessRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, process: ScriptedProcess) {
        self.scripted.lock().unwrap_or_else(|p| p.into_inner()).push_back(process);
    }
}

#[async_trait]
impl ProcessRunner for FakeProcessRunner {
    async fn spawn(
        &self,
        command: &str,
        _cwd: Option<&Path>,
        _env: &[(String, String)],
    ) -> Result<Box<dyn ProcessHandle>, ProcessError> {
        self.spawned_commands
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .push(command.to_string());
        let scripted = self
            .scripted
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .pop_front()
            .unwrap_or_default();
        Ok(Box::new(FakeProcessHandle {
            pid: scripted.pid,
            lines: scripted.stdout_lines.into(),
            stderr: scripted.stderr,
            exit_code: scripted.exit_code,
        }))
    }

    async fn kill_tree(&self, pid: u32) -> Result<(), ProcessError> {
        self.killed_pids.lock().unwrap_or_else(|p| p.into_inner()).push(pid);
        Ok(())
    }
}

struct FakeProcessHandle {
    pid: Option<u32>,
    lines: VecDeque<String>,
    stderr: String,
    exit_code: i32,
}

#[async_trait]
impl ProcessHandle for FakeProcessHandle {
    fn pid(&self) -> Option<u32> {
        self.pid
    }

    async fn read_first_stdout_line(&mut self) -> Result<Option<String>, ProcessError> {
        Ok(self.lines.pop_front())
    }

    async fn communicate(mut self: Box<Self>) -> Result<ProcessOutput, ProcessError> {
        let stdout = self.lines.drain(..).collect::<Vec<_>>().join("\n");
        Ok(ProcessOutput { stdout, stderr: self.stderr, exit_code: self.exit_code })
    }
}

/// Scripted `BatchAdapter`: a fixed job-id to hand back from
/// `submit_job_id`, plus a queue of states returned in order from
/// successive `query` calls (the last entry repeats once exhausted).
#[derive(Default)]
pub struct FakeBatchAdapter {
    pub job_id: Mutex<String>,
    states: Mutex<VecDeque<JobState>>,
    pub killed: Mutex<Vec<String>>,
}

impl FakeBatchAdapter {
    pub fn new(job_id: impl Into<String>, states: impl IntoIterator<Item = JobState>) -> Self {
        Self {
            job_id: Mutex::new(job_id.into()),
            states: Mutex::new(states.into_iter().collect()),
            killed: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl BatchAdapter for FakeBatchAdapter {
    fn submit_job_id(&self, _first_stdout_line: &str) -> Result<String, BatchError> {
        Ok(self.job_id.lock().unwrap_or_else(|p| p.into_inner()).clone())
    }

    async fn query(&self, _job_id: &str) -> Result<JobState, BatchError> {
        let mut states = self.states.lock().unwrap_or_else(|p| p.into_inner());
        match states.len() {
            0 => Ok(JobState::Unknown),
            1 => Ok(*states.front().unwrap_or(&JobState::Unknown)),
            _ => Ok(states.pop_front().unwrap_or(JobState::Unknown)),
        }
    }

    async fn kill(&self, job_id: &str) -> Result<(), BatchError> {
        self.killed.lock().unwrap_or_else(|p| p.into_inner()).push(job_id.to_string());
        Ok(())
    }
}

#[cfg(test)]
#[path = "test_support_tests.rs"]
mod tests;
