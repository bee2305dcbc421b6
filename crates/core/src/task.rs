// SPDX-License-Identifier: MIT
// Copyright (c) 2026 EDA Task Runner Contributors

//! The mutable per-task record (spec.md §3).

use crate::action::ActionRecord;
use crate::identity::Identity;
use crate::stage::Stage;
use crate::status::Status;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// A batch (LSF) or local job-id tag.
///
/// The `b:`/`l:` prefix is part of the tag's `Display`, never the adapter
/// call: callers must strip it exactly once (spec invariant, §3) before
/// talking to the batch adapter or the process runner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobTag {
    Batch(String),
    Local(String),
}

impl JobTag {
    /// The raw id, with the `b:`/`l:` prefix already stripped.
    pub fn raw(&self) -> &str {
        match self {
            JobTag::Batch(id) => id,
            JobTag::Local(id) => id,
        }
    }

    pub fn is_batch(&self) -> bool {
        matches!(self, JobTag::Batch(_))
    }
}

impl fmt::Display for JobTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobTag::Batch(id) => write!(f, "b:{id}"),
            JobTag::Local(id) => write!(f, "l:{id}"),
        }
    }
}

/// Display value for a task's runtime field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Runtime {
    #[default]
    Null,
    Pending,
    Elapsed(String),
}

impl fmt::Display for Runtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Runtime::Null => f.write_str("null"),
            Runtime::Pending => f.write_str("pending"),
            Runtime::Elapsed(s) => f.write_str(s),
        }
    }
}

/// Mutable fields guarded together so a reader never observes a torn update
/// (spec §5: reconciliation reads and Kill-Orchestrator writes of `Status`
/// must be atomic with respect to each other).
#[derive(Debug, Clone)]
struct MutableState {
    status: Status,
    job: Option<JobTag>,
    runtime: Runtime,
}

/// A task: immutable identity and action table, mutable lifecycle state.
///
/// Owned by the configuration store, referenced by the engine via `Arc`.
pub struct TaskRecord {
    pub identity: Identity,
    pub actions: HashMap<Stage, ActionRecord>,
    state: Mutex<MutableState>,
}

impl TaskRecord {
    pub fn new(identity: Identity, actions: HashMap<Stage, ActionRecord>) -> Self {
        Self {
            identity,
            actions,
            state: Mutex::new(MutableState { status: Status::Queued, job: None, runtime: Runtime::Null }),
        }
    }

    pub fn action(&self, stage: Stage) -> Option<&ActionRecord> {
        self.actions.get(&stage)
    }

    pub fn status(&self) -> Status {
        self.state.lock().status.clone()
    }

    pub fn set_status(&self, status: Status) {
        self.state.lock().status = status;
    }

    pub fn job(&self) -> Option<JobTag> {
        self.state.lock().job.clone()
    }

    pub fn set_job(&self, job: JobTag) {
        self.state.lock().job = Some(job);
    }

    pub fn runtime(&self) -> Runtime {
        self.state.lock().runtime.clone()
    }

    pub fn set_runtime(&self, runtime: Runtime) {
        self.state.lock().runtime = runtime;
    }
}

#[cfg(test)]
#[path = "task_tests.rs"]
mod tests;
