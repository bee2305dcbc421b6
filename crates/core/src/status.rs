// SPDX-License-Identifier: MIT
// Copyright (c) 2026 EDA Task Runner Contributors

//! Lifecycle states (spec.md §3).

use crate::stage::Stage;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of a completed stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Passed,
    Failed,
    /// `COMMAND` was absent — the stage never spawned a process.
    Undefined,
}

impl Outcome {
    fn as_str(self) -> &'static str {
        match self {
            Outcome::Passed => "passed",
            Outcome::Failed => "failed",
            Outcome::Undefined => "undefined",
        }
    }
}

/// A task's current lifecycle state.
///
/// Strings round-trip exactly as spec.md §3 describes them so that the
/// status sink and any external observer see the same vocabulary the
/// original tool used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    Queued,
    Building,
    Running,
    Killing,
    Killed,
    Cancelled,
    Checking,
    Summarizing,
    Releasing,
    /// `"<stage> <outcome>"`, e.g. `"run passed"`, `"check undefined"`.
    Stage(Stage, Outcome),
}

impl Status {
    /// The gerund "active" status for a given stage (used by `start()`).
    pub fn active(stage: Stage) -> Self {
        match stage {
            Stage::Build => Status::Building,
            Stage::Run => Status::Running,
            Stage::Check => Status::Checking,
            Stage::Summary => Status::Summarizing,
            Stage::Release => Status::Releasing,
        }
    }

    /// `UNEXPECTED = {killed, cancelled, "<stage> failed"}` (spec §3).
    ///
    /// Triggers downstream cancellation in the Group and Flow Schedulers.
    pub fn is_unexpected(&self) -> bool {
        matches!(self, Status::Killed | Status::Cancelled)
            || matches!(self, Status::Stage(_, Outcome::Failed))
    }

    /// `true` for `"run passed"` specifically — the sole condition under
    /// which a serial group's successor runs without `ignore_fail`.
    pub fn is_run_passed(&self) -> bool {
        matches!(self, Status::Stage(Stage::Run, Outcome::Passed))
    }

    /// `true` for `"run undefined"` — the ambiguous predecessor case
    /// (spec §9 "Ambiguities to preserve, not guess").
    pub fn is_run_undefined(&self) -> bool {
        matches!(self, Status::Stage(Stage::Run, Outcome::Undefined))
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Queued => f.write_str("queued"),
            Status::Building => f.write_str("building"),
            Status::Running => f.write_str("running"),
            Status::Killing => f.write_str("killing"),
            Status::Killed => f.write_str("killed"),
            Status::Cancelled => f.write_str("cancelled"),
            Status::Checking => f.write_str("checking"),
            Status::Summarizing => f.write_str("summarizing"),
            Status::Releasing => f.write_str("releasing"),
            Status::Stage(stage, outcome) => write!(f, "{} {}", stage.name(), outcome.as_str()),
        }
    }
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
