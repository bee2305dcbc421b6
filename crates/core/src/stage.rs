// SPDX-License-Identifier: MIT
// Copyright (c) 2026 EDA Task Runner Contributors

//! The four-or-five per-task action stages.

use serde::{Deserialize, Serialize};

/// One phase of the per-task lifecycle.
///
/// `Run` is handled by the Run Executor (§4.2); the rest share the Action
/// Executor (§4.1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    Build,
    Run,
    Check,
    Summary,
    Release,
}

impl Stage {
    /// Key used to look up `task.ACTION[stage]` and `RUN_METHOD`/`COMMAND`.
    pub fn key(self) -> &'static str {
        match self {
            Stage::Build => "BUILD",
            Stage::Run => "RUN",
            Stage::Check => "CHECK",
            Stage::Summary => "SUMMARY",
            Stage::Release => "RELEASE",
        }
    }

    /// Lowercase name used in compound result strings (`"<stage> passed"`).
    pub fn name(self) -> &'static str {
        match self {
            Stage::Build => "build",
            Stage::Run => "run",
            Stage::Check => "check",
            Stage::Summary => "summary",
            Stage::Release => "release",
        }
    }

    /// The gerund "active" state emitted on `start()` (spec §4.1 step 3).
    pub fn active_state(self) -> &'static str {
        match self {
            Stage::Build => "building",
            Stage::Run => "running",
            Stage::Check => "checking",
            Stage::Summary => "summarizing",
            Stage::Release => "releasing",
        }
    }
}

crate::simple_display! {
    Stage {
        Build => "BUILD",
        Run => "RUN",
        Check => "CHECK",
        Summary => "SUMMARY",
        Release => "RELEASE",
    }
}

#[cfg(test)]
#[path = "stage_tests.rs"]
mod tests;
