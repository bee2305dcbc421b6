// SPDX-License-Identifier: MIT
// Copyright (c) 2026 EDA Task Runner Contributors

//! Per-(task, stage) action records (spec.md §3).

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Recognized keys for one stage of one task. All fields are optional —
/// an absent `command` means the stage is "undefined" for this task.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    #[serde(default)]
    pub command: Option<String>,
    #[serde(default)]
    pub path: Option<PathBuf>,
    /// RUN-only: a prefix such as `bsub -q normal`.
    #[serde(default)]
    pub run_method: Option<String>,
    #[serde(default)]
    pub viewer: Option<String>,
    #[serde(default)]
    pub report_file: Option<PathBuf>,
}

impl ActionRecord {
    /// `true` when `COMMAND` is present — i.e. the stage is defined.
    pub fn is_defined(&self) -> bool {
        self.command.as_ref().is_some_and(|c| !c.is_empty())
    }
}
