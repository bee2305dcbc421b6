// SPDX-License-Identifier: MIT
// Copyright (c) 2026 EDA Task Runner Contributors

//! Task identity — the (Block, Version, Flow, Vendor, Branch, Task) 6-tuple.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Uniquely identifies a task within a single invocation.
///
/// All six fields are non-empty strings. Identity is immutable once a
/// [`crate::task::TaskRecord`] is constructed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identity {
    pub block: String,
    pub version: String,
    pub flow: String,
    pub vendor: String,
    pub branch: String,
    pub task: String,
}

impl Identity {
    pub fn new(
        block: impl Into<String>,
        version: impl Into<String>,
        flow: impl Into<String>,
        vendor: impl Into<String>,
        branch: impl Into<String>,
        task: impl Into<String>,
    ) -> Self {
        Self {
            block: block.into(),
            version: version.into(),
            flow: flow.into(),
            vendor: vendor.into(),
            branch: branch.into(),
            task: task.into(),
        }
    }

    /// `Block:Version` key used to look up `RUN_ORDER`.
    pub fn block_version_key(&self) -> String {
        format!("{}:{}", self.block, self.version)
    }

    /// `Block.Version.Flow.Vendor.Branch` key used to look up `RUN_TYPE` and
    /// to group sibling tasks for the Group Scheduler.
    pub fn group_key(&self) -> GroupKey {
        GroupKey {
            block: self.block.clone(),
            version: self.version.clone(),
            flow: self.flow.clone(),
            vendor: self.vendor.clone(),
            branch: self.branch.clone(),
        }
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {} {}",
            self.block, self.version, self.flow, self.vendor, self.branch, self.task
        )
    }
}

/// `(Block, Version, Flow, Vendor, Branch)` — identifies one scheduling group.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupKey {
    pub block: String,
    pub version: String,
    pub flow: String,
    pub vendor: String,
    pub branch: String,
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}.{}.{}", self.block, self.version, self.flow, self.vendor, self.branch)
    }
}

#[cfg(test)]
#[path = "identity_tests.rs"]
mod tests;
