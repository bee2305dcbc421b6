// SPDX-License-Identifier: MIT
// Copyright (c) 2026 EDA Task Runner Contributors

//! The configuration store interface (spec.md §3).
//!
//! Config *parsing* is out of scope for the engine (spec.md §1) — this
//! trait is the narrow interface the scheduler is written against. A real
//! loader (TOML, HCL, whatever a deployment prefers) lives outside this
//! crate and only needs to produce something implementing `ConfigStore`.

use crate::identity::{GroupKey, Identity};
use crate::task::TaskRecord;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A set of flow names that execute in parallel within one bundle.
pub type FlowBundle = Vec<String>;

/// Serial (gated, in declared order) or parallel (all at once) group policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunType {
    Serial,
    Parallel,
}

/// Read-mostly view over task records and scheduling metadata.
///
/// Only `Status`, `Job`, and `Runtime` on the returned `TaskRecord`s are
/// written during execution (spec §5); everything else is immutable once
/// loaded.
pub trait ConfigStore: Send + Sync {
    /// Resolve a task identity to its record, if known.
    fn lookup(&self, identity: &Identity) -> Option<Arc<TaskRecord>>;

    /// All tasks for one `(Block, Version)` pair, in load order.
    fn tasks_for_block_version(&self, block: &str, version: &str) -> Vec<Arc<TaskRecord>>;

    /// The ordered flow bundles for one `(Block, Version)` pair.
    fn run_order(&self, block: &str, version: &str) -> Vec<FlowBundle>;

    /// Serial/parallel policy for one scheduling group.
    fn run_type(&self, group: &GroupKey) -> RunType;

    /// Distinct `(Block, Version)` pairs present among `tasks`.
    fn block_versions(tasks: &[Arc<TaskRecord>]) -> Vec<(String, String)>
    where
        Self: Sized,
    {
        let mut seen = Vec::new();
        for t in tasks {
            let key = (t.identity.block.clone(), t.identity.version.clone());
            if !seen.contains(&key) {
                seen.push(key);
            }
        }
        seen
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
