// SPDX-License-Identifier: MIT
// Copyright (c) 2026 EDA Task Runner Contributors

//! In-memory `ConfigStore` for tests and the CLI's dry-run mode.

use crate::action::ActionRecord;
use crate::config::{ConfigStore, FlowBundle, RunType};
use crate::identity::{GroupKey, Identity};
use crate::stage::Stage;
use crate::task::TaskRecord;
use std::collections::HashMap;
use std::sync::Arc;

/// A `ConfigStore` built entirely in memory — no file parsing, no I/O.
#[derive(Default)]
pub struct InMemoryConfigStore {
    tasks: Vec<Arc<TaskRecord>>,
    run_order: HashMap<String, Vec<FlowBundle>>,
    run_type: HashMap<String, RunType>,
}

impl InMemoryConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_task(
        &mut self,
        identity: Identity,
        actions: HashMap<Stage, ActionRecord>,
    ) -> Arc<TaskRecord> {
        let task = Arc::new(TaskRecord::new(identity, actions));
        self.tasks.push(task.clone());
        task
    }

    pub fn set_run_order(&mut self, block: &str, version: &str, order: Vec<FlowBundle>) {
        self.run_order.insert(format!("{block}:{version}"), order);
    }

    pub fn set_run_type(&mut self, group: &GroupKey, run_type: RunType) {
        self.run_type.insert(group.to_string(), run_type);
    }

    pub fn tasks(&self) -> &[Arc<TaskRecord>] {
        &self.tasks
    }
}

impl ConfigStore for InMemoryConfigStore {
    fn lookup(&self, identity: &Identity) -> Option<Arc<TaskRecord>> {
        self.tasks.iter().find(|t| &t.identity == identity).cloned()
    }

    fn tasks_for_block_version(&self, block: &str, version: &str) -> Vec<Arc<TaskRecord>> {
        self.tasks
            .iter()
            .filter(|t| t.identity.block == block && t.identity.version == version)
            .cloned()
            .collect()
    }

    fn run_order(&self, block: &str, version: &str) -> Vec<FlowBundle> {
        self.run_order.get(&format!("{block}:{version}")).cloned().unwrap_or_default()
    }

    fn run_type(&self, group: &GroupKey) -> RunType {
        self.run_type.get(&group.to_string()).copied().unwrap_or(RunType::Parallel)
    }
}

#[cfg(test)]
#[path = "test_support_tests.rs"]
mod tests;
