// SPDX-License-Identifier: MIT
// Copyright (c) 2026 EDA Task Runner Contributors

//! TOML task-file loading into an [`eda_core::ConfigStore`].
//!
//! Config *parsing* is explicitly out of scope for `eda-engine` (spec.md
//! §1) — this is the one concrete loader the CLI needs to be runnable
//! end-to-end. The schema mirrors the configuration store's data model
//! (spec.md §3) directly: a flat list of tasks, each with a per-stage
//! action table, plus the `run_order`/`run_type` scheduling metadata keyed
//! the same way the engine looks them up.

use eda_core::{
    ActionRecord, ConfigStore, FlowBundle, GroupKey, Identity, RunType, Stage, TaskRecord,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read { path: String, source: std::io::Error },
    #[error("TOML parse error in {path}: {source}")]
    Toml { path: String, source: toml::de::Error },
    #[error("run_order entry for {block}:{version} references unknown flow(s): {flows}")]
    UnknownFlow { block: String, version: String, flows: String },
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TaskFile {
    #[serde(default, rename = "task")]
    tasks: Vec<TaskDef>,
    #[serde(default, rename = "run_order")]
    run_order: Vec<RunOrderDef>,
    #[serde(default, rename = "run_type")]
    run_type: Vec<RunTypeDef>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TaskDef {
    block: String,
    version: String,
    flow: String,
    vendor: String,
    branch: String,
    task: String,
    #[serde(default)]
    build: Option<ActionDef>,
    #[serde(default)]
    run: Option<ActionDef>,
    #[serde(default)]
    check: Option<ActionDef>,
    #[serde(default)]
    summary: Option<ActionDef>,
    #[serde(default)]
    release: Option<ActionDef>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ActionDef {
    #[serde(default)]
    command: Option<String>,
    #[serde(default)]
    path: Option<std::path::PathBuf>,
    #[serde(default)]
    run_method: Option<String>,
    #[serde(default)]
    viewer: Option<String>,
    #[serde(default)]
    report_file: Option<std::path::PathBuf>,
}

impl From<ActionDef> for ActionRecord {
    fn from(def: ActionDef) -> Self {
        ActionRecord {
            command: def.command,
            path: def.path,
            run_method: def.run_method,
            viewer: def.viewer,
            report_file: def.report_file,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RunOrderDef {
    block: String,
    version: String,
    bundles: Vec<FlowBundle>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RunTypeDef {
    block: String,
    version: String,
    flow: String,
    vendor: String,
    branch: String,
    #[serde(rename = "type")]
    run_type: RunTypeToml,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
enum RunTypeToml {
    Serial,
    Parallel,
}

impl From<RunTypeToml> for RunType {
    fn from(t: RunTypeToml) -> Self {
        match t {
            RunTypeToml::Serial => RunType::Serial,
            RunTypeToml::Parallel => RunType::Parallel,
        }
    }
}

/// A `ConfigStore` loaded once from a TOML task file.
///
/// Mirrors [`eda_core::test_support::InMemoryConfigStore`]'s shape; the
/// only difference is that this one is populated by parsing a file instead
/// of by test-only builder methods.
pub struct TomlConfigStore {
    tasks: Vec<Arc<TaskRecord>>,
    run_order: HashMap<String, Vec<FlowBundle>>,
    run_type: HashMap<String, RunType>,
}

impl TomlConfigStore {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.display().to_string(), source })?;
        Self::parse(&content, &path.display().to_string())
    }

    pub fn parse(content: &str, path_for_errors: &str) -> Result<Self, ConfigError> {
        let file: TaskFile = toml::from_str(content)
            .map_err(|source| ConfigError::Toml { path: path_for_errors.to_string(), source })?;

        let mut tasks = Vec::with_capacity(file.tasks.len());
        for def in file.tasks {
            let identity =
                Identity::new(def.block, def.version, def.flow, def.vendor, def.branch, def.task);
            let mut actions = HashMap::new();
            if let Some(a) = def.build {
                actions.insert(Stage::Build, a.into());
            }
            if let Some(a) = def.run {
                actions.insert(Stage::Run, a.into());
            }
            if let Some(a) = def.check {
                actions.insert(Stage::Check, a.into());
            }
            if let Some(a) = def.summary {
                actions.insert(Stage::Summary, a.into());
            }
            if let Some(a) = def.release {
                actions.insert(Stage::Release, a.into());
            }
            tasks.push(Arc::new(TaskRecord::new(identity, actions)));
        }

        let mut run_order = HashMap::new();
        for def in file.run_order {
            let known_flows: Vec<&str> = tasks
                .iter()
                .filter(|t| t.identity.block == def.block && t.identity.version == def.version)
                .map(|t| t.identity.flow.as_str())
                .collect();
            let unknown: Vec<&str> = def
                .bundles
                .iter()
                .flatten()
                .map(|f| f.as_str())
                .filter(|f| !known_flows.contains(f))
                .collect();
            if !unknown.is_empty() {
                return Err(ConfigError::UnknownFlow {
                    block: def.block,
                    version: def.version,
                    flows: unknown.join(", "),
                });
            }
            run_order.insert(format!("{}:{}", def.block, def.version), def.bundles);
        }

        let mut run_type = HashMap::new();
        for def in file.run_type {
            let key = GroupKey {
                block: def.block,
                version: def.version,
                flow: def.flow,
                vendor: def.vendor,
                branch: def.branch,
            }
            .to_string();
            run_type.insert(key, def.run_type.into());
        }

        Ok(Self { tasks, run_order, run_type })
    }

    pub fn tasks(&self) -> &[Arc<TaskRecord>] {
        &self.tasks
    }
}

impl ConfigStore for TomlConfigStore {
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
#[path = "config_tests.rs"]
mod tests;
